// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! System contracts deployed at well known addresses on every network.

use crate::{
    address::Address,
    config::{Aliases, EMULATOR, MAINNET, TESTNET},
};

/// A core contract and its address on the emulator, testnet and mainnet
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CoreContract {
    pub name: &'static str,
    emulator: &'static str,
    testnet: &'static str,
    mainnet: &'static str,
}

const fn core(
    name: &'static str,
    emulator: &'static str,
    testnet: &'static str,
    mainnet: &'static str,
) -> CoreContract {
    CoreContract {
        name,
        emulator,
        testnet,
        mainnet,
    }
}

pub const CORE_CONTRACTS: &[CoreContract] = &[
    core("FungibleToken", "ee82856bf20e2aa6", "9a0766d93b6608b7", "f233dcee88fe0abe"),
    core("FungibleTokenMetadataViews", "ee82856bf20e2aa6", "9a0766d93b6608b7", "f233dcee88fe0abe"),
    core("Burner", "f8d6e0586b0a20c7", "9a0766d93b6608b7", "f233dcee88fe0abe"),
    core("FlowToken", "0ae53cb6e3f42a79", "7e60df042a9c0868", "1654653399040a61"),
    core("FlowFees", "e5a8b7f23e8b548f", "912d5440f7e3769e", "f919ee77447b7497"),
    core("FlowServiceAccount", "f8d6e0586b0a20c7", "8c5303eaa26202d6", "e467b9dd11fa00df"),
    core("FlowStorageFees", "f8d6e0586b0a20c7", "8c5303eaa26202d6", "e467b9dd11fa00df"),
    core("EVM", "f8d6e0586b0a20c7", "8c5303eaa26202d6", "e467b9dd11fa00df"),
    core("NonFungibleToken", "f8d6e0586b0a20c7", "631e88ae7f1d7c20", "1d7e57aa55817448"),
    core("MetadataViews", "f8d6e0586b0a20c7", "631e88ae7f1d7c20", "1d7e57aa55817448"),
    core("ViewResolver", "f8d6e0586b0a20c7", "631e88ae7f1d7c20", "1d7e57aa55817448"),
];

impl CoreContract {
    /// Address on `network`, if the network is one of the standard ones
    pub fn address(&self, network: &str) -> Option<Address> {
        let hex = match network {
            EMULATOR => self.emulator,
            TESTNET => self.testnet,
            MAINNET => self.mainnet,
            _ => return None,
        };
        Address::from_hex(hex).ok()
    }

    /// Its address on every standard network
    pub fn aliases(&self) -> Aliases {
        let mut aliases = Aliases::new();
        for network in [EMULATOR, TESTNET, MAINNET] {
            if let Some(address) = self.address(network) {
                aliases.add(network, address);
            }
        }
        aliases
    }
}

/// The core contract `name` deployed at `address` on `network`, if there is one
pub fn find(network: &str, name: &str, address: &Address) -> Option<&'static CoreContract> {
    CORE_CONTRACTS.iter().find(|contract| {
        contract.name == name && contract.address(network).as_ref() == Some(address)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_none, assert_some};

    #[test]
    fn test_find_requires_exact_match() {
        let flow_token = Address::from_hex("0x1654653399040a61").unwrap();
        assert_some!(find(MAINNET, "FlowToken", &flow_token));
        assert_none!(find(TESTNET, "FlowToken", &flow_token));
        assert_none!(find(MAINNET, "FungibleToken", &flow_token));
        assert_none!(find("previewnet", "FlowToken", &flow_token));
    }

    #[test]
    fn test_aliases_cover_every_network() {
        let contract = find(
            TESTNET,
            "NonFungibleToken",
            &Address::from_hex("631e88ae7f1d7c20").unwrap(),
        )
        .unwrap();
        let aliases = contract.aliases();

        assert_eq!(aliases.len(), 3);
        assert_eq!(
            aliases.by_network(EMULATOR).unwrap().address.to_string(),
            "f8d6e0586b0a20c7"
        );
        assert_eq!(
            aliases.by_network(MAINNET).unwrap().address.to_string(),
            "1d7e57aa55817448"
        );
    }

    #[test]
    fn test_every_address_parses() {
        for contract in CORE_CONTRACTS {
            assert_eq!(contract.aliases().len(), 3, "{}", contract.name);
        }
    }
}
