// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, Result};

pub const EMULATOR: &str = "emulator";
pub const TESTNET: &str = "testnet";
pub const MAINNET: &str = "mainnet";

/// An access node the project can talk to
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Network {
    pub name: String,
    pub host: String,
    /// Public key of the access node, required for secured connections
    pub key: Option<String>,
}

impl Network {
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
        Network {
            name: name.into(),
            host: host.into(),
            key: None,
        }
    }

    pub fn emulator() -> Self {
        Network::new(EMULATOR, "127.0.0.1:3569")
    }

    pub fn testnet() -> Self {
        Network::new(TESTNET, "access.devnet.nodes.onflow.org:9000")
    }

    pub fn mainnet() -> Self {
        Network::new(MAINNET, "access.mainnet.nodes.onflow.org:9000")
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Networks(Vec<Network>);

impl Networks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The emulator, testnet and mainnet networks
    pub fn defaults() -> Self {
        vec![Network::emulator(), Network::testnet(), Network::mainnet()]
            .into_iter()
            .collect()
    }

    pub fn by_name(&self, name: &str) -> Result<&Network> {
        self.0
            .iter()
            .find(|network| network.name == name)
            .ok_or_else(|| Error::not_found("network", name))
    }

    pub fn add_or_update(&mut self, network: Network) {
        match self.0.iter_mut().find(|n| n.name == network.name) {
            Some(existing) => *existing = network,
            None => self.0.push(network),
        }
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        let index = self
            .0
            .iter()
            .position(|network| network.name == name)
            .ok_or_else(|| Error::not_found("network", name))?;
        self.0.remove(index);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Network> {
        self.0.iter()
    }
}

impl FromIterator<Network> for Networks {
    fn from_iter<I: IntoIterator<Item = Network>>(iter: I) -> Self {
        let mut networks = Networks::new();
        for network in iter {
            networks.add_or_update(network);
        }
        networks
    }
}

impl<'a> IntoIterator for &'a Networks {
    type IntoIter = std::slice::Iter<'a, Network>;
    type Item = &'a Network;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};

    #[test]
    fn test_defaults() {
        let networks = Networks::defaults();
        assert_eq!(networks.len(), 3);
        assert_eq!(networks.by_name(EMULATOR).unwrap().host, "127.0.0.1:3569");
        assert_eq!(
            networks.by_name(MAINNET).unwrap().host,
            "access.mainnet.nodes.onflow.org:9000"
        );
    }

    #[test]
    fn test_update_and_remove() {
        let mut networks = Networks::defaults();
        networks.add_or_update(Network::new(EMULATOR, "127.0.0.1:9000"));
        assert_eq!(networks.len(), 3);
        assert_eq!(networks.by_name(EMULATOR).unwrap().host, "127.0.0.1:9000");

        assert_ok!(networks.remove(TESTNET));
        assert_err!(networks.by_name(TESTNET));
        assert_eq!(
            networks.remove(TESTNET).unwrap_err().to_string(),
            "network testnet does not exist"
        );
    }
}
