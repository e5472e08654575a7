// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    config::{
        alias::Aliases,
        canonical::{self, CanonicalEntity},
        dependency::Dependency,
    },
    error::{Error, Result},
    path::SOURCE_FILE_EXTENSION,
};

/// Directory dependency sources are installed into, relative to the project root
pub const DEPENDENCY_IMPORTS_DIR: &str = "imports";

/// A contract declared in the project configuration
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Contract {
    pub name: String,
    /// Path of the contract source, relative to the configuration file
    pub location: String,
    pub aliases: Aliases,
    /// Name of the contract this one is an alias of
    pub canonical: Option<String>,
    /// Set for contracts synthesized from a dependency, which are not written
    /// back to the `contracts` section
    pub is_dependency: bool,
}

impl Contract {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Contract {
            name: name.into(),
            location: location.into(),
            ..Default::default()
        }
    }

    pub fn with_canonical(mut self, canonical: impl Into<String>) -> Self {
        self.canonical = Some(canonical.into());
        self
    }

    pub fn with_aliases(mut self, aliases: Aliases) -> Self {
        self.aliases = aliases;
        self
    }

    /// True if the contract already has a deployed address on some network
    pub fn is_aliased(&self) -> bool {
        !self.aliases.is_empty()
    }

    pub fn is_alias(&self) -> bool {
        CanonicalEntity::is_alias(self)
    }

    pub fn canonical_name(&self) -> &str {
        CanonicalEntity::canonical_name(self)
    }
}

impl CanonicalEntity for Contract {
    const KIND: &'static str = "contract";

    fn name(&self) -> &str {
        &self.name
    }

    fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }
}

/// The contracts of a project, unique by name and kept in insertion order
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Contracts(Vec<Contract>);

impl Contracts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_name(&self, name: &str) -> Result<&Contract> {
        self.0
            .iter()
            .find(|contract| contract.name == name)
            .ok_or_else(|| Error::not_found(Contract::KIND, name))
    }

    pub fn by_name_mut(&mut self, name: &str) -> Result<&mut Contract> {
        self.0
            .iter_mut()
            .find(|contract| contract.name == name)
            .ok_or_else(|| Error::not_found(Contract::KIND, name))
    }

    /// Replaces the contract with the same name in place, or appends it
    pub fn add_or_update(&mut self, contract: Contract) {
        match self.0.iter_mut().find(|c| c.name == contract.name) {
            Some(existing) => *existing = contract,
            None => self.0.push(contract),
        }
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        let index = self
            .0
            .iter()
            .position(|contract| contract.name == name)
            .ok_or_else(|| Error::not_found(Contract::KIND, name))?;
        self.0.remove(index);
        Ok(())
    }

    /// Rejects contracts naming themselves as canonical. Canonical targets that do
    /// not exist are tolerated.
    pub fn validate_canonical(&self) -> Result<()> {
        canonical::validate(&self.0)
    }

    /// All alias contracts of `canonical_name`, in collection order
    pub fn get_aliases(&self, canonical_name: &str) -> Vec<&Contract> {
        canonical::aliases_of(&self.0, canonical_name)
    }

    /// Records a dependency as a contract so it can be imported like any other.
    ///
    /// The location is derived from the dependency's remote address and contract
    /// name. When `aliases` is empty the dependency's address on `network` is used.
    pub fn add_dependency_as_contract(
        &mut self,
        dependency: &Dependency,
        network: &str,
        aliases: Aliases,
    ) {
        let aliases = if aliases.is_empty() {
            let mut aliases = Aliases::new();
            aliases.add(network, dependency.source.address);
            aliases
        } else {
            aliases
        };

        self.add_or_update(Contract {
            name: dependency.name.clone(),
            location: dependency_location(dependency),
            aliases,
            canonical: dependency.canonical.clone(),
            is_dependency: true,
        });
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|contract| contract.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contract> {
        self.0.iter()
    }
}

/// Local location of an installed dependency's source
pub fn dependency_location(dependency: &Dependency) -> String {
    format!(
        "{}/{}/{}{}",
        DEPENDENCY_IMPORTS_DIR,
        dependency.source.address,
        dependency.source.contract_name,
        SOURCE_FILE_EXTENSION
    )
}

impl FromIterator<Contract> for Contracts {
    fn from_iter<I: IntoIterator<Item = Contract>>(iter: I) -> Self {
        let mut contracts = Contracts::new();
        for contract in iter {
            contracts.add_or_update(contract);
        }
        contracts
    }
}

impl<'a> IntoIterator for &'a Contracts {
    type IntoIter = std::slice::Iter<'a, Contract>;
    type Item = &'a Contract;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{address::Address, config::dependency::RemoteSource};
    use claims::{assert_err, assert_ok};

    fn fusd_family() -> Contracts {
        vec![
            Contract::new("FUSD", "FUSD.cdc"),
            Contract::new("FUSD1", "FUSD.cdc").with_canonical("FUSD"),
            Contract::new("FUSD2", "FUSD.cdc").with_canonical("FUSD"),
            Contract::new("FT", "FT.cdc"),
            Contract::new("FT1", "FT.cdc").with_canonical("FT"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_add_or_update_add() {
        let mut contracts = Contracts::new();
        contracts.add_or_update(Contract::new("mycontract", "path/to/contract.cdc"));

        assert_eq!(contracts.len(), 1);
        let contract = contracts.by_name("mycontract").unwrap();
        assert_eq!(contract.location, "path/to/contract.cdc");
    }

    #[test]
    fn test_add_or_update_update_keeps_position() {
        let mut contracts: Contracts = vec![
            Contract::new("first", "first.cdc"),
            Contract::new("mycontract", "path/to/contract.cdc"),
            Contract::new("last", "last.cdc"),
        ]
        .into_iter()
        .collect();
        contracts.add_or_update(Contract::new("mycontract", "new/path/to/contract.cdc"));
        contracts.add_or_update(Contract::new("mycontract", "new/path/to/contract.cdc"));

        assert_eq!(contracts.len(), 3);
        assert_eq!(contracts.names(), vec!["first", "mycontract", "last"]);
        assert_eq!(
            contracts.by_name("mycontract").unwrap().location,
            "new/path/to/contract.cdc"
        );
    }

    #[test]
    fn test_remove() {
        let mut contracts: Contracts = vec![
            Contract::new("mycontract1", "path/to/contract.cdc"),
            Contract::new("mycontract2", "path/to/contract.cdc"),
            Contract::new("mycontract3", "path/to/contract.cdc"),
        ]
        .into_iter()
        .collect();

        assert_ok!(contracts.remove("mycontract2"));
        assert_eq!(contracts.names(), vec!["mycontract1", "mycontract3"]);

        let err = contracts.by_name("mycontract2").unwrap_err();
        assert_eq!(err.to_string(), "contract mycontract2 does not exist");
        assert_err!(contracts.remove("mycontract2"));
    }

    #[test]
    fn test_add_dependency_as_contract() {
        let mut contracts = Contracts::new();
        let dependency = Dependency::new(
            "testcontract",
            RemoteSource::new(
                "testnet",
                Address::from_hex("0x0000000000abcdef").unwrap(),
                "TestContract",
            ),
        );
        contracts.add_dependency_as_contract(&dependency, "testnet", Aliases::new());

        assert_eq!(contracts.len(), 1);
        let contract = contracts.by_name("testcontract").unwrap();
        assert_eq!(contract.location, "imports/0000000000abcdef/TestContract.cdc");
        assert_eq!(contract.aliases.len(), 1);
        assert!(contract.is_dependency);
    }

    #[test]
    fn test_add_dependency_as_contract_with_supplied_aliases() {
        let mut contracts = Contracts::new();
        let address = Address::from_hex("0x1654653399040a61").unwrap();
        let dependency = Dependency::new(
            "FlowToken",
            RemoteSource::new("mainnet", address, "FlowToken"),
        );
        let mut aliases = Aliases::new();
        aliases.add("emulator", Address::from_hex("0x0ae53cb6e3f42a79").unwrap());
        aliases.add("mainnet", address);
        contracts.add_dependency_as_contract(&dependency, "mainnet", aliases.clone());

        assert_eq!(contracts.by_name("FlowToken").unwrap().aliases, aliases);
    }

    #[test]
    fn test_is_alias_and_canonical_name() {
        let alias = Contract::new("FUSD1", "FUSD.cdc").with_canonical("FUSD");
        let canonical = Contract::new("FUSD", "FUSD.cdc");

        assert!(alias.is_alias());
        assert_eq!(alias.canonical_name(), "FUSD");
        assert!(!canonical.is_alias());
        assert_eq!(canonical.canonical_name(), "FUSD");
    }

    #[test]
    fn test_validate_canonical() {
        assert_ok!(fusd_family().validate_canonical());

        let dangling: Contracts = vec![Contract::new("FUSD1", "FUSD.cdc").with_canonical("FUSD")]
            .into_iter()
            .collect();
        assert_ok!(dangling.validate_canonical());

        let self_referential: Contracts =
            vec![Contract::new("FUSD", "FUSD.cdc").with_canonical("FUSD")]
                .into_iter()
                .collect();
        let err = self_referential.validate_canonical().unwrap_err();
        assert!(err
            .to_string()
            .contains("contract FUSD cannot have itself as canonical"));
    }

    #[test]
    fn test_get_aliases() {
        let contracts = fusd_family();

        let fusd_aliases: Vec<_> = contracts
            .get_aliases("FUSD")
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(fusd_aliases, vec!["FUSD1", "FUSD2"]);
        assert_eq!(contracts.get_aliases("FT").len(), 1);
        assert!(contracts.get_aliases("NonExistent").is_empty());
    }
}
