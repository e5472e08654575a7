// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    address::Address,
    config::{
        alias::Aliases,
        canonical::{self, CanonicalEntity},
    },
    error::{Error, Result},
};
use std::{fmt, str::FromStr};

/// Where a dependency is fetched from: `network://address.ContractName`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RemoteSource {
    pub network_name: String,
    pub address: Address,
    pub contract_name: String,
}

impl RemoteSource {
    pub fn new(
        network_name: impl Into<String>,
        address: Address,
        contract_name: impl Into<String>,
    ) -> Self {
        RemoteSource {
            network_name: network_name.into(),
            address,
            contract_name: contract_name.into(),
        }
    }
}

impl FromStr for RemoteSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidRemoteSource(s.to_string(), reason.to_string());

        let (network_name, rest) = s
            .split_once("://")
            .ok_or_else(|| invalid("expected network://address.ContractName"))?;
        let (address, contract_name) = rest
            .split_once('.')
            .ok_or_else(|| invalid("expected network://address.ContractName"))?;

        if network_name.is_empty() {
            return Err(invalid("network name is empty"));
        }
        if contract_name.is_empty() {
            return Err(invalid("contract name is empty"));
        }

        Ok(RemoteSource {
            network_name: network_name.to_string(),
            address: Address::from_hex(address)
                .map_err(|err| invalid(&format!("invalid address: {}", err)))?,
            contract_name: contract_name.to_string(),
        })
    }
}

impl fmt::Display for RemoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}.{}",
            self.network_name, self.address, self.contract_name
        )
    }
}

/// A contract sourced from a network rather than the local disk
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dependency {
    pub name: String,
    pub source: RemoteSource,
    /// Hex SHA-256 of the installed source, empty until installed
    pub hash: String,
    pub aliases: Aliases,
    pub canonical: Option<String>,
}

impl Dependency {
    pub fn new(name: impl Into<String>, source: RemoteSource) -> Self {
        Dependency {
            name: name.into(),
            source,
            hash: String::new(),
            aliases: Aliases::new(),
            canonical: None,
        }
    }

    pub fn with_canonical(mut self, canonical: impl Into<String>) -> Self {
        self.canonical = Some(canonical.into());
        self
    }

    pub fn is_alias(&self) -> bool {
        CanonicalEntity::is_alias(self)
    }

    pub fn canonical_name(&self) -> &str {
        CanonicalEntity::canonical_name(self)
    }
}

impl CanonicalEntity for Dependency {
    const KIND: &'static str = "dependency";

    fn name(&self) -> &str {
        &self.name
    }

    fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Dependencies(Vec<Dependency>);

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_name(&self, name: &str) -> Result<&Dependency> {
        self.0
            .iter()
            .find(|dependency| dependency.name == name)
            .ok_or_else(|| Error::not_found(Dependency::KIND, name))
    }

    pub fn add_or_update(&mut self, dependency: Dependency) {
        match self.0.iter_mut().find(|d| d.name == dependency.name) {
            Some(existing) => *existing = dependency,
            None => self.0.push(dependency),
        }
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        let index = self
            .0
            .iter()
            .position(|dependency| dependency.name == name)
            .ok_or_else(|| Error::not_found(Dependency::KIND, name))?;
        self.0.remove(index);
        Ok(())
    }

    pub fn validate_canonical(&self) -> Result<()> {
        canonical::validate(&self.0)
    }

    pub fn get_aliases(&self, canonical_name: &str) -> Vec<&Dependency> {
        canonical::aliases_of(&self.0, canonical_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.0.iter()
    }
}

impl FromIterator<Dependency> for Dependencies {
    fn from_iter<I: IntoIterator<Item = Dependency>>(iter: I) -> Self {
        let mut dependencies = Dependencies::new();
        for dependency in iter {
            dependencies.add_or_update(dependency);
        }
        dependencies
    }
}

impl<'a> IntoIterator for &'a Dependencies {
    type IntoIter = std::slice::Iter<'a, Dependency>;
    type Item = &'a Dependency;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
