// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::address::Address;

/// An address a contract is already deployed at on a given network
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alias {
    pub network: String,
    pub address: Address,
}

/// Per network addresses of a contract, in insertion order.
///
/// Holds at most one entry per network, the first one added wins.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Aliases(Vec<Alias>);

impl Aliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_network(&self, network: &str) -> Option<&Alias> {
        self.0.iter().find(|alias| alias.network == network)
    }

    /// Adds an alias, ignoring it if the network already has one
    pub fn add(&mut self, network: impl Into<String>, address: Address) {
        let network = network.into();
        if self.by_network(&network).is_none() {
            self.0.push(Alias { network, address });
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alias> {
        self.0.iter()
    }
}

impl FromIterator<Alias> for Aliases {
    fn from_iter<I: IntoIterator<Item = Alias>>(iter: I) -> Self {
        let mut aliases = Aliases::new();
        for alias in iter {
            aliases.add(alias.network, alias.address);
        }
        aliases
    }
}

impl<'a> IntoIterator for &'a Aliases {
    type IntoIter = std::slice::Iter<'a, Alias>;
    type Item = &'a Alias;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
