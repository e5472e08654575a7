// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, Result};
use serde_json::Value;

/// A contract deployed by an account, with its initializer arguments
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContractDeployment {
    pub name: String,
    /// JSON-Cadence encoded values, passed through untouched
    pub args: Vec<Value>,
}

impl ContractDeployment {
    pub fn new(name: impl Into<String>) -> Self {
        ContractDeployment {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

/// Contracts an account deploys on a network, in deployment order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Deployment {
    pub network: String,
    pub account: String,
    pub contracts: Vec<ContractDeployment>,
}

impl Deployment {
    pub fn new(network: impl Into<String>, account: impl Into<String>) -> Self {
        Deployment {
            network: network.into(),
            account: account.into(),
            contracts: Vec::new(),
        }
    }

    pub fn add_contract(&mut self, contract: ContractDeployment) {
        match self.contracts.iter_mut().find(|c| c.name == contract.name) {
            Some(existing) => *existing = contract,
            None => self.contracts.push(contract),
        }
    }

    pub fn remove_contract(&mut self, name: &str) {
        self.contracts.retain(|contract| contract.name != name);
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Deployments(Vec<Deployment>);

impl Deployments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_network(&self, network: &str) -> Vec<&Deployment> {
        self.0
            .iter()
            .filter(|deployment| deployment.network == network)
            .collect()
    }

    pub fn by_account_and_network(&self, account: &str, network: &str) -> Option<&Deployment> {
        self.0
            .iter()
            .find(|deployment| deployment.account == account && deployment.network == network)
    }

    pub fn by_account_and_network_mut(
        &mut self,
        account: &str,
        network: &str,
    ) -> Option<&mut Deployment> {
        self.0
            .iter_mut()
            .find(|deployment| deployment.account == account && deployment.network == network)
    }

    /// Keyed by account and network
    pub fn add_or_update(&mut self, deployment: Deployment) {
        match self.by_account_and_network_mut(&deployment.account, &deployment.network) {
            Some(existing) => *existing = deployment,
            None => self.0.push(deployment),
        }
    }

    pub fn remove(&mut self, account: &str, network: &str) -> Result<()> {
        let index = self
            .0
            .iter()
            .position(|deployment| deployment.account == account && deployment.network == network)
            .ok_or_else(|| {
                Error::not_found("deployment", format!("for {} on {}", account, network))
            })?;
        self.0.remove(index);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Deployment> {
        self.0.iter()
    }
}

impl FromIterator<Deployment> for Deployments {
    fn from_iter<I: IntoIterator<Item = Deployment>>(iter: I) -> Self {
        let mut deployments = Deployments::new();
        for deployment in iter {
            deployments.add_or_update(deployment);
        }
        deployments
    }
}

impl<'a> IntoIterator for &'a Deployments {
    type IntoIter = std::slice::Iter<'a, Deployment>;
    type Item = &'a Deployment;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
