// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Access to deployed contracts on the networks of a project.

mod memory;
mod rest;

pub use memory::MemoryGateway;
pub use rest::{rest_url, RestGateway, RestGatewayBuilder};

use crate::{
    address::Address,
    config::Networks,
    error::{Error, Result},
};
use async_trait::async_trait;
use std::{collections::HashMap, fmt::Debug, sync::Arc};
use tracing::debug;

/// A contract deployed on an account
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemoteContract {
    pub name: String,
    pub code: Vec<u8>,
    pub address: Address,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RemoteAccount {
    pub address: Address,
    pub contracts: Vec<RemoteContract>,
}

/// Read access to the accounts of a single network
#[async_trait]
pub trait NetworkGateway: Debug + Send + Sync {
    /// Fetches an account with the code of all its contracts
    async fn get_account(&self, address: Address) -> Result<RemoteAccount>;
}

/// Gateways by network name
#[derive(Clone, Debug, Default)]
pub struct GatewayRegistry {
    gateways: HashMap<String, Arc<dyn NetworkGateway>>,
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A REST gateway for every configured network with a known REST endpoint
    pub fn from_networks(networks: &Networks) -> Result<Self> {
        let mut registry = GatewayRegistry::new();
        for network in networks {
            let Some(url) = rest_url(network) else {
                debug!("no REST endpoint for network {}, skipping", network.name);
                continue;
            };
            let gateway = RestGatewayBuilder::new(url).build()?;
            registry.insert(network.name.clone(), Arc::new(gateway));
        }
        Ok(registry)
    }

    pub fn insert(&mut self, network: impl Into<String>, gateway: Arc<dyn NetworkGateway>) {
        self.gateways.insert(network.into(), gateway);
    }

    pub fn with_gateway(
        mut self,
        network: impl Into<String>,
        gateway: Arc<dyn NetworkGateway>,
    ) -> Self {
        self.insert(network, gateway);
        self
    }

    pub fn get(&self, network: &str) -> Result<Arc<dyn NetworkGateway>> {
        self.gateways
            .get(network)
            .cloned()
            .ok_or_else(|| Error::not_found("gateway for network", network))
    }
}
