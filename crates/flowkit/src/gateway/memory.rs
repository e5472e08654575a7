// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    address::Address,
    error::{Error, Result},
    gateway::{NetworkGateway, RemoteAccount, RemoteContract},
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

/// A gateway serving a fixed set of accounts, used for local development and tests
#[derive(Debug, Default)]
pub struct MemoryGateway {
    accounts: HashMap<Address, RemoteAccount>,
    requests: AtomicUsize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploys `code` under `name` on the account at `address`
    pub fn with_contract(mut self, address: Address, name: &str, code: &str) -> Self {
        let account = self.accounts.entry(address).or_insert_with(|| RemoteAccount {
            address,
            contracts: Vec::new(),
        });
        account.contracts.retain(|contract| contract.name != name);
        account.contracts.push(RemoteContract {
            name: name.to_string(),
            code: code.as_bytes().to_vec(),
            address,
        });
        self
    }

    /// Number of accounts fetched so far
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NetworkGateway for MemoryGateway {
    async fn get_account(&self, address: Address) -> Result<RemoteAccount> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.accounts
            .get(&address)
            .cloned()
            .ok_or_else(|| Error::Fetch(format!("account {} not found", address.to_hex_literal())))
    }
}
