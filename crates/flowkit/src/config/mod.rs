// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The project configuration: its entity model, the `flow.json` document codec
//! and the store it is loaded from and saved to.

mod account;
mod alias;
pub(crate) mod canonical;
mod contract;
mod dependency;
mod deployment;
pub mod json;
mod network;
mod store;

pub use account::{Account, Accounts};
pub use alias::{Alias, Aliases};
pub use canonical::CanonicalEntity;
pub use contract::{dependency_location, Contract, Contracts, DEPENDENCY_IMPORTS_DIR};
pub use dependency::{Dependencies, Dependency, RemoteSource};
pub use deployment::{ContractDeployment, Deployment, Deployments};
pub use network::{Network, Networks, EMULATOR, MAINNET, TESTNET};
pub use store::{ConfigStore, FileConfigStore, OsReaderWriter, ReaderWriter};

/// Default location of the project configuration, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "flow.json";

/// A whole project configuration document
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub contracts: Contracts,
    pub dependencies: Dependencies,
    pub networks: Networks,
    pub accounts: Accounts,
    pub deployments: Deployments,
}

impl Config {
    /// Configuration of a freshly initialized project
    pub fn default_config() -> Self {
        Config {
            networks: Networks::defaults(),
            ..Default::default()
        }
    }

    /// Checks cross entity invariants
    pub fn validate(&self) -> crate::Result<()> {
        self.contracts.validate_canonical()?;
        self.dependencies.validate_canonical()
    }
}
