// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    address::Address,
    config::{
        json, Account, Accounts, Config, ConfigStore, Contract, Contracts, Dependencies,
        Deployments, FileConfigStore, Networks, ReaderWriter, DEFAULT_CONFIG_PATH,
    },
    error::{Error, Result},
    path,
    project::{self, LocationAliases},
};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info};

/// A loaded project: its configuration plus the store it is saved to
#[derive(Clone, Debug)]
pub struct State {
    config: Config,
    store: Arc<dyn ConfigStore>,
    reader_writer: Arc<dyn ReaderWriter>,
}

impl State {
    /// Loads the configuration at `path`, rejecting self referencing canonicals
    pub fn load(path: impl Into<PathBuf>, reader_writer: Arc<dyn ReaderWriter>) -> Result<Self> {
        let store = Arc::new(FileConfigStore::new(path, reader_writer.clone()));
        Self::load_from(store, reader_writer)
    }

    pub fn load_from(
        store: Arc<dyn ConfigStore>,
        reader_writer: Arc<dyn ReaderWriter>,
    ) -> Result<Self> {
        let config = store.load()?;
        config
            .validate()
            .map_err(|err| Error::Config(format!("invalid project configuration: {}", err)))?;
        info!(
            "loaded project with {} contracts and {} dependencies",
            config.contracts.len(),
            config.dependencies.len()
        );
        Ok(State {
            config,
            store,
            reader_writer,
        })
    }

    /// A new project with the default configuration, saved to `flow.json`
    pub fn init(reader_writer: Arc<dyn ReaderWriter>) -> Self {
        let store = Arc::new(FileConfigStore::new(
            DEFAULT_CONFIG_PATH,
            reader_writer.clone(),
        ));
        Self::with_config(Config::default_config(), store, reader_writer)
    }

    pub fn with_config(
        config: Config,
        store: Arc<dyn ConfigStore>,
        reader_writer: Arc<dyn ReaderWriter>,
    ) -> Self {
        State {
            config,
            store,
            reader_writer,
        }
    }

    /// Saves to the store the project was loaded from
    pub fn save_default(&self) -> Result<()> {
        self.store.save(&self.config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = json::to_json(&self.config)?;
        self.reader_writer.write_file(path, &bytes)?;
        debug!("saved configuration to {}", path.display());
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn contracts(&self) -> &Contracts {
        &self.config.contracts
    }

    pub fn contracts_mut(&mut self) -> &mut Contracts {
        &mut self.config.contracts
    }

    pub fn dependencies(&self) -> &Dependencies {
        &self.config.dependencies
    }

    pub fn dependencies_mut(&mut self) -> &mut Dependencies {
        &mut self.config.dependencies
    }

    pub fn networks(&self) -> &Networks {
        &self.config.networks
    }

    pub fn networks_mut(&mut self) -> &mut Networks {
        &mut self.config.networks
    }

    pub fn accounts(&self) -> &Accounts {
        &self.config.accounts
    }

    pub fn accounts_mut(&mut self) -> &mut Accounts {
        &mut self.config.accounts
    }

    pub fn deployments(&self) -> &Deployments {
        &self.config.deployments
    }

    pub fn deployments_mut(&mut self) -> &mut Deployments {
        &mut self.config.deployments
    }

    pub fn reader_writer(&self) -> &Arc<dyn ReaderWriter> {
        &self.reader_writer
    }

    /// Directory contract locations are relative to
    pub fn base_dir(&self) -> PathBuf {
        self.store.base_dir()
    }

    /// Reads a file at a location relative to the project
    pub fn read_file(&self, location: &str) -> Result<Vec<u8>> {
        self.reader_writer.read_file(&self.base_dir().join(location))
    }

    /// Addresses of contracts already deployed on `network`, keyed by location and
    /// by name.
    ///
    /// Locations are joined with the project directory, the same way as
    /// [`State::deployment_contracts_by_network`]. Alias contracts are keyed by the
    /// location of their canonical contract when it exists.
    pub fn aliases_for_network(&self, network: &str) -> LocationAliases {
        let mut aliases = LocationAliases::new();
        for contract in &self.config.contracts {
            let Some(alias) = contract.aliases.by_network(network) else {
                continue;
            };
            let location = match contract.canonical.as_deref() {
                Some(canonical) if contract.is_alias() => self
                    .config
                    .contracts
                    .by_name(canonical)
                    .map(|canonical| canonical.location.as_str())
                    .unwrap_or(contract.location.as_str()),
                _ => contract.location.as_str(),
            };
            // the canonical contract's own address wins its location
            let location = self.project_location(location);
            if contract.is_alias() {
                aliases.entry(location).or_insert(alias.address);
            } else {
                aliases.insert(location, alias.address);
            }
            aliases.insert(contract.name.clone(), alias.address);
        }
        aliases
    }

    /// Alias contract name to canonical contract name
    pub fn canonical_contract_mapping(&self) -> HashMap<String, String> {
        self.config
            .contracts
            .iter()
            .filter_map(|contract| match &contract.canonical {
                Some(canonical) if contract.is_alias() => {
                    Some((contract.name.clone(), canonical.clone()))
                },
                _ => None,
            })
            .collect()
    }

    /// Contracts deployed on `network` with their code and target account, in
    /// deployment order
    pub fn deployment_contracts_by_network(&self, network: &str) -> Result<Vec<project::Contract>> {
        let mut contracts = Vec::new();

        for deployment in self.config.deployments.by_network(network) {
            let account = self.config.accounts.by_name(&deployment.account)?;

            for deployed in &deployment.contracts {
                let contract = self.config.contracts.by_name(&deployed.name)?;
                let location = self.source_location(contract)?;
                let location = self.project_location(location);
                let code = self.reader_writer.read_file(Path::new(&location))?;

                contracts.push(project::Contract::new(
                    contract.name.clone(),
                    location,
                    code,
                    account.address,
                    account.name.clone(),
                    deployed.args.clone(),
                ));
            }
        }

        Ok(contracts)
    }

    /// The account deploying `contract_name` on `network`
    pub fn account_by_contract_name(&self, contract_name: &str, network: &str) -> Result<&Account> {
        let account_name = self
            .config
            .deployments
            .by_network(network)
            .into_iter()
            .find(|deployment| {
                deployment
                    .contracts
                    .iter()
                    .any(|contract| contract.name == contract_name)
            })
            .map(|deployment| deployment.account.as_str())
            .ok_or_else(|| {
                Error::not_found(
                    "deployment of",
                    format!("{} for network {}", contract_name, network),
                )
            })?;
        self.config.accounts.by_name(account_name)
    }

    /// Address of a contract on `network`: its alias there, or the address of the
    /// account deploying it
    pub fn contract_address(&self, contract: &Contract, network: &str) -> Result<Address> {
        if let Some(alias) = contract.aliases.by_network(network) {
            return Ok(alias.address);
        }
        Ok(self.account_by_contract_name(&contract.name, network)?.address)
    }

    /// Location of the source of `contract`, the canonical contract's for aliases
    /// A location from the configuration, relative to the project directory
    fn project_location(&self, location: &str) -> String {
        path::clean(self.base_dir().join(location))
    }

    fn source_location<'a>(&'a self, contract: &'a Contract) -> Result<&'a str> {
        match contract.canonical.as_deref() {
            Some(canonical) if contract.is_alias() => self
                .config
                .contracts
                .by_name(canonical)
                .map(|canonical| canonical.location.as_str())
                .map_err(|_| {
                    Error::Config(format!(
                        "canonical contract {} not found for alias {}",
                        canonical, contract.name
                    ))
                }),
            _ => Ok(contract.location.as_str()),
        }
    }
}
