// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::common::types::{CliCommand, CliError, CliResult, CliTypedResult, ProjectOptions};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use serde::Serialize;

/// Tool for inspecting and editing the project configuration
#[derive(Debug, Subcommand)]
pub enum ConfigTool {
    ShowContracts(ShowContracts),
    ShowDeployments(ShowDeployments),
    RemoveContract(RemoveContract),
    Validate(ValidateConfig),
}

impl ConfigTool {
    pub async fn execute(self) -> CliResult {
        match self {
            ConfigTool::ShowContracts(tool) => tool.execute_serialized().await,
            ConfigTool::ShowDeployments(tool) => tool.execute_serialized().await,
            ConfigTool::RemoveContract(tool) => tool.execute_serialized_success().await,
            ConfigTool::Validate(tool) => tool.execute_serialized().await,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContractSummary {
    pub name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    /// Address the contract is aliased to on the selected network
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub dependency: bool,
}

/// Show the contracts of the project, including installed dependencies
#[derive(Debug, Parser)]
pub struct ShowContracts {
    /// Network to show contract aliases for
    #[clap(long)]
    pub(crate) network: Option<String>,

    #[clap(flatten)]
    pub(crate) project_options: ProjectOptions,
}

#[async_trait]
impl CliCommand<Vec<ContractSummary>> for ShowContracts {
    fn command_name(&self) -> &'static str {
        "ShowContracts"
    }

    async fn execute(self) -> CliTypedResult<Vec<ContractSummary>> {
        let state = self.project_options.load_state()?;
        Ok(state
            .contracts()
            .iter()
            .map(|contract| ContractSummary {
                name: contract.name.clone(),
                location: contract.location.clone(),
                canonical: contract.canonical.clone(),
                address: self
                    .network
                    .as_deref()
                    .and_then(|network| contract.aliases.by_network(network))
                    .map(|alias| alias.address.to_hex_literal()),
                dependency: contract.is_dependency,
            })
            .collect())
    }
}

#[derive(Debug, Serialize)]
pub struct DeploymentSummary {
    pub name: String,
    pub location: String,
    pub account: String,
    pub address: String,
}

/// Show the contracts deployed on a network, in deployment order
#[derive(Debug, Parser)]
pub struct ShowDeployments {
    /// Network of the deployments
    #[clap(long)]
    pub(crate) network: String,

    #[clap(flatten)]
    pub(crate) project_options: ProjectOptions,
}

#[async_trait]
impl CliCommand<Vec<DeploymentSummary>> for ShowDeployments {
    fn command_name(&self) -> &'static str {
        "ShowDeployments"
    }

    async fn execute(self) -> CliTypedResult<Vec<DeploymentSummary>> {
        let state = self.project_options.load_state()?;
        let contracts = state.deployment_contracts_by_network(&self.network)?;
        Ok(contracts
            .into_iter()
            .map(|contract| DeploymentSummary {
                name: contract.name,
                location: contract.location,
                account: contract.account_name,
                address: contract.account_address.to_hex_literal(),
            })
            .collect())
    }
}

/// Remove a contract from the project
///
/// Installed dependencies are not contracts of the project and are rejected.
#[derive(Debug, Parser)]
pub struct RemoveContract {
    /// Name of the contract
    pub(crate) name: String,

    #[clap(flatten)]
    pub(crate) project_options: ProjectOptions,
}

#[async_trait]
impl CliCommand<()> for RemoveContract {
    fn command_name(&self) -> &'static str {
        "RemoveContract"
    }

    async fn execute(self) -> CliTypedResult<()> {
        let mut state = self.project_options.load_state()?;
        if state.contracts().by_name(&self.name)?.is_dependency {
            return Err(CliError::CommandArgumentError(format!(
                "{} is an installed dependency, remove it from the dependencies instead",
                self.name
            )));
        }
        state.contracts_mut().remove(&self.name)?;
        state.save_default()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub contracts: usize,
    pub dependencies: usize,
    pub networks: usize,
    pub accounts: usize,
    pub deployments: usize,
}

/// Check that the project configuration loads and is consistent
#[derive(Debug, Parser)]
pub struct ValidateConfig {
    #[clap(flatten)]
    pub(crate) project_options: ProjectOptions,
}

#[async_trait]
impl CliCommand<ConfigSummary> for ValidateConfig {
    fn command_name(&self) -> &'static str {
        "ValidateConfig"
    }

    async fn execute(self) -> CliTypedResult<ConfigSummary> {
        let state = self.project_options.load_state()?;
        Ok(ConfigSummary {
            contracts: state.contracts().len(),
            dependencies: state.dependencies().len(),
            networks: state.networks().len(),
            accounts: state.accounts().len(),
            deployments: state.deployments().len(),
        })
    }
}
