// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::common::types::{
    CliCommand, CliResult, CliTypedResult, FetchOptions, ProjectOptions,
};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use flowkit::{
    config::{Dependency, RemoteSource},
    dependency::DependencyInstaller,
    gateway::GatewayRegistry,
    State,
};
use serde::Serialize;

/// Tool for installing contracts from the network
///
/// Installed contracts are saved under `imports/` and recorded in the project's
/// dependencies, together with everything they import.
#[derive(Debug, Subcommand)]
pub enum DependencyTool {
    Install(InstallDependencies),
    Add(AddDependency),
    List(ListDependencies),
}

impl DependencyTool {
    pub async fn execute(self) -> CliResult {
        match self {
            DependencyTool::Install(tool) => tool.execute_serialized().await,
            DependencyTool::Add(tool) => tool.execute_serialized().await,
            DependencyTool::List(tool) => tool.execute_serialized().await,
        }
    }
}

/// A dependency as shown to users
#[derive(Debug, Serialize)]
pub struct DependencySummary {
    pub name: String,
    pub source: String,
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
}

impl From<&Dependency> for DependencySummary {
    fn from(dependency: &Dependency) -> Self {
        DependencySummary {
            name: dependency.name.clone(),
            source: dependency.source.to_string(),
            hash: dependency.hash.clone(),
            canonical: dependency.canonical.clone(),
        }
    }
}

fn summarize(state: &State) -> Vec<DependencySummary> {
    state.dependencies().iter().map(DependencySummary::from).collect()
}

fn installer(state: State, fetch_options: &FetchOptions) -> CliTypedResult<DependencyInstaller> {
    let gateways = GatewayRegistry::from_networks(state.networks())?;
    Ok(DependencyInstaller::new(
        gateways,
        state,
        fetch_options.installer_options()?,
    ))
}

/// Install every dependency of the project
#[derive(Debug, Parser)]
pub struct InstallDependencies {
    #[clap(flatten)]
    pub(crate) project_options: ProjectOptions,
    #[clap(flatten)]
    pub(crate) fetch_options: FetchOptions,
}

#[async_trait]
impl CliCommand<Vec<DependencySummary>> for InstallDependencies {
    fn command_name(&self) -> &'static str {
        "InstallDependencies"
    }

    async fn execute(self) -> CliTypedResult<Vec<DependencySummary>> {
        let state = self.project_options.load_state()?;
        let installer = installer(state, &self.fetch_options)?;
        installer.install().await?;
        let state = installer.state().await;
        Ok(summarize(&state))
    }
}

/// Add a contract deployed on the network as a dependency
#[derive(Debug, Parser)]
pub struct AddDependency {
    /// Contract to install, e.g. `testnet://877931736ee77cff.HelloWorld`
    pub(crate) source: String,

    /// Name of the dependency, defaults to the contract name
    #[clap(long)]
    pub(crate) name: Option<String>,

    #[clap(flatten)]
    pub(crate) project_options: ProjectOptions,
    #[clap(flatten)]
    pub(crate) fetch_options: FetchOptions,
}

#[async_trait]
impl CliCommand<Vec<DependencySummary>> for AddDependency {
    fn command_name(&self) -> &'static str {
        "AddDependency"
    }

    async fn execute(self) -> CliTypedResult<Vec<DependencySummary>> {
        let source: RemoteSource = self.source.parse()?;
        let state = self.project_options.load_state()?;
        let installer = installer(state, &self.fetch_options)?;
        installer.add(source, self.name).await?;
        let state = installer.state().await;
        Ok(summarize(&state))
    }
}

/// List the dependencies of the project
#[derive(Debug, Parser)]
pub struct ListDependencies {
    #[clap(flatten)]
    pub(crate) project_options: ProjectOptions,
}

#[async_trait]
impl CliCommand<Vec<DependencySummary>> for ListDependencies {
    fn command_name(&self) -> &'static str {
        "ListDependencies"
    }

    async fn execute(self) -> CliTypedResult<Vec<DependencySummary>> {
        let state = self.project_options.load_state()?;
        Ok(summarize(&state))
    }
}
