// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::common::utils::{to_common_result, to_common_success_result};
use async_trait::async_trait;
use clap::Parser;
use flowkit::{
    config::{OsReaderWriter, DEFAULT_CONFIG_PATH},
    dependency::{InstallerOptions, DEFAULT_MAX_CONCURRENT_FETCHES},
    State,
};
use serde::Serialize;
use std::{path::PathBuf, sync::Arc, time::Instant};
use thiserror::Error;

/// A common result to be returned to users
pub type CliResult = Result<String, String>;

/// A common result to remove need for typing `Result<T, CliError>`
pub type CliTypedResult<T> = Result<T, CliError>;

/// CLI Errors for reporting through telemetry and outputs
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    CommandArgumentError(String),
    #[error("Project error: {0}")]
    ProjectError(#[from] flowkit::Error),
    #[error("Unable to read file '{0}', error: {1}")]
    UnableToReadFile(String, String),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl CliError {
    pub fn to_str(&self) -> &'static str {
        match self {
            CliError::CommandArgumentError(_) => "CommandArgumentError",
            CliError::ProjectError(_) => "ProjectError",
            CliError::UnableToReadFile(_, _) => "UnableToReadFile",
            CliError::UnexpectedError(_) => "UnexpectedError",
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::UnexpectedError(e.to_string())
    }
}

/// Options for locating the project
#[derive(Debug, Parser)]
pub struct ProjectOptions {
    /// Path to the project configuration
    #[clap(long, short = 'f', default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: PathBuf,
}

impl ProjectOptions {
    /// Loads and validates the project configuration
    pub fn load_state(&self) -> CliTypedResult<State> {
        Ok(State::load(
            self.config_path.clone(),
            Arc::new(OsReaderWriter),
        )?)
    }
}

/// Options for fetching contracts from the network
#[derive(Debug, Parser)]
pub struct FetchOptions {
    /// Maximum number of accounts fetched at the same time
    #[clap(long, default_value_t = DEFAULT_MAX_CONCURRENT_FETCHES)]
    pub max_concurrent_fetches: usize,

    /// Network imports of fetched contracts are installed from
    ///
    /// Defaults to the network of the contract importing them
    #[clap(long)]
    pub transitive_network: Option<String>,
}

impl FetchOptions {
    pub fn installer_options(&self) -> CliTypedResult<InstallerOptions> {
        if self.max_concurrent_fetches == 0 {
            return Err(CliError::CommandArgumentError(
                "--max-concurrent-fetches must be at least 1".to_string(),
            ));
        }
        Ok(InstallerOptions {
            max_concurrent_fetches: self.max_concurrent_fetches,
            transitive_network: self.transitive_network.clone(),
        })
    }
}

/// A common trait for all CLI commands to have consistent outputs
#[async_trait]
pub trait CliCommand<T: Serialize + Send>: Sized + Send {
    /// Returns a name for logging purposes
    fn command_name(&self) -> &'static str;

    /// Executes the command, returning a command specific type
    async fn execute(self) -> CliTypedResult<T>;

    /// Executes the command, and serializes it to the common JSON output type
    async fn execute_serialized(self) -> CliResult {
        let command_name = self.command_name();
        let start_time = Instant::now();
        to_common_result(command_name, start_time, self.execute().await)
    }

    /// Executes the command, and throws away Ok(result) for the string Success
    async fn execute_serialized_success(self) -> CliResult {
        let command_name = self.command_name();
        let start_time = Instant::now();
        to_common_success_result(command_name, start_time, self.execute().await)
    }
}
