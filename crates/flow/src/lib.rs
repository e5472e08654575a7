// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod common;
pub mod config;
pub mod dependencies;
pub mod imports;

use crate::common::types::CliResult;
use clap::Parser;

/// Command Line Interface (CLI) for Flow projects
#[derive(Debug, Parser)]
#[clap(name = "flow", author, version, propagate_version = true)]
pub enum Tool {
    /// Inspect and edit the project configuration
    #[clap(subcommand)]
    Config(config::ConfigTool),
    /// Install contracts from the network as dependencies
    #[clap(subcommand)]
    Dependencies(dependencies::DependencyTool),
    /// Resolve contract imports to addresses
    #[clap(subcommand)]
    Imports(imports::ImportTool),
}

impl Tool {
    pub async fn execute(self) -> CliResult {
        use Tool::*;
        match self {
            Config(tool) => tool.execute().await,
            Dependencies(tool) => tool.execute().await,
            Imports(tool) => tool.execute().await,
        }
    }
}
