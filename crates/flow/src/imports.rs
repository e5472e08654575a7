// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::common::types::{CliCommand, CliError, CliResult, CliTypedResult, ProjectOptions};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use flowkit::{
    config::EMULATOR,
    project::{ImportReplacer, Program},
};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Tool for working with the imports of contracts, scripts and transactions
#[derive(Debug, Subcommand)]
pub enum ImportTool {
    Resolve(ResolveImports),
}

impl ImportTool {
    pub async fn execute(self) -> CliResult {
        match self {
            ImportTool::Resolve(tool) => tool.execute_serialized().await,
        }
    }
}

/// Rewrite the imports of a file into address imports for a network
///
/// Imports are resolved against the contracts deployed on the network and the
/// aliases of the project's contracts. Nothing is written, the resolved code is
/// printed.
#[derive(Debug, Parser)]
pub struct ResolveImports {
    /// File to resolve the imports of
    pub(crate) file: PathBuf,

    /// Network to resolve addresses on
    #[clap(long, default_value = EMULATOR)]
    pub(crate) network: String,

    #[clap(flatten)]
    pub(crate) project_options: ProjectOptions,
}

#[async_trait]
impl CliCommand<String> for ResolveImports {
    fn command_name(&self) -> &'static str {
        "ResolveImports"
    }

    async fn execute(self) -> CliTypedResult<String> {
        let state = self.project_options.load_state()?;
        let code = fs::read(&self.file).map_err(|err| {
            CliError::UnableToReadFile(self.file.display().to_string(), err.to_string())
        })?;
        let mut program = Program::parse(&code, Vec::new(), self.file.to_string_lossy())?;

        let contracts = state.deployment_contracts_by_network(&self.network)?;
        let aliases = state.aliases_for_network(&self.network);
        debug!(
            "resolving {} imports against {} deployed contracts and {} aliases",
            program.import_statements().len(),
            contracts.len(),
            aliases.len()
        );
        ImportReplacer::new(&contracts, &aliases)
            .with_canonical_mapping(state.canonical_contract_mapping())
            .replace(&mut program)?;

        Ok(program.code().to_string())
    }
}
