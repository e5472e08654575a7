// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    address::Address,
    error::{Error, Result},
    path,
    project::{Contract, LocationAliases, Program},
};
use std::collections::HashMap;
use tracing::debug;

/// Resolves the imports of programs against a set of contracts and aliases.
///
/// An import is looked up by its location relative to the importing program first,
/// then by name. Names in the canonical mapping are imported as local aliases of
/// their canonical contract.
#[derive(Clone, Debug, Default)]
pub struct ImportReplacer {
    locations: HashMap<String, Address>,
    /// Alias contract name to canonical contract name
    canonical_mapping: HashMap<String, String>,
}

impl ImportReplacer {
    pub fn new(contracts: &[Contract], aliases: &LocationAliases) -> Self {
        let mut locations = HashMap::new();
        for contract in contracts {
            locations.insert(path::clean(&contract.location), contract.account_address);
            locations.insert(contract.name.clone(), contract.account_address);
        }
        for (location, address) in aliases {
            locations.insert(path::clean(location), *address);
        }

        ImportReplacer {
            locations,
            canonical_mapping: HashMap::new(),
        }
    }

    pub fn with_canonical_mapping(mut self, canonical_mapping: HashMap<String, String>) -> Self {
        self.canonical_mapping = canonical_mapping;
        self
    }

    /// Rewrites every unresolved import of `program` into an address import.
    ///
    /// All imports are resolved before any is rewritten, so a failure leaves the
    /// program untouched.
    pub fn replace(&self, program: &mut Program) -> Result<()> {
        let resolved = program
            .import_statements()
            .into_iter()
            .map(|import| -> Result<(String, Address, String)> {
                let address = self.resolve(program.location(), import)?;
                Ok((import.to_string(), address, self.canonical_name(import)))
            })
            .collect::<Result<Vec<_>>>()?;

        for (import, address, canonical) in resolved {
            debug!(
                "resolved import {} in {} to {}",
                import,
                program.location(),
                address.to_hex_literal()
            );
            program.replace_import(&import, address, Some(&canonical))?;
        }
        Ok(())
    }

    fn resolve(&self, importer: &str, import: &str) -> Result<Address> {
        let absolute = path::absolute_path(importer, import);
        self.locations
            .get(&absolute)
            .or_else(|| self.locations.get(import))
            .copied()
            .ok_or_else(|| Error::UnresolvedImport(import.to_string()))
    }

    /// Canonical contract name for an import, the import's own name unless it is an
    /// alias
    fn canonical_name(&self, import: &str) -> String {
        let name = path::import_name(import);
        self.canonical_mapping
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}
