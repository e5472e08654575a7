// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

mod contract;
mod imports;
mod parser;
mod program;

pub use contract::Contract;
pub use imports::ImportReplacer;
pub use parser::{
    CompositeKind, Declaration, ImportDeclaration, ImportLocation, ImportedIdentifier,
};
pub use program::Program;

use crate::address::Address;
use std::collections::HashMap;

/// Addresses keyed by contract location or contract name, for one network
pub type LocationAliases = HashMap<String, Address>;
