// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Installing contracts from the network as project dependencies.

mod installer;

pub use installer::DependencyInstaller;

/// Default bound on account fetches in flight at once
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

#[derive(Clone, Debug)]
pub struct InstallerOptions {
    /// Account fetches allowed in flight at once, at least one
    pub max_concurrent_fetches: usize,
    /// Network transitive imports are fetched from. Defaults to the network of the
    /// contract importing them.
    pub transitive_network: Option<String>,
}

impl Default for InstallerOptions {
    fn default() -> Self {
        InstallerOptions {
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            transitive_network: None,
        }
    }
}
