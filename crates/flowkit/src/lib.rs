// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Flowkit manages a Flow project's configuration (accounts, networks, contracts,
//! deployments, dependencies) and resolves contract imports into addresses for a
//! target network.
//!
//! The main entry points are:
//! - [`State`], the loaded project configuration and its persistence
//! - [`project::Program`] and [`project::ImportReplacer`], which rewrite imports
//! - [`dependency::DependencyInstaller`], which fetches remote contracts and records
//!   them as dependencies

#![forbid(unsafe_code)]

pub mod address;
pub mod config;
pub mod core_contracts;
pub mod dependency;
pub mod error;
pub mod gateway;
pub mod path;
pub mod project;
pub mod state;

pub use address::Address;
pub use error::{Error, Result};
pub use state::State;
