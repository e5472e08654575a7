// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while loading, resolving or installing a project.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration is malformed or self-referential.
    #[error("{0}")]
    Config(String),
    /// A lookup by name (or account, network...) found nothing.
    #[error("{kind} {name} does not exist")]
    NotFound { kind: &'static str, name: String },
    /// Source code does not parse, or does not declare exactly one contract.
    #[error("failed to parse {location}: {message}")]
    Parse { location: String, message: String },
    /// An import could not be matched against any known location or identifier.
    #[error("import {0} could not be resolved from provided contracts")]
    UnresolvedImport(String),
    /// A remote account or contract is unavailable.
    #[error("{0}")]
    Fetch(String),
    #[error("invalid address {0}: {1}")]
    InvalidAddress(String, String),
    #[error("invalid remote source {0}: {1}")]
    InvalidRemoteSource(String, String),
    #[error("IO error for {path}: {source}")]
    IO {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn parse(location: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::IO {
            path: path.into(),
            source,
        }
    }
}
