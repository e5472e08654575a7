// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Lexical path helpers for contract locations.
//!
//! Locations in configuration and import statements are slash separated strings
//! that are compared after normalization. Nothing here touches the disk.

use path_clean::PathClean;
use std::path::Path;

/// Extension of contract source files
pub const SOURCE_FILE_EXTENSION: &str = ".cdc";

/// Normalizes a path lexically, written with `/` separators
pub fn clean(path: impl AsRef<Path>) -> String {
    path.as_ref().clean().to_string_lossy().replace('\\', "/")
}

/// Resolves `relative` against the directory of the file at `importer`
pub fn absolute_path(importer: &str, relative: &str) -> String {
    let dir = Path::new(importer).parent().unwrap_or_else(|| Path::new(""));
    clean(dir.join(relative))
}

/// Short contract name for an import: the file stem for source file paths, the
/// import itself otherwise.
pub fn import_name(import: &str) -> &str {
    if !import.ends_with(SOURCE_FILE_EXTENSION) {
        return import;
    }
    Path::new(import)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(import)
}
