// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Canonical aliasing shared by contracts and dependencies.
//!
//! An entity whose `canonical` names another entity is an alias of it: it shares
//! the canonical entity's source but is deployed under its own name. Several
//! aliases may point at the same canonical entity.

use crate::error::{Error, Result};

pub trait CanonicalEntity {
    /// Kind used in error messages e.g. `contract`
    const KIND: &'static str;

    fn name(&self) -> &str;

    fn canonical(&self) -> Option<&str>;

    fn is_alias(&self) -> bool {
        self.canonical().is_some_and(|canonical| !canonical.is_empty())
    }

    /// The canonical name if this is an alias, otherwise the entity's own name
    fn canonical_name(&self) -> &str {
        match self.canonical() {
            Some(canonical) if !canonical.is_empty() => canonical,
            _ => self.name(),
        }
    }
}

pub(crate) fn validate<T: CanonicalEntity>(entities: &[T]) -> Result<()> {
    for entity in entities {
        if entity.is_alias() && entity.canonical_name() == entity.name() {
            return Err(Error::Config(format!(
                "{} {} cannot have itself as canonical",
                T::KIND,
                entity.name()
            )));
        }
    }
    Ok(())
}

pub(crate) fn aliases_of<'a, T: CanonicalEntity>(
    entities: &'a [T],
    canonical_name: &str,
) -> Vec<&'a T> {
    entities
        .iter()
        .filter(|entity| entity.is_alias() && entity.canonical_name() == canonical_name)
        .collect()
}
