// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Length of a Flow account address in bytes
pub const ADDRESS_LENGTH: usize = 8;

/// A Flow account address.
///
/// Displayed as 16 lowercase hex characters without a `0x` prefix, which is also the
/// form used in configuration files.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address(bytes)
    }

    /// Parses a hex address with or without a `0x` prefix, left padding short inputs
    /// e.g. `0x1` is `0000000000000001`.
    pub fn from_hex(input: &str) -> Result<Self, Error> {
        let trimmed = input.trim();
        let hex_str = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if hex_str.is_empty() {
            return Err(Error::InvalidAddress(
                input.to_string(),
                "address is empty".to_string(),
            ));
        }
        if hex_str.len() > ADDRESS_LENGTH * 2 {
            return Err(Error::InvalidAddress(
                input.to_string(),
                format!("address is longer than {} bytes", ADDRESS_LENGTH),
            ));
        }

        let padded = format!("{:0>width$}", hex_str, width = ADDRESS_LENGTH * 2);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|err| Error::InvalidAddress(input.to_string(), err.to_string()))?;
        Ok(Address(bytes))
    }

    /// Hex with a `0x` prefix, as written in resolved import statements
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", self)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
