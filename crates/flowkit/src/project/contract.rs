// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::address::Address;
use serde_json::Value;

/// A contract ready to be deployed: its source and the account it goes to
#[derive(Clone, Debug, PartialEq)]
pub struct Contract {
    pub name: String,
    pub location: String,
    pub code: Vec<u8>,
    pub account_address: Address,
    pub account_name: String,
    pub args: Vec<Value>,
}

impl Contract {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        code: Vec<u8>,
        account_address: Address,
        account_name: impl Into<String>,
        args: Vec<Value>,
    ) -> Self {
        Contract {
            name: name.into(),
            location: location.into(),
            code,
            account_address,
            account_name: account_name.into(),
            args,
        }
    }
}
