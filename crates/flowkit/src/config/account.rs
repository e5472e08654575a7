// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    address::Address,
    error::{Error, Result},
};
use serde_json::Value;

/// A named account of the project.
///
/// Keys are managed elsewhere, the key entry is carried through as written.
#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub name: String,
    pub address: Address,
    pub key: Value,
}

impl Account {
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Account {
            name: name.into(),
            address,
            key: Value::Null,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Accounts(Vec<Account>);

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_name(&self, name: &str) -> Result<&Account> {
        self.0
            .iter()
            .find(|account| account.name == name)
            .ok_or_else(|| Error::not_found("account", name))
    }

    pub fn by_address(&self, address: &Address) -> Option<&Account> {
        self.0.iter().find(|account| &account.address == address)
    }

    pub fn add_or_update(&mut self, account: Account) {
        match self.0.iter_mut().find(|a| a.name == account.name) {
            Some(existing) => *existing = account,
            None => self.0.push(account),
        }
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        let index = self
            .0
            .iter()
            .position(|account| account.name == name)
            .ok_or_else(|| Error::not_found("account", name))?;
        self.0.remove(index);
        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|account| account.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.0.iter()
    }
}

impl FromIterator<Account> for Accounts {
    fn from_iter<I: IntoIterator<Item = Account>>(iter: I) -> Self {
        let mut accounts = Accounts::new();
        for account in iter {
            accounts.add_or_update(account);
        }
        accounts
    }
}

impl<'a> IntoIterator for &'a Accounts {
    type IntoIter = std::slice::Iter<'a, Account>;
    type Item = &'a Account;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name_and_address() {
        let address = Address::from_hex("f8d6e0586b0a20c7").unwrap();
        let accounts: Accounts = vec![
            Account::new("emulator-account", address),
            Account::new("alice", Address::from_hex("0x1").unwrap()),
        ]
        .into_iter()
        .collect();

        assert_eq!(accounts.by_name("alice").unwrap().address.to_string(), "0000000000000001");
        assert_eq!(accounts.by_address(&address).unwrap().name, "emulator-account");
        assert_eq!(
            accounts.by_name("bob").unwrap_err().to_string(),
            "account bob does not exist"
        );
    }
}
