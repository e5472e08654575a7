// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! `flow.json` codec.
//!
//! Contracts, networks and deployment entries accept a simple string form and an
//! advanced object form, and are written back in the simplest form that keeps all
//! of their fields. Dependencies are always written in the advanced form.

use crate::{
    address::Address,
    config::{
        Account, Accounts, Alias, Aliases, Config, Contract, ContractDeployment, Contracts,
        Dependencies, Dependency, Deployment, Deployments, Network, Networks, RemoteSource,
    },
    error::Result,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

type JsonAliases = IndexMap<String, Address>;

#[derive(Debug, Default, Deserialize, Serialize)]
struct JsonConfig {
    #[serde(default)]
    contracts: IndexMap<String, JsonContract>,
    #[serde(default)]
    dependencies: IndexMap<String, JsonDependency>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    networks: IndexMap<String, JsonNetwork>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    accounts: IndexMap<String, JsonAccount>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    deployments: IndexMap<String, IndexMap<String, Vec<JsonContractDeployment>>>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
enum JsonContract {
    Simple(String),
    Advanced(AdvancedContract),
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
struct AdvancedContract {
    source: String,
    #[serde(default)]
    aliases: JsonAliases,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    canonical: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
enum JsonDependency {
    Simple(String),
    Advanced(AdvancedDependency),
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
struct AdvancedDependency {
    source: String,
    #[serde(default)]
    hash: String,
    #[serde(default)]
    aliases: JsonAliases,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    canonical: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
enum JsonNetwork {
    Simple(String),
    Advanced { host: String, key: String },
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
struct JsonAccount {
    address: Address,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    key: Value,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
enum JsonContractDeployment {
    Simple(String),
    Advanced {
        name: String,
        #[serde(default)]
        args: Vec<Value>,
    },
}

fn aliases_from_json(aliases: JsonAliases) -> Aliases {
    aliases
        .into_iter()
        .map(|(network, address)| Alias { network, address })
        .collect()
}

fn aliases_to_json(aliases: &Aliases) -> JsonAliases {
    aliases
        .iter()
        .map(|alias| (alias.network.clone(), alias.address))
        .collect()
}

/// Parses a configuration document.
///
/// Every dependency without a contract of the same name is also recorded as a
/// dependency contract, so it resolves like any other contract.
pub fn from_json(bytes: &[u8]) -> Result<Config> {
    let json: JsonConfig = serde_json::from_slice(bytes)?;

    let mut contracts: Contracts = json
        .contracts
        .into_iter()
        .map(|(name, contract)| match contract {
            JsonContract::Simple(location) => Contract::new(name, location),
            JsonContract::Advanced(advanced) => Contract {
                name,
                location: advanced.source,
                aliases: aliases_from_json(advanced.aliases),
                canonical: advanced.canonical.filter(|c| !c.is_empty()),
                is_dependency: false,
            },
        })
        .collect();

    let dependencies = json
        .dependencies
        .into_iter()
        .map(|(name, dependency)| -> Result<Dependency> {
            Ok(match dependency {
                JsonDependency::Simple(source) => {
                    Dependency::new(name, source.parse::<RemoteSource>()?)
                },
                JsonDependency::Advanced(advanced) => Dependency {
                    name,
                    source: advanced.source.parse()?,
                    hash: advanced.hash,
                    aliases: aliases_from_json(advanced.aliases),
                    canonical: advanced.canonical.filter(|c| !c.is_empty()),
                },
            })
        })
        .collect::<Result<Dependencies>>()?;

    for dependency in &dependencies {
        if contracts.by_name(&dependency.name).is_err() {
            let network = dependency.source.network_name.clone();
            contracts.add_dependency_as_contract(
                dependency,
                &network,
                dependency.aliases.clone(),
            );
        }
    }

    let networks: Networks = json
        .networks
        .into_iter()
        .map(|(name, network)| match network {
            JsonNetwork::Simple(host) => Network::new(name, host),
            JsonNetwork::Advanced { host, key } => Network {
                name,
                host,
                key: Some(key),
            },
        })
        .collect();

    let accounts: Accounts = json
        .accounts
        .into_iter()
        .map(|(name, account)| Account {
            name,
            address: account.address,
            key: account.key,
        })
        .collect();

    let mut deployments = Deployments::new();
    for (network, by_account) in json.deployments {
        for (account, entries) in by_account {
            let mut deployment = Deployment::new(network.clone(), account);
            for entry in entries {
                deployment.add_contract(match entry {
                    JsonContractDeployment::Simple(name) => ContractDeployment::new(name),
                    JsonContractDeployment::Advanced { name, args } => {
                        ContractDeployment { name, args }
                    },
                });
            }
            deployments.add_or_update(deployment);
        }
    }

    debug!(
        contracts = contracts.len(),
        dependencies = dependencies.len(),
        "parsed configuration"
    );

    Ok(Config {
        contracts,
        dependencies,
        networks,
        accounts,
        deployments,
    })
}

/// Serializes a configuration document, leaving out contracts that only mirror a
/// dependency.
pub fn to_json(config: &Config) -> Result<Vec<u8>> {
    let json = JsonConfig {
        contracts: config
            .contracts
            .iter()
            .filter(|contract| !contract.is_dependency)
            .map(|contract| (contract.name.clone(), contract_to_json(contract)))
            .collect(),
        dependencies: config
            .dependencies
            .iter()
            .map(|dependency| {
                let json = JsonDependency::Advanced(AdvancedDependency {
                    source: dependency.source.to_string(),
                    hash: dependency.hash.clone(),
                    aliases: aliases_to_json(&dependency.aliases),
                    canonical: dependency.canonical.clone(),
                });
                (dependency.name.clone(), json)
            })
            .collect(),
        networks: config
            .networks
            .iter()
            .map(|network| {
                let json = match &network.key {
                    Some(key) => JsonNetwork::Advanced {
                        host: network.host.clone(),
                        key: key.clone(),
                    },
                    None => JsonNetwork::Simple(network.host.clone()),
                };
                (network.name.clone(), json)
            })
            .collect(),
        accounts: config
            .accounts
            .iter()
            .map(|account| {
                let json = JsonAccount {
                    address: account.address,
                    key: account.key.clone(),
                };
                (account.name.clone(), json)
            })
            .collect(),
        deployments: deployments_to_json(&config.deployments),
    };

    let mut bytes = serde_json::to_vec_pretty(&json)?;
    bytes.push(b'\n');
    Ok(bytes)
}

fn contract_to_json(contract: &Contract) -> JsonContract {
    if contract.aliases.is_empty() && !contract.is_alias() {
        JsonContract::Simple(contract.location.clone())
    } else {
        JsonContract::Advanced(AdvancedContract {
            source: contract.location.clone(),
            aliases: aliases_to_json(&contract.aliases),
            canonical: contract.canonical.clone(),
        })
    }
}

fn deployments_to_json(
    deployments: &Deployments,
) -> IndexMap<String, IndexMap<String, Vec<JsonContractDeployment>>> {
    let mut json: IndexMap<String, IndexMap<String, Vec<JsonContractDeployment>>> =
        IndexMap::new();
    for deployment in deployments {
        let entries = deployment
            .contracts
            .iter()
            .map(|contract| {
                if contract.args.is_empty() {
                    JsonContractDeployment::Simple(contract.name.clone())
                } else {
                    JsonContractDeployment::Advanced {
                        name: contract.name.clone(),
                        args: contract.args.clone(),
                    }
                }
            })
            .collect();
        json.entry(deployment.network.clone())
            .or_default()
            .insert(deployment.account.clone(), entries);
    }
    json
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_none, assert_ok};
    use serde_json::json;

    fn parse(value: Value) -> Config {
        from_json(value.to_string().as_bytes()).unwrap()
    }

    fn reserialize(config: &Config) -> Value {
        serde_json::from_slice(&to_json(config).unwrap()).unwrap()
    }

    #[test]
    fn test_contracts_simple() {
        let config = parse(json!({
            "contracts": {
                "KittyItems": "./cadence/kittyItems/contracts/KittyItems.cdc",
                "KittyItemsMarket": "./cadence/kittyItems/contracts/KittyItemsMarket.cdc"
            }
        }));

        let contract = config.contracts.by_name("KittyItems").unwrap();
        assert_eq!(contract.location, "./cadence/kittyItems/contracts/KittyItems.cdc");
        assert!(!contract.is_aliased());
        assert_ok!(config.contracts.by_name("KittyItemsMarket"));
    }

    #[test]
    fn test_contracts_aliases() {
        let config = parse(json!({
            "contracts": {
                "NonFungibleToken": "../hungry-kitties/cadence/contracts/NonFungibleToken.cdc",
                "Kibble": {
                    "source": "../hungry-kitties/cadence/contracts/Kibble.cdc",
                    "aliases": {
                        "emulator": "f8d6e0586b0a20c7",
                        "testnet": "ead892083b3e2c6c"
                    }
                }
            }
        }));

        let kibble = config.contracts.by_name("Kibble").unwrap();
        assert!(kibble.is_aliased());
        assert_eq!(
            kibble.aliases.by_network("testnet").unwrap().address.to_string(),
            "ead892083b3e2c6c"
        );
        assert_none!(kibble.aliases.by_network("mainnet"));

        let nft = config.contracts.by_name("NonFungibleToken").unwrap();
        assert!(!nft.is_aliased());
    }

    #[test]
    fn test_contracts_round_trip() {
        let document = json!({
            "contracts": {
                "KittyItems": "./cadence/kittyItems/contracts/KittyItems.cdc",
                "KittyItemsMarket": {
                    "source": "./cadence/kittyItemsMarket/contracts/KittyItemsMarket.cdc",
                    "aliases": { "testnet": "e5a8b7f23e8b548f" }
                },
                "FUSD": {
                    "source": "./contracts/FUSD.cdc",
                    "aliases": {
                        "testnet": "9a0766d93b6608b7",
                        "mainnet": "3c5959b568896393"
                    }
                },
                "FUSD1": {
                    "source": "./contracts/FUSD.cdc",
                    "aliases": {},
                    "canonical": "FUSD"
                }
            },
            "dependencies": {}
        });

        let config = parse(document.clone());
        assert_eq!(reserialize(&config), document);

        let fusd1 = config.contracts.by_name("FUSD1").unwrap();
        assert!(fusd1.is_alias());
        assert!(fusd1.aliases.is_empty());
        assert_eq!(config.contracts.by_name("FUSD").unwrap().canonical, None);
    }

    #[test]
    fn test_simple_dependency_is_written_in_advanced_form() {
        let config = parse(json!({
            "dependencies": {
                "HelloWorld": "testnet://877931736ee77cff.HelloWorld"
            }
        }));

        let output = reserialize(&config);
        assert_eq!(
            output["dependencies"],
            json!({
                "HelloWorld": {
                    "source": "testnet://877931736ee77cff.HelloWorld",
                    "hash": "",
                    "aliases": {}
                }
            })
        );
        // the mirrored contract stays out of the contracts section
        assert_eq!(output["contracts"], json!({}));
    }

    #[test]
    fn test_dependencies_with_canonical() {
        let dependencies = json!({
            "NumberFormatter": {
                "source": "testnet://8a4dce54554b225d.NumberFormatter",
                "hash": "dc7043832da46dbcc8242a53fa95b37f020bc374df42586a62703b2651979fb9",
                "aliases": {
                    "emulator": "f8d6e0586b0a20c7",
                    "testnet": "8a4dce54554b225d"
                }
            },
            "NumberFormatterAlias": {
                "source": "testnet://8a4dce54554b225d.NumberFormatter",
                "hash": "dc7043832da46dbcc8242a53fa95b37f020bc374df42586a62703b2651979fb9",
                "aliases": {
                    "emulator": "f8d6e0586b0a20c7",
                    "testnet": "8a4dce54554b225d"
                },
                "canonical": "NumberFormatter"
            }
        });
        let config = parse(json!({ "dependencies": dependencies.clone() }));

        assert_eq!(config.dependencies.len(), 2);
        assert_eq!(
            config.dependencies.by_name("NumberFormatter").unwrap().canonical,
            None
        );
        assert_eq!(
            config
                .dependencies
                .by_name("NumberFormatterAlias")
                .unwrap()
                .canonical
                .as_deref(),
            Some("NumberFormatter")
        );

        let mirrored = config.contracts.by_name("NumberFormatterAlias").unwrap();
        assert!(mirrored.is_dependency);
        assert_eq!(mirrored.location, "imports/8a4dce54554b225d/NumberFormatter.cdc");
        assert_eq!(mirrored.canonical_name(), "NumberFormatter");
        assert_eq!(mirrored.aliases.len(), 2);

        assert_eq!(reserialize(&config)["dependencies"], dependencies);
    }

    #[test]
    fn test_malformed_dependency_source() {
        assert_err!(from_json(
            json!({ "dependencies": { "HelloWorld": "877931736ee77cff.HelloWorld" } })
                .to_string()
                .as_bytes()
        ));
    }

    #[test]
    fn test_deployments_keep_order_and_args() {
        let deployments = json!({
            "emulator": {
                "account-3": ["KittyItems", {
                    "name": "Kibble",
                    "args": [
                        { "type": "String", "value": "Hello World" },
                        { "type": "Int8", "value": "10" }
                    ]
                }],
                "account-4": ["FungibleToken", "NonFungibleToken", "Kibble", "KittyItems", "KittyItemsMarket"]
            },
            "testnet": {
                "account-2": ["FungibleToken", "NonFungibleToken", "Kibble", "KittyItems"]
            }
        });
        let config = parse(json!({ "deployments": deployments.clone() }));

        assert_eq!(config.deployments.by_network("emulator").len(), 2);
        let account4 = config
            .deployments
            .by_account_and_network("account-4", "emulator")
            .unwrap();
        let names: Vec<_> = account4.contracts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec![
            "FungibleToken",
            "NonFungibleToken",
            "Kibble",
            "KittyItems",
            "KittyItemsMarket"
        ]);

        let account3 = config
            .deployments
            .by_account_and_network("account-3", "emulator")
            .unwrap();
        assert_eq!(account3.contracts[1].name, "Kibble");
        assert_eq!(account3.contracts[1].args.len(), 2);

        let output = reserialize(&config);
        assert_eq!(output["deployments"], deployments);
        let accounts: Vec<_> = output["deployments"]["emulator"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(accounts, vec!["account-3", "account-4"]);
    }

    #[test]
    fn test_networks_and_accounts() {
        let document = json!({
            "contracts": {},
            "dependencies": {},
            "networks": {
                "emulator": "127.0.0.1:3569",
                "testnet-secure": {
                    "host": "access-001.devnet.nodes.onflow.org:9001",
                    "key": "ba69f7d2e82b9edf25b103c195cd371cf0cc047ef8884a9bbe331e62982d46daeebf836f7445a2ac16741013b192959d8ad26998aff12f2adc67a99e1eb2988d"
                }
            },
            "accounts": {
                "emulator-account": {
                    "address": "f8d6e0586b0a20c7",
                    "key": "dd72967fd2bd75234ae9037dd4694c1f00baad63a10c35172bf65fbb8ad74b47"
                }
            }
        });
        let config = parse(document.clone());

        assert_eq!(config.networks.by_name("emulator").unwrap().key, None);
        assert!(config.networks.by_name("testnet-secure").unwrap().key.is_some());
        assert_eq!(
            config.accounts.by_name("emulator-account").unwrap().address.to_string(),
            "f8d6e0586b0a20c7"
        );
        assert_eq!(reserialize(&config), document);
    }

    #[test]
    fn test_section_order() {
        let mut config = Config::default_config();
        config.contracts.add_or_update(Contract::new("Foo", "./Foo.cdc"));
        let output = String::from_utf8(to_json(&config).unwrap()).unwrap();

        let contracts = output.find("\"contracts\"").unwrap();
        let dependencies = output.find("\"dependencies\"").unwrap();
        let networks = output.find("\"networks\"").unwrap();
        assert!(contracts < dependencies && dependencies < networks);
        assert!(!output.contains("\"deployments\""));
    }
}
