// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    address::Address,
    config::{Network, EMULATOR, MAINNET, TESTNET},
    error::{Error, Result},
    gateway::{NetworkGateway, RemoteAccount, RemoteContract},
};
use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::{Client as ReqwestClient, ClientBuilder as ReqwestClientBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("flowkit/", env!("CARGO_PKG_VERSION"));

/// REST endpoint of a network: its host when that is an http(s) URL, otherwise the
/// public endpoint of a standard network
pub fn rest_url(network: &Network) -> Option<Url> {
    if network.host.starts_with("http://") || network.host.starts_with("https://") {
        return Url::parse(&network.host).ok();
    }
    let url = match network.name.as_str() {
        EMULATOR => "http://127.0.0.1:8888",
        TESTNET => "https://rest-testnet.onflow.org",
        MAINNET => "https://rest-mainnet.onflow.org",
        _ => return None,
    };
    Url::parse(url).ok()
}

/// Builder for [`RestGateway`]
#[derive(Debug)]
pub struct RestGatewayBuilder {
    base_url: Url,
    inner: ReqwestClientBuilder,
}

impl RestGatewayBuilder {
    pub fn new(base_url: Url) -> Self {
        let inner = ReqwestClient::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT);
        Self { base_url, inner }
    }

    pub fn for_network(network: &Network) -> Result<Self> {
        rest_url(network).map(Self::new).ok_or_else(|| {
            Error::Config(format!(
                "no REST endpoint known for network {} ({})",
                network.name, network.host
            ))
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    pub fn build(self) -> Result<RestGateway> {
        Ok(RestGateway {
            base_url: self.base_url,
            inner: self
                .inner
                .build()
                .map_err(|err| Error::Fetch(format!("failed to build REST client: {}", err)))?,
        })
    }
}

/// A gateway over the Flow Access REST API
#[derive(Clone, Debug)]
pub struct RestGateway {
    base_url: Url,
    inner: ReqwestClient,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    address: String,
    /// Contract name to base64 encoded code
    #[serde(default)]
    contracts: IndexMap<String, String>,
}

impl RestGateway {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn account_url(&self, address: &Address) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("v1/accounts/{}", address))
            .map_err(|err| Error::Config(format!("invalid REST url {}: {}", self.base_url, err)))?;
        url.query_pairs_mut().append_pair("expand", "contracts");
        Ok(url)
    }
}

#[async_trait]
impl NetworkGateway for RestGateway {
    async fn get_account(&self, address: Address) -> Result<RemoteAccount> {
        let url = self.account_url(&address)?;
        debug!("GET {}", url);

        let fetch_error =
            |err: reqwest::Error| Error::Fetch(format!("failed to get account {}: {}", address, err));
        let response = self.inner.get(url).send().await.map_err(fetch_error)?;
        match response.status() {
            StatusCode::OK => {},
            StatusCode::NOT_FOUND => {
                return Err(Error::Fetch(format!(
                    "account {} not found",
                    address.to_hex_literal()
                )))
            },
            status => {
                return Err(Error::Fetch(format!(
                    "failed to get account {}: status {}",
                    address, status
                )))
            },
        }

        let account: AccountResponse = response.json().await.map_err(fetch_error)?;
        let account_address = Address::from_hex(&account.address)?;
        let contracts = account
            .contracts
            .into_iter()
            .map(|(name, encoded)| -> Result<RemoteContract> {
                let code = base64::decode(&encoded).map_err(|err| {
                    Error::Fetch(format!("contract {} has invalid code: {}", name, err))
                })?;
                Ok(RemoteContract {
                    name,
                    code,
                    address: account_address,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RemoteAccount {
            address: account_address,
            contracts,
        })
    }
}
