// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    address::Address,
    config::{dependency_location, Aliases, Dependency, RemoteSource},
    core_contracts,
    dependency::InstallerOptions,
    error::{Error, Result},
    gateway::GatewayRegistry,
    project::{ImportLocation, Program},
    state::State,
};
use futures::future::{BoxFuture, FutureExt};
use sha2::{Digest, Sha256};
use std::{
    collections::HashSet,
    sync::{Arc, Mutex as StdMutex},
};
use tokio::{
    sync::{Mutex, MutexGuard, Semaphore},
    task::JoinSet,
};
use tracing::{debug, info, warn};

/// Fetches dependencies and everything they import, recording each one in the
/// project and writing its source under `imports/`.
///
/// Imports of a contract are fetched concurrently. The first failure aborts the
/// remaining fetches of that level and is returned.
#[derive(Clone, Debug)]
pub struct DependencyInstaller {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    gateways: GatewayRegistry,
    state: Mutex<State>,
    options: InstallerOptions,
    fetches: Semaphore,
}

/// Dependencies already visited by one install, by network, address and name
type Visited = Arc<StdMutex<HashSet<(String, Address, String)>>>;

impl DependencyInstaller {
    pub fn new(gateways: GatewayRegistry, state: State, options: InstallerOptions) -> Self {
        let permits = options.max_concurrent_fetches.max(1);
        DependencyInstaller {
            inner: Arc::new(Inner {
                gateways,
                state: Mutex::new(state),
                options,
                fetches: Semaphore::new(permits),
            }),
        }
    }

    /// The project being installed into
    pub async fn state(&self) -> MutexGuard<'_, State> {
        self.inner.state.lock().await
    }

    /// Installs every dependency of the project, one at a time
    pub async fn install(&self) -> Result<()> {
        let dependencies: Vec<Dependency> =
            self.state().await.dependencies().iter().cloned().collect();

        for dependency in dependencies {
            info!("installing {} from {}", dependency.name, dependency.source);
            self.process(&dependency).await?;
        }
        Ok(())
    }

    /// Installs the contract at `source` as a new dependency, named `name` or after
    /// the contract
    pub async fn add(&self, source: RemoteSource, name: Option<String>) -> Result<()> {
        let name = name.unwrap_or_else(|| source.contract_name.clone());
        info!("adding {} from {}", name, source);
        self.process(&Dependency::new(name, source)).await
    }

    async fn process(&self, dependency: &Dependency) -> Result<()> {
        let visited = Visited::default();
        fetch(
            self.inner.clone(),
            visited,
            dependency.source.network_name.clone(),
            dependency.source.address,
            dependency.name.clone(),
            dependency.source.contract_name.clone(),
        )
        .await
    }
}

/// Fetches `contract_name` from the account at `address`, records it as
/// `assigned_name` and then fetches its imports
fn fetch(
    inner: Arc<Inner>,
    visited: Visited,
    network: String,
    address: Address,
    assigned_name: String,
    contract_name: String,
) -> BoxFuture<'static, Result<()>> {
    async move {
        let key = (network.clone(), address, assigned_name.clone());
        let first_visit = visited
            .lock()
            .map_err(|_| Error::Fetch("dependency bookkeeping poisoned".to_string()))?
            .insert(key);
        if !first_visit {
            debug!("{} from {} already handled", assigned_name, address);
            return Ok(());
        }

        let gateway = inner.gateways.get(&network)?;
        let account = {
            let _permit = inner
                .fetches
                .acquire()
                .await
                .map_err(|err| Error::Fetch(err.to_string()))?;
            debug!("fetching account {} on {}", address.to_hex_literal(), network);
            gateway.get_account(address).await?
        };

        let mut found = None;
        for contract in &account.contracts {
            let location = RemoteSource::new(network.clone(), address, contract.name.clone());
            let program = Program::parse(&contract.code, Vec::new(), location.to_string())?;
            if program.name()? == contract_name {
                found = Some(program);
                break;
            }
        }
        let Some(mut program) = found else {
            warn!(
                "contract {} not found on account {} ({})",
                contract_name,
                address.to_hex_literal(),
                network
            );
            return Ok(());
        };

        // every identifier of an address import names a contract on that account
        let imports: Vec<(Address, String)> = program
            .address_import_declarations()
            .into_iter()
            .flat_map(|import| match &import.location {
                ImportLocation::Address(address) => import
                    .identifiers
                    .iter()
                    .map(|identifier| (*address, identifier.name.clone()))
                    .collect(),
                _ => Vec::new(),
            })
            .collect();

        record(&inner, &network, address, &assigned_name, &contract_name, &mut program).await?;

        let transitive_network = inner
            .options
            .transitive_network
            .clone()
            .unwrap_or_else(|| network.clone());
        let mut children = JoinSet::new();
        for (import_address, import_name) in imports {
            children.spawn(fetch(
                inner.clone(),
                visited.clone(),
                transitive_network.clone(),
                import_address,
                import_name.clone(),
                import_name,
            ));
        }

        while let Some(joined) = children.join_next().await {
            let result = joined
                .map_err(|err| Error::Fetch(format!("dependency fetch did not complete: {}", err)));
            if let Err(err) = result.and_then(|result| result) {
                children.abort_all();
                return Err(err);
            }
        }
        Ok(())
    }
    .boxed()
}

/// Writes the source of a fetched contract and records it as a dependency, saving
/// the project
async fn record(
    inner: &Inner,
    network: &str,
    address: Address,
    assigned_name: &str,
    contract_name: &str,
    program: &mut Program,
) -> Result<()> {
    let mut state = inner.state.lock().await;

    program.convert_imports()?;
    let code = program.code();
    let hash = hex::encode(Sha256::digest(code.as_bytes()));

    let aliases = match core_contracts::find(network, contract_name, &address) {
        Some(core) => {
            debug!("{} is a core contract, aliasing it on every network", contract_name);
            core.aliases()
        },
        None => {
            let mut aliases = Aliases::new();
            aliases.add(network, address);
            aliases
        },
    };

    let dependency = Dependency {
        name: assigned_name.to_string(),
        source: RemoteSource::new(network, address, contract_name),
        hash,
        aliases: aliases.clone(),
        canonical: state
            .dependencies()
            .by_name(assigned_name)
            .ok()
            .and_then(|existing| existing.canonical.clone()),
    };

    let file = state.base_dir().join(dependency_location(&dependency));
    let reader_writer = state.reader_writer().clone();
    if reader_writer.exists(&file) {
        debug!("{} already exists, not overwriting", file.display());
    } else {
        if let Some(parent) = file.parent() {
            reader_writer.mkdir_all(parent)?;
        }
        reader_writer.write_file(&file, code.as_bytes())?;
        debug!("wrote {}", file.display());
    }

    state
        .contracts_mut()
        .add_dependency_as_contract(&dependency, network, aliases);
    info!("installed {} from {}", dependency.name, dependency.source);
    state.dependencies_mut().add_or_update(dependency);
    state.save_default()
}
