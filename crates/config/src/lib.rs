//! # oracle-bench-config
//!
//! Benchmark configuration. Values are layered with [`figment`]: built-in defaults, then
//! `oracle-bench.toml` (or the file given with `--config`), then `ORACLE_BENCH_*` environment
//! variables, then command line arguments merged by the binary.

#[macro_use]
extern crate tracing;

use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

mod error;
pub use error::ConfigError;

pub mod interp;

mod network;
pub use network::{ChainKind, NetworkConfig, ResolvedNetwork, ZKSYNC_LOCAL_GAS_PRICE, builtin_networks};

pub use figment;

/// Locations of the compiled `SimpleOracle` artifacts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    /// Hardhat artifact compiled with solc.
    pub evm: PathBuf,
    /// Hardhat artifact compiled with zksolc.
    pub zksync: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            evm: PathBuf::from("artifacts/contracts/SimpleOracle.sol/SimpleOracle.json"),
            zksync: PathBuf::from("artifacts-zk/contracts/SimpleOracle.sol/SimpleOracle.json"),
        }
    }
}

impl ArtifactPaths {
    pub fn for_kind(&self, kind: ChainKind) -> &Path {
        match kind {
            ChainKind::Evm => &self.evm,
            ChainKind::ZkSync => &self.zksync,
        }
    }
}

/// Benchmark configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of data provider wallets generated per run.
    pub data_provider_count: usize,
    /// Ether sent to each data provider before registering, e.g. `.004`.
    pub fund_amount: String,
    /// Number of `updatePrice` calls per data provider.
    pub max_updates: u32,
    /// Run the update loop for this many minutes instead of a fixed count.
    pub duration_minutes: Option<u64>,
    /// Pause between two updates of the same provider in duration mode.
    pub update_interval_ms: u64,
    /// L1 endpoint used to sample L1 gas prices on rollups.
    pub l1_rpc_url: Option<String>,
    /// Send the providers' leftover funds back to the deployer after the run.
    pub refund: bool,
    pub artifacts: ArtifactPaths,
    /// Networks added to, or replacing entries of, the built-in table.
    pub networks: BTreeMap<String, NetworkConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_provider_count: 3,
            fund_amount: ".004".to_string(),
            max_updates: 5,
            duration_minutes: None,
            update_interval_ms: 1_000,
            l1_rpc_url: None,
            refund: true,
            artifacts: ArtifactPaths::default(),
            networks: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Default configuration file name, looked up in the working directory.
    pub const FILE_NAME: &'static str = "oracle-bench.toml";

    /// Prefix of the environment variables that override configuration values.
    pub const ENV_PREFIX: &'static str = "ORACLE_BENCH_";

    /// Returns the figment of all configuration sources except command line arguments.
    ///
    /// An explicitly given `path` must exist, the default file is optional.
    pub fn figment(path: Option<&Path>) -> Result<Figment, ConfigError> {
        let file = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(Self::FILE_NAME),
        };
        trace!(file = %file.display(), "loading configuration");
        Ok(Figment::from(Self::default())
            .merge(Toml::file(file))
            .merge(Env::raw().only(&["L1_RPC_URL"]))
            .merge(Env::prefixed(Self::ENV_PREFIX).split("__")))
    }

    /// Extracts a configuration from `provider`.
    pub fn from_provider<T: Provider>(provider: T) -> Result<Self, ConfigError> {
        Ok(Figment::from(provider).extract()?)
    }

    /// The built-in network table overlaid with the configured networks.
    pub fn networks(&self) -> BTreeMap<String, NetworkConfig> {
        let mut networks = builtin_networks();
        networks.extend(self.networks.iter().map(|(name, net)| (name.clone(), net.clone())));
        networks
    }

    /// Resolves the network called `name`.
    pub fn network(&self, name: &str) -> Result<ResolvedNetwork, ConfigError> {
        let network = self
            .networks
            .get(name)
            .cloned()
            .or_else(|| builtin_networks().remove(name))
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))?;
        network.resolve(name, self.l1_rpc_url.as_deref())
    }

    /// Names of the networks whose deployer key is set, in table order.
    pub fn networks_with_keys(&self) -> Vec<String> {
        self.networks().into_iter().filter(|(_, net)| net.has_key()).map(|(name, _)| name).collect()
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("oracle-bench defaults")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}

/// Loads `.env` from the working directory, if there is one.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(%err, "failed to load .env"),
    }
}
