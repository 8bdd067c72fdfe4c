//! Networks the benchmark can target.

use crate::{ConfigError, interp::interpolate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};
use url::Url;

/// Fallback gas price for `zksync-local`.
///
/// Compatibility shim: the local zkSync node returns receipts without an effective gas price
/// and reports no usable network price, so its costs are priced at this fixed value. This is a
/// workaround for that one node, not a policy for other networks; it is only applied through
/// the `fallback_gas_price` of networks that set it.
pub const ZKSYNC_LOCAL_GAS_PRICE: u128 = 250_000_000;

/// Which transaction format and artifact a network needs.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ChainKind {
    /// Any chain accepting plain Ethereum transactions.
    #[default]
    Evm,
    /// ZKsync Era, deployments go through the ContractDeployer system contract.
    #[serde(rename = "zksync", alias = "zk-sync")]
    #[strum(to_string = "zksync", serialize = "zk-sync")]
    ZkSync,
}

/// One entry of the network table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint, may contain `${VAR}` placeholders.
    pub rpc_url: String,
    pub chain_id: u64,
    #[serde(default)]
    pub kind: ChainKind,
    /// Name of the environment variable holding the deployer's private key.
    pub key_env: String,
    /// Gas price used when a receipt reports none and the node cannot be asked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_gas_price: Option<u128>,
    /// Gas a full run is expected to use, for cost estimates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_gas_used: Option<u64>,
    /// L1 endpoint of a rollup, overrides the global `l1_rpc_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1_rpc_url: Option<String>,
}

impl NetworkConfig {
    fn new(rpc_url: &str, chain_id: u64, kind: ChainKind, key_env: &str) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            chain_id,
            kind,
            key_env: key_env.to_string(),
            fallback_gas_price: None,
            estimated_gas_used: None,
            l1_rpc_url: None,
        }
    }

    fn with_estimate(mut self, gas_used: u64) -> Self {
        self.estimated_gas_used = Some(gas_used);
        self
    }

    /// Returns `true` if the deployer key of this network is available in the environment.
    pub fn has_key(&self) -> bool {
        std::env::var(&self.key_env).is_ok_and(|key| !key.trim().is_empty())
    }

    /// Interpolates the endpoints and parses them.
    pub fn resolve(&self, name: &str, global_l1_rpc_url: Option<&str>) -> Result<ResolvedNetwork, ConfigError> {
        let rpc_url = parse_url(name, &interpolate(&self.rpc_url, name)?)?;
        let l1_rpc_url = match self.l1_rpc_url.as_deref().or(global_l1_rpc_url) {
            Some(url) => Some(parse_url(name, &interpolate(url, name)?)?),
            None => None,
        };
        Ok(ResolvedNetwork {
            name: name.to_string(),
            rpc_url,
            chain_id: self.chain_id,
            kind: self.kind,
            key_env: self.key_env.clone(),
            fallback_gas_price: self.fallback_gas_price,
            estimated_gas_used: self.estimated_gas_used,
            l1_rpc_url,
        })
    }
}

fn parse_url(network: &str, url: &str) -> Result<Url, ConfigError> {
    Url::parse(url.trim()).map_err(|source| ConfigError::InvalidUrl {
        network: network.to_string(),
        url: url.to_string(),
        source,
    })
}

/// A network with its endpoints interpolated and parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedNetwork {
    pub name: String,
    pub rpc_url: Url,
    pub chain_id: u64,
    pub kind: ChainKind,
    pub key_env: String,
    pub fallback_gas_price: Option<u128>,
    pub estimated_gas_used: Option<u64>,
    pub l1_rpc_url: Option<Url>,
}

impl ResolvedNetwork {
    /// Reads the deployer's private key from the environment.
    pub fn private_key(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(ConfigError::MissingEnv {
                var: self.key_env.clone(),
                context: format!("network `{}`", self.name),
            }),
        }
    }
}

/// The networks known without any configuration file.
pub fn builtin_networks() -> BTreeMap<String, NetworkConfig> {
    use ChainKind::{Evm, ZkSync};

    let mut zksync_local = NetworkConfig::new("http://localhost:3050", 270, ZkSync, "LOCAL_ZKSYNC_KEY");
    // Compatibility shim for the local node only, see `ZKSYNC_LOCAL_GAS_PRICE`.
    zksync_local.fallback_gas_price = Some(ZKSYNC_LOCAL_GAS_PRICE);

    [
        ("zksync-local", zksync_local),
        ("zksync-goerli", NetworkConfig::new("https://zksync2-testnet.zksync.dev", 280, ZkSync, "TESTNET_KEY")),
        ("zksync-sepolia", NetworkConfig::new("https://sepolia.era.zksync.dev", 300, ZkSync, "TESTNET_KEY")),
        (
            "zksync",
            NetworkConfig::new("https://mainnet.era.zksync.io", 324, ZkSync, "MAINNET_KEY")
                .with_estimate(3_653_943),
        ),
        ("optimism-local", NetworkConfig::new("http://localhost:9545", 901, Evm, "LOCAL_OPTIMISM_KEY")),
        ("optimism-goerli", NetworkConfig::new("https://optimism-goerli.publicnode.com", 420, Evm, "TESTNET_KEY")),
        (
            "optimism-sepolia",
            NetworkConfig::new(
                "https://optimism-sepolia.infura.io/v3/${INFURA_API_KEY}",
                11_155_420,
                Evm,
                "TESTNET_KEY",
            ),
        ),
        (
            "optimism",
            NetworkConfig::new("https://optimism.publicnode.com", 10, Evm, "MAINNET_KEY").with_estimate(694_564),
        ),
        ("polygonzk-local", NetworkConfig::new("http://localhost:9091", 1001, Evm, "LOCAL_POLYGONZK_KEY")),
        (
            "polygonzkevm-testnet",
            NetworkConfig::new("https://rpc.ankr.com/polygon_zkevm_testnet", 1442, Evm, "TESTNET_KEY"),
        ),
        (
            "polygonzk",
            NetworkConfig::new("https://polygon-zkevm-mainnet.public.blastapi.io", 1101, Evm, "MAINNET_KEY")
                .with_estimate(694_504),
        ),
        ("arbitrum-local", NetworkConfig::new("http://localhost:8547", 412_346, Evm, "LOCAL_ARBITRUM_KEY")),
        ("arbitrum-goerli", NetworkConfig::new("https://arbitrum-goerli.publicnode.com", 421_613, Evm, "TESTNET_KEY")),
        (
            "arbitrum-sepolia",
            NetworkConfig::new(
                "https://arbitrum-sepolia.infura.io/v3/${INFURA_API_KEY}",
                421_614,
                Evm,
                "TESTNET_KEY",
            ),
        ),
        (
            "arbitrum",
            NetworkConfig::new("https://arbitrum-one.public.blastapi.io", 42_161, Evm, "MAINNET_KEY")
                .with_estimate(694_528),
        ),
        (
            "linea-goerli",
            NetworkConfig::new("https://linea-goerli.infura.io/v3/${INFURA_API_KEY}", 59_140, Evm, "TESTNET_KEY"),
        ),
        (
            "linea",
            NetworkConfig::new("https://linea-mainnet.infura.io/v3/${INFURA_API_KEY}", 59_144, Evm, "MAINNET_KEY"),
        ),
        ("scroll-sepolia", NetworkConfig::new("https://rpc.ankr.com/scroll_sepolia_testnet", 534_351, Evm, "TESTNET_KEY")),
        ("scroll", NetworkConfig::new("https://rpc.ankr.com/scroll", 534_352, Evm, "TESTNET_KEY")),
    ]
    .into_iter()
    .map(|(name, network)| (name.to_string(), network))
    .collect()
}
