//! Subcommands of the `oracle-bench` binary.

use crate::opts::GlobalArgs;
use alloy_signer_local::PrivateKeySigner;
use clap::Parser;
use eyre::{Result, WrapErr};
use oracle_bench_config::{
    Config, ResolvedNetwork,
    figment::{
        self, Metadata, Profile, Provider,
        error::Kind::InvalidType,
        value::{Dict, Empty, Map, Tag, Value},
    },
};
use serde::Serialize;

pub mod benchmark;
pub mod estimate;
pub mod finalize;
pub mod networks;
pub mod run;

/// Run parameters that override the configuration file.
///
/// `RunOpts` implements `figment::Provider`, so only the flags that were actually passed are
/// merged over the configured values.
#[derive(Clone, Debug, Default, Parser, Serialize)]
#[command(next_help_heading = "Run options")]
pub struct RunOpts {
    /// Number of data provider wallets to create.
    #[arg(long, value_name = "COUNT")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_provider_count: Option<usize>,

    /// Ether sent to each data provider, e.g. `.004`.
    #[arg(long, value_name = "ETH")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_amount: Option<String>,

    /// Number of price updates per data provider.
    ///
    /// Overrides a `duration_minutes` set in the configuration.
    #[arg(long, value_name = "COUNT", conflicts_with = "duration")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_updates: Option<u32>,

    /// Keep updating prices for this many minutes instead of a fixed count.
    #[arg(long, value_name = "MINUTES")]
    #[serde(rename = "duration_minutes", skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,

    /// Keep the data providers' leftover funds instead of sending them back.
    #[arg(long)]
    #[serde(skip)]
    pub no_refund: bool,
}

impl Provider for RunOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("Run Args Provider")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let value = Value::serialize(self)?;
        let error = InvalidType(value.to_actual(), "map".into());
        let mut dict = value.into_dict().ok_or(error)?;

        if self.no_refund {
            dict.insert("refund".to_string(), false.into());
        }

        // An explicit update count replaces a configured duration.
        if self.max_updates.is_some() {
            dict.insert("duration_minutes".to_string(), Value::Empty(Tag::Default, Empty::None));
        }

        Ok(Map::from([(Profile::Default, dict)]))
    }
}

/// Loads the configuration, with `overrides` merged on top.
pub fn load_config(global: &GlobalArgs, overrides: impl Provider) -> Result<Config> {
    let figment = Config::figment(global.config.as_deref())?.merge(overrides);
    Ok(Config::from_provider(figment)?)
}

/// Reads the deployer key of `network`.
pub fn deployer(network: &ResolvedNetwork) -> Result<PrivateKeySigner> {
    let key = network.private_key()?;
    key.parse::<PrivateKeySigner>()
        .wrap_err_with(|| format!("invalid private key in `{}`", network.key_env))
}
