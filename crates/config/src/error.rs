use thiserror::Error;

/// Errors raised while loading the configuration or resolving a network.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to extract configuration: {0}")]
    Extract(#[from] figment::Error),
    #[error("config file `{}` does not exist", .0.display())]
    MissingFile(std::path::PathBuf),
    #[error("unknown network `{0}`, run `oracle-bench networks` to list the available ones")]
    UnknownNetwork(String),
    #[error("environment variable `{var}` is not set (required by {context})")]
    MissingEnv { var: String, context: String },
    #[error("invalid RPC URL `{url}` for network `{network}`: {source}")]
    InvalidUrl {
        network: String,
        url: String,
        #[source]
        source: url::ParseError,
    },
}
