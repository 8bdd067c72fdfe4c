use alloy_primitives::{Address, B256};
use alloy_provider::PendingTransactionError;
use alloy_transport::{RpcError, TransportErrorKind};
use oracle_bench_common::Phase;
use oracle_bench_config::ChainKind;

pub type BenchResult<T> = Result<T, BenchError>;

/// Errors that abort a benchmark run.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("no gas information for {phase} transaction {tx_hash} and no fallback gas price configured")]
    MissingGasInfo { phase: Phase, tx_hash: B256 },
    #[error("transaction {tx_hash} sent by {from} reverted")]
    TransactionFailure { from: Address, tx_hash: B256 },
    #[error("failed to fund data provider {provider}: {source}")]
    FundingFailure {
        provider: Address,
        #[source]
        source: Box<Self>,
    },
    #[error("no compiled artifact for {0} networks, compile the contract first")]
    MissingArtifact(ChainKind),
    #[error("data provider {0} is not registered with the oracle after registration")]
    NotRegistered(Address),
    #[error("deployment transaction {0} created no contract")]
    NotDeployed(B256),
    #[error("{0}")]
    Rpc(String),
}

impl BenchError {
    /// Wraps any RPC level failure.
    pub fn rpc(err: impl std::fmt::Display) -> Self {
        Self::Rpc(err.to_string())
    }
}

impl From<RpcError<TransportErrorKind>> for BenchError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        Self::rpc(err)
    }
}

impl From<PendingTransactionError> for BenchError {
    fn from(err: PendingTransactionError) -> Self {
        Self::rpc(err)
    }
}

impl From<alloy_sol_types::Error> for BenchError {
    fn from(err: alloy_sol_types::Error) -> Self {
        Self::rpc(format!("failed to decode contract response: {err}"))
    }
}
