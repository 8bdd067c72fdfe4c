use super::{ChainFlavor, RpcChain};
use crate::{artifacts::ContractArtifact, error::BenchResult};
use alloy_network::{Ethereum, EthereumWallet, TransactionBuilder};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use oracle_bench_config::ChainKind;
use url::Url;

/// Chains accepting plain Ethereum transactions.
#[derive(Clone, Copy, Debug)]
pub struct EvmFlavor;

pub type EvmChain = RpcChain<EvmFlavor>;

impl ChainFlavor for EvmFlavor {
    type Network = Ethereum;

    const KIND: ChainKind = ChainKind::Evm;

    fn connect(url: Url) -> DynProvider {
        ProviderBuilder::new().connect_http(url).erased()
    }

    fn connect_wallet(url: Url, signer: PrivateKeySigner) -> DynProvider {
        ProviderBuilder::new().wallet(EthereumWallet::from(signer)).connect_http(url).erased()
    }

    fn deploy_request(artifact: &ContractArtifact) -> BenchResult<TransactionRequest> {
        Ok(TransactionRequest::default().with_deploy_code(artifact.bytecode.clone()))
    }
}
