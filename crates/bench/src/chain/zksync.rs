use super::{ChainFlavor, RpcChain};
use crate::{
    artifacts::ContractArtifact,
    error::{BenchError, BenchResult},
};
use alloy_network::TransactionBuilder;
use alloy_provider::{DynProvider, Provider};
use alloy_signer_local::PrivateKeySigner;
use alloy_zksync::{
    contracts::l2::contract_deployer::CONTRACT_DEPLOYER_ADDRESS,
    network::{Zksync, transaction_request::TransactionRequest},
    provider::zksync_provider,
    wallet::ZksyncWallet,
};
use oracle_bench_config::ChainKind;
use url::Url;

/// ZKsync Era. Deployments are EIP-712 transactions to the ContractDeployer.
#[derive(Clone, Copy, Debug)]
pub struct ZkSyncFlavor;

pub type ZkSyncChain = RpcChain<ZkSyncFlavor>;

impl ChainFlavor for ZkSyncFlavor {
    type Network = Zksync;

    const KIND: ChainKind = ChainKind::ZkSync;

    fn connect(url: Url) -> DynProvider<Zksync> {
        zksync_provider().with_recommended_fillers().connect_http(url).erased()
    }

    fn connect_wallet(url: Url, signer: PrivateKeySigner) -> DynProvider<Zksync> {
        zksync_provider()
            .with_recommended_fillers()
            .wallet(ZksyncWallet::from(signer))
            .connect_http(url)
            .erased()
    }

    fn deploy_request(artifact: &ContractArtifact) -> BenchResult<TransactionRequest> {
        // The oracle has no constructor arguments and no factory dependencies.
        TransactionRequest::default()
            .with_to(CONTRACT_DEPLOYER_ADDRESS)
            .with_create_params(artifact.bytecode.to_vec(), Vec::new(), Vec::new())
            .map_err(|err| BenchError::rpc(format!("invalid EraVM bytecode: {err}")))
    }
}
