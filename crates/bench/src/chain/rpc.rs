use super::{OracleChain, TxOutcome};
use crate::{
    artifacts::ContractArtifact,
    contract::{self, DataProviderState, OracleCall},
    error::{BenchError, BenchResult},
};
use alloy_network::{Network, ReceiptResponse, TransactionBuilder};
use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use oracle_bench_config::{ChainKind, ResolvedNetwork};
use parking_lot::Mutex;
use std::collections::HashMap;
use url::Url;

/// What differs between the networks an [`RpcChain`] can talk to.
pub trait ChainFlavor: Send + Sync + 'static {
    type Network: Network;

    const KIND: ChainKind;

    /// Read-only provider.
    fn connect(url: Url) -> DynProvider<Self::Network>;

    /// Provider signing with `signer`.
    fn connect_wallet(url: Url, signer: PrivateKeySigner) -> DynProvider<Self::Network>;

    /// Creation transaction of `artifact`.
    fn deploy_request(
        artifact: &ContractArtifact,
    ) -> BenchResult<<Self::Network as Network>::TransactionRequest>;
}

/// [`OracleChain`] over JSON-RPC.
pub struct RpcChain<F: ChainFlavor> {
    name: String,
    chain_id: u64,
    rpc_url: Url,
    reader: DynProvider<F::Network>,
    l1: Option<DynProvider>,
    /// One signing provider per wallet, created on first use.
    wallets: Mutex<HashMap<Address, DynProvider<F::Network>>>,
}

impl<F: ChainFlavor> std::fmt::Debug for RpcChain<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChain")
            .field("name", &self.name)
            .field("chain_id", &self.chain_id)
            .field("kind", &F::KIND)
            .field("rpc_url", &self.rpc_url.as_str())
            .finish_non_exhaustive()
    }
}

impl<F: ChainFlavor> RpcChain<F> {
    pub fn new(network: &ResolvedNetwork) -> Self {
        Self {
            name: network.name.clone(),
            chain_id: network.chain_id,
            rpc_url: network.rpc_url.clone(),
            reader: F::connect(network.rpc_url.clone()),
            l1: network.l1_rpc_url.clone().map(|url| ProviderBuilder::new().connect_http(url).erased()),
            wallets: Default::default(),
        }
    }

    fn wallet(&self, signer: &PrivateKeySigner) -> DynProvider<F::Network> {
        self.wallets
            .lock()
            .entry(signer.address())
            .or_insert_with(|| {
                let signer = signer.clone().with_chain_id(Some(self.chain_id));
                F::connect_wallet(self.rpc_url.clone(), signer)
            })
            .clone()
    }

    async fn send_request(
        &self,
        from: &PrivateKeySigner,
        tx: <F::Network as Network>::TransactionRequest,
    ) -> BenchResult<TxOutcome> {
        let receipt = self.wallet(from).send_transaction(tx).await?.get_receipt().await?;
        let outcome = tx_outcome(&receipt);
        if !receipt.status() {
            return Err(BenchError::TransactionFailure { from: from.address(), tx_hash: outcome.tx_hash });
        }
        trace!(network = %self.name, tx = %outcome.tx_hash, gas_used = outcome.gas_used, "transaction mined");
        Ok(outcome)
    }

    async fn call(&self, contract: Address, input: Bytes) -> BenchResult<Bytes> {
        let tx = <F::Network as Network>::TransactionRequest::default().with_to(contract).with_input(input);
        Ok(self.reader.call(tx).await?)
    }
}

fn tx_outcome<R: ReceiptResponse>(receipt: &R) -> TxOutcome {
    TxOutcome {
        tx_hash: receipt.transaction_hash(),
        gas_used: receipt.gas_used(),
        effective_gas_price: Some(receipt.effective_gas_price()).filter(|price| *price != 0),
        contract_address: receipt.contract_address(),
    }
}

#[async_trait]
impl<F: ChainFlavor> OracleChain for RpcChain<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ChainKind {
        F::KIND
    }

    async fn deploy(&self, from: &PrivateKeySigner, artifact: &ContractArtifact) -> BenchResult<TxOutcome> {
        let outcome = self.send_request(from, F::deploy_request(artifact)?).await?;
        if outcome.contract_address.is_none() {
            return Err(BenchError::NotDeployed(outcome.tx_hash));
        }
        Ok(outcome)
    }

    async fn send(&self, from: &PrivateKeySigner, contract: Address, call: OracleCall) -> BenchResult<TxOutcome> {
        let tx = <F::Network as Network>::TransactionRequest::default()
            .with_to(contract)
            .with_input(call.calldata());
        self.send_request(from, tx).await
    }

    async fn transfer(&self, from: &PrivateKeySigner, to: Address, value: U256) -> BenchResult<TxOutcome> {
        let tx = <F::Network as Network>::TransactionRequest::default().with_to(to).with_value(value);
        self.send_request(from, tx).await
    }

    async fn balance(&self, address: Address) -> BenchResult<U256> {
        Ok(self.reader.get_balance(address).await?)
    }

    async fn gas_price(&self) -> BenchResult<u128> {
        Ok(self.reader.get_gas_price().await?)
    }

    async fn l1_gas_price(&self) -> BenchResult<Option<u128>> {
        match &self.l1 {
            Some(l1) => Ok(Some(l1.get_gas_price().await?)),
            None => Ok(None),
        }
    }

    async fn price(&self, contract: Address) -> BenchResult<U256> {
        let ret = self.call(contract, contract::get_price_calldata()).await?;
        Ok(contract::decode_price(&ret)?)
    }

    async fn provider_state(&self, contract: Address, provider: Address) -> BenchResult<DataProviderState> {
        let ret = self.call(contract, contract::data_providers_calldata(provider)).await?;
        Ok(contract::decode_data_provider(&ret)?)
    }
}
