//! In-memory [`OracleChain`] that mimics the SimpleOracle contract.

use alloy_primitives::{Address, B256, U256};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use oracle_bench::{
    artifacts::ContractArtifact,
    chain::{OracleChain, TRANSFER_GAS, TxOutcome},
    contract::{DataProviderState, OracleCall},
    error::{BenchError, BenchResult},
};
use oracle_bench_config::ChainKind;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

pub const DEPLOY_GAS: u64 = 500_000;
pub const REGISTER_GAS: u64 = 50_000;
pub const FINALIZE_GAS: u64 = 40_000;

/// Address every deployment lands at.
pub const ORACLE: Address = Address::repeat_byte(0xcc);

/// Gas of the `n`th update of a provider: alternates between 21000 and 21500.
pub fn update_gas(n: usize) -> u64 {
    21_000 + 500 * (n % 2) as u64
}

#[derive(Default)]
struct State {
    balances: HashMap<Address, U256>,
    updates: HashMap<Address, usize>,
    providers: HashMap<Address, DataProviderState>,
    price: U256,
    txs: u64,
}

pub struct MockChain {
    name: String,
    /// Price reported in receipts.
    receipt_price: Option<u128>,
    /// Price returned by `gas_price()`, `None` makes the call fail.
    network_price: Option<u128>,
    l1_price: Option<u128>,
    zero_gas: bool,
    reverting: HashSet<Address>,
    failing_transfers: HashSet<Address>,
    /// Senders whose `registerDataProvider` is mined but leaves no trace.
    ignored_registrations: HashSet<Address>,
    state: Mutex<State>,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            receipt_price: Some(100),
            network_price: Some(100),
            l1_price: None,
            zero_gas: false,
            reverting: HashSet::new(),
            failing_transfers: HashSet::new(),
            ignored_registrations: HashSet::new(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn with_receipt_price(mut self, price: Option<u128>) -> Self {
        self.receipt_price = price;
        self
    }

    pub fn with_network_price(mut self, price: Option<u128>) -> Self {
        self.network_price = price;
        self
    }

    pub fn with_l1_price(mut self, price: u128) -> Self {
        self.l1_price = Some(price);
        self
    }

    pub fn with_zero_gas(mut self) -> Self {
        self.zero_gas = true;
        self
    }

    pub fn reverting_for(mut self, from: Address) -> Self {
        self.reverting.insert(from);
        self
    }

    pub fn failing_transfers_to(mut self, to: Address) -> Self {
        self.failing_transfers.insert(to);
        self
    }

    pub fn ignoring_registration_of(mut self, from: Address) -> Self {
        self.ignored_registrations.insert(from);
        self
    }

    pub fn set_balance(&self, address: Address, balance: U256) {
        self.state.lock().balances.insert(address, balance);
    }

    pub fn balance_of(&self, address: Address) -> U256 {
        self.state.lock().balances.get(&address).copied().unwrap_or_default()
    }

    pub fn state_of(&self, provider: Address) -> DataProviderState {
        self.state.lock().providers.get(&provider).copied().unwrap_or_default()
    }

    fn charged_price(&self) -> u128 {
        self.receipt_price.or(self.network_price).unwrap_or(0)
    }

    /// Charges `from` for `gas` and `value` and returns the receipt.
    fn mine(&self, from: Address, gas: u64, value: U256, to: Option<Address>) -> BenchResult<TxOutcome> {
        let mut state = self.state.lock();
        state.txs += 1;
        let tx_hash = B256::from(U256::from(state.txs));

        let gas = if self.zero_gas { 0 } else { gas };
        let fee = U256::from(gas) * U256::from(self.charged_price());
        let balance = state.balances.entry(from).or_default();
        if *balance < fee + value {
            return Err(BenchError::rpc(format!("insufficient funds for {from}")));
        }
        *balance -= fee + value;
        if let Some(to) = to {
            *state.balances.entry(to).or_default() += value;
        }

        if self.reverting.contains(&from) {
            return Err(BenchError::TransactionFailure { from, tx_hash });
        }
        Ok(TxOutcome {
            tx_hash,
            gas_used: gas,
            effective_gas_price: self.receipt_price,
            contract_address: None,
        })
    }
}

#[async_trait]
impl OracleChain for MockChain {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ChainKind {
        ChainKind::Evm
    }

    async fn deploy(&self, from: &PrivateKeySigner, _artifact: &ContractArtifact) -> BenchResult<TxOutcome> {
        tokio::task::yield_now().await;
        let mut outcome = self.mine(from.address(), DEPLOY_GAS, U256::ZERO, None)?;
        outcome.contract_address = Some(ORACLE);
        Ok(outcome)
    }

    async fn send(&self, from: &PrivateKeySigner, contract: Address, call: OracleCall) -> BenchResult<TxOutcome> {
        tokio::task::yield_now().await;
        let from = from.address();
        let gas = match call {
            OracleCall::Register => REGISTER_GAS,
            OracleCall::UpdatePrice(_) => {
                let mut state = self.state.lock();
                let n = state.updates.entry(from).or_default();
                let gas = update_gas(*n);
                *n += 1;
                gas
            }
            OracleCall::Finalize => FINALIZE_GAS,
        };
        let outcome = self.mine(from, gas, U256::ZERO, Some(contract))?;
        tokio::task::yield_now().await;

        let mut state = self.state.lock();
        match call {
            OracleCall::Register if self.ignored_registrations.contains(&from) => {}
            OracleCall::Register => {
                let id = U256::from(state.providers.len() + 1);
                state.providers.insert(from, DataProviderState { id, temp_price: U256::ZERO });
            }
            OracleCall::UpdatePrice(price) => {
                state.providers.entry(from).or_default().temp_price = price;
            }
            OracleCall::Finalize => {
                let count = state.providers.len();
                if count > 0 {
                    let sum: U256 = state.providers.values().map(|p| p.temp_price).sum();
                    state.price = sum / U256::from(count);
                }
            }
        }
        Ok(outcome)
    }

    async fn transfer(&self, from: &PrivateKeySigner, to: Address, value: U256) -> BenchResult<TxOutcome> {
        tokio::task::yield_now().await;
        if self.failing_transfers.contains(&to) {
            return Err(BenchError::rpc("nonce too low"));
        }
        self.mine(from.address(), TRANSFER_GAS, value, Some(to))
    }

    async fn balance(&self, address: Address) -> BenchResult<U256> {
        tokio::task::yield_now().await;
        Ok(self.balance_of(address))
    }

    async fn gas_price(&self) -> BenchResult<u128> {
        self.network_price.ok_or_else(|| BenchError::rpc("method eth_gasPrice not supported"))
    }

    async fn l1_gas_price(&self) -> BenchResult<Option<u128>> {
        Ok(self.l1_price)
    }

    async fn price(&self, _contract: Address) -> BenchResult<U256> {
        Ok(self.state.lock().price)
    }

    async fn provider_state(&self, _contract: Address, provider: Address) -> BenchResult<DataProviderState> {
        Ok(self.state_of(provider))
    }
}
