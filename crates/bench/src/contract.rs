//! Interface of the `SimpleOracle` contract.

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::{SolCall, sol};
use std::fmt;

sol! {
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    interface ISimpleOracle {
        function registerDataProvider() external;
        function updatePrice(uint256 _price) external;
        function finalizePrice() external;
        function getPrice() external view returns (uint256);
        function dataProviders(address provider) external view returns (uint256 id, uint256 tempPrice);
    }
}

/// A state changing call to the oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OracleCall {
    /// `registerDataProvider()`, sent once by each data provider.
    Register,
    /// `updatePrice(uint256)`, sent repeatedly by each data provider.
    UpdatePrice(U256),
    /// `finalizePrice()`, sent once by the owner.
    Finalize,
}

impl OracleCall {
    pub fn calldata(&self) -> Bytes {
        match *self {
            Self::Register => ISimpleOracle::registerDataProviderCall {}.abi_encode(),
            Self::UpdatePrice(price) => ISimpleOracle::updatePriceCall { _price: price }.abi_encode(),
            Self::Finalize => ISimpleOracle::finalizePriceCall {}.abi_encode(),
        }
        .into()
    }
}

impl fmt::Display for OracleCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register => f.write_str("registerDataProvider()"),
            Self::UpdatePrice(price) => write!(f, "updatePrice({price})"),
            Self::Finalize => f.write_str("finalizePrice()"),
        }
    }
}

/// On-chain record of a registered data provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DataProviderState {
    /// Registration id, zero if the address never registered.
    pub id: U256,
    /// Last submitted price.
    pub temp_price: U256,
}

pub fn get_price_calldata() -> Bytes {
    ISimpleOracle::getPriceCall {}.abi_encode().into()
}

pub fn decode_price(data: &[u8]) -> Result<U256, alloy_sol_types::Error> {
    ISimpleOracle::getPriceCall::abi_decode_returns(data)
}

pub fn data_providers_calldata(provider: alloy_primitives::Address) -> Bytes {
    ISimpleOracle::dataProvidersCall { provider }.abi_encode().into()
}

pub fn decode_data_provider(data: &[u8]) -> Result<DataProviderState, alloy_sol_types::Error> {
    let ret = ISimpleOracle::dataProvidersCall::abi_decode_returns(data)?;
    Ok(DataProviderState { id: ret.id, temp_price: ret.tempPrice })
}
