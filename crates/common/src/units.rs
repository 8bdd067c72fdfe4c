//! Conversions between wei and the display units used in reports.

use alloy_primitives::{
    I256, U256,
    utils::{ParseUnits, UnitsError, format_units, parse_ether as parse_ether_units},
};

/// Formats a wei amount as ether.
///
/// Accepts both unsigned totals and signed balance differences.
pub fn format_ether<T: Into<ParseUnits>>(amount: T) -> String {
    alloy_primitives::utils::format_ether(amount)
}

/// Formats a wei amount as gwei, the unit gas prices are quoted in.
pub fn format_gwei<T: Into<ParseUnits>>(amount: T) -> String {
    format_units(amount, "gwei").unwrap_or_default()
}

/// Parses an ether amount such as `0.01` or `.004` into wei.
pub fn parse_ether(amount: &str) -> Result<U256, UnitsError> {
    let amount = amount.trim();
    if amount.starts_with('.') {
        parse_ether_units(&format!("0{amount}"))
    } else {
        parse_ether_units(amount)
    }
}

/// Signed difference `before - after` of two balances.
///
/// Positive when the wallet spent funds, negative when it received some.
pub fn balance_delta(before: U256, after: U256) -> I256 {
    if before >= after {
        I256::from_raw(before - after)
    } else {
        -I256::from_raw(after - before)
    }
}
