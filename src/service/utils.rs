//! Parsing and formatting helpers between tool payloads and route types.

use std::str::FromStr;

use alloy::primitives::{Address, Bytes, U256};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::ServiceResult;
use super::error::ServiceError;

pub fn parse_address(field: &str, value: &str) -> ServiceResult<Address> {
    Address::from_str(value.trim())
        .map_err(|e| ServiceError::InvalidAddress(format!("{field}: {value} ({e})")))
}

/// Parse an amount in the token's smallest unit, decimal or `0x`-prefixed hex.
pub fn parse_raw_amount(field: &str, value: &str) -> ServiceResult<U256> {
    U256::from_str(value.trim())
        .map_err(|e| ServiceError::InvalidAmount(format!("{field}: {value} ({e})")))
}

pub fn parse_hex_bytes(field: &str, value: &str) -> ServiceResult<Bytes> {
    Bytes::from_str(value.trim())
        .map_err(|e| ServiceError::InvalidPath(format!("{field}: {value} ({e})")))
}

/// Convert a slippage percentage (e.g. "0.5" for 0.5%) into basis points.
///
/// Precision below one basis point is truncated.
pub fn slippage_to_bps(slippage: &str) -> ServiceResult<u32> {
    let percent = Decimal::from_str(slippage.trim())
        .map_err(|e| ServiceError::InvalidSlippage(format!("{slippage} ({e})")))?;

    if percent.is_sign_negative() || percent > Decimal::from(100) {
        return Err(ServiceError::InvalidSlippage(format!(
            "{slippage} is not between 0 and 100"
        )));
    }

    (percent * Decimal::from(100))
        .trunc()
        .to_u32()
        .ok_or_else(|| ServiceError::InvalidSlippage(slippage.to_string()))
}

/// Format a balance from its smallest unit to a human-readable string
///
/// # Arguments
/// * `balance` - Balance in smallest unit (e.g., wei for ETH)
/// * `decimals` - Number of decimal places for the token
///
/// # Returns
/// Formatted balance as string with trailing zeros removed
pub fn format_balance(balance: U256, decimals: u8) -> String {
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = balance / divisor;
    let remainder = balance % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_part = remainder.to_string();
        let padded = format!("{:0>width$}", decimal_part, width = decimals as usize);
        let trimmed = padded.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{trimmed}")
        }
    }
}

/// `0x`-prefixed lowercase hex of a single command byte.
pub fn format_tag(tag: u8) -> String {
    format!("0x{tag:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_amount_should_accept_decimal_and_hex() {
        assert_eq!(
            parse_raw_amount("amount_in", "1500000000000000000").unwrap(),
            U256::from(1_500_000_000_000_000_000u64)
        );
        assert_eq!(parse_raw_amount("amount_in", "0x10").unwrap(), U256::from(16u64));
    }

    #[test]
    fn test_parse_raw_amount_should_reject_human_amounts() {
        let err = parse_raw_amount("amount_in", "1.5").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidAmount(msg) if msg.contains("amount_in")));
    }

    #[test]
    fn test_parse_address_should_fail_on_garbage() {
        assert!(matches!(
            parse_address("recipient", "invalid_address"),
            Err(ServiceError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_slippage_to_bps_should_work() {
        assert_eq!(slippage_to_bps("0.5").unwrap(), 50);
        assert_eq!(slippage_to_bps("2").unwrap(), 200);
        assert_eq!(slippage_to_bps("0.015").unwrap(), 1);
        assert_eq!(slippage_to_bps("100").unwrap(), 10_000);
    }

    #[test]
    fn test_slippage_to_bps_should_reject_out_of_range() {
        assert!(matches!(
            slippage_to_bps("-1"),
            Err(ServiceError::InvalidSlippage(_))
        ));
        assert!(matches!(
            slippage_to_bps("150"),
            Err(ServiceError::InvalidSlippage(_))
        ));
        assert!(matches!(
            slippage_to_bps("abc"),
            Err(ServiceError::InvalidSlippage(_))
        ));
    }

    #[test]
    fn test_format_balance_eth_should_work() {
        let wei = U256::from_str("1500000000000000000").unwrap();
        assert_eq!(format_balance(wei, 18), "1.5");
    }

    #[test]
    fn test_format_balance_usdc_should_work() {
        assert_eq!(format_balance(U256::from(100500000u64), 6), "100.5");
    }

    #[test]
    fn test_format_balance_whole_number_should_work() {
        let wei = U256::from_str("1000000000000000000").unwrap();
        assert_eq!(format_balance(wei, 18), "1");
    }

    #[test]
    fn test_format_tag_should_pad() {
        assert_eq!(format_tag(0x0b), "0x0b");
        assert_eq!(format_tag(0x10), "0x10");
    }
}
