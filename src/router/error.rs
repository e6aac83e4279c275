use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::router::command::CommandType;
use crate::router::path::ProtocolVersion;

/// Failures while compiling a route into router commands.
///
/// Every variant is deterministic: the same inputs always fail the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Swap path must contain at least one hop")]
    EmptyPath,

    /// The last hop does not end in the requested output currency (or its wrapped counterpart).
    #[error("Invalid path output: expected {expected}, path ends in {actual}")]
    InvalidPathOutput { expected: Address, actual: Address },

    /// An encoder was handed a builder tracking another protocol version.
    #[error("Invalid protocol version: expected {expected}, builder is on {actual}")]
    InvalidProtocolVersion {
        expected: ProtocolVersion,
        actual: ProtocolVersion,
    },

    #[error("Command {0} cannot be marked as allow-revert")]
    InvalidRevertibleCommand(CommandType),

    #[error("Amount {value} for {field} does not fit in uint128")]
    AmountOverflow { field: &'static str, value: U256 },

    #[error("Tick spacing {0} does not fit in int24")]
    InvalidTickSpacing(i32),

    #[error("Fee {0} does not fit in uint24")]
    InvalidFee(u32),

    #[error("Quote has no liquidity")]
    NoLiquidity,
}
