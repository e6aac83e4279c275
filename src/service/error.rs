use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::RepositoryError;
use crate::router::RouteError;

#[derive(Debug, Clone, Error, JsonSchema, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ServiceError {
    // Request validation errors
    /// An address field is invalid or malformed.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// An amount is malformed or out of range.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A hop of the requested path cannot be understood.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The slippage tolerance is not a percentage between 0 and 100.
    #[error("Invalid slippage: {0}")]
    InvalidSlippage(String),

    // Route compilation errors
    /// The path could not be compiled into router commands.
    #[error("Route compilation failed: {0}")]
    RouteCompilationFailed(String),

    /// The quoted route has no output.
    #[error("No liquidity for the requested route")]
    NoLiquidity,

    /// The node rejected the compiled transaction.
    #[error("Swap simulation failed: {0}")]
    SimulationFailed(String),

    // Infrastructure errors (abstracted from repository layer)
    /// An error occurred while communicating with the blockchain.
    #[error("Blockchain connection error: {0}")]
    BlockchainError(String),

    /// An unexpected internal error occurred.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<RouteError> for ServiceError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::NoLiquidity => ServiceError::NoLiquidity,
            RouteError::AmountOverflow { .. } => ServiceError::InvalidAmount(err.to_string()),
            RouteError::InvalidFee(_) | RouteError::InvalidTickSpacing(_) => {
                ServiceError::InvalidPath(err.to_string())
            }
            other => ServiceError::RouteCompilationFailed(other.to_string()),
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::RpcError(msg) | RepositoryError::NetworkError(msg) => {
                ServiceError::BlockchainError(format!("Failed to interact with blockchain: {msg}"))
            }
            RepositoryError::ContractError(msg) => ServiceError::SimulationFailed(msg),
            RepositoryError::ParseError(msg) => ServiceError::InvalidAddress(msg),
            RepositoryError::Other(msg) => ServiceError::InternalError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, U256};

    use super::*;

    #[test]
    fn test_route_errors_should_map_to_service_errors() {
        let err: ServiceError = RouteError::EmptyPath.into();
        assert!(matches!(err, ServiceError::RouteCompilationFailed(_)));

        let err: ServiceError = RouteError::InvalidFee(0x1000000).into();
        assert!(matches!(err, ServiceError::InvalidPath(_)));

        let err: ServiceError = RouteError::AmountOverflow {
            field: "amount_in",
            value: U256::MAX,
        }
        .into();
        assert!(matches!(err, ServiceError::InvalidAmount(_)));

        let err: ServiceError = RouteError::InvalidPathOutput {
            expected: Address::ZERO,
            actual: Address::repeat_byte(0x11),
        }
        .into();
        assert!(err.to_string().contains("Route compilation failed"));
    }

    #[test]
    fn test_service_error_should_serialize_as_tagged_json() {
        let json = serde_json::to_value(ServiceError::InvalidSlippage("150".to_string())).unwrap();
        assert_eq!(json["type"], "InvalidSlippage");
        assert_eq!(json["message"], "150");

        let json = serde_json::to_value(ServiceError::from(RouteError::NoLiquidity)).unwrap();
        assert_eq!(json["type"], "NoLiquidity");
    }
}
