pub mod alloy;
pub mod contract;
pub mod error;

use ::alloy::primitives::{Address, Bytes, U256};
pub use alloy::{AlloyEthereumRepository, TokenMetadata};
use async_trait::async_trait;
pub use error::RepositoryError;

pub(crate) type RepoResult<T> = std::result::Result<T, RepositoryError>;

/// Trait for the chain access the route service needs.
///
/// Route compilation itself never touches the chain; this abstraction only
/// backs simulation and formatting, and lets tests swap in a mock.
#[async_trait]
pub trait EthereumRepository: Send + Sync {
    /// Address of the configured signer, if the repository was built with one.
    fn wallet_address(&self) -> Option<Address>;

    /// Retrieves the current gas price from the network.
    ///
    /// # Returns
    ///
    /// * `Ok(u128)` - The current gas price in wei
    /// * `Err(RepositoryError)` - If the RPC call fails or network error occurs
    async fn get_gas_price(&self) -> RepoResult<u128>;

    /// Retrieves metadata for an ERC20 token contract.
    ///
    /// # Arguments
    ///
    /// * `token` - The ERC20 token contract address
    ///
    /// # Returns
    ///
    /// * `Ok(TokenMetadata)` - Contains decimals and symbol
    /// * `Err(RepositoryError)` - If the contract call fails or the address is not a valid ERC20 contract
    async fn get_token_metadata(&self, token: Address) -> RepoResult<TokenMetadata>;

    /// Dry-runs a Universal Router `execute` call and estimates its gas.
    ///
    /// The call is first executed with `eth_call` so that a revert surfaces as
    /// [`RepositoryError::ContractError`] instead of a bare estimation failure.
    ///
    /// # Arguments
    ///
    /// * `from` - The sender address
    /// * `router` - The Universal Router address
    /// * `calldata` - ABI-encoded `execute` call
    /// * `value` - Native currency attached to the call
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let gas = repository.estimate_execute_gas(wallet, router, calldata, U256::ZERO).await?;
    /// println!("Estimated gas: {}", gas);
    /// ```
    async fn estimate_execute_gas(
        &self,
        from: Address,
        router: Address,
        calldata: Bytes,
        value: U256,
    ) -> RepoResult<u64>;
}
