use std::str::FromStr;
use std::sync::Arc;

use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::TransportError;
use async_trait::async_trait;
use tracing::instrument;

use super::error::RepositoryError;
use crate::repository::contract::IERC20;
use crate::repository::{EthereumRepository, RepoResult};

#[derive(Debug, Clone)]
pub struct TokenMetadata {
    pub decimals: u8,
    pub symbol: String,
}

pub struct AlloyEthereumRepository<P> {
    provider: Arc<P>,
    wallet: Option<EthereumWallet>,
}

impl<P: Provider + Clone + 'static> AlloyEthereumRepository<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            wallet: None,
        }
    }

    pub fn new_with_wallet(provider: Arc<P>, private_key: &str) -> Result<Self, RepositoryError> {
        let signer = PrivateKeySigner::from_str(private_key)
            .map_err(|e| RepositoryError::ParseError(format!("Invalid private key: {e}")))?;

        let wallet = EthereumWallet::from(signer);

        Ok(Self {
            provider,
            wallet: Some(wallet),
        })
    }
}

/// Reverts come back as JSON-RPC error responses; anything below that is the transport.
fn classify_transport_error(err: TransportError) -> RepositoryError {
    if err.is_error_resp() {
        RepositoryError::ContractError(err.to_string())
    } else if err.is_transport_error() {
        if err.to_string().contains("429") {
            tracing::warn!("Rate limited by RPC endpoint");
        }
        RepositoryError::NetworkError(err.to_string())
    } else {
        RepositoryError::RpcError(err.to_string())
    }
}

#[async_trait]
impl<P: Provider + Clone + Send + Sync + 'static> EthereumRepository
    for AlloyEthereumRepository<P>
{
    fn wallet_address(&self) -> Option<Address> {
        self.wallet.as_ref().map(|w| w.default_signer().address())
    }

    #[instrument(skip(self), err)]
    async fn get_gas_price(&self) -> RepoResult<u128> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| RepositoryError::RpcError(e.to_string()))
    }

    #[instrument(skip(self), err)]
    async fn get_token_metadata(&self, token: Address) -> RepoResult<TokenMetadata> {
        let contract = IERC20::new(token, self.provider.clone());

        let decimals = contract
            .decimals()
            .call()
            .await
            .map_err(|e| RepositoryError::ContractError(e.to_string()))?;

        let symbol = contract
            .symbol()
            .call()
            .await
            .map_err(|e| RepositoryError::ContractError(e.to_string()))?;

        Ok(TokenMetadata { decimals, symbol })
    }

    #[instrument(skip(self, calldata), fields(calldata_len = calldata.len()), err)]
    async fn estimate_execute_gas(
        &self,
        from: Address,
        router: Address,
        calldata: Bytes,
        value: U256,
    ) -> RepoResult<u64> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(router)
            .with_input(calldata)
            .with_value(value);

        // eth_call first so a revert reason is reported as such
        self.provider.call(tx.clone()).await.map_err(|e| {
            tracing::debug!("Execute simulation reverted: {}", e);
            classify_transport_error(e)
        })?;

        let gas_estimate = self
            .provider
            .estimate_gas(tx)
            .await
            .map_err(classify_transport_error)?;

        tracing::debug!("Execute gas estimate: {}", gas_estimate);
        Ok(gas_estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{Hop, RoutePlanner, RouterCommand};
    use alloy::providers::ProviderBuilder;
    use std::time::Duration;

    const VITALIK_ADDRESS: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
    const UNIVERSAL_ROUTER: &str = "0x66a9893cC07D91D95644AEDD05D03f95e1dBA8Af";
    const DAI_CONTRACT: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";
    const USDC_CONTRACT: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
    const INVALID_CONTRACT: &str = "0x0000000000000000000000000000000000000001";

    // Rate limiting delay between tests (in milliseconds)
    const TEST_DELAY_MS: u64 = 1000;

    const RPC_URL: &str = "https://eth.llamarpc.com";

    async fn rate_limit_delay() {
        tokio::time::sleep(Duration::from_millis(TEST_DELAY_MS)).await;
    }

    fn create_test_repository() -> AlloyEthereumRepository<impl Provider + Clone> {
        let rpc_url = std::env::var("RPC_URL").unwrap_or_else(|_| RPC_URL.to_string());

        let provider =
            ProviderBuilder::new().connect_http(rpc_url.parse().expect("Invalid RPC URL"));

        AlloyEthereumRepository::new(Arc::new(provider))
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_wallet_initialization_with_valid_key() {
        let provider =
            ProviderBuilder::new().connect_http(RPC_URL.parse().expect("Invalid RPC URL"));

        // Well-known development key, never funded on mainnet
        let test_private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

        let repo = AlloyEthereumRepository::new_with_wallet(Arc::new(provider), test_private_key)
            .expect("Failed to create repository with wallet");

        let expected_address = Address::from_str("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
            .expect("Invalid expected address");
        assert_eq!(repo.wallet_address(), Some(expected_address));
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_wallet_initialization_with_invalid_key() {
        let provider =
            ProviderBuilder::new().connect_http(RPC_URL.parse().expect("Invalid RPC URL"));

        let result = AlloyEthereumRepository::new_with_wallet(Arc::new(provider), "not_a_key");

        match result {
            Err(RepositoryError::ParseError(msg)) => {
                assert!(msg.contains("Invalid private key"));
            }
            Err(e) => panic!("Expected ParseError, got: {e:?}"),
            Ok(_) => panic!("Should fail with invalid private key"),
        }
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_repository_without_wallet() {
        let repo = create_test_repository();
        assert!(repo.wallet_address().is_none());
    }

    #[tokio::test]
    #[serial_test::serial]
    #[ignore]
    async fn test_get_gas_price() {
        rate_limit_delay().await;
        let repo = create_test_repository();

        let gas_price = repo.get_gas_price().await.expect("Failed to get gas price");

        assert!(gas_price > 0, "Expected positive gas price, got: {gas_price}");
        assert!(
            gas_price < 1_000_000_000_000,
            "Gas price seems unreasonably high: {gas_price}",
        );
    }

    #[tokio::test]
    #[serial_test::serial]
    #[ignore]
    async fn test_get_token_metadata_dai_should_work() {
        rate_limit_delay().await;
        let repo = create_test_repository();
        let dai = Address::from_str(DAI_CONTRACT).expect("Invalid address");

        let metadata = repo.get_token_metadata(dai).await.expect("metadata");
        assert_eq!(metadata.decimals, 18);
        assert_eq!(metadata.symbol, "DAI");
    }

    #[tokio::test]
    #[serial_test::serial]
    #[ignore]
    async fn test_get_token_metadata_invalid_contract_should_return_error() {
        rate_limit_delay().await;
        let repo = create_test_repository();
        let invalid = Address::from_str(INVALID_CONTRACT).expect("Invalid address");

        let result = repo.get_token_metadata(invalid).await;
        assert!(matches!(result, Err(RepositoryError::ContractError(_))));
    }

    #[tokio::test]
    #[serial_test::serial]
    #[ignore]
    async fn test_estimate_execute_gas_wrap_should_work() {
        rate_limit_delay().await;
        let repo = create_test_repository();
        let from = Address::from_str(VITALIK_ADDRESS).expect("Invalid address");
        let router = Address::from_str(UNIVERSAL_ROUTER).expect("Invalid address");
        let amount = U256::from(10u64).pow(U256::from(15u64));

        // wrap 0.001 ETH and send the WETH straight back to the caller
        let planner = RoutePlanner::create(&[RouterCommand::WrapEth {
            recipient: crate::router::constants::MSG_SENDER,
            amount,
        }]);

        let gas = repo
            .estimate_execute_gas(from, router, planner.encode_execute_without_deadline(), amount)
            .await
            .expect("wrap should simulate");
        assert!(gas > 21_000);
    }

    #[tokio::test]
    #[serial_test::serial]
    #[ignore]
    async fn test_estimate_execute_gas_without_funds_should_revert() {
        rate_limit_delay().await;
        let repo = create_test_repository();
        let router = Address::from_str(UNIVERSAL_ROUTER).expect("Invalid address");
        let usdc = Address::from_str(USDC_CONTRACT).expect("Invalid address");

        // the router holds no WETH, so spending its balance on a v3 swap reverts
        let params = crate::router::SwapExactInParams {
            weth: Address::from_str("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2").unwrap(),
            currency_in: crate::router::constants::NATIVE_CURRENCY,
            currency_out: usdc,
            path: vec![Hop::v3(usdc, 500)],
            amount_in: U256::from(10u64).pow(U256::from(18u64)),
            amount_out_minimum: U256::ZERO,
            recipient: crate::router::constants::MSG_SENDER,
        };
        let calldata = crate::router::swap_exact_in_commands(&params)
            .unwrap()
            .into_planner()
            .encode_execute_without_deadline();

        let result = repo
            .estimate_execute_gas(Address::repeat_byte(0x42), router, calldata, U256::ZERO)
            .await;
        assert!(result.is_err(), "Expected revert, got {result:?}");
    }
}
