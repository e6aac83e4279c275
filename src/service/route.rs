use std::sync::Arc;

use alloy::primitives::{Address, U256};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{Json, ServerHandler, tool, tool_handler, tool_router};
use tracing::instrument;

use crate::config::RouterConfig;
use crate::quote::apply_slippage_bps;
use crate::repository::{EthereumRepository, TokenMetadata};
use crate::router::constants::{MSG_SENDER, NATIVE_CURRENCY};
use crate::router::{Hop, RoutePlanner, SwapExactInParams, swap_exact_in_commands};
use crate::service::types::{
    EncodeSwapRequest, EncodeSwapResponse, EncodeSwapResult, EncodedCommand, HopRequest,
    SimulateSwapRequest, SimulateSwapResponse, SimulateSwapResult,
};
use crate::service::utils::{
    format_balance, format_tag, parse_address, parse_hex_bytes, parse_raw_amount,
    slippage_to_bps,
};
use crate::service::{ServiceError, ServiceResult};

/// ETH decimals - Ethereum uses 18 decimal places (1 ETH = 10^18 wei)
const ETH_DECIMALS: u8 = 18;

pub struct RouteService {
    tool_router: ToolRouter<Self>,
    repository: Arc<dyn EthereumRepository>,
    router: RouterConfig,
}

// MCP Tool Layer
#[tool_router]
impl RouteService {
    pub fn new(repository: Arc<dyn EthereumRepository>, router: RouterConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            repository,
            router,
        }
    }

    #[instrument(skip(self))]
    #[tool(
        description = "Compile an exact-input swap path (mixing Uniswap v2, v3 and v4 pools) into Universal Router execute calldata"
    )]
    pub async fn encode_swap_exact_in(
        &self,
        Parameters(req): Parameters<EncodeSwapRequest>,
    ) -> Json<EncodeSwapResult> {
        match self.encode_swap_impl(&req) {
            Ok(response) => Json(EncodeSwapResult::Success(response)),
            Err(e) => {
                tracing::error!("Failed to encode swap: {e}");
                Json(EncodeSwapResult::Error { error: e })
            }
        }
    }

    #[instrument(skip(self))]
    #[tool(
        description = "Compile an exact-input swap path and simulate it against the Universal Router to estimate gas"
    )]
    pub async fn simulate_swap_exact_in(
        &self,
        Parameters(req): Parameters<SimulateSwapRequest>,
    ) -> Json<SimulateSwapResult> {
        match self.simulate_swap_impl(req).await {
            Ok(response) => Json(SimulateSwapResult::Success(response)),
            Err(e) => {
                tracing::error!("Failed to simulate swap: {e}");
                Json(SimulateSwapResult::Error { error: e })
            }
        }
    }
}

// Business Logic - Core implementation
impl RouteService {
    #[instrument(skip(self, req), err)]
    fn encode_swap_impl(&self, req: &EncodeSwapRequest) -> ServiceResult<EncodeSwapResponse> {
        let params = self.swap_params(req)?;
        let commands = swap_exact_in_commands(&params)?.finalize();
        let planner = RoutePlanner::create(&commands);

        let deadline_secs = req.deadline_secs.unwrap_or(self.router.deadline_secs);
        let deadline = u64::try_from(chrono::Utc::now().timestamp())
            .map_err(|e| ServiceError::InternalError(format!("Clock before epoch: {e}")))?
            .checked_add(deadline_secs)
            .ok_or_else(|| {
                ServiceError::InvalidAmount(format!("deadline_secs: {deadline_secs} is too large"))
            })?;

        let encoded = commands
            .iter()
            .zip(planner.inputs())
            .map(|(command, input)| {
                let command_type = command.command_type();
                EncodedCommand {
                    name: command_type.name().to_string(),
                    command_type: format_tag(command_type.tag()),
                    input: input.to_string(),
                }
            })
            .collect();

        let value = if params.currency_in == NATIVE_CURRENCY {
            params.amount_in
        } else {
            U256::ZERO
        };

        tracing::info!(
            "Encoded {} commands for {} -> {}",
            planner.len(),
            params.currency_in,
            params.currency_out
        );

        Ok(EncodeSwapResponse {
            router: self.router.universal_router.to_string(),
            commands: encoded,
            command_bytes: planner.commands().to_string(),
            inputs: planner.inputs().iter().map(ToString::to_string).collect(),
            calldata: planner.encode_execute(U256::from(deadline)).to_string(),
            value: value.to_string(),
            deadline,
            amount_out_minimum: params.amount_out_minimum.to_string(),
        })
    }

    #[instrument(skip(self), err)]
    async fn simulate_swap_impl(
        &self,
        req: SimulateSwapRequest,
    ) -> ServiceResult<SimulateSwapResponse> {
        let from = match req.from.as_deref() {
            Some(from) => parse_address("from", from)?,
            None => self.repository.wallet_address().ok_or_else(|| {
                ServiceError::InvalidAddress(
                    "from is required when no wallet is configured".to_string(),
                )
            })?,
        };

        let transaction = self.encode_swap_impl(&req.swap)?;

        let calldata = transaction
            .calldata
            .parse()
            .map_err(|e| ServiceError::InternalError(format!("Bad calldata: {e}")))?;
        let value = parse_raw_amount("value", &transaction.value)?;

        let gas = self
            .repository
            .estimate_execute_gas(from, self.router.universal_router, calldata, value)
            .await?;
        let (estimated_gas, estimated_gas_eth) = self.format_gas_cost(gas).await?;

        let currency_out = parse_address("currency_out", &req.swap.currency_out)?;
        let metadata = self.output_metadata(currency_out).await?;
        let minimum = parse_raw_amount("amount_out_minimum", &transaction.amount_out_minimum)?;

        tracing::info!(
            "Simulated swap from {from}: gas={}, min_out={} {}",
            estimated_gas,
            format_balance(minimum, metadata.decimals),
            metadata.symbol
        );

        Ok(SimulateSwapResponse {
            from: from.to_string(),
            estimated_gas,
            estimated_gas_eth,
            minimum_output: format_balance(minimum, metadata.decimals),
            symbol: metadata.symbol,
            transaction,
        })
    }

    fn swap_params(&self, req: &EncodeSwapRequest) -> ServiceResult<SwapExactInParams> {
        let path = req
            .path
            .iter()
            .map(parse_hop)
            .collect::<ServiceResult<Vec<_>>>()?;

        let recipient = match req.recipient.as_deref() {
            Some(recipient) => parse_address("recipient", recipient)?,
            None => MSG_SENDER,
        };

        Ok(SwapExactInParams {
            weth: self.router.weth,
            currency_in: parse_address("currency_in", &req.currency_in)?,
            currency_out: parse_address("currency_out", &req.currency_out)?,
            path,
            amount_in: parse_raw_amount("amount_in", &req.amount_in)?,
            amount_out_minimum: resolve_amount_out_minimum(req)?,
            recipient,
        })
    }

    async fn output_metadata(&self, currency: Address) -> ServiceResult<TokenMetadata> {
        if currency == NATIVE_CURRENCY {
            return Ok(TokenMetadata {
                decimals: ETH_DECIMALS,
                symbol: "ETH".to_string(),
            });
        }
        Ok(self.repository.get_token_metadata(currency).await?)
    }

    /// Format gas cost with current gas price
    #[instrument(skip(self), err)]
    async fn format_gas_cost(&self, gas: u64) -> ServiceResult<(String, String)> {
        let gas_price = self.repository.get_gas_price().await?;
        let gas_cost_wei = U256::from(gas) * U256::from(gas_price);
        let gas_cost = format_balance(gas_cost_wei, ETH_DECIMALS);
        Ok((gas.to_string(), gas_cost))
    }
}

fn parse_hop(hop: &HopRequest) -> ServiceResult<Hop> {
    let currency = parse_address("path.currency", &hop.currency)?;
    let protocol = hop.protocol.to_lowercase();

    let parsed = match protocol.as_str() {
        "v2" => Hop::v2(currency),
        "v3" => Hop::v3(currency, require_fee(hop)?),
        "v4" => {
            let tick_spacing = hop.tick_spacing.ok_or_else(|| {
                ServiceError::InvalidPath(format!("v4 hop to {currency} needs tick_spacing"))
            })?;
            let hooks = match hop.hooks.as_deref() {
                Some(hooks) => parse_address("path.hooks", hooks)?,
                None => Address::ZERO,
            };
            Hop::v4(currency, require_fee(hop)?, tick_spacing, hooks)
        }
        other => {
            return Err(ServiceError::InvalidPath(format!(
                "Invalid protocol: {other}. Must be 'v2', 'v3' or 'v4'"
            )));
        }
    };

    match hop.hook_data.as_deref() {
        Some(data) => Ok(parsed.with_hook_data(parse_hex_bytes("path.hook_data", data)?)),
        None => Ok(parsed),
    }
}

fn require_fee(hop: &HopRequest) -> ServiceResult<u32> {
    hop.fee.ok_or_else(|| {
        ServiceError::InvalidPath(format!(
            "{} hop to {} needs a fee tier",
            hop.protocol, hop.currency
        ))
    })
}

/// An explicit minimum wins; otherwise the quoted output is reduced by the slippage tolerance.
fn resolve_amount_out_minimum(req: &EncodeSwapRequest) -> ServiceResult<U256> {
    if let Some(minimum) = req.amount_out_minimum.as_deref() {
        return parse_raw_amount("amount_out_minimum", minimum);
    }

    let expected = req.expected_amount_out.as_deref().ok_or_else(|| {
        ServiceError::InvalidAmount(
            "either amount_out_minimum or expected_amount_out is required".to_string(),
        )
    })?;
    let expected = parse_raw_amount("expected_amount_out", expected)?;
    if expected.is_zero() {
        return Err(ServiceError::NoLiquidity);
    }

    let slippage = req.slippage_tolerance.as_deref().ok_or_else(|| {
        ServiceError::InvalidSlippage("slippage_tolerance is required with expected_amount_out".to_string())
    })?;
    Ok(apply_slippage_bps(expected, slippage_to_bps(slippage)?))
}

#[tool_handler]
impl ServerHandler for RouteService {}
