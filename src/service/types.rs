use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::service::ServiceError;

// Response types that include error handling
#[derive(Debug, JsonSchema, Serialize)]
#[serde(untagged)]
pub enum EncodeSwapResult {
    Success(EncodeSwapResponse),
    Error { error: ServiceError },
}

#[derive(Debug, JsonSchema, Serialize)]
#[serde(untagged)]
pub enum SimulateSwapResult {
    Success(SimulateSwapResponse),
    Error { error: ServiceError },
}

/// One hop of a swap path.
#[derive(Debug, Clone, JsonSchema, Serialize, Deserialize)]
pub struct HopRequest {
    /// Currency reached by this hop. Use the zero address for native ETH
    pub currency: String,

    /// Pool protocol: "v2", "v3" or "v4"
    pub protocol: String,

    /// Fee tier in hundredths of a bip (e.g., 3000 for 0.3%). Required for v3 and v4
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<u32>,

    /// Tick spacing of the v4 pool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_spacing: Option<i32>,

    /// Hook contract of the v4 pool (defaults to no hooks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<String>,

    /// Hex-encoded data passed to the v4 hook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_data: Option<String>,
}

#[derive(Debug, Clone, JsonSchema, Serialize, Deserialize)]
pub struct EncodeSwapRequest {
    /// Input currency address. Use the zero address for native ETH
    pub currency_in: String,

    /// Output currency address. Use the zero address for native ETH
    pub currency_out: String,

    /// Ordered hops from `currency_in` to `currency_out`
    pub path: Vec<HopRequest>,

    /// Exact input amount in the smallest unit (e.g., wei)
    pub amount_in: String,

    /// Minimum output in the smallest unit. Takes precedence over `expected_amount_out`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_out_minimum: Option<String>,

    /// Quoted output in the smallest unit, reduced by `slippage_tolerance`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_amount_out: Option<String>,

    /// Slippage tolerance in percentage (e.g., "0.5" for 0.5%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slippage_tolerance: Option<String>,

    /// Receiver of the output (defaults to the transaction sender)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    /// Seconds until the call expires (defaults to the server configuration)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_secs: Option<u64>,
}

#[derive(Debug, JsonSchema, Serialize)]
pub struct EncodedCommand {
    /// Command name (e.g., "V3_SWAP_EXACT_IN")
    pub name: String,
    /// Command byte as hex
    pub command_type: String,
    /// ABI-encoded command input
    pub input: String,
}

#[derive(Debug, JsonSchema, Serialize)]
pub struct EncodeSwapResponse {
    /// Universal Router the calldata targets
    pub router: String,

    /// Commands in execution order
    pub commands: Vec<EncodedCommand>,

    /// The `commands` argument of `execute`
    pub command_bytes: String,

    /// The `inputs` argument of `execute`
    pub inputs: Vec<String>,

    /// Full `execute(bytes,bytes[],uint256)` calldata
    pub calldata: String,

    /// Native value to attach to the transaction, in wei
    pub value: String,

    /// Unix timestamp after which the call reverts
    pub deadline: u64,

    /// Minimum output enforced by the route, in the smallest unit
    pub amount_out_minimum: String,
}

#[derive(Debug, Clone, JsonSchema, Serialize, Deserialize)]
pub struct SimulateSwapRequest {
    #[serde(flatten)]
    pub swap: EncodeSwapRequest,

    /// Sender of the simulated call (defaults to the configured wallet)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

#[derive(Debug, JsonSchema, Serialize)]
pub struct SimulateSwapResponse {
    /// Sender used for the simulation
    pub from: String,

    /// Estimated gas units
    pub estimated_gas: String,

    /// Estimated gas cost in ETH
    pub estimated_gas_eth: String,

    /// Minimum output formatted with the output token decimals
    pub minimum_output: String,

    /// Output token symbol
    pub symbol: String,

    /// The simulated transaction
    pub transaction: EncodeSwapResponse,
}
