use std::fmt;

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolValue;

use crate::router::v4::V4Planner;

/// Command tags understood by the Universal Router.
///
/// These values are part of the router's binary interface and must never change.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    V3SwapExactIn = 0x00,
    Sweep = 0x04,
    Transfer = 0x05,
    PayPortion = 0x06,
    V2SwapExactIn = 0x08,
    WrapEth = 0x0b,
    UnwrapWeth = 0x0c,
    V4Swap = 0x10,
    ExecuteSubPlan = 0x21,
}

impl CommandType {
    /// High bit of a command byte: the router continues when this command reverts.
    pub const ALLOW_REVERT_FLAG: u8 = 0x80;

    /// Mask selecting the command tag out of a command byte.
    pub const COMMAND_TYPE_MASK: u8 = 0x3f;

    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Only sub-plans may be flagged allow-revert.
    pub fn is_revertible(self) -> bool {
        matches!(self, CommandType::ExecuteSubPlan)
    }

    pub fn name(self) -> &'static str {
        match self {
            CommandType::V3SwapExactIn => "V3_SWAP_EXACT_IN",
            CommandType::Sweep => "SWEEP",
            CommandType::Transfer => "TRANSFER",
            CommandType::PayPortion => "PAY_PORTION",
            CommandType::V2SwapExactIn => "V2_SWAP_EXACT_IN",
            CommandType::WrapEth => "WRAP_ETH",
            CommandType::UnwrapWeth => "UNWRAP_WETH",
            CommandType::V4Swap => "V4_SWAP",
            CommandType::ExecuteSubPlan => "EXECUTE_SUB_PLAN",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for CommandType {
    type Error = u8;

    /// Decodes a command byte, ignoring the allow-revert flag.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value & Self::COMMAND_TYPE_MASK {
            0x00 => Ok(CommandType::V3SwapExactIn),
            0x04 => Ok(CommandType::Sweep),
            0x05 => Ok(CommandType::Transfer),
            0x06 => Ok(CommandType::PayPortion),
            0x08 => Ok(CommandType::V2SwapExactIn),
            0x0b => Ok(CommandType::WrapEth),
            0x0c => Ok(CommandType::UnwrapWeth),
            0x10 => Ok(CommandType::V4Swap),
            0x21 => Ok(CommandType::ExecuteSubPlan),
            _ => Err(value),
        }
    }
}

/// A single router instruction together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterCommand {
    V3SwapExactIn {
        recipient: Address,
        amount_in: U256,
        amount_out_min: U256,
        path: Bytes,
        payer_is_user: bool,
    },
    V2SwapExactIn {
        recipient: Address,
        amount_in: U256,
        amount_out_min: U256,
        path: Vec<Address>,
        payer_is_user: bool,
    },
    WrapEth {
        recipient: Address,
        amount: U256,
    },
    UnwrapWeth {
        recipient: Address,
        amount_min: U256,
    },
    Sweep {
        token: Address,
        recipient: Address,
        amount_min: U256,
    },
    Transfer {
        token: Address,
        recipient: Address,
        value: U256,
    },
    PayPortion {
        token: Address,
        recipient: Address,
        bips: U256,
    },
    V4Swap(V4Planner),
    ExecuteSubPlan {
        commands: Bytes,
        inputs: Vec<Bytes>,
    },
}

impl RouterCommand {
    pub fn command_type(&self) -> CommandType {
        match self {
            RouterCommand::V3SwapExactIn { .. } => CommandType::V3SwapExactIn,
            RouterCommand::V2SwapExactIn { .. } => CommandType::V2SwapExactIn,
            RouterCommand::WrapEth { .. } => CommandType::WrapEth,
            RouterCommand::UnwrapWeth { .. } => CommandType::UnwrapWeth,
            RouterCommand::Sweep { .. } => CommandType::Sweep,
            RouterCommand::Transfer { .. } => CommandType::Transfer,
            RouterCommand::PayPortion { .. } => CommandType::PayPortion,
            RouterCommand::V4Swap(_) => CommandType::V4Swap,
            RouterCommand::ExecuteSubPlan { .. } => CommandType::ExecuteSubPlan,
        }
    }

    /// ABI-encodes the parameters the way the router decodes them for this command type.
    pub fn encode_input(&self) -> Bytes {
        let encoded = match self {
            RouterCommand::V3SwapExactIn {
                recipient,
                amount_in,
                amount_out_min,
                path,
                payer_is_user,
            } => (
                *recipient,
                *amount_in,
                *amount_out_min,
                path.clone(),
                *payer_is_user,
            )
                .abi_encode_params(),
            RouterCommand::V2SwapExactIn {
                recipient,
                amount_in,
                amount_out_min,
                path,
                payer_is_user,
            } => (
                *recipient,
                *amount_in,
                *amount_out_min,
                path.clone(),
                *payer_is_user,
            )
                .abi_encode_params(),
            RouterCommand::WrapEth { recipient, amount } => {
                (*recipient, *amount).abi_encode_params()
            }
            RouterCommand::UnwrapWeth {
                recipient,
                amount_min,
            } => (*recipient, *amount_min).abi_encode_params(),
            RouterCommand::Sweep {
                token,
                recipient,
                amount_min,
            } => (*token, *recipient, *amount_min).abi_encode_params(),
            RouterCommand::Transfer {
                token,
                recipient,
                value,
            } => (*token, *recipient, *value).abi_encode_params(),
            RouterCommand::PayPortion {
                token,
                recipient,
                bips,
            } => (*token, *recipient, *bips).abi_encode_params(),
            // Action plans arrive pre-encoded as (bytes actions, bytes[] params)
            RouterCommand::V4Swap(plan) => return plan.finalize(),
            RouterCommand::ExecuteSubPlan { commands, inputs } => {
                (commands.clone(), inputs.clone()).abi_encode_params()
            }
        };

        encoded.into()
    }
}
