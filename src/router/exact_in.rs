use alloy::primitives::{Address, U256};
use tracing::instrument;

use crate::router::RouteResult;
use crate::router::builder::{CommandsBuilder, LegPosition};
use crate::router::encoder::encode_segment;
use crate::router::error::RouteError;
use crate::router::path::{Hop, same_asset};

/// Inputs of an exact-input route compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactInParams {
    /// Wrapped native token of the chain.
    pub weth: Address,
    pub currency_in: Address,
    pub currency_out: Address,
    pub path: Vec<Hop>,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
    pub recipient: Address,
}

/// Compiles an exact-input swap along `params.path` into router commands.
///
/// Contiguous hops of the same protocol version form one segment and become
/// one swap command. The returned builder holds the commands in execution
/// order together with a record of every flushed segment.
#[instrument(skip_all, fields(hops = params.path.len()), err)]
pub fn swap_exact_in_commands(params: &SwapExactInParams) -> RouteResult<CommandsBuilder> {
    let (first, rest) = params.path.split_first().ok_or(RouteError::EmptyPath)?;
    check_path_output(params)?;

    let mut builder = CommandsBuilder::new(params.currency_in, first.version());
    builder.push_hop(first.clone());

    let mut is_first_swap = true;
    for hop in rest {
        let version = hop.version();
        if version != builder.curr_version() {
            let position = LegPosition {
                is_first_swap,
                is_last_swap: false,
            };
            encode_segment(&mut builder, params, position)?;
            is_first_swap = false;
            builder.switch_version(version);
        }
        builder.push_hop(hop.clone());
    }

    let position = LegPosition {
        is_first_swap,
        is_last_swap: true,
    };
    encode_segment(&mut builder, params, position)?;

    tracing::debug!(
        commands = builder.commands().len(),
        segments = builder.segments().len(),
        "compiled exact-in route"
    );

    Ok(builder)
}

fn check_path_output(params: &SwapExactInParams) -> RouteResult<()> {
    let actual = params
        .path
        .last()
        .map(|hop| hop.intermediate_currency)
        .ok_or(RouteError::EmptyPath)?;

    if !same_asset(actual, params.currency_out, params.weth) {
        return Err(RouteError::InvalidPathOutput {
            expected: params.currency_out,
            actual,
        });
    }
    Ok(())
}
