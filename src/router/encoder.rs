//! Per-protocol segment encoders.
//!
//! Each encoder turns the builder's current segment into one swap command,
//! bracketed by whatever wrap/unwrap the protocol's native-currency convention
//! needs. v2 and v3 pools only hold wrapped native; v4 pools hold native.

use alloy::primitives::{Address, U256};

use crate::router::RouteResult;
use crate::router::builder::{CommandsBuilder, LegPosition};
use crate::router::command::RouterCommand;
use crate::router::constants::{ADDRESS_THIS, CONTRACT_BALANCE, NATIVE_CURRENCY, OPEN_DELTA};
use crate::router::contract::{ExactInputParams, ExactInputSingleParams};
use crate::router::error::RouteError;
use crate::router::exact_in::SwapExactInParams;
use crate::router::path::{Hop, ProtocolVersion, encode_v2_path, encode_v3_path, pool_key, wrapped};
use crate::router::v4::{V4Action, V4Planner};

/// Flushes the current segment through the encoder matching the builder's version.
pub fn encode_segment(
    builder: &mut CommandsBuilder,
    params: &SwapExactInParams,
    position: LegPosition,
) -> RouteResult<()> {
    match builder.curr_version() {
        ProtocolVersion::V2 => encode_v2_segment(builder, params, position),
        ProtocolVersion::V3 => encode_v3_segment(builder, params, position),
        ProtocolVersion::V4 => encode_v4_segment(builder, params, position),
    }
}

pub fn encode_v2_segment(
    builder: &mut CommandsBuilder,
    params: &SwapExactInParams,
    position: LegPosition,
) -> RouteResult<()> {
    expect_version(builder, ProtocolVersion::V2)?;
    let hops = take_hops(builder, position)?;
    let leg = open_classic_leg(builder, params, position);

    builder.push_command(RouterCommand::V2SwapExactIn {
        recipient: leg.recipient,
        amount_in: leg.amount_in,
        amount_out_min: leg.amount_out_min,
        path: encode_v2_path(leg.currency_in, &hops, params.weth),
        payer_is_user: leg.payer_is_user,
    });

    close_classic_leg(builder, params, &leg, &hops);
    Ok(())
}

pub fn encode_v3_segment(
    builder: &mut CommandsBuilder,
    params: &SwapExactInParams,
    position: LegPosition,
) -> RouteResult<()> {
    expect_version(builder, ProtocolVersion::V3)?;
    let hops = take_hops(builder, position)?;
    let leg = open_classic_leg(builder, params, position);

    builder.push_command(RouterCommand::V3SwapExactIn {
        recipient: leg.recipient,
        amount_in: leg.amount_in,
        amount_out_min: leg.amount_out_min,
        path: encode_v3_path(leg.currency_in, &hops, params.weth)?,
        payer_is_user: leg.payer_is_user,
    });

    close_classic_leg(builder, params, &leg, &hops);
    Ok(())
}

pub fn encode_v4_segment(
    builder: &mut CommandsBuilder,
    params: &SwapExactInParams,
    position: LegPosition,
) -> RouteResult<()> {
    expect_version(builder, ProtocolVersion::V4)?;
    let hops = take_hops(builder, position)?;

    let mut exact_input = position.is_first_swap;
    let currency_in = if builder.curr_currency_in() == params.weth {
        builder.push_command(RouterCommand::UnwrapWeth {
            recipient: ADDRESS_THIS,
            amount_min: U256::ZERO,
        });
        exact_input = false;
        NATIVE_CURRENCY
    } else {
        builder.curr_currency_in()
    };

    let currency_out = last_currency(&hops)?;
    let wrap_output = position.is_last_swap
        && params.currency_out == params.weth
        && currency_out == NATIVE_CURRENCY;
    let unwrap_output = position.is_last_swap
        && params.currency_out == NATIVE_CURRENCY
        && currency_out == params.weth;

    let payer_is_user = exact_input;
    let settle_amount = if exact_input {
        params.amount_in
    } else {
        CONTRACT_BALANCE
    };
    let amount_in = if exact_input {
        to_u128("amount_in", params.amount_in)?
    } else {
        OPEN_DELTA.to::<u128>()
    };
    let amount_out_minimum = if position.is_last_swap {
        to_u128("amount_out_minimum", params.amount_out_minimum)?
    } else {
        0
    };

    let mut plan = V4Planner::new();
    plan.add_action(V4Action::Settle {
        currency: currency_in,
        amount: settle_amount,
        payer_is_user,
    });

    if let [hop] = hops.as_slice() {
        let (pool_key, zero_for_one) = pool_key(currency_in, hop)?;
        plan.add_action(V4Action::SwapExactInSingle(ExactInputSingleParams {
            poolKey: pool_key,
            zeroForOne: zero_for_one,
            amountIn: amount_in,
            amountOutMinimum: amount_out_minimum,
            hookData: hop.hook_data.clone(),
        }));
    } else {
        let path = hops
            .iter()
            .map(Hop::to_path_key)
            .collect::<RouteResult<Vec<_>>>()?;
        plan.add_action(V4Action::SwapExactIn(ExactInputParams {
            currencyIn: currency_in,
            path,
            amountIn: amount_in,
            amountOutMinimum: amount_out_minimum,
        }));
    }

    if position.is_last_swap && !wrap_output && !unwrap_output {
        plan.add_action(V4Action::TakeAll {
            currency: currency_out,
            recipient: params.recipient,
            min_amount: params.amount_out_minimum,
        });
    } else {
        plan.add_action(V4Action::Take {
            currency: currency_out,
            recipient: ADDRESS_THIS,
            amount: OPEN_DELTA,
        });
    }

    builder.push_command(RouterCommand::V4Swap(plan));

    if wrap_output {
        builder.push_command(RouterCommand::WrapEth {
            recipient: params.recipient,
            amount: CONTRACT_BALANCE,
        });
    } else if unwrap_output {
        builder.push_command(RouterCommand::UnwrapWeth {
            recipient: params.recipient,
            amount_min: params.amount_out_minimum,
        });
    }

    builder.advance_currency_in(currency_out);
    Ok(())
}

/// Recipient, amounts and payer of a v2/v3 leg after any input wrap.
struct ClassicLeg {
    currency_in: Address,
    recipient: Address,
    amount_in: U256,
    amount_out_min: U256,
    payer_is_user: bool,
    unwrap_output: bool,
}

fn open_classic_leg(
    builder: &mut CommandsBuilder,
    params: &SwapExactInParams,
    position: LegPosition,
) -> ClassicLeg {
    let mut exact_input = position.is_first_swap;
    let currency_in = if builder.curr_currency_in() == NATIVE_CURRENCY {
        builder.push_command(RouterCommand::WrapEth {
            recipient: ADDRESS_THIS,
            amount: CONTRACT_BALANCE,
        });
        exact_input = false;
        params.weth
    } else {
        builder.curr_currency_in()
    };

    let unwrap_output = position.is_last_swap && params.currency_out == NATIVE_CURRENCY;
    let recipient = if position.is_last_swap && !unwrap_output {
        params.recipient
    } else {
        ADDRESS_THIS
    };

    ClassicLeg {
        currency_in,
        recipient,
        amount_in: if exact_input {
            params.amount_in
        } else {
            CONTRACT_BALANCE
        },
        amount_out_min: if position.is_last_swap {
            params.amount_out_minimum
        } else {
            U256::ZERO
        },
        payer_is_user: exact_input,
        unwrap_output,
    }
}

fn close_classic_leg(
    builder: &mut CommandsBuilder,
    params: &SwapExactInParams,
    leg: &ClassicLeg,
    hops: &[Hop],
) {
    if leg.unwrap_output {
        builder.push_command(RouterCommand::UnwrapWeth {
            recipient: params.recipient,
            amount_min: params.amount_out_minimum,
        });
    }

    // v2/v3 pools pay out the wrapped token even when the hop names native
    if let Some(hop) = hops.last() {
        builder.advance_currency_in(wrapped(hop.intermediate_currency, params.weth));
    }
}

fn expect_version(builder: &CommandsBuilder, expected: ProtocolVersion) -> RouteResult<()> {
    let actual = builder.curr_version();
    if actual != expected {
        return Err(RouteError::InvalidProtocolVersion { expected, actual });
    }
    Ok(())
}

fn take_hops(builder: &mut CommandsBuilder, position: LegPosition) -> RouteResult<Vec<Hop>> {
    if builder.curr_path().is_empty() {
        return Err(RouteError::EmptyPath);
    }

    let hops = builder.take_segment(position);
    tracing::debug!(
        version = %builder.curr_version(),
        hops = hops.len(),
        is_first_swap = position.is_first_swap,
        is_last_swap = position.is_last_swap,
        "encoding swap segment"
    );
    Ok(hops)
}

fn last_currency(hops: &[Hop]) -> RouteResult<Address> {
    hops.last()
        .map(|hop| hop.intermediate_currency)
        .ok_or(RouteError::EmptyPath)
}

fn to_u128(field: &'static str, value: U256) -> RouteResult<u128> {
    u128::try_from(value).map_err(|_| RouteError::AmountOverflow { field, value })
}
