//! Swap path model: hops, protocol tags and the per-protocol path encodings.

use std::fmt;

use alloy::primitives::{
    Address, Bytes,
    aliases::{I24, U24},
};

use crate::router::RouteResult;
use crate::router::constants::{NATIVE_CURRENCY, V2_HOOKS_SENTINEL, V3_HOOKS_SENTINEL};
use crate::router::contract::{PathKey, PoolKey};
use crate::router::error::RouteError;

/// Generation of the exchange a hop (or a run of hops) settles on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProtocolVersion {
    V2,
    V3,
    V4,
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVersion::V2 => f.write_str("v2"),
            ProtocolVersion::V3 => f.write_str("v3"),
            ProtocolVersion::V4 => f.write_str("v4"),
        }
    }
}

/// Protocol a hop belongs to. v4 hops carry their hook contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HopProtocol {
    V2,
    V3,
    V4 { hooks: Address },
}

impl HopProtocol {
    /// Decodes the hook-slot tagging used by quoters: `0x…02` is v2, `0x…03` is v3,
    /// anything else is a v4 pool with that hook contract.
    pub fn from_hooks(hooks: Address) -> Self {
        if hooks == V2_HOOKS_SENTINEL {
            HopProtocol::V2
        } else if hooks == V3_HOOKS_SENTINEL {
            HopProtocol::V3
        } else {
            HopProtocol::V4 { hooks }
        }
    }

    /// Inverse of [`HopProtocol::from_hooks`].
    pub fn hooks(&self) -> Address {
        match self {
            HopProtocol::V2 => V2_HOOKS_SENTINEL,
            HopProtocol::V3 => V3_HOOKS_SENTINEL,
            HopProtocol::V4 { hooks } => *hooks,
        }
    }

    pub fn version(&self) -> ProtocolVersion {
        match self {
            HopProtocol::V2 => ProtocolVersion::V2,
            HopProtocol::V3 => ProtocolVersion::V3,
            HopProtocol::V4 { .. } => ProtocolVersion::V4,
        }
    }
}

/// One edge of a swap path: the currency reached and the pool used to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub intermediate_currency: Address,
    /// Fee tier in hundredths of a bip. Ignored for v2.
    pub fee: u32,
    /// Ignored for v2 and v3.
    pub tick_spacing: i32,
    pub protocol: HopProtocol,
    /// Passed to the v4 hook; ignored for v2 and v3.
    pub hook_data: Bytes,
}

impl Hop {
    pub fn v2(intermediate_currency: Address) -> Self {
        Self {
            intermediate_currency,
            fee: 0,
            tick_spacing: 0,
            protocol: HopProtocol::V2,
            hook_data: Bytes::new(),
        }
    }

    pub fn v3(intermediate_currency: Address, fee: u32) -> Self {
        Self {
            intermediate_currency,
            fee,
            tick_spacing: 0,
            protocol: HopProtocol::V3,
            hook_data: Bytes::new(),
        }
    }

    pub fn v4(intermediate_currency: Address, fee: u32, tick_spacing: i32, hooks: Address) -> Self {
        Self {
            intermediate_currency,
            fee,
            tick_spacing,
            protocol: HopProtocol::V4 { hooks },
            hook_data: Bytes::new(),
        }
    }

    pub fn with_hook_data(mut self, hook_data: Bytes) -> Self {
        self.hook_data = hook_data;
        self
    }

    pub fn version(&self) -> ProtocolVersion {
        self.protocol.version()
    }

    /// Reads a quoter path key, where the hook slot doubles as the protocol tag.
    pub fn from_path_key(key: &PathKey) -> Self {
        Self {
            intermediate_currency: key.intermediateCurrency,
            fee: key.fee.to::<u32>(),
            tick_spacing: key.tickSpacing.as_i32(),
            protocol: HopProtocol::from_hooks(key.hooks),
            hook_data: key.hookData.clone(),
        }
    }

    pub fn to_path_key(&self) -> RouteResult<PathKey> {
        Ok(PathKey {
            intermediateCurrency: self.intermediate_currency,
            fee: fee_u24(self.fee)?,
            tickSpacing: tick_spacing_i24(self.tick_spacing)?,
            hooks: self.protocol.hooks(),
            hookData: self.hook_data.clone(),
        })
    }
}

fn fee_u24(fee: u32) -> RouteResult<U24> {
    U24::try_from(fee).map_err(|_| RouteError::InvalidFee(fee))
}

fn tick_spacing_i24(tick_spacing: i32) -> RouteResult<I24> {
    I24::try_from(tick_spacing).map_err(|_| RouteError::InvalidTickSpacing(tick_spacing))
}

/// Maps the native currency to its wrapped token; other currencies pass through.
pub fn wrapped(currency: Address, weth: Address) -> Address {
    if currency == NATIVE_CURRENCY {
        weth
    } else {
        currency
    }
}

/// True when both currencies are the same asset, treating native and `weth` as equal.
pub fn same_asset(a: Address, b: Address, weth: Address) -> bool {
    wrapped(a, weth) == wrapped(b, weth)
}

/// Plain token list for a v2 swap: `[currency_in, hop0, hop1, ...]`.
pub fn encode_v2_path(currency_in: Address, hops: &[Hop], weth: Address) -> Vec<Address> {
    std::iter::once(wrapped(currency_in, weth))
        .chain(hops.iter().map(|hop| wrapped(hop.intermediate_currency, weth)))
        .collect()
}

/// Packed v3 path: `currency (20 bytes) | fee (3 bytes) | currency (20 bytes) | ...`.
pub fn encode_v3_path(currency_in: Address, hops: &[Hop], weth: Address) -> RouteResult<Bytes> {
    let mut path = Vec::with_capacity(20 + hops.len() * 23);
    path.extend_from_slice(wrapped(currency_in, weth).as_slice());

    for hop in hops {
        if hop.fee > 0x00ff_ffff {
            return Err(RouteError::InvalidFee(hop.fee));
        }
        path.extend_from_slice(&hop.fee.to_be_bytes()[1..]);
        path.extend_from_slice(wrapped(hop.intermediate_currency, weth).as_slice());
    }

    Ok(path.into())
}

/// Pool key for a single v4 hop, with `zeroForOne` derived from the sorted currencies.
pub fn pool_key(currency_in: Address, hop: &Hop) -> RouteResult<(PoolKey, bool)> {
    let currency_out = hop.intermediate_currency;
    let zero_for_one = currency_in < currency_out;
    let (currency0, currency1) = if zero_for_one {
        (currency_in, currency_out)
    } else {
        (currency_out, currency_in)
    };

    let key = PoolKey {
        currency0,
        currency1,
        fee: fee_u24(hop.fee)?,
        tickSpacing: tick_spacing_i24(hop.tick_spacing)?,
        hooks: hop.protocol.hooks(),
    };

    Ok((key, zero_for_one))
}
