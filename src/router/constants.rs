//! Sentinel values understood by the Universal Router and the v4 pool manager.

use alloy::primitives::{Address, U256, address};

/// Native currency as represented by v4 pools.
pub const NATIVE_CURRENCY: Address = Address::ZERO;

/// Recipient placeholder the router maps to `msg.sender`.
pub const MSG_SENDER: Address = address!("0x0000000000000000000000000000000000000001");

/// Recipient placeholder the router maps to its own address.
pub const ADDRESS_THIS: Address = address!("0x0000000000000000000000000000000000000002");

/// Amount placeholder meaning "the router's whole balance of this currency" (`1 << 255`).
pub const CONTRACT_BALANCE: U256 = U256::from_limbs([0, 0, 0, 0x8000_0000_0000_0000]);

/// Amount placeholder meaning "the full open delta" inside a v4 action plan.
pub const OPEN_DELTA: U256 = U256::ZERO;

/// Hook slot value quoters use to tag a v2 pool inside a v4-shaped path.
pub const V2_HOOKS_SENTINEL: Address = address!("0x0000000000000000000000000000000000000002");

/// Hook slot value quoters use to tag a v3 pool inside a v4-shaped path.
pub const V3_HOOKS_SENTINEL: Address = address!("0x0000000000000000000000000000000000000003");
