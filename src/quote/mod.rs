//! Turns the best quote of a v4-style quoter into a route the compiler accepts.

use alloy::primitives::{Address, Bytes, U256};

use crate::router::contract::{PathKey, PoolKey};
use crate::router::{Hop, RouteError, RouteResult, SwapExactInParams};

const BPS_DENOMINATOR: u64 = 10_000;

/// Best quote returned for an exact-input swap.
///
/// Pool keys and path keys carry the protocol tag in their `hooks` slot, see
/// [`crate::router::HopProtocol::from_hooks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteBest {
    Single {
        pool_key: PoolKey,
        zero_for_one: bool,
        hook_data: Bytes,
        amount_out: U256,
        gas_estimate: u64,
    },
    Multihop {
        currency_in: Address,
        path: Vec<PathKey>,
        amount_out: U256,
        gas_estimate: u64,
    },
}

impl QuoteBest {
    pub fn amount_out(&self) -> U256 {
        match self {
            QuoteBest::Single { amount_out, .. } | QuoteBest::Multihop { amount_out, .. } => {
                *amount_out
            }
        }
    }

    pub fn gas_estimate(&self) -> u64 {
        match self {
            QuoteBest::Single { gas_estimate, .. } | QuoteBest::Multihop { gas_estimate, .. } => {
                *gas_estimate
            }
        }
    }

    /// Quoted output reduced by `slippage_bps`, rounded down.
    pub fn amount_out_minimum(&self, slippage_bps: u32) -> RouteResult<U256> {
        let amount_out = self.amount_out();
        if amount_out.is_zero() {
            return Err(RouteError::NoLiquidity);
        }
        Ok(apply_slippage_bps(amount_out, slippage_bps))
    }
}

/// A compiler-ready path between two currencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniswapRoute {
    pub currency_in: Address,
    pub currency_out: Address,
    pub path: Vec<Hop>,
}

impl UniswapRoute {
    pub fn into_exact_in(
        self,
        weth: Address,
        amount_in: U256,
        amount_out_minimum: U256,
        recipient: Address,
    ) -> SwapExactInParams {
        SwapExactInParams {
            weth,
            currency_in: self.currency_in,
            currency_out: self.currency_out,
            path: self.path,
            amount_in,
            amount_out_minimum,
            recipient,
        }
    }
}

pub fn uniswap_route(quote: &QuoteBest) -> RouteResult<UniswapRoute> {
    if quote.amount_out().is_zero() {
        return Err(RouteError::NoLiquidity);
    }

    match quote {
        QuoteBest::Single {
            pool_key,
            zero_for_one,
            hook_data,
            ..
        } => {
            let (currency_in, currency_out) = if *zero_for_one {
                (pool_key.currency0, pool_key.currency1)
            } else {
                (pool_key.currency1, pool_key.currency0)
            };
            let hop = Hop::from_path_key(&PathKey {
                intermediateCurrency: currency_out,
                fee: pool_key.fee,
                tickSpacing: pool_key.tickSpacing,
                hooks: pool_key.hooks,
                hookData: hook_data.clone(),
            });

            Ok(UniswapRoute {
                currency_in,
                currency_out,
                path: vec![hop],
            })
        }
        QuoteBest::Multihop {
            currency_in, path, ..
        } => {
            let currency_out = path
                .last()
                .map(|key| key.intermediateCurrency)
                .ok_or(RouteError::EmptyPath)?;

            Ok(UniswapRoute {
                currency_in: *currency_in,
                currency_out,
                path: path.iter().map(Hop::from_path_key).collect(),
            })
        }
    }
}

/// Slippage above 100% floors the minimum at zero.
pub fn apply_slippage_bps(quoted: U256, slippage_bps: u32) -> U256 {
    let keep = BPS_DENOMINATOR.saturating_sub(u64::from(slippage_bps));
    quoted * U256::from(keep) / U256::from(BPS_DENOMINATOR)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;
    use alloy::primitives::aliases::{I24, U24};

    use super::*;
    use crate::router::constants::{V2_HOOKS_SENTINEL, V3_HOOKS_SENTINEL};
    use crate::router::{HopProtocol, ProtocolVersion, swap_exact_in_commands};

    const USDC: Address = address!("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
    const WETH: Address = address!("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
    const DAI: Address = address!("0x6b175474e89094c44da98b954eedeac495271d0f");

    fn path_key(currency: Address, fee: u32, tick_spacing: i32, hooks: Address) -> PathKey {
        PathKey {
            intermediateCurrency: currency,
            fee: U24::from(fee),
            tickSpacing: I24::try_from(tick_spacing).unwrap(),
            hooks,
            hookData: Bytes::new(),
        }
    }

    #[test]
    fn test_single_quote_should_follow_swap_direction() {
        let quote = QuoteBest::Single {
            pool_key: PoolKey {
                currency0: Address::ZERO,
                currency1: USDC,
                fee: U24::from(500u32),
                tickSpacing: I24::try_from(10i32).unwrap(),
                hooks: Address::ZERO,
            },
            zero_for_one: false,
            hook_data: Bytes::from(vec![0x01]),
            amount_out: U256::from(1_000u64),
            gas_estimate: 120_000,
        };

        let route = uniswap_route(&quote).unwrap();

        assert_eq!(route.currency_in, USDC);
        assert_eq!(route.currency_out, Address::ZERO);
        assert_eq!(route.path.len(), 1);
        assert_eq!(route.path[0].intermediate_currency, Address::ZERO);
        assert_eq!(route.path[0].protocol, HopProtocol::V4 { hooks: Address::ZERO });
        assert_eq!(route.path[0].hook_data, Bytes::from(vec![0x01]));
    }

    #[test]
    fn test_multihop_quote_should_decode_protocol_tags() {
        let quote = QuoteBest::Multihop {
            currency_in: USDC,
            path: vec![
                path_key(WETH, 0, 0, V2_HOOKS_SENTINEL),
                path_key(DAI, 3000, 60, V3_HOOKS_SENTINEL),
            ],
            amount_out: U256::from(5u64),
            gas_estimate: 200_000,
        };

        let route = uniswap_route(&quote).unwrap();
        let versions: Vec<_> = route.path.iter().map(Hop::version).collect();

        assert_eq!(route.currency_out, DAI);
        assert_eq!(versions, vec![ProtocolVersion::V2, ProtocolVersion::V3]);
        assert_eq!(route.path[1].fee, 3000);

        let params = route.into_exact_in(WETH, U256::from(1u64), U256::ZERO, USDC);
        assert_eq!(swap_exact_in_commands(&params).unwrap().segments().len(), 2);
    }

    #[test]
    fn test_zero_quote_should_be_no_liquidity() {
        let quote = QuoteBest::Multihop {
            currency_in: USDC,
            path: vec![path_key(WETH, 500, 10, Address::ZERO)],
            amount_out: U256::ZERO,
            gas_estimate: 0,
        };

        assert_eq!(uniswap_route(&quote).unwrap_err(), RouteError::NoLiquidity);
        assert_eq!(quote.amount_out_minimum(50).unwrap_err(), RouteError::NoLiquidity);
    }

    #[test]
    fn test_empty_multihop_should_fail() {
        let quote = QuoteBest::Multihop {
            currency_in: USDC,
            path: vec![],
            amount_out: U256::from(1u64),
            gas_estimate: 0,
        };
        assert_eq!(uniswap_route(&quote).unwrap_err(), RouteError::EmptyPath);
    }

    #[test]
    fn test_amount_out_minimum_should_round_down() {
        let quote = QuoteBest::Multihop {
            currency_in: USDC,
            path: vec![path_key(WETH, 500, 10, Address::ZERO)],
            amount_out: U256::from(1_999u64),
            gas_estimate: 0,
        };

        // 1999 * 0.995 = 1989.005
        assert_eq!(quote.amount_out_minimum(50).unwrap(), U256::from(1_989u64));
        assert_eq!(quote.amount_out_minimum(0).unwrap(), U256::from(1_999u64));
        assert_eq!(apply_slippage_bps(U256::from(100u64), 20_000), U256::ZERO);
    }
}
