//! Action plans executed by the v4 router inside a single `V4_SWAP` command.
//!
//! v4 pools live in one pool manager, so a swap is bracketed explicitly: a
//! `SETTLE` opens the debit, swap actions move deltas, a `TAKE*` realizes the
//! credit.

use std::fmt;

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolValue;

use crate::router::contract::{ExactInputParams, ExactInputSingleParams};

/// v4 router action tags.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SwapExactInSingle = 0x06,
    SwapExactIn = 0x07,
    Settle = 0x0b,
    SettleAll = 0x0c,
    Take = 0x0e,
    TakeAll = 0x0f,
    Sweep = 0x14,
}

impl Action {
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::SwapExactInSingle => "SWAP_EXACT_IN_SINGLE",
            Action::SwapExactIn => "SWAP_EXACT_IN",
            Action::Settle => "SETTLE",
            Action::SettleAll => "SETTLE_ALL",
            Action::Take => "TAKE",
            Action::TakeAll => "TAKE_ALL",
            Action::Sweep => "SWEEP",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum V4Action {
    SwapExactInSingle(ExactInputSingleParams),
    SwapExactIn(ExactInputParams),
    Settle {
        currency: Address,
        amount: U256,
        payer_is_user: bool,
    },
    SettleAll {
        currency: Address,
        max_amount: U256,
    },
    Take {
        currency: Address,
        recipient: Address,
        amount: U256,
    },
    /// Takes the whole credit of `currency`, reverting below `min_amount`.
    TakeAll {
        currency: Address,
        recipient: Address,
        min_amount: U256,
    },
    Sweep {
        currency: Address,
        recipient: Address,
    },
}

impl V4Action {
    pub fn action(&self) -> Action {
        match self {
            V4Action::SwapExactInSingle(_) => Action::SwapExactInSingle,
            V4Action::SwapExactIn(_) => Action::SwapExactIn,
            V4Action::Settle { .. } => Action::Settle,
            V4Action::SettleAll { .. } => Action::SettleAll,
            V4Action::Take { .. } => Action::Take,
            V4Action::TakeAll { .. } => Action::TakeAll,
            V4Action::Sweep { .. } => Action::Sweep,
        }
    }

    pub fn encode_params(&self) -> Bytes {
        let encoded = match self {
            // swap params are decoded as a single struct, offset word included
            V4Action::SwapExactInSingle(params) => params.abi_encode(),
            V4Action::SwapExactIn(params) => params.abi_encode(),
            V4Action::Settle {
                currency,
                amount,
                payer_is_user,
            } => (*currency, *amount, *payer_is_user).abi_encode_params(),
            V4Action::SettleAll {
                currency,
                max_amount,
            } => (*currency, *max_amount).abi_encode_params(),
            V4Action::Take {
                currency,
                recipient,
                amount,
            } => (*currency, *recipient, *amount).abi_encode_params(),
            V4Action::TakeAll {
                currency,
                recipient,
                min_amount,
            } => (*currency, *recipient, *min_amount).abi_encode_params(),
            V4Action::Sweep {
                currency,
                recipient,
            } => (*currency, *recipient).abi_encode_params(),
        };

        encoded.into()
    }
}

/// Ordered list of v4 actions. Encodes to `(bytes actions, bytes[] params)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct V4Planner {
    actions: Vec<V4Action>,
}

impl V4Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(&mut self, action: V4Action) -> &mut Self {
        self.actions.push(action);
        self
    }

    pub fn actions(&self) -> &[V4Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// One tag byte per action.
    pub fn action_bytes(&self) -> Bytes {
        self.actions
            .iter()
            .map(|action| action.action().tag())
            .collect::<Vec<u8>>()
            .into()
    }

    pub fn params(&self) -> Vec<Bytes> {
        self.actions.iter().map(V4Action::encode_params).collect()
    }

    pub fn finalize(&self) -> Bytes {
        (self.action_bytes(), self.params()).abi_encode_params().into()
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    const USDC: Address = address!("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
    const RECIPIENT: Address = address!("0x00000000000000000000000000000000000000aa");

    #[test]
    fn test_planner_action_bytes_follow_insertion_order() {
        let mut planner = V4Planner::new();
        planner
            .add_action(V4Action::Settle {
                currency: USDC,
                amount: U256::from(10u64),
                payer_is_user: true,
            })
            .add_action(V4Action::TakeAll {
                currency: Address::ZERO,
                recipient: RECIPIENT,
                min_amount: U256::from(1u64),
            });

        assert_eq!(planner.len(), 2);
        assert_eq!(planner.action_bytes().as_ref(), &[0x0b, 0x0f]);
    }

    #[test]
    fn test_finalize_decodes_back_to_actions_and_params() {
        let mut planner = V4Planner::new();
        planner.add_action(V4Action::Take {
            currency: USDC,
            recipient: RECIPIENT,
            amount: U256::ZERO,
        });

        let (actions, params) =
            <(Bytes, Vec<Bytes>)>::abi_decode_params(&planner.finalize()).unwrap();
        assert_eq!(actions.as_ref(), &[Action::Take.tag()]);
        assert_eq!(params.len(), 1);

        let (currency, recipient, amount) =
            <(Address, Address, U256)>::abi_decode_params(&params[0]).unwrap();
        assert_eq!(currency, USDC);
        assert_eq!(recipient, RECIPIENT);
        assert_eq!(amount, U256::ZERO);
    }

    #[test]
    fn test_settle_params_are_three_static_words() {
        let params = V4Action::Settle {
            currency: USDC,
            amount: U256::from(5u64),
            payer_is_user: false,
        }
        .encode_params();

        assert_eq!(params.len(), 96);
        assert_eq!(params[95], 0);
    }
}
