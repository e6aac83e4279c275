use alloy::primitives::{Bytes, U256};
use alloy::sol_types::SolCall;

use crate::router::RouteResult;
use crate::router::command::{CommandType, RouterCommand};
use crate::router::contract::IUniversalRouter;
use crate::router::error::RouteError;

/// Serialized command buffer handed to the router's `execute` entry point.
///
/// `commands` and `inputs` always have the same length; insertion order is
/// execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePlanner {
    commands: Vec<u8>,
    inputs: Vec<Bytes>,
}

impl RoutePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a planner from an already compiled command list.
    pub fn create<'a>(commands: impl IntoIterator<Item = &'a RouterCommand>) -> Self {
        let mut planner = Self::new();
        for command in commands {
            planner.add_command(command);
        }
        planner
    }

    pub fn add_command(&mut self, command: &RouterCommand) -> &mut Self {
        self.push(command.command_type().tag(), command.encode_input());
        self
    }

    /// Appends a command, optionally letting the router continue if it reverts.
    pub fn add_command_with_revert(
        &mut self,
        command: &RouterCommand,
        allow_revert: bool,
    ) -> RouteResult<&mut Self> {
        let command_type = command.command_type();
        let mut tag = command_type.tag();

        if allow_revert {
            if !command_type.is_revertible() {
                return Err(RouteError::InvalidRevertibleCommand(command_type));
            }
            tag |= CommandType::ALLOW_REVERT_FLAG;
        }

        self.push(tag, command.encode_input());
        Ok(self)
    }

    /// Nests another planner as a single revertible `EXECUTE_SUB_PLAN` command.
    pub fn add_sub_plan(&mut self, sub_plan: &RoutePlanner) -> RouteResult<&mut Self> {
        let command = RouterCommand::ExecuteSubPlan {
            commands: sub_plan.commands(),
            inputs: sub_plan.inputs.clone(),
        };
        self.add_command_with_revert(&command, true)
    }

    fn push(&mut self, tag: u8, input: Bytes) {
        self.commands.push(tag);
        self.inputs.push(input);
    }

    pub fn commands(&self) -> Bytes {
        Bytes::copy_from_slice(&self.commands)
    }

    pub fn inputs(&self) -> &[Bytes] {
        &self.inputs
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Calldata for `execute(bytes commands, bytes[] inputs, uint256 deadline)`.
    pub fn encode_execute(&self, deadline: U256) -> Bytes {
        IUniversalRouter::execute_1Call {
            commands: self.commands(),
            inputs: self.inputs.clone(),
            deadline,
        }
        .abi_encode()
        .into()
    }

    /// Calldata for `execute(bytes commands, bytes[] inputs)`.
    pub fn encode_execute_without_deadline(&self) -> Bytes {
        IUniversalRouter::execute_0Call {
            commands: self.commands(),
            inputs: self.inputs.clone(),
        }
        .abi_encode()
        .into()
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{Address, address};

    use super::*;
    use crate::router::constants::{ADDRESS_THIS, CONTRACT_BALANCE};

    const USDC: Address = address!("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
    const RECIPIENT: Address = address!("0x00000000000000000000000000000000000000aa");

    fn wrap() -> RouterCommand {
        RouterCommand::WrapEth {
            recipient: ADDRESS_THIS,
            amount: CONTRACT_BALANCE,
        }
    }

    fn sweep() -> RouterCommand {
        RouterCommand::Sweep {
            token: USDC,
            recipient: RECIPIENT,
            amount_min: U256::ZERO,
        }
    }

    #[test]
    fn test_commands_and_inputs_stay_parallel() {
        let mut planner = RoutePlanner::new();
        planner.add_command(&wrap()).add_command(&sweep());

        assert_eq!(planner.len(), 2);
        assert_eq!(planner.inputs().len(), 2);
        assert_eq!(planner.commands().as_ref(), &[0x0b, 0x04]);
        assert_eq!(planner.inputs()[1], sweep().encode_input());
    }

    #[test]
    fn test_create_keeps_order() {
        let commands = vec![sweep(), wrap(), sweep()];
        let planner = RoutePlanner::create(&commands);

        assert_eq!(planner.commands().as_ref(), &[0x04, 0x0b, 0x04]);
    }

    #[test]
    fn test_allow_revert_rejected_for_plain_commands() {
        let mut planner = RoutePlanner::new();
        let err = planner.add_command_with_revert(&wrap(), true).unwrap_err();

        assert_eq!(err, RouteError::InvalidRevertibleCommand(CommandType::WrapEth));
        assert!(planner.is_empty());
    }

    #[test]
    fn test_sub_plan_sets_revert_flag() {
        let mut inner = RoutePlanner::new();
        inner.add_command(&sweep());

        let mut outer = RoutePlanner::new();
        outer.add_command(&wrap());
        outer.add_sub_plan(&inner).unwrap();

        assert_eq!(outer.commands().as_ref(), &[0x0b, 0xa1]);

        let expected = RouterCommand::ExecuteSubPlan {
            commands: inner.commands(),
            inputs: inner.inputs().to_vec(),
        }
        .encode_input();
        assert_eq!(outer.inputs()[1], expected);
    }

    #[test]
    fn test_encode_execute_uses_deadline_overload() {
        let planner = RoutePlanner::create(&[wrap()]);

        let with_deadline = planner.encode_execute(U256::from(1_700_000_000u64));
        assert_eq!(&with_deadline[..4], &IUniversalRouter::execute_1Call::SELECTOR);

        let decoded = IUniversalRouter::execute_1Call::abi_decode(&with_deadline).unwrap();
        assert_eq!(decoded.commands, planner.commands());
        assert_eq!(decoded.inputs, planner.inputs().to_vec());
        assert_eq!(decoded.deadline, U256::from(1_700_000_000u64));

        let without = planner.encode_execute_without_deadline();
        assert_eq!(&without[..4], &IUniversalRouter::execute_0Call::SELECTOR);
    }
}
