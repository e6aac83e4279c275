use alloy::primitives::Address;

use crate::router::command::RouterCommand;
use crate::router::path::{Hop, ProtocolVersion};
use crate::router::planner::RoutePlanner;

/// Where a segment sits in the whole route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegPosition {
    /// No command has moved funds yet, so this leg is funded by the caller.
    pub is_first_swap: bool,
    /// This leg produces the route's final output.
    pub is_last_swap: bool,
}

/// Record of one flushed segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub version: ProtocolVersion,
    pub hops: usize,
    pub position: LegPosition,
}

/// Build state threaded through one route compilation.
///
/// Created per call, never shared. `curr_path` accumulates the hops of the
/// segment under construction; encoders drain it.
#[derive(Debug, Clone)]
pub struct CommandsBuilder {
    curr_currency_in: Address,
    curr_version: ProtocolVersion,
    curr_path: Vec<Hop>,
    commands: Vec<RouterCommand>,
    segments: Vec<Segment>,
}

impl CommandsBuilder {
    pub fn new(currency_in: Address, version: ProtocolVersion) -> Self {
        Self {
            curr_currency_in: currency_in,
            curr_version: version,
            curr_path: Vec::new(),
            commands: Vec::new(),
            segments: Vec::new(),
        }
    }

    pub fn curr_currency_in(&self) -> Address {
        self.curr_currency_in
    }

    pub fn curr_version(&self) -> ProtocolVersion {
        self.curr_version
    }

    pub fn curr_path(&self) -> &[Hop] {
        &self.curr_path
    }

    pub fn commands(&self) -> &[RouterCommand] {
        &self.commands
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn push_hop(&mut self, hop: Hop) {
        self.curr_path.push(hop);
    }

    pub(crate) fn switch_version(&mut self, version: ProtocolVersion) {
        self.curr_version = version;
    }

    pub(crate) fn push_command(&mut self, command: RouterCommand) {
        self.commands.push(command);
    }

    /// Takes the current segment's hops and records the flush.
    pub(crate) fn take_segment(&mut self, position: LegPosition) -> Vec<Hop> {
        let hops = std::mem::take(&mut self.curr_path);
        self.segments.push(Segment {
            version: self.curr_version,
            hops: hops.len(),
            position,
        });
        hops
    }

    pub(crate) fn advance_currency_in(&mut self, currency: Address) {
        self.curr_currency_in = currency;
    }

    /// Drains the compiled commands.
    pub fn finalize(self) -> Vec<RouterCommand> {
        self.commands
    }

    pub fn into_planner(self) -> RoutePlanner {
        RoutePlanner::create(&self.commands)
    }
}
