//! Universal Router route compiler.
//!
//! Turns a quoted swap path into the ordered command list the router executes.
//! Pure and synchronous: no I/O happens here.

pub mod builder;
pub mod command;
pub mod constants;
pub mod contract;
pub mod encoder;
pub mod error;
pub mod exact_in;
pub mod path;
pub mod planner;
pub mod v4;


pub use builder::{CommandsBuilder, LegPosition, Segment};
pub use command::{CommandType, RouterCommand};
pub use error::RouteError;
pub use exact_in::{SwapExactInParams, swap_exact_in_commands};
pub use path::{Hop, HopProtocol, ProtocolVersion};
pub use planner::RoutePlanner;
pub use v4::{Action, V4Action, V4Planner};

pub(crate) type RouteResult<T> = std::result::Result<T, RouteError>;
