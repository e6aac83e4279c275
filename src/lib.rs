pub mod app;
pub mod config;
pub mod middleware;
pub mod quote;
pub mod repository;
pub mod router;
pub mod service;

pub use app::build_app;

// Re-export commonly used types for tests
pub use quote::{QuoteBest, UniswapRoute, uniswap_route};
pub use router::{Hop, RouteError, RoutePlanner, RouterCommand, SwapExactInParams, swap_exact_in_commands};
pub use service::{EncodeSwapRequest, EncodeSwapResponse, RouteService, SimulateSwapRequest, SimulateSwapResponse};
