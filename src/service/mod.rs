pub mod error;
pub mod route;
pub mod types;
pub mod utils;


pub use error::ServiceError;
pub use route::RouteService;
pub use types::*;

pub(crate) type ServiceResult<T> = std::result::Result<T, ServiceError>;
