pub mod admin;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod server;

pub use crate::error::{Result as ServerResult, ServerError};
pub use crate::routes::build_router;
pub use crate::server::{build_components, serve};
