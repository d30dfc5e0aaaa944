//! HTTP API over the text analyzer and stock report service, with bearer
//! auth, per-IP rate limiting and a health endpoint.

mod error;
mod handlers;
mod router;
mod server;

pub use error::GatewayError;
pub use router::{RouterOptions, build_router};
pub use server::{AppState, GatewayServer};
