//! PhyAssist Gateway HTTP API Server
//!
//! Serves `POST /api/feedback` and `GET /api/health` to one trusted web origin.

pub mod error;
pub mod feedback;
pub mod health_api;
pub mod origin;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, start_server, GatewayState};
