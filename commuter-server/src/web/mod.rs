//! Web layer for the departure board.
//!
//! Provides the polling endpoint the departure page refreshes from, and a
//! health check.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
