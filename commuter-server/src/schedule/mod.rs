//! Departure schedule assembly.
//!
//! Turns the two upstream endpoints into normalized departure boards:
//! route resolution, predictions query construction, normalization of the
//! predictions document, and aggregation across both stations. Everything
//! here is stateless; each call works only on its own responses.

mod aggregate;
mod normalize;
mod query;
mod routes;

pub use aggregate::{fetch_all, fetch_station};
pub use normalize::{correct_status, normalize};
pub use query::build_predictions_query;
pub use routes::{COMMUTER_RAIL_ROUTE_TYPE, resolve_routes, routes_query};
