//! Client analytics endpoint.

pub mod handlers;
pub mod routes;

pub use routes::analytics_routes;
