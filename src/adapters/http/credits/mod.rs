//! Credit balance and history endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::credits_routes;
