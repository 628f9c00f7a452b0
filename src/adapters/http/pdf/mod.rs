//! Certificate export endpoint.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::pdf_routes;
