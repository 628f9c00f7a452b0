//! HTTP adapter - REST API for the name generator frontend.
//!
//! Each area keeps its DTOs, handlers and routes in its own module;
//! `router::build_router` stitches them together under `/api`.

pub mod analytics;
pub mod checkout;
pub mod credits;
pub mod error;
pub mod middleware;
pub mod naming;
pub mod pdf;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiJson, ErrorResponder};
pub use router::{build_router, RouterConfig, DEFAULT_REQUEST_TIMEOUT};
pub use state::{AppState, HttpSettings};
