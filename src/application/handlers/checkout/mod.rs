//! Hosted checkout creation.

mod create_checkout;

pub use create_checkout::{CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult};
