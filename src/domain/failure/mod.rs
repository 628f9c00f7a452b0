//! Failure taxonomy and classification.
//!
//! - `kind` - ErrorKind and Severity with their fixed per-kind defaults
//! - `app_error` - AppError and typed conversions into it
//! - `classifier` - Ordered keyword classifier for untyped failures

mod app_error;
mod classifier;
mod kind;

pub use app_error::AppError;
pub use classifier::ErrorClassifier;
pub use kind::{ErrorKind, Severity};
