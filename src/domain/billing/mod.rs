//! Billing domain module.
//!
//! Product catalog and the resolution of checkout requests to provider
//! products. Payment processing itself lives behind the `CheckoutProvider` port.

mod catalog;
mod checkout;
mod product;

pub use catalog::{CatalogError, ProductCatalog};
pub use checkout::{resolve_product, CheckoutSelection, MatchedBy, ResolvedProduct};
pub use product::{ProductTier, ProductType};
