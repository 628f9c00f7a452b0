//! Purchasable product tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a checkout buys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Recurring plan that refills credits each period.
    Subscription,
    /// One-off credit pack.
    Credits,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Subscription => "subscription",
            ProductType::Credits => "credits",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the product catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTier {
    /// Stable identifier used by the pricing page, e.g. `tier-hobby`.
    pub id: String,
    pub name: String,
    /// Payment provider product identifier.
    pub product_id: String,
    pub product_type: ProductType,
    #[serde(default)]
    pub credit_amount: Option<u32>,
    #[serde(default)]
    pub featured: bool,
}

impl ProductTier {
    pub fn is_credits(&self) -> bool {
        self.product_type == ProductType::Credits
    }
}
