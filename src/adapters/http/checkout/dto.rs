//! HTTP DTOs for checkout creation.

use serde::{Deserialize, Serialize};

use crate::domain::billing::CheckoutSelection;

/// Body of `POST /api/creem/create-checkout`. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub tier_id: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    /// The pricing page sends this one in snake case.
    #[serde(default, rename = "credits_amount", alias = "creditsAmount")]
    pub credits_amount: Option<u32>,
    #[serde(default)]
    pub discount_code: Option<String>,
}

impl From<CreateCheckoutRequest> for CheckoutSelection {
    fn from(req: CreateCheckoutRequest) -> Self {
        CheckoutSelection {
            product_id: req.product_id,
            tier_id: req.tier_id,
            product_type: req.product_type,
            credits_amount: req.credits_amount,
            discount_code: req.discount_code,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub checkout_url: String,
}
