//! HTTP DTOs for certificate export.

use serde::Deserialize;

use crate::domain::naming::{NameData, UserData};

/// Body of `POST /api/generate-pdf`.
///
/// Both parts are optional on the wire so a missing one is reported as a
/// field error rather than a generic parse failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePdfRequest {
    #[serde(default)]
    pub name_data: Option<NameData>,
    #[serde(default)]
    pub user_data: Option<UserData>,
}

/// Response header carrying the balance left after a charged export.
pub const CREDITS_REMAINING_HEADER: &str = "x-credits-remaining";
