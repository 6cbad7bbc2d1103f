//! Information asset inventory records.

use grc_listview::impl_record;
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

/// An entry in the information asset inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Database key used by `/api/assets/{id}`.
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number"
    )]
    pub id: Option<i64>,
    #[serde(deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub asset_id: String,
    pub asset_name: Option<String>,
    pub asset_type: Option<String>,
    pub classification: Option<String>,
    pub owner: Option<String>,
    pub business_value: Option<String>,
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_string_from_number_or_string"
    )]
    pub confidentiality_level: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_string_from_number_or_string"
    )]
    pub integrity_level: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_string_from_number_or_string"
    )]
    pub availability_level: Option<String>,
    pub custodian: Option<String>,
    pub retention_period: Option<String>,
    pub disposal_method: Option<String>,
    pub ip_address: Option<String>,
    pub model_version: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl_record!(Asset {
    id: asset_id,
    fields: [
        id,
        asset_id,
        asset_name,
        asset_type,
        classification,
        owner,
        business_value,
        description,
        confidentiality_level,
        integrity_level,
        availability_level,
        custodian,
        retention_period,
        disposal_method,
        ip_address,
        model_version,
        location,
        status,
        created_at,
        updated_at,
    ]
});

impl Resource for Asset {
    const KIND: ResourceKind = ResourceKind::Assets;

    fn mutation_key(&self) -> String {
        self.id
            .map(|id| id.to_string())
            .unwrap_or_else(|| self.asset_id.clone())
    }
}
