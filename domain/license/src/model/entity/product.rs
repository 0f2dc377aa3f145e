use serde::{Deserialize, Serialize};

/// Catalog information of a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub swidtag: String,
    pub name: String,
    pub editor: String,
    pub version: String,
    pub num_equipments: i32,
}

/// Product identity as returned by equipment-scoped queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub swidtag: String,
    pub name: String,
    pub editor: String,
}

/// One named-user record linked to a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUser {
    pub user_id: String,
    pub user_count: i64,
}
