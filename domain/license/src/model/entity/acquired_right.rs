use serde::{Deserialize, Serialize};

/// A purchased license entitlement tied to a product SKU.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquiredRight {
    pub sku: String,
    /// Name of the metric the right was bought under.
    pub metric: String,
    pub acquired_licenses: i64,
    pub total_cost: f64,
    pub avg_unit_price: f64,
}
