use serde::{Deserialize, Serialize};

/// One compliance report row: acquired vs. computed licenses for a product
/// under one acquired right.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRow {
    pub sku: String,
    pub swidtag: String,
    /// Metric name the right was bought under.
    pub metric: String,
    pub num_cpt_licenses: i64,
    pub num_acq_licenses: i64,
    /// acquired - computed; negative means shortfall.
    pub delta_number: i64,
    pub delta_cost: f64,
    pub total_cost: f64,
    pub avg_unit_price: f64,
    /// Human-readable computation detail ("Total users: 42").
    #[serde(default)]
    pub computed_details: String,
    /// Set when the product has no equipment linked.
    #[serde(default)]
    pub not_deployed: bool,
}

/// Licenses a product would consume under a different metric.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricProductLicenses {
    pub metric_name: String,
    pub num_cpt_licenses: u64,
    pub total_cost: f64,
}
