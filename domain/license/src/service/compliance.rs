//! Compliance reporting service.

use async_trait::async_trait;

use crate::{
    exception::LicenseResult,
    model::vo::{ComplianceRow, MetricProductLicenses},
};

#[async_trait]
pub trait LicenseComplianceService: Send + Sync {
    /// One report row per acquired right of the product: acquired vs. computed
    /// licenses with the shortfall delta and its cost. A right whose metric
    /// cannot be computed degrades to a zero-computed row instead of failing
    /// the report.
    async fn compliance_for_product(
        &self,
        swidtag: &str,
        scope: &str,
    ) -> LicenseResult<Vec<ComplianceRow>>;

    /// Licenses the product would consume under the named metric, priced at
    /// `unit_cost`.
    async fn product_licenses_for_metric(
        &self,
        swidtag: &str,
        metric_name: &str,
        unit_cost: f64,
        scope: &str,
    ) -> LicenseResult<MetricProductLicenses>;
}
