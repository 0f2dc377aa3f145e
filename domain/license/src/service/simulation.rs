//! Hardware simulation service.

use async_trait::async_trait;

use crate::{
    exception::LicenseResult,
    model::vo::{SimulationRequest, SimulationResponse},
};

#[async_trait]
pub trait HardwareSimulationService: Send + Sync {
    /// Recompute license consumption for the products installed on one
    /// equipment individual under the request's attribute overrides, without
    /// writing anything. Metrics that cannot be simulated are reported as
    /// per-metric failures next to the successful ones.
    async fn simulate(
        &self,
        request: &SimulationRequest,
        scope: &str,
    ) -> LicenseResult<SimulationResponse>;
}
