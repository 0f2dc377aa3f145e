mod compliance;
pub mod cost_optimization;
pub mod hierarchy;
pub mod resolve;
mod simulation;

#[rustfmt::skip]
pub use {
    compliance::LicenseComplianceServiceImpl,
    simulation::HardwareSimulationServiceImpl,
};
