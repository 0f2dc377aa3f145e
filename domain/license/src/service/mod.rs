mod compliance;
mod simulation;

#[rustfmt::skip]
pub use {
    compliance::LicenseComplianceService,
    simulation::HardwareSimulationService,
};
