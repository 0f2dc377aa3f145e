pub mod computed;
pub mod contract;
pub mod report;
pub mod simulation;

#[rustfmt::skip]
pub use {
    computed::{
        ComputedAcs, ComputedAttrSum, ComputedEquipAttr, ComputedIps, ComputedMetric, ComputedNup,
        ComputedOps, ComputedSps, ComputedUserSum,
    },
    contract::{ContractOption, ContractSet, Requirement},
    report::{ComplianceRow, MetricProductLicenses},
    simulation::{
        MetricSimDetail, SimFailure, SimulatedProductLicense, SimulatedProductsLicenses,
        SimulationRequest, SimulationResponse,
    },
};
