use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One contract tier: per-unit capacity in two dimensions and its unit price.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractOption {
    pub memory: f64,
    pub nodes: f64,
    pub price: f64,
}

/// Capacity shortfall to cover.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub memory: f64,
    pub nodes: f64,
}

/// A candidate contract combination: unit counts per contract id and the
/// resulting total price.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSet {
    pub units: BTreeMap<i32, u64>,
    pub total_price: f64,
}

impl ContractSet {
    /// Whether the chosen counts cover the requirement in both dimensions.
    pub fn covers(&self, contracts: &BTreeMap<i32, ContractOption>, requirement: &Requirement) -> bool {
        let (mut memory, mut nodes) = (0.0, 0.0);
        for (id, count) in &self.units {
            if let Some(contract) = contracts.get(id) {
                memory += contract.memory * *count as f64;
                nodes += contract.nodes * *count as f64;
            }
        }
        memory >= requirement.memory && nodes >= requirement.nodes
    }
}
