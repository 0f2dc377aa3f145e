//! Per-request resolved views of metric configurations: every id reference is
//! replaced by the concrete attribute or equipment type it names, plus the
//! validated type chain for tree-walking kinds. Built fresh per request and
//! never persisted.

use serde::{Deserialize, Serialize};

use crate::model::entity::{Attribute, EquipmentType, MetricKind};

/// A fully-resolved metric, ready for aggregation queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ComputedMetric {
    Ops(ComputedOps),
    Nup(ComputedNup),
    Ips(ComputedIps),
    Sps(ComputedSps),
    Acs(ComputedAcs),
    AttrSum(ComputedAttrSum),
    UserSum(ComputedUserSum),
    EquipAttr(ComputedEquipAttr),
}

impl ComputedMetric {
    pub fn kind(&self) -> MetricKind {
        match self {
            Self::Ops(_) => MetricKind::Ops,
            Self::Nup(_) => MetricKind::Nup,
            Self::Ips(_) => MetricKind::Ips,
            Self::Sps(_) => MetricKind::Sps,
            Self::Acs(_) => MetricKind::Acs,
            Self::AttrSum(_) => MetricKind::AttrSum,
            Self::UserSum(_) => MetricKind::UserSum,
            Self::EquipAttr(_) => MetricKind::EquipAttr,
        }
    }
}

/// Resolved Oracle-processor metric. `eq_type_tree` is the validated chain
/// from the start type up to (and including) the end level, base-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedOps {
    pub name: String,
    pub eq_type_tree: Vec<EquipmentType>,
    pub base_index: usize,
    pub aggregate_index: usize,
    pub core_factor_attr: Attribute,
    pub num_cores_attr: Attribute,
    pub num_cpu_attr: Attribute,
}

impl ComputedOps {
    pub fn base_type(&self) -> &EquipmentType {
        &self.eq_type_tree[self.base_index]
    }

    pub fn aggregate_type(&self) -> &EquipmentType {
        &self.eq_type_tree[self.aggregate_index]
    }

    /// Index of the given equipment type name within the tree.
    pub fn level_of_type(&self, type_name: &str) -> Option<usize> {
        self.eq_type_tree.iter().position(|t| t.type_name == type_name)
    }

    /// One base equipment's share of the pre-ceiling aggregate sum:
    /// cores x cpus x core factor.
    pub fn contribution(&self, use_simulated: bool) -> f64 {
        self.num_cores_attr.numeric_value(use_simulated)
            * self.num_cpu_attr.numeric_value(use_simulated)
            * self.core_factor_attr.numeric_value(use_simulated)
    }

    /// Substitute the plan's base attributes with request attributes of the
    /// same name, bringing their simulation overlay along.
    pub fn overlay_attributes(&mut self, attributes: &[Attribute]) {
        for attr in [&mut self.core_factor_attr, &mut self.num_cores_attr, &mut self.num_cpu_attr] {
            overlay(attr, attributes);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedNup {
    pub ops: ComputedOps,
    pub number_of_users: u32,
}

/// Resolved single-level processor metric (IBM PVU).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedIps {
    pub name: String,
    pub base_type: EquipmentType,
    pub core_factor_attr: Attribute,
    pub num_cores_attr: Attribute,
}

impl ComputedIps {
    /// cores x core factor at the single base-level instance.
    pub fn contribution(&self, use_simulated: bool) -> f64 {
        self.num_cores_attr.numeric_value(use_simulated)
            * self.core_factor_attr.numeric_value(use_simulated)
    }

    pub fn overlay_attributes(&mut self, attributes: &[Attribute]) {
        for attr in [&mut self.core_factor_attr, &mut self.num_cores_attr] {
            overlay(attr, attributes);
        }
    }
}

/// Resolved SAG processor metric; licenses are computed separately over
/// production and non-production equipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedSps {
    pub name: String,
    pub base_type: EquipmentType,
    pub core_factor_attr: Attribute,
    pub num_cores_attr: Attribute,
}

impl ComputedSps {
    pub fn contribution(&self, use_simulated: bool) -> f64 {
        self.num_cores_attr.numeric_value(use_simulated)
            * self.core_factor_attr.numeric_value(use_simulated)
    }

    pub fn overlay_attributes(&mut self, attributes: &[Attribute]) {
        for attr in [&mut self.core_factor_attr, &mut self.num_cores_attr] {
            overlay(attr, attributes);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedAcs {
    pub name: String,
    pub base_type: EquipmentType,
    pub attribute: Attribute,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedAttrSum {
    pub name: String,
    pub base_type: EquipmentType,
    pub attribute: Attribute,
    pub reference_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedUserSum {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedEquipAttr {
    pub name: String,
    pub base_type: EquipmentType,
    pub attribute: Attribute,
    pub environment: String,
    pub value: i32,
}

fn overlay(attr: &mut Attribute, request_attrs: &[Attribute]) {
    if let Some(requested) = request_attrs.iter().find(|a| a.name == attr.name) {
        *attr = requested.clone();
    }
}
