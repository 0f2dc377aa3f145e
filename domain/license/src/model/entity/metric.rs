use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named metric in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub id: Uuid,
    pub name: String,
    pub kind: MetricKind,
}

/// Supported licensing metric kinds. Wire names are load-bearing: they are the
/// strings the metric catalog stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricKind {
    #[serde(rename = "oracle.processor.standard")]
    Ops,
    #[serde(rename = "oracle.nup.standard")]
    Nup,
    #[serde(rename = "ibm.pvu.standard")]
    Ips,
    #[serde(rename = "sag.processor.standard")]
    Sps,
    #[serde(rename = "attribute.counter.standard")]
    Acs,
    #[serde(rename = "attribute.sum.standard")]
    AttrSum,
    #[serde(rename = "user.sum.standard")]
    UserSum,
    #[serde(rename = "equipment.attribute.standard")]
    EquipAttr,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ops => "oracle.processor.standard",
            Self::Nup => "oracle.nup.standard",
            Self::Ips => "ibm.pvu.standard",
            Self::Sps => "sag.processor.standard",
            Self::Acs => "attribute.counter.standard",
            Self::AttrSum => "attribute.sum.standard",
            Self::UserSum => "user.sum.standard",
            Self::EquipAttr => "equipment.attribute.standard",
        }
    }

    /// Short form used in user-facing messages.
    pub fn abbrev(&self) -> &'static str {
        match self {
            Self::Ops => "OPS",
            Self::Nup => "NUP",
            Self::Ips => "IPS",
            Self::Sps => "SPS",
            Self::Acs => "ACS",
            Self::AttrSum => "ATTR_SUM",
            Self::UserSum => "USER_SUM",
            Self::EquipAttr => "EQUIP_ATTR",
        }
    }

    /// Catalog description of the kind's formula.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Ops => "number of processor licenses required = CPU nb x Core(per CPU) nb x CoreFactor",
            Self::Nup => "named-user licensing on top of the processor metric",
            Self::Ips => "number of PVUs required = CPU nb x Core(per CPU) nb x CoreFactor",
            Self::Sps => "number of processor licenses required = MAX(Prod licenses, NonProd licenses)",
            Self::Acs => "number of licenses = count of equipments with attribute = value",
            Self::AttrSum => "number of licenses = sum of attribute values / reference value",
            Self::UserSum => "number of licenses = sum of user counts",
            Self::EquipAttr => {
                "number of licenses = sum of attribute values on equipments of a type, filtered by environment"
            }
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "oracle.processor.standard" => Self::Ops,
            "oracle.nup.standard" => Self::Nup,
            "ibm.pvu.standard" => Self::Ips,
            "sag.processor.standard" => Self::Sps,
            "attribute.counter.standard" => Self::Acs,
            "attribute.sum.standard" => Self::AttrSum,
            "user.sum.standard" => Self::UserSum,
            "equipment.attribute.standard" => Self::EquipAttr,
            _ => return None,
        })
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of an Oracle-processor-style metric: four hierarchy levels
/// plus the three attributes read at base level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricOps {
    pub id: Uuid,
    pub name: String,
    pub start_eq_type_id: Uuid,
    pub base_eq_type_id: Uuid,
    pub aggregate_level_eq_type_id: Uuid,
    pub end_eq_type_id: Uuid,
    pub core_factor_attr_id: Uuid,
    pub num_core_attr_id: Uuid,
    pub num_cpu_attr_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricNup {
    #[serde(flatten)]
    pub ops: MetricOps,
    pub number_of_users: u32,
}

/// Single-level processor metric (IBM PVU / SAG share the shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricIps {
    pub id: Uuid,
    pub name: String,
    pub base_eq_type_id: Uuid,
    pub core_factor_attr_id: Uuid,
    pub num_core_attr_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSps {
    pub id: Uuid,
    pub name: String,
    pub base_eq_type_id: Uuid,
    pub core_factor_attr_id: Uuid,
    pub num_core_attr_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAcs {
    pub id: Uuid,
    pub name: String,
    pub eq_type: String,
    pub attr_name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAttrSum {
    pub id: Uuid,
    pub name: String,
    pub eq_type: String,
    pub attr_name: String,
    pub reference_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricUserSum {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEquipAttr {
    pub id: Uuid,
    pub name: String,
    pub eq_type: String,
    pub attr_name: String,
    pub environment: String,
    pub value: i32,
}

/// A metric configuration, tagged by kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MetricDefinition {
    #[serde(rename = "oracle.processor.standard")]
    Ops(MetricOps),
    #[serde(rename = "oracle.nup.standard")]
    Nup(MetricNup),
    #[serde(rename = "ibm.pvu.standard")]
    Ips(MetricIps),
    #[serde(rename = "sag.processor.standard")]
    Sps(MetricSps),
    #[serde(rename = "attribute.counter.standard")]
    Acs(MetricAcs),
    #[serde(rename = "attribute.sum.standard")]
    AttrSum(MetricAttrSum),
    #[serde(rename = "user.sum.standard")]
    UserSum(MetricUserSum),
    #[serde(rename = "equipment.attribute.standard")]
    EquipAttr(MetricEquipAttr),
}

impl MetricDefinition {
    pub fn name(&self) -> &str {
        match self {
            Self::Ops(m) => &m.name,
            Self::Nup(m) => &m.ops.name,
            Self::Ips(m) => &m.name,
            Self::Sps(m) => &m.name,
            Self::Acs(m) => &m.name,
            Self::AttrSum(m) => &m.name,
            Self::UserSum(m) => &m.name,
            Self::EquipAttr(m) => &m.name,
        }
    }

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_wire_name() {
        for kind in [
            MetricKind::Ops,
            MetricKind::Nup,
            MetricKind::Ips,
            MetricKind::Sps,
            MetricKind::Acs,
            MetricKind::AttrSum,
            MetricKind::UserSum,
            MetricKind::EquipAttr,
        ] {
            assert_eq!(MetricKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(MetricKind::parse("instance.number.standard"), None);
    }
}
