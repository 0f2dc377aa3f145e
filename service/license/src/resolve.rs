//! Metric resolution: turning a stored metric configuration into a
//! [`ComputedMetric`] plan with every id reference replaced by the concrete
//! attribute or equipment type, and the hierarchy levels validated in order.

use domain_license::{
    exception::{HierarchyLevel, LicenseException, LicenseResult},
    model::{
        entity::{
            metric::{MetricAcs, MetricAttrSum, MetricEquipAttr, MetricIps, MetricOps, MetricSps},
            Attribute, EquipmentType, MetricDefinition,
        },
        vo::{
            ComputedAcs, ComputedAttrSum, ComputedEquipAttr, ComputedIps, ComputedMetric,
            ComputedNup, ComputedOps, ComputedSps, ComputedUserSum,
        },
    },
};
use uuid::Uuid;

use crate::hierarchy::{build_type_chain, find_level, type_by_id, type_by_name};

/// Resolve the named metric's definition against the scope's type catalog.
pub fn computed_metric(
    definitions: &[MetricDefinition],
    types: &[EquipmentType],
    metric_name: &str,
) -> LicenseResult<ComputedMetric> {
    let definition = definitions
        .iter()
        .find(|d| d.name().eq_ignore_ascii_case(metric_name))
        .ok_or(LicenseException::MetricNotFound)?;

    Ok(match definition {
        MetricDefinition::Ops(m) => ComputedMetric::Ops(resolve_ops(m, types)?),
        MetricDefinition::Nup(m) => ComputedMetric::Nup(ComputedNup {
            ops: resolve_ops(&m.ops, types)?,
            number_of_users: m.number_of_users,
        }),
        MetricDefinition::Ips(m) => ComputedMetric::Ips(resolve_ips(m, types)?),
        MetricDefinition::Sps(m) => ComputedMetric::Sps(resolve_sps(m, types)?),
        MetricDefinition::Acs(m) => ComputedMetric::Acs(resolve_acs(m, types)?),
        MetricDefinition::AttrSum(m) => ComputedMetric::AttrSum(resolve_attr_sum(m, types)?),
        MetricDefinition::UserSum(m) => {
            ComputedMetric::UserSum(ComputedUserSum { name: m.name.clone() })
        }
        MetricDefinition::EquipAttr(m) => ComputedMetric::EquipAttr(resolve_equip_attr(m, types)?),
    })
}

/// Resolve a processor-tree metric: chain from the start type, base/aggregate/
/// end located in that order (each search picks up where the previous level
/// was found), attributes resolved on the base type.
fn resolve_ops(metric: &MetricOps, types: &[EquipmentType]) -> LicenseResult<ComputedOps> {
    let chain = build_type_chain(types, metric.start_eq_type_id)?;
    let base_index = locate(&chain, 0, metric.base_eq_type_id, HierarchyLevel::Base)?;
    let aggregate_index = locate(
        &chain,
        base_index,
        metric.aggregate_level_eq_type_id,
        HierarchyLevel::Aggregate,
    )?;
    let end_index = locate(&chain, aggregate_index, metric.end_eq_type_id, HierarchyLevel::End)?;

    let base = &chain[base_index];
    let num_cores_attr = base_attribute(base, metric.num_core_attr_id, "numofcores")?;
    let num_cpu_attr = base_attribute(base, metric.num_cpu_attr_id, "numofcpu")?;
    let core_factor_attr = base_attribute(base, metric.core_factor_attr_id, "corefactor")?;

    Ok(ComputedOps {
        name: metric.name.clone(),
        eq_type_tree: chain[..=end_index].to_vec(),
        base_index,
        aggregate_index,
        core_factor_attr,
        num_cores_attr,
        num_cpu_attr,
    })
}

fn resolve_ips(metric: &MetricIps, types: &[EquipmentType]) -> LicenseResult<ComputedIps> {
    let base = type_by_id(types, metric.base_eq_type_id)
        .ok_or(LicenseException::BaseTypeNotFound)?;
    Ok(ComputedIps {
        name: metric.name.clone(),
        num_cores_attr: base_attribute(base, metric.num_core_attr_id, "numofcores")?,
        core_factor_attr: base_attribute(base, metric.core_factor_attr_id, "corefactor")?,
        base_type: base.clone(),
    })
}

fn resolve_sps(metric: &MetricSps, types: &[EquipmentType]) -> LicenseResult<ComputedSps> {
    let base = type_by_id(types, metric.base_eq_type_id)
        .ok_or(LicenseException::BaseTypeNotFound)?;
    Ok(ComputedSps {
        name: metric.name.clone(),
        num_cores_attr: base_attribute(base, metric.num_core_attr_id, "numofcores")?,
        core_factor_attr: base_attribute(base, metric.core_factor_attr_id, "corefactor")?,
        base_type: base.clone(),
    })
}

fn resolve_acs(metric: &MetricAcs, types: &[EquipmentType]) -> LicenseResult<ComputedAcs> {
    let (base, attribute) = named_type_attribute(types, &metric.eq_type, &metric.attr_name)?;
    Ok(ComputedAcs {
        name: metric.name.clone(),
        base_type: base.clone(),
        attribute: attribute.clone(),
        value: metric.value.clone(),
    })
}

fn resolve_attr_sum(
    metric: &MetricAttrSum,
    types: &[EquipmentType],
) -> LicenseResult<ComputedAttrSum> {
    let (base, attribute) = named_type_attribute(types, &metric.eq_type, &metric.attr_name)?;
    Ok(ComputedAttrSum {
        name: metric.name.clone(),
        base_type: base.clone(),
        attribute: attribute.clone(),
        reference_value: metric.reference_value,
    })
}

fn resolve_equip_attr(
    metric: &MetricEquipAttr,
    types: &[EquipmentType],
) -> LicenseResult<ComputedEquipAttr> {
    let (base, attribute) = named_type_attribute(types, &metric.eq_type, &metric.attr_name)?;
    Ok(ComputedEquipAttr {
        name: metric.name.clone(),
        base_type: base.clone(),
        attribute: attribute.clone(),
        environment: metric.environment.clone(),
        value: metric.value,
    })
}

fn locate(
    chain: &[EquipmentType],
    from_index: usize,
    type_id: Uuid,
    level: HierarchyLevel,
) -> LicenseResult<usize> {
    find_level(chain, from_index, type_id).ok_or(LicenseException::LevelNotFound { level })
}

fn base_attribute(
    base: &EquipmentType,
    attr_id: Uuid,
    attr: &'static str,
) -> LicenseResult<Attribute> {
    base.attribute_by_id(attr_id)
        .cloned()
        .ok_or(LicenseException::AttributeMissing { attr })
}

fn named_type_attribute<'a>(
    types: &'a [EquipmentType],
    eq_type: &str,
    attr_name: &str,
) -> LicenseResult<(&'a EquipmentType, &'a Attribute)> {
    let base = type_by_name(types, eq_type).ok_or(LicenseException::EquipmentTypeUnresolved)?;
    let attribute =
        base.attribute_by_name(attr_name).ok_or(LicenseException::AttributeUnresolved)?;
    Ok((base, attribute))
}
