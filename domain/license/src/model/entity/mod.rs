pub mod acquired_right;
pub mod attribute;
pub mod equipment;
pub mod equipment_type;
pub mod metric;
pub mod product;

#[rustfmt::skip]
pub use {
    acquired_right::AcquiredRight,
    attribute::{Attribute, AttributeValue, DataType},
    equipment::{Equipment, EquipmentChain},
    equipment_type::EquipmentType,
    metric::{Metric, MetricDefinition, MetricKind},
    product::{ProductData, ProductInfo, ProductUser},
};
