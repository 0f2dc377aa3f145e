use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attribute::Attribute;

/// A level in the equipment classification tree (e.g. partition, server,
/// cluster). `parent_id` points at the next level toward the root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentType {
    pub id: Uuid,
    pub type_name: String,
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl EquipmentType {
    pub fn attribute_by_id(&self, attr_id: Uuid) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == attr_id)
    }

    pub fn attribute_by_name(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }
}
