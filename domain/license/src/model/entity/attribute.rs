use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Data type of an equipment attribute, with its numeric wire form.
#[derive(Default, FromPrimitive, ToPrimitive, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    #[default]
    String = 1,
    Int = 2,
    Float = 3,
}

/// A concrete attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Int(i32),
    Float(f32),
    Str(String),
}

/// An attribute definition on an equipment type.
///
/// `val`/`old_val` form the simulation overlay: `old_val` is the stored value
/// and `val` a proposed one, shadowing it only while `simulated` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: Uuid,
    pub name: String,
    pub data_type: DataType,
    #[serde(default)]
    pub is_identifier: bool,
    #[serde(default)]
    pub is_displayed: bool,
    #[serde(default)]
    pub is_searchable: bool,
    #[serde(default)]
    pub mapped_to: String,
    #[serde(default)]
    pub simulated: bool,
    #[serde(default)]
    pub val: Option<AttributeValue>,
    #[serde(default)]
    pub old_val: Option<AttributeValue>,
}

impl Attribute {
    /// Numeric reading of the attribute. Simulated values are only visible when
    /// both asked for and present; string or missing values read as zero.
    pub fn numeric_value(&self, use_simulated: bool) -> f64 {
        let value = if use_simulated && self.simulated {
            self.val.as_ref()
        } else {
            self.old_val.as_ref()
        };
        match (self.data_type, value) {
            (DataType::Int, Some(AttributeValue::Int(v))) => f64::from(*v),
            (DataType::Float, Some(AttributeValue::Float(v))) => f64::from(*v),
            _ => 0.0,
        }
    }
}
