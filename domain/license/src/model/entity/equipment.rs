use serde::{Deserialize, Serialize};

/// One concrete hardware node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    /// Storage-side node id.
    pub id: String,
    /// Human-readable equipment identifier.
    pub equip_id: String,
    pub type_name: String,
}

/// Ancestry of one equipment individual, nearest-first: element 0 is the
/// equipment itself and the parent of element `i` is element `i + 1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentChain {
    pub nodes: Vec<Equipment>,
}

impl EquipmentChain {
    pub fn new(nodes: Vec<Equipment>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Topmost ancestor in the chain.
    pub fn top(&self) -> Option<&Equipment> {
        self.nodes.last()
    }

    /// First node of the given type, walking from the equipment toward the
    /// root; falls back to the top when no node matches.
    pub fn node_of_type(&self, type_name: &str) -> Option<&Equipment> {
        self.nodes.iter().find(|n| n.type_name == type_name).or_else(|| self.top())
    }
}
