//! Equipment type hierarchy validation: building the ordered chain of types
//! from a start type up to the root, and locating metric levels within it.

use domain_license::{
    exception::{LicenseException, LicenseResult},
    model::entity::EquipmentType,
};
use uuid::Uuid;

/// Ordered type chain from the start type toward the root. Element 0 is the
/// start type; each following element is the parent of the one before it.
///
/// A `parent_id` pointing at an absent type ends the walk; the chain is
/// bounded by the catalog size so malformed parent links cannot loop.
pub fn build_type_chain(
    types: &[EquipmentType],
    start_type_id: Uuid,
) -> LicenseResult<Vec<EquipmentType>> {
    let start = type_by_id(types, start_type_id).ok_or(LicenseException::EquipmentTypeNotFound)?;
    let mut chain = vec![start.clone()];
    let mut parent_id = start.parent_id;
    while let Some(pid) = parent_id {
        if chain.len() >= types.len() {
            break;
        }
        let Some(parent) = type_by_id(types, pid) else {
            break;
        };
        chain.push(parent.clone());
        parent_id = parent.parent_id;
    }
    Ok(chain)
}

/// First index `>= from_index` whose type id equals `type_id`. Ordering, not
/// mere membership: an occurrence before `from_index` does not count.
pub fn find_level(chain: &[EquipmentType], from_index: usize, type_id: Uuid) -> Option<usize> {
    chain.iter().enumerate().skip(from_index).find(|(_, t)| t.id == type_id).map(|(i, _)| i)
}

pub fn type_by_id(types: &[EquipmentType], id: Uuid) -> Option<&EquipmentType> {
    types.iter().find(|t| t.id == id)
}

pub fn type_by_name<'a>(types: &'a [EquipmentType], name: &str) -> Option<&'a EquipmentType> {
    types.iter().find(|t| t.type_name == name)
}
