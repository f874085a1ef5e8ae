//! Structure Optimizer: flag structurally identical classes.
//!
//! Detection only: candidates are reported and logged, never merged. The
//! walk starts at the root and follows nested fields depth-first; it does
//! not mutate the model and is safe to skip entirely.

use std::collections::HashSet;

use tracing::debug;

use crate::model::{ClassModel, ClassRegistry, ParsedModel};

/// A nested class whose member set matches another registry class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateCandidate {
    pub class_name: String,
    pub same_as: String,
}

pub fn duplicate_candidates(model: &ParsedModel) -> Vec<DuplicateCandidate> {
    let mut out = Vec::new();
    let mut visited = HashSet::new();
    walk(&model.root, &model.registry, &mut visited, &mut out);
    out
}

fn walk(
    class_name: &str,
    registry: &ClassRegistry,
    visited: &mut HashSet<String>,
    out: &mut Vec<DuplicateCandidate>,
) {
    if !visited.insert(class_name.to_string()) {
        return;
    }
    let Some(model) = registry.get(class_name) else { return };

    for field in &model.fields {
        let Some(nested) = field.class_name.as_deref() else { continue };
        if !registry.has_members(nested) {
            continue;
        }
        if let Some(twin) = find_twin(registry, nested) {
            debug!(class = nested, same_as = %twin, "structurally identical class");
            out.push(DuplicateCandidate { class_name: nested.to_string(), same_as: twin });
        }
        walk(nested, registry, visited, out);
    }
}

/// A different class with the same member count and a name/type-matching
/// member set. First match in registry order.
fn find_twin(registry: &ClassRegistry, class_name: &str) -> Option<String> {
    let target = registry.get(class_name)?;
    registry
        .values()
        .find(|other| other.class_name != class_name && same_members(other, target))
        .map(|other| other.class_name.clone())
}

fn same_members(a: &ClassModel, b: &ClassModel) -> bool {
    a.fields.len() == b.fields.len()
        && a.fields.iter().all(|fa| {
            b.fields.iter().any(|fb| fa.name == fb.name && fa.ty == fb.ty)
        })
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build;
    use crate::model::Row;

    fn row(name: &str, ty: &str, level: u32) -> Row {
        Row { name: name.into(), ty: ty.into(), description: String::new(), level }
    }

    #[test]
    fn flags_structurally_identical_siblings() {
        let rows = vec![
            row("billing", "object", 0),
            row("street", "string", 1),
            row("city", "string", 1),
            row("shipping", "object", 0),
            row("street", "string", 1),
            row("city", "string", 1),
        ];
        let model = build(rows, "OrderModel");
        let candidates = duplicate_candidates(&model);
        assert!(candidates
            .iter()
            .any(|c| c.class_name == "OrderModelShipping" && c.same_as == "OrderModelBilling"));
    }

    #[test]
    fn does_not_mutate_the_model() {
        let rows = vec![
            row("a", "object", 0),
            row("x", "string", 1),
            row("b", "object", 0),
            row("x", "string", 1),
        ];
        let model = build(rows, "RootModel");
        let before = serde_json::to_string(&model).unwrap();
        let _ = duplicate_candidates(&model);
        assert_eq!(serde_json::to_string(&model).unwrap(), before);
    }

    #[test]
    fn unique_structures_produce_no_candidates() {
        let rows = vec![
            row("a", "object", 0),
            row("x", "string", 1),
            row("b", "object", 0),
            row("y", "integer", 1),
        ];
        let model = build(rows, "RootModel");
        assert!(duplicate_candidates(&model).is_empty());
    }
}
