//! Model Builder: flat, indentation-leveled row sequence → class model arena.
//!
//! Single forward pass with a stack of currently-open classes. The stack top
//! is the insertion target for new fields; row levels drive pushes and pops.
//! Irregular level jumps are clamped, never rejected. Classes popped with no
//! members are retroactively reclassified as an opaque `List<Map>` so empty
//! classes never reach codegen.

use tracing::debug;

use crate::model::{ClassModel, ClassRegistry, Field, ParsedModel, Row, SchemaType};
use crate::{names, resolve};

/// An open ancestor on the parse stack. `sealed` marks duplicate-named
/// occurrences: the registry entry belongs to the first occurrence, so a
/// sealed handle swallows appends instead of double-populating it.
struct OpenClass {
    name: String,
    sealed: bool,
}

pub fn build<I>(rows: I, root_name: &str) -> ParsedModel
where
    I: IntoIterator<Item = Row>,
{
    let mut registry = ClassRegistry::new();
    registry.register(ClassModel::new(root_name, root_name, SchemaType::Object));

    let mut stack = vec![OpenClass { name: root_name.to_string(), sealed: false }];

    for row in rows {
        let name = row.name.trim();
        let tag = row.ty.trim();
        if name.is_empty() || tag.is_empty() {
            continue;
        }
        let level = row.level as usize;

        reconcile_depth(&mut stack, level, &mut registry);

        let parent = stack.last().expect("root stays on the stack");
        let parent_name = parent.name.clone();
        let parent_sealed = parent.sealed;

        let mut field = Field {
            name: name.to_string(),
            ty: SchemaType::from_tag(tag),
            description: row.description.trim().to_string(),
            type_str: String::new(),
            is_basic: false,
            class_name: None,
        };
        debug!(field = %field.name, tag, level, parent = %parent_name, "row");

        if field.ty.is_nested() {
            let class_name = names::class_name_from_field(&field.name, &parent_name);
            field.class_name = Some(class_name.clone());

            if let SchemaType::Array { elem } = &field.ty {
                let elem_tag = elem.clone().unwrap_or_default();
                field.is_basic = resolve::is_basic_type(&elem_tag);
                let elem_type = if field.is_basic {
                    resolve::scalar_dart_type(&SchemaType::from_tag(&elem_tag)).to_string()
                } else {
                    class_name.clone()
                };
                field.type_str = format!("List<{elem_type}>");
            } else {
                field.type_str = class_name.clone();
            }

            let sealed = !registry
                .register(ClassModel::new(&field.name, &class_name, field.ty.clone()));
            if sealed {
                debug!(class = %class_name, "duplicate class name, keeping first registration");
            }
            stack.push(OpenClass { name: class_name, sealed: sealed || parent_sealed });
        } else {
            field.type_str = resolve::dart_type(&field, &registry);
        }

        if !parent_sealed {
            if let Some(parent_model) = registry.get_mut(&parent_name) {
                parent_model.fields.push(field);
            }
        }
    }

    // remaining open ancestors are simply discarded; their registry entries
    // were stamped when opened
    ParsedModel { root: root_name.to_string(), registry }
}

/// Pop until the stack height matches `level + 1`, clamping on malformed
/// levels (never below the root). A popped class with no members is
/// reclassified on its referencing field as an opaque collection.
fn reconcile_depth(stack: &mut Vec<OpenClass>, level: usize, registry: &mut ClassRegistry) {
    while stack.len() > level + 1 {
        let popped = stack.pop().expect("height checked above");
        debug!(class = %popped.name, depth = stack.len(), "pop");
        if popped.sealed {
            continue;
        }
        let is_empty = registry.get(&popped.name).is_some_and(|c| c.fields.is_empty());
        if !is_empty {
            continue;
        }
        let Some(parent) = stack.last() else { continue };
        let Some(parent_model) = registry.get_mut(&parent.name) else { continue };
        let referencing = parent_model
            .fields
            .iter_mut()
            .rev()
            .find(|f| f.class_name.as_deref() == Some(popped.name.as_str()));
        if let Some(field) = referencing {
            if !field.is_basic {
                debug!(class = %popped.name, "empty class reclassified as List<Map>");
                field.type_str = "List<Map>".to_string();
            }
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
