//! Type Resolver: schema type tag → Dart type name.
//!
//! Pure lookups over a field plus the registry arena. The registry is needed
//! for one decision only: an `object` field renders as its generated class
//! name when that class has members, and as the untyped map otherwise.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{ClassRegistry, Field, SchemaType};

/// The untyped document type an empty object field degrades to.
pub const DYNAMIC_MAP: &str = "Map<String, dynamic>";

static LIST_ELEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^List<(.+)>$").unwrap());

/// Dart type for a scalar tag. Unrecognized tags (and `null`) read as `String`.
pub fn scalar_dart_type(ty: &SchemaType) -> &'static str {
    match ty {
        SchemaType::Integer => "int",
        SchemaType::Number => "double",
        SchemaType::Boolean => "bool",
        _ => "String",
    }
}

/// True when a bracketed array element tag denotes a scalar element
/// (`array[string]` yes, `array[object]` / bare `array` no).
pub fn is_basic_type(elem_tag: &str) -> bool {
    !elem_tag.is_empty() && elem_tag != "object"
}

/// The Dart type a field declaration uses.
pub fn dart_type(field: &Field, registry: &ClassRegistry) -> String {
    match &field.ty {
        SchemaType::Integer | SchemaType::Number | SchemaType::Boolean => {
            scalar_dart_type(&field.ty).to_string()
        }
        SchemaType::Array { .. } => {
            if field.type_str.is_empty() {
                "List".to_string()
            } else {
                field.type_str.clone()
            }
        }
        SchemaType::Object => match &field.class_name {
            Some(name) if registry.has_members(name) => name.clone(),
            _ => DYNAMIC_MAP.to_string(),
        },
        SchemaType::Str | SchemaType::Null | SchemaType::Other(_) => "String".to_string(),
    }
}

/// The element type of a collection field: parsed out of the precomputed
/// `List<...>` string, else mapped from the `array[tag]` element tag,
/// defaulting to `dynamic`.
pub fn element_type(field: &Field) -> String {
    if let Some(caps) = LIST_ELEM.captures(&field.type_str) {
        return caps[1].to_string();
    }
    if let SchemaType::Array { elem: Some(tag) } = &field.ty {
        if tag == "object" {
            if let Some(name) = &field.class_name {
                return name.clone();
            }
        } else {
            return scalar_dart_type(&SchemaType::from_tag(tag)).to_string();
        }
    }
    "dynamic".to_string()
}

// ------------------------------- Tests ------------------------------------ //
