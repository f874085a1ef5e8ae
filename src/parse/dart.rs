//! Dart-snippet front end: re-ingest previously generated (or hand-written)
//! data classes so their structure can be regenerated or merged.
//!
//! Regex-level extraction, not a Dart parser: `class Name { ... }` blocks and
//! the `final Type name;` member lines inside them. Method bodies and
//! anything else with nested braces fall outside the block capture and are
//! simply not seen, which is what the snippet workflow wants.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{ClassModel, ClassRegistry, Field, ParsedModel, SchemaType};
use crate::parse::DEFAULT_ROOT_NAME;

static CLASS_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"class\s+([A-Za-z_$][\w$]*)\s*\{([^{}]*)\}").unwrap());

static MEMBER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:final\s+)?([A-Za-z_$][\w$<>, ]*?)\??\s+([A-Za-z_$][\w$]*)\s*;\s*$")
        .unwrap()
});

static LIST_ELEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^List<(.+)>$").unwrap());

pub fn parse(input: &str) -> ParsedModel {
    // first pass: member types can reference classes declared later
    let known: Vec<String> = CLASS_BLOCK
        .captures_iter(input)
        .map(|caps| caps[1].to_string())
        .collect();

    let mut registry = ClassRegistry::new();
    let mut root = None;
    for caps in CLASS_BLOCK.captures_iter(input) {
        let class_name = &caps[1];
        if root.is_none() {
            root = Some(class_name.to_string());
        }
        let mut class = ClassModel::new(class_name, class_name, SchemaType::Object);
        for member in MEMBER_LINE.captures_iter(&caps[2]) {
            class.fields.push(member_field(&member[1], &member[2], &known));
        }
        registry.register(class);
    }

    ParsedModel {
        root: root.unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string()),
        registry,
    }
}

fn scalar_tag(dart_ty: &str) -> Option<SchemaType> {
    match dart_ty {
        "int" => Some(SchemaType::Integer),
        "double" => Some(SchemaType::Number),
        "bool" => Some(SchemaType::Boolean),
        "String" => Some(SchemaType::Str),
        _ => None,
    }
}

fn member_field(dart_ty: &str, name: &str, known: &[String]) -> Field {
    let mut field = Field {
        name: name.to_string(),
        ty: SchemaType::Object,
        description: String::new(),
        type_str: dart_ty.to_string(),
        is_basic: false,
        class_name: None,
    };

    if let Some(tag) = scalar_tag(dart_ty) {
        field.ty = tag;
    } else if let Some(caps) = LIST_ELEM.captures(dart_ty) {
        let elem = caps[1].trim();
        if let Some(tag) = scalar_tag(elem) {
            field.ty = SchemaType::Array { elem: Some(tag.tag()) };
            field.is_basic = true;
        } else if known.iter().any(|k| k == elem) {
            field.ty = SchemaType::Array { elem: Some("object".into()) };
            field.class_name = Some(elem.to_string());
        } else {
            field.ty = SchemaType::Array { elem: None };
        }
    } else if dart_ty == "List" {
        field.ty = SchemaType::Array { elem: None };
    } else if known.iter().any(|k| k == dart_ty) {
        field.class_name = Some(dart_ty.to_string());
    }
    // a Map or any unknown type stays an opaque object
    field
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_extracted_with_scalar_tags() {
        let model = parse(
            "class UserModel {\n  final int? id;\n  final String? name;\n  final bool? active;\n}",
        );
        assert_eq!(model.root, "UserModel");
        let class = model.registry.get("UserModel").unwrap();
        assert_eq!(class.fields.len(), 3);
        assert_eq!(class.fields[0].ty, SchemaType::Integer);
        assert_eq!(class.fields[0].type_str, "int");
        assert_eq!(class.fields[1].ty, SchemaType::Str);
        assert_eq!(class.fields[2].ty, SchemaType::Boolean);
    }

    #[test]
    fn cross_class_references_resolve_in_either_order() {
        let model = parse(
            "class OrderModel {\n  final ItemModel? item;\n  final List<ItemModel>? extras;\n}\n\
             class ItemModel {\n  final int? id;\n}",
        );
        let order = model.registry.get("OrderModel").unwrap();
        assert_eq!(order.fields[0].ty, SchemaType::Object);
        assert_eq!(order.fields[0].class_name.as_deref(), Some("ItemModel"));
        assert_eq!(
            order.fields[1].ty,
            SchemaType::Array { elem: Some("object".into()) }
        );
        assert_eq!(order.fields[1].class_name.as_deref(), Some("ItemModel"));
    }

    #[test]
    fn scalar_lists_and_opaque_maps() {
        let model = parse(
            "class M {\n  final List<String>? tags;\n  final Map<String, dynamic>? blob;\n  final List? raw;\n}",
        );
        let class = model.registry.get("M").unwrap();
        assert_eq!(class.fields[0].ty, SchemaType::Array { elem: Some("string".into()) });
        assert!(class.fields[0].is_basic);
        assert_eq!(class.fields[1].ty, SchemaType::Object);
        assert!(class.fields[1].class_name.is_none());
        assert_eq!(class.fields[2].ty, SchemaType::Array { elem: None });
    }

    #[test]
    fn snippet_without_classes_yields_no_data() {
        let model = parse("void main() {}");
        assert!(model.is_no_data());
        assert_eq!(model.root, DEFAULT_ROOT_NAME);
    }
}
