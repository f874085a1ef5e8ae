//! JSON-document front end: walk an object's keys with inferred type tags.
//!
//! Nested objects and arrays-of-object recurse into synthetic sub-models
//! named `<Capitalize(key)>Model`. Integers and floats are told apart (the
//! table vocabulary has both tags); everything else follows the scalar
//! inference of the type vocabulary.

use serde_json::Value;

use crate::model::{ClassModel, ClassRegistry, Field, ParsedModel, SchemaType};
use crate::parse::ParseError;
use crate::{names, path_de, resolve};

pub fn parse(input: &str, root_name: &str) -> Result<ParsedModel, ParseError> {
    let value: Value = path_de::from_str_with_path(input)?;
    let Value::Object(map) = value else {
        return Err(ParseError::UnsupportedRoot);
    };
    let mut registry = ClassRegistry::new();
    convert_object(&map, root_name, &mut registry);
    Ok(ParsedModel { root: root_name.to_string(), registry })
}

fn infer_tag(value: &Value) -> SchemaType {
    match value {
        Value::Null => SchemaType::Null,
        Value::Bool(_) => SchemaType::Boolean,
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                SchemaType::Integer
            } else {
                SchemaType::Number
            }
        }
        Value::String(_) => SchemaType::Str,
        Value::Array(_) => SchemaType::Array { elem: None },
        Value::Object(_) => SchemaType::Object,
    }
}

fn convert_object(
    map: &serde_json::Map<String, Value>,
    class_name: &str,
    registry: &mut ClassRegistry,
) {
    // first registration wins; a duplicate name keeps the first structure
    if !registry.register(ClassModel::new(class_name, class_name, SchemaType::Object)) {
        return;
    }

    let mut fields = Vec::with_capacity(map.len());
    for (key, value) in map {
        let mut field = Field {
            name: key.clone(),
            ty: infer_tag(value),
            description: String::new(),
            type_str: String::new(),
            is_basic: false,
            class_name: None,
        };

        match value {
            Value::Object(inner) => {
                let sub_name = format!("{}Model", names::capitalize(key));
                field.type_str = sub_name.clone();
                field.class_name = Some(sub_name.clone());
                convert_object(inner, &sub_name, registry);
            }
            Value::Array(items) => match items.first() {
                Some(Value::Object(inner)) => {
                    let sub_name = format!("{}Model", names::capitalize(key));
                    field.ty = SchemaType::Array { elem: Some("object".into()) };
                    field.type_str = format!("List<{sub_name}>");
                    field.class_name = Some(sub_name.clone());
                    convert_object(inner, &sub_name, registry);
                }
                Some(first) if !matches!(first, Value::Array(_) | Value::Null) => {
                    let elem_tag = infer_tag(first);
                    field.ty = SchemaType::Array { elem: Some(elem_tag.tag()) };
                    field.is_basic = true;
                    field.type_str =
                        format!("List<{}>", resolve::scalar_dart_type(&elem_tag));
                }
                _ => {
                    // empty array, or elements we cannot name: plain List
                    field.type_str = "List".to_string();
                }
            },
            _ => {
                field.type_str = resolve::dart_type(&field, registry);
            }
        }
        fields.push(field);
    }

    if let Some(class) = registry.get_mut(class_name) {
        class.fields = fields;
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{self, DecodeStyle};

    #[test]
    fn scalar_leaves_become_scalar_fields() {
        let model = parse(r#"{"id": 1, "name": "John", "email": "john@x.com"}"#, "RootModel").unwrap();
        let root = model.registry.get("RootModel").unwrap();
        assert_eq!(root.fields.len(), 3);
        assert_eq!(root.fields[0].type_str, "int");
        assert_eq!(root.fields[1].type_str, "String");
        assert!(!model.is_no_data());
    }

    #[test]
    fn floats_and_integers_get_distinct_tags() {
        let model = parse(r#"{"count": 3, "score": 4.5}"#, "RootModel").unwrap();
        let root = model.registry.get("RootModel").unwrap();
        assert_eq!(root.fields[0].ty, SchemaType::Integer);
        assert_eq!(root.fields[1].ty, SchemaType::Number);
    }

    #[test]
    fn nested_object_recurses_into_sub_model() {
        let model = parse(
            r#"{"user": {"id": 1, "addresses": [{"street": "123 Main St", "city": "Anytown"}]}}"#,
            "RootModel",
        )
        .unwrap();
        assert!(model.registry.has_members("UserModel"));
        assert!(model.registry.has_members("AddressesModel"));

        let user = model.registry.get("UserModel").unwrap();
        assert_eq!(user.fields[1].type_str, "List<AddressesModel>");
        assert_eq!(user.fields[1].ty, SchemaType::Array { elem: Some("object".into()) });
    }

    #[test]
    fn scalar_array_infers_element_type() {
        let model = parse(r#"{"tags": ["a", "b"], "empty": []}"#, "RootModel").unwrap();
        let root = model.registry.get("RootModel").unwrap();
        assert_eq!(root.fields[0].type_str, "List<String>");
        assert!(root.fields[0].is_basic);
        assert_eq!(root.fields[1].type_str, "List");
    }

    #[test]
    fn top_level_array_is_rejected_at_the_boundary() {
        assert!(matches!(parse("[1, 2]", "RootModel"), Err(ParseError::UnsupportedRoot)));
    }

    #[test]
    fn generated_decode_encode_pair_round_trips_raw_scalars() {
        let model = parse(r#"{"id": 1, "name": "John"}"#, "RootModel").unwrap();
        let src = codegen::generate(&model.registry, DecodeStyle::Plain);
        // decode: direct keyed casts; encode: raw re-emission
        assert!(src.contains("id: json['id'] as int?"));
        assert!(src.contains("name: json['name'] as String?"));
        assert!(src.contains("'id': id,"));
        assert!(src.contains("'name': name,"));
    }
}
