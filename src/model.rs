//! Class-model data types shared by the front ends, the builder and codegen.
//!
//! The registry is the owned arena: a `Field` that denotes a nested type
//! carries only the generated `class_name`; the member list lives in the
//! registry's `ClassModel`. Registries are insertion-ordered and first
//! registration wins, so emission order is the discovery order of the parse.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ------------------------------ Type tags --------------------------------- //

/// The closed vocabulary describing a field's shape, as it appears in
/// response-schema tables: `integer`, `number`, `boolean`, `string`,
/// `object`, `array`, `array[<elem>]`, `null`. Unrecognized tags are kept
/// verbatim and resolve to `String` downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SchemaType {
    Integer,
    Number,
    Boolean,
    Str,
    Null,
    Object,
    Array { elem: Option<String> },
    Other(String),
}

impl SchemaType {
    pub fn from_tag(tag: &str) -> Self {
        let t = tag.trim();
        let lower = t.to_ascii_lowercase();
        match lower.as_str() {
            "integer" => SchemaType::Integer,
            "number" => SchemaType::Number,
            "boolean" => SchemaType::Boolean,
            "string" => SchemaType::Str,
            "null" => SchemaType::Null,
            "object" => SchemaType::Object,
            "array" => SchemaType::Array { elem: None },
            _ => {
                if let Some(inner) = lower.strip_prefix("array[").and_then(|s| s.strip_suffix(']')) {
                    if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                        return SchemaType::Array { elem: Some(inner.to_string()) };
                    }
                }
                SchemaType::Other(t.to_string())
            }
        }
    }

    pub fn tag(&self) -> String {
        match self {
            SchemaType::Integer => "integer".into(),
            SchemaType::Number => "number".into(),
            SchemaType::Boolean => "boolean".into(),
            SchemaType::Str => "string".into(),
            SchemaType::Null => "null".into(),
            SchemaType::Object => "object".into(),
            SchemaType::Array { elem: None } => "array".into(),
            SchemaType::Array { elem: Some(e) } => format!("array[{e}]"),
            SchemaType::Other(t) => t.clone(),
        }
    }

    /// Object and array fields open a named nested type during building.
    pub fn is_nested(&self) -> bool {
        matches!(self, SchemaType::Object | SchemaType::Array { .. })
    }
}

impl From<String> for SchemaType {
    fn from(tag: String) -> Self {
        SchemaType::from_tag(&tag)
    }
}

impl From<SchemaType> for String {
    fn from(ty: SchemaType) -> Self {
        ty.tag()
    }
}

// ------------------------------- Rows ------------------------------------- //

/// One row of the flat, indentation-leveled input sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub level: u32,
}

// --------------------------- Fields & classes ----------------------------- //

/// A single member of a class model.
///
/// Invariant: `class_name` is `Some` iff the field denotes a named nested
/// type (object-with-members or array); the member list of that type lives in
/// the registry, keyed by `class_name`. `type_str` is always consistent with
/// `ty` (it is what the Type Resolver derived at build time).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: SchemaType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub type_str: String,
    #[serde(default)]
    pub is_basic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

/// A registry root: a named class plus its member fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassModel {
    pub name: String,
    pub class_name: String,
    #[serde(rename = "type")]
    pub ty: SchemaType,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl ClassModel {
    pub fn new(name: impl Into<String>, class_name: impl Into<String>, ty: SchemaType) -> Self {
        Self { name: name.into(), class_name: class_name.into(), ty, fields: Vec::new() }
    }
}

// ------------------------------ Registry ---------------------------------- //

/// Insertion-ordered class name → model arena. First registration wins.
///
/// Serializes as an array of `[className, classModel]` pairs, the
/// cross-invocation handoff shape.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: IndexMap<String, ClassModel>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class unless the name is already taken. Returns whether the
    /// model was inserted.
    pub fn register(&mut self, model: ClassModel) -> bool {
        if self.classes.contains_key(&model.class_name) {
            return false;
        }
        self.classes.insert(model.class_name.clone(), model);
        true
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    pub fn get(&self, class_name: &str) -> Option<&ClassModel> {
        self.classes.get(class_name)
    }

    pub fn get_mut(&mut self, class_name: &str) -> Option<&mut ClassModel> {
        self.classes.get_mut(class_name)
    }

    pub fn has_members(&self, class_name: &str) -> bool {
        self.classes.get(class_name).is_some_and(|c| !c.fields.is_empty())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ClassModel)> {
        self.classes.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &ClassModel> {
        self.classes.values()
    }

    /// Classes that will actually be emitted (≥1 member).
    pub fn emittable(&self) -> impl Iterator<Item = &ClassModel> {
        self.classes.values().filter(|c| !c.fields.is_empty())
    }

    pub fn emittable_count(&self) -> usize {
        self.emittable().count()
    }
}

impl Serialize for ClassRegistry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.classes.iter())
    }
}

impl<'de> Deserialize<'de> for ClassRegistry {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(String, ClassModel)>::deserialize(deserializer)?;
        let mut registry = ClassRegistry::default();
        for (name, mut model) in pairs {
            // the key is authoritative if the two ever disagree
            model.class_name = name;
            registry.register(model);
        }
        Ok(registry)
    }
}

// ---------------------------- Parse result -------------------------------- //

/// Output of one parse invocation: the root class name plus the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedModel {
    pub root: String,
    #[serde(rename = "classes")]
    pub registry: ClassRegistry,
}

impl ParsedModel {
    /// True when the source had no extractable class-like structure.
    pub fn is_no_data(&self) -> bool {
        self.registry.emittable_count() == 0
    }
}

/// The named class plus every class it transitively references, in BFS order.
/// Used to emit a sub-model without its unrelated siblings.
pub fn related_classes(registry: &ClassRegistry, class_name: &str) -> ClassRegistry {
    let mut out = ClassRegistry::default();
    let mut queue = std::collections::VecDeque::new();

    if let Some(start) = registry.get(class_name) {
        out.register(start.clone());
        queue.push_back(class_name.to_string());
    }
    while let Some(current) = queue.pop_front() {
        let Some(model) = registry.get(&current) else { continue };
        for field in model.fields.clone() {
            let Some(dep) = field.class_name else { continue };
            if out.contains(&dep) {
                continue;
            }
            if let Some(dep_model) = registry.get(&dep) {
                out.register(dep_model.clone());
                queue.push_back(dep);
            }
        }
    }
    out
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_type_tags_round_trip() {
        for tag in ["integer", "number", "boolean", "string", "object", "array", "array[string]", "null"] {
            assert_eq!(SchemaType::from_tag(tag).tag(), tag);
        }
        assert_eq!(SchemaType::from_tag("array[object]"), SchemaType::Array { elem: Some("object".into()) });
        assert_eq!(SchemaType::from_tag("enum"), SchemaType::Other("enum".into()));
    }

    #[test]
    fn registry_first_registration_wins() {
        let mut reg = ClassRegistry::new();
        let mut first = ClassModel::new("a", "AModel", SchemaType::Object);
        first.fields.push(Field {
            name: "x".into(),
            ty: SchemaType::Integer,
            description: String::new(),
            type_str: "int".into(),
            is_basic: false,
            class_name: None,
        });
        assert!(reg.register(first));
        assert!(!reg.register(ClassModel::new("b", "AModel", SchemaType::Object)));
        assert_eq!(reg.get("AModel").unwrap().name, "a");
        assert!(reg.has_members("AModel"));
    }

    #[test]
    fn registry_serializes_as_pairs() {
        let mut reg = ClassRegistry::new();
        reg.register(ClassModel::new("root", "RootModel", SchemaType::Object));
        reg.register(ClassModel::new("data", "RootModelData", SchemaType::Object));
        let json = serde_json::to_value(&reg).unwrap();
        assert_eq!(json[0][0], "RootModel");
        assert_eq!(json[1][0], "RootModelData");

        let back: ClassRegistry = serde_json::from_value(json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.values().next().unwrap().class_name, "RootModel");
    }

    #[test]
    fn related_classes_follows_dependencies_only() {
        let mut reg = ClassRegistry::new();
        let mut root = ClassModel::new("root", "RootModel", SchemaType::Object);
        root.fields.push(Field {
            name: "data".into(),
            ty: SchemaType::Object,
            description: String::new(),
            type_str: "RootModelData".into(),
            is_basic: false,
            class_name: Some("RootModelData".into()),
        });
        reg.register(root);
        reg.register(ClassModel::new("data", "RootModelData", SchemaType::Object));
        reg.register(ClassModel::new("other", "UnrelatedModel", SchemaType::Object));

        let related = related_classes(&reg, "RootModel");
        assert_eq!(related.len(), 2);
        assert!(related.contains("RootModelData"));
        assert!(!related.contains("UnrelatedModel"));
    }
}
