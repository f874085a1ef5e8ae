//! Code Generator: class registry → Dart data-class source text.
//!
//! Each class with at least one member gets field declarations (with `///`
//! doc comments from the descriptions), an optional named-parameter
//! constructor, a `fromJson` factory, `toJson`, and `copyWith`. Emission is
//! loosely indented; `format` reindents by brace depth afterwards.
//!
//! `fromJson` has two rendering strategies: `Plain` inline casts, or the
//! `AccessorHelpers` convention (`getAsMap` / `getAsList` / `getAsInt` ...)
//! that defers absence handling to extension helpers on the JSON map.

use crate::model::{ClassModel, ClassRegistry, Field, SchemaType};
use crate::{names, resolve};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeStyle {
    #[default]
    Plain,
    AccessorHelpers,
}

/// How `fromJson`/`toJson` read and write one field.
enum DecodeCase {
    ArrayOfObject,
    ArrayOfScalar,
    ObjectWithMembers,
    ObjectOpaque,
    Scalar,
}

fn classify(field: &Field, registry: &ClassRegistry) -> DecodeCase {
    match &field.ty {
        SchemaType::Array { .. } => {
            let element_class = field
                .class_name
                .as_deref()
                .is_some_and(|n| registry.has_members(n));
            if !field.is_basic && element_class {
                DecodeCase::ArrayOfObject
            } else {
                DecodeCase::ArrayOfScalar
            }
        }
        SchemaType::Object => {
            if field.class_name.as_deref().is_some_and(|n| registry.has_members(n)) {
                DecodeCase::ObjectWithMembers
            } else {
                DecodeCase::ObjectOpaque
            }
        }
        _ => DecodeCase::Scalar,
    }
}

// ------------------------------ Generation -------------------------------- //

/// Render every emittable class of the registry, in registry order.
/// Pure over its inputs; calling twice yields identical text.
pub fn generate(registry: &ClassRegistry, style: DecodeStyle) -> String {
    let mut out = String::new();
    for class in registry.emittable() {
        emit_class(&mut out, class, registry, style);
    }
    out
}

fn emit_class(out: &mut String, class: &ClassModel, registry: &ClassRegistry, style: DecodeStyle) {
    let name = &class.class_name;
    out.push_str(&format!("class {name} {{\n"));

    for field in &class.fields {
        if !field.description.is_empty() {
            for line in field.description.split('\n') {
                out.push_str(&format!("/// {}\n", line.trim()));
            }
        }
        let dart = resolve::dart_type(field, registry);
        out.push_str(&format!("{dart}? {};\n", field.name));
    }

    out.push_str(&format!("\n{name}({{\n"));
    for field in &class.fields {
        out.push_str(&format!("this.{},\n", field.name));
    }
    out.push_str("});\n\n");

    emit_from_json(out, class, registry, style);
    out.push('\n');
    emit_to_json(out, class, registry);
    out.push('\n');
    emit_copy_with(out, class, registry);

    out.push_str("}\n\n");
}

fn emit_from_json(out: &mut String, class: &ClassModel, registry: &ClassRegistry, style: DecodeStyle) {
    let name = &class.class_name;
    out.push_str(&format!(
        "factory {name}.fromJson(Map<String, dynamic> json) => {name}(\n"
    ));
    for field in &class.fields {
        out.push_str(&format!("{}: {},\n", field.name, decode_expr(field, registry, style)));
    }
    out.push_str(");\n");
}

fn decode_expr(field: &Field, registry: &ClassRegistry, style: DecodeStyle) -> String {
    let key = &field.name;
    let dart = resolve::dart_type(field, registry);
    match classify(field, registry) {
        DecodeCase::ArrayOfObject => {
            let elem = resolve::element_type(field);
            format!(
                "(json['{key}'] as List<dynamic>?)?.map((e) => \
                 {elem}.fromJson(e as Map<String, dynamic>)).toList() ?? []"
            )
        }
        DecodeCase::ArrayOfScalar => match style {
            DecodeStyle::Plain => {
                let elem = resolve::element_type(field);
                format!("(json['{key}'] as List<dynamic>?)?.map((e) => e as {elem}).toList() ?? []")
            }
            DecodeStyle::AccessorHelpers => {
                format!("json.getAs{}('{key}')", names::capitalize(&dart))
            }
        },
        DecodeCase::ObjectWithMembers => match style {
            DecodeStyle::Plain => {
                format!("{dart}.fromJson(json['{key}'] as Map<String, dynamic>)")
            }
            DecodeStyle::AccessorHelpers => format!("{dart}.fromJson(json.getAsMap('{key}'))"),
        },
        // untyped object: pass the raw decoded value through unchanged
        DecodeCase::ObjectOpaque => format!("json['{key}']"),
        DecodeCase::Scalar => match style {
            DecodeStyle::Plain => format!("json['{key}'] as {dart}?"),
            DecodeStyle::AccessorHelpers => {
                format!("json.getAs{}('{key}')", names::capitalize(&dart))
            }
        },
    }
}

fn emit_to_json(out: &mut String, class: &ClassModel, registry: &ClassRegistry) {
    out.push_str("Map<String, dynamic> toJson() => {\n");
    for field in &class.fields {
        let key = &field.name;
        let expr = match classify(field, registry) {
            DecodeCase::ArrayOfObject => format!("{key}?.map((e) => e.toJson()).toList()"),
            DecodeCase::ObjectWithMembers => format!("{key}?.toJson() ?? {{}}"),
            _ => key.clone(),
        };
        out.push_str(&format!("'{key}': {expr},\n"));
    }
    out.push_str("};\n");
}

fn emit_copy_with(out: &mut String, class: &ClassModel, registry: &ClassRegistry) {
    let name = &class.class_name;
    out.push_str(&format!("{name} copyWith({{\n"));
    for field in &class.fields {
        let dart = resolve::dart_type(field, registry);
        out.push_str(&format!("{dart}? {},\n", field.name));
    }
    out.push_str("}) {\n");
    out.push_str(&format!("return {name}(\n"));
    for field in &class.fields {
        out.push_str(&format!("{0}: {0} ?? this.{0},\n", field.name));
    }
    out.push_str(");\n}\n");
}

// ------------------------------ Formatter --------------------------------- //

/// Brace-depth reindenter. Trims each line, bumps the indent after a line
/// ending in `{`, drops it (floored at zero) before a line starting with
/// `}`. Not syntax-aware; stable for brace-balanced input.
pub fn format(source: &str) -> String {
    let mut indent: usize = 0;
    let mut lines = Vec::new();
    for raw in source.lines() {
        let line = raw.trim();
        if line.starts_with('}') {
            indent = indent.saturating_sub(1);
        }
        if line.is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{}{}", "  ".repeat(indent), line));
        }
        if line.ends_with('{') {
            indent += 1;
        }
    }
    lines.join("\n")
}

// ------------------------------- Tests ------------------------------------ //
