//! Polymorphic parser front ends.
//!
//! One implementation per source format, selected by an explicit format tag
//! (never by sniffing). Every front end yields the same `ParsedModel` shape;
//! a source with no class-like structure yields an empty/only-empty-classes
//! registry, not an error; the CLI turns that into a "no valid data" notice.
pub mod dart;
pub mod html;
pub mod json;
pub mod rows;

use crate::model::ParsedModel;

/// Root class name used when neither the caller nor the source provides one.
pub const DEFAULT_ROOT_NAME: &str = "ResponseModel";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceFormat {
    /// Saved docs-page HTML with a leveled response-parameter table.
    Html,
    /// A JSON document (object) whose keys become fields.
    Json,
    /// Dart class declarations with typed member lines.
    Dart,
    /// A JSON array of `{name, type, description, level}` rows.
    Rows,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid JSON at {path}: {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("top-level JSON value must be an object")]
    UnsupportedRoot,
}

/// Parse `input` according to the format tag. `root_name` overrides any name
/// the source itself could supply (the HTML front end can derive one from a
/// URL found on the page).
pub fn parse(
    format: SourceFormat,
    input: &str,
    root_name: Option<&str>,
) -> Result<ParsedModel, ParseError> {
    match format {
        SourceFormat::Html => Ok(html::parse(input, root_name)),
        SourceFormat::Json => json::parse(input, root_name.unwrap_or(DEFAULT_ROOT_NAME)),
        SourceFormat::Dart => Ok(dart::parse(input)),
        SourceFormat::Rows => rows::parse(input, root_name.unwrap_or(DEFAULT_ROOT_NAME)),
    }
}
