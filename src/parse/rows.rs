//! Row-sequence front end: a JSON array of `{name, type, description, level}`
//! objects, the raw interface every scraper-side collaborator can target.

use crate::build;
use crate::model::{ParsedModel, Row};
use crate::parse::ParseError;
use crate::path_de;

pub fn parse(input: &str, root_name: &str) -> Result<ParsedModel, ParseError> {
    let rows: Vec<Row> = path_de::from_str_with_path(input)?;
    Ok(build::build(rows, root_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_array_builds_a_model() {
        let input = r#"[
            {"name": "data", "type": "object", "description": "payload", "level": 0},
            {"name": "id", "type": "integer", "level": 1}
        ]"#;
        let model = parse(input, "UserModel").unwrap();
        assert_eq!(model.registry.len(), 2);
        assert!(model.registry.has_members("UserModelData"));
    }

    #[test]
    fn invalid_json_reports_the_path() {
        let err = parse(r#"[{"name": "x", "type": 3}]"#, "M").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("[0].type"), "got: {msg}");
    }
}
