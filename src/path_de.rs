use serde::de::DeserializeOwned;

use crate::parse::ParseError;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, ParseError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| ParseError::InvalidJson {
        path: err.path().to_string(),
        source: err.into_inner(),
    })
}
