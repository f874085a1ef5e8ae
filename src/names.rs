//! Class-name derivation heuristics.
//!
//! Two sources of names: URL path segments (for the root class of a docs
//! page) and field name + nearest enclosing class name (for nested classes).
//! Both are deterministic pure string transforms.

use once_cell::sync::Lazy;
use regex::Regex;

/// Right-to-left path accumulation stops once the running name reaches this.
const MAX_CLASS_NAME_LEN: usize = 20;

static VERB_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(get|post|put|delete|patch|find|%7b)").unwrap());

/// A whole-segment path placeholder: `{id}` or its URL-encoded form.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\{[A-Za-z0-9_]*\}|%7[Bb][A-Za-z0-9_]*%7[Dd])$").unwrap());

/// Names already ending in a noun-ish suffix do not get `Model` appended.
static NOUN_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(Data|Page|Info|Details|List|Collection|Set|Array)$").unwrap());

/// Uppercase the first character, lowercase the second, keep the rest.
///
/// Not plain title-casing: `getUserInfo` → `GetUserInfo`, `ABC` → `AbC`.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out: String = first.to_uppercase().collect();
    if let Some(second) = chars.next() {
        out.extend(second.to_lowercase());
        out.extend(chars);
    }
    out
}

/// Derive a root class name from URL path segments.
///
/// Segments are consumed right to left; placeholder segments are dropped,
/// HTTP-verb-ish prefixes stripped, and each `-`/`_`-separated word is
/// capitalized and prepended until the name is long enough. The result gets
/// a `Model` suffix unless it already ends in a recognized noun.
pub fn class_name_from_path<S: AsRef<str>>(segments: &[S]) -> String {
    let mut class_name = String::new();
    for segment in segments.iter().rev() {
        let segment = segment.as_ref();
        if segment.is_empty() || PLACEHOLDER.is_match(segment) {
            continue;
        }
        let segment = VERB_PREFIX.replace(segment, "");
        for word in segment.split(['-', '_']) {
            if word.is_empty() {
                continue;
            }
            class_name.insert_str(0, &capitalize(word));
        }
        if class_name.len() >= MAX_CLASS_NAME_LEN {
            break;
        }
    }
    if !NOUN_SUFFIX.is_match(&class_name) {
        class_name.push_str("Model");
    }
    class_name
}

/// Nested class name: nearest enclosing class name + camel-joined field name.
/// `generateClassName("page_info", "UserModel")` → `UserModelPageInfo`.
pub fn class_name_from_field(field_name: &str, ancestor: &str) -> String {
    let camel: String = field_name.split('_').map(capitalize).collect();
    format!("{ancestor}{camel}")
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_only_lowers_second_char() {
        assert_eq!(capitalize("user"), "User");
        assert_eq!(capitalize("ABC"), "AbC");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn path_name_strips_placeholder_and_suffixes_model() {
        let name = class_name_from_path(&["users", "{id}", "profile"]);
        assert_eq!(name, "UsersProfileModel");
    }

    #[test]
    fn path_name_strips_verb_prefixes() {
        let name = class_name_from_path(&["user", "getProfile"]);
        // "getProfile" loses its verb prefix before capitalization
        assert_eq!(name, "UserProfileModel");
    }

    #[test]
    fn path_name_keeps_recognized_noun_suffix() {
        let name = class_name_from_path(&["order", "page"]);
        assert!(name.ends_with("Page"));
        assert!(!name.ends_with("Model"));
    }

    #[test]
    fn path_name_stops_at_length_threshold() {
        let name = class_name_from_path(&["alpha", "beta", "gamma", "delta", "epsilon"]);
        // "Epsilon" (7) → "DeltaEpsilon" (12) → "GammaDeltaEpsilon" (17)
        // → "BetaGammaDeltaEpsilon" (21) reaches the threshold; "alpha" unused.
        assert_eq!(name, "BetaGammaDeltaEpsilonModel");
    }

    #[test]
    fn path_name_splits_segment_words() {
        let name = class_name_from_path(&["user-profile"]);
        // words of one segment are prepended in order
        assert_eq!(name, "ProfileUserModel");
    }

    #[test]
    fn field_name_is_ancestor_qualified() {
        assert_eq!(class_name_from_field("data", "UserModel"), "UserModelData");
        assert_eq!(class_name_from_field("page_info", "OrderModel"), "OrderModelPageInfo");
    }
}
