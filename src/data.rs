//! Structured data files and the file-reading capability.
//!
//! siteprobe never opens files itself. Everything it reads goes through a
//! [`ReadFile`] implementation supplied by the caller, which returns `None`
//! for anything missing or unreadable. Config files are decoded by extension:
//!
//! | Extension | Parser |
//! |-----------|--------|
//! | `.yml`, `.yaml` | `serde_yaml_ng` |
//! | `.toml` | `toml` |
//! | `.json` | `serde_json` |
//!
//! Every format is normalised to a [`serde_json::Value`] so generator code can
//! query any config with the same accessors.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Access to the contents of repository files.
///
/// Implementations return `None` for missing or unreadable files rather than
/// failing; callers treat both the same way.
pub trait ReadFile {
    fn read_file(&self, path: &str) -> Option<String>;
}

impl<F> ReadFile for F
where
    F: Fn(&str) -> Option<String>,
{
    fn read_file(&self, path: &str) -> Option<String> {
        self(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataFormat {
    Yaml,
    Toml,
    Json,
}

impl DataFormat {
    fn from_path(path: &str) -> Option<Self> {
        let (_, extension) = path.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "yml" | "yaml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    fn parse(self, contents: &str) -> Result<Value, DataError> {
        Ok(match self {
            Self::Yaml => serde_yaml_ng::from_str(contents)?,
            Self::Toml => {
                let table: toml::Value = toml::from_str(contents)?;
                serde_json::to_value(table)?
            }
            Self::Json => serde_json::from_str(contents)?,
        })
    }
}

/// Reads and decodes a structured data file.
///
/// Returns `Ok(None)` when the extension is not a known data format, the file
/// is missing or empty, or the decoded value is not an object. Malformed
/// contents are an error.
pub fn parse_data_file(path: &str, reader: &dyn ReadFile) -> Result<Option<Value>, DataError> {
    let Some(format) = DataFormat::from_path(path) else {
        return Ok(None);
    };

    let contents = match reader.read_file(path) {
        Some(contents) if !contents.is_empty() => contents,
        _ => return Ok(None),
    };

    let value = format.parse(&contents)?;
    Ok(value.is_object().then_some(value))
}

/// Decodes an HTML entity written with or without `&` and `;`.
///
/// Jekyll configs write smart quotes as bare names (`lsquo`), Hugo configs as
/// full entities (`&lsquo;`). Single characters are returned as-is.
pub fn decode_entity(entity: &str) -> String {
    if entity.chars().count() == 1 {
        return entity.to_string();
    }

    let name = entity.trim_start_matches('&').trim_end_matches(';');
    let wrapped = format!("&{name};");
    html_escape::decode_html_entities(&wrapped).into_owned()
}

/// Looks up a string at a dotted key path, ignoring non-string values.
pub fn string_at<'a>(value: Option<&'a Value>, keys: &[&str]) -> Option<&'a str> {
    value_at(value, keys)?.as_str()
}

/// True when the value at a dotted key path is JSON-truthy.
pub fn truthy_at(value: Option<&Value>, keys: &[&str]) -> bool {
    value_at(value, keys).is_some_and(is_truthy)
}

/// Walks object keys, returning `None` as soon as one is missing.
pub fn value_at<'a>(value: Option<&'a Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(value?, |current, key| current.get(key))
}

/// JavaScript-style truthiness, which is what SSG config flags follow.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mock_reader(path: &str) -> Option<String> {
        if path.ends_with(".yml") || path.ends_with(".yaml") {
            Some(format!("path: {path}"))
        } else if path.ends_with(".toml") {
            Some(format!("path = \"{path}\""))
        } else if path.ends_with(".json") {
            Some(format!("{{\"path\": \"{path}\"}}"))
        } else {
            Some(String::new())
        }
    }

    // =========================================================================
    // parse_data_file
    // =========================================================================

    #[test]
    fn parses_each_format() {
        for path in ["_config.yml", "hugo.yaml", "hugo.toml", "hugo.json"] {
            let parsed = parse_data_file(path, &mock_reader).unwrap();
            assert_eq!(parsed, Some(json!({ "path": path })));
        }
    }

    #[test]
    fn extension_is_case_insensitive() {
        let reader = |_: &str| Some("title: Hello".to_string());
        let parsed = parse_data_file("CONFIG.YML", &reader).unwrap();
        assert_eq!(parsed, Some(json!({ "title": "Hello" })));
    }

    #[test]
    fn unknown_extension_is_not_parseable() {
        assert_eq!(parse_data_file("eleventy.config.js", &mock_reader).unwrap(), None);
        assert_eq!(parse_data_file("Gemfile", &mock_reader).unwrap(), None);
    }

    #[test]
    fn missing_or_empty_file_is_none() {
        let missing = |_: &str| -> Option<String> { None };
        assert_eq!(parse_data_file("_config.yml", &missing).unwrap(), None);
        let empty = |_: &str| Some(String::new());
        assert_eq!(parse_data_file("_config.yml", &empty).unwrap(), None);
    }

    #[test]
    fn non_object_value_is_none() {
        let scalar = |_: &str| Some("just a string".to_string());
        assert_eq!(parse_data_file("notes.yml", &scalar).unwrap(), None);
        let list = |_: &str| Some("[1, 2, 3]".to_string());
        assert_eq!(parse_data_file("list.json", &list).unwrap(), None);
    }

    #[test]
    fn malformed_contents_are_errors() {
        let broken_json = |_: &str| Some("{ nope".to_string());
        assert!(matches!(
            parse_data_file("vercel.json", &broken_json),
            Err(DataError::Json(_))
        ));
        let broken_toml = |_: &str| Some("[build\ncommand =".to_string());
        assert!(matches!(
            parse_data_file("netlify.toml", &broken_toml),
            Err(DataError::Toml(_))
        ));
        let broken_yaml = |_: &str| Some("a: [unclosed".to_string());
        assert!(matches!(
            parse_data_file("_config.yml", &broken_yaml),
            Err(DataError::Yaml(_))
        ));
    }

    #[test]
    fn toml_tables_become_objects() {
        let reader = |_: &str| Some("[build]\npublish = \"out\"\ncommand = \"webpack\"".to_string());
        let parsed = parse_data_file("netlify.toml", &reader).unwrap().unwrap();
        assert_eq!(string_at(Some(&parsed), &["build", "publish"]), Some("out"));
        assert_eq!(string_at(Some(&parsed), &["build", "command"]), Some("webpack"));
    }

    // =========================================================================
    // decode_entity
    // =========================================================================

    #[test]
    fn decodes_entities() {
        assert_eq!(decode_entity("&amp;"), "&");
        assert_eq!(decode_entity("&copy;"), "©");
        assert_eq!(decode_entity("&lsquo;"), "\u{2018}");
        assert_eq!(decode_entity("&rsquo;"), "\u{2019}");
        assert_eq!(decode_entity("&ldquo;"), "\u{201c}");
        assert_eq!(decode_entity("&rdquo;"), "\u{201d}");
    }

    #[test]
    fn decodes_bare_entity_names() {
        assert_eq!(decode_entity("lsquo"), "\u{2018}");
        assert_eq!(decode_entity("rdquo"), "\u{201d}");
    }

    #[test]
    fn single_characters_pass_through() {
        assert_eq!(decode_entity("&"), "&");
        assert_eq!(decode_entity("a"), "a");
        assert_eq!(decode_entity("\u{2018}"), "\u{2018}");
    }

    // =========================================================================
    // Value accessors
    // =========================================================================

    #[test]
    fn value_accessors() {
        let value = json!({ "kramdown": { "input": "GFM", "hard_wrap": true, "auto_ids": 0 } });
        assert_eq!(string_at(Some(&value), &["kramdown", "input"]), Some("GFM"));
        assert_eq!(string_at(Some(&value), &["kramdown", "hard_wrap"]), None);
        assert!(truthy_at(Some(&value), &["kramdown", "hard_wrap"]));
        assert!(!truthy_at(Some(&value), &["kramdown", "auto_ids"]));
        assert!(!truthy_at(Some(&value), &["kramdown", "missing", "deeper"]));
        assert!(!truthy_at(None, &["kramdown"]));
    }
}
