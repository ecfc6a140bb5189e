//! Markdown rendering settings.
//!
//! Generators translate their own markdown configuration (kramdown,
//! CommonMarker, goldmark) into these engine-neutral settings. Only the
//! options a generator actually knows about are set; the rest are omitted
//! from the output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkdownEngine {
    #[default]
    Commonmark,
    Kramdown,
}

/// Where attribute lists are placed relative to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributePlacement {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "right")]
    Right,
    #[serde(rename = "space right")]
    SpaceRight,
    #[serde(rename = "below")]
    Below,
    #[serde(rename = "newline below")]
    NewlineBelow,
    #[serde(rename = "right-of-prefix")]
    RightOfPrefix,
}

/// Element name → attribute placement.
pub type AttributeElements = IndexMap<String, AttributePlacement>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkdownOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gfm: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaks: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscript: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superscript: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_ids: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xhtml: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typographer: Option<bool>,
    /// Smart quote characters: left single, right single, left double, right double.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_elements: Option<AttributeElements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treat_indentation_as_code: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkdownSettings {
    pub engine: MarkdownEngine,
    #[serde(default)]
    pub options: MarkdownOptions,
}

impl MarkdownSettings {
    pub fn new(engine: MarkdownEngine, options: MarkdownOptions) -> Self {
        Self { engine, options }
    }
}

fn elements(entries: &[(&str, AttributePlacement)]) -> AttributeElements {
    entries
        .iter()
        .map(|(tag, placement)| (tag.to_string(), *placement))
        .collect()
}

/// Attribute placement matching kramdown's inline attribute lists.
pub fn kramdown_attribute_elements() -> AttributeElements {
    use AttributePlacement::*;
    elements(&[
        ("inline", Right),
        ("block", Below),
        ("tr", None),
        ("td", None),
        ("li", RightOfPrefix),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_is_commonmark_without_options() {
        assert_eq!(
            serde_json::to_value(MarkdownSettings::default()).unwrap(),
            json!({ "engine": "commonmark", "options": {} })
        );
    }

    #[test]
    fn placements_serialize_with_spaces() {
        let mut elements = kramdown_attribute_elements();
        elements.insert("h1".to_string(), AttributePlacement::SpaceRight);
        elements.insert("table".to_string(), AttributePlacement::NewlineBelow);
        let value = serde_json::to_value(&elements).unwrap();
        assert_eq!(value["h1"], json!("space right"));
        assert_eq!(value["table"], json!("newline below"));
        let value = serde_json::to_value(kramdown_attribute_elements()).unwrap();
        assert_eq!(value["li"], json!("right-of-prefix"));
    }

    #[test]
    fn attribute_elements_keep_order() {
        let keys: Vec<_> = kramdown_attribute_elements().into_keys().collect();
        assert_eq!(keys, vec!["inline", "block", "tr", "td", "li"]);
    }

    #[test]
    fn settings_deserialize_from_override() {
        let parsed: MarkdownSettings =
            serde_json::from_value(json!({ "engine": "kramdown", "options": { "gfm": true } }))
                .unwrap();
        assert_eq!(parsed.engine, MarkdownEngine::Kramdown);
        assert_eq!(parsed.options.gfm, Some(true));
    }
}
