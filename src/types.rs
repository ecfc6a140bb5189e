//! Types shared between inference stages and serialized in the output.
//!
//! Field names follow the CloudCannon configuration format, so the JSON
//! printed by the CLI can be pasted into a `cloudcannon.config.*` file.

use crate::markdown::MarkdownSettings;
use crate::ssg::SsgKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Role of a single repository file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Config,
    Content,
    Template,
    Partial,
    Other,
    Ignored,
}

/// A classified file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub file_path: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

/// Files grouped by role, plus content file counts per collection path.
///
/// Ignored files are counted for nothing and listed nowhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedFiles {
    pub config: Vec<FileSummary>,
    pub content: Vec<FileSummary>,
    pub template: Vec<FileSummary>,
    pub partial: Vec<FileSummary>,
    pub other: Vec<FileSummary>,
    /// Collection path → number of content or template files directly inside.
    /// Keeps first-seen order.
    pub collection_path_counts: IndexMap<String, usize>,
}

impl GroupedFiles {
    pub(crate) fn push(&mut self, summary: FileSummary) {
        let group = match summary.file_type {
            FileType::Config => &mut self.config,
            FileType::Content => &mut self.content,
            FileType::Template => &mut self.template,
            FileType::Partial => &mut self.partial,
            FileType::Other => &mut self.other,
            FileType::Ignored => return,
        };
        group.push(summary);
    }

    /// Paths of every file classified as config, in input order.
    pub fn config_paths(&self) -> Vec<String> {
        self.config.iter().map(|s| s.file_path.clone()).collect()
    }

    /// Collection paths in first-seen order.
    pub fn collection_paths(&self) -> Vec<String> {
        self.collection_path_counts.keys().cloned().collect()
    }
}

// ============================================================================
// Collection configuration
// ============================================================================

/// One entry of `collections_config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub glob: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disable_url: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disable_add: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disable_add_folder: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disable_file_actions: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort_options: Vec<SortOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<CreateOptions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_options: Vec<AddOption>,
    #[serde(rename = "_inputs", default, skip_serializing_if = "IndexMap::is_empty")]
    pub inputs: IndexMap<String, Input>,
}

impl CollectionConfig {
    /// Locks a collection down to editing existing files only.
    pub fn lock(&mut self) {
        self.disable_url = true;
        self.disable_add = true;
        self.disable_add_folder = true;
        self.disable_file_actions = true;
    }
}

fn is_false(value: &bool) -> bool {
    !value
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub key: String,
}

/// How new files in a collection are named, or where they publish to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_to: Option<String>,
}

/// An entry in a collection's "Add" menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOption {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

/// Editing interface for a front matter field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    #[serde(rename = "type")]
    pub input_type: String,
    pub options: InputOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputOptions {
    pub values: String,
    #[serde(default)]
    pub allow_create: bool,
}

/// A node in the suggested collection hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionConfigTree {
    pub key: String,
    pub config: CollectionConfig,
    pub suggested: bool,
    pub collections: Vec<CollectionConfigTree>,
}

// ============================================================================
// Site configuration
// ============================================================================

/// Where static assets live and where uploads go, relative to the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Paths {
    #[serde(rename = "static")]
    pub static_path: String,
    pub uploads: String,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            static_path: String::new(),
            uploads: "uploads".to_string(),
        }
    }
}

/// Which snippet sets the editor should import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnippetsImports {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hugo: Option<SnippetFilter>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub jekyll: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub mdx: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub docusaurus_mdx: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnippetFilter {
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Site-level configuration.
///
/// Used both as generated output and as the caller-supplied override. Every
/// field present in an override is passed through unchanged.
/// `collections_config` stays free-form so hand-written entries survive the
/// round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collections_config: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Paths>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<MarkdownSettings>,
    #[serde(
        rename = "_snippets_imports",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub snippets_imports: Option<SnippetsImports>,
}

/// Everything inferred about a repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateResult {
    pub ssg: SsgKey,
    pub config: Configuration,
    pub collections: Vec<CollectionConfigTree>,
}
