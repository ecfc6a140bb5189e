//! Static site generators and their rule sets.
//!
//! Every generator implements [`Ssg`]. Default method bodies delegate to free
//! functions in [`base`], so a generator overriding a method can still compose
//! with the shared behaviour by calling the matching `base::` function.
//!
//! | Generator | Config files | Extra templates | Source hint |
//! |---|---|---|---|
//! | Hugo | `hugo.*`, `config.*`, `config/` | | `content/`, `layouts/`, ... |
//! | Jekyll | `_config.*` | `.liquid` | `_data/`, `_includes/`, ... |
//! | Eleventy | `eleventy.config.*`, `.eleventy.*` | `.njk`, `.liquid`, ... | `_data/`, `_includes/` |
//! | Next.js | `next.config.*` | `.tsx`, `.jsx` | |
//! | Astro | `astro.config.*` | `.astro`, `.vue`, ... | `src/`, `public/` |
//! | SvelteKit | `svelte.config.js` | `.svelte` | |
//! | Bridgetown | `bridgetown.config.*` | `.liquid` | |
//! | Lume | | | |
//! | MkDocs | `mkdocs.yml` | | `docs/` |
//! | Docusaurus | `docusaurus.config.*` | | |
//! | Gatsby | | `.tsx`, `.jsx` | |
//! | Nuxt.js | | | |
//! | Static | `.nojekyll` | | |
//!
//! Hexo, Sphinx, legacy and unrecognised sites use the shared behaviour only.

pub mod base;
mod astro;
mod bridgetown;
mod docusaurus;
mod eleventy;
mod gatsby;
mod hugo;
mod jekyll;
mod lume;
mod mkdocs;
mod nextjs;
mod nuxtjs;
mod static_site;
mod sveltekit;

pub use astro::Astro;
pub use bridgetown::Bridgetown;
pub use docusaurus::Docusaurus;
pub use eleventy::Eleventy;
pub use gatsby::Gatsby;
pub use hugo::Hugo;
pub use jekyll::Jekyll;
pub use lume::Lume;
pub use mkdocs::MkDocs;
pub use nextjs::NextJs;
pub use nuxtjs::NuxtJs;
pub use static_site::StaticSite;
pub use sveltekit::SvelteKit;

use crate::build_commands::{BuildCommands, BuildCommandsContext, base_build_commands};
use crate::data::ReadFile;
use crate::external::ExternalConfig;
use crate::markdown::MarkdownSettings;
use crate::types::{
    CollectionConfig, CollectionConfigTree, FileType, GroupedFiles, Paths, SnippetsImports,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// Keys
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SsgKey {
    Hugo,
    Jekyll,
    Eleventy,
    Nextjs,
    Astro,
    Sveltekit,
    Bridgetown,
    Lume,
    Mkdocs,
    Docusaurus,
    Gatsby,
    Hexo,
    Nuxtjs,
    Sphinx,
    Static,
    Legacy,
    Other,
}

impl SsgKey {
    /// Every key, in registration order.
    pub const ALL: [SsgKey; 17] = [
        SsgKey::Hugo,
        SsgKey::Jekyll,
        SsgKey::Eleventy,
        SsgKey::Nextjs,
        SsgKey::Astro,
        SsgKey::Sveltekit,
        SsgKey::Bridgetown,
        SsgKey::Lume,
        SsgKey::Mkdocs,
        SsgKey::Docusaurus,
        SsgKey::Gatsby,
        SsgKey::Hexo,
        SsgKey::Nuxtjs,
        SsgKey::Sphinx,
        SsgKey::Static,
        SsgKey::Legacy,
        SsgKey::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SsgKey::Hugo => "hugo",
            SsgKey::Jekyll => "jekyll",
            SsgKey::Eleventy => "eleventy",
            SsgKey::Nextjs => "nextjs",
            SsgKey::Astro => "astro",
            SsgKey::Sveltekit => "sveltekit",
            SsgKey::Bridgetown => "bridgetown",
            SsgKey::Lume => "lume",
            SsgKey::Mkdocs => "mkdocs",
            SsgKey::Docusaurus => "docusaurus",
            SsgKey::Gatsby => "gatsby",
            SsgKey::Hexo => "hexo",
            SsgKey::Nuxtjs => "nuxtjs",
            SsgKey::Sphinx => "sphinx",
            SsgKey::Static => "static",
            SsgKey::Legacy => "legacy",
            SsgKey::Other => "other",
        }
    }
}

impl fmt::Display for SsgKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown SSG '{0}'")]
pub struct UnknownSsgKey(pub String);

impl FromStr for SsgKey {
    type Err = UnknownSsgKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SsgKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSsgKey(s.to_string()))
    }
}

// ============================================================================
// Contexts
// ============================================================================

/// What is known about a run when building the collection tree.
#[derive(Clone, Copy)]
pub struct CollectionsContext<'a> {
    /// Normalised source folder, empty for the repository root.
    pub source: &'a str,
    /// Parsed generator config.
    pub ssg_config: Option<&'a Value>,
    /// Every file path under the source.
    pub file_paths: &'a [String],
    pub external: &'a ExternalConfig,
}

/// Values derived once per tree and shared with every per-path hook.
///
/// Collection paths and base paths here include the source prefix.
#[derive(Clone, Copy)]
pub struct TreeScope<'a> {
    pub ctx: &'a CollectionsContext<'a>,
    pub collection_paths: &'a [String],
    /// Deepest folder shared by all collection paths.
    pub base_path: &'a str,
    /// Deepest folder shared by the content collection paths. Differs from
    /// `base_path` when data folders sit outside the content folders.
    pub content_base_path: &'a str,
    /// `content_base_path` without the source prefix. Keys are generated
    /// relative to it.
    pub key_base_path: &'a str,
}

// ============================================================================
// Trait
// ============================================================================

/// A static site generator's rule set and behaviour overrides.
///
/// The rule table methods return only what a generator adds. Classification
/// in [`base`] combines them with the shared defaults.
pub trait Ssg: Sync {
    fn key(&self) -> SsgKey;

    // ---- rule tables ------------------------------------------------------

    fn config_paths(&self) -> &'static [&'static str] {
        &[]
    }

    fn template_extensions(&self) -> &'static [&'static str] {
        &[]
    }

    fn content_extensions(&self) -> &'static [&'static str] {
        &[]
    }

    fn partial_folders(&self) -> &'static [&'static str] {
        &[]
    }

    fn ignored_folders(&self) -> &'static [&'static str] {
        &[]
    }

    fn ignored_files(&self) -> &'static [&'static str] {
        &[]
    }

    /// Folders that sit directly inside a source folder by convention.
    fn conventional_paths(&self) -> &'static [&'static str] {
        &[]
    }

    // ---- classification ---------------------------------------------------

    fn is_config_path(&self, path: &str) -> bool {
        base::is_config_path(self, path)
    }

    fn is_in_ignored_folder(&self, path: &str) -> bool {
        base::is_in_ignored_folder(self, path)
    }

    fn is_ignored_file(&self, path: &str) -> bool {
        base::is_ignored_file(self, path)
    }

    fn is_ignored_path(&self, path: &str) -> bool {
        base::is_ignored_path(self, path)
    }

    fn is_content_path(&self, path: &str) -> bool {
        base::is_content_path(self, path)
    }

    fn is_partial_path(&self, path: &str) -> bool {
        base::is_partial_path(self, path)
    }

    fn is_template_path(&self, path: &str) -> bool {
        base::is_template_path(self, path)
    }

    fn file_type(&self, path: &str) -> FileType {
        base::file_type(self, path)
    }

    fn path_score(&self, path: &str) -> u32 {
        base::path_score(self, path)
    }

    fn source(&self, file_paths: &[String]) -> Option<String> {
        base::source(self, file_paths)
    }

    fn group_files(&self, file_paths: &[String]) -> GroupedFiles {
        base::group_files(self, file_paths)
    }

    fn parse_config(&self, config_file_paths: &[String], reader: &dyn ReadFile) -> Option<Value> {
        base::parse_config(self, config_file_paths, reader)
    }

    // ---- collections ------------------------------------------------------

    /// Adjusts the raw collection paths before the tree is built.
    fn prepare_collection_paths(
        &self,
        collection_paths: Vec<String>,
        _ctx: &CollectionsContext,
    ) -> Vec<String> {
        collection_paths
    }

    /// A collection path that should always appear alongside `path`.
    fn companion_path(&self, _path: &str) -> Option<String> {
        None
    }

    /// Collection paths that hold content, as opposed to data or assets.
    fn filter_content_collection_paths(
        &self,
        collection_paths: &[String],
        _ctx: &CollectionsContext,
        _base_path: &str,
    ) -> Vec<String> {
        collection_paths.to_vec()
    }

    /// Key for the collection at `path` (source prefix removed).
    fn collection_key(
        &self,
        path: &str,
        scope: &TreeScope,
        has_pages: bool,
        existing_keys: &[String],
    ) -> String {
        base::collection_key(self, path, scope, has_pages, existing_keys)
    }

    fn generate_collection_config(&self, key: &str, path: &str, scope: &TreeScope) -> CollectionConfig {
        base::generate_collection_config(self, key, path, scope)
    }

    fn is_suggested_collection(&self, path: &str, scope: &TreeScope) -> bool {
        base::is_suggested_collection(self, path, scope)
    }

    fn generate_collections_config_tree(
        &self,
        collection_paths: &[String],
        ctx: &CollectionsContext,
    ) -> Vec<CollectionConfigTree> {
        base::generate_collections_config_tree(self, collection_paths, ctx)
    }

    // ---- site settings ----------------------------------------------------

    fn generate_markdown(&self, _ssg_config: Option<&Value>) -> MarkdownSettings {
        MarkdownSettings::default()
    }

    fn generate_build_commands(
        &self,
        file_paths: &[String],
        ctx: &BuildCommandsContext,
    ) -> BuildCommands {
        base_build_commands(file_paths, ctx)
    }

    fn paths(&self, external: &ExternalConfig) -> Paths {
        external.decap_paths().unwrap_or_default()
    }

    fn snippets_imports(&self) -> Option<SnippetsImports> {
        None
    }
}

/// A generator with no behaviour of its own.
#[derive(Debug, Clone, Copy)]
pub struct Generic {
    key: SsgKey,
}

impl Generic {
    pub const fn new(key: SsgKey) -> Self {
        Self { key }
    }
}

impl Ssg for Generic {
    fn key(&self) -> SsgKey {
        self.key
    }
}

// ============================================================================
// Registry
// ============================================================================

static OTHER: Generic = Generic::new(SsgKey::Other);

/// Every generator, in registration order.
pub static SSGS: &[&dyn Ssg] = &[
    &Hugo,
    &Jekyll,
    &Eleventy,
    &NextJs,
    &Astro,
    &SvelteKit,
    &Bridgetown,
    &Lume,
    &MkDocs,
    &Docusaurus,
    &Gatsby,
    &Generic { key: SsgKey::Hexo },
    &NuxtJs,
    &Generic { key: SsgKey::Sphinx },
    &StaticSite,
    &Generic { key: SsgKey::Legacy },
    &OTHER,
];

/// Looks up a generator by key.
pub fn ssg_for(key: SsgKey) -> &'static dyn Ssg {
    SSGS.iter()
        .copied()
        .find(|ssg| ssg.key() == key)
        .unwrap_or(&OTHER)
}

/// Picks the generator whose config files best match the repository.
///
/// Each generator scores one point per config file outside its ignored
/// folders. The single highest scorer wins; no matches or a tie at the top
/// means `other`.
pub fn guess_ssg(file_paths: &[String]) -> &'static dyn Ssg {
    let scores: Vec<(&'static dyn Ssg, u32)> = SSGS
        .iter()
        .map(|ssg| {
            let score = file_paths.iter().map(|path| ssg.path_score(path)).sum();
            (*ssg, score)
        })
        .collect();

    let best = scores.iter().map(|(_, score)| *score).max().unwrap_or(0);
    let leaders: Vec<&'static dyn Ssg> = scores
        .iter()
        .filter(|(_, score)| best > 0 && *score == best)
        .map(|(ssg, _)| *ssg)
        .collect();

    debug!(
        scores = ?scores.iter().filter(|(_, s)| *s > 0).map(|(ssg, s)| (ssg.key().as_str(), *s)).collect::<Vec<_>>(),
        "scored generators"
    );

    match leaders.as_slice() {
        [winner] => *winner,
        _ => &OTHER,
    }
}
