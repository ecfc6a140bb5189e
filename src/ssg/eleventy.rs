use super::base;
use super::{CollectionsContext, Ssg, SsgKey, TreeScope};
use crate::build_commands::{BuildCommands, BuildCommandsContext, base_build_commands};
use crate::markdown::{MarkdownEngine, MarkdownOptions, MarkdownSettings};
use crate::paths::{is_within, join, strip_bottom_path};
use crate::types::CollectionConfig;
use serde_json::Value;

/// Eleventy. Global data lives in `_data`; the site source is wherever the
/// config file sits when no conventional folder says otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Eleventy;

fn is_data_path(path: &str) -> bool {
    path == "_data" || path.ends_with("/_data")
}

impl Ssg for Eleventy {
    fn key(&self) -> SsgKey {
        SsgKey::Eleventy
    }

    fn config_paths(&self) -> &'static [&'static str] {
        &[
            "eleventy.config.js",
            "eleventy.config.mjs",
            "eleventy.config.cjs",
            ".eleventy.mjs",
            ".eleventy.cjs",
            ".eleventy.js",
        ]
    }

    fn template_extensions(&self) -> &'static [&'static str] {
        &[".njk", ".liquid", ".hbs", ".ejs", ".webc", ".mustache", ".haml", ".pug"]
    }

    fn partial_folders(&self) -> &'static [&'static str] {
        &["_includes/"]
    }

    fn ignored_folders(&self) -> &'static [&'static str] {
        &["_site/"]
    }

    fn conventional_paths(&self) -> &'static [&'static str] {
        &["_includes/", "_data/"]
    }

    fn source(&self, file_paths: &[String]) -> Option<String> {
        if let Some(source) = base::source(self, file_paths) {
            return Some(source);
        }

        let config_path = file_paths.iter().find(|path| self.is_config_path(path))?;
        let folder = strip_bottom_path(config_path);
        (!folder.is_empty()).then_some(folder)
    }

    fn filter_content_collection_paths(
        &self,
        collection_paths: &[String],
        _ctx: &CollectionsContext,
        base_path: &str,
    ) -> Vec<String> {
        let data = join(&[base_path, "_data"]);
        collection_paths
            .iter()
            .filter(|path| !is_within(path, &data))
            .cloned()
            .collect()
    }

    fn generate_collection_config(&self, key: &str, path: &str, scope: &TreeScope) -> CollectionConfig {
        let mut config = base::generate_collection_config(self, key, path, scope);
        if is_data_path(path) {
            config.lock();
        }
        config
    }

    fn generate_markdown(&self, _ssg_config: Option<&Value>) -> MarkdownSettings {
        MarkdownSettings::new(
            MarkdownEngine::Commonmark,
            MarkdownOptions {
                html: Some(true),
                ..Default::default()
            },
        )
    }

    fn generate_build_commands(&self, file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
        let mut commands = base_build_commands(file_paths, ctx);
        commands.prepend_build("npx @11ty/eleventy", "most common for 11ty sites");
        commands.prepend_output("_site", "most common for 11ty sites");
        commands.prepend_preserved(".cache", "most common for 11ty sites");
        commands
    }
}
