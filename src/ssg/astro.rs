use super::base;
use super::{CollectionsContext, Ssg, SsgKey, TreeScope};
use crate::build_commands::{BuildCommands, BuildCommandsContext, base_build_commands};
use crate::external::ExternalConfig;
use crate::markdown::{MarkdownEngine, MarkdownOptions, MarkdownSettings};
use crate::paths::{is_within, join};
use crate::types::{CollectionConfig, Paths};
use serde_json::Value;

/// Astro. Only `src/content` and `src/pages` hold routable content.
#[derive(Debug, Clone, Copy)]
pub struct Astro;

const CONTENT_FOLDERS: [&str; 2] = ["src/content", "src/pages"];

fn is_content_folder(path: &str, source: &str) -> bool {
    CONTENT_FOLDERS
        .iter()
        .any(|folder| is_within(path, &join(&[source, folder])))
}

impl Ssg for Astro {
    fn key(&self) -> SsgKey {
        SsgKey::Astro
    }

    fn config_paths(&self) -> &'static [&'static str] {
        &["astro.config.mjs", "astro.config.cjs", "astro.config.js", "astro.config.ts"]
    }

    fn ignored_folders(&self) -> &'static [&'static str] {
        &[
            "public/", // passthrough assets
            "dist/",   // build output
            ".astro",  // generated types
        ]
    }

    fn template_extensions(&self) -> &'static [&'static str] {
        &[".astro", ".tsx", ".jsx", ".vue", ".svelte"]
    }

    fn conventional_paths(&self) -> &'static [&'static str] {
        &["src/", "public/"]
    }

    fn filter_content_collection_paths(
        &self,
        collection_paths: &[String],
        ctx: &CollectionsContext,
        _base_path: &str,
    ) -> Vec<String> {
        collection_paths
            .iter()
            .filter(|path| is_content_folder(path, ctx.source))
            .cloned()
            .collect()
    }

    fn generate_collection_config(&self, key: &str, path: &str, scope: &TreeScope) -> CollectionConfig {
        let mut config = base::generate_collection_config(self, key, path, scope);
        if !is_content_folder(path, "") {
            config.disable_url = true;
        }
        config
    }

    fn generate_markdown(&self, _ssg_config: Option<&Value>) -> MarkdownSettings {
        MarkdownSettings::new(
            MarkdownEngine::Commonmark,
            MarkdownOptions {
                gfm: Some(true),
                ..Default::default()
            },
        )
    }

    fn generate_build_commands(&self, file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
        let mut commands = base_build_commands(file_paths, ctx);
        commands.push_build("npx astro build", "most common for Astro sites");
        commands.push_output("dist", "most common for Astro sites");
        commands
    }

    fn paths(&self, _external: &ExternalConfig) -> Paths {
        Paths {
            static_path: "public".to_string(),
            uploads: "public/uploads".to_string(),
        }
    }
}
