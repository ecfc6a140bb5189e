//! Hugo.
//!
//! Config can live in a root file or split across a `config/` folder. Branch
//! bundles (`_index.md`) are pages of the section they sit in, so a folder
//! that only holds one does not count as a collection of its own.

use super::base;
use super::{CollectionsContext, Ssg, SsgKey, TreeScope};
use crate::build_commands::{
    BUILD_ROOT, BuildCommands, BuildCommandsContext, base_build_commands,
};
use crate::data::{decode_entity, is_truthy, string_at, truthy_at, value_at};
use crate::external::ExternalConfig;
use crate::markdown::{
    AttributeElements, AttributePlacement, MarkdownEngine, MarkdownOptions, MarkdownSettings,
};
use crate::paths::{is_within, join, normalise_path};
use crate::types::{CollectionConfig, Paths, SnippetFilter, SnippetsImports};
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
pub struct Hugo;

const BRANCH_INDEX: &str = "_index.md";
const EXAMPLE_SITE: &str = "exampleSite/";

/// The data folder, relative to `base_path`.
fn data_path(config: Option<&Value>, base_path: &str) -> String {
    let data_dir = string_at(config, &["dataDir"])
        .map(normalise_path)
        .filter(|dir| !dir.is_empty())
        .unwrap_or_else(|| "data".to_string());
    join(&[base_path, &data_dir])
}

fn quotes(typographer: Option<&Value>) -> Option<String> {
    let names = [
        "leftSingleQuote",
        "rightSingleQuote",
        "leftDoubleQuote",
        "rightDoubleQuote",
    ];
    let entities: Option<Vec<&str>> = names
        .into_iter()
        .map(|name| string_at(typographer, &[name]).filter(|s| !s.is_empty()))
        .collect();
    entities.map(|entities| entities.into_iter().map(decode_entity).collect())
}

fn attribute_elements(title: bool, block: bool, wrap_images: Option<&Value>) -> AttributeElements {
    let placement = |on: bool, placement: AttributePlacement| {
        if on { placement } else { AttributePlacement::None }
    };

    let mut elements = AttributeElements::new();
    for heading in ["h1", "h2", "h3", "h4", "h5", "h6"] {
        elements.insert(heading.to_string(), placement(title, AttributePlacement::SpaceRight));
    }
    for element in ["blockquote", "hr", "ol", "ul", "p", "table"] {
        elements.insert(element.to_string(), placement(block, AttributePlacement::Below));
    }
    // Images are wrapped in a paragraph unless that is turned off
    let standalone_images = wrap_images == Some(&Value::Bool(false));
    elements.insert(
        "img".to_string(),
        placement(block && standalone_images, AttributePlacement::Below),
    );
    elements
}

impl Ssg for Hugo {
    fn key(&self) -> SsgKey {
        SsgKey::Hugo
    }

    fn config_paths(&self) -> &'static [&'static str] {
        &[
            "hugo.toml",
            "hugo.yml",
            "hugo.yaml",
            "hugo.json",
            "theme.toml",
            "config.toml",
            "config.yml",
            "config.yaml",
            "config.json",
        ]
    }

    fn partial_folders(&self) -> &'static [&'static str] {
        &["archetypes/"]
    }

    fn ignored_files(&self) -> &'static [&'static str] {
        &["theme.toml"]
    }

    fn ignored_folders(&self) -> &'static [&'static str] {
        &["static/", "assets/", "public/", "resources/"]
    }

    fn conventional_paths(&self) -> &'static [&'static str] {
        &[
            "archetypes/",
            "assets/",
            "content/",
            "config/",
            "data/",
            "i18n/",
            "layouts/",
            "static/",
            "themes/",
        ]
    }

    fn is_config_path(&self, path: &str) -> bool {
        base::is_config_path(self, path) || path.starts_with("config/") || path.contains("/config/")
    }

    fn prepare_collection_paths(
        &self,
        collection_paths: Vec<String>,
        ctx: &CollectionsContext,
    ) -> Vec<String> {
        let kept: Vec<String> = collection_paths
            .iter()
            .filter(|path| {
                let prefix = format!("{path}/");
                let has_leaf_files = ctx.file_paths.iter().any(|file| {
                    file.starts_with(&prefix) && !file.ends_with(&format!("/{BRANCH_INDEX}"))
                });
                let has_parent = collection_paths
                    .iter()
                    .any(|other| other != *path && is_within(path, other));
                has_leaf_files || !has_parent
            })
            .cloned()
            .collect();

        let outside_example: Vec<String> = kept
            .iter()
            .filter(|path| !path.starts_with(EXAMPLE_SITE) && !path.contains(&format!("/{EXAMPLE_SITE}")))
            .cloned()
            .collect();

        if !outside_example.is_empty() && outside_example.len() < kept.len() {
            outside_example
        } else {
            kept
        }
    }

    fn filter_content_collection_paths(
        &self,
        collection_paths: &[String],
        ctx: &CollectionsContext,
        base_path: &str,
    ) -> Vec<String> {
        let data = data_path(ctx.ssg_config, base_path);
        collection_paths
            .iter()
            .filter(|path| !is_within(path, &data))
            .cloned()
            .collect()
    }

    fn generate_collection_config(&self, key: &str, path: &str, scope: &TreeScope) -> CollectionConfig {
        let mut config = base::generate_collection_config(self, key, path, scope);

        let full_path = join(&[scope.ctx.source, path]);
        let has_parent_collection = scope
            .collection_paths
            .iter()
            .any(|other| full_path.starts_with(&format!("{other}/")));
        if has_parent_collection {
            config.glob.push(format!("!{BRANCH_INDEX}"));
        }

        let data = data_path(scope.ctx.ssg_config, "");
        if path == data || path.ends_with(&format!("/{data}")) {
            config.lock();
        }

        config
    }

    fn generate_markdown(&self, ssg_config: Option<&Value>) -> MarkdownSettings {
        let goldmark = value_at(ssg_config, &["markup", "goldmark"]);
        let extensions = value_at(goldmark, &["extensions"]);
        let extras = value_at(extensions, &["extras"]);
        let parser = value_at(goldmark, &["parser"]);
        let renderer = value_at(goldmark, &["renderer"]);

        let typographer = value_at(extensions, &["typographer"]);
        let title_attributes = truthy_at(parser, &["attribute", "title"]);
        let block_attributes = truthy_at(parser, &["attribute", "block"]);
        let attributes = title_attributes || block_attributes;
        let typographer_on =
            typographer.is_some_and(is_truthy) && !truthy_at(typographer, &["disable"]);

        // https://gohugo.io/getting-started/configuration-markup/#goldmark
        let options = MarkdownOptions {
            gfm: Some(true),
            linkify: Some(truthy_at(extensions, &["linkify"])),
            table: Some(truthy_at(extensions, &["table"])),
            strikethrough: Some(
                truthy_at(extensions, &["strikethrough"]) || truthy_at(extras, &["delete", "enable"]),
            ),
            subscript: Some(truthy_at(extras, &["subscript", "enable"])),
            superscript: Some(truthy_at(extras, &["superscript", "enable"])),
            heading_ids: Some(truthy_at(parser, &["autoHeadingID"])),
            breaks: Some(truthy_at(renderer, &["hardWraps"])),
            xhtml: Some(truthy_at(renderer, &["xhtml"])),
            attributes: Some(attributes),
            typographer: Some(typographer_on),
            quotes: typographer_on.then(|| quotes(typographer)).flatten(),
            attribute_elements: attributes.then(|| {
                attribute_elements(
                    title_attributes,
                    block_attributes,
                    value_at(parser, &["wrapStandAloneImageWithinParagraph"]),
                )
            }),
            treat_indentation_as_code: Some(true),
            ..Default::default()
        };

        MarkdownSettings::new(MarkdownEngine::Commonmark, options)
    }

    fn generate_build_commands(&self, file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
        let mut commands = base_build_commands(file_paths, ctx);

        commands.prepend_build("hugo -b /", "most common for Hugo sites");
        commands.prepend_output("public", "most common for Hugo sites");
        commands.set_environment(
            "HUGO_CACHEDIR",
            &format!("{BUILD_ROOT}/.hugo_cache/"),
            "recommended for Hugo sites",
        );
        commands.push_preserved("resources/", "recommended for speeding up Hugo builds");
        commands.push_preserved(".hugo_cache/", "recommended for speeding up Hugo builds");

        commands
    }

    fn paths(&self, external: &ExternalConfig) -> Paths {
        external.decap_paths().unwrap_or_else(|| Paths {
            static_path: "static".to_string(),
            uploads: "static/uploads".to_string(),
        })
    }

    fn snippets_imports(&self) -> Option<SnippetsImports> {
        Some(SnippetsImports {
            hugo: Some(SnippetFilter {
                exclude: vec!["hugo_instagram".to_string()],
            }),
            ..Default::default()
        })
    }
}
