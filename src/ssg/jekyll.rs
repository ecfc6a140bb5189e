//! Jekyll.
//!
//! Collections can be declared in `_config.yml` (as a list or a map) and live
//! in `collections_dir`, each in a folder named after the collection with a
//! leading underscore. Posts and drafts always come as a pair: a site with
//! `_posts` gets a `_drafts` collection and the other way round.

use super::base;
use super::{CollectionsContext, Ssg, SsgKey, TreeScope};
use crate::build_commands::{
    BuildCommands, BuildCommandsContext, add_bundler_commands, base_build_commands,
};
use crate::data::{decode_entity, string_at, truthy_at, value_at};
use crate::markdown::{MarkdownEngine, MarkdownOptions, MarkdownSettings, kramdown_attribute_elements};
use crate::paths::{join, strip_top_path};
use crate::types::{
    AddOption, CollectionConfig, CreateOptions, Input, InputOptions, SnippetsImports, SortOption,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy)]
pub struct Jekyll;

const POSTS_CREATE_PATH: &str =
    "[relative_base_path]/{date|year}-{date|month}-{date|day}-{title|slugify}.[ext]";

fn is_posts_path(path: &str) -> bool {
    path == "_posts" || path.ends_with("/_posts")
}

fn is_drafts_path(path: &str) -> bool {
    path == "_drafts" || path.ends_with("/_drafts")
}

fn with_last_segment(path: &str, from: &str, to: &str) -> String {
    let stem = &path[..path.len() - from.len()];
    format!("{stem}{to}")
}

fn to_drafts_key(key: &str) -> String {
    key.replacen("posts", "drafts", 1)
}

fn to_posts_key(key: &str) -> String {
    key.replacen("drafts", "posts", 1)
}

/// `collections` from `_config.yml` as a map, whichever form it was written in.
fn declared_collections(config: Option<&Value>) -> Map<String, Value> {
    match value_at(config, &["collections"]) {
        Some(Value::Array(names)) => names
            .iter()
            .filter_map(Value::as_str)
            .map(|name| (name.to_string(), Value::Object(Map::new())))
            .collect(),
        Some(Value::Object(collections)) => collections.clone(),
        _ => Map::new(),
    }
}

fn collections_dir(config: Option<&Value>) -> &str {
    string_at(config, &["collections_dir"]).unwrap_or("")
}

/// Collection name for a folder: `_posts` → `posts`.
fn collection_name(path: &str, collections_dir: &str) -> String {
    let relative = strip_top_path(path, collections_dir);
    let relative = relative.strip_prefix('/').unwrap_or(&relative);
    relative.strip_prefix('_').unwrap_or(relative).to_string()
}

fn posts_inputs(collection_key: &str) -> IndexMap<String, Input> {
    ["categories", "tags"]
        .into_iter()
        .map(|field| {
            let input = Input {
                input_type: "multiselect".to_string(),
                options: InputOptions {
                    values: format!("collections.{collection_key}[*].{field}"),
                    allow_create: true,
                },
            };
            (field.to_string(), input)
        })
        .collect()
}

/// True if `value` is a list containing `needle` or a string containing it.
fn includes(value: Option<&Value>, needle: &str) -> bool {
    match value {
        Some(Value::Array(items)) => items.iter().any(|item| item.as_str() == Some(needle)),
        Some(Value::String(text)) => text.contains(needle),
        _ => false,
    }
}

fn kramdown_options(config: Option<&Value>) -> MarkdownOptions {
    let kramdown = value_at(config, &["kramdown"]);
    let gfm = string_at(kramdown, &["input"]) == Some("GFM");

    // https://kramdown.gettalong.org/options.html
    let quotes = string_at(kramdown, &["smart_quotes"])
        .filter(|quotes| !quotes.is_empty())
        .map(|quotes| {
            quotes
                .split(',')
                .map(|entity| {
                    let entity: String = entity.chars().filter(|c| !c.is_whitespace()).collect();
                    decode_entity(&entity)
                })
                .collect::<String>()
        });

    MarkdownOptions {
        heading_ids: Some(truthy_at(kramdown, &["auto_ids"])),
        gfm: Some(gfm),
        breaks: Some(truthy_at(kramdown, &["hard_wrap"])),
        quotes,
        // https://github.com/kramdown/parser-gfm
        typographer: Some(
            gfm && !includes(value_at(kramdown, &["gfm_quirks"]), "no_auto_typographic"),
        ),
        attributes: Some(true),
        attribute_elements: Some(kramdown_attribute_elements()),
        ..Default::default()
    }
}

fn commonmark_options(config: &Value) -> MarkdownOptions {
    let commonmark = config.get("commonmark");
    let has = |field: &str, name: &str| {
        let list = value_at(commonmark, &[field]);
        includes(list, &name.to_lowercase()) || includes(list, &name.to_uppercase())
    };

    // https://github.com/gjtorikian/commonmarker#options
    MarkdownOptions {
        gfm: Some(has("options", "gfm_quirks")),
        breaks: Some(has("options", "hardbreaks")),
        strikethrough: Some(has("extensions", "strikethrough")),
        table: Some(has("extensions", "table")),
        linkify: Some(has("extensions", "autolink")),
        superscript: Some(has("extensions", "superscript")),
        heading_ids: Some(has("extensions", "header_ids")),
        ..Default::default()
    }
}

impl Ssg for Jekyll {
    fn key(&self) -> SsgKey {
        SsgKey::Jekyll
    }

    fn config_paths(&self) -> &'static [&'static str] {
        &["_config.yml", "_config.yaml", "_config.toml"]
    }

    fn template_extensions(&self) -> &'static [&'static str] {
        &[".liquid"]
    }

    fn partial_folders(&self) -> &'static [&'static str] {
        &["_layouts/", "_includes/"]
    }

    fn ignored_folders(&self) -> &'static [&'static str] {
        &[
            "_site/",  // build output
            "assets/", // jekyll-assets plugin
            ".jekyll-cache/",
            ".jekyll-metadata/",
        ]
    }

    // _posts and _drafts can be nested deeper, so they are no source hint
    fn conventional_paths(&self) -> &'static [&'static str] {
        &["_plugins/", "_includes/", "_data/", "_layouts/", "_sass/"]
    }

    fn prepare_collection_paths(
        &self,
        mut collection_paths: Vec<String>,
        ctx: &CollectionsContext,
    ) -> Vec<String> {
        let dir = collections_dir(ctx.ssg_config);
        for name in declared_collections(ctx.ssg_config).keys() {
            let path = join(&[ctx.source, dir, &format!("_{name}")]);
            if !collection_paths.contains(&path) {
                collection_paths.push(path);
            }
        }
        collection_paths
    }

    fn companion_path(&self, path: &str) -> Option<String> {
        if is_drafts_path(path) {
            Some(with_last_segment(path, "_drafts", "_posts"))
        } else if is_posts_path(path) {
            Some(with_last_segment(path, "_posts", "_drafts"))
        } else {
            None
        }
    }

    fn collection_key(
        &self,
        path: &str,
        scope: &TreeScope,
        _has_pages: bool,
        existing_keys: &[String],
    ) -> String {
        let fallback = if path.is_empty() { "source" } else { "pages" };
        let prefix = base::slug(collections_dir(scope.ctx.ssg_config));
        let prefix = (!prefix.is_empty()).then(|| format!("{prefix}_"));
        base::generate_collections_config_key(path, existing_keys, fallback, prefix.as_deref())
    }

    fn generate_collection_config(&self, key: &str, path: &str, scope: &TreeScope) -> CollectionConfig {
        let mut config = base::generate_collection_config(self, key, path, scope);

        let collections = declared_collections(scope.ctx.ssg_config);
        let dir = collections_dir(scope.ctx.ssg_config);
        let collection = collections.get(&collection_name(path, dir)).or_else(|| {
            if is_drafts_path(path) {
                collections.get("posts")
            } else if is_posts_path(path) {
                collections.get("drafts").or_else(|| collections.get("posts"))
            } else {
                None
            }
        });

        let is_known_output = key == "pages"
            || key == "posts"
            || key.ends_with("_posts")
            || key == "drafts"
            || key.ends_with("_drafts");

        if key == "data" {
            config.lock();
        } else if !truthy_at(collection, &["output"]) && !is_known_output {
            config.disable_url = true;
        }

        if let Some(sort_by) = string_at(collection, &["sort_by"]).filter(|s| !s.is_empty()) {
            config.sort_options = vec![SortOption {
                key: sort_by.to_string(),
            }];
        }

        if is_posts_path(&config.path) {
            config.create.get_or_insert_with(|| CreateOptions {
                path: Some(POSTS_CREATE_PATH.to_string()),
                ..Default::default()
            });
            config.inputs = posts_inputs(key);
            if config.add_options.is_empty() {
                config.add_options = vec![
                    AddOption {
                        name: "Add Post".to_string(),
                        collection: None,
                    },
                    AddOption {
                        name: "Add Draft".to_string(),
                        collection: Some(to_drafts_key(key)),
                    },
                ];
            }
        } else if is_drafts_path(&config.path) {
            let posts_key = to_posts_key(key);
            config.create.get_or_insert_with(|| CreateOptions {
                publish_to: Some(posts_key.clone()),
                ..Default::default()
            });
            config.inputs = posts_inputs(&posts_key);
        }

        config
    }

    fn is_suggested_collection(&self, path: &str, scope: &TreeScope) -> bool {
        let is_default_collection = scope.collection_paths.len() == 1
            || path.is_empty()
            || path == "_data"
            || path.starts_with("_data/")
            || is_posts_path(path)
            || is_drafts_path(path);

        if is_default_collection {
            return true;
        }

        let dir = collections_dir(scope.ctx.ssg_config);
        declared_collections(scope.ctx.ssg_config).contains_key(&collection_name(path, dir))
    }

    fn generate_markdown(&self, ssg_config: Option<&Value>) -> MarkdownSettings {
        let uses_commonmark = string_at(ssg_config, &["markdown"])
            .is_some_and(|markdown| markdown.contains("CommonMark"));

        let (engine, mut options) = match ssg_config {
            Some(config) if uses_commonmark => (MarkdownEngine::Commonmark, commonmark_options(config)),
            _ => (MarkdownEngine::Kramdown, kramdown_options(ssg_config)),
        };
        options.treat_indentation_as_code = Some(true);

        MarkdownSettings::new(engine, options)
    }

    fn generate_build_commands(&self, file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
        let mut commands = base_build_commands(file_paths, ctx);

        if add_bundler_commands(&mut commands, file_paths, ctx.source).is_some() {
            commands.prepend_build("bundle exec jekyll build", "because of your Gemfile");
        } else {
            commands.prepend_build("jekyll build", "most common for Jekyll sites");
        }

        commands.prepend_output("_site", "most common for Jekyll sites");
        commands.set_environment(
            "JEKYLL_ENV",
            "production",
            "recommended for hosted Jekyll sites",
        );

        commands
    }

    fn snippets_imports(&self) -> Option<SnippetsImports> {
        Some(SnippetsImports {
            jekyll: true,
            ..Default::default()
        })
    }
}
