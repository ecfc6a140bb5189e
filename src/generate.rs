//! File list in, inferred configuration out.
//!
//! Both entry points run the same front half:
//!
//! ```text
//! file paths ──► detect generator ──► find source ──► group files ──► parse config
//! ```
//!
//! [`generate_configuration`] then builds the collection tree and site
//! settings; [`generate_build_commands`] hands the parsed config to the
//! generator's build suggestions. Neither fails. Missing files, malformed
//! configs and ambiguous detection all fall back to defaults, which keeps a
//! half-broken repository from producing no configuration at all.
//!
//! Fields present in [`GenerateOptions::config`] are passed through verbatim
//! and skip the matching inference. A present `collections_config` skips the
//! collection tree entirely.

use crate::build_commands::{BuildCommands, BuildCommandsContext};
use crate::data::ReadFile;
use crate::external::ExternalConfig;
use crate::paths::normalise_path;
use crate::ssg::{CollectionsContext, Ssg, SsgKey, guess_ssg, ssg_for};
use crate::types::{Configuration, GenerateResult};
use tracing::debug;

/// Caller-supplied inputs besides the file list.
#[derive(Clone, Default)]
pub struct GenerateOptions<'a> {
    /// Existing configuration. Present fields win over inference.
    pub config: Option<Configuration>,
    /// Skip detection and use this generator.
    pub ssg: Option<SsgKey>,
    /// File access. Without it no config files are parsed.
    pub reader: Option<&'a dyn ReadFile>,
    /// Timezone to report when the config does not set one.
    pub timezone: Option<String>,
}

impl GenerateOptions<'_> {
    fn configured_source(&self) -> Option<String> {
        self.config
            .as_ref()
            .and_then(|config| config.source.as_deref())
            .map(normalise_path)
            .filter(|source| !source.is_empty())
    }
}

/// Paths inside `source`. No source (or the root) keeps everything.
pub fn filter_paths(file_paths: &[String], source: Option<&str>) -> Vec<String> {
    let source = normalise_path(source.unwrap_or(""));
    if source.is_empty() {
        return file_paths.to_vec();
    }

    let prefix = format!("{source}/");
    file_paths
        .iter()
        .filter(|path| path.starts_with(&prefix))
        .cloned()
        .collect()
}

fn detect(file_paths: &[String], options: &GenerateOptions) -> &'static dyn Ssg {
    match options.ssg {
        Some(key) => ssg_for(key),
        None => guess_ssg(&filter_paths(file_paths, options.configured_source().as_deref())),
    }
}

/// Infers a configuration for the repository with these file paths.
pub fn generate_configuration(file_paths: &[String], options: &GenerateOptions) -> GenerateResult {
    let ssg = detect(file_paths, options);
    let source = options
        .configured_source()
        .or_else(|| ssg.source(file_paths));
    debug!(ssg = %ssg.key(), source = ?source, "detected generator");

    let source_paths = filter_paths(file_paths, source.as_deref());
    let grouped = ssg.group_files(&source_paths);
    let ssg_config = options
        .reader
        .and_then(|reader| ssg.parse_config(&grouped.config_paths(), reader));
    let external = ExternalConfig::parse(file_paths, options.reader);

    let overrides = options.config.clone().unwrap_or_default();

    let collections = if overrides.collections_config.is_some() {
        debug!("collections_config supplied, skipping collection tree");
        Vec::new()
    } else {
        let ctx = CollectionsContext {
            source: source.as_deref().unwrap_or(""),
            ssg_config: ssg_config.as_ref(),
            file_paths: &source_paths,
            external: &external,
        };
        ssg.generate_collections_config_tree(&grouped.collection_paths(), &ctx)
    };

    let config = Configuration {
        source,
        collections_config: overrides.collections_config,
        paths: overrides.paths.or_else(|| Some(ssg.paths(&external))),
        timezone: overrides.timezone.or_else(|| options.timezone.clone()),
        markdown: overrides
            .markdown
            .or_else(|| Some(ssg.generate_markdown(ssg_config.as_ref()))),
        snippets_imports: overrides.snippets_imports.or_else(|| ssg.snippets_imports()),
    };

    GenerateResult {
        ssg: ssg.key(),
        config,
        collections,
    }
}

/// Suggests install, build and output settings for the repository.
///
/// Works on the whole file list, since lockfiles and hosting settings
/// usually sit at the repository root even when the site has a source folder.
pub fn generate_build_commands(file_paths: &[String], options: &GenerateOptions) -> BuildCommands {
    let ssg = detect(file_paths, options);
    let source = options
        .configured_source()
        .or_else(|| ssg.source(file_paths));
    debug!(ssg = %ssg.key(), source = ?source, "detected generator for build commands");

    let grouped = ssg.group_files(file_paths);
    let ssg_config = options
        .reader
        .and_then(|reader| ssg.parse_config(&grouped.config_paths(), reader));

    let ctx = BuildCommandsContext {
        config: ssg_config.as_ref(),
        source: source.as_deref(),
        reader: options.reader,
    };
    ssg.generate_build_commands(file_paths, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MarkdownEngine;
    use crate::test_helpers::{MockReader, assert_tree_shape, files, find_tree, tree_keys};
    use crate::types::Paths;
    use serde_json::json;

    fn options_with(reader: &MockReader) -> GenerateOptions<'_> {
        GenerateOptions {
            reader: Some(reader),
            ..Default::default()
        }
    }

    // =========================================================================
    // filter_paths
    // =========================================================================

    #[test]
    fn filter_keeps_paths_under_source() {
        let paths = files(&["site/index.md", "site/about.md", "sitemap.xml", "README.md"]);
        assert_eq!(
            filter_paths(&paths, Some("site")),
            vec!["site/index.md", "site/about.md"]
        );
        assert_eq!(filter_paths(&paths, Some("/site/")), filter_paths(&paths, Some("site")));
        assert_eq!(filter_paths(&paths, None), paths);
        assert_eq!(filter_paths(&paths, Some("/")), paths);
    }

    // =========================================================================
    // generate_configuration
    // =========================================================================

    #[test]
    fn empty_repository() {
        let result = generate_configuration(&[], &GenerateOptions::default());
        assert_eq!(result.ssg, SsgKey::Other);
        assert_eq!(result.config.source, None);
        assert!(result.collections.is_empty());
        assert_eq!(result.config.paths, Some(Paths::default()));
        assert_eq!(result.config.markdown.map(|m| m.engine), Some(MarkdownEngine::Commonmark));
    }

    #[test]
    fn jekyll_site_end_to_end() {
        let paths = files(&[
            "_config.yml",
            "Gemfile",
            "index.html",
            "about.md",
            "_posts/2024-01-01-hello.md",
            "_data/nav.yml",
            "_layouts/default.html",
        ]);
        let reader = MockReader::new(&[(
            "_config.yml",
            "title: Blog\nkramdown:\n  input: GFM\ncollections:\n  - staff\n",
        )]);
        let result = generate_configuration(&paths, &options_with(&reader));

        assert_eq!(result.ssg, SsgKey::Jekyll);
        assert_eq!(result.config.source, None);
        let markdown = result.config.markdown.unwrap();
        assert_eq!(markdown.engine, MarkdownEngine::Kramdown);
        assert_eq!(markdown.options.gfm, Some(true));
        assert!(result.config.snippets_imports.unwrap().jekyll);

        let keys = tree_keys(&result.collections);
        for key in ["pages", "posts", "drafts", "data", "staff"] {
            assert!(keys.contains(&key), "missing {key} in {keys:?}");
        }
        assert!(find_tree(&result.collections, "staff").suggested);
    }

    #[test]
    fn source_is_detected_and_applied() {
        let paths = files(&[
            "README.md",
            "package.json",
            "site/hugo.toml",
            "site/content/_index.md",
            "site/content/posts/a.md",
            "site/content/posts/b.md",
            "site/data/menu.yml",
        ]);
        let result = generate_configuration(&paths, &GenerateOptions::default());

        assert_eq!(result.ssg, SsgKey::Hugo);
        assert_eq!(result.config.source.as_deref(), Some("site"));
        let posts = find_tree(&result.collections, "posts");
        assert_eq!(posts.config.path, "content/posts");
        assert!(find_tree(&result.collections, "data").config.disable_add);
    }

    #[test]
    fn configured_source_narrows_detection() {
        let paths = files(&["_config.yml", "docs/mkdocs.yml", "docs/docs/index.md"]);
        let options = GenerateOptions {
            config: Some(Configuration {
                source: Some("docs/".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = generate_configuration(&paths, &options);
        assert_eq!(result.ssg, SsgKey::Mkdocs);
        assert_eq!(result.config.source.as_deref(), Some("docs"));
    }

    #[test]
    fn forced_generator_skips_detection() {
        let paths = files(&["_config.yml", "index.html"]);
        let options = GenerateOptions {
            ssg: Some(SsgKey::Eleventy),
            ..Default::default()
        };
        assert_eq!(generate_configuration(&paths, &options).ssg, SsgKey::Eleventy);
    }

    #[test]
    fn overrides_pass_through() {
        let paths = files(&["_config.yml", "index.html", "_posts/a.md"]);
        let overrides = Configuration {
            collections_config: Some(json!({ "posts": { "path": "_posts" } })),
            paths: Some(Paths {
                static_path: "public".to_string(),
                uploads: "public/media".to_string(),
            }),
            timezone: Some("Pacific/Auckland".to_string()),
            ..Default::default()
        };
        let options = GenerateOptions {
            config: Some(overrides.clone()),
            timezone: Some("Etc/UTC".to_string()),
            ..Default::default()
        };
        let result = generate_configuration(&paths, &options);

        assert!(result.collections.is_empty());
        assert_eq!(result.config.collections_config, overrides.collections_config);
        assert_eq!(result.config.paths, overrides.paths);
        assert_eq!(result.config.timezone.as_deref(), Some("Pacific/Auckland"));
    }

    #[test]
    fn injected_timezone_is_reported() {
        let options = GenerateOptions {
            timezone: Some("Europe/Berlin".to_string()),
            ..Default::default()
        };
        let result = generate_configuration(&files(&["index.html"]), &options);
        assert_eq!(result.config.timezone.as_deref(), Some("Europe/Berlin"));
    }

    #[test]
    fn unrecognised_site_end_to_end() {
        let paths = files(&[
            "index.html",
            "about.html",
            "blog.html",
            "contact/index.html",
            "content/index.md",
            "content/contact.md",
            "content/blog.md",
            "content/about/index.md",
            "content/about/hero.png",
            "content/posts/first-post.md",
            "content/posts/second-post.md",
            "_data/authors/jim.json",
            "_data/authors/pam.json",
            "_data/locations/the-moon.json",
            "_data/locations/antarctica.json",
            "_data/locations/new-zealand.json",
        ]);
        let reader = |path: &str| -> Option<String> {
            if path.ends_with(".yml") || path.ends_with(".yaml") {
                Some(format!("path: {path}"))
            } else {
                Some(String::new())
            }
        };
        let options = GenerateOptions {
            reader: Some(&reader),
            ..Default::default()
        };

        let result = generate_configuration(&paths, &options);
        assert_eq!(result.ssg, SsgKey::Other);
        assert_eq!(result.config.source, None);
        assert_eq!(
            serde_json::to_value(&result.config.markdown).unwrap(),
            json!({ "engine": "commonmark", "options": {} })
        );
        assert_eq!(
            serde_json::to_value(&result.config.paths).unwrap(),
            json!({ "static": "", "uploads": "uploads" })
        );

        assert_eq!(result.collections.len(), 1);
        assert_eq!(result.collections[0].key, "pages");
        assert_tree_shape(
            &result.collections,
            &[
                ("pages", &["data", "contact", "content"]),
                ("data", &["data_authors", "data_locations"]),
                ("content", &["about", "posts"]),
            ],
        );
        assert_eq!(find_tree(&result.collections, "pages").config.path, "");
        assert_eq!(find_tree(&result.collections, "data").config.path, "_data");
        assert_eq!(find_tree(&result.collections, "contact").config.path, "contact");
        assert_eq!(find_tree(&result.collections, "content").config.path, "content");
    }

    #[test]
    fn malformed_config_is_ignored() {
        let paths = files(&["_config.yml", "index.html", "about/index.md"]);
        let reader = MockReader::new(&[("_config.yml", "title: [unclosed")]);
        let result = generate_configuration(&paths, &options_with(&reader));
        assert_eq!(result.ssg, SsgKey::Jekyll);
        assert_eq!(
            result.config.markdown.unwrap().engine,
            MarkdownEngine::Kramdown
        );
        assert_tree_shape(&result.collections, &[("pages", &["about"])]);
    }

    #[test]
    fn decap_settings_feed_paths_and_suggestions() {
        let paths = files(&[
            "index.html",
            "admin/config.yml",
            "blog/a.md",
            "blog/2024/b.md",
        ]);
        let reader = MockReader::new(&[(
            "admin/config.yml",
            "media_folder: static/images\npublic_folder: images\ncollections:\n  - name: archive\n    folder: blog/2024\n",
        )]);
        let result = generate_configuration(&paths, &options_with(&reader));

        let config_paths = result.config.paths.unwrap();
        assert_eq!(config_paths.static_path, "static");
        assert_eq!(config_paths.uploads, "static/images");
        assert!(find_tree(&result.collections, "blog_2024").suggested);
    }

    // =========================================================================
    // generate_build_commands
    // =========================================================================

    #[test]
    fn build_commands_for_sourced_jekyll_site() {
        let paths = files(&["site/_config.yml", "site/Gemfile", "site/_data/nav.yml"]);
        let commands = generate_build_commands(&paths, &GenerateOptions::default());
        assert_eq!(commands.build[0].value, "bundle exec jekyll build");
        assert_eq!(commands.environment["BUNDLE_GEMFILE"].value, "site/Gemfile");
    }

    #[test]
    fn build_commands_read_hosting_settings() {
        let paths = files(&["netlify.toml", "hugo.toml"]);
        let reader = MockReader::new(&[(
            "netlify.toml",
            "[build]\ncommand = \"hugo --minify\"\npublish = \"public\"\n",
        )]);
        let commands = generate_build_commands(&paths, &options_with(&reader));
        let build: Vec<&str> = commands.build.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(build, vec!["hugo -b /", "hugo --minify"]);
    }

    #[test]
    fn build_commands_without_anything() {
        let commands = generate_build_commands(&[], &GenerateOptions::default());
        assert_eq!(commands, BuildCommands::default());
    }
}
