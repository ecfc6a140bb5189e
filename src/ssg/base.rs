//! Behaviour shared by every generator.
//!
//! Each function takes the generator as `ssg` so rule tables and overridden
//! hooks are still honoured when a generator composes with the shared
//! behaviour.
//!
//! ## Classification order
//!
//! | Check | Role |
//! |---|---|
//! | matches a config path | `config` |
//! | `.config.` infix, dot segment, ignored folder or file | `ignored` |
//! | equals, contains or starts with a partial folder | `partial` |
//! | content extension | `content` |
//! | template extension | `template` |
//! | anything else | `other` |
//!
//! ## Collection tree
//!
//! Collection paths are expanded to every ancestor inside the shared base
//! folder, sorted shortest first, keyed, and attached to the node of their
//! parent folder when one exists.

use super::{CollectionsContext, Ssg, TreeScope};
use crate::collections::{find_base_path, get_collection_paths};
use crate::data::{ReadFile, parse_data_file};
use crate::icons::find_icon;
use crate::paths::{basename, extname, is_within, join, last, strip_bottom_path, strip_top_path};
use crate::types::{CollectionConfig, CollectionConfigTree, FileSummary, FileType, GroupedFiles};
use heck::{ToSnakeCase, ToTitleCase};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, trace};

pub const TEMPLATE_EXTENSIONS: &[&str] = &[".htm", ".html"];

pub const CONTENT_EXTENSIONS: &[&str] = &[
    ".md", ".mdown", ".markdown", ".mdx", ".json", ".yml", ".yaml", ".toml", ".csv", ".tsv",
];

pub const PARTIAL_FOLDERS: &[&str] = &[
    "layouts/",
    "components/",
    "component-library/",
    "schemas/", // CloudCannon schema files
];

pub const IGNORED_FOLDERS: &[&str] = &[
    ".git/",
    ".github/",
    ".cloudcannon/",
    "_cloudcannon/",
    "node_modules/",
    ".vscode/",
    ".zed/",
];

pub const IGNORED_FILES: &[&str] = &[
    ".DS_Store",
    ".eslintrc.json",
    "tsconfig.json",
    "jsconfig.json",
    ".prettierrc.json",
    "docker-compose.yaml",
    "docker-compose.yml",
    "docker-compose.nginx.yaml",
    "docker-compose.nginx.yml",
    "package-lock.json",
    "package.json",
    "netlify.toml",
    "vercel.json",
    "manifest.json",
    ".gitignore",
    "README.md",
    "CODE_OF_CONDUCT.md",
    "CONTRIBUTING.md",
    "LICENSE.md",
    "CHANGELOG.md",
    "HISTORY.md",
    "cloudcannon.config.cjs",
    "cloudcannon.config.js",
    "cloudcannon.config.json",
    "cloudcannon.config.yml",
    "cloudcannon.config.yaml",
];

const DEFAULT_CONTENT_PREFIX: &str = "content_";

fn with_defaults(
    defaults: &'static [&'static str],
    extra: &'static [&'static str],
) -> impl Iterator<Item = &'static str> {
    defaults.iter().chain(extra).copied()
}

/// Exact match, or the whole final segments of `path`.
fn matches_file(path: &str, pattern: &str) -> bool {
    path == pattern
        || path
            .strip_suffix(pattern)
            .is_some_and(|rest| rest.ends_with('/'))
}

/// `folder` (with trailing slash) at the start of `path` or after any `/`.
fn in_folder(path: &str, folder: &str) -> bool {
    path.starts_with(folder) || path.contains(&format!("/{folder}"))
}

// ============================================================================
// Classification
// ============================================================================

pub fn is_config_path<S: Ssg + ?Sized>(ssg: &S, path: &str) -> bool {
    ssg.config_paths()
        .iter()
        .any(|config_path| matches_file(path, config_path))
}

pub fn is_in_ignored_folder<S: Ssg + ?Sized>(ssg: &S, path: &str) -> bool {
    with_defaults(IGNORED_FOLDERS, ssg.ignored_folders()).any(|folder| in_folder(path, folder))
}

pub fn is_ignored_file<S: Ssg + ?Sized>(ssg: &S, path: &str) -> bool {
    with_defaults(IGNORED_FILES, ssg.ignored_files()).any(|file| matches_file(path, file))
}

pub fn is_ignored_path<S: Ssg + ?Sized>(ssg: &S, path: &str) -> bool {
    path.contains(".config.")
        || path.contains("/.")
        || path.starts_with('.')
        || ssg.is_in_ignored_folder(path)
        || ssg.is_ignored_file(path)
}

pub fn is_content_path<S: Ssg + ?Sized>(ssg: &S, path: &str) -> bool {
    let extension = extname(path);
    with_defaults(CONTENT_EXTENSIONS, ssg.content_extensions()).any(|ext| ext == extension)
}

pub fn is_partial_path<S: Ssg + ?Sized>(ssg: &S, path: &str) -> bool {
    with_defaults(PARTIAL_FOLDERS, ssg.partial_folders()).any(|folder| {
        path == folder || path.contains(&format!("/{folder}")) || path.starts_with(folder)
    })
}

pub fn is_template_path<S: Ssg + ?Sized>(ssg: &S, path: &str) -> bool {
    let extension = extname(path);
    with_defaults(TEMPLATE_EXTENSIONS, ssg.template_extensions()).any(|ext| ext == extension)
}

pub fn file_type<S: Ssg + ?Sized>(ssg: &S, path: &str) -> FileType {
    if ssg.is_config_path(path) {
        FileType::Config
    } else if ssg.is_ignored_path(path) {
        FileType::Ignored
    } else if ssg.is_partial_path(path) {
        FileType::Partial
    } else if ssg.is_content_path(path) {
        FileType::Content
    } else if ssg.is_template_path(path) {
        FileType::Template
    } else {
        FileType::Other
    }
}

/// One point for a config file outside the ignored folders.
pub fn path_score<S: Ssg + ?Sized>(ssg: &S, path: &str) -> u32 {
    if ssg.is_in_ignored_folder(path) {
        return 0;
    }
    u32::from(ssg.is_config_path(path))
}

/// Source folder implied by the first path containing a conventional folder.
///
/// A conventional folder at the repository root means there is no source.
pub fn source<S: Ssg + ?Sized>(ssg: &S, file_paths: &[String]) -> Option<String> {
    let conventional = ssg.conventional_paths();

    for path in file_paths {
        for folder in conventional {
            if !in_folder(path, folder) {
                continue;
            }

            if path.starts_with(folder) {
                return None;
            }
            let index = path.find(&format!("/{folder}"))?;
            let prefix = &path[..index];
            return (!prefix.is_empty()).then(|| prefix.to_string());
        }
    }

    None
}

pub fn group_files<S: Ssg + ?Sized>(ssg: &S, file_paths: &[String]) -> GroupedFiles {
    let mut grouped = GroupedFiles::default();

    for path in file_paths {
        let file_type = ssg.file_type(path);

        if matches!(file_type, FileType::Content | FileType::Template) {
            if let Some(collection_path) = last(&get_collection_paths(path)) {
                *grouped
                    .collection_path_counts
                    .entry(collection_path.clone())
                    .or_insert(0) += 1;
            }
        }

        grouped.push(FileSummary {
            file_path: path.clone(),
            file_type,
        });
    }

    grouped
}

/// Config files ordered by the generator's config path priority.
///
/// Files matching none of the config paths (such as files in a config
/// folder) go last. The sort is stable.
pub fn sort_config_paths<S: Ssg + ?Sized>(ssg: &S, config_file_paths: &[String]) -> Vec<String> {
    let priorities = ssg.config_paths();
    let mut sorted = config_file_paths.to_vec();
    sorted.sort_by_key(|path| {
        priorities
            .iter()
            .position(|config_path| matches_file(path, config_path))
            .unwrap_or(usize::MAX)
    });
    sorted
}

/// First config file, in priority order, that parses to an object.
pub fn parse_config<S: Ssg + ?Sized>(
    ssg: &S,
    config_file_paths: &[String],
    reader: &dyn ReadFile,
) -> Option<Value> {
    for path in sort_config_paths(ssg, config_file_paths) {
        match parse_data_file(&path, reader) {
            Ok(Some(config)) => {
                debug!(path = %path, "parsed generator config");
                return Some(config);
            }
            Ok(None) => trace!(path = %path, "config file empty, unreadable or unparseable"),
            Err(e) => debug!(path = %path, error = %e, "skipping malformed config file"),
        }
    }
    None
}

// ============================================================================
// Keys and names
// ============================================================================

/// `_`-separated lowercase slug: `"Blog Posts/2024"` → `"blog_posts_2024"`.
pub fn slug(path: &str) -> String {
    path.to_snake_case()
}

/// Display name from the last path segment, or the key at the root.
pub fn display_name(key: &str, path: &str) -> String {
    let label = match basename(path) {
        "" => key,
        segment => segment,
    };
    label.to_title_case()
}

fn without_numeric_suffix(key: &str) -> &str {
    match key.rsplit_once('_') {
        Some((stem, digits))
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            stem
        }
        _ => key,
    }
}

/// Key for a collection at `path` that does not clash with `existing_keys`.
///
/// Falls back to `fallback` (or `pages`) when the path has no slug. A key
/// starting with the content prefix (`content_` by default) loses the prefix
/// when the shorter key is free. Remaining clashes get `_1`, `_2`, ...
pub fn generate_collections_config_key(
    path: &str,
    existing_keys: &[String],
    fallback: &str,
    content_prefix: Option<&str>,
) -> String {
    let mut key = match slug(path) {
        slug if !slug.is_empty() => slug,
        _ if !fallback.is_empty() => fallback.to_string(),
        _ => "pages".to_string(),
    };

    let prefix = content_prefix
        .filter(|prefix| !prefix.is_empty())
        .unwrap_or(DEFAULT_CONTENT_PREFIX);
    if let Some(trimmed) = key.strip_prefix(prefix) {
        if !trimmed.is_empty() && !existing_keys.iter().any(|k| k == trimmed) {
            return trimmed.to_string();
        }
    }

    let mut suffix = 1;
    while existing_keys.contains(&key) {
        key = format!("{}_{suffix}", without_numeric_suffix(&key));
        suffix += 1;
    }

    key
}

/// Key relative to the content base folder, with `source` for the root and
/// `pages` for the base folder itself when no `pages` folder exists.
pub fn collection_key<S: Ssg + ?Sized>(
    _ssg: &S,
    path: &str,
    scope: &TreeScope,
    has_pages: bool,
    existing_keys: &[String],
) -> String {
    let in_base = strip_top_path(path, scope.key_base_path);
    let fallback = if path.is_empty() {
        "source".to_string()
    } else if path == scope.key_base_path && !has_pages {
        "pages".to_string()
    } else {
        slug(path)
    };

    generate_collections_config_key(&in_base, existing_keys, &fallback, None)
}

// ============================================================================
// Collections
// ============================================================================

pub fn generate_collection_config<S: Ssg + ?Sized>(
    _ssg: &S,
    key: &str,
    path: &str,
    _scope: &TreeScope,
) -> CollectionConfig {
    CollectionConfig {
        path: path.to_string(),
        name: Some(display_name(key, path)),
        icon: Some(find_icon(key).to_string()),
        ..Default::default()
    }
}

/// True for the folder all content collections share.
pub fn is_base_collection_path(path: &str, scope: &TreeScope) -> bool {
    path == scope.content_base_path
}

/// A collection is suggested when it holds files itself and no ancestor
/// collection (other than the content base) already does, or when a Decap
/// folder collection points at it.
pub fn is_suggested_collection<S: Ssg + ?Sized>(_ssg: &S, path: &str, scope: &TreeScope) -> bool {
    let full_path = join(&[scope.ctx.source, path]);

    if scope.ctx.external.decap_folders().contains(&full_path) {
        return true;
    }

    let is_collection = |candidate: &str| scope.collection_paths.iter().any(|p| p == candidate);

    let parts: Vec<&str> = full_path.split('/').collect();
    let has_owning_ancestor = (1..parts.len()).any(|depth| {
        let parent = parts[..depth].join("/");
        is_collection(&parent) && !is_base_collection_path(&parent, scope)
    });

    is_collection(&full_path) && !has_owning_ancestor
}

struct PendingNode {
    tree: CollectionConfigTree,
    children: Vec<usize>,
}

fn assemble(nodes: &mut [Option<PendingNode>], index: usize) -> Option<CollectionConfigTree> {
    let PendingNode { mut tree, children } = nodes[index].take()?;
    tree.collections = children
        .into_iter()
        .filter_map(|child| assemble(nodes, child))
        .collect();
    Some(tree)
}

/// Builds the nested collection tree for a set of collection paths.
pub fn generate_collections_config_tree<S: Ssg + ?Sized>(
    ssg: &S,
    collection_paths: &[String],
    ctx: &CollectionsContext,
) -> Vec<CollectionConfigTree> {
    let paths = ssg.prepare_collection_paths(collection_paths.to_vec(), ctx);
    let base_path = find_base_path(&paths);

    let content_paths = ssg.filter_content_collection_paths(&paths, ctx, &base_path);
    let content_base_path = if !paths.is_empty() && content_paths.len() != paths.len() {
        find_base_path(&content_paths)
    } else {
        base_path.clone()
    };
    let key_base_path = strip_top_path(&content_base_path, ctx.source);

    let scope = TreeScope {
        ctx,
        collection_paths: &paths,
        base_path: &base_path,
        content_base_path: &content_base_path,
        key_base_path: &key_base_path,
    };

    let mut all_paths: BTreeSet<String> = BTreeSet::new();
    if paths.len() == 1 {
        all_paths.extend(paths.iter().cloned());
    } else {
        for path in &paths {
            all_paths.extend(
                get_collection_paths(path)
                    .into_iter()
                    .filter(|ancestor| is_within(ancestor, &base_path)),
            );
            all_paths.insert(path.clone());
        }
    }
    all_paths.extend(paths.iter().filter_map(|path| ssg.companion_path(path)));

    let mut sorted: Vec<String> = all_paths.into_iter().collect();
    sorted.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    let has_pages = sorted
        .iter()
        .any(|path| path == "pages" || path.ends_with("/pages"));

    let mut nodes: Vec<Option<PendingNode>> = Vec::with_capacity(sorted.len());
    let mut roots: Vec<usize> = Vec::new();
    let mut by_path: HashMap<String, usize> = HashMap::new();
    let mut keys: Vec<String> = Vec::with_capacity(sorted.len());

    for full_path in &sorted {
        let path = strip_top_path(full_path, ctx.source);
        let key = ssg.collection_key(&path, &scope, has_pages, &keys);

        let tree = CollectionConfigTree {
            suggested: ssg.is_suggested_collection(&path, &scope),
            config: ssg.generate_collection_config(&key, &path, &scope),
            key: key.clone(),
            collections: Vec::new(),
        };

        let index = nodes.len();
        match by_path.get(&strip_bottom_path(&path)) {
            Some(&parent) => {
                if let Some(Some(node)) = nodes.get_mut(parent) {
                    node.children.push(index);
                }
            }
            None => roots.push(index),
        }

        nodes.push(Some(PendingNode {
            tree,
            children: Vec::new(),
        }));
        by_path.insert(path, index);
        keys.push(key);
    }

    let has_pages_key = keys.iter().any(|key| key == "pages");
    if let Some(source_index) = keys.iter().position(|key| key == "source") {
        if !has_pages_key {
            if let Some(Some(node)) = nodes.get_mut(source_index) {
                rename_to_pages(&mut node.tree);
            }
        }
    }

    roots
        .into_iter()
        .filter_map(|root| assemble(&mut nodes, root))
        .collect()
}

/// Turns the synthetic `source` collection into the site's `pages`.
fn rename_to_pages(tree: &mut CollectionConfigTree) {
    tree.key = "pages".to_string();
    tree.config.icon = Some(find_icon("pages").to_string());
    tree.config.name = Some(display_name("pages", ""));
    tree.config.disable_url = false;
}
