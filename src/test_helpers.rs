//! Shared test utilities for the siteprobe test suite.
//!
//! Provides fixture builders, a mock reader, and collection tree lookups and
//! assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let paths = files(&["index.html", "content/posts/a.md"]);
//! let reader = MockReader::new(&[("_config.yml", "title: Blog")]);
//!
//! let trees = OTHER.generate_collections_config_tree(&collection_paths, &ctx);
//! assert_tree_shape(&trees, &[
//!     ("pages", &["content"]),
//!     ("content", &["posts"]),
//! ]);
//! ```

use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

use crate::data::ReadFile;
use crate::types::CollectionConfigTree;

// =========================================================================
// Fixture setup
// =========================================================================

/// Owned path list from string literals.
pub fn files(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

/// Write a site to a temp directory and return it.
///
/// Each entry is `(relative path, contents)`; parent folders are created.
pub fn setup_site(entries: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_files(tmp.path(), entries).unwrap();
    tmp
}

fn write_files(root: &Path, entries: &[(&str, &str)]) -> std::io::Result<()> {
    for (relative, contents) in entries {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
    }
    Ok(())
}

/// In-memory file contents. Unknown paths read as missing.
#[derive(Debug, Default)]
pub struct MockReader {
    files: HashMap<String, String>,
}

impl MockReader {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            files: entries
                .iter()
                .map(|(path, contents)| (path.to_string(), contents.to_string()))
                .collect(),
        }
    }
}

impl ReadFile for MockReader {
    fn read_file(&self, path: &str) -> Option<String> {
        self.files.get(path).cloned()
    }
}

// =========================================================================
// Tree lookups, panicking with the available keys on a miss
// =========================================================================

/// Every key in the tree, depth first.
pub fn tree_keys(trees: &[CollectionConfigTree]) -> Vec<&str> {
    let mut keys = Vec::new();
    for tree in trees {
        keys.push(tree.key.as_str());
        keys.extend(tree_keys(&tree.collections));
    }
    keys
}

fn search<'a>(trees: &'a [CollectionConfigTree], key: &str) -> Option<&'a CollectionConfigTree> {
    trees
        .iter()
        .find_map(|tree| (tree.key == key).then_some(tree).or_else(|| search(&tree.collections, key)))
}

/// Find a node anywhere in the tree by key. Panics if not found.
pub fn find_tree<'a>(trees: &'a [CollectionConfigTree], key: &str) -> &'a CollectionConfigTree {
    search(trees, key).unwrap_or_else(|| {
        let keys = tree_keys(trees);
        panic!("collection '{key}' not found. Available: {keys:?}")
    })
}

/// Keys of a node's direct children in order.
pub fn child_keys(tree: &CollectionConfigTree) -> Vec<&str> {
    tree.collections.iter().map(|c| c.key.as_str()).collect()
}

/// Assert the children of each listed node.
///
/// Each entry is `(key, children)`. Use `&[]` for leaf nodes.
///
/// ```rust
/// assert_tree_shape(&trees, &[
///     ("pages", &["data", "content"]),
///     ("data", &[]),
/// ]);
/// ```
pub fn assert_tree_shape(trees: &[CollectionConfigTree], expected: &[(&str, &[&str])]) {
    for (key, children) in expected {
        let actual_children = child_keys(find_tree(trees, key));
        assert_eq!(
            actual_children,
            children.to_vec(),
            "children of '{key}' mismatch"
        );
    }
}
