//! Collection path algebra.
//!
//! A collection path is a directory that directly holds content files. These
//! two functions are the building blocks the tree builder uses to relate
//! collection paths to each other.

use crate::paths::{is_within, join};

/// Every directory a file at `file_path` could belong to, outermost first.
///
/// `"a/b/c.md"` → `["", "a", "a/b"]`
pub fn get_collection_paths(file_path: &str) -> Vec<String> {
    let mut paths = vec![String::new()];
    let parts: Vec<&str> = file_path.split('/').collect();

    let mut builder = String::new();
    for part in &parts[..parts.len().saturating_sub(1)] {
        builder = join(&[builder.as_str(), part]);
        paths.push(builder.clone());
    }

    paths
}

/// Deepest directory shared by every path in `paths`.
///
/// Fewer than two paths have no meaningful shared ancestor, so the result is
/// the root (`""`).
pub fn find_base_path<S: AsRef<str>>(paths: &[S]) -> String {
    let mut base_path = String::new();
    let Some(first) = paths.first() else {
        return base_path;
    };
    if paths.len() < 2 {
        return base_path;
    }

    let parts: Vec<&str> = first.as_ref().split('/').collect();
    for depth in 1..=parts.len() {
        let check_path = join(&parts[..depth]);
        if check_path.is_empty() {
            continue;
        }

        let shared = paths
            .iter()
            .all(|path| is_within(path.as_ref(), &check_path));
        if !shared {
            break;
        }
        base_path = check_path;
    }

    base_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_paths_outermost_first() {
        assert_eq!(get_collection_paths("a/b/c.md"), vec!["", "a", "a/b"]);
    }

    #[test]
    fn collection_paths_for_root_file() {
        assert_eq!(get_collection_paths("index.md"), vec![""]);
    }

    #[test]
    fn finds_base_path() {
        assert_eq!(
            find_base_path(&["src", "src/_data", "src/_includes", "src/_includes/nav"]),
            "src"
        );
    }

    #[test]
    fn single_path_has_no_base() {
        assert_eq!(find_base_path(&["src"]), "");
        let none: [&str; 0] = [];
        assert_eq!(find_base_path(&none), "");
    }

    #[test]
    fn base_path_stops_at_first_divergence() {
        assert_eq!(
            find_base_path(&["site/content/posts", "site/content/pages", "site/data"]),
            "site"
        );
        assert_eq!(find_base_path(&["a/b/c", "a/b/c/d", "a/b/c"]), "a/b/c");
    }

    #[test]
    fn root_collection_means_no_base() {
        assert_eq!(find_base_path(&["", "content", "content/posts"]), "");
    }

    #[test]
    fn base_path_requires_whole_segments() {
        assert_eq!(find_base_path(&["src/posts", "srcs/posts"]), "");
    }
}
