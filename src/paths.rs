//! Repository-relative path helpers.
//!
//! Every path handled by siteprobe is a forward-slash string relative to the
//! repository root: no leading slash, no `./`, case-sensitive. These helpers
//! work on those strings directly instead of going through [`std::path`],
//! because the inputs come from a crawler (or a caller) rather than the local
//! filesystem and must behave the same on every platform.
//!
//! ```text
//! join(["/src/", "//posts///a.md"])        → "src/posts/a.md"
//! strip_top_path("src/posts/a.md", "src")  → "posts/a.md"
//! strip_bottom_path("src/posts/a.md")      → "src/posts"
//! extname("src/posts/a.md")                → ".md"
//! basename("src/posts/")                   → "posts"
//! ```

/// Removes duplicate, leading, and trailing slashes.
pub fn normalise_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Joins segments with `/`, dropping empty segments and normalising the result.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let joined = segments
        .iter()
        .map(AsRef::as_ref)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    normalise_path(&joined)
}

/// Removes `prefix` from the front of `path` if it is a whole-directory prefix.
///
/// - `("src/index.html", "src")` → `"index.html"`
/// - `("src", "/src/")` → `""`
/// - `("src/index.html", "")` → `"src/index.html"`
/// - `("sauce/content", "sau")` → `"sauce/content"` (not a directory prefix)
pub fn strip_top_path(path: &str, prefix: &str) -> String {
    let prefix = normalise_path(prefix);
    if path == prefix {
        return String::new();
    }
    if prefix.is_empty() {
        return path.to_string();
    }

    path.strip_prefix(&prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
        .to_string()
}

/// Removes the filename or innermost folder from a path.
pub fn strip_bottom_path(path: &str) -> String {
    match path.rfind('/') {
        Some(index) if index > 0 => path[..index].to_string(),
        _ => String::new(),
    }
}

/// File extension of the last segment, including the dot.
///
/// Dotfiles without a further extension (`.eleventy`, `folder/.file`) have none.
pub fn extname(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(index) if index > 0 => &name[index..],
        _ => "",
    }
}

/// Last non-empty segment of a path.
pub fn basename(path: &str) -> &str {
    path.split('/')
        .rev()
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
}

/// True when `path` equals `dir` or sits somewhere beneath it.
///
/// The empty directory contains everything.
pub fn is_within(path: &str, dir: &str) -> bool {
    dir.is_empty()
        || path == dir
        || path
            .strip_prefix(dir)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Final element of a slice.
pub fn last<T>(items: &[T]) -> Option<&T> {
    items.last()
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // join / normalise
    // =========================================================================

    #[test]
    fn join_single_segment() {
        assert_eq!(join(&["first"]), "first");
    }

    #[test]
    fn join_two_segments() {
        assert_eq!(join(&["first", "final"]), "first/final");
    }

    #[test]
    fn join_collapses_slashes_and_trims_ends() {
        assert_eq!(join(&["/first/", "//fi///nal"]), "first/fi/nal");
    }

    #[test]
    fn join_nothing_is_empty() {
        let none: [&str; 0] = [];
        assert_eq!(join(&none), "");
        assert_eq!(join(&["", ""]), "");
    }

    #[test]
    fn join_is_idempotent_with_empty_segments() {
        let once = join(&["a//b", "c/"]);
        assert_eq!(join(&[once.as_str(), ""]), once);
        assert_eq!(join(&["", once.as_str(), ""]), once);
    }

    #[test]
    fn normalise_strips_edges() {
        assert_eq!(normalise_path("//src///content/"), "src/content");
        assert_eq!(normalise_path("/"), "");
    }

    // =========================================================================
    // strip_top_path
    // =========================================================================

    #[test]
    fn strip_top_path_variants() {
        assert_eq!(strip_top_path("src/content/index.html", "src"), "content/index.html");
        assert_eq!(strip_top_path("src/content/index.html", "src/"), "content/index.html");
        assert_eq!(strip_top_path("src/content/index.html", "/src"), "content/index.html");
        assert_eq!(strip_top_path("src/content/index.html", "/src/"), "content/index.html");
        assert_eq!(strip_top_path("src/index.html", "src"), "index.html");
        assert_eq!(strip_top_path("src/index.html", ""), "src/index.html");
        assert_eq!(strip_top_path("src", "src"), "");
        assert_eq!(strip_top_path("src", "/src/"), "");
        assert_eq!(strip_top_path("src", ""), "src");
        assert_eq!(strip_top_path("sauce/content", "sauce"), "content");
    }

    #[test]
    fn strip_top_path_ignores_partial_segment_prefix() {
        assert_eq!(strip_top_path("sauce/content", "sau"), "sauce/content");
    }

    #[test]
    fn strip_top_path_reprefix_reconstructs() {
        let path = "site/src/posts/a.md";
        for prefix in ["site", "site/src", "site/src/posts"] {
            let stripped = strip_top_path(path, prefix);
            assert_eq!(format!("{prefix}/{stripped}"), path);
        }
    }

    // =========================================================================
    // strip_bottom_path
    // =========================================================================

    #[test]
    fn strip_bottom_path_variants() {
        assert_eq!(strip_bottom_path("src/content/index.html"), "src/content");
        assert_eq!(strip_bottom_path("src/content"), "src");
        assert_eq!(strip_bottom_path("src"), "");
        assert_eq!(strip_bottom_path(""), "");
    }

    #[test]
    fn strip_bottom_path_reaches_empty_after_n_minus_one() {
        let mut path = "a/b/c/d/e.md".to_string();
        let segments = path.split('/').count();
        for _ in 0..segments - 1 {
            assert!(!path.is_empty());
            path = strip_bottom_path(&path);
        }
        assert_eq!(path, "");
    }

    // =========================================================================
    // extname / basename / last
    // =========================================================================

    #[test]
    fn extname_variants() {
        assert_eq!(extname(""), "");
        assert_eq!(extname("file.md"), ".md");
        assert_eq!(extname("folder/file.md"), ".md");
        assert_eq!(extname("folder/file"), "");
        assert_eq!(extname("folder/.file"), "");
        assert_eq!(extname("folder.d/file"), "");
        assert_eq!(extname(".eleventy.js"), ".js");
    }

    #[test]
    fn basename_variants() {
        assert_eq!(basename(""), "");
        assert_eq!(basename("first"), "first");
        assert_eq!(basename("/first"), "first");
        assert_eq!(basename("/first/"), "first");
        assert_eq!(basename("first/"), "first");
        assert_eq!(basename("first/second"), "second");
        assert_eq!(basename("/first/second/"), "second");
    }

    #[test]
    fn last_element() {
        assert_eq!(last(&["first", "final"]), Some(&"final"));
        assert_eq!(last(&["first"]), Some(&"first"));
        let empty: [&str; 0] = [];
        assert_eq!(last(&empty), None);
    }

    #[test]
    fn is_within_directory() {
        assert!(is_within("src/a.md", "src"));
        assert!(is_within("src", "src"));
        assert!(is_within("anything", ""));
        assert!(!is_within("srcs/a.md", "src"));
    }
}
