//! Human-readable CLI output.
//!
//! JSON is the primary output. `--format tree` prints these views instead,
//! which read better when checking what was inferred for a repository.
//!
//! ## Configuration
//!
//! ```text
//! Generator: jekyll
//! Source: (root)
//! Markdown: kramdown
//!
//! Collections
//! pages (Pages) *
//!     Path: (root)
//!     posts (Posts) *
//!         Path: _posts
//!     data (Data)
//!         Path: _data
//!         Locked
//! ```
//!
//! `*` marks suggested collections.
//!
//! ## Build commands
//!
//! ```text
//! Install
//!     bundle install (because of your Gemfile)
//! Build
//!     bundle exec jekyll build (because of your Gemfile)
//! Environment
//!     JEKYLL_ENV=production (recommended for hosted Jekyll sites)
//! ```
//!
//! Every view has a pure `format_*` function returning lines and a `print_*`
//! wrapper that writes them to stdout.

use crate::build_commands::{BuildCommandSuggestion, BuildCommands};
use crate::types::{CollectionConfigTree, GenerateResult};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "(root)" } else { path }
}

fn suggestion_line(suggestion: &BuildCommandSuggestion) -> String {
    format!("{} ({})", suggestion.value, suggestion.attribution)
}

// ============================================================================
// Configuration
// ============================================================================

fn format_tree(tree: &CollectionConfigTree, depth: usize, lines: &mut Vec<String>) {
    let config = &tree.config;
    let mut header = format!("{}{}", indent(depth), tree.key);
    if let Some(name) = &config.name {
        header.push_str(&format!(" ({name})"));
    }
    if tree.suggested {
        header.push_str(" *");
    }
    lines.push(header);

    lines.push(format!("{}Path: {}", indent(depth + 1), display_path(&config.path)));
    if !config.glob.is_empty() {
        lines.push(format!("{}Glob: {}", indent(depth + 1), config.glob.join(", ")));
    }
    if config.disable_add && config.disable_file_actions {
        lines.push(format!("{}Locked", indent(depth + 1)));
    } else if config.disable_url {
        lines.push(format!("{}No URLs", indent(depth + 1)));
    }

    for child in &tree.collections {
        format_tree(child, depth + 1, lines);
    }
}

/// Nested collection listing, one header plus context lines per collection.
pub fn format_collections(trees: &[CollectionConfigTree]) -> Vec<String> {
    let mut lines = Vec::new();
    for tree in trees {
        format_tree(tree, 0, &mut lines);
    }
    lines
}

pub fn format_result(result: &GenerateResult) -> Vec<String> {
    let config = &result.config;
    let mut lines = vec![
        format!("Generator: {}", result.ssg),
        format!("Source: {}", display_path(config.source.as_deref().unwrap_or(""))),
    ];
    if let Some(markdown) = &config.markdown {
        let engine = serde_json::to_value(markdown.engine)
            .ok()
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();
        lines.push(format!("Markdown: {engine}"));
    }
    if let Some(paths) = &config.paths {
        lines.push(format!(
            "Uploads: {} (static: {})",
            paths.uploads,
            display_path(&paths.static_path)
        ));
    }
    if let Some(timezone) = &config.timezone {
        lines.push(format!("Timezone: {timezone}"));
    }

    if config.collections_config.is_some() {
        lines.push(String::new());
        lines.push("Collections: supplied by config".to_string());
    } else if !result.collections.is_empty() {
        lines.push(String::new());
        lines.push("Collections".to_string());
        lines.extend(format_collections(&result.collections));
    }

    lines
}

pub fn print_result(result: &GenerateResult) {
    for line in format_result(result) {
        println!("{line}");
    }
}

// ============================================================================
// Build commands
// ============================================================================

pub fn format_build_commands(commands: &BuildCommands) -> Vec<String> {
    let sections = [
        ("Install", &commands.install),
        ("Build", &commands.build),
        ("Output", &commands.output),
        ("Preserved", &commands.preserved),
    ];

    let mut lines = Vec::new();
    for (title, suggestions) in sections {
        if suggestions.is_empty() {
            continue;
        }
        lines.push(title.to_string());
        lines.extend(
            suggestions
                .iter()
                .map(|suggestion| format!("{}{}", indent(1), suggestion_line(suggestion))),
        );
    }

    if !commands.environment.is_empty() {
        lines.push("Environment".to_string());
        for (name, suggestion) in &commands.environment {
            lines.push(format!("{}{}={}", indent(1), name, suggestion_line(suggestion)));
        }
    }

    lines
}

pub fn print_build_commands(commands: &BuildCommands) {
    for line in format_build_commands(commands) {
        println!("{line}");
    }
}
