//! # siteprobe
//!
//! Infers an editor configuration for a static site repository from nothing
//! but its file listing, plus whatever config files the caller lets it read.
//!
//! ```text
//! file paths ──► generator ──► source ──► file roles ──► collection tree
//!                                              │
//!                                              └──► generator config ──► markdown, paths, build commands
//! ```
//!
//! Everything is heuristic and deterministic. The same paths and file
//! contents always produce the same result, and no input makes the entry
//! points fail: unknown layouts fall back to the `other` generator, the
//! repository root and an empty tree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`generate`] | Entry points: [`generate::generate_configuration`] and [`generate::generate_build_commands`] |
//! | [`ssg`] | The [`ssg::Ssg`] trait, one rule set per generator, detection |
//! | [`ssg::base`] | Shared classification and the collection tree builder |
//! | [`collections`] | Collection path algebra: ancestors and shared base folders |
//! | [`types`] | Serialized output types |
//! | [`markdown`] | Engine-neutral markdown settings |
//! | [`build_commands`] | Install, build and output suggestions |
//! | [`external`] | Decap CMS config found in the repository |
//! | [`data`] | YAML, TOML and JSON decoding behind the [`data::ReadFile`] capability |
//! | [`paths`] | Forward-slash path helpers |
//! | [`icons`] | Material icon names for collection keys |
//! | [`config`] | Override files for the CLI |
//! | [`scan`] | Listing and reading a repository on disk |
//! | [`output`] | Tree view for the CLI |
//!
//! # Detection
//!
//! Each generator scores one point per recognised config file outside its
//! ignored folders. A single highest scorer wins. Ties and zero scores give
//! `other`.
//!
//! # Collections
//!
//! A collection is any folder that directly holds content or template files.
//! Collections are expanded to every ancestor inside their shared base
//! folder and nested by folder, so the tree mirrors the repository. The base
//! folder itself becomes `pages`. Generators adjust the tree through hooks:
//! Jekyll pairs `_posts` with `_drafts`, Hugo drops folders holding only a
//! branch index, data folders are locked.

pub mod build_commands;
pub mod collections;
pub mod config;
pub mod data;
pub mod external;
pub mod generate;
pub mod icons;
pub mod markdown;
pub mod output;
pub mod paths;
pub mod scan;
pub mod ssg;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
