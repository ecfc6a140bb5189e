use super::{Ssg, SsgKey};
use crate::build_commands::{BuildCommands, BuildCommandsContext, base_build_commands};
use crate::external::ExternalConfig;
use crate::types::{Paths, SnippetsImports};

/// Docusaurus. Content is MDX, static assets live in `static/`.
#[derive(Debug, Clone, Copy)]
pub struct Docusaurus;

impl Ssg for Docusaurus {
    fn key(&self) -> SsgKey {
        SsgKey::Docusaurus
    }

    fn config_paths(&self) -> &'static [&'static str] {
        &["docusaurus.config.ts", "docusaurus.config.js"]
    }

    // https://docusaurus.io/docs/static-assets
    fn ignored_folders(&self) -> &'static [&'static str] {
        &["static/", "public/"]
    }

    fn generate_build_commands(&self, file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
        let mut commands = base_build_commands(file_paths, ctx);
        commands.prepend_output("build", "most common for Docusaurus sites");
        commands
    }

    fn paths(&self, _external: &ExternalConfig) -> Paths {
        Paths {
            static_path: "static".to_string(),
            uploads: "static/uploads".to_string(),
        }
    }

    fn snippets_imports(&self) -> Option<SnippetsImports> {
        Some(SnippetsImports {
            mdx: true,
            docusaurus_mdx: true,
            ..Default::default()
        })
    }
}
