use super::base;
use super::{Ssg, SsgKey};
use crate::build_commands::{BuildCommands, BuildCommandsContext, base_build_commands};

/// Gatsby. File System Route API pages (`{Node.field}.js`) are not content.
#[derive(Debug, Clone, Copy)]
pub struct Gatsby;

impl Ssg for Gatsby {
    fn key(&self) -> SsgKey {
        SsgKey::Gatsby
    }

    fn template_extensions(&self) -> &'static [&'static str] {
        &[".tsx", ".jsx"]
    }

    fn is_ignored_file(&self, path: &str) -> bool {
        base::is_ignored_file(self, path) || path.contains('{')
    }

    fn generate_build_commands(&self, file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
        let mut commands = base_build_commands(file_paths, ctx);
        commands.prepend_build("npx gatsby build", "default for Gatsby sites");
        commands.prepend_output("public", "default for Gatsby sites");
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::files;
    use crate::types::FileType;

    #[test]
    fn route_api_files_are_ignored() {
        assert_eq!(Gatsby.file_type("src/pages/{mdx.slug}.tsx"), FileType::Ignored);
        assert_eq!(Gatsby.file_type("src/pages/index.tsx"), FileType::Template);
    }

    #[test]
    fn build_commands() {
        let commands = Gatsby.generate_build_commands(&files(&["gatsby-config.js"]), &BuildCommandsContext::default());
        assert_eq!(commands.build[0].value, "npx gatsby build");
        assert_eq!(commands.output[0].value, "public");
    }
}
