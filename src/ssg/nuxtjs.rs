use super::base;
use super::{Ssg, SsgKey};
use crate::build_commands::{BuildCommands, BuildCommandsContext, base_build_commands};

/// Nuxt. Dynamic route files (`[slug].vue`) are not content.
#[derive(Debug, Clone, Copy)]
pub struct NuxtJs;

impl Ssg for NuxtJs {
    fn key(&self) -> SsgKey {
        SsgKey::Nuxtjs
    }

    fn is_ignored_file(&self, path: &str) -> bool {
        base::is_ignored_file(self, path) || path.contains('[')
    }

    fn generate_build_commands(&self, file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
        let mut commands = base_build_commands(file_paths, ctx);
        commands.push_build("npx nuxt generate", "most common for Nuxt sites");
        commands.prepend_output("dist", "most common for Nuxt sites");
        commands.push_preserved(".nuxt/", "recommended for Nuxt sites");
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::files;
    use crate::types::FileType;

    #[test]
    fn dynamic_routes_are_ignored() {
        assert_eq!(NuxtJs.file_type("pages/blog/[slug].md"), FileType::Ignored);
        assert_eq!(NuxtJs.file_type("content/blog/first.md"), FileType::Content);
    }

    #[test]
    fn build_commands() {
        let commands = NuxtJs.generate_build_commands(&files(&["nuxt.config.ts"]), &BuildCommandsContext::default());
        assert_eq!(commands.build[0].value, "npx nuxt generate");
        assert_eq!(commands.output[0].value, "dist");
        assert_eq!(commands.preserved[0].value, ".nuxt/");
    }
}
