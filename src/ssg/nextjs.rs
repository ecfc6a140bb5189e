use super::{Ssg, SsgKey};
use crate::build_commands::{BuildCommands, BuildCommandsContext, base_build_commands};

/// Next.js, built as a static export.
#[derive(Debug, Clone, Copy)]
pub struct NextJs;

impl Ssg for NextJs {
    fn key(&self) -> SsgKey {
        SsgKey::Nextjs
    }

    fn config_paths(&self) -> &'static [&'static str] {
        &["next.config.js", "next.config.mjs"]
    }

    fn template_extensions(&self) -> &'static [&'static str] {
        &[".tsx", ".jsx"]
    }

    fn ignored_folders(&self) -> &'static [&'static str] {
        &[
            "out/",   // build output
            ".next/", // cache
            "public/",
        ]
    }

    fn generate_build_commands(&self, file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
        let mut commands = base_build_commands(file_paths, ctx);
        commands.prepend_build("npx next build && npx next export", "most common for Next.js sites");
        commands.prepend_output("out", "most common for Next.js sites");
        commands.push_preserved(".next/", "recommended for Next.js sites");
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MockReader, files};
    use crate::types::FileType;

    #[test]
    fn classification() {
        assert_eq!(NextJs.file_type("pages/index.tsx"), FileType::Template);
        assert_eq!(NextJs.file_type("out/index.html"), FileType::Ignored);
        assert_eq!(NextJs.file_type("public/favicon.ico"), FileType::Ignored);
    }

    #[test]
    fn build_commands_follow_package_manager() {
        let paths = files(&["package.json", "yarn.lock", "next.config.js"]);
        let reader = MockReader::new(&[("package.json", r#"{"scripts":{"build":"next build"}}"#)]);
        let ctx = BuildCommandsContext {
            reader: Some(&reader),
            ..Default::default()
        };
        let commands = NextJs.generate_build_commands(&paths, &ctx);

        let build: Vec<&str> = commands.build.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(build, vec!["npx next build && npx next export", "yarn build"]);
        assert_eq!(commands.install[0].value, "yarn");
        assert_eq!(commands.output[0].value, "out");
        let preserved: Vec<&str> = commands.preserved.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(preserved, vec!["node_modules/", ".next/"]);
    }
}
