use super::{Ssg, SsgKey};
use crate::build_commands::{BUILD_ROOT, BuildCommands, BuildCommandsContext, base_build_commands};

/// Lume.
#[derive(Debug, Clone, Copy)]
pub struct Lume;

impl Ssg for Lume {
    fn key(&self) -> SsgKey {
        SsgKey::Lume
    }

    fn partial_folders(&self) -> &'static [&'static str] {
        &["_includes/"]
    }

    fn generate_build_commands(&self, file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
        let mut commands = base_build_commands(file_paths, ctx);
        commands.push_build("deno task lume", "most common for Lume sites");
        commands.prepend_output("_site", "most common for Lume sites");
        commands.push_preserved(".deno_cache/", "recommended for speeding up Deno installs");
        commands.set_environment(
            "DENO_DIR",
            &format!("{BUILD_ROOT}/.deno_cache/"),
            "recommended for speeding up Deno installs",
        );
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::files;
    use crate::types::FileType;

    #[test]
    fn includes_are_partials() {
        assert_eq!(Lume.file_type("_includes/layout.njk"), FileType::Partial);
    }

    #[test]
    fn build_commands() {
        let commands = Lume.generate_build_commands(&files(&["_config.ts"]), &BuildCommandsContext::default());
        assert_eq!(commands.build[0].value, "deno task lume");
        assert_eq!(commands.output[0].value, "_site");
        assert_eq!(commands.preserved[0].value, ".deno_cache/");
        assert_eq!(
            commands.environment["DENO_DIR"].value,
            "/usr/local/__site/src/.deno_cache/"
        );
    }
}
