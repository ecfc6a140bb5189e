use super::{Ssg, SsgKey};
use crate::build_commands::{BuildCommands, BuildCommandsContext, add_bundler_commands, base_build_commands};

/// Bridgetown.
#[derive(Debug, Clone, Copy)]
pub struct Bridgetown;

impl Ssg for Bridgetown {
    fn key(&self) -> SsgKey {
        SsgKey::Bridgetown
    }

    fn config_paths(&self) -> &'static [&'static str] {
        &["bridgetown.config.yml", "bridgetown.config.yaml"]
    }

    fn template_extensions(&self) -> &'static [&'static str] {
        &[".liquid"]
    }

    fn generate_build_commands(&self, file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
        let mut commands = base_build_commands(file_paths, ctx);
        add_bundler_commands(&mut commands, file_paths, ctx.source);

        if file_paths.iter().any(|path| path == "bin/bridgetown") {
            commands.prepend_build("bin/bridgetown deploy", "most common for Bridgetown sites");
        }
        commands.prepend_output("output", "most common for Bridgetown sites");

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::files;

    #[test]
    fn build_with_binstub_and_gemfile() {
        let paths = files(&["Gemfile", "bin/bridgetown", "bridgetown.config.yml"]);
        let commands = Bridgetown.generate_build_commands(&paths, &BuildCommandsContext::default());
        assert_eq!(commands.install[0].value, "bundle install");
        assert_eq!(commands.build[0].value, "bin/bridgetown deploy");
        assert_eq!(commands.output[0].value, "output");
        assert!(commands.environment.contains_key("GEM_HOME"));
        assert!(!commands.environment.contains_key("BUNDLE_GEMFILE"));
    }

    #[test]
    fn build_without_binstub() {
        let commands = Bridgetown.generate_build_commands(&files(&["bridgetown.config.yml"]), &BuildCommandsContext::default());
        assert!(commands.build.is_empty());
        assert!(commands.install.is_empty());
        assert_eq!(commands.output[0].value, "output");
    }
}
