use super::{Ssg, SsgKey};
use crate::build_commands::{BuildCommands, BuildCommandsContext, base_build_commands};

/// Plain HTML served as-is, marked by a `.nojekyll` file.
#[derive(Debug, Clone, Copy)]
pub struct StaticSite;

impl Ssg for StaticSite {
    fn key(&self) -> SsgKey {
        SsgKey::Static
    }

    fn config_paths(&self) -> &'static [&'static str] {
        &[".nojekyll"]
    }

    fn generate_build_commands(&self, file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
        let mut commands = base_build_commands(file_paths, ctx);
        commands.prepend_output(".", "common for static sites without build");
        commands
    }
}
