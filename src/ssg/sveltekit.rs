use super::base;
use super::{Ssg, SsgKey};
use crate::build_commands::{BuildCommands, BuildCommandsContext, base_build_commands};

/// SvelteKit. Route files (`+layout`, `+server`, `+error`) and parameterised
/// routes are code, not content.
#[derive(Debug, Clone, Copy)]
pub struct SvelteKit;

const ROUTE_MARKERS: [&str; 4] = ["[", "/+error", "/+layout", "/+server"];

impl Ssg for SvelteKit {
    fn key(&self) -> SsgKey {
        SsgKey::Sveltekit
    }

    fn config_paths(&self) -> &'static [&'static str] {
        &["svelte.config.js"]
    }

    fn template_extensions(&self) -> &'static [&'static str] {
        &[".svelte"]
    }

    fn content_extensions(&self) -> &'static [&'static str] {
        &[".svx"]
    }

    fn ignored_folders(&self) -> &'static [&'static str] {
        &[
            "build/",       // build output
            ".svelte-kit/", // cache
            "static/",
        ]
    }

    fn is_ignored_file(&self, path: &str) -> bool {
        base::is_ignored_file(self, path) || ROUTE_MARKERS.iter().any(|marker| path.contains(marker))
    }

    fn generate_build_commands(&self, file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
        let mut commands = base_build_commands(file_paths, ctx);
        if file_paths.iter().any(|path| path == "vite.config.js") {
            commands.push_build("npx vite build", "because of your `vite.config.js` file");
        }
        commands.push_output("build", "most common for SvelteKit sites");
        commands
    }
}
