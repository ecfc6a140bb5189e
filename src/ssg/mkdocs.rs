use super::{Ssg, SsgKey};
use crate::build_commands::{BUILD_ROOT, BuildCommands, BuildCommandsContext, base_build_commands};

/// MkDocs. Python dependencies come from `requirements.txt` or a `Pipfile`.
#[derive(Debug, Clone, Copy)]
pub struct MkDocs;

impl Ssg for MkDocs {
    fn key(&self) -> SsgKey {
        SsgKey::Mkdocs
    }

    fn config_paths(&self) -> &'static [&'static str] {
        &["mkdocs.yml"]
    }

    fn conventional_paths(&self) -> &'static [&'static str] {
        &["docs/"]
    }

    fn generate_build_commands(&self, file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
        let mut commands = base_build_commands(file_paths, ctx);
        let has_file = |name: &str| file_paths.iter().any(|path| path == name);

        commands.push_build("mkdocs build", "most common for MkDocs sites");
        commands.prepend_output("site", "most common for MkDocs sites");

        if has_file("requirements.txt") {
            commands.push_install(
                "pip install -r requirements.txt",
                "because of your `requirements.txt` file",
            );
            commands.set_environment(
                "PIP_CACHE_DIR",
                &format!("{BUILD_ROOT}/.pip_cache/"),
                "recommended for speeding up pip installs",
            );
            commands.push_preserved(".pip_cache/", "recommended for speeding up pip installs");
        }

        if has_file("Pipfile") {
            commands.push_install("pipenv install", "because of your `Pipfile`");
            commands.set_environment(
                "PIPENV_CACHE_DIR",
                &format!("{BUILD_ROOT}/.pipenv_cache/"),
                "recommended for speeding up pipenv installs",
            );
            commands.push_preserved(".pipenv_cache/", "recommended for speeding up pipenv installs");
        }

        commands
    }
}
