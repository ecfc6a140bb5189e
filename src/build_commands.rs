//! Build command suggestions.
//!
//! Suggestions come from two places: files every Node-based site shares
//! (`package.json` and its lockfiles) plus hosting settings files, and then
//! generator defaults layered on top by each [`Ssg`](crate::ssg::Ssg). Every
//! suggestion carries an attribution explaining where it came from.
//!
//! | File | Suggests |
//! |------|----------|
//! | `package.json` + lockfile | npm / yarn / pnpm install and build, `node_modules/` |
//! | `.forestry/settings.yml` | install command |
//! | `netlify.toml` | build command, publish folder |
//! | `vercel.json` | install and build commands, output folder |
//! | `Gemfile` | bundler install, gem cache |

use crate::data::{ReadFile, parse_data_file, truthy_at, value_at};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Cache folders persist between builds under this prefix.
pub const BUILD_ROOT: &str = "/usr/local/__site/src";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildCommandSuggestion {
    pub value: String,
    /// Why this suggestion was made.
    pub attribution: String,
}

impl BuildCommandSuggestion {
    pub fn new(value: impl Into<String>, attribution: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            attribution: attribution.into(),
        }
    }
}

/// Suggestions per build setting, most likely first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildCommands {
    pub install: Vec<BuildCommandSuggestion>,
    pub build: Vec<BuildCommandSuggestion>,
    pub output: Vec<BuildCommandSuggestion>,
    pub preserved: Vec<BuildCommandSuggestion>,
    pub environment: IndexMap<String, BuildCommandSuggestion>,
}

/// Inputs available while suggesting build commands.
#[derive(Clone, Copy, Default)]
pub struct BuildCommandsContext<'a> {
    /// Parsed generator config, if one was found.
    pub config: Option<&'a Value>,
    pub source: Option<&'a str>,
    pub reader: Option<&'a dyn ReadFile>,
}

#[derive(Debug, Clone, Copy)]
enum Setting {
    Install,
    Build,
    Output,
}

impl BuildCommands {
    /// Adds a suggestion to the front of `install`.
    pub fn prepend_install(&mut self, value: &str, attribution: &str) {
        self.install
            .insert(0, BuildCommandSuggestion::new(value, attribution));
    }

    /// Adds a suggestion to the front of `build`.
    pub fn prepend_build(&mut self, value: &str, attribution: &str) {
        self.build
            .insert(0, BuildCommandSuggestion::new(value, attribution));
    }

    /// Adds a suggestion to the front of `output`.
    pub fn prepend_output(&mut self, value: &str, attribution: &str) {
        self.output
            .insert(0, BuildCommandSuggestion::new(value, attribution));
    }

    /// Adds a suggestion to the front of `preserved`.
    pub fn prepend_preserved(&mut self, value: &str, attribution: &str) {
        self.preserved
            .insert(0, BuildCommandSuggestion::new(value, attribution));
    }

    pub fn push_install(&mut self, value: &str, attribution: &str) {
        self.install.push(BuildCommandSuggestion::new(value, attribution));
    }

    pub fn push_build(&mut self, value: &str, attribution: &str) {
        self.build.push(BuildCommandSuggestion::new(value, attribution));
    }

    pub fn push_output(&mut self, value: &str, attribution: &str) {
        self.output.push(BuildCommandSuggestion::new(value, attribution));
    }

    pub fn push_preserved(&mut self, value: &str, attribution: &str) {
        self.preserved.push(BuildCommandSuggestion::new(value, attribution));
    }

    pub fn set_environment(&mut self, name: &str, value: &str, attribution: &str) {
        self.environment.insert(
            name.to_string(),
            BuildCommandSuggestion::new(value, attribution),
        );
    }

    /// Adds a value read from a settings file if it is a non-empty string.
    fn add_from_settings(&mut self, value: Option<&Value>, filename: &str, setting: Setting) {
        let Some(value) = value.and_then(Value::as_str).filter(|v| !v.is_empty()) else {
            return;
        };

        let suggestion = BuildCommandSuggestion::new(value, format!("found in your `{filename}` file"));
        match setting {
            Setting::Install => self.install.push(suggestion),
            Setting::Build => self.build.push(suggestion),
            Setting::Output => self.output.push(suggestion),
        }
    }
}

fn has_file(file_paths: &[String], path: &str) -> bool {
    file_paths.iter().any(|p| p == path)
}

/// Parses a settings file, treating malformed files as absent.
fn read_settings(path: &str, reader: &dyn ReadFile) -> Option<Value> {
    match parse_data_file(path, reader) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(path, error = %e, "ignoring malformed settings file");
            None
        }
    }
}

/// Suggestions every generator starts from.
pub fn base_build_commands(file_paths: &[String], ctx: &BuildCommandsContext) -> BuildCommands {
    let mut commands = BuildCommands::default();

    if has_file(file_paths, "package.json") {
        add_package_manager_commands(&mut commands, file_paths, ctx.reader);
    }

    let Some(reader) = ctx.reader else {
        return commands;
    };

    let forestry = ".forestry/settings.yml";
    if has_file(file_paths, forestry) {
        let parsed = read_settings(forestry, reader);
        commands.add_from_settings(
            value_at(parsed.as_ref(), &["build", "install_dependencies_command"]),
            forestry,
            Setting::Install,
        );
    }

    let netlify = "netlify.toml";
    if has_file(file_paths, netlify) {
        let parsed = read_settings(netlify, reader);
        commands.add_from_settings(
            value_at(parsed.as_ref(), &["build", "command"]),
            netlify,
            Setting::Build,
        );
        commands.add_from_settings(
            value_at(parsed.as_ref(), &["build", "publish"]),
            netlify,
            Setting::Output,
        );
    }

    let vercel = "vercel.json";
    if has_file(file_paths, vercel) {
        let parsed = read_settings(vercel, reader);
        commands.add_from_settings(
            value_at(parsed.as_ref(), &["installCommand"]),
            vercel,
            Setting::Install,
        );
        commands.add_from_settings(
            value_at(parsed.as_ref(), &["buildCommand"]),
            vercel,
            Setting::Build,
        );
        commands.add_from_settings(
            value_at(parsed.as_ref(), &["outputDirectory"]),
            vercel,
            Setting::Output,
        );
    }

    commands
}

fn add_package_manager_commands(
    commands: &mut BuildCommands,
    file_paths: &[String],
    reader: Option<&dyn ReadFile>,
) {
    let use_yarn = has_file(file_paths, "yarn.lock");
    let use_pnpm = has_file(file_paths, "pnpm-lock.yaml");
    let use_npm = has_file(file_paths, "package-lock.json") || (!use_yarn && !use_pnpm);

    let managers = [
        (use_npm, "npm i", "npm run build", "because of your `package.json` file"),
        (use_yarn, "yarn", "yarn build", "because of your `yarn.lock` file"),
        (use_pnpm, "pnpm i", "pnpm build", "because of your `pnpm-lock.yaml` file"),
    ];

    for (enabled, install, _, attribution) in managers {
        if enabled {
            commands
                .install
                .push(BuildCommandSuggestion::new(install, attribution));
        }
    }

    commands.push_preserved("node_modules/", "because of your `package.json` file");

    let has_build_script = reader
        .and_then(|reader| read_settings("package.json", reader))
        .is_some_and(|parsed| truthy_at(Some(&parsed), &["scripts", "build"]));
    if !has_build_script {
        return;
    }

    for (enabled, _, build, _) in managers {
        if enabled {
            commands.build.push(BuildCommandSuggestion::new(
                build,
                "found in your `package.json` file",
            ));
        }
    }
}

/// Bundler suggestions shared by the Ruby generators.
///
/// Returns the Gemfile path when one was found.
pub fn add_bundler_commands<'p>(
    commands: &mut BuildCommands,
    file_paths: &'p [String],
    source: Option<&str>,
) -> Option<&'p str> {
    let gemfile = file_paths
        .iter()
        .map(String::as_str)
        .find(|path| *path == "Gemfile" || path.ends_with("/Gemfile"))?;

    commands.prepend_install("bundle install", "because of your Gemfile");
    commands.push_preserved(".bundle_cache/", "recommended for speeding up bundler installs");
    commands.set_environment(
        "GEM_HOME",
        &format!("{BUILD_ROOT}/.bundle_cache/"),
        "recommended for speeding up bundler installs",
    );

    if source.is_some_and(|source| !source.is_empty()) {
        commands.set_environment("BUNDLE_GEMFILE", gemfile, "because of your Gemfile");
    }

    Some(gemfile)
}
