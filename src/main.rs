use clap::{Parser, ValueEnum};
use siteprobe::generate::{GenerateOptions, generate_build_commands, generate_configuration};
use siteprobe::scan::{FsReader, scan_paths};
use siteprobe::ssg::SsgKey;
use siteprobe::types::Configuration;
use siteprobe::{config, output};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Tree,
}

#[derive(Parser)]
#[command(name = "siteprobe")]
#[command(about = "Infer an editor configuration for a static site repository")]
#[command(long_about = "\
Infer an editor configuration for a static site repository

Lists the files in INPUT_FOLDER, works out which static site generator the
site uses and where its source lives, reads the generator's config, and
prints the inferred configuration:

  ssg             detected generator (hugo, jekyll, eleventy, ...)
  config.source   folder the site lives in, if not the repository root
  config.paths    static and uploads folders
  config.markdown markdown engine and options
  collections     nested collection tree, with suggested collections flagged

Use --build-commands to print install, build and output suggestions instead.")]
#[command(version)]
struct Cli {
    /// Repository to inspect
    input_folder: PathBuf,

    /// Skip detection and use this generator
    #[arg(long, value_parser = parse_ssg)]
    ssg: Option<SsgKey>,

    /// Site source folder, relative to the repository root
    #[arg(long)]
    source: Option<String>,

    /// Existing configuration (YAML, TOML or JSON); present fields are kept as-is
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print build command suggestions instead of the configuration
    #[arg(long)]
    build_commands: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: Format,

    /// Log filter for stderr output, overriding RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_ssg(value: &str) -> Result<SsgKey, String> {
    value.parse().map_err(|e| format!("{e}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let mut overrides = match &cli.config {
        Some(path) => Some(config::load_config(path)?),
        None => None,
    };
    if let Some(source) = cli.source {
        let overrides = overrides.get_or_insert_with(Configuration::default);
        overrides.source = Some(source);
        config::validate(overrides)?;
    }

    let file_paths = scan_paths(&cli.input_folder)?;
    let reader = FsReader::new(&cli.input_folder);
    let options = GenerateOptions {
        config: overrides,
        ssg: cli.ssg,
        reader: Some(&reader),
        timezone: local_timezone(),
    };

    if cli.build_commands {
        let commands = generate_build_commands(&file_paths, &options);
        match cli.format {
            Format::Json => println!("{}", serde_json::to_string_pretty(&commands)?),
            Format::Tree => output::print_build_commands(&commands),
        }
    } else {
        let result = generate_configuration(&file_paths, &options);
        match cli.format {
            Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            Format::Tree => output::print_result(&result),
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// IANA name of the local timezone, from `TZ` or the `/etc/localtime` link.
fn local_timezone() -> Option<String> {
    if let Ok(tz) = std::env::var("TZ") {
        let tz = tz.trim_start_matches(':');
        if !tz.is_empty() {
            return Some(tz.to_string());
        }
    }

    let target = std::fs::read_link(Path::new("/etc/localtime")).ok()?;
    let target = target.to_str()?;
    let (_, name) = target.split_once("zoneinfo/")?;
    debug!(timezone = name, "timezone from /etc/localtime");
    Some(name.to_string())
}
