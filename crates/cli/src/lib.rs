//! swagger-ts command line front end.
//!
//! Reads a Swagger 2.0 document (JSON or YAML), generates the TypeScript
//! definitions interface, and writes it to a file or stdout.

pub mod config;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use swagger_ts_core::{CommandFormatter, GenerateOptions, Generator};
use tracing::{debug, info};

pub use config::Config;

/// Input syntax, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl InputFormat {
    /// `.yaml`/`.yml` are YAML, anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                InputFormat::Yaml
            }
            _ => InputFormat::Json,
        }
    }
}

/// One invocation, after command line parsing.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Swagger document to read.
    pub input: PathBuf,
    /// Output file. Stdout when absent.
    pub output: Option<PathBuf>,
    /// Explicit config file. When absent, `swagger-ts.toml` in the working directory is used if present.
    pub config: Option<PathBuf>,
    /// Formatter command line, overriding `[formatter] command`.
    pub formatter: Option<String>,
    /// Interface name, overriding `[output] container`.
    pub container: Option<String>,
}

/// Settings after merging the config file with command line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Options handed to the generator.
    pub options: GenerateOptions,
    /// Formatter command line, if any.
    pub formatter: Option<String>,
}

impl Settings {
    /// Flags win over file values; file values win over defaults.
    pub fn resolve(config: Config, opts: &RunOptions) -> Self {
        let mut options = GenerateOptions::default();
        if let Some(container) = opts.container.clone().or(config.output.container) {
            options.container_name = container;
        }
        if let Some(banner) = config.output.banner {
            options.banner = banner;
        }
        Settings {
            options,
            formatter: opts.formatter.clone().or(config.formatter.command),
        }
    }

    /// Build the generator, with a [`CommandFormatter`] when one is configured.
    pub fn generator(&self) -> Result<Generator, String> {
        let generator = Generator::new(self.options.clone());
        match self.formatter.as_deref() {
            None => Ok(generator),
            Some(command) => {
                let formatter = CommandFormatter::from_command_line(command)
                    .ok_or_else(|| "Formatter command is empty".to_string())?;
                Ok(generator.with_formatter(formatter))
            }
        }
    }
}

/// Generate TypeScript for `path`.
pub fn generate_file(path: &Path, generator: &Generator) -> Result<String, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
    let result = match InputFormat::from_path(path) {
        InputFormat::Json => generator.generate_json(&contents),
        InputFormat::Yaml => generator.generate_yaml(&contents),
    };
    result.map_err(|err| format!("Failed to generate types from {}: {err}", path.display()))
}

/// Write `source` to `path`, creating parent directories.
pub fn write_output(path: &Path, source: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|err| format!("Failed to create output directory: {err}"))?;
    }
    fs::write(path, source).map_err(|err| format!("Failed to write {}: {err}", path.display()))
}

/// Load config, generate, and write the result to the output file or stdout.
pub fn run(opts: &RunOptions) -> Result<(), String> {
    let config = match &opts.config {
        Some(path) => Config::load(path)?,
        None => {
            let cwd = std::env::current_dir()
                .map_err(|err| format!("Failed to determine working directory: {err}"))?;
            Config::discover(&cwd)?
        }
    };
    let settings = Settings::resolve(config, opts);
    let generator = settings.generator()?;
    debug!(
        "generating interface '{}' from {}",
        generator.options().container_name,
        opts.input.display()
    );

    let source = generate_file(&opts.input, &generator)?;

    match &opts.output {
        Some(path) => {
            write_output(path, &source)?;
            info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(source.as_bytes())
                .map_err(|err| format!("Failed to write to stdout: {err}"))?;
        }
    }
    Ok(())
}
