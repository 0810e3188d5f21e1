//! Optional `swagger-ts.toml` settings.
//!
//! ```toml
//! [output]
//! container = "definitions"
//! banner = "// generated\n"
//!
//! [formatter]
//! command = "npx prettier"
//! ```
//!
//! Command line flags take precedence over values read here.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default config filename looked up next to the working directory.
pub const CONFIG_FILENAME: &str = "swagger-ts.toml";

/// `[output]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Name of the exported interface.
    pub container: Option<String>,
    /// Text placed before the interface.
    pub banner: Option<String>,
}

/// `[formatter]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatterConfig {
    /// Command line the source is piped through, e.g. `npx prettier`.
    pub command: Option<String>,
}

/// Config file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `[output]`
    pub output: OutputConfig,
    /// `[formatter]`
    pub formatter: FormatterConfig,
}

impl Config {
    /// Load `path`. A missing file is an error; use [`Config::discover`] for optional lookup.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read config file {}: {err}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|err| format!("Failed to parse config file {}: {err}", path.display()))
    }

    /// Load `swagger-ts.toml` from `dir` if present, otherwise defaults.
    pub fn discover(dir: &Path) -> Result<Self, String> {
        let path = dir.join(CONFIG_FILENAME);
        if path.exists() {
            tracing::debug!("using config {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}
