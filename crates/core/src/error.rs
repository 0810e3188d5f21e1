//! Error types for type generation.

use std::process::ExitStatus;

use thiserror::Error;

/// Boxed error returned by user-supplied hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while turning a document into TypeScript.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The document has no top-level `definitions` object.
    #[error(
        "definitions object missing from schema (https://swagger.io/specification/v2/#definitions-object)"
    )]
    MissingDefinitions,

    /// The document is not valid JSON for the schema model.
    #[error("failed to parse JSON document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The document is not valid YAML for the schema model.
    #[error("failed to parse YAML document: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// The property mapper failed. The mapper's error is passed through untouched.
    #[error("{0}")]
    Mapper(BoxError),

    /// A definition was still structural after every pass.
    #[error("definition '{name}' could not be resolved to a type")]
    Unresolved {
        /// Definition key as written in the document.
        name: String,
    },

    /// The formatter failed.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Errors raised by a [`Formatter`](crate::format::Formatter).
#[derive(Debug, Error)]
pub enum FormatError {
    /// The formatter program could not be started.
    #[error("failed to start formatter `{program}`: {source}")]
    Spawn {
        /// Program that was looked up.
        program: String,
        /// Error from the operating system.
        source: std::io::Error,
    },

    /// Writing the source to, or reading the result from, the formatter failed.
    #[error("failed to exchange source with formatter: {0}")]
    Io(#[from] std::io::Error),

    /// The formatter ran but reported failure.
    #[error("formatter exited with {status}: {stderr}")]
    Failed {
        /// Exit status of the formatter process.
        status: ExitStatus,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// The formatter wrote something that is not UTF-8.
    #[error("formatter produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Formatter-specific failure.
    #[error("{0}")]
    Other(String),
}
