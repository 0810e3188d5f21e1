//! swagger-ts - Swagger 2.0 definitions to TypeScript
//!
//! Reads a JSON or YAML document and prints (or writes) one exported
//! TypeScript interface holding every named definition.

use std::path::PathBuf;

use clap::Parser;
use swagger_ts_cli::RunOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "swagger-ts",
    version,
    about = "Generate TypeScript types from Swagger 2.0 definitions"
)]
struct Args {
    /// Swagger document (.json, .yaml or .yml)
    input: PathBuf,

    /// Output file. Prints to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to ./swagger-ts.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Formatter command the output is piped through, e.g. "npx prettier"
    #[arg(long)]
    formatter: Option<String>,

    /// Name of the exported interface
    #[arg(long)]
    container: Option<String>,
}

impl From<Args> for RunOptions {
    fn from(args: Args) -> Self {
        RunOptions {
            input: args.input,
            output: args.output,
            config: args.config,
            formatter: args.formatter,
            container: args.container,
        }
    }
}

fn main() {
    // Logs go to stderr so stdout stays clean for the generated source.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swagger_ts=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Err(e) = swagger_ts_cli::run(&RunOptions::from(args)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
