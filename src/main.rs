//! `docsift` CLI - Extract text from documents and scans

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use docsift::{classify, ExtractConfig, Extractor};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(about = "Extract text from plain text, DOCX, PDF and image documents")]
#[command(version)]
struct Cli {
    /// Enable debug logging (`RUST_LOG` takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a file (or `-` for stdin)
    Extract {
        /// Document path, or `-` to read stdin
        path: String,

        /// MIME type (guessed from the file extension when omitted)
        #[arg(short, long)]
        mime: Option<String>,

        /// Config file (default: ~/.config/docsift/config.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which extractor a MIME type routes to
    Classify {
        /// MIME type to classify
        mime: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Commands::Extract {
            path,
            mime,
            config,
            json,
        } => {
            cmd_extract(&path, mime, config.as_deref(), json).await?;
        }
        Commands::Classify { mime } => {
            println!("{}", classify(&mime));
        }
    }

    Ok(())
}

async fn cmd_extract(
    path: &str,
    mime: Option<String>,
    config: Option<&Path>,
    json: bool,
) -> Result<()> {
    let mime = match mime {
        Some(mime) => mime,
        None if path == "-" => bail!("--mime is required when reading from stdin"),
        None => guess_mime(Path::new(path))
            .with_context(|| format!("cannot guess MIME type of {path}; pass --mime"))?
            .to_string(),
    };
    let bytes = read_input(path)?;

    let config = match config {
        Some(path) => ExtractConfig::load_from(path)?,
        None => ExtractConfig::load()?,
    };
    debug!(?config, "loaded config");

    let extractor = Arc::new(Extractor::from_config(config)?);
    let result = extractor.extract_async(bytes, mime).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.text);
    }
    Ok(())
}

fn read_input(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("failed to read stdin")?;
        Ok(bytes)
    } else {
        std::fs::read(path).with_context(|| format!("failed to read {path}"))
    }
}

fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "txt" | "text" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    };
    Some(mime)
}
