//! Command-line interface.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::style;

use crate::cache::ResultCache;
use crate::config::ExtractionConfig;
use crate::extract::DocumentFormat;
use crate::ocr::{OcrEngine, TesseractEngine};
use crate::pipeline::ExtractionPipeline;

#[derive(Parser)]
#[command(name = "cvintake")]
#[command(about = "Résumé text extraction and structured field drafting")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a structured profile draft from a résumé file
    Extract {
        /// Document to process
        file: PathBuf,
        /// Requester identifier used for cache scoping
        #[arg(short, long, default_value = "cli")]
        requester: String,
        /// Force a format instead of sniffing (text, docx, image)
        #[arg(short, long)]
        format: Option<String>,
        /// Additional page renderings used for OCR rescue of scanned
        /// documents (image files, in page order)
        #[arg(short, long)]
        pages: Vec<PathBuf>,
        /// Print cache statistics after extraction
        #[arg(long)]
        stats: bool,
    },

    /// Check whether the OCR engine is installed
    Check,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ExtractionConfig::load(path)?,
        None => ExtractionConfig::default(),
    };

    match cli.command {
        Commands::Extract {
            file,
            requester,
            format,
            pages,
            stats,
        } => extract_command(config, &file, &requester, format.as_deref(), &pages, stats).await,
        Commands::Check => check_command(&config),
    }
}

async fn extract_command(
    config: ExtractionConfig,
    file: &PathBuf,
    requester: &str,
    format: Option<&str>,
    pages: &[PathBuf],
    stats: bool,
) -> anyhow::Result<()> {
    let content = std::fs::read(file)?;
    let format = resolve_format(format, file, &content)?;

    let mut renderings = Vec::with_capacity(pages.len());
    for page in pages {
        renderings.push(std::fs::read(page)?);
    }

    let cache = Arc::new(ResultCache::with_ttl(std::time::Duration::from_millis(
        config.cache_ttl_ms,
    )));
    let pipeline = ExtractionPipeline::new(config, cache);

    let outcome = pipeline
        .process_document(&content, format, requester, &renderings)
        .await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    eprintln!(
        "{} extracted via {} in {} ms",
        style("✓").green(),
        outcome.method.as_str(),
        outcome.processing_time_ms
    );
    if stats {
        let cache_stats = pipeline.cache_stats();
        eprintln!(
            "  cache: {} entries, oldest {} ms",
            cache_stats.size, cache_stats.oldest_entry_age_ms
        );
    }

    Ok(())
}

/// Resolve the format discriminant: an explicit flag wins, then content
/// sniffing, then the file extension.
fn resolve_format(
    flag: Option<&str>,
    file: &PathBuf,
    content: &[u8],
) -> anyhow::Result<DocumentFormat> {
    if let Some(name) = flag {
        return Ok(name.parse::<DocumentFormat>()?);
    }

    if let Some(kind) = infer::get(content) {
        if let Some(format) = DocumentFormat::from_mime(kind.mime_type()) {
            return Ok(format);
        }
        // infer reports DOCX as a plain zip when the package lacks the
        // leading content-types entry; fall through to the extension.
    }

    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match extension.as_str() {
        "docx" => Ok(DocumentFormat::Docx),
        "png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp" => Ok(DocumentFormat::Image),
        _ => Ok(DocumentFormat::PlainText),
    }
}

fn check_command(config: &ExtractionConfig) -> anyhow::Result<()> {
    let engine = TesseractEngine::new(&config.ocr_languages);
    if engine.is_available() {
        println!(
            "{} tesseract found (languages: {})",
            style("✓").green(),
            config.ocr_languages
        );
    } else {
        println!(
            "{} tesseract not found - install tesseract-ocr to enable the OCR path",
            style("✗").red()
        );
    }
    Ok(())
}
