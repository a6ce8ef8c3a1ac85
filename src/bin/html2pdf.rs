//! CLI binary for html2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to `PdfConfig`
//! and writes the resulting PDF bytes.

use anyhow::{Context, Result};
use clap::Parser;
use html2pdf::{convert, convert_to_file, PdfConfig, Source};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a local HTML file
  html2pdf page.html -o page.pdf

  # Convert a URL
  html2pdf https://example.com -o example.pdf

  # HTML on stdin, PDF on stdout
  cat page.html | html2pdf - > page.pdf

  # Custom geometry: A5 landscape with 10 mm margins at print DPI
  html2pdf --page-width 210 --page-height 148 --margin 10 --dpi 300 page.html -o out.pdf

  # Where is my renderer? (no conversion)
  html2pdf --locate-only

ENVIRONMENT VARIABLES:
  WKHTMLTOPDF_PATH   Path to an existing wkhtmltopdf executable — skips discovery

SETUP:
  wkhtmltopdf must be installed (https://wkhtmltopdf.org/downloads.html).
  It is looked up on the PATH and in the official packages' install
  directories; nothing is downloaded or bundled.
"#;

/// Convert HTML files and URLs to PDF using wkhtmltopdf.
#[derive(Parser, Debug)]
#[command(
    name = "html2pdf",
    version,
    about = "Convert HTML files and URLs to PDF using wkhtmltopdf",
    long_about = "Convert HTML documents (local files, URLs, or stdin) to PDF by shelling out \
to a wkhtmltopdf installation. The renderer does all layout and PDF generation; this tool \
formats the invocation and returns the bytes.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local HTML file path, HTTP/HTTPS URL, or '-' for HTML on stdin.
    #[arg(required_unless_present = "locate_only")]
    input: Option<String>,

    /// Write the PDF to this file instead of stdout.
    #[arg(short, long, env = "HTML2PDF_OUTPUT")]
    output: Option<PathBuf>,

    /// Page width in millimetres.
    #[arg(long, env = "HTML2PDF_PAGE_WIDTH", default_value_t = 210)]
    page_width: u32,

    /// Page height in millimetres.
    #[arg(long, env = "HTML2PDF_PAGE_HEIGHT", default_value_t = 297)]
    page_height: u32,

    /// Image quality (1-100).
    #[arg(long, env = "HTML2PDF_QUALITY", default_value_t = 100,
          value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: u32,

    /// Rendering DPI (72-1200).
    #[arg(long, env = "HTML2PDF_DPI", default_value_t = 100,
          value_parser = clap::value_parser!(u32).range(72..=1200))]
    dpi: u32,

    /// All four margins in millimetres (overridden by the per-side flags).
    #[arg(long, env = "HTML2PDF_MARGIN", default_value_t = 0)]
    margin: u32,

    /// Top margin in millimetres.
    #[arg(long)]
    margin_top: Option<u32>,

    /// Right margin in millimetres.
    #[arg(long)]
    margin_right: Option<u32>,

    /// Bottom margin in millimetres.
    #[arg(long)]
    margin_bottom: Option<u32>,

    /// Left margin in millimetres.
    #[arg(long)]
    margin_left: Option<u32>,

    /// Default text encoding for the input document.
    #[arg(long, env = "HTML2PDF_ENCODING", default_value = "UTF-8")]
    encoding: String,

    /// Renderer timeout in seconds.
    #[arg(long, env = "HTML2PDF_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// Print the resolved wkhtmltopdf path and version, no conversion.
    #[arg(long)]
    locate_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "HTML2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "HTML2PDF_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Locate-only mode ─────────────────────────────────────────────────
    if cli.locate_only {
        let path = html2pdf::ensure_wkhtmltopdf().context("Failed to locate wkhtmltopdf")?;
        println!("Path:     {}", path.display());
        match html2pdf::tool_version(&path) {
            Ok(v) => println!("Version:  {v}"),
            Err(e) => eprintln!("Version probe failed: {e}"),
        }
        return Ok(());
    }

    // ── Build source + config ────────────────────────────────────────────
    let input = cli
        .input
        .as_deref()
        .context("No input given (file path, URL, or '-')")?;
    let source = if input == "-" {
        let mut html = String::new();
        io::stdin()
            .read_to_string(&mut html)
            .context("Failed to read HTML from stdin")?;
        Source::Html(html)
    } else {
        Source::from_input(input)
    };

    let config = build_config(&cli)?;

    // ── Run conversion ───────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        convert_to_file(&source, output_path, &config)
            .await
            .context("Conversion failed")?;
        if !cli.quiet {
            eprintln!("Wrote {}", output_path.display());
        }
    } else {
        let bytes = convert(&source, &config)
            .await
            .context("Conversion failed")?;
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(&bytes)
            .context("Failed to write PDF to stdout")?;
        if !cli.quiet {
            eprintln!("Wrote {} bytes to stdout", bytes.len());
        }
    }

    Ok(())
}

/// Map CLI args to `PdfConfig`.
fn build_config(cli: &Cli) -> Result<PdfConfig> {
    PdfConfig::builder()
        .page_size_mm(cli.page_width, cli.page_height)
        .image_quality(cli.quality)
        .dpi(cli.dpi)
        .margin_top_mm(cli.margin_top.unwrap_or(cli.margin))
        .margin_right_mm(cli.margin_right.unwrap_or(cli.margin))
        .margin_bottom_mm(cli.margin_bottom.unwrap_or(cli.margin))
        .margin_left_mm(cli.margin_left.unwrap_or(cli.margin))
        .encoding(cli.encoding.clone())
        .render_timeout_secs(cli.timeout)
        .build()
        .context("Invalid configuration")
}
