//! # html2pdf
//!
//! Convert HTML strings and URLs to PDF bytes by shelling out to
//! [wkhtmltopdf](https://wkhtmltopdf.org/).
//!
//! ## Why this crate?
//!
//! Rendering HTML faithfully means running a real browser engine; none of
//! the pure-Rust HTML-to-PDF attempts come close to WebKit's CSS coverage.
//! Instead of embedding an engine, this crate treats wkhtmltopdf as a
//! black-box collaborator: it formats the renderer's command line, manages
//! the temporary files around one invocation, and hands back the resulting
//! PDF as bytes. All of the hard work (layout, rendering, PDF generation)
//! stays in the external tool.
//!
//! ## Pipeline Overview
//!
//! ```text
//! HTML / file / URL
//!  │
//!  ├─ 1. Provision  locate wkhtmltopdf (env var → PATH → install dirs, once per process)
//!  ├─ 2. Input      inline HTML → temp file; paths validated; URLs passed through
//!  ├─ 3. Invoke     build the argv (geometry, quality, dpi, margins, encoding)
//!  ├─ 4. Execute    spawn, capture stderr, enforce the timeout
//!  └─ 5. Result     read the output file's bytes, delete temp files
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use html2pdf::{from_html, PdfConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PdfConfig::builder().margins_mm(10).build()?;
//!     let pdf = from_html("<h1>Invoice #42</h1>", &config).await?;
//!     std::fs::write("invoice.pdf", &pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `html2pdf` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! html2pdf = { version = "0.3", default-features = false }
//! ```
//!
//! ## Renderer discovery
//!
//! wkhtmltopdf is resolved once per process: `WKHTMLTOPDF_PATH` if set, then
//! the `PATH`, then the official packages' install directories. A missing
//! renderer surfaces as an error pointing at the download page — there is no
//! bundled binary.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PdfConfig, PdfConfigBuilder};
pub use convert::{convert, convert_sync, convert_to_file, from_html, from_url, Source};
pub use error::Html2PdfError;
pub use wkhtml_locate::{ensure_wkhtmltopdf, is_available, tool_version, WkhtmlLocateError};
