//! Conversion entry points.
//!
//! One conversion is one external process: provision the renderer (cached
//! after the first call), resolve the source, run wkhtmltopdf, return the
//! output file's bytes. The temp files backing an inline-HTML source and the
//! output PDF live exactly as long as one call; their `TempDir` guards drop
//! on every return path.

use crate::config::PdfConfig;
use crate::error::Html2PdfError;
use crate::pipeline::{exec, input};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

pub use crate::pipeline::input::Source;

/// Convert an HTML source to PDF bytes.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `source` — Inline HTML, a local file path, or an HTTP/HTTPS URL
/// * `config` — Conversion configuration
///
/// # Errors
/// - [`Html2PdfError::Renderer`] — wkhtmltopdf missing / unsupported platform
/// - [`Html2PdfError::FileNotFound`] / [`Html2PdfError::PermissionDenied`] /
///   [`Html2PdfError::InvalidInput`] — unusable source
/// - [`Html2PdfError::ProcessFailed`] — the renderer exited without writing
///   the output file (stderr attached)
/// - [`Html2PdfError::Timeout`] — the renderer overran
///   [`PdfConfig::render_timeout_secs`]
pub async fn convert(source: &Source, config: &PdfConfig) -> Result<Vec<u8>, Html2PdfError> {
    let start = Instant::now();

    // ── Step 1: Provision the renderer (once per process) ────────────────
    let tool = wkhtml_locate::ensure_wkhtmltopdf()?;
    debug!(tool = %tool.display(), "Renderer provisioned");

    // ── Step 2: Resolve the source ───────────────────────────────────────
    let resolved = input::resolve_source(source)?;
    let source_arg = resolved.as_argument();

    // ── Step 3: Execute and collect bytes ────────────────────────────────
    let bytes = exec::run_renderer(&tool, &source_arg, config).await?;

    info!(
        bytes = bytes.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Conversion complete"
    );

    // `resolved` drops here, deleting the inline-HTML temp file if any.
    Ok(bytes)
}

/// Convert a raw HTML string to PDF bytes.
///
/// The HTML is written to a uniquely named temporary file for the duration
/// of the renderer invocation and deleted afterwards.
pub async fn from_html(
    html: impl Into<String>,
    config: &PdfConfig,
) -> Result<Vec<u8>, Html2PdfError> {
    convert(&Source::Html(html.into()), config).await
}

/// Convert the page at an HTTP/HTTPS URL to PDF bytes.
///
/// The URL is fetched by wkhtmltopdf itself; no HTTP client is involved on
/// our side.
pub async fn from_url(
    url: impl Into<String>,
    config: &PdfConfig,
) -> Result<Vec<u8>, Html2PdfError> {
    convert(&Source::Url(url.into()), config).await
}

/// Convert an HTML source and write the PDF directly to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn convert_to_file(
    source: &Source,
    output_path: impl AsRef<Path>,
    config: &PdfConfig,
) -> Result<(), Html2PdfError> {
    let bytes = convert(source, config).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Html2PdfError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let tmp_path = staging_path(path);
    tokio::fs::write(&tmp_path, &bytes)
        .await
        .map_err(|e| Html2PdfError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Html2PdfError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

/// Unique staging path for the atomic write, next to the destination so the
/// final rename never crosses a filesystem boundary.
///
/// The full destination filename is kept as a prefix (extension included) and
/// a pid + per-process counter suffix is appended, so concurrent writes —
/// even to sibling destinations differing only in extension — never share a
/// staging file.
fn staging_path(path: &Path) -> std::path::PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.pdf".to_string());
    path.with_file_name(format!(
        "{name}.{}.{}.tmp",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ))
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally. Do not call from inside an
/// async context.
pub fn convert_sync(source: &Source, config: &PdfConfig) -> Result<Vec<u8>, Html2PdfError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Html2PdfError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(source, config))
}
