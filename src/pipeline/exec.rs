//! Renderer process execution.
//!
//! ## Success is the output file, not the exit code
//!
//! wkhtmltopdf's exit behaviour is unreliable: it exits non-zero for
//! recoverable warnings (a missing subresource) and has been observed to
//! exit zero after writing nothing. The one signal that actually means
//! "conversion produced a PDF" is the output file existing after exit, so
//! that is what this module checks. Captured stderr becomes either the error
//! payload (no output file) or a WARN log line (output file present —
//! wkhtmltopdf routinely prints progress chatter to stderr).
//!
//! ## Why tokio::process?
//!
//! The child can hang indefinitely on a dead remote host because the
//! renderer fetches URL sources itself. `tokio::process::Command` lets the
//! wait sit under `tokio::time::timeout`, after which the child is killed
//! rather than leaked.

use crate::config::PdfConfig;
use crate::error::Html2PdfError;
use crate::pipeline::args::build_args;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Run one renderer invocation and return the PDF bytes.
///
/// Creates a per-call temp directory for the output file (unique path, so
/// concurrent conversions never collide), spawns the renderer with the argv
/// from [`build_args`], waits under the configured timeout, and reads the
/// output file's bytes. All temp files are removed when this function
/// returns, success or not.
pub async fn run_renderer(
    tool: &Path,
    source: &OsStr,
    config: &PdfConfig,
) -> Result<Vec<u8>, Html2PdfError> {
    let out_dir = TempDir::new()?;
    let output_path = out_dir.path().join("output.pdf");

    let args = build_args(config, source, &output_path);
    debug!(tool = %tool.display(), ?args, "Spawning renderer");

    let start = Instant::now();
    let mut child = Command::new(tool)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    // Drain stderr concurrently with the wait; a renderer that fills the
    // pipe buffer would otherwise deadlock against our timeout.
    let stderr_pipe = child
        .stderr
        .take()
        .ok_or_else(|| Html2PdfError::Internal("child stderr was not piped".into()))?;
    let stderr_task = tokio::spawn(async move {
        use tokio::io::AsyncReadExt;
        let mut buf = String::new();
        let mut reader = stderr_pipe;
        let _ = reader.read_to_string(&mut buf).await;
        buf
    });

    let deadline = Duration::from_secs(config.render_timeout_secs);
    let status = match tokio::time::timeout(deadline, child.wait()).await {
        Ok(wait_result) => wait_result?,
        Err(_) => {
            let _ = child.kill().await;
            stderr_task.abort();
            return Err(Html2PdfError::Timeout {
                secs: config.render_timeout_secs,
            });
        }
    };

    let stderr = stderr_task
        .await
        .map_err(|e| Html2PdfError::Internal(format!("stderr reader task panicked: {e}")))?;

    // The contract: the output file existing after exit is the success signal.
    if output_path.exists() {
        if !stderr.trim().is_empty() {
            warn!(stderr = %stderr.trim(), "Renderer wrote to stderr but produced output");
        }
        let bytes = tokio::fs::read(&output_path).await?;
        info!(
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Renderer produced PDF"
        );
        // `out_dir` drops here, deleting the output file after the read.
        return Ok(bytes);
    }

    Err(Html2PdfError::ProcessFailed {
        status,
        stderr: stderr.trim().to_string(),
    })
}
