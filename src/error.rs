//! Error types for the html2pdf library.
//!
//! Every conversion either returns the PDF bytes or exactly one
//! [`Html2PdfError`]. The taxonomy mirrors the observable failure points of
//! the pipeline: the renderer is missing, the source is unusable, the process
//! failed, or our own temp-file plumbing broke. There is no partial success —
//! wkhtmltopdf produces one output file or none.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// All errors returned by the html2pdf library.
#[derive(Debug, Error)]
pub enum Html2PdfError {
    // ── Provisioning errors ───────────────────────────────────────────────
    /// The external renderer could not be located, or the platform is not
    /// supported. Carries the discovery error with its install hint.
    #[error(transparent)]
    Renderer(#[from] wkhtml_locate::WkhtmlLocateError),

    // ── Source errors ─────────────────────────────────────────────────────
    /// Source HTML file was not found at the given path.
    #[error("HTML file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the source file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or HTTP/HTTPS URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    // ── Renderer errors ───────────────────────────────────────────────────
    /// The renderer exited without producing the output file.
    ///
    /// Success is defined by the existence of the output file after exit, so
    /// this single variant covers both a non-zero exit and a zero exit that
    /// still wrote nothing. `stderr` holds whatever diagnostics the tool
    /// printed.
    #[error(
        "wkhtmltopdf failed ({status}) and produced no output.\n\
stderr:\n{stderr}\n\
Check the input parameters and that the source HTML/URL is reachable."
    )]
    ProcessFailed { status: ExitStatus, stderr: String },

    /// The renderer did not finish within the configured timeout.
    #[error("wkhtmltopdf did not finish within {secs}s; the process was killed.\nIncrease the render timeout for large or slow-loading pages.")]
    Timeout { secs: u64 },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the destination file in `convert_to_file`.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp-file or process plumbing failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn process_failed_display_carries_stderr() {
        let status = failed_status();
        let e = Html2PdfError::ProcessFailed {
            status,
            stderr: "Exit with code 1 due to network error".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("network error"), "got: {msg}");
        assert!(msg.contains("no output"));
    }

    #[test]
    fn timeout_display() {
        let e = Html2PdfError::Timeout { secs: 120 };
        assert!(e.to_string().contains("120s"));
    }

    #[test]
    fn invalid_input_display() {
        let e = Html2PdfError::InvalidInput {
            input: "ftp://example.com".into(),
        };
        assert!(e.to_string().contains("ftp://example.com"));
    }

    #[test]
    fn renderer_error_converts() {
        let inner = wkhtml_locate::WkhtmlLocateError::UnsupportedPlatform {
            os: "freebsd".into(),
        };
        let e: Html2PdfError = inner.into();
        assert!(e.to_string().contains("freebsd"));
    }

    /// Build a real failed `ExitStatus` by running `false`.
    #[cfg(unix)]
    fn failed_status() -> ExitStatus {
        std::process::Command::new("false")
            .status()
            .expect("spawn false")
    }
}
