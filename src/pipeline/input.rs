//! Source resolution: normalise HTML content, a path, or a URL into the
//! argument the renderer receives.
//!
//! ## Why write inline HTML to a temp file?
//!
//! wkhtmltopdf only accepts a file path or a URL on its command line — it
//! cannot read the document from a pipe reliably across versions. Writing
//! the string into a per-call [`TempDir`] gives the renderer a path to open
//! while ensuring cleanup happens automatically when [`ResolvedSource`] is
//! dropped, even if the conversion panics. The `TempDir` also guarantees a
//! unique path per call, which is what keeps concurrent conversions from
//! trampling each other.

use crate::error::Html2PdfError;
use std::ffi::OsString;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing::debug;

/// What to convert.
#[derive(Debug, Clone)]
pub enum Source {
    /// Raw HTML, rendered via a temporary file.
    Html(String),
    /// A local HTML file.
    File(PathBuf),
    /// An `http://` or `https://` URL, fetched by the renderer itself.
    Url(String),
}

impl Source {
    /// Classify a CLI-style input string: URL if it has an http(s) scheme,
    /// local file path otherwise.
    pub fn from_input(input: &str) -> Self {
        if is_url(input) {
            Source::Url(input.to_string())
        } else {
            Source::File(PathBuf::from(input))
        }
    }
}

/// The resolved source — either a renderer-ready string or a temp file
/// holding inline HTML.
pub enum ResolvedSource {
    /// Source was a local file that exists and is readable.
    Local(PathBuf),
    /// Source was a URL; passed through verbatim.
    Remote(String),
    /// Inline HTML written to a temp directory.
    /// The `TempDir` is kept alive to prevent cleanup until the renderer exits.
    Inline { path: PathBuf, _temp_dir: TempDir },
}

impl ResolvedSource {
    /// The `<source>` argument handed to the renderer.
    pub fn as_argument(&self) -> OsString {
        match self {
            ResolvedSource::Local(p) => p.as_os_str().to_os_string(),
            ResolvedSource::Remote(url) => OsString::from(url),
            ResolvedSource::Inline { path, .. } => path.as_os_str().to_os_string(),
        }
    }
}

/// Check if the input string looks like a URL the renderer can fetch.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve a [`Source`] into something the renderer can open.
///
/// Inline HTML is written to a fresh temp directory; local files are
/// validated for existence and readability; URLs are checked for an http(s)
/// scheme and otherwise passed through untouched.
pub fn resolve_source(source: &Source) -> Result<ResolvedSource, Html2PdfError> {
    match source {
        Source::Html(html) => persist_html(html),
        Source::File(path) => resolve_local(path.clone()),
        Source::Url(url) => {
            if !is_url(url) {
                return Err(Html2PdfError::InvalidInput { input: url.clone() });
            }
            Ok(ResolvedSource::Remote(url.clone()))
        }
    }
}

/// Write inline HTML to `<tempdir>/source.html`.
fn persist_html(html: &str) -> Result<ResolvedSource, Html2PdfError> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("source.html");
    std::fs::write(&path, html)?;

    debug!(path = %path.display(), bytes = html.len(), "Inline HTML persisted to temp file");
    Ok(ResolvedSource::Inline {
        path,
        _temp_dir: temp_dir,
    })
}

/// Resolve a local file path, validating existence and readability.
fn resolve_local(path: PathBuf) -> Result<ResolvedSource, Html2PdfError> {
    if !path.exists() {
        return Err(Html2PdfError::FileNotFound { path });
    }

    // Check read permission by attempting to open.
    match std::fs::File::open(&path) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Html2PdfError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(Html2PdfError::FileNotFound { path });
        }
    }

    debug!(path = %path.display(), "Resolved local HTML file");
    Ok(ResolvedSource::Local(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/page.html"));
        assert!(is_url("http://example.com"));
        assert!(!is_url("/tmp/page.html"));
        assert!(!is_url("page.html"));
        assert!(!is_url("ftp://example.com"));
        assert!(!is_url(""));
    }

    #[test]
    fn from_input_classifies() {
        assert!(matches!(
            Source::from_input("https://example.com"),
            Source::Url(_)
        ));
        assert!(matches!(
            Source::from_input("./page.html"),
            Source::File(_)
        ));
    }

    #[test]
    fn inline_html_lands_in_temp_file() {
        let resolved = resolve_source(&Source::Html("<p>hi</p>".into())).unwrap();
        let arg = resolved.as_argument();
        let path = PathBuf::from(&arg);
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>hi</p>");
        drop(resolved);
        assert!(!path.exists(), "temp file must be deleted on drop");
    }

    #[test]
    fn two_inline_sources_get_distinct_paths() {
        let a = resolve_source(&Source::Html("<p>a</p>".into())).unwrap();
        let b = resolve_source(&Source::Html("<p>b</p>".into())).unwrap();
        assert_ne!(a.as_argument(), b.as_argument());
    }

    #[test]
    fn missing_local_file_is_an_error() {
        let err = resolve_source(&Source::File(PathBuf::from("/no/such/file.html")));
        assert!(matches!(err, Err(Html2PdfError::FileNotFound { .. })));
    }

    #[test]
    fn bad_scheme_rejected() {
        let err = resolve_source(&Source::Url("ftp://example.com".into()));
        assert!(matches!(err, Err(Html2PdfError::InvalidInput { .. })));
    }

    #[test]
    fn url_passes_through_verbatim() {
        let resolved = resolve_source(&Source::Url("https://example.com/a.html".into())).unwrap();
        assert_eq!(
            resolved.as_argument(),
            OsString::from("https://example.com/a.html")
        );
    }
}
