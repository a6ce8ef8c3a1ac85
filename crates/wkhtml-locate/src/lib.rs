//! # wkhtml-locate
//!
//! Locate a [wkhtmltopdf](https://wkhtmltopdf.org/) installation at runtime,
//! so that users of `html2pdf` do not need to configure the renderer path by
//! hand on every machine.
//!
//! ## How it works
//!
//! On first call to [`ensure_wkhtmltopdf`]:
//!
//! 1. Honours `WKHTMLTOPDF_PATH` if it points to an existing file.
//! 2. Searches `PATH` for the platform executable (`wkhtmltopdf` /
//!    `wkhtmltopdf.exe`).
//! 3. Falls back to the well-known install directories of the official
//!    wkhtmltopdf packages for the current OS.
//!
//! The resolved path is cached in a process-wide [`OnceLock`]; subsequent
//! calls skip the filesystem entirely.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wkhtml_locate::{ensure_wkhtmltopdf, tool_version};
//!
//! let path = ensure_wkhtmltopdf().expect("wkhtmltopdf unavailable");
//! println!("renderer: {} ({})", path.display(), tool_version(&path).unwrap());
//! ```
//!
//! ## Platform support
//!
//! | OS      | Executable         | Fallback directories                          |
//! |---------|--------------------|-----------------------------------------------|
//! | Linux   | `wkhtmltopdf`      | `/usr/local/bin`, `/usr/bin`                  |
//! | macOS   | `wkhtmltopdf`      | `/usr/local/bin`, `/opt/homebrew/bin`         |
//! | Windows | `wkhtmltopdf.exe`  | `C:\Program Files\wkhtmltopdf\bin` (+ x86)    |
//!
//! ## Environment variable overrides
//!
//! - `WKHTMLTOPDF_PATH` — path to an existing wkhtmltopdf executable; skips
//!   all discovery.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, warn};

/// Base executable name of the external renderer.
pub const TOOL_NAME: &str = "wkhtmltopdf";

/// Download page shown in "not found" errors.
const DOWNLOAD_URL: &str = "https://wkhtmltopdf.org/downloads.html";

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned by wkhtml-locate operations.
#[derive(Error, Debug)]
pub enum WkhtmlLocateError {
    /// The current operating system has no known wkhtmltopdf distribution.
    #[error("Unsupported platform: {os}\nwkhtmltopdf ships packages for Linux, macOS and Windows only.")]
    UnsupportedPlatform { os: String },

    /// No executable was found by any discovery step.
    #[error(
        "wkhtmltopdf was not found on this system.\n\n\
The renderer is looked up in this order:\n\
  1. WKHTMLTOPDF_PATH environment variable\n\
  2. The PATH ({tool} executable)\n\
  3. Well-known install directories ({dirs})\n\n\
Install it from {url} or set WKHTMLTOPDF_PATH to an existing copy."
    )]
    NotFound {
        tool: &'static str,
        dirs: String,
        url: &'static str,
    },

    /// The executable exists but running `--version` failed.
    #[error("Failed to run '{path} --version': {reason}")]
    VersionProbe { path: PathBuf, reason: String },
}

// ── Internal: platform metadata ──────────────────────────────────────────────

struct PlatformInfo {
    /// Executable filename, e.g. `wkhtmltopdf.exe` on Windows.
    exe_name: &'static str,
    /// Install directories of the official packages, probed after PATH.
    fallback_dirs: &'static [&'static str],
}

fn detect_platform() -> Result<PlatformInfo, WkhtmlLocateError> {
    match std::env::consts::OS {
        "linux" => Ok(PlatformInfo {
            exe_name: "wkhtmltopdf",
            fallback_dirs: &["/usr/local/bin", "/usr/bin"],
        }),
        "macos" => Ok(PlatformInfo {
            exe_name: "wkhtmltopdf",
            fallback_dirs: &["/usr/local/bin", "/opt/homebrew/bin"],
        }),
        "windows" => Ok(PlatformInfo {
            exe_name: "wkhtmltopdf.exe",
            fallback_dirs: &[
                r"C:\Program Files\wkhtmltopdf\bin",
                r"C:\Program Files (x86)\wkhtmltopdf\bin",
            ],
        }),
        os => Err(WkhtmlLocateError::UnsupportedPlatform { os: os.to_string() }),
    }
}

// ── Thread-safe singleton path cache ─────────────────────────────────────────

static RESOLVED_PATH: OnceLock<PathBuf> = OnceLock::new();

// ── Public API ───────────────────────────────────────────────────────────────

/// Returns `true` if a wkhtmltopdf executable can be located without error.
///
/// Also returns `true` when `WKHTMLTOPDF_PATH` points to an existing file.
pub fn is_available() -> bool {
    cached_path().is_some() || locate_wkhtmltopdf().is_ok()
}

/// Returns the already-resolved path for this process, or `None` if no call
/// to [`ensure_wkhtmltopdf`] has succeeded yet.
pub fn cached_path() -> Option<PathBuf> {
    RESOLVED_PATH.get().cloned()
}

/// Ensures a wkhtmltopdf executable is available and returns its path.
///
/// Discovery runs at most once per process lifetime; the result is cached
/// and later calls return it immediately.
///
/// # Thread safety
///
/// Safe to call from multiple threads simultaneously; concurrent first calls
/// race benignly on the cache and all observe the same path.
pub fn ensure_wkhtmltopdf() -> Result<PathBuf, WkhtmlLocateError> {
    // Fast path: already resolved in this process.
    if let Some(path) = RESOLVED_PATH.get() {
        return Ok(path.clone());
    }

    let path = locate_wkhtmltopdf()?;

    // Best-effort cache in the OnceLock (ignore race; both will succeed).
    let _ = RESOLVED_PATH.set(path.clone());

    Ok(path)
}

/// Locates the wkhtmltopdf executable without touching the process cache.
///
/// Resolution order:
///
/// 1. `WKHTMLTOPDF_PATH` (if set and the file exists; a set-but-missing path
///    falls through to discovery with a warning).
/// 2. `PATH` lookup via [`which`].
/// 3. Well-known install directories for the current platform.
pub fn locate_wkhtmltopdf() -> Result<PathBuf, WkhtmlLocateError> {
    // 1. Environment variable override.
    if let Ok(env_path) = std::env::var("WKHTMLTOPDF_PATH") {
        let p = PathBuf::from(env_path);
        if p.exists() {
            debug!(path = %p.display(), "wkhtmltopdf resolved from WKHTMLTOPDF_PATH");
            return Ok(p);
        }
        warn!(
            path = %p.display(),
            "WKHTMLTOPDF_PATH does not exist; falling back to discovery"
        );
    }

    let info = detect_platform()?;

    // 2. PATH lookup.
    if let Ok(path) = which::which(info.exe_name) {
        debug!(path = %path.display(), "wkhtmltopdf found on PATH");
        return Ok(path);
    }

    // 3. Well-known install directories.
    for dir in info.fallback_dirs {
        let candidate = Path::new(dir).join(info.exe_name);
        if candidate.exists() {
            debug!(path = %candidate.display(), "wkhtmltopdf found in install directory");
            return Ok(candidate);
        }
    }

    Err(WkhtmlLocateError::NotFound {
        tool: TOOL_NAME,
        dirs: info.fallback_dirs.join(", "),
        url: DOWNLOAD_URL,
    })
}

/// Runs `<path> --version` and returns the trimmed stdout.
///
/// This is the only operation in this crate that executes the renderer. It is
/// used by diagnostics (`html2pdf --locate-only`), never by conversion.
pub fn tool_version(path: &Path) -> Result<String, WkhtmlLocateError> {
    let output = Command::new(path)
        .arg("--version")
        .output()
        .map_err(|e| WkhtmlLocateError::VersionProbe {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(WkhtmlLocateError::VersionProbe {
            path: path.to_path_buf(),
            reason: format!("exit status {}", output.status),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serialises tests that mutate `WKHTMLTOPDF_PATH`.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn detect_platform_is_supported() {
        // Verify the current platform is recognised.
        detect_platform().expect("current platform should be supported");
    }

    #[test]
    fn platform_info_fields_nonempty() {
        let info = detect_platform().unwrap();
        assert!(!info.exe_name.is_empty());
        assert!(!info.fallback_dirs.is_empty());
        assert!(info.exe_name.starts_with(TOOL_NAME));
    }

    #[test]
    fn env_override_is_honoured() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("wkhtmltopdf");
        std::fs::write(&fake, b"#!/bin/sh\n").unwrap();

        std::env::set_var("WKHTMLTOPDF_PATH", &fake);
        let resolved = locate_wkhtmltopdf();
        std::env::remove_var("WKHTMLTOPDF_PATH");

        assert_eq!(resolved.unwrap(), fake);
    }

    /// Resolution happens at most once per process: a second call and
    /// `cached_path` both observe the path the first call resolved.
    #[test]
    fn ensure_resolves_once_and_caches() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("wkhtmltopdf");
        std::fs::write(&fake, b"#!/bin/sh\n").unwrap();

        std::env::set_var("WKHTMLTOPDF_PATH", &fake);
        let first = ensure_wkhtmltopdf();
        // The cache must hold even after the discovery input disappears.
        std::env::remove_var("WKHTMLTOPDF_PATH");
        let second = ensure_wkhtmltopdf();

        let first = first.unwrap();
        assert_eq!(first, fake);
        assert_eq!(second.unwrap(), first);
        assert_eq!(cached_path(), Some(first));
    }

    #[test]
    fn not_found_error_mentions_download_page() {
        let e = WkhtmlLocateError::NotFound {
            tool: TOOL_NAME,
            dirs: "/usr/local/bin".into(),
            url: DOWNLOAD_URL,
        };
        let msg = e.to_string();
        assert!(msg.contains("wkhtmltopdf.org"), "got: {msg}");
        assert!(msg.contains("WKHTMLTOPDF_PATH"));
    }
}
