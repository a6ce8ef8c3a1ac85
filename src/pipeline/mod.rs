//! Pipeline stages for HTML-to-PDF conversion.
//!
//! Each submodule implements exactly one step of "shell out to an external
//! renderer and return bytes". Keeping stages separate makes each
//! independently testable — argument formatting in particular is pure and
//! never needs a real wkhtmltopdf to verify.
//!
//! ## Data Flow
//!
//! ```text
//! input ──────▶ args ──────▶ exec
//! (HTML/path/URL) (argv vector)  (process + output bytes)
//! ```
//!
//! 1. [`input`] — resolve the user-supplied source to something the renderer
//!    can open: inline HTML goes to a temp file, local paths are validated,
//!    URLs pass through verbatim
//! 2. [`args`]  — build the exact renderer argv from [`crate::config::PdfConfig`]
//! 3. [`exec`]  — spawn wkhtmltopdf, capture stderr, enforce the timeout,
//!    and read the output file's bytes; the only stage with side effects

pub mod args;
pub mod exec;
pub mod input;
