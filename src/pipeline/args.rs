//! Renderer argv construction.
//!
//! ## Why an argv vector, not a command string?
//!
//! The original wkhtmltopdf wrappers concatenate one big argument string and
//! hand it to a shell, which means quoting bugs the moment a path contains a
//! space. Passing a `Vec<OsString>` straight to the process spawner skips
//! the shell entirely: no quoting, no injection surface, and paths with any
//! characters the OS allows just work.
//!
//! The flag order below is the renderer's documented contract and is pinned
//! by unit tests; `exec` passes the vector through unchanged.

use crate::config::PdfConfig;
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Build the full wkhtmltopdf argv for one conversion:
///
/// ```text
/// --encoding <enc> --page-height <h> --page-width <w> --image-quality <q>
/// --dpi <d> --disable-smart-shrinking --margin-bottom <b> --margin-left <l>
/// --margin-right <r> --margin-top <t> <source> <output-file>
/// ```
///
/// `--disable-smart-shrinking` is always passed: smart shrinking rescales
/// the page to fit content, which silently breaks the caller's requested
/// geometry.
pub fn build_args(config: &PdfConfig, source: &OsStr, output: &Path) -> Vec<OsString> {
    fn flag(args: &mut Vec<OsString>, name: &str, value: String) {
        args.push(OsString::from(name));
        args.push(OsString::from(value));
    }

    let mut args: Vec<OsString> = Vec::with_capacity(22);
    flag(&mut args, "--encoding", config.encoding.clone());
    flag(&mut args, "--page-height", config.page_height_mm.to_string());
    flag(&mut args, "--page-width", config.page_width_mm.to_string());
    flag(&mut args, "--image-quality", config.image_quality.to_string());
    flag(&mut args, "--dpi", config.dpi.to_string());
    args.push(OsString::from("--disable-smart-shrinking"));
    flag(&mut args, "--margin-bottom", config.margin_bottom_mm.to_string());
    flag(&mut args, "--margin-left", config.margin_left_mm.to_string());
    flag(&mut args, "--margin-right", config.margin_right_mm.to_string());
    flag(&mut args, "--margin-top", config.margin_top_mm.to_string());

    args.push(source.to_os_string());
    args.push(output.as_os_str().to_os_string());

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn stringify(args: &[OsString]) -> Vec<String> {
        args.iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn default_config_produces_contract_argv() {
        let config = PdfConfig::default();
        let source = OsString::from("/tmp/source.html");
        let output = PathBuf::from("/tmp/output.pdf");

        let args = stringify(&build_args(&config, &source, &output));

        assert_eq!(
            args,
            vec![
                "--encoding",
                "UTF-8",
                "--page-height",
                "297",
                "--page-width",
                "210",
                "--image-quality",
                "100",
                "--dpi",
                "100",
                "--disable-smart-shrinking",
                "--margin-bottom",
                "0",
                "--margin-left",
                "0",
                "--margin-right",
                "0",
                "--margin-top",
                "0",
                "/tmp/source.html",
                "/tmp/output.pdf",
            ]
        );
    }

    #[test]
    fn margins_land_in_the_right_slots() {
        let config = PdfConfig::builder()
            .margin_top_mm(1)
            .margin_right_mm(2)
            .margin_bottom_mm(3)
            .margin_left_mm(4)
            .build()
            .unwrap();

        let args = stringify(&build_args(
            &config,
            OsStr::new("in.html"),
            Path::new("out.pdf"),
        ));

        let value_after = |flag: &str| {
            let i = args.iter().position(|a| a == flag).unwrap();
            args[i + 1].clone()
        };
        assert_eq!(value_after("--margin-top"), "1");
        assert_eq!(value_after("--margin-right"), "2");
        assert_eq!(value_after("--margin-bottom"), "3");
        assert_eq!(value_after("--margin-left"), "4");
    }

    #[test]
    fn source_and_output_are_last_two_args() {
        let config = PdfConfig::default();
        let args = build_args(
            &config,
            OsStr::new("https://example.com"),
            Path::new("/tmp/dir with spaces/out.pdf"),
        );
        let n = args.len();
        assert_eq!(args[n - 2], OsString::from("https://example.com"));
        assert_eq!(
            args[n - 1],
            OsString::from("/tmp/dir with spaces/out.pdf"),
            "paths with spaces need no quoting in argv form"
        );
    }

    #[test]
    fn smart_shrinking_always_disabled() {
        let config = PdfConfig::default();
        let args = build_args(&config, OsStr::new("a"), Path::new("b"));
        assert!(args.contains(&OsString::from("--disable-smart-shrinking")));
    }
}
