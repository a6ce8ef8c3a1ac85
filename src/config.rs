//! Configuration types for HTML-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`PdfConfig`], built via
//! its [`PdfConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across calls, serialise them for logging, and
//! diff two runs to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The original ten-parameter signature (width, height, quality, dpi, four
//! margins, encoding) is unreadable at the call site. The builder lets
//! callers set only what they care about and rely on documented defaults.

use crate::error::Html2PdfError;
use serde::{Deserialize, Serialize};

/// Configuration for one HTML-to-PDF conversion.
///
/// Built via [`PdfConfig::builder()`] or using [`PdfConfig::default()`].
///
/// # Example
/// ```rust
/// use html2pdf::PdfConfig;
///
/// let config = PdfConfig::builder()
///     .page_size_mm(210, 297)
///     .dpi(300)
///     .margins_mm(10)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Page width in millimetres. Default: 210 (A4).
    pub page_width_mm: u32,

    /// Page height in millimetres. Default: 297 (A4).
    pub page_height_mm: u32,

    /// Image quality passed to the renderer, 1–100. Default: 100.
    ///
    /// Only affects raster images embedded in the page; text and vector
    /// content are unaffected. Lowering it shrinks the PDF for image-heavy
    /// pages.
    pub image_quality: u32,

    /// Rendering DPI. Default: 100.
    ///
    /// wkhtmltopdf uses this for CSS-pixel-to-physical-size mapping. 100 DPI
    /// matches the renderer's own default behaviour; raise to 300 for print
    /// output where hairlines and small fonts matter.
    pub dpi: u32,

    /// Top margin in millimetres. Default: 0.
    pub margin_top_mm: u32,

    /// Right margin in millimetres. Default: 0.
    pub margin_right_mm: u32,

    /// Bottom margin in millimetres. Default: 0.
    pub margin_bottom_mm: u32,

    /// Left margin in millimetres. Default: 0.
    pub margin_left_mm: u32,

    /// Default text encoding for the input document. Default: `"UTF-8"`.
    pub encoding: String,

    /// Maximum wall-clock time for one renderer invocation in seconds. Default: 120.
    ///
    /// wkhtmltopdf fetches URL sources (and their subresources) itself, so a
    /// conversion can hang on a slow or dead remote host. When the deadline
    /// passes the child process is killed and [`Html2PdfError::Timeout`] is
    /// returned.
    ///
    /// [`Html2PdfError::Timeout`]: crate::error::Html2PdfError::Timeout
    pub render_timeout_secs: u64,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page_width_mm: 210,
            page_height_mm: 297,
            image_quality: 100,
            dpi: 100,
            margin_top_mm: 0,
            margin_right_mm: 0,
            margin_bottom_mm: 0,
            margin_left_mm: 0,
            encoding: "UTF-8".to_string(),
            render_timeout_secs: 120,
        }
    }
}

impl PdfConfig {
    /// Create a new builder for `PdfConfig`.
    pub fn builder() -> PdfConfigBuilder {
        PdfConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PdfConfig`].
#[derive(Debug)]
pub struct PdfConfigBuilder {
    config: PdfConfig,
}

impl PdfConfigBuilder {
    /// Set page width and height in millimetres.
    pub fn page_size_mm(mut self, width: u32, height: u32) -> Self {
        self.config.page_width_mm = width;
        self.config.page_height_mm = height;
        self
    }

    pub fn page_width_mm(mut self, mm: u32) -> Self {
        self.config.page_width_mm = mm;
        self
    }

    pub fn page_height_mm(mut self, mm: u32) -> Self {
        self.config.page_height_mm = mm;
        self
    }

    pub fn image_quality(mut self, q: u32) -> Self {
        self.config.image_quality = q.clamp(1, 100);
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(72, 1200);
        self
    }

    /// Set all four margins to the same value in millimetres.
    pub fn margins_mm(mut self, mm: u32) -> Self {
        self.config.margin_top_mm = mm;
        self.config.margin_right_mm = mm;
        self.config.margin_bottom_mm = mm;
        self.config.margin_left_mm = mm;
        self
    }

    pub fn margin_top_mm(mut self, mm: u32) -> Self {
        self.config.margin_top_mm = mm;
        self
    }

    pub fn margin_right_mm(mut self, mm: u32) -> Self {
        self.config.margin_right_mm = mm;
        self
    }

    pub fn margin_bottom_mm(mut self, mm: u32) -> Self {
        self.config.margin_bottom_mm = mm;
        self
    }

    pub fn margin_left_mm(mut self, mm: u32) -> Self {
        self.config.margin_left_mm = mm;
        self
    }

    pub fn encoding(mut self, enc: impl Into<String>) -> Self {
        self.config.encoding = enc.into();
        self
    }

    pub fn render_timeout_secs(mut self, secs: u64) -> Self {
        self.config.render_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PdfConfig, Html2PdfError> {
        let c = &self.config;
        if c.page_width_mm == 0 || c.page_height_mm == 0 {
            return Err(Html2PdfError::InvalidConfig(format!(
                "Page size must be non-zero, got {}x{} mm",
                c.page_width_mm, c.page_height_mm
            )));
        }
        if c.encoding.is_empty() {
            return Err(Html2PdfError::InvalidConfig(
                "Encoding must be non-empty".into(),
            ));
        }
        if c.render_timeout_secs == 0 {
            return Err(Html2PdfError::InvalidConfig(
                "Render timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_a4_utf8() {
        let c = PdfConfig::default();
        assert_eq!(c.page_width_mm, 210);
        assert_eq!(c.page_height_mm, 297);
        assert_eq!(c.image_quality, 100);
        assert_eq!(c.dpi, 100);
        assert_eq!(c.encoding, "UTF-8");
        assert_eq!(c.margin_top_mm, 0);
    }

    #[test]
    fn builder_clamps_quality_and_dpi() {
        let c = PdfConfig::builder()
            .image_quality(500)
            .dpi(10)
            .build()
            .unwrap();
        assert_eq!(c.image_quality, 100);
        assert_eq!(c.dpi, 72);
    }

    #[test]
    fn margins_mm_sets_all_four() {
        let c = PdfConfig::builder().margins_mm(15).build().unwrap();
        assert_eq!(c.margin_top_mm, 15);
        assert_eq!(c.margin_right_mm, 15);
        assert_eq!(c.margin_bottom_mm, 15);
        assert_eq!(c.margin_left_mm, 15);
    }

    #[test]
    fn zero_page_size_rejected() {
        let err = PdfConfig::builder().page_size_mm(0, 297).build();
        assert!(matches!(err, Err(Html2PdfError::InvalidConfig(_))));
    }

    #[test]
    fn empty_encoding_rejected() {
        let err = PdfConfig::builder().encoding("").build();
        assert!(matches!(err, Err(Html2PdfError::InvalidConfig(_))));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = PdfConfig::builder().render_timeout_secs(0).build();
        assert!(matches!(err, Err(Html2PdfError::InvalidConfig(_))));
    }
}
