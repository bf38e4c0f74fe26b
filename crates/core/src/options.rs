//! Conversion options.
//!
//! `HtmlOptions` carries bolivar's `ExtractOptions` unchanged and adds the
//! knobs of pdfminer's `HTMLConverter` (codec, layout mode, scale, ...).

use bolivar_core::high_level::ExtractOptions;
use bolivar_core::layout::LAParams;

use crate::error::{ConvertError, Result};

/// How text boxes are placed in the generated HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Each text box is positioned as a block holding its text.
    #[default]
    Normal,
    /// Only characters left outside any text box are placed, one by one.
    /// Text grouped into boxes is not emitted.
    Exact,
    /// Accepted for pdfminer compatibility; renders exactly like `Normal`.
    Loose,
}

impl LayoutMode {
    /// Name understood by `HTMLConverter::set_layoutmode`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Exact => "exact",
            Self::Loose => "loose",
        }
    }
}

/// Where the HTML is accumulated before it reaches the destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStrategy {
    /// Pages are written to a temporary file next to the destination, which
    /// is renamed over the destination once extraction finished.
    #[default]
    Streaming,
    /// The whole document is held in memory and written in one go.
    Buffered,
}

/// Options for HTML extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlOptions {
    /// Password, page selection, caching and layout parameters.
    pub extract: ExtractOptions,

    /// Charset label for the `<meta>` header. None writes no charset.
    pub codec: Option<String>,

    pub layoutmode: LayoutMode,

    /// Scale factor for positions.
    pub scale: f64,

    /// Scale factor for font sizes.
    pub fontscale: f64,

    /// Emit a "Page N" anchor above every page.
    pub showpageno: bool,

    /// Vertical gap between pages, in points.
    pub pagemargin: i32,

    /// Outline figures, lines, boxes and groups.
    pub show_layout: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            codec: None,
            layoutmode: LayoutMode::Normal,
            scale: 1.0,
            fontscale: 1.0,
            showpageno: true,
            pagemargin: 50,
            show_layout: false,
        }
    }
}

impl HtmlOptions {
    /// Check every option before any input is read.
    ///
    /// `LAParams::new` panics on an out-of-range `boxes_flow`, so callers
    /// building params field by field are caught here instead.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref laparams) = self.extract.laparams {
            validate_laparams(laparams)?;
        }

        for (name, value) in [("scale", self.scale), ("fontscale", self.fontscale)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConvertError::InvalidOption(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if self.pagemargin < 0 {
            return Err(ConvertError::InvalidOption(format!(
                "pagemargin must not be negative, got {}",
                self.pagemargin
            )));
        }

        if let Some(ref codec) = self.codec {
            if !is_utf8_label(codec) {
                return Err(ConvertError::InvalidOption(format!(
                    "unsupported codec {:?}: output is always utf-8",
                    codec
                )));
            }
        }

        Ok(())
    }

    /// Codec string handed to `HTMLConverter`; empty means no charset.
    pub(crate) fn codec_label(&self) -> &str {
        self.codec.as_deref().unwrap_or("")
    }
}

fn validate_laparams(laparams: &LAParams) -> Result<()> {
    let margins = [
        ("line_overlap", laparams.line_overlap),
        ("char_margin", laparams.char_margin),
        ("line_margin", laparams.line_margin),
        ("word_margin", laparams.word_margin),
    ];
    for (name, value) in margins {
        if !value.is_finite() {
            return Err(ConvertError::InvalidOption(format!(
                "{} must be a finite number, got {}",
                name, value
            )));
        }
    }

    if let Some(bf) = laparams.boxes_flow {
        if !(-1.0..=1.0).contains(&bf) {
            return Err(ConvertError::InvalidOption(format!(
                "boxes_flow must be between -1.0 and 1.0, got {}",
                bf
            )));
        }
    }

    Ok(())
}

fn is_utf8_label(codec: &str) -> bool {
    let codec = codec.trim().to_ascii_lowercase();
    codec == "utf-8" || codec == "utf8"
}

/// Options for converting a file to a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertOptions {
    pub html: HtmlOptions,
    pub strategy: OutputStrategy,
}

/// Parse a 1-indexed page list such as `"1,3 5"` into zero-indexed numbers.
///
/// Blank and non-numeric tokens are skipped, as is page 0. Returns None when
/// nothing usable remains, meaning every page.
pub fn parse_page_numbers(spec: &str) -> Option<Vec<usize>> {
    let nums: Vec<usize> = spec
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .map(|n| n - 1)
        .collect();

    if nums.is_empty() { None } else { Some(nums) }
}
