//! pdf2html - layout-aware PDF to HTML conversion.
//!
//! Thin driver around bolivar's page stream and `HTMLConverter`:
//! - `extract_html()` - render a PDF to an HTML `String`
//! - `extract_html_to_fp()` - render a PDF to any writer
//! - `convert_file()` - render a PDF file to an HTML file on disk

pub mod convert;
pub mod error;
pub mod options;
pub mod sink;

pub use convert::{Conversion, Extraction, convert_file, extract_html, extract_html_to_fp};
pub use error::{ConvertError, Result};
pub use options::{ConvertOptions, HtmlOptions, LayoutMode, OutputStrategy, parse_page_numbers};

// Library types that appear in the public options.
pub use bolivar_core::high_level::ExtractOptions;
pub use bolivar_core::layout::LAParams;
