//! pdf2html - Convert a PDF document to HTML
//!
//! Runs layout analysis over every page and writes the positioned text as a
//! single HTML file, then reports where it was saved.

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser, ValueEnum};
use pdf2html_core::{
    Conversion, ConvertOptions, ExtractOptions, HtmlOptions, LAParams, LayoutMode,
    OutputStrategy, convert_file, parse_page_numbers,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Layout mode for HTML output.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum LayoutModeArg {
    /// Normal mode - each text box positioned with its text
    #[default]
    Normal,
    /// Exact mode - only characters outside text boxes, placed one by one
    Exact,
    /// Loose mode - same output as normal
    Loose,
}

impl From<LayoutModeArg> for LayoutMode {
    fn from(arg: LayoutModeArg) -> Self {
        match arg {
            LayoutModeArg::Normal => Self::Normal,
            LayoutModeArg::Exact => Self::Exact,
            LayoutModeArg::Loose => Self::Loose,
        }
    }
}

/// Convert a PDF document to an HTML file with layout-aware text placement.
#[derive(Parser, Debug)]
#[command(name = "pdf2html")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Args {
    /// Path to the PDF file
    #[arg(env = "PDF2HTML_INPUT")]
    input: PathBuf,

    /// Path of the HTML file to write (default: input path with .html)
    #[arg(short = 'o', long, env = "PDF2HTML_OUTPUT")]
    outfile: Option<PathBuf>,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Disable caching of resources (fonts, etc.)
    #[arg(short = 'C', long = "disable-caching", action = ArgAction::SetTrue)]
    disable_caching: bool,

    // === Parser options ===
    /// A comma or space separated list of page numbers to parse (1-indexed)
    #[arg(long = "page-numbers")]
    page_numbers: Option<String>,

    /// The maximum number of pages to parse (0 = no limit)
    #[arg(short = 'm', long, default_value = "0")]
    maxpages: usize,

    /// The password to use for decrypting PDF file
    #[arg(short = 'P', long, env = "PDF2HTML_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    // === Layout analysis options ===
    /// Do not pass layout parameters; the library defaults apply
    #[arg(short = 'n', long = "no-laparams", action = ArgAction::SetTrue)]
    no_laparams: bool,

    /// Consider vertical text during layout analysis
    #[arg(short = 'V', long = "detect-vertical", action = ArgAction::SetTrue)]
    detect_vertical: bool,

    /// Line overlap ratio (relative to character height)
    #[arg(long = "line-overlap", default_value = "0.5")]
    line_overlap: f64,

    /// Character margin (relative to character width)
    #[arg(short = 'M', long = "char-margin", default_value = "2.0")]
    char_margin: f64,

    /// Word margin (relative to character width)
    #[arg(short = 'W', long = "word-margin", default_value = "0.1")]
    word_margin: f64,

    /// Line margin (relative to line height)
    #[arg(short = 'L', long = "line-margin", default_value = "0.5")]
    line_margin: f64,

    /// Boxes flow direction (-1.0 to 1.0, or "disabled"). Default: 0.5
    #[arg(short = 'F', long = "boxes-flow")]
    boxes_flow: Option<String>,

    /// Perform layout analysis on text in figures
    #[arg(short = 'A', long = "all-texts", action = ArgAction::SetTrue)]
    all_texts: bool,

    // === Output options ===
    /// Charset label for the HTML header (only utf-8 is accepted)
    #[arg(short = 'c', long)]
    codec: Option<String>,

    /// Layout mode for HTML output
    #[arg(short = 'Y', long, value_enum, default_value = "normal")]
    layoutmode: LayoutModeArg,

    /// Scale factor for HTML output
    #[arg(short = 's', long, default_value = "1.0")]
    scale: f64,

    /// Outline figures, text lines, text boxes and groups
    #[arg(long = "show-layout", action = ArgAction::SetTrue)]
    show_layout: bool,

    /// Hold the whole document in memory before writing it out
    #[arg(long, action = ArgAction::SetTrue)]
    buffered: bool,
}

/// Parse boxes_flow value - either a float or "disabled".
fn parse_boxes_flow(s: &str) -> std::result::Result<Option<f64>, String> {
    let s = s.trim().to_lowercase();
    if s == "disabled" {
        return Ok(None);
    }

    match s.parse::<f64>() {
        Ok(v) => {
            if (-1.0..=1.0).contains(&v) {
                Ok(Some(v))
            } else {
                Err(format!(
                    "boxes_flow must be between -1.0 and 1.0, got {}",
                    v
                ))
            }
        }
        Err(_) => Err(format!("invalid float value: {}", s)),
    }
}

/// Build LAParams from command line arguments.
fn build_laparams(args: &Args) -> Result<Option<LAParams>> {
    if args.no_laparams {
        return Ok(None);
    }

    // boxes_flow: None means not specified (use default 0.5),
    // Some("disabled") means disabled, Some(v) means explicit value
    let boxes_flow = match args.boxes_flow.as_deref() {
        None => Some(0.5),
        Some(s) => parse_boxes_flow(s).map_err(|e| anyhow!(e))?,
    };

    Ok(Some(LAParams::new(
        args.line_overlap,
        args.char_margin,
        args.line_margin,
        args.word_margin,
        boxes_flow,
        args.detect_vertical,
        args.all_texts,
    )))
}

/// Build conversion options from command line arguments.
fn build_options(args: &Args) -> Result<ConvertOptions> {
    let extract = ExtractOptions {
        password: args.password.clone(),
        page_numbers: args.page_numbers.as_deref().and_then(parse_page_numbers),
        maxpages: args.maxpages,
        caching: !args.disable_caching,
        laparams: build_laparams(args)?,
    };

    let html = HtmlOptions {
        extract,
        codec: args.codec.clone(),
        layoutmode: args.layoutmode.into(),
        scale: args.scale,
        show_layout: args.show_layout,
        ..Default::default()
    };

    let strategy = if args.buffered {
        OutputStrategy::Buffered
    } else {
        OutputStrategy::Streaming
    };

    Ok(ConvertOptions { html, strategy })
}

/// Destination used when none is given: the input path with an .html
/// extension, never the input itself.
fn default_outfile(input: &Path) -> PathBuf {
    let candidate = input.with_extension("html");
    if candidate == input {
        let mut name = input.as_os_str().to_owned();
        name.push(".html");
        PathBuf::from(name)
    } else {
        candidate
    }
}

fn init_logging(debug: bool) {
    let filter = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<Conversion> {
    let options = build_options(args)?;
    let outfile = args
        .outfile
        .clone()
        .unwrap_or_else(|| default_outfile(&args.input));
    debug!(
        input = %args.input.display(),
        outfile = %outfile.display(),
        strategy = ?options.strategy,
        "converting"
    );

    convert_file(&args.input, &outfile, &options)
        .with_context(|| format!("Error processing {}", args.input.display()))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match run(&args) {
        Ok(conversion) => {
            println!("HTML saved to {}", conversion.destination.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
