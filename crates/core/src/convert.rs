//! PDF to HTML conversion.
//!
//! Pages come from bolivar's ordered page stream and are rendered one at a
//! time by its `HTMLConverter`, so output grows page by page instead of being
//! assembled at the end.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use bolivar_core::api::{PageStream, extract_pages_stream};
use bolivar_core::converter::HTMLConverter;
use tracing::{debug, info};

use crate::error::{ConvertError, Result};
use crate::options::{ConvertOptions, HtmlOptions, OutputStrategy};
use crate::sink::LatchingWriter;

/// Outcome of rendering a document into a writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extraction {
    /// Pages rendered.
    pub pages: usize,
    /// Bytes of HTML produced.
    pub bytes: u64,
}

/// Outcome of converting a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub destination: PathBuf,
    pub pages: usize,
    pub bytes_written: u64,
}

/// Render PDF data to an HTML string.
///
/// # Example
/// ```ignore
/// use pdf2html_core::extract_html;
///
/// let pdf_bytes = std::fs::read("document.pdf")?;
/// let html = extract_html(&pdf_bytes, None)?;
/// ```
pub fn extract_html(pdf_data: &[u8], options: Option<HtmlOptions>) -> Result<String> {
    let mut output = Vec::new();
    extract_html_to_fp(pdf_data, &mut output, options)?;
    String::from_utf8(output)
        .map_err(|e| ConvertError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Render PDF data as HTML into `writer`.
///
/// Nothing is written if the document cannot be opened. A failure on a later
/// page stops rendering, leaving whatever was already written in `writer`.
pub fn extract_html_to_fp<W: Write>(
    pdf_data: &[u8],
    writer: &mut W,
    options: Option<HtmlOptions>,
) -> Result<Extraction> {
    let options = options.unwrap_or_default();
    options.validate()?;

    let stream = extract_pages_stream(pdf_data, Some(options.extract.clone()))?;

    let mut sink = LatchingWriter::new(writer);
    let pages = render_pages(stream, &mut sink, &options)?;
    let (_, bytes) = sink.finish()?;

    Ok(Extraction { pages, bytes })
}

/// Convert the PDF at `source` into an HTML file at `destination`.
///
/// The destination is created or replaced. It is left untouched when the
/// source cannot be read or extraction fails.
pub fn convert_file(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<Conversion> {
    let source = source.as_ref();
    let destination = destination.as_ref();
    options.html.validate()?;

    let pdf_data = fs::read(source).map_err(|e| ConvertError::SourceRead {
        path: source.to_path_buf(),
        source: e,
    })?;
    debug!(source = %source.display(), len = pdf_data.len(), "read source");

    let stream = extract_pages_stream(&pdf_data, Some(options.html.extract.clone()))?;
    // The document owns its own copy from here on.
    drop(pdf_data);

    let (pages, bytes_written) = match options.strategy {
        OutputStrategy::Buffered => write_buffered(stream, destination, &options.html)?,
        OutputStrategy::Streaming => {
            let target = resolve_symlinks(destination);
            write_streaming(stream, &target, &options.html)
                .map_err(|e| relabel_destination(e, destination))?
        }
    };

    info!(
        destination = %destination.display(),
        pages,
        bytes = bytes_written,
        "conversion finished"
    );

    Ok(Conversion {
        destination: destination.to_path_buf(),
        pages,
        bytes_written,
    })
}

/// Drive `HTMLConverter` over every page of the stream.
fn render_pages<W: Write>(stream: PageStream, sink: &mut W, options: &HtmlOptions) -> Result<usize> {
    let mut converter = HTMLConverter::new(
        sink,
        options.codec_label(),
        1,
        options.extract.laparams.clone(),
    );
    converter.set_layoutmode(options.layoutmode.as_str());
    converter.set_scale(options.scale);
    converter.set_fontscale(options.fontscale);
    converter.set_showpageno(options.showpageno);
    converter.set_pagemargin(options.pagemargin);
    if options.show_layout {
        converter.set_rect_colors(HTMLConverter::<Vec<u8>>::debug_rect_colors());
        converter.set_text_colors(HTMLConverter::<Vec<u8>>::debug_text_colors());
    }

    let mut pages = 0;
    for page in stream {
        let page = page?;
        debug!(pageid = page.pageid, "rendering page");
        converter.receive_layout(page);
        pages += 1;
    }

    converter.close();
    converter.flush();
    Ok(pages)
}

fn write_buffered(
    stream: PageStream,
    destination: &Path,
    options: &HtmlOptions,
) -> Result<(usize, u64)> {
    let mut buffer = Vec::new();
    let mut sink = LatchingWriter::new(&mut buffer);
    let pages = render_pages(stream, &mut sink, options)?;
    let (_, produced) = sink.finish()?;
    debug!(bytes = produced, "extraction buffered");

    fs::write(destination, &buffer).map_err(|e| destination_error(destination, e))?;
    Ok((pages, buffer.len() as u64))
}

fn write_streaming(
    stream: PageStream,
    destination: &Path,
    options: &HtmlOptions,
) -> Result<(usize, u64)> {
    let tmp = temp_builder()
        .tempfile_in(parent_dir(destination))
        .map_err(|e| destination_error(destination, e))?;
    debug!(tmp = %tmp.path().display(), "streaming to temporary file");

    // On any early return the temporary file is dropped and removed.
    let mut sink = LatchingWriter::new(BufWriter::new(tmp));
    let pages = render_pages(stream, &mut sink, options)?;
    let (writer, written) = sink
        .finish()
        .map_err(|e| destination_error(destination, e))?;
    let tmp = writer
        .into_inner()
        .map_err(|e| destination_error(destination, e.into_error()))?;

    tmp.persist(destination)
        .map_err(|e| destination_error(destination, e.error))?;
    Ok((pages, written))
}

/// Follow symlinks at `path` so a rename lands on the file the link points
/// to, as a plain open-for-write would. Dangling links resolve to their
/// target path.
fn resolve_symlinks(path: &Path) -> PathBuf {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_SYMLINK_HOPS {
        let is_link = fs::symlink_metadata(&current)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false);
        if !is_link {
            break;
        }
        let Ok(target) = fs::read_link(&current) else {
            break;
        };
        current = if target.is_absolute() {
            target
        } else {
            parent_dir(&current).join(target)
        };
    }
    current
}

const MAX_SYMLINK_HOPS: usize = 40;

/// Report destination errors against the path the caller asked for.
fn relabel_destination(err: ConvertError, destination: &Path) -> ConvertError {
    match err {
        ConvertError::DestinationWrite { source, .. } => destination_error(destination, source),
        other => other,
    }
}

fn temp_builder() -> tempfile::Builder<'static, 'static> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".pdf2html-").suffix(".tmp");
    // Same mode File::create would use, so the renamed file looks the same.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn destination_error(path: &Path, source: io::Error) -> ConvertError {
    ConvertError::DestinationWrite {
        path: path.to_path_buf(),
        source,
    }
}
