//! Minimal PDF documents built in memory.
//!
//! Same builder as pdf2html-core's `tests/common`; test helpers cannot be
//! shared across packages.

#![allow(dead_code)]

/// Build a PDF with one page per entry of `texts`, each showing its text in
/// 24pt Helvetica near the top left corner. Texts must not contain `(`, `)`
/// or `\`.
pub fn build_text_pdf(texts: &[&str]) -> Vec<u8> {
    let page_count = texts.len();
    let font_id = 3 + 2 * page_count;

    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets: Vec<usize> = Vec::new();
    let push_obj = |buf: &mut Vec<u8>, obj: String, offsets: &mut Vec<usize>| {
        offsets.push(buf.len());
        buf.extend_from_slice(obj.as_bytes());
    };

    push_obj(
        &mut out,
        "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_string(),
        &mut offsets,
    );

    let kids: String = (0..page_count)
        .map(|i| format!("{} 0 R", 3 + i))
        .collect::<Vec<_>>()
        .join(" ");
    push_obj(
        &mut out,
        format!(
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids, page_count
        ),
        &mut offsets,
    );

    for i in 0..page_count {
        let page_id = 3 + i;
        let contents_id = 3 + page_count + i;
        push_obj(
            &mut out,
            format!(
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>\nendobj\n",
                page_id, font_id, contents_id
            ),
            &mut offsets,
        );
    }

    for (i, text) in texts.iter().enumerate() {
        let contents_id = 3 + page_count + i;
        let content = format!("BT /F1 24 Tf 72 700 Td ({}) Tj ET", text);
        push_obj(
            &mut out,
            format!(
                "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
                contents_id,
                content.len(),
                content
            ),
            &mut offsets,
        );
    }

    push_obj(
        &mut out,
        format!(
            "{} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
             /Encoding /WinAnsiEncoding >>\nendobj\n",
            font_id
        ),
        &mut offsets,
    );

    let xref_pos = out.len();
    let obj_count = offsets.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", obj_count + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(b"trailer\n<< /Size ");
    out.extend_from_slice((obj_count + 1).to_string().as_bytes());
    out.extend_from_slice(b" /Root 1 0 R >>\nstartxref\n");
    out.extend_from_slice(xref_pos.to_string().as_bytes());
    out.extend_from_slice(b"\n%%EOF");

    out
}
