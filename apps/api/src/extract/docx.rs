//! Word documents via `docx-rs`.
//!
//! One output line per paragraph. A paragraph whose visible runs are all bold
//! is emitted as `**text**` so the line classifier sees the same emphasis a
//! reader does.

use docx_rs::{
    DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild, RunProperty, Table,
};

use super::ExtractError;

/// Compound File Binary signature used by pre-2007 `.doc` files.
const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| ExtractError::Extraction(format!("DOCX could not be decoded: {e}")))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(para) => lines.push(paragraph_line(para)),
            DocumentChild::Table(table) => push_table_lines(table, &mut lines),
            _ => {}
        }
    }
    Ok(lines.join("\n"))
}

/// `.doc` uploads are often OOXML files with the old extension; those decode
/// normally. Genuine binary Word files do not.
pub fn extract_doc_text(bytes: &[u8]) -> Result<String, ExtractError> {
    if bytes.starts_with(&OLE_MAGIC) {
        return Err(ExtractError::Extraction(
            "legacy binary .doc is not supported; save as .docx".to_string(),
        ));
    }
    extract_docx_text(bytes)
}

struct Segment {
    text: String,
    bold: bool,
}

fn paragraph_line(para: &Paragraph) -> String {
    let mut segments = Vec::new();
    collect_segments(&para.children, &mut segments);

    let text: String = segments.iter().map(|s| s.text.as_str()).collect();
    let trimmed = text.trim();
    let all_bold = segments
        .iter()
        .filter(|s| !s.text.trim().is_empty())
        .all(|s| s.bold);

    if !trimmed.is_empty() && all_bold && !trimmed.contains('\n') {
        format!("**{trimmed}**")
    } else {
        trimmed.to_string()
    }
}

fn collect_segments(children: &[ParagraphChild], out: &mut Vec<Segment>) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => out.push(run_segment(run)),
            ParagraphChild::Insert(insert) => {
                for inserted in &insert.children {
                    if let InsertChild::Run(run) = inserted {
                        out.push(run_segment(run));
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => collect_segments(&link.children, out),
            // Tracked deletions and bookmarks carry no visible text.
            _ => {}
        }
    }
}

fn run_segment(run: &Run) -> Segment {
    let mut text = String::new();
    for child in &run.children {
        match child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
    Segment {
        text,
        bold: is_bold(&run.run_property),
    }
}

/// `<w:b w:val="false"/>` is present but switches bold off.
fn is_bold(props: &RunProperty) -> bool {
    // `Bold` keeps its `w:val` private; it serializes as that flag.
    props
        .bold
        .as_ref()
        .is_some_and(|b| serde_json::to_value(b).ok().and_then(|v| v.as_bool()).unwrap_or(true))
}

/// Cell paragraphs in reading order: row by row, cell by cell.
fn push_table_lines(table: &Table, lines: &mut Vec<String>) {
    for row_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = row_child;
        for cell_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = cell_child;
            for content in &cell.children {
                match content {
                    docx_rs::TableCellContent::Paragraph(para) => {
                        let line = paragraph_line(para);
                        if !line.is_empty() {
                            lines.push(line);
                        }
                    }
                    docx_rs::TableCellContent::Table(nested) => push_table_lines(nested, lines),
                    _ => {}
                }
            }
        }
    }
}
