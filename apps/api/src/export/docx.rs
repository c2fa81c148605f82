use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};

use super::{ordered_sections, role_line, ExportError, SectionBody};
use crate::models::resume::ResumeSection;

const HEADING_SIZE: usize = 28;
const BULLET: &str = "• ";

pub fn render_docx(resume: &ResumeSection) -> Result<Vec<u8>, ExportError> {
    let mut doc = Docx::new();

    for section in ordered_sections(resume) {
        doc = doc.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(&section.heading).bold().size(HEADING_SIZE)),
        );
        match section.body {
            SectionBody::Text(text) => {
                for line in text.trim().lines() {
                    doc = doc.add_paragraph(plain(line.trim()));
                }
            }
            SectionBody::List(items) => {
                for item in items {
                    doc = doc.add_paragraph(plain(&format!("{BULLET}{item}")));
                }
            }
            SectionBody::Experience(entries) => {
                for (index, entry) in entries.iter().enumerate() {
                    // Blank paragraph between entries, as in the Markdown layout.
                    if index > 0 {
                        doc = doc.add_paragraph(Paragraph::new());
                    }
                    if !entry.company.is_empty() {
                        doc = doc.add_paragraph(bold(&entry.company));
                    }
                    if let Some(role) = role_line(entry) {
                        doc = doc.add_paragraph(
                            Paragraph::new().add_run(Run::new().add_text(role).italic()),
                        );
                    }
                    for bullet in &entry.bullets {
                        doc = doc.add_paragraph(plain(&format!("{BULLET}{bullet}")));
                    }
                }
            }
            SectionBody::Projects(projects) => {
                for project in projects {
                    if !project.name.is_empty() {
                        doc = doc.add_paragraph(bold(&project.name));
                    }
                    if !project.description.is_empty() {
                        doc = doc.add_paragraph(plain(&project.description));
                    }
                    for bullet in &project.bullets {
                        doc = doc.add_paragraph(plain(&format!("{BULLET}{bullet}")));
                    }
                }
            }
        }
    }

    let mut cursor = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut cursor)
        .map_err(|e| ExportError::Pack(e.to_string()))?;
    Ok(cursor.into_inner())
}

fn plain(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn bold(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold())
}
