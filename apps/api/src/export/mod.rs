//! Renders a `ResumeSection` into a downloadable document.
//!
//! Both renderers walk the same fixed template: summary, experience, projects,
//! then every other detected section in document order.

pub mod docx;
pub mod handlers;
pub mod markdown;

use std::str::FromStr;

use thiserror::Error;

use crate::models::resume::{
    Project, ResumeSection, SectionContent, WorkExperience, PERSONAL_SUMMARY, PROJECTS,
    WORK_EXPERIENCE,
};
use crate::parser::classifier::clean_markdown;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unknown export format '{0}'; expected docx or markdown")]
    UnknownFormat(String),

    #[error("Failed to pack DOCX: {0}")]
    Pack(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Docx,
    Markdown,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docx" | "word" => Ok(ExportFormat::Docx),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
        }
    }
}

pub fn render(resume: &ResumeSection, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Docx => docx::render_docx(resume),
        ExportFormat::Markdown => Ok(markdown::render_markdown(resume).into_bytes()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Template order
// ────────────────────────────────────────────────────────────────────────────

/// Borrowed view of one section's content, ready to render.
#[derive(Debug, Clone, Copy)]
pub enum SectionBody<'a> {
    Text(&'a str),
    List(&'a [String]),
    Experience(&'a [WorkExperience]),
    Projects(&'a [Project]),
}

#[derive(Debug, Clone)]
pub struct RenderSection<'a> {
    pub heading: String,
    /// Heading text names no known section, so re-parsing needs an H1.
    pub custom: bool,
    pub body: SectionBody<'a>,
}

/// Non-empty sections in template order. Canonical sections come from the
/// top-level fields and are never repeated from the registry.
pub fn ordered_sections(resume: &ResumeSection) -> Vec<RenderSection<'_>> {
    let mut sections = Vec::new();

    if !resume.personal_summary.trim().is_empty() {
        sections.push(canonical(
            resume,
            PERSONAL_SUMMARY,
            "Summary",
            SectionBody::Text(&resume.personal_summary),
        ));
    }
    if !resume.work_experience.is_empty() {
        sections.push(canonical(
            resume,
            WORK_EXPERIENCE,
            "Experience",
            SectionBody::Experience(&resume.work_experience),
        ));
    }
    if !resume.projects.is_empty() {
        sections.push(canonical(
            resume,
            PROJECTS,
            "Projects",
            SectionBody::Projects(&resume.projects),
        ));
    }

    for (key, section) in &resume.dynamic_sections {
        if [PERSONAL_SUMMARY, WORK_EXPERIENCE, PROJECTS].contains(&key.as_str())
            || section.content.is_empty()
        {
            continue;
        }
        let heading = match clean_markdown(&section.original_header) {
            h if h.is_empty() => humanize_key(key),
            h => h,
        };
        let body = match &section.content {
            SectionContent::Text(text) => SectionBody::Text(text),
            SectionContent::List(items) => SectionBody::List(items),
            SectionContent::Experience(entries) => SectionBody::Experience(entries),
            SectionContent::Projects(entries) => SectionBody::Projects(entries),
        };
        sections.push(RenderSection {
            custom: crate::parser::classifier::detect_section_header(&heading).is_none(),
            heading,
            body,
        });
    }
    sections
}

fn canonical<'a>(
    resume: &'a ResumeSection,
    key: &str,
    fallback: &str,
    body: SectionBody<'a>,
) -> RenderSection<'a> {
    let heading = resume
        .dynamic_sections
        .get(key)
        .map(|s| clean_markdown(&s.original_header))
        .filter(|h| crate::parser::classifier::detect_section_header(h).is_some())
        .unwrap_or_else(|| fallback.to_string());
    RenderSection {
        heading,
        custom: false,
        body,
    }
}

/// `volunteerWork` → `Volunteer Work`.
fn humanize_key(key: &str) -> String {
    let mut out = String::new();
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}

/// `Title | Duration`, or whichever half is present.
pub(crate) fn role_line(entry: &WorkExperience) -> Option<String> {
    match (entry.title.is_empty(), entry.duration.is_empty()) {
        (true, true) => None,
        (false, true) => Some(entry.title.clone()),
        (true, false) => Some(entry.duration.clone()),
        (false, false) => Some(format!("{} | {}", entry.title, entry.duration)),
    }
}
