//! Flat-text grammar for editing many entries at once.
//!
//! ```text
//! [Company] Title (Duration)
//! bullet one
//! bullet two
//!
//! [Next Company] ...
//! ```
//!
//! Projects use `[Name] Description` with no duration group. Header fields must
//! not contain `[`, `]` or `(` / `)` in delimiter positions: a title such as
//! `Software (Backend) Engineer` is cut at its first `(`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::{Project, WorkExperience};

static BLOCK_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static BRACKETED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([^\]]+)\]").unwrap());
static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\]\s*([^(]+)").unwrap());
static DURATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)").unwrap());
static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\]\s*(.+)").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Formatting
// ────────────────────────────────────────────────────────────────────────────

pub fn format_experience_text(entries: &[WorkExperience]) -> String {
    entries
        .iter()
        .map(|entry| {
            let mut header = format!("[{}] {}", entry.company, entry.title);
            if !entry.duration.is_empty() {
                header.push_str(&format!(" ({})", entry.duration));
            }
            format_block(header.trim_end(), &entry.bullets)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn format_project_text(projects: &[Project]) -> String {
    projects
        .iter()
        .map(|project| {
            let header = format!("[{}] {}", project.name, project.description);
            format_block(header.trim_end(), &project.bullets)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_block(header: &str, bullets: &[String]) -> String {
    let mut block = header.to_string();
    for bullet in bullets {
        block.push('\n');
        block.push_str(bullet);
    }
    block
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing
// ────────────────────────────────────────────────────────────────────────────

/// Never fails: a header that does not fit the grammar leaves its fields empty
/// and the bullets are still kept.
pub fn parse_experience_text(text: &str) -> Vec<WorkExperience> {
    blocks(text)
        .map(|(header, bullets)| WorkExperience {
            company: capture(&BRACKETED_RE, header),
            title: capture(&TITLE_RE, header),
            duration: capture(&DURATION_RE, header),
            bullets,
        })
        .collect()
}

pub fn parse_project_text(text: &str) -> Vec<Project> {
    blocks(text)
        .map(|(header, bullets)| Project {
            name: capture(&BRACKETED_RE, header),
            description: capture(&DESCRIPTION_RE, header),
            bullets,
        })
        .collect()
}

/// Splits on blank lines into `(header, bullets)` pairs, dropping blocks with
/// no content at all.
fn blocks(text: &str) -> impl Iterator<Item = (&str, Vec<String>)> {
    BLOCK_SEPARATOR_RE.split(text).filter_map(|block| {
        let mut lines = block.lines().map(str::trim).filter(|l| !l.is_empty());
        let header = lines.next()?;
        let bullets = lines.map(str::to_string).collect();
        Some((header, bullets))
    })
}

fn capture(re: &Regex, header: &str) -> String {
    re.captures(header)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
