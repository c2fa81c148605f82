//! Section header synonyms and header normalisation.
//!
//! The table is plain data: add a synonym by appending to the relevant row.

use serde::Serialize;

use crate::models::resume::{SectionType, PERSONAL_SUMMARY, PROJECTS, WORK_EXPERIENCE};

/// A recognised section header: registry key plus the content shape it opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderMatch {
    pub name: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
}

pub struct SectionSynonyms {
    pub name: &'static str,
    pub section_type: SectionType,
    pub synonyms: &'static [&'static str],
}

pub const SECTION_SYNONYMS: &[SectionSynonyms] = &[
    SectionSynonyms {
        name: PERSONAL_SUMMARY,
        section_type: SectionType::Text,
        synonyms: &[
            "summary",
            "professional summary",
            "career summary",
            "summary of qualifications",
            "objective",
            "career objective",
            "profile",
            "professional profile",
            "about",
            "about me",
            "overview",
            "executive summary",
        ],
    },
    SectionSynonyms {
        name: WORK_EXPERIENCE,
        section_type: SectionType::Experience,
        synonyms: &[
            "experience",
            "work experience",
            "professional experience",
            "relevant experience",
            "employment",
            "employment history",
            "work history",
            "career",
            "career history",
        ],
    },
    SectionSynonyms {
        name: PROJECTS,
        section_type: SectionType::Projects,
        synonyms: &[
            "projects",
            "personal projects",
            "key projects",
            "selected projects",
            "academic projects",
            "portfolio",
        ],
    },
    SectionSynonyms {
        name: "education",
        section_type: SectionType::List,
        synonyms: &[
            "education",
            "academic background",
            "academic qualifications",
            "education and training",
        ],
    },
    SectionSynonyms {
        name: "skills",
        section_type: SectionType::List,
        synonyms: &[
            "skills",
            "technical skills",
            "key skills",
            "core competencies",
            "competencies",
            "skills and technologies",
        ],
    },
    SectionSynonyms {
        name: "certifications",
        section_type: SectionType::List,
        synonyms: &[
            "certifications",
            "certificates",
            "licenses",
            "licenses and certifications",
            "licenses & certifications",
        ],
    },
    SectionSynonyms {
        name: "achievements",
        section_type: SectionType::List,
        synonyms: &[
            "achievements",
            "awards",
            "honors",
            "awards and honors",
            "honors and awards",
            "awards & honors",
            "honors & awards",
            "accomplishments",
        ],
    },
];

/// Strips Markdown heading/emphasis decoration, a trailing colon, lowercases and
/// collapses inner whitespace.
pub fn normalize_header(line: &str) -> String {
    let mut text = line.trim().trim_start_matches('#').trim();
    loop {
        text = text.trim_end_matches(':').trim();
        let stripped = text
            .strip_prefix("**")
            .and_then(|t| t.strip_suffix("**"))
            .or_else(|| text.strip_prefix("__").and_then(|t| t.strip_suffix("__")))
            .or_else(|| text.strip_prefix('*').and_then(|t| t.strip_suffix('*')))
            .or_else(|| text.strip_prefix('_').and_then(|t| t.strip_suffix('_')));
        match stripped {
            Some(inner) => text = inner.trim(),
            None => break,
        }
    }
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Looks a normalised header up in the synonym table.
pub fn lookup(normalized: &str) -> Option<&'static SectionSynonyms> {
    if normalized.is_empty() {
        return None;
    }
    SECTION_SYNONYMS
        .iter()
        .find(|row| row.synonyms.contains(&normalized))
}

/// True when `line`, once normalised, is any known section header.
pub fn is_known_header(line: &str) -> bool {
    lookup(&normalize_header(line)).is_some()
}

/// `Volunteer Work` → `volunteerWork`. Non-alphanumeric characters split words.
pub fn camel_case_key(text: &str) -> String {
    let mut key = String::new();
    for (i, word) in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        let lower = word.to_lowercase();
        if i == 0 {
            key.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                key.extend(first.to_uppercase());
                key.push_str(chars.as_str());
            }
        }
    }
    key
}
