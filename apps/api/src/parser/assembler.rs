use tracing::warn;

use crate::models::resume::{
    ResumeSection, SectionContent, SectionRegistry, PERSONAL_SUMMARY, PROJECTS, WORK_EXPERIENCE,
};

/// Maps the detection registry onto the canonical resume model.
///
/// The three canonical fields take the content of their matching section when
/// its shape agrees, otherwise their empty default. The registry itself is kept
/// whole under `dynamic_sections`, mismatched entries included.
pub fn assemble_resume(registry: SectionRegistry) -> ResumeSection {
    let personal_summary = match registry.get(PERSONAL_SUMMARY).map(|s| &s.content) {
        Some(SectionContent::Text(text)) => text.clone(),
        Some(other) => {
            warn_mismatch(PERSONAL_SUMMARY, other);
            String::new()
        }
        None => String::new(),
    };

    let work_experience = match registry.get(WORK_EXPERIENCE).map(|s| &s.content) {
        Some(SectionContent::Experience(entries)) => entries.clone(),
        Some(other) => {
            warn_mismatch(WORK_EXPERIENCE, other);
            Vec::new()
        }
        None => Vec::new(),
    };

    let projects = match registry.get(PROJECTS).map(|s| &s.content) {
        Some(SectionContent::Projects(entries)) => entries.clone(),
        Some(other) => {
            warn_mismatch(PROJECTS, other);
            Vec::new()
        }
        None => Vec::new(),
    };

    ResumeSection {
        personal_summary,
        work_experience,
        projects,
        dynamic_sections: registry,
    }
}

fn warn_mismatch(key: &str, content: &SectionContent) {
    warn!(
        section = key,
        found = ?content.section_type(),
        "Canonical section has unexpected shape; using empty default"
    );
}
