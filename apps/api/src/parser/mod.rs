//! Resume text → structured `ResumeSection`.
//!
//! `classifier` holds the stateless line predicates, `detector` folds them over
//! the document into a section registry, `assembler` maps the registry onto the
//! canonical model.

pub mod assembler;
pub mod classifier;
pub mod detector;
pub mod headers;

use tracing::debug;

use crate::models::resume::ResumeSection;

pub use assembler::assemble_resume;
pub use detector::detect_sections;

/// Parses extracted resume text. Never fails: unrecognised content degrades to
/// an implicit summary, stray bullets or descriptions.
pub fn parse_resume(text: &str) -> ResumeSection {
    let registry = detect_sections(text);
    debug!(
        sections = ?registry.keys().collect::<Vec<_>>(),
        "Detected resume sections"
    );
    assemble_resume(registry)
}
