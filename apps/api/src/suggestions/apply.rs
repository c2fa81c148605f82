use std::collections::HashSet;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::resume::ResumeSection;
use crate::suggestions::models::{Suggestion, SuggestionTarget};

/// Applies the selected suggestions of a stored batch to `resume`.
///
/// A suggestion is only applied while its target still holds the text it was
/// generated from; edits made after `/ai/enhance` win. Registry mirrors of the
/// canonical fields are re-synced afterwards.
pub fn apply_suggestions(
    mut resume: ResumeSection,
    batch: &[Suggestion],
    selected: &[Uuid],
) -> ResumeSection {
    let known: HashSet<Uuid> = batch.iter().map(|s| s.id).collect();
    for id in selected.iter().filter(|id| !known.contains(id)) {
        warn!(%id, "Selected suggestion is not part of the session");
    }

    let selected: HashSet<&Uuid> = selected.iter().collect();
    let mut applied = 0usize;
    for suggestion in batch.iter().filter(|s| selected.contains(&s.id)) {
        match slot_mut(&mut resume, &suggestion.target) {
            Some(slot) if *slot == suggestion.original => {
                slot.clone_from(&suggestion.enhanced);
                applied += 1;
            }
            Some(_) => warn!(id = %suggestion.id, target = ?suggestion.target, "Skipping stale suggestion"),
            None => warn!(id = %suggestion.id, target = ?suggestion.target, "Suggestion target no longer exists"),
        }
    }

    debug!(applied, "Applied suggestions");
    resume.sync_dynamic_sections();
    resume
}

fn slot_mut<'a>(resume: &'a mut ResumeSection, target: &SuggestionTarget) -> Option<&'a mut String> {
    match *target {
        SuggestionTarget::PersonalSummary => Some(&mut resume.personal_summary),
        SuggestionTarget::ExperienceBullet { entry, bullet } => resume
            .work_experience
            .get_mut(entry)
            .and_then(|e| e.bullets.get_mut(bullet)),
        SuggestionTarget::ProjectDescription { project } => {
            resume.projects.get_mut(project).map(|p| &mut p.description)
        }
        SuggestionTarget::ProjectBullet { project, bullet } => resume
            .projects
            .get_mut(project)
            .and_then(|p| p.bullets.get_mut(bullet)),
    }
}
