//! Pluggable source of rewrite suggestions.
//!
//! Default: `RuleBasedEnhancer` (deterministic, no model call).
//! `AppState` holds an `Arc<dyn Enhancer>`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeSection;
use crate::suggestions::models::{Suggestion, SuggestionTarget};
use crate::suggestions::rules::{
    extract_keywords, is_quantified, join_natural, mentions, rewrite_weak_opener,
    vague_scale_word,
};

/// Keywords pulled from the job description before filtering by the summary.
const KEYWORD_LIMIT: usize = 8;
/// Keywords appended to the summary at most.
const SUMMARY_KEYWORDS: usize = 3;

const BASE_CONFIDENCE: f32 = 0.5;
const MAX_CONFIDENCE: f32 = 0.9;

#[async_trait]
pub trait Enhancer: Send + Sync {
    async fn enhance(
        &self,
        job_description: &str,
        resume: &ResumeSection,
    ) -> Result<Vec<Suggestion>, AppError>;
}

/// Rewrites weak bullet openers and tops the summary up with job-description
/// keywords it does not mention yet.
pub struct RuleBasedEnhancer;

#[async_trait]
impl Enhancer for RuleBasedEnhancer {
    async fn enhance(
        &self,
        job_description: &str,
        resume: &ResumeSection,
    ) -> Result<Vec<Suggestion>, AppError> {
        Ok(rule_based_suggestions(job_description, resume))
    }
}

pub fn rule_based_suggestions(job_description: &str, resume: &ResumeSection) -> Vec<Suggestion> {
    let keywords = extract_keywords(job_description, KEYWORD_LIMIT);
    let mut suggestions = Vec::new();

    if let Some(s) = summary_suggestion(&resume.personal_summary, &keywords) {
        suggestions.push(s);
    }

    for (entry, experience) in resume.work_experience.iter().enumerate() {
        for (bullet, text) in experience.bullets.iter().enumerate() {
            let target = SuggestionTarget::ExperienceBullet { entry, bullet };
            suggestions.extend(line_suggestion(target, text, &keywords));
        }
    }

    for (index, project) in resume.projects.iter().enumerate() {
        let target = SuggestionTarget::ProjectDescription { project: index };
        suggestions.extend(line_suggestion(target, &project.description, &keywords));
        for (bullet, text) in project.bullets.iter().enumerate() {
            let target = SuggestionTarget::ProjectBullet {
                project: index,
                bullet,
            };
            suggestions.extend(line_suggestion(target, text, &keywords));
        }
    }

    suggestions
}

fn summary_suggestion(summary: &str, keywords: &[String]) -> Option<Suggestion> {
    let missing: Vec<String> = keywords
        .iter()
        .filter(|k| !mentions(summary, k))
        .take(SUMMARY_KEYWORDS)
        .cloned()
        .collect();
    if missing.is_empty() {
        return None;
    }

    let addition = format!("Experienced with {}.", join_natural(&missing));
    let trimmed = summary.trim_end();
    let enhanced = match trimmed.chars().last() {
        None => addition,
        Some('.' | '!' | '?') => format!("{trimmed} {addition}"),
        Some(_) => format!("{trimmed}. {addition}"),
    };

    Some(Suggestion {
        id: Uuid::new_v4(),
        target: SuggestionTarget::PersonalSummary,
        original: summary.to_string(),
        enhanced,
        confidence: (BASE_CONFIDENCE + 0.1 * missing.len() as f32).min(MAX_CONFIDENCE),
        reasoning: format!(
            "The job description stresses {} but the summary does not mention it",
            join_natural(&missing)
        ),
    })
}

fn line_suggestion(target: SuggestionTarget, text: &str, keywords: &[String]) -> Option<Suggestion> {
    let (enhanced, weak) = rewrite_weak_opener(text)?;

    let mut confidence = BASE_CONFIDENCE + 0.2;
    let mut reasons = vec![format!("'{weak}' undersells the work; lead with an action verb")];

    if is_quantified(text) {
        confidence += 0.1;
    } else if let Some(word) = vague_scale_word(text) {
        reasons.push(format!("replace '{word}' with a number"));
    } else {
        reasons.push("add a measurable outcome".to_string());
    }

    let relevant: Vec<String> = keywords
        .iter()
        .filter(|k| mentions(text, k))
        .cloned()
        .collect();
    if !relevant.is_empty() {
        confidence += 0.1;
        reasons.push(format!("already mentions {}", join_natural(&relevant)));
    }

    Some(Suggestion {
        id: Uuid::new_v4(),
        target,
        original: text.to_string(),
        enhanced,
        confidence: confidence.min(MAX_CONFIDENCE),
        reasoning: reasons.join("; "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Project, WorkExperience};

    const JD: &str = "Backend engineer. Rust, Kubernetes, Kafka. Rust services on Kubernetes.";

    fn resume() -> ResumeSection {
        ResumeSection {
            personal_summary: "Backend engineer who enjoys Rust".to_string(),
            work_experience: vec![WorkExperience {
                company: "Acme".to_string(),
                title: "Engineer".to_string(),
                bullets: vec![
                    "Worked on Rust services handling 10k rps".to_string(),
                    "Built the deploy pipeline".to_string(),
                    "Helped with many migrations".to_string(),
                ],
                ..Default::default()
            }],
            projects: vec![Project {
                name: "Tracker".to_string(),
                description: "Responsible for the sync engine".to_string(),
                bullets: vec![],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_gets_missing_keywords() {
        let suggestions = rule_based_suggestions(JD, &resume());
        let summary = suggestions
            .iter()
            .find(|s| s.target == SuggestionTarget::PersonalSummary)
            .unwrap();
        assert_eq!(summary.original, "Backend engineer who enjoys Rust");
        assert_eq!(
            summary.enhanced,
            "Backend engineer who enjoys Rust. Experienced with Kubernetes, Kafka and services."
        );
    }

    #[test]
    fn test_weak_bullets_are_rewritten() {
        let suggestions = rule_based_suggestions(JD, &resume());

        let first = suggestions
            .iter()
            .find(|s| s.target == SuggestionTarget::ExperienceBullet { entry: 0, bullet: 0 })
            .unwrap();
        assert_eq!(first.enhanced, "Developed Rust services handling 10k rps");
        assert!((first.confidence - 0.9).abs() < 1e-6);

        let third = suggestions
            .iter()
            .find(|s| s.target == SuggestionTarget::ExperienceBullet { entry: 0, bullet: 2 })
            .unwrap();
        assert_eq!(third.enhanced, "Collaborated on many migrations");
        assert!(third.reasoning.contains("replace 'many' with a number"));
        assert!((third.confidence - 0.7).abs() < 1e-6);

        assert!(!suggestions
            .iter()
            .any(|s| s.target == SuggestionTarget::ExperienceBullet { entry: 0, bullet: 1 }));
    }

    #[test]
    fn test_project_description_is_rewritten() {
        let suggestions = rule_based_suggestions(JD, &resume());
        let description = suggestions
            .iter()
            .find(|s| s.target == SuggestionTarget::ProjectDescription { project: 0 })
            .unwrap();
        assert_eq!(description.enhanced, "Took ownership of the sync engine");
    }

    #[test]
    fn test_confidence_stays_in_range() {
        for s in rule_based_suggestions(JD, &resume()) {
            assert!((0.5..=0.9).contains(&s.confidence), "{s:?}");
        }
    }

    #[test]
    fn test_empty_resume_only_gets_summary_suggestion() {
        let suggestions = rule_based_suggestions(JD, &ResumeSection::default());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].original, "");
        assert_eq!(
            suggestions[0].enhanced,
            "Experienced with Rust, Kubernetes and Backend."
        );
    }

    #[tokio::test]
    async fn test_enhancer_trait_object() {
        let enhancer: Box<dyn Enhancer> = Box::new(RuleBasedEnhancer);
        let suggestions = enhancer.enhance(JD, &resume()).await.unwrap();
        assert!(!suggestions.is_empty());
    }
}
