use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The resume field a suggestion rewrites. Indices refer to the resume the
/// suggestion was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SuggestionTarget {
    PersonalSummary,
    ExperienceBullet { entry: usize, bullet: usize },
    ProjectDescription { project: usize },
    ProjectBullet { project: usize, bullet: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: Uuid,
    pub target: SuggestionTarget,
    pub original: String,
    pub enhanced: String,
    /// 0.5 – 0.9; grows with the number of rules that fired.
    pub confidence: f32,
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_serializes_with_kind_tag() {
        let json = serde_json::to_value(SuggestionTarget::ExperienceBullet { entry: 1, bullet: 2 })
            .unwrap();
        assert_eq!(json["kind"], "experienceBullet");
        assert_eq!(json["entry"], 1);
        assert_eq!(json["bullet"], 2);

        let json = serde_json::to_value(SuggestionTarget::PersonalSummary).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "personalSummary" }));
    }
}
