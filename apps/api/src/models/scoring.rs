use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::schema::{Field, FieldKind, Schema};

/// Resume sections known to the scoring and optimization graphs.
///
/// Declaration order is the fixed tie-break and error-reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    Skills,
    Experience,
    Education,
    Projects,
    Meta,
    Summary,
}

impl SectionName {
    /// Sections scored by the scoring graph, in aggregation order.
    pub const SCORED: [SectionName; 5] = [
        SectionName::Skills,
        SectionName::Experience,
        SectionName::Education,
        SectionName::Projects,
        SectionName::Meta,
    ];

    /// Sections rewritten by the optimization graph.
    pub const OPTIMIZED: [SectionName; 5] = [
        SectionName::Summary,
        SectionName::Experience,
        SectionName::Skills,
        SectionName::Projects,
        SectionName::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Skills => "skills",
            SectionName::Experience => "experience",
            SectionName::Education => "education",
            SectionName::Projects => "projects",
            SectionName::Meta => "meta",
            SectionName::Summary => "summary",
        }
    }

    /// Weight of this section in the overall score. Summary is not scored.
    pub fn score_weight(&self) -> f64 {
        match self {
            SectionName::Skills => 0.35,
            SectionName::Experience => 0.35,
            SectionName::Education => 0.15,
            SectionName::Projects => 0.10,
            SectionName::Meta => 0.05,
            SectionName::Summary => 0.0,
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logs a model-declared section name that disagrees with the caller's.
pub(crate) fn warn_on_section_mismatch(expected: SectionName, declared: Option<&str>) {
    if let Some(declared) = declared {
        if !declared.trim().eq_ignore_ascii_case(expected.as_str()) {
            warn!(
                "Model labelled {} output as '{}', keeping '{}'",
                expected, declared, expected
            );
        }
    }
}

/// A section score as the model returned it, before the section is fixed.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionScoreDraft {
    pub section_name: Option<String>,
    pub score: f64,
    pub reasons: Vec<String>,
    pub missing_requirements: Vec<String>,
}

impl Schema for SectionScoreDraft {
    const NAME: &'static str = "SectionScore";
    const FIELDS: &'static [Field] = &[
        Field::optional("section_name", FieldKind::OptionalText),
        Field::required("score", FieldKind::Number),
        Field::optional("reasons", FieldKind::TextList),
        Field::optional("missing_requirements", FieldKind::TextList),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub section_name: SectionName,
    /// Always within 0–100.
    pub score: f64,
    pub reasons: Vec<String>,
    pub missing_requirements: Vec<String>,
}

impl SectionScore {
    /// Builds the score for `section`, overriding whatever the model claimed
    /// and clamping the score into range.
    pub fn new(section: SectionName, draft: SectionScoreDraft) -> Self {
        warn_on_section_mismatch(section, draft.section_name.as_deref());
        Self {
            section_name: section,
            score: draft.score.clamp(0.0, 100.0),
            reasons: draft.reasons,
            missing_requirements: draft.missing_requirements,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalScore {
    pub overall_score: f64,
    pub section_scores: Vec<SectionScore>,
    pub comments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate;
    use serde_json::json;

    #[test]
    fn test_section_name_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(SectionName::Experience).unwrap(),
            json!("experience")
        );
    }

    #[test]
    fn test_scored_weights_sum_to_one() {
        let total: f64 = SectionName::SCORED.iter().map(|s| s.score_weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_expected_section_overrides_model_claim() {
        let draft: SectionScoreDraft = validate(json!({
            "section_name": "projects",
            "score": 64,
            "reasons": ["Rust services"]
        }))
        .unwrap();
        let score = SectionScore::new(SectionName::Skills, draft);
        assert_eq!(score.section_name, SectionName::Skills);
        assert!(score.missing_requirements.is_empty());
    }

    #[test]
    fn test_score_clamped() {
        let high: SectionScoreDraft = validate(json!({"score": 140})).unwrap();
        assert_eq!(SectionScore::new(SectionName::Meta, high).score, 100.0);
        let low: SectionScoreDraft = validate(json!({"score": "-5"})).unwrap();
        assert_eq!(SectionScore::new(SectionName::Meta, low).score, 0.0);
    }

    #[test]
    fn test_missing_score_rejected() {
        let err = validate::<SectionScoreDraft>(json!({"reasons": []})).unwrap_err();
        assert_eq!(err.path, "$.score");
    }
}
