use serde::{Deserialize, Serialize};

use crate::models::scoring::{warn_on_section_mismatch, SectionName};
use crate::schema::{Field, FieldKind, Schema};

/// A rewrite as the model returned it, before the section is fixed.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionOptimizationDraft {
    pub section_name: Option<String>,
    pub original_content: String,
    pub optimized_content: String,
    pub improvements: Vec<String>,
    pub keywords_added: Vec<String>,
}

impl Schema for SectionOptimizationDraft {
    const NAME: &'static str = "SectionOptimization";
    const FIELDS: &'static [Field] = &[
        Field::optional("section_name", FieldKind::OptionalText),
        Field::optional("original_content", FieldKind::Text),
        Field::required("optimized_content", FieldKind::Text),
        Field::optional("improvements", FieldKind::TextList),
        Field::optional("keywords_added", FieldKind::TextList),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionOptimization {
    pub section_name: SectionName,
    pub original_content: String,
    pub optimized_content: String,
    pub improvements: Vec<String>,
    pub keywords_added: Vec<String>,
}

impl SectionOptimization {
    pub fn new(section: SectionName, draft: SectionOptimizationDraft) -> Self {
        warn_on_section_mismatch(section, draft.section_name.as_deref());
        Self {
            section_name: section,
            original_content: draft.original_content,
            optimized_content: draft.optimized_content,
            improvements: draft.improvements,
            keywords_added: draft.keywords_added,
        }
    }
}

/// Merged output of the optimization graph. Sections that produced nothing are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub summary: Option<SectionOptimization>,
    pub experience: Vec<SectionOptimization>,
    pub skills: Option<SectionOptimization>,
    pub projects: Vec<SectionOptimization>,
    pub education: Vec<SectionOptimization>,
    pub overall_improvements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate;
    use serde_json::json;

    #[test]
    fn test_list_content_joined_before_construction() {
        let draft: SectionOptimizationDraft = validate(json!({
            "section_name": "skills",
            "original_content": ["Rust", "Go"],
            "optimized_content": ["Languages: Rust, Go.", "Cloud: AWS."],
            "keywords_added": "AWS"
        }))
        .unwrap();
        let opt = SectionOptimization::new(SectionName::Skills, draft);
        assert_eq!(opt.original_content, "Rust Go");
        assert_eq!(opt.optimized_content, "Languages: Rust, Go. Cloud: AWS.");
        assert_eq!(opt.keywords_added, vec!["AWS"]);
        assert!(opt.improvements.is_empty());
    }

    #[test]
    fn test_missing_optimized_content_rejected() {
        let err =
            validate::<SectionOptimizationDraft>(json!({"original_content": "x"})).unwrap_err();
        assert_eq!(err.path, "$.optimized_content");
        assert_eq!(err.received, "missing");
    }

    #[test]
    fn test_result_serializes_absent_sections_as_null() {
        let value = serde_json::to_value(OptimizationResult::default()).unwrap();
        assert_eq!(value["summary"], json!(null));
        assert_eq!(value["experience"], json!([]));
    }
}
