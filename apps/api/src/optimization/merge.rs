//! Merges per-section rewrites into one `OptimizationResult`.

use std::collections::{BTreeMap, HashSet};

use tracing::{info, warn};

use crate::models::optimization::{OptimizationResult, SectionOptimization};
use crate::models::scoring::SectionName;

const MAX_KEYWORDS: usize = 10;

/// What one optimization branch produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionOutput {
    Single(SectionOptimization),
    Entries(Vec<SectionOptimization>),
}

impl SectionOutput {
    fn into_single(self) -> Option<SectionOptimization> {
        match self {
            SectionOutput::Single(opt) => Some(opt),
            SectionOutput::Entries(mut entries) => {
                if entries.len() > 1 {
                    warn!("Expected one rewrite, keeping the first of {}", entries.len());
                }
                (!entries.is_empty()).then(|| entries.swap_remove(0))
            }
        }
    }

    fn into_entries(self) -> Vec<SectionOptimization> {
        match self {
            SectionOutput::Single(opt) => vec![opt],
            SectionOutput::Entries(entries) => entries,
        }
    }
}

/// Keywords across all rewrites, first occurrence kept.
fn unique_keywords(result: &OptimizationResult) -> Vec<&str> {
    let ordered = result
        .summary
        .iter()
        .chain(result.skills.iter())
        .chain(result.experience.iter())
        .chain(result.projects.iter())
        .chain(result.education.iter());

    let mut seen = HashSet::new();
    let mut keywords = Vec::new();
    for opt in ordered {
        for keyword in &opt.keywords_added {
            let keyword = keyword.trim();
            if !keyword.is_empty() && seen.insert(keyword) {
                keywords.push(keyword);
            }
        }
    }
    keywords
}

fn optimized_count(result: &OptimizationResult) -> usize {
    usize::from(result.summary.is_some())
        + usize::from(result.skills.is_some())
        + result.experience.len()
        + result.projects.len()
        + result.education.len()
}

pub fn merge_optimizations(mut outputs: BTreeMap<SectionName, SectionOutput>) -> OptimizationResult {
    let mut take = |section| outputs.remove(&section);

    let mut result = OptimizationResult {
        summary: take(SectionName::Summary).and_then(SectionOutput::into_single),
        skills: take(SectionName::Skills).and_then(SectionOutput::into_single),
        experience: take(SectionName::Experience)
            .map(SectionOutput::into_entries)
            .unwrap_or_default(),
        projects: take(SectionName::Projects)
            .map(SectionOutput::into_entries)
            .unwrap_or_default(),
        education: take(SectionName::Education)
            .map(SectionOutput::into_entries)
            .unwrap_or_default(),
        overall_improvements: vec![],
    };

    let keywords = unique_keywords(&result);
    let mut improvements = Vec::new();
    if !keywords.is_empty() {
        let shown: Vec<&str> = keywords.into_iter().take(MAX_KEYWORDS).collect();
        improvements.push(format!("Keywords incorporated: {}", shown.join(", ")));
    }

    let count = optimized_count(&result);
    if count > 0 {
        improvements.push(format!("Optimized {count} section(s) for better ATS match"));
    }

    info!("Merged optimizations: {count} section(s)");
    result.overall_improvements = improvements;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(section: SectionName, keywords: &[&str]) -> SectionOptimization {
        SectionOptimization {
            section_name: section,
            original_content: "before".into(),
            optimized_content: "after".into(),
            improvements: vec![],
            keywords_added: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_keywords_deduplicated_in_first_seen_order() {
        let mut outputs = BTreeMap::new();
        outputs.insert(
            SectionName::Experience,
            SectionOutput::Entries(vec![
                opt(SectionName::Experience, &["Kafka", "Rust"]),
                opt(SectionName::Experience, &["gRPC"]),
            ]),
        );
        outputs.insert(
            SectionName::Summary,
            SectionOutput::Single(opt(SectionName::Summary, &["Rust", "Axum"])),
        );
        outputs.insert(
            SectionName::Skills,
            SectionOutput::Single(opt(SectionName::Skills, &["Axum", "Tokio"])),
        );

        let result = merge_optimizations(outputs);

        assert_eq!(
            result.overall_improvements,
            vec![
                "Keywords incorporated: Rust, Axum, Tokio, Kafka, gRPC",
                "Optimized 4 section(s) for better ATS match",
            ]
        );
    }

    #[test]
    fn test_keywords_capped_at_ten() {
        let many: Vec<String> = (0..14).map(|i| format!("k{i}")).collect();
        let refs: Vec<&str> = many.iter().map(String::as_str).collect();
        let mut outputs = BTreeMap::new();
        outputs.insert(
            SectionName::Skills,
            SectionOutput::Single(opt(SectionName::Skills, &refs)),
        );

        let result = merge_optimizations(outputs);
        assert_eq!(
            result.overall_improvements[0],
            "Keywords incorporated: k0, k1, k2, k3, k4, k5, k6, k7, k8, k9"
        );
    }

    #[test]
    fn test_missing_sections_omitted() {
        let mut outputs = BTreeMap::new();
        outputs.insert(SectionName::Projects, SectionOutput::Entries(vec![]));
        outputs.insert(
            SectionName::Education,
            SectionOutput::Entries(vec![opt(SectionName::Education, &[])]),
        );

        let result = merge_optimizations(outputs);

        assert!(result.summary.is_none());
        assert!(result.skills.is_none());
        assert!(result.projects.is_empty());
        assert_eq!(result.education.len(), 1);
        assert_eq!(
            result.overall_improvements,
            vec!["Optimized 1 section(s) for better ATS match"]
        );
    }

    #[test]
    fn test_nothing_optimized_has_no_improvements() {
        let result = merge_optimizations(BTreeMap::new());
        assert_eq!(result, OptimizationResult::default());
    }
}
