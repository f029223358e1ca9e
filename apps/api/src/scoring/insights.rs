//! Strengths, weaknesses and next steps derived from a final score.

use serde::{Deserialize, Serialize};

use crate::models::scoring::{FinalScore, SectionScore};

const STRONG_SECTION: f64 = 70.0;
const WEAK_SECTION: f64 = 60.0;
const MAX_ITEMS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInsights {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub next_steps: Vec<String>,
}

impl ScoreInsights {
    pub fn from_final_score(score: &FinalScore) -> Self {
        let strengths = score
            .section_scores
            .iter()
            .filter(|s| s.score >= STRONG_SECTION)
            .flat_map(|s| s.reasons.iter().take(2).cloned())
            .take(MAX_ITEMS)
            .collect();

        let weaknesses = score
            .section_scores
            .iter()
            .filter(|s| s.score < WEAK_SECTION)
            .flat_map(|s| s.missing_requirements.iter().take(2).cloned())
            .take(MAX_ITEMS)
            .collect();

        Self {
            strengths,
            weaknesses,
            next_steps: next_steps(score),
        }
    }
}

fn next_steps(score: &FinalScore) -> Vec<String> {
    let lowest = score
        .section_scores
        .iter()
        .fold(None, |low: Option<&SectionScore>, s| match low {
            Some(l) if l.score <= s.score => Some(l),
            _ => Some(s),
        });

    let mut steps = Vec::new();
    if let Some(lowest) = lowest {
        if lowest.score < STRONG_SECTION && !lowest.missing_requirements.is_empty() {
            steps.push(format!("Focus on improving {}", lowest.section_name));
            steps.extend(
                lowest
                    .missing_requirements
                    .iter()
                    .take(3)
                    .map(|req| format!("Add: {req}")),
            );
        }
    }

    if steps.is_empty() {
        steps = vec![
            "Continue building relevant experience".to_string(),
            "Highlight key achievements with metrics".to_string(),
            "Keep skills section updated with latest technologies".to_string(),
        ];
    }

    steps.truncate(MAX_ITEMS);
    steps
}
