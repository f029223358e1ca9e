//! Aggregator: weighted overall score and narrative comments.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::models::scoring::{FinalScore, SectionName, SectionScore};

/// Renormalized weighted mean over the sections that are present.
pub fn overall_score(scores: &[SectionScore]) -> f64 {
    let (weighted, total) = scores.iter().fold((0.0, 0.0), |(sum, weight), s| {
        let w = s.section_name.score_weight();
        (sum + s.score * w, weight + w)
    });

    if total > 0.0 {
        round2(weighted / total)
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn tier_remark(overall: f64) -> &'static str {
    if overall >= 80.0 {
        "Excellent overall match with the job requirements."
    } else if overall >= 60.0 {
        "Good overall match with some areas for improvement."
    } else if overall >= 40.0 {
        "Moderate match. Consider strengthening key areas."
    } else {
        "Weak match. Significant improvements needed to align with job requirements."
    }
}

/// Highest and lowest scoring sections. Ties go to the earlier section.
fn extremes(scores: &[SectionScore]) -> Option<(&SectionScore, &SectionScore)> {
    let first = scores.first()?;
    let (mut highest, mut lowest) = (first, first);
    for s in &scores[1..] {
        if s.score > highest.score {
            highest = s;
        }
        if s.score < lowest.score {
            lowest = s;
        }
    }
    Some((highest, lowest))
}

pub fn comments(overall: f64, scores: &[SectionScore]) -> Vec<String> {
    let mut comments = vec![tier_remark(overall).to_string()];

    if let Some((highest, lowest)) = extremes(scores) {
        if highest.score >= 80.0 {
            comments.push(format!(
                "Strong match in {} section ({}/100)",
                highest.section_name, highest.score
            ));
        } else if highest.score >= 60.0 {
            comments.push(format!(
                "Good match in {} section ({}/100)",
                highest.section_name, highest.score
            ));
        }

        if lowest.score < 50.0 {
            comments.push(format!(
                "Needs improvement in {} section ({}/100)",
                lowest.section_name, lowest.score
            ));
            if !lowest.missing_requirements.is_empty() {
                let missing: Vec<&str> = lowest
                    .missing_requirements
                    .iter()
                    .take(3)
                    .map(String::as_str)
                    .collect();
                comments.push(format!("Missing: {}", missing.join(", ")));
            }
        }
    }

    comments
}

/// Builds the final score from whichever scored sections are present.
pub fn aggregate_scores(mut by_section: BTreeMap<SectionName, SectionScore>) -> FinalScore {
    let mut section_scores = Vec::with_capacity(SectionName::SCORED.len());
    for section in SectionName::SCORED {
        match by_section.remove(&section) {
            Some(score) => section_scores.push(score),
            None => warn!("Missing score for section: {section}"),
        }
    }

    let overall = overall_score(&section_scores);
    if section_scores.is_empty() {
        warn!("No valid scores found, overall score set to 0");
    }
    info!("Final aggregated score: {overall:.2}/100");

    FinalScore {
        overall_score: overall,
        comments: comments(overall, &section_scores),
        section_scores,
    }
}
