//! Section weight proposal and normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::jd_analysis::prompts::{WEIGHTS_PROMPT_TEMPLATE, WEIGHTS_SYSTEM};
use crate::jd_analysis::requirements::JobRequirements;
use crate::llm_client::prompts::{compose, JSON_OBJECT_ONLY};
use crate::schema::{Field, FieldKind, Schema};
use crate::sections::scoring::SCORING_JD_CHARS;
use crate::sections::{TaskContext, TaskError};
use crate::text::truncate_for_prompt;

pub const DEFAULT_STRATEGY: &str = "General optimization based on job requirements";

const PROMPT_SKILLS: usize = 10;
const PROMPT_RESPONSIBILITIES: usize = 5;

/// Relative emphasis per optimized section; always sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionWeights {
    pub summary: f64,
    pub skills: f64,
    pub experience: f64,
    pub projects: f64,
    pub education: f64,
}

impl Default for SectionWeights {
    fn default() -> Self {
        Self {
            summary: 0.10,
            skills: 0.30,
            experience: 0.35,
            projects: 0.15,
            education: 0.10,
        }
    }
}

/// A proposed weight: numbers and numeric strings count, anything else is 0.
fn weight_value(section: &str, value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(w) if w.is_finite() && w >= 0.0 => w,
        _ => {
            warn!("Invalid weight for {section}: {value}, using 0");
            0.0
        }
    }
}

impl SectionWeights {
    /// Normalizes a model proposal. Sections the proposal omits take their
    /// default weight; a non-positive total falls back to the defaults.
    pub fn from_proposal(proposal: Option<&Value>) -> Self {
        let defaults = Self::default();
        let Some(map) = proposal.and_then(Value::as_object) else {
            warn!("No section weights proposed, using defaults");
            return defaults;
        };
        let pick = |section: &str, default: f64| match map.get(section) {
            Some(value) => weight_value(section, value),
            None => default,
        };

        let raw = Self {
            summary: pick("summary", defaults.summary),
            skills: pick("skills", defaults.skills),
            experience: pick("experience", defaults.experience),
            projects: pick("projects", defaults.projects),
            education: pick("education", defaults.education),
        };

        let total = raw.total();
        if !(total.is_finite() && total > 0.0) {
            warn!("Proposed weights sum to {total}, using defaults");
            return defaults;
        }

        Self {
            summary: raw.summary / total,
            skills: raw.skills / total,
            experience: raw.experience / total,
            projects: raw.projects / total,
            education: raw.education / total,
        }
    }

    pub fn total(&self) -> f64 {
        self.summary + self.skills + self.experience + self.projects + self.education
    }
}

/// Weight proposal as the model reports it. `sectionWeights` is read raw and
/// normalized separately.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeightProposal {
    pub section_weights: Option<Value>,
    pub focus_areas: Vec<String>,
    pub optimization_strategy: Option<String>,
}

impl Schema for WeightProposal {
    const NAME: &'static str = "WeightStrategy";
    const FIELDS: &'static [Field] = &[
        Field::optional("focusAreas", FieldKind::TextList),
        Field::optional("optimizationStrategy", FieldKind::OptionalText),
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightStrategy {
    pub section_weights: SectionWeights,
    pub focus_areas: Vec<String>,
    pub optimization_strategy: String,
}

impl From<WeightProposal> for WeightStrategy {
    fn from(proposal: WeightProposal) -> Self {
        Self {
            section_weights: SectionWeights::from_proposal(proposal.section_weights.as_ref()),
            focus_areas: proposal.focus_areas,
            optimization_strategy: proposal
                .optimization_strategy
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STRATEGY.to_string()),
        }
    }
}

fn listed(items: &[String], limit: usize) -> String {
    if items.is_empty() {
        return "Not specified".to_string();
    }
    items.iter().take(limit).cloned().collect::<Vec<_>>().join(", ")
}

pub fn weights_prompt(jd: &str, requirements: &JobRequirements) -> String {
    let system = WEIGHTS_SYSTEM.replace("{json_only}", JSON_OBJECT_ONLY);
    let user = WEIGHTS_PROMPT_TEMPLATE
        .replace("{role}", &requirements.role)
        .replace("{seniority}", &requirements.seniority)
        .replace("{key_skills}", &listed(&requirements.key_skills, PROMPT_SKILLS))
        .replace(
            "{key_responsibilities}",
            &listed(&requirements.key_responsibilities, PROMPT_RESPONSIBILITIES),
        )
        .replace("{jd}", &truncate_for_prompt(jd, SCORING_JD_CHARS));
    compose(&system, &user)
}

pub async fn propose_weights(
    ctx: &TaskContext,
    jd: &str,
    requirements: &JobRequirements,
) -> Result<WeightStrategy, TaskError> {
    info!("Starting section weight proposal");

    let prompt = weights_prompt(jd, requirements);
    let proposal: WeightProposal = ctx
        .request("weight proposal", &prompt, ctx.profiles.scoring)
        .await?;
    let strategy = WeightStrategy::from(proposal);

    info!(
        "Weight proposal complete: {:?}, focus={:?}",
        strategy.section_weights, strategy.focus_areas
    );
    Ok(strategy)
}
