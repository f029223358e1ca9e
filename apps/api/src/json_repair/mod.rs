//! JSON Response Repair: turns almost-valid model output into parseable JSON.
//!
//! Strategies run in order and each is attempted only if the previous one
//! failed to produce a JSON object or array:
//!
//! 1. Fence/boundary strip: drop markdown fences, slice from the first `{`/`[`
//!    to its structurally matching close.
//! 2. Stray-token filter: drop non-JSON characters outside strings, then
//!    remove trailing commas.
//! 3. Depth-matched re-extraction: over the whole unfenced, filtered text,
//!    slice from the first `{` to the brace that returns depth to zero,
//!    discarding whatever precedes or follows.
//!
//! Input that already parses is returned untouched.

pub mod scanner;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::json_repair::scanner::{
    find_span, strip_fences, strip_stray_tokens, strip_trailing_commas,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStrategy {
    Verbatim,
    BoundaryStrip,
    StrayTokenFilter,
    DepthReextract,
}

/// A successfully repaired model response.
#[derive(Debug, Clone)]
pub struct Repaired {
    pub text: String,
    pub value: Value,
    pub strategy: RepairStrategy,
}

#[derive(Debug, Error)]
pub enum RepairError {
    #[error("model response was empty")]
    Empty,

    #[error("no JSON could be recovered after all repair strategies: {reason}")]
    Exhausted {
        reason: String,
        last_attempt: String,
        raw: String,
    },
}

impl RepairError {
    /// The last text handed to the parser, if any strategy ran.
    pub fn last_attempt(&self) -> Option<&str> {
        match self {
            RepairError::Empty => None,
            RepairError::Exhausted { last_attempt, .. } => Some(last_attempt),
        }
    }
}

/// Parses `text`, accepting only a top-level object or array.
fn parse_container(text: &str) -> Result<Value, String> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => Ok(value),
        Ok(other) => Err(format!("expected an object or array, found {}", type_name(&other))),
        Err(e) => Err(e.to_string()),
    }
}

/// Runs the repair strategies over a raw model response.
pub fn repair_json(raw: &str) -> Result<Repaired, RepairError> {
    if raw.trim().is_empty() {
        return Err(RepairError::Empty);
    }

    if let Ok(value) = parse_container(raw) {
        return Ok(Repaired {
            text: raw.to_string(),
            value,
            strategy: RepairStrategy::Verbatim,
        });
    }

    let unfenced = strip_fences(raw);
    let bounded = match find_span(&unfenced, &['{', '[']) {
        Some(span) => span.slice(&unfenced).trim().to_string(),
        None => unfenced.clone(),
    };

    if let Ok(repaired) = attempt(bounded.clone(), RepairStrategy::BoundaryStrip) {
        return Ok(repaired);
    }

    let filtered = strip_trailing_commas(&strip_stray_tokens(&bounded));
    if let Ok(repaired) = attempt(filtered.clone(), RepairStrategy::StrayTokenFilter) {
        return Ok(repaired);
    }

    // Strategy 1 may have cut at a `[` in leading prose; rescan everything.
    let whole = strip_trailing_commas(&strip_stray_tokens(&unfenced));
    let reextracted = match find_span(&whole, &['{']) {
        Some(span) => strip_trailing_commas(span.slice(&whole)),
        None => filtered,
    };
    attempt(reextracted.clone(), RepairStrategy::DepthReextract).map_err(|reason| {
        RepairError::Exhausted {
            reason,
            last_attempt: reextracted,
            raw: raw.to_string(),
        }
    })
}

fn attempt(text: String, strategy: RepairStrategy) -> Result<Repaired, String> {
    match parse_container(&text) {
        Ok(value) => {
            info!("Recovered model JSON with {:?} strategy", strategy);
            Ok(Repaired {
                text,
                value,
                strategy,
            })
        }
        Err(e) => {
            debug!("{:?} strategy failed: {}", strategy, e);
            Err(e)
        }
    }
}

/// JSON type name used in diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
