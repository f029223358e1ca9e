//! Model output as it moves from raw text to a validated entity.

use thiserror::Error;

use crate::json_repair::{repair_json, RepairError, Repaired};
use crate::schema::{validate, Schema, ValidationError};

/// Stages of a model response. Conversions only move forward.
#[derive(Debug)]
pub enum ModelOutput<T> {
    RawText(String),
    Parsed { raw: String, repaired: Repaired },
    Validated(T),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error(transparent)]
    Repair(#[from] RepairError),

    #[error("{error}")]
    Validation {
        error: ValidationError,
        raw: String,
        repaired: String,
    },
}

impl<T> ModelOutput<T> {
    pub fn stage(&self) -> &'static str {
        match self {
            ModelOutput::RawText(_) => "raw",
            ModelOutput::Parsed { .. } => "parsed",
            ModelOutput::Validated(_) => "validated",
        }
    }
}

impl<T: Schema> ModelOutput<T> {
    /// Moves one stage forward. A validated output stays where it is.
    pub fn advance(self) -> Result<Self, OutputError> {
        match self {
            ModelOutput::RawText(raw) => {
                let repaired = repair_json(&raw)?;
                Ok(ModelOutput::Parsed { raw, repaired })
            }
            ModelOutput::Parsed { raw, repaired } => {
                let Repaired { text, value, .. } = repaired;
                validate::<T>(value)
                    .map(ModelOutput::Validated)
                    .map_err(|error| OutputError::Validation {
                        error,
                        raw,
                        repaired: text,
                    })
            }
            validated @ ModelOutput::Validated(_) => Ok(validated),
        }
    }

    /// Advances until validated.
    pub fn into_validated(self) -> Result<T, OutputError> {
        let mut output = self;
        loop {
            match output {
                ModelOutput::Validated(value) => return Ok(value),
                pending => output = pending.advance()?,
            }
        }
    }
}
