use rocket_okapi::okapi::schemars;
use schemars::JsonSchema;
use serde::Serialize;

use crate::controller::{Handicap, HandicapError};

/// Either an index, or the reason there is none yet. Never a zero stand-in.
#[derive(Serialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HandicapReport {
    #[serde(rename_all = "camelCase")]
    Available {
        index: f64,
        recent_scores: Vec<u32>,
        differentials_used: Vec<f64>,
    },
    #[serde(rename_all = "camelCase")]
    InsufficientData {
        rounds_available: usize,
        rounds_required: usize,
    },
}

impl From<Result<Handicap, HandicapError>> for HandicapReport {
    fn from(result: Result<Handicap, HandicapError>) -> Self {
        match result {
            Ok(handicap) => Self::Available {
                index: handicap.index,
                recent_scores: handicap.recent_scores,
                differentials_used: handicap.differentials_used,
            },
            Err(HandicapError::InsufficientData {
                available,
                required,
            }) => Self::InsufficientData {
                rounds_available: available,
                rounds_required: required,
            },
        }
    }
}
