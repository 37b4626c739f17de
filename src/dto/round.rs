use chrono::{DateTime, Utc};
use rocket_okapi::okapi::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::controller::{Course, GolfRound, ScoreBreakdown};

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StartRound {
    pub course_id: String,
    /// Defaults to now.
    pub date: Option<DateTime<Utc>>,
}

#[derive(Deserialize, JsonSchema, Debug, Clone, Copy)]
pub struct ScoreUpdate {
    pub strokes: u8,
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
pub struct RoundEdit {
    pub scores: Vec<Option<u8>>,
    pub date: Option<DateTime<Utc>>,
}

/// A row in the past rounds list.
#[derive(Serialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoundListing {
    pub id: String,
    pub course_id: String,
    pub course_name: String,
    pub date: DateTime<Utc>,
    pub display_date: String,
    pub total_score: u32,
    pub is_completed: bool,
}

impl RoundListing {
    pub fn new(round: &GolfRound, course_name: String) -> Self {
        Self {
            id: round.id.clone(),
            course_id: round.course_id.clone(),
            course_name,
            date: round.date,
            display_date: round.display_date(),
            total_score: round.total_score(),
            is_completed: round.is_completed,
        }
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoundDetail {
    pub round: GolfRound,
    pub course_name: String,
    pub total_score: u32,
    pub total_par: u32,
    pub relative_to_par: i64,
    /// `"87 (+15)"`
    pub display: String,
    pub breakdown: ScoreBreakdown,
}

impl RoundDetail {
    pub fn new(round: GolfRound, course: &Course) -> Self {
        Self {
            course_name: course.name.clone(),
            total_score: round.total_score(),
            total_par: course.total_par(),
            relative_to_par: round.relative_to_par(course),
            display: round.score_display(course),
            breakdown: round.breakdown(course),
            round,
        }
    }
}
