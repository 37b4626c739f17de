use itertools::Itertools;
use rocket_okapi::okapi::schemars;
use schemars::JsonSchema;
use serde::Serialize;

use super::round::GolfRound;

/// Career numbers over full rounds only. The score fields are absent until a
/// full round exists.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub rounds_played: usize,
    pub average_score: Option<f64>,
    pub best_score: Option<u32>,
    pub worst_score: Option<u32>,
}

impl Statistics {
    pub fn from_rounds<'a>(rounds: impl IntoIterator<Item = &'a GolfRound>) -> Self {
        let totals = rounds
            .into_iter()
            .filter(|round| round.is_full_round())
            .map(GolfRound::total_score)
            .collect_vec();

        let average_score = (!totals.is_empty())
            .then(|| totals.iter().sum::<u32>() as f64 / totals.len() as f64);
        let (best_score, worst_score) = match totals.iter().minmax().into_option() {
            Some((best, worst)) => (Some(*best), Some(*worst)),
            None => (None, None),
        };

        Self {
            rounds_played: totals.len(),
            average_score,
            best_score,
            worst_score,
        }
    }
}
