use itertools::Itertools;
use rocket_okapi::okapi::schemars;
use schemars::JsonSchema;
use serde::Serialize;

/// Slope rating of a course of standard difficulty.
pub const STANDARD_SLOPE: f64 = 113.0;
/// Fewest rounds that produce a handicap index.
pub const MIN_ROUNDS: usize = 5;
/// How many of the most recent rounds are considered.
pub const HANDICAP_WINDOW: usize = 20;
/// Scores shown next to the index.
pub const RECENT_SCORES: usize = 5;
const BONUS_FOR_EXCELLENCE: f64 = 0.96;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundSummary {
    pub score: u32,
    pub course_rating: f64,
    pub slope_rating: u16,
}

impl RoundSummary {
    pub fn new(score: u32, course_rating: f64, slope_rating: u16) -> Self {
        Self {
            score,
            course_rating,
            slope_rating,
        }
    }

    pub fn differential(&self) -> f64 {
        (STANDARD_SLOPE / self.slope_rating as f64) * (self.score as f64 - self.course_rating)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Handicap {
    pub index: f64,
    pub recent_scores: Vec<u32>,
    /// The lowest differentials, the ones that were averaged.
    pub differentials_used: Vec<f64>,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandicapError {
    #[error("Not enough rounds to calculate handicap: {available} of {required}")]
    InsufficientData { available: usize, required: usize },
}

/// Number of differentials averaged for `rounds` available rounds.
pub fn differentials_to_use(rounds: usize) -> Option<usize> {
    match rounds {
        0..=4 => None,
        5..=6 => Some(1),
        7..=8 => Some(2),
        9..=10 => Some(3),
        11..=12 => Some(4),
        13..=14 => Some(5),
        15..=16 => Some(6),
        17 => Some(7),
        18 => Some(8),
        19 => Some(9),
        _ => Some(10),
    }
}

/// Rounds are expected most recent first; that order only matters for
/// `recent_scores`.
pub fn compute_handicap(rounds: &[RoundSummary]) -> Result<Handicap, HandicapError> {
    let k = differentials_to_use(rounds.len()).ok_or(HandicapError::InsufficientData {
        available: rounds.len(),
        required: MIN_ROUNDS,
    })?;

    let differentials_used = rounds
        .iter()
        .map(RoundSummary::differential)
        .sorted_by(f64::total_cmp)
        .take(k)
        .collect_vec();
    let average = differentials_used.iter().sum::<f64>() / k as f64;

    Ok(Handicap {
        index: round_to_tenth(average * BONUS_FOR_EXCELLENCE),
        recent_scores: rounds
            .iter()
            .take(RECENT_SCORES)
            .map(|round| round.score)
            .collect_vec(),
        differentials_used,
    })
}

/// Half away from zero.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn uniform(scores: &[u32], course_rating: f64, slope_rating: u16) -> Vec<RoundSummary> {
        scores
            .iter()
            .map(|&score| RoundSummary::new(score, course_rating, slope_rating))
            .collect_vec()
    }

    #[test]
    fn differential_on_standard_slope() {
        let round = RoundSummary::new(90, 72.0, 113);
        assert_eq!(round.differential(), 18.0);
    }

    #[test]
    fn selection_table() {
        let expected = [
            (4, None),
            (5, Some(1)),
            (6, Some(1)),
            (7, Some(2)),
            (8, Some(2)),
            (9, Some(3)),
            (10, Some(3)),
            (11, Some(4)),
            (12, Some(4)),
            (13, Some(5)),
            (14, Some(5)),
            (15, Some(6)),
            (16, Some(6)),
            (17, Some(7)),
            (18, Some(8)),
            (19, Some(9)),
            (20, Some(10)),
            (27, Some(10)),
        ];
        for (rounds, k) in expected {
            assert_eq!(differentials_to_use(rounds), k, "rounds: {rounds}");
        }
        assert_eq!(differentials_to_use(0), None);
    }

    #[test]
    fn too_few_rounds_is_not_zero() {
        let rounds = uniform(&[80, 82, 84, 86], 72.0, 113);
        assert_eq!(
            compute_handicap(&rounds),
            Err(HandicapError::InsufficientData {
                available: 4,
                required: MIN_ROUNDS
            })
        );
        assert!(compute_handicap(&[]).is_err());
    }

    #[test]
    fn five_rounds_use_best_differential() {
        let rounds = uniform(&[90, 85, 95, 88, 92], 72.0, 113);
        let handicap = compute_handicap(&rounds).unwrap();
        assert_eq!(handicap.differentials_used, vec![13.0]);
        assert_eq!(handicap.index, round_to_tenth(13.0 * 0.96));
        assert_eq!(handicap.index, 12.5);
        assert_eq!(handicap.recent_scores, vec![90, 85, 95, 88, 92]);
    }

    #[test]
    fn twenty_rounds_use_ten() {
        let scores = (80..100).collect_vec();
        let rounds = uniform(&scores, 70.0, 113);
        let handicap = compute_handicap(&rounds).unwrap();
        assert_eq!(handicap.differentials_used.len(), 10);
        // differentials 10..=19, mean 14.5
        assert_eq!(handicap.index, 13.9);
        assert_eq!(handicap.recent_scores, vec![80, 81, 82, 83, 84]);
    }

    #[test]
    fn eight_round_regression() {
        let rounds = uniform(&[85, 88, 90, 92, 80, 95, 87, 91], 70.0, 120);
        let handicap = compute_handicap(&rounds).unwrap();
        // lowest two: 80 and 85 -> (113/120)*10 and (113/120)*15
        let expected_average = (113.0 / 120.0 * 10.0 + 113.0 / 120.0 * 15.0) / 2.0;
        assert_eq!(handicap.differentials_used.len(), 2);
        assert!((handicap.differentials_used[0] - 113.0 / 120.0 * 10.0).abs() < 1e-9);
        assert_eq!(handicap.index, round_to_tenth(expected_average * 0.96));
        assert_eq!(handicap.index, 11.3);
        assert_eq!(handicap.recent_scores, vec![85, 88, 90, 92, 80]);
    }

    #[test]
    fn negative_index_rounds_away_from_zero() {
        assert_eq!(round_to_tenth(-1.25), -1.3);
        assert_eq!(round_to_tenth(1.25), 1.3);
        let rounds = uniform(&[68, 69, 70, 71, 72], 72.0, 113);
        assert_eq!(compute_handicap(&rounds).unwrap().index, -3.8);
    }

    fn round_strategy() -> impl Strategy<Value = RoundSummary> {
        (60u32..130, 60.0f64..78.0, 55u16..=155)
            .prop_map(|(score, rating, slope)| RoundSummary::new(score, rating, slope))
    }

    proptest! {
        #[test]
        fn same_input_same_output(rounds in prop::collection::vec(round_strategy(), 0..25)) {
            prop_assert_eq!(compute_handicap(&rounds), compute_handicap(&rounds));
        }

        #[test]
        fn lowering_a_score_never_raises_the_index(
            rounds in prop::collection::vec(round_strategy(), 5..25),
            pick in any::<prop::sample::Index>(),
            strokes in 1u32..10,
        ) {
            let before = compute_handicap(&rounds).unwrap().index;
            let mut lowered = rounds.clone();
            let round = &mut lowered[pick.index(rounds.len())];
            round.score = round.score.saturating_sub(strokes);
            let after = compute_handicap(&lowered).unwrap().index;
            prop_assert!(after <= before, "{} > {}", after, before);
        }
    }
}
