use chrono::{DateTime, Utc};
use rocket_okapi::okapi::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::course::Course;
use super::handicap::RoundSummary;
use crate::api::Error;
use crate::store::Record;

/// Holes with a positive score needed for a round to count as full.
pub const FULL_ROUND_HOLES: usize = 18;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GolfRound {
    pub id: String,
    pub date: DateTime<Utc>,
    pub course_id: String,
    pub user_id: String,
    pub scores: Vec<Option<u8>>,
    #[serde(default)]
    pub is_completed: bool,
}

impl Record for GolfRound {
    fn id(&self) -> &str {
        &self.id
    }
}

impl GolfRound {
    /// A fresh round with one empty score per hole of `course`.
    pub fn start(course: &Course, user_id: String, date: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            course_id: course.id.clone(),
            user_id,
            scores: vec![None; course.holes.len()],
            is_completed: false,
        }
    }

    pub fn total_score(&self) -> u32 {
        self.scores.iter().flatten().map(|&score| score as u32).sum()
    }

    pub fn holes_played(&self) -> usize {
        self.scores.iter().flatten().filter(|&&score| score > 0).count()
    }

    pub fn is_full_round(&self) -> bool {
        self.holes_played() >= FULL_ROUND_HOLES
    }

    pub fn record_score(&mut self, hole_index: usize, strokes: u8) -> Result<(), Error> {
        if strokes == 0 {
            return Err(Error::InvalidScore(strokes));
        }
        let holes = self.scores.len();
        let slot = self
            .scores
            .get_mut(hole_index)
            .ok_or(Error::HoleOutOfRange {
                index: hole_index,
                holes,
            })?;
        *slot = Some(strokes);
        Ok(())
    }

    pub fn finish(&mut self) {
        self.is_completed = true;
    }

    /// Only meaningful once the round is paired with the course it was played on.
    pub fn summary(&self, course: &Course) -> RoundSummary {
        RoundSummary::new(self.total_score(), course.course_rating, course.slope_rating)
    }

    pub fn relative_to_par(&self, course: &Course) -> i64 {
        self.total_score() as i64 - course.total_par() as i64
    }

    /// `"87 (+15)"`, `"72 (+0)"`, `"70 (-2)"`.
    pub fn score_display(&self, course: &Course) -> String {
        let relative = self.relative_to_par(course);
        let sign = if relative >= 0 { "+" } else { "" };
        format!("{} ({sign}{relative})", self.total_score())
    }

    pub fn breakdown(&self, course: &Course) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::default();
        for (score, hole) in self.scores.iter().zip(course.holes.iter()) {
            if let Some(score) = score {
                breakdown.add(*score as i16 - hole.par as i16);
            }
        }
        breakdown
    }

    /// Date as shown in lists, `"Saturday, 7/20/24"`.
    pub fn display_date(&self) -> String {
        self.date.format("%A, %-m/%-d/%y").to_string()
    }

    pub fn matches(&self, search: &str, course_name: &str) -> bool {
        let search = search.to_lowercase();
        course_name.to_lowercase().contains(&search)
            || self.display_date().to_lowercase().contains(&search)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub eagle_or_better: u8,
    pub birdies: u8,
    pub pars: u8,
    pub bogeys: u8,
    pub double_bogey_or_worse: u8,
}

impl ScoreBreakdown {
    fn add(&mut self, to_par: i16) {
        match to_par {
            i16::MIN..=-2 => self.eagle_or_better += 1,
            -1 => self.birdies += 1,
            0 => self.pars += 1,
            1 => self.bogeys += 1,
            _ => self.double_bogey_or_worse += 1,
        }
    }
}

/// Orders rounds most recent first.
pub fn sort_most_recent_first(rounds: &mut [GolfRound]) {
    rounds.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::course::tests::course;
    use chrono::TimeZone;

    fn july_20() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 20, 14, 30, 0).unwrap()
    }

    #[test]
    fn a_new_round_has_an_empty_card() {
        let course = course("user", 71.2, 128);
        let round = GolfRound::start(&course, "user".to_string(), july_20());
        assert_eq!(round.scores.len(), 18);
        assert!(round.scores.iter().all(Option::is_none));
        assert_eq!(round.total_score(), 0);
        assert!(!round.is_completed);
    }

    #[test]
    fn recording_scores() {
        let course = course("user", 71.2, 128);
        let mut round = GolfRound::start(&course, "user".to_string(), july_20());
        round.record_score(0, 5).unwrap();
        round.record_score(17, 4).unwrap();
        round.record_score(0, 4).unwrap();
        assert_eq!(round.total_score(), 8);
        assert_eq!(round.holes_played(), 2);

        assert!(matches!(
            round.record_score(18, 4),
            Err(Error::HoleOutOfRange { index: 18, holes: 18 })
        ));
        assert!(matches!(round.record_score(3, 0), Err(Error::InvalidScore(0))));
    }

    #[test]
    fn breakdown_by_hole() {
        let course = course("user", 71.2, 128);
        let mut round = GolfRound::start(&course, "user".to_string(), july_20());
        // hole 1 par 4, hole 2 par 5, hole 3 par 3, hole 4 par 4, hole 5 par 4, hole 6 par 4
        for (index, strokes) in [2, 4, 3, 5, 7, 8].into_iter().enumerate() {
            round.record_score(index, strokes).unwrap();
        }
        assert_eq!(
            round.breakdown(&course),
            ScoreBreakdown {
                eagle_or_better: 1,
                birdies: 1,
                pars: 1,
                bogeys: 1,
                double_bogey_or_worse: 2,
            }
        );
    }

    #[test]
    fn display_relative_to_par() {
        let course = course("user", 71.2, 128);
        let mut round = GolfRound::start(&course, "user".to_string(), july_20());
        for (index, hole) in course.holes.iter().enumerate() {
            round.record_score(index, hole.par).unwrap();
        }
        assert_eq!(round.score_display(&course), "72 (+0)");
        round.record_score(0, 3).unwrap();
        assert_eq!(round.score_display(&course), "71 (-1)");
        round.record_score(1, 9).unwrap();
        assert_eq!(round.score_display(&course), "75 (+3)");
        assert!(round.is_full_round());
    }

    #[test]
    fn search_by_course_or_date() {
        let course = course("user", 71.2, 128);
        let round = GolfRound::start(&course, "user".to_string(), july_20());
        assert_eq!(round.display_date(), "Saturday, 7/20/24");
        assert!(round.matches("saturday", &course.name));
        assert!(round.matches("7/20", &course.name));
        assert!(round.matches("MUNICIPAL", &course.name));
        assert!(!round.matches("sunday", &course.name));
    }

    #[test]
    fn most_recent_first() {
        let course = course("user", 71.2, 128);
        let older = GolfRound::start(&course, "user".to_string(), july_20());
        let newer = GolfRound::start(
            &course,
            "user".to_string(),
            july_20() + chrono::Duration::days(3),
        );
        let mut rounds = vec![older.clone(), newer.clone()];
        sort_most_recent_first(&mut rounds);
        assert_eq!(rounds[0].id, newer.id);
    }
}
