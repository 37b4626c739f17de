use std::collections::HashMap;

use chrono::Utc;
use itertools::Itertools;

use super::Scorekeeper;
use crate::api::Error;
use crate::controller::{
    compute_handicap, sort_most_recent_first, Course, GolfRound, RoundSummary, Statistics,
    HANDICAP_WINDOW,
};
use crate::dto::{HandicapReport, RoundDetail, RoundEdit, RoundListing, StartRound};

/// Shown in listings for rounds whose course has since been deleted.
pub const UNKNOWN_COURSE: &str = "Unknown course";

impl Scorekeeper {
    pub async fn start_round(&self, user_id: &str, start: StartRound) -> Result<GolfRound, Error> {
        let course = self.course(&start.course_id).await?;
        let round = GolfRound::start(
            &course,
            user_id.to_string(),
            start.date.unwrap_or_else(Utc::now),
        );
        self.rounds.put(round.clone()).await?;
        info!("{user_id} started round {} on `{}`", round.id, course.name);
        Ok(round)
    }

    /// Rounds of other golfers are reported as missing.
    pub async fn round(&self, user_id: &str, id: &str) -> Result<GolfRound, Error> {
        self.rounds
            .get(id)
            .await?
            .filter(|round| round.user_id == user_id)
            .ok_or_else(|| Error::RoundNotFound(id.to_string()))
    }

    /// The user's rounds, most recent first, narrowed by course name or
    /// displayed date when `search` is given.
    pub async fn rounds(
        &self,
        user_id: &str,
        search: Option<&str>,
    ) -> Result<Vec<RoundListing>, Error> {
        let names = self.course_names().await?;
        Ok(self
            .user_rounds(user_id)
            .await?
            .iter()
            .filter_map(|round| {
                let name = names
                    .get(&round.course_id)
                    .map_or(UNKNOWN_COURSE, String::as_str);
                search
                    .map_or(true, |search| round.matches(search, name))
                    .then(|| RoundListing::new(round, name.to_string()))
            })
            .collect_vec())
    }

    pub async fn record_score(
        &self,
        user_id: &str,
        id: &str,
        hole_index: usize,
        strokes: u8,
    ) -> Result<GolfRound, Error> {
        let _guard = self.lock_round(id).await;
        let mut round = self.round(user_id, id).await?;
        round.record_score(hole_index, strokes)?;
        self.rounds.put(round.clone()).await?;
        Ok(round)
    }

    /// Replaces the score card, and the date if one is given. The card keeps
    /// one slot per hole.
    pub async fn edit_round(
        &self,
        user_id: &str,
        id: &str,
        edit: RoundEdit,
    ) -> Result<GolfRound, Error> {
        let _guard = self.lock_round(id).await;
        let mut round = self.round(user_id, id).await?;
        if edit.scores.len() != round.scores.len() {
            return Err(Error::InvalidRound(format!(
                "expected {} scores, got {}",
                round.scores.len(),
                edit.scores.len()
            )));
        }
        if edit.scores.contains(&Some(0)) {
            return Err(Error::InvalidScore(0));
        }
        round.scores = edit.scores;
        if let Some(date) = edit.date {
            round.date = date;
        }
        self.rounds.put(round.clone()).await?;
        Ok(round)
    }

    /// Also ends the user's live distance streams.
    pub async fn finish_round(&self, user_id: &str, id: &str) -> Result<GolfRound, Error> {
        let _guard = self.lock_round(id).await;
        let mut round = self.round(user_id, id).await?;
        round.finish();
        self.rounds.put(round.clone()).await?;
        self.location.close(user_id).await;
        info!("{user_id} finished round {id} with {}", round.total_score());
        Ok(round)
    }

    pub async fn delete_round(&self, user_id: &str, id: &str) -> Result<(), Error> {
        {
            let _guard = self.lock_round(id).await;
            self.round(user_id, id).await?;
            self.rounds.delete(id).await?;
        }
        self.forget_round_lock(id).await;
        Ok(())
    }

    pub async fn round_summary(&self, user_id: &str, id: &str) -> Result<RoundDetail, Error> {
        let round = self.round(user_id, id).await?;
        let course = self.course(&round.course_id).await?;
        Ok(RoundDetail::new(round, &course))
    }

    /// Handicap input: the most recent completed rounds, newest first, each
    /// paired with the rating and slope of its course. Rounds on deleted courses
    /// are skipped.
    pub async fn round_summaries(&self, user_id: &str) -> Result<Vec<RoundSummary>, Error> {
        let courses: HashMap<String, Course> = self
            .courses
            .list()
            .await?
            .into_iter()
            .map(|course| (course.id.clone(), course))
            .collect();
        Ok(self
            .user_rounds(user_id)
            .await?
            .iter()
            .filter(|round| round.is_completed)
            .filter_map(|round| {
                courses
                    .get(&round.course_id)
                    .map(|course| round.summary(course))
            })
            .take(HANDICAP_WINDOW)
            .collect_vec())
    }

    pub async fn handicap(&self, user_id: &str) -> Result<HandicapReport, Error> {
        let summaries = self.round_summaries(user_id).await?;
        let report = HandicapReport::from(compute_handicap(&summaries));
        debug!("Handicap for {user_id}: {report:?}");
        Ok(report)
    }

    pub async fn statistics(&self, user_id: &str) -> Result<Statistics, Error> {
        Ok(Statistics::from_rounds(&self.user_rounds(user_id).await?))
    }

    async fn user_rounds(&self, user_id: &str) -> Result<Vec<GolfRound>, Error> {
        let mut rounds = self
            .rounds
            .list()
            .await?
            .into_iter()
            .filter(|round| round.user_id == user_id)
            .collect_vec();
        sort_most_recent_first(&mut rounds);
        Ok(rounds)
    }

    async fn course_names(&self) -> Result<HashMap<String, String>, Error> {
        Ok(self
            .courses
            .list()
            .await?
            .into_iter()
            .map(|course| (course.id, course.name))
            .collect())
    }
}
