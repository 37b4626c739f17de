use super::Scorekeeper;
use crate::api::Error;
use crate::controller::{GreenDistances, Hole, LocationSubscription, PositionFix};
use crate::dto::LayupPlan;

impl Scorekeeper {
    pub async fn publish_location(&self, user_id: &str, fix: PositionFix) -> bool {
        self.location.publish(user_id, fix).await
    }

    pub async fn subscribe_location(&self, user_id: &str) -> LocationSubscription {
        self.location.subscribe(user_id).await
    }

    /// The hole `number` of the course the user's round is played on.
    pub async fn hole_for_round(
        &self,
        user_id: &str,
        round_id: &str,
        number: u8,
    ) -> Result<Hole, Error> {
        let round = self.round(user_id, round_id).await?;
        self.hole(&round.course_id, number).await
    }

    /// Yards to the green from the user's latest position.
    pub async fn distances(
        &self,
        user_id: &str,
        round_id: &str,
        number: u8,
    ) -> Result<GreenDistances, Error> {
        let hole = self.hole_for_round(user_id, round_id, number).await?;
        let fix = self.current_fix(user_id).await?;
        Ok(hole.distances_from(&fix.coordinate))
    }

    /// A layup point leaving `meters` to the center of the green. `meters` must
    /// be finite and not negative.
    pub async fn layup(
        &self,
        user_id: &str,
        round_id: &str,
        number: u8,
        meters: f64,
    ) -> Result<LayupPlan, Error> {
        if !meters.is_finite() || meters < 0.0 {
            return Err(Error::InvalidLayup(meters));
        }
        let hole = self.hole_for_round(user_id, round_id, number).await?;
        let position = self.current_fix(user_id).await?.coordinate;
        let target = hole.layup_target(&position, meters);
        let distances = hole.layup_from(&position, &target);
        Ok(LayupPlan {
            target,
            to_layup: distances.to_layup,
            layup_to_center: distances.layup_to_center,
        })
    }

    async fn current_fix(&self, user_id: &str) -> Result<PositionFix, Error> {
        self.location
            .current(user_id)
            .await
            .ok_or(Error::NoLocationFix)
    }
}
