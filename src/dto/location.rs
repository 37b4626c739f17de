use rocket_okapi::okapi::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::Error;
use crate::controller::{Coordinate, PositionFix};

#[derive(Deserialize, JsonSchema, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: Option<f64>,
}

impl TryFrom<LocationUpdate> for PositionFix {
    type Error = Error;

    fn try_from(update: LocationUpdate) -> Result<Self, Self::Error> {
        let coordinate = Coordinate::new(update.latitude, update.longitude);
        if !coordinate.is_valid() {
            return Err(Error::InvalidCoordinate {
                latitude: update.latitude,
                longitude: update.longitude,
            });
        }
        Ok(PositionFix::now(coordinate, update.accuracy_m))
    }
}

#[derive(Serialize, JsonSchema, Debug, Clone, Copy)]
pub struct LocationAccepted {
    /// False when the fix was within the distance filter of the previous one.
    pub published: bool,
}

/// Where to lay up, and the yardages either side of it.
#[derive(Serialize, JsonSchema, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct LayupPlan {
    pub target: Coordinate,
    pub to_layup: u32,
    pub layup_to_center: u32,
}
