use itertools::Itertools;
use rocket_okapi::okapi::schemars;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::api::Error;
use crate::controller::{Coordinate, Course, Hole};

/// A hole as marked on the map: tee box plus front and back of the green.
#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewHole {
    pub number: u8,
    pub par: u8,
    pub tee_box: Coordinate,
    pub front: Coordinate,
    pub back: Coordinate,
}

impl NewHole {
    fn into_hole(self) -> Result<Hole, Error> {
        if let Some(bad) = [self.tee_box, self.front, self.back]
            .into_iter()
            .find(|coordinate| !coordinate.is_valid())
        {
            return Err(Error::InvalidCoordinate {
                latitude: bad.latitude,
                longitude: bad.longitude,
            });
        }
        Ok(Hole::from_markers(
            self.number,
            self.par,
            self.tee_box,
            self.front,
            self.back,
        ))
    }
}

#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub course_rating: f64,
    pub slope_rating: u16,
    #[serde(default)]
    pub holes: Vec<NewHole>,
}

impl NewCourse {
    pub fn into_course(self, creator_id: String) -> Result<Course, Error> {
        let holes = self
            .holes
            .into_iter()
            .map(NewHole::into_hole)
            .try_collect()?;
        Course::new(
            self.name,
            self.location,
            holes,
            self.course_rating,
            self.slope_rating,
            creator_id,
        )
    }
}
