use itertools::Itertools;
use rocket_okapi::okapi::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::hole::Hole;
use crate::api::Error;
use crate::store::Record;

pub const SLOPE_RANGE: RangeInclusive<u16> = 55..=155;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub location: String,
    pub holes: Vec<Hole>,
    pub course_rating: f64,
    pub slope_rating: u16,
    pub creator_id: String,
}

impl Record for Course {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Course {
    pub fn new(
        name: String,
        location: String,
        holes: Vec<Hole>,
        course_rating: f64,
        slope_rating: u16,
        creator_id: String,
    ) -> Result<Self, Error> {
        let course = Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            location,
            holes,
            course_rating,
            slope_rating,
            creator_id,
        };
        course.validate()?;
        Ok(course)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidCourse("name is empty".to_string()));
        }
        if !SLOPE_RANGE.contains(&self.slope_rating) {
            return Err(Error::InvalidCourse(format!(
                "slope rating {} is outside {}..={}",
                self.slope_rating,
                SLOPE_RANGE.start(),
                SLOPE_RANGE.end()
            )));
        }
        if !(self.course_rating.is_finite() && self.course_rating > 0.0) {
            return Err(Error::InvalidCourse(format!(
                "course rating {} is not positive",
                self.course_rating
            )));
        }
        if let Some(hole) = self.holes.iter().duplicates_by(|hole| hole.number).next() {
            return Err(Error::InvalidCourse(format!(
                "hole {} appears more than once",
                hole.number
            )));
        }
        if let Some(hole) = self.holes.iter().find(|hole| hole.par == 0) {
            return Err(Error::InvalidCourse(format!("hole {} has no par", hole.number)));
        }
        Ok(())
    }

    pub fn total_par(&self) -> u32 {
        self.holes.iter().map(|hole| hole.par as u32).sum()
    }

    pub fn hole(&self, number: u8) -> Option<&Hole> {
        self.holes.iter().find(|hole| hole.number == number)
    }

    pub fn matches(&self, search: &str) -> bool {
        let search = search.to_lowercase();
        self.name.to_lowercase().contains(&search) || self.location.to_lowercase().contains(&search)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::controller::geo::Coordinate;
    use crate::controller::hole::tests::straight_hole;

    /// An 18 hole par 72 course: fours everywhere except par 3 on 3/8/12/17 and
    /// par 5 on 2/9/13/18.
    pub(crate) fn eighteen_holes() -> Vec<Hole> {
        let mut tee = Coordinate::new(33.5031, -82.0206);
        (1..=18)
            .map(|number| {
                let par = match number {
                    3 | 8 | 12 | 17 => 3,
                    2 | 9 | 13 | 18 => 5,
                    _ => 4,
                };
                let hole = straight_hole(number, par, tee, par as f64 * 90.0);
                tee = tee.destination(90.0, 150.0);
                hole
            })
            .collect_vec()
    }

    pub(crate) fn course(creator: &str, course_rating: f64, slope_rating: u16) -> Course {
        Course::new(
            "Augusta Municipal".to_string(),
            "Augusta, GA".to_string(),
            eighteen_holes(),
            course_rating,
            slope_rating,
            creator.to_string(),
        )
        .unwrap()
    }

    #[test]
    fn par_adds_up() {
        let course = course("user", 71.2, 128);
        assert_eq!(course.total_par(), 72);
        assert_eq!(course.hole(12).unwrap().par, 3);
        assert!(course.hole(19).is_none());
    }

    #[test]
    fn rejects_invalid_courses() {
        let base = course("user", 71.2, 128);

        let mut bad_slope = base.clone();
        bad_slope.slope_rating = 0;
        assert!(matches!(bad_slope.validate(), Err(Error::InvalidCourse(_))));

        let mut bad_name = base.clone();
        bad_name.name = "   ".to_string();
        assert!(bad_name.validate().is_err());

        let mut bad_rating = base.clone();
        bad_rating.course_rating = f64::NAN;
        assert!(bad_rating.validate().is_err());

        let mut duplicated = base.clone();
        duplicated.holes[1].number = 1;
        assert!(duplicated.validate().is_err());

        assert!(base.validate().is_ok());
    }

    #[test]
    fn search_is_case_insensitive() {
        let course = course("user", 71.2, 128);
        assert!(course.matches("augusta"));
        assert!(course.matches("GA"));
        assert!(!course.matches("pebble"));
    }
}
