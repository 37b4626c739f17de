use rocket_okapi::okapi::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Green {
    pub front: Coordinate,
    pub center: Coordinate,
    pub back: Coordinate,
}

impl Green {
    /// The center is taken halfway between front and back.
    pub fn from_edges(front: Coordinate, back: Coordinate) -> Self {
        Self {
            front,
            center: front.midpoint(&back),
            back,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hole {
    pub id: String,
    pub number: u8,
    pub par: u8,
    pub yardage: u32,
    pub tee_box: Coordinate,
    pub green: Green,
}

impl Hole {
    /// Builds a hole from the three positions marked on the map. Yardage is
    /// measured from the tee to the front of the green.
    pub fn from_markers(
        number: u8,
        par: u8,
        tee_box: Coordinate,
        front: Coordinate,
        back: Coordinate,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            number,
            par,
            yardage: tee_box.distance_yards(&front),
            tee_box,
            green: Green::from_edges(front, back),
        }
    }

    pub fn distances_from(&self, position: &Coordinate) -> GreenDistances {
        GreenDistances {
            hole: self.number,
            front: position.distance_yards(&self.green.front),
            center: position.distance_yards(&self.green.center),
            back: position.distance_yards(&self.green.back),
        }
    }

    pub fn layup_from(&self, position: &Coordinate, layup: &Coordinate) -> LayupDistances {
        LayupDistances {
            to_layup: position.distance_yards(layup),
            layup_to_center: layup.distance_yards(&self.green.center),
        }
    }

    /// Where to lay up so that `meters` remain to the center of the green.
    pub fn layup_target(&self, position: &Coordinate, meters: f64) -> Coordinate {
        position.point_short_of(&self.green.center, meters)
    }
}

/// Yards from a position to the green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct GreenDistances {
    pub hole: u8,
    pub front: u32,
    pub center: u32,
    pub back: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayupDistances {
    pub to_layup: u32,
    pub layup_to_center: u32,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A straight hole running north from `tee`: front edge `length` meters out,
    /// back edge 30 meters further.
    pub(crate) fn straight_hole(number: u8, par: u8, tee: Coordinate, length: f64) -> Hole {
        let front = tee.destination(0.0, length);
        let back = tee.destination(0.0, length + 30.0);
        Hole::from_markers(number, par, tee, front, back)
    }

    #[test]
    fn markers_make_a_hole() {
        let tee = Coordinate::new(36.5725, -121.9486);
        let hole = straight_hole(7, 3, tee, 100.0);
        assert_eq!(hole.yardage, 109);
        assert_eq!(hole.par, 3);
        assert_eq!(hole.green.center, hole.green.front.midpoint(&hole.green.back));
        assert!(!hole.id.is_empty());
    }

    #[test]
    fn distances_from_the_tee() {
        let tee = Coordinate::new(36.5725, -121.9486);
        let hole = straight_hole(1, 4, tee, 300.0);
        let distances = hole.distances_from(&tee);
        assert_eq!(distances.hole, 1);
        assert_eq!(distances.front, hole.yardage);
        assert!(distances.front < distances.center);
        assert!(distances.center < distances.back);
        // 315 meters to the center
        assert!((343..=345).contains(&distances.center));
    }

    #[test]
    fn layup_distances_add_up() {
        let tee = Coordinate::new(36.5725, -121.9486);
        let hole = straight_hole(2, 5, tee, 450.0);
        let layup = hole.layup_target(&tee, 91.44);
        let split = hole.layup_from(&tee, &layup);
        assert!((99..=100).contains(&split.layup_to_center));
        let total = hole.distances_from(&tee).center;
        assert!(split.to_layup + split.layup_to_center >= total - 1);
        assert!(split.to_layup + split.layup_to_center <= total + 1);
    }
}
