pub mod course;
pub mod geo;
pub mod handicap;
pub mod hole;
pub mod location;
pub mod round;
pub mod scorekeeper;
pub mod statistics;

pub use course::Course;
pub use geo::Coordinate;
pub use handicap::{
    compute_handicap, Handicap, HandicapError, RoundSummary, HANDICAP_WINDOW, MIN_ROUNDS,
};
pub use hole::{Green, GreenDistances, Hole, LayupDistances};
pub use location::{LocationError, LocationHub, LocationSubscription, PositionFix};
pub use round::{sort_most_recent_first, GolfRound, ScoreBreakdown};
pub use scorekeeper::Scorekeeper;
pub use statistics::Statistics;
