mod course;
mod handicap;
mod location;
mod round;

pub use course::{NewCourse, NewHole};
pub use handicap::HandicapReport;
pub use location::{LayupPlan, LocationAccepted, LocationUpdate};
pub use round::{RoundDetail, RoundEdit, RoundListing, ScoreUpdate, StartRound};
