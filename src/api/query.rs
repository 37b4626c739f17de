use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::api::{Error, UserId};
use crate::controller::{Course, GolfRound, GreenDistances, Scorekeeper, Statistics};
use crate::dto;

/// # GET Courses
/// Every course, sorted by name. `search` matches name or location, ignoring case.
#[openapi(tag = "Course")]
#[get("/courses?<search>")]
pub async fn courses(
    keeper: &State<Scorekeeper>,
    search: Option<&str>,
) -> Result<Json<Vec<Course>>, Error> {
    Ok(Json(keeper.list_courses(search).await?))
}

/// # GET Course
#[openapi(tag = "Course")]
#[get("/courses/<id>")]
pub async fn course(keeper: &State<Scorekeeper>, id: &str) -> Result<Json<Course>, Error> {
    Ok(Json(keeper.course(id).await?))
}

/// # GET Rounds
/// The golfer's rounds, most recent first. `search` matches the course name or
/// the date as shown, e.g. `Saturday, 7/20/24`.
#[openapi(tag = "Round")]
#[get("/rounds?<search>")]
pub async fn rounds(
    keeper: &State<Scorekeeper>,
    user: UserId,
    search: Option<&str>,
) -> Result<Json<Vec<dto::RoundListing>>, Error> {
    Ok(Json(keeper.rounds(user.as_str(), search).await?))
}

/// # GET Round
#[openapi(tag = "Round")]
#[get("/rounds/<id>")]
pub async fn round(
    keeper: &State<Scorekeeper>,
    user: UserId,
    id: &str,
) -> Result<Json<GolfRound>, Error> {
    Ok(Json(keeper.round(user.as_str(), id).await?))
}

/// # GET Round summary
/// Total, par, `"87 (+15)"` and the count of birdies, pars and so on.
#[openapi(tag = "Round")]
#[get("/rounds/<id>/summary")]
pub async fn round_summary(
    keeper: &State<Scorekeeper>,
    user: UserId,
    id: &str,
) -> Result<Json<dto::RoundDetail>, Error> {
    Ok(Json(keeper.round_summary(user.as_str(), id).await?))
}

/// # GET Handicap
/// `status` is `available` with an index, or `insufficient_data` with the
/// number of completed rounds still missing.
#[openapi(tag = "Handicap")]
#[get("/handicap")]
pub async fn handicap(
    keeper: &State<Scorekeeper>,
    user: UserId,
) -> Result<Json<dto::HandicapReport>, Error> {
    Ok(Json(keeper.handicap(user.as_str()).await?))
}

/// # GET Statistics
#[openapi(tag = "Handicap")]
#[get("/statistics")]
pub async fn statistics(
    keeper: &State<Scorekeeper>,
    user: UserId,
) -> Result<Json<Statistics>, Error> {
    Ok(Json(keeper.statistics(user.as_str()).await?))
}

/// # GET Distances to the green
/// From the golfer's latest published position.
#[openapi(tag = "On course")]
#[get("/rounds/<id>/holes/<number>/distances")]
pub async fn distances(
    keeper: &State<Scorekeeper>,
    user: UserId,
    id: &str,
    number: u8,
) -> Result<Json<GreenDistances>, Error> {
    Ok(Json(keeper.distances(user.as_str(), id, number).await?))
}

/// # GET Layup
/// Where to lay up to leave `meters` to the center of the green.
#[openapi(tag = "On course")]
#[get("/rounds/<id>/holes/<number>/layup?<meters>")]
pub async fn layup(
    keeper: &State<Scorekeeper>,
    user: UserId,
    id: &str,
    number: u8,
    meters: f64,
) -> Result<Json<dto::LayupPlan>, Error> {
    Ok(Json(keeper.layup(user.as_str(), id, number, meters).await?))
}
