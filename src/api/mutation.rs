use rocket::response::status;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::api::{Error, UserId};
use crate::controller::{Course, GolfRound, PositionFix, Scorekeeper};
use crate::dto;

#[openapi(tag = "Course")]
#[post("/courses", data = "<course>")]
pub async fn add_course(
    keeper: &State<Scorekeeper>,
    user: UserId,
    course: Json<dto::NewCourse>,
) -> Result<status::Created<Json<Course>>, Error> {
    let course = keeper.add_course(user.as_str(), course.into_inner()).await?;
    Ok(status::Created::new(format!("/courses/{}", course.id)).body(Json(course)))
}

/// # PUT Course
/// Only the golfer who created the course may change it.
#[openapi(tag = "Course")]
#[put("/courses/<id>", data = "<course>")]
pub async fn update_course(
    keeper: &State<Scorekeeper>,
    user: UserId,
    id: &str,
    course: Json<dto::NewCourse>,
) -> Result<Json<Course>, Error> {
    Ok(Json(
        keeper
            .update_course(user.as_str(), id, course.into_inner())
            .await?,
    ))
}

#[openapi(tag = "Course")]
#[delete("/courses/<id>")]
pub async fn delete_course(
    keeper: &State<Scorekeeper>,
    user: UserId,
    id: &str,
) -> Result<status::NoContent, Error> {
    keeper.delete_course(user.as_str(), id).await?;
    Ok(status::NoContent)
}

/// # POST Start round
#[openapi(tag = "Round")]
#[post("/rounds", data = "<start>")]
pub async fn start_round(
    keeper: &State<Scorekeeper>,
    user: UserId,
    start: Json<dto::StartRound>,
) -> Result<status::Created<Json<GolfRound>>, Error> {
    let round = keeper.start_round(user.as_str(), start.into_inner()).await?;
    Ok(status::Created::new(format!("/rounds/{}", round.id)).body(Json(round)))
}

/// # PUT Round
/// Replaces the score card, and the date when given.
#[openapi(tag = "Round")]
#[put("/rounds/<id>", data = "<edit>")]
pub async fn edit_round(
    keeper: &State<Scorekeeper>,
    user: UserId,
    id: &str,
    edit: Json<dto::RoundEdit>,
) -> Result<Json<GolfRound>, Error> {
    Ok(Json(
        keeper
            .edit_round(user.as_str(), id, edit.into_inner())
            .await?,
    ))
}

/// # PUT Score
/// `index` counts from zero.
#[openapi(tag = "Round")]
#[put("/rounds/<id>/holes/<index>/score", data = "<score>")]
pub async fn record_score(
    keeper: &State<Scorekeeper>,
    user: UserId,
    id: &str,
    index: usize,
    score: Json<dto::ScoreUpdate>,
) -> Result<Json<GolfRound>, Error> {
    Ok(Json(
        keeper
            .record_score(user.as_str(), id, index, score.strokes)
            .await?,
    ))
}

#[openapi(tag = "Round")]
#[post("/rounds/<id>/finish")]
pub async fn finish_round(
    keeper: &State<Scorekeeper>,
    user: UserId,
    id: &str,
) -> Result<Json<GolfRound>, Error> {
    Ok(Json(keeper.finish_round(user.as_str(), id).await?))
}

#[openapi(tag = "Round")]
#[delete("/rounds/<id>")]
pub async fn delete_round(
    keeper: &State<Scorekeeper>,
    user: UserId,
    id: &str,
) -> Result<status::NoContent, Error> {
    keeper.delete_round(user.as_str(), id).await?;
    Ok(status::NoContent)
}

/// # POST Location
/// A position fix from the golfer's device. Fixes within the configured
/// distance of the previous one are dropped.
#[openapi(tag = "On course")]
#[post("/location", data = "<update>")]
pub async fn publish_location(
    keeper: &State<Scorekeeper>,
    user: UserId,
    update: Json<dto::LocationUpdate>,
) -> Result<Json<dto::LocationAccepted>, Error> {
    let fix = PositionFix::try_from(update.into_inner())?;
    let published = keeper.publish_location(user.as_str(), fix).await;
    Ok(Json(dto::LocationAccepted { published }))
}
