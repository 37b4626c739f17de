use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::response::{status, Responder};
use rocket::serde::json::Json;
use rocket::{response, Request};
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::{
    MediaType, Object, Parameter, ParameterValue, RefOr, Response, Responses,
};
use rocket_okapi::request::{OpenApiFromRequest, RequestHeaderInput};
use rocket_okapi::response::OpenApiResponderInner;
use serde_json::json;

use crate::store::StoreError;

/// Header carrying the id of the already signed in golfer.
pub const USER_HEADER: &str = "X-User-Id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for UserId {
    type Error = Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match request
            .headers()
            .get_one(USER_HEADER)
            .map(str::trim)
            .filter(|id| !id.is_empty())
        {
            Some(id) => Outcome::Success(UserId(id.to_string())),
            None => Outcome::Error((Status::Unauthorized, Error::Unauthenticated)),
        }
    }
}

impl<'r> OpenApiFromRequest<'r> for UserId {
    fn from_request_input(
        gen: &mut OpenApiGenerator,
        _name: String,
        _required: bool,
    ) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(RequestHeaderInput::Parameter(Parameter {
            name: USER_HEADER.to_owned(),
            location: "header".to_owned(),
            description: Some("Id of the signed in golfer".to_owned()),
            required: true,
            deprecated: false,
            allow_empty_value: false,
            value: ParameterValue::Schema {
                style: None,
                explode: None,
                allow_reserved: false,
                schema: gen.json_schema::<String>(),
                example: None,
                examples: None,
            },
            extensions: Object::default(),
        }))
    }

    fn get_responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        Ok(Responses {
            responses: rocket_okapi::okapi::map! {
                "401".to_owned() => RefOr::Object(described("# 401 Unauthorized\nThe `X-User-Id` header is missing.")),
            },
            ..Default::default()
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Missing `X-User-Id` header")]
    Unauthenticated,
    #[error("Course: `{0}` not found")]
    CourseNotFound(String),
    #[error("Round: `{0}` not found")]
    RoundNotFound(String),
    #[error("Hole {hole} not found on course `{course}`")]
    HoleNotFound { course: String, hole: u8 },
    #[error("Hole index {index} is outside a card of {holes} holes")]
    HoleOutOfRange { index: usize, holes: usize },
    #[error("Invalid score: {0}")]
    InvalidScore(u8),
    #[error("Invalid course: {0}")]
    InvalidCourse(String),
    #[error("Invalid round: {0}")]
    InvalidRound(String),
    #[error("Invalid coordinate: {latitude}, {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    #[error("Invalid layup distance: {0} meters")]
    InvalidLayup(f64),
    #[error("Course `{0}` belongs to another golfer")]
    NotCourseOwner(String),
    #[error("No position has been received yet")]
    NoLocationFix,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    pub fn status(&self) -> Status {
        use Error::*;
        match self {
            Unauthenticated => Status::Unauthorized,
            CourseNotFound(_) | RoundNotFound(_) | HoleNotFound { .. } => Status::NotFound,
            NotCourseOwner(_) => Status::Forbidden,
            HoleOutOfRange { .. }
            | InvalidScore(_)
            | InvalidCoordinate { .. }
            | InvalidLayup(_) => Status::BadRequest,
            InvalidCourse(_) | InvalidRound(_) => Status::UnprocessableEntity,
            NoLocationFix => Status::FailedDependency,
            Store(_) => Status::InternalServerError,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        warn!("{}", self);
        let status = self.status();
        let message = match &self {
            Error::Store(_) => "Internal storage error".to_string(),
            _ => self.to_string(),
        };
        status::Custom(status, Json(json!({ "error": message }))).respond_to(req)
    }
}

impl OpenApiResponderInner for self::Error {
    fn responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        use rocket_okapi::okapi;

        Ok(Responses {
            responses: okapi::map! {
                "400".to_owned() => RefOr::Object(described("# 400 Bad Request\nA hole index, score, coordinate or layup distance is out of range.")),
                "401".to_owned() => RefOr::Object(described("# 401 Unauthorized\nThe `X-User-Id` header is missing.")),
                "403".to_owned() => RefOr::Object(described("# 403 Forbidden\nOnly the creator of a course may change it.")),
                "404".to_owned() => RefOr::Object(described("# 404 Not Found\nNo such course, round or hole for this golfer.")),
                "422".to_owned() => RefOr::Object(described("# 422 Unprocessable Entity\nThe course or round failed validation.")),
                "424".to_owned() => RefOr::Object(described("# 424 Failed Dependency\nNo position has been published for this golfer yet.")),
                "500".to_owned() => RefOr::Object(described("# 500 Internal Server Error\nThe record store failed.")),
            },
            ..Default::default()
        })
    }
}

fn described(description: &str) -> Response {
    use rocket_okapi::okapi;
    Response {
        description: description.to_owned(),
        content: okapi::map! {
            "application/json".to_owned() => MediaType::default()
        },
        ..Default::default()
    }
}
