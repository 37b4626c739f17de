mod guard;
mod mutation;
mod query;
mod stream;

use mutation::*;
use query::*;
use rocket::fairing::AdHoc;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Build, Request, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::rapidoc::{make_rapidoc, GeneralConfig, RapiDocConfig};
use rocket_okapi::settings::UrlObject;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::controller::Scorekeeper;
pub use guard::{Error, UserId, USER_HEADER};

/// The server as configured by `Rocket.toml` and `ROCKET_*` variables.
pub fn launch() -> Rocket<Build> {
    mount(rocket::build())
        .attach(AdHoc::config::<AppConfig>())
        .attach(AdHoc::try_on_ignite("Scorekeeper", |rocket| async move {
            let Some(config) = rocket.state::<AppConfig>().cloned() else {
                return Err(rocket);
            };
            match config.scorekeeper().await {
                Ok(keeper) => Ok(rocket.manage(keeper)),
                Err(e) => {
                    error!("Unable to open the record store: {e}");
                    Err(rocket)
                }
            }
        }))
}

/// The server around an already built `Scorekeeper`.
pub fn build(keeper: Scorekeeper) -> Rocket<Build> {
    mount(rocket::build()).manage(keeper)
}

fn mount(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount(
            "/",
            openapi_get_routes![
                courses,
                course,
                add_course,
                update_course,
                delete_course,
                rounds,
                round,
                round_summary,
                start_round,
                edit_round,
                record_score,
                finish_round,
                delete_round,
                handicap,
                statistics,
                distances,
                layup,
                publish_location,
            ],
        )
        .mount("/", routes![stream::distance_stream])
        .mount(
            "/swagger",
            make_swagger_ui(&SwaggerUIConfig {
                url: "../openapi.json".to_owned(),
                ..Default::default()
            }),
        )
        .mount(
            "/rapidoc",
            make_rapidoc(&RapiDocConfig {
                general: GeneralConfig {
                    spec_urls: vec![UrlObject::new("General", "../openapi.json")],
                    ..Default::default()
                },
                ..Default::default()
            }),
        )
        .register("/", catchers![json_error])
}

/// Failures that never reach a route, e.g. a missing `X-User-Id` or malformed JSON.
#[catch(default)]
fn json_error(status: Status, _req: &Request) -> Json<Value> {
    Json(json!({ "error": status.reason_lossy() }))
}
