use rocket::response::stream::{Event, EventStream};
use rocket::tokio::select;
use rocket::{Shutdown, State};

use crate::api::{Error, UserId};
use crate::controller::Scorekeeper;

/// Server sent events of `GreenDistances`, one per accepted position fix.
/// Starts with the latest known position when there is one.
#[get("/rounds/<id>/holes/<number>/distances/stream")]
pub async fn distance_stream(
    keeper: &State<Scorekeeper>,
    user: UserId,
    id: &str,
    number: u8,
    mut shutdown: Shutdown,
) -> Result<EventStream![], Error> {
    let hole = keeper.hole_for_round(user.as_str(), id, number).await?;
    let mut subscription = keeper.subscribe_location(user.as_str()).await;
    debug!("{} is following hole {}", user.as_str(), hole.number);

    Ok(EventStream! {
        if let Some(fix) = subscription.current() {
            yield Event::json(&hole.distances_from(&fix.coordinate));
        }
        loop {
            let fix = select! {
                fix = subscription.next() => match fix {
                    Some(fix) => fix,
                    None => break,
                },
                _ = &mut shutdown => break,
            };
            yield Event::json(&hole.distances_from(&fix.coordinate));
        }
    })
}
