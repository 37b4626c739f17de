use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rocket_okapi::okapi::schemars;
use schemars::JsonSchema;
use serde::Serialize;
use tokio::sync::{watch, Mutex};

use super::geo::Coordinate;

/// Fixes closer than this to the last published one are dropped.
pub const DEFAULT_DISTANCE_FILTER_METERS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PositionFix {
    pub coordinate: Coordinate,
    pub accuracy_m: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl PositionFix {
    pub fn now(coordinate: Coordinate, accuracy_m: Option<f64>) -> Self {
        Self {
            coordinate,
            accuracy_m,
            recorded_at: Utc::now(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    #[error("No position fix within {0:?}")]
    Timeout(Duration),
    #[error("Location feed closed")]
    Closed,
}

/// Latest known position of one device. Publishers push fixes, subscribers
/// wait for the next one.
#[derive(Debug, Clone)]
pub struct LocationFeed {
    sender: Arc<watch::Sender<Option<PositionFix>>>,
    distance_filter_m: f64,
}

impl LocationFeed {
    pub fn new(distance_filter_m: f64) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
            distance_filter_m,
        }
    }

    /// Returns whether the fix was forwarded to subscribers.
    pub fn publish(&self, fix: PositionFix) -> bool {
        let filter = self.distance_filter_m;
        self.sender.send_if_modified(|current| {
            let moved = current.map_or(true, |previous| {
                previous.coordinate.distance_meters(&fix.coordinate) >= filter
            });
            if moved {
                *current = Some(fix);
            }
            moved
        })
    }

    pub fn current(&self) -> Option<PositionFix> {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> LocationSubscription {
        LocationSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscribers(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Dropping the subscription cancels it.
#[derive(Debug)]
pub struct LocationSubscription {
    receiver: watch::Receiver<Option<PositionFix>>,
}

impl LocationSubscription {
    pub fn current(&self) -> Option<PositionFix> {
        *self.receiver.borrow()
    }

    /// Waits for a fix newer than the last one seen. `None` once the feed is closed.
    pub async fn next(&mut self) -> Option<PositionFix> {
        loop {
            self.receiver.changed().await.ok()?;
            if let Some(fix) = *self.receiver.borrow_and_update() {
                return Some(fix);
            }
        }
    }

    pub async fn next_within(&mut self, timeout: Duration) -> Result<PositionFix, LocationError> {
        tokio::time::timeout(timeout, self.next())
            .await
            .map_err(|_| LocationError::Timeout(timeout))?
            .ok_or(LocationError::Closed)
    }
}

/// One feed per user.
#[derive(Debug, Clone)]
pub struct LocationHub {
    feeds: Arc<Mutex<HashMap<String, LocationFeed>>>,
    distance_filter_m: f64,
}

impl Default for LocationHub {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE_FILTER_METERS)
    }
}

impl LocationHub {
    pub fn new(distance_filter_m: f64) -> Self {
        Self {
            feeds: Arc::new(Mutex::new(HashMap::new())),
            distance_filter_m,
        }
    }

    pub async fn feed(&self, user_id: &str) -> LocationFeed {
        self.feeds
            .lock()
            .await
            .entry(user_id.to_string())
            .or_insert_with(|| LocationFeed::new(self.distance_filter_m))
            .clone()
    }

    pub async fn publish(&self, user_id: &str, fix: PositionFix) -> bool {
        let published = self.feed(user_id).await.publish(fix);
        if published {
            debug!("Position for {user_id}: {:?}", fix.coordinate);
        }
        published
    }

    pub async fn current(&self, user_id: &str) -> Option<PositionFix> {
        self.feeds.lock().await.get(user_id).and_then(LocationFeed::current)
    }

    pub async fn subscribe(&self, user_id: &str) -> LocationSubscription {
        self.feed(user_id).await.subscribe()
    }

    /// Ends every subscription on the user's feed.
    pub async fn close(&self, user_id: &str) {
        if self.feeds.lock().await.remove(user_id).is_some() {
            info!("Closed location feed for {user_id}");
        }
    }
}
