use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use crate::controller::location::DEFAULT_DISTANCE_FILTER_METERS;
use crate::controller::{Course, GolfRound, LocationHub, Scorekeeper};
use crate::store::{JsonFileRepository, MemoryRepository, Repository, StoreError};

/// Read from `Rocket.toml` / `ROCKET_*` alongside Rocket's own settings.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Where `courses.json` and `rounds.json` live. Unset keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub location_distance_filter_m: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            location_distance_filter_m: DEFAULT_DISTANCE_FILTER_METERS,
        }
    }
}

impl AppConfig {
    pub async fn scorekeeper(&self) -> Result<Scorekeeper, StoreError> {
        let location = LocationHub::new(self.location_distance_filter_m);
        let (courses, rounds): (Arc<dyn Repository<Course>>, Arc<dyn Repository<GolfRound>>) =
            match &self.data_dir {
                Some(dir) => {
                    info!("Storing courses and rounds in {}", dir.display());
                    (
                        Arc::new(JsonFileRepository::open(dir.join("courses.json")).await?),
                        Arc::new(JsonFileRepository::open(dir.join("rounds.json")).await?),
                    )
                }
                None => {
                    warn!("No data_dir configured, courses and rounds will not survive a restart");
                    (
                        Arc::new(MemoryRepository::new()),
                        Arc::new(MemoryRepository::new()),
                    )
                }
            };
        Ok(Scorekeeper::new(courses, rounds, location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::scorekeeper::tests::new_course;
    use rocket::figment::providers::{Format, Toml};
    use rocket::figment::Figment;

    #[test]
    fn defaults_when_unset() {
        let config: AppConfig = Figment::new().extract().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.location_distance_filter_m, 2.0);
    }

    #[test]
    fn reads_toml() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string(
                "data_dir = \"/var/lib/golf\"\nlocation_distance_filter_m = 5.0",
            ))
            .extract()
            .unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/golf")));
        assert_eq!(config.location_distance_filter_m, 5.0);
    }

    #[tokio::test]
    async fn data_dir_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let course = config
            .scorekeeper()
            .await
            .unwrap()
            .add_course("alice", new_course("Kiawah", "South Carolina", 18))
            .await
            .unwrap();

        let reopened = config.scorekeeper().await.unwrap();
        assert_eq!(reopened.course(&course.id).await.unwrap(), course);
        assert!(dir.path().join("courses.json").exists());
    }
}
