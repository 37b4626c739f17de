mod on_course;
mod rounds;

use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{Course, GolfRound, Hole, LocationHub};
use crate::api::Error;
use crate::dto::NewCourse;
use crate::store::{MemoryRepository, Repository};

/// Owns the stores and the location hub; every API operation goes through here.
#[derive(Clone)]
pub struct Scorekeeper {
    courses: Arc<dyn Repository<Course>>,
    rounds: Arc<dyn Repository<GolfRound>>,
    location: LocationHub,
    round_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl Scorekeeper {
    pub fn new(
        courses: Arc<dyn Repository<Course>>,
        rounds: Arc<dyn Repository<GolfRound>>,
        location: LocationHub,
    ) -> Self {
        Self {
            courses,
            rounds,
            location,
            round_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryRepository::<Course>::new()),
            Arc::new(MemoryRepository::<GolfRound>::new()),
            LocationHub::default(),
        )
    }

    pub fn location(&self) -> &LocationHub {
        &self.location
    }

    /// Held across a read, change and write of one round.
    async fn lock_round(&self, id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .round_locks
            .lock()
            .await
            .entry(id.to_string())
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    async fn forget_round_lock(&self, id: &str) {
        self.round_locks.lock().await.remove(id);
    }
}

impl Scorekeeper {
    /// Courses sorted by name, optionally narrowed by a case-insensitive search
    /// on name or location.
    pub async fn list_courses(&self, search: Option<&str>) -> Result<Vec<Course>, Error> {
        Ok(self
            .courses
            .list()
            .await?
            .into_iter()
            .filter(|course| search.map_or(true, |search| course.matches(search)))
            .sorted_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .collect_vec())
    }

    pub async fn course(&self, id: &str) -> Result<Course, Error> {
        self.courses
            .get(id)
            .await?
            .ok_or_else(|| Error::CourseNotFound(id.to_string()))
    }

    pub async fn add_course(&self, user_id: &str, course: NewCourse) -> Result<Course, Error> {
        let course = course.into_course(user_id.to_string())?;
        self.courses.put(course.clone()).await?;
        info!("{user_id} added course `{}` ({})", course.name, course.id);
        Ok(course)
    }

    /// Replaces everything but the id and the creator.
    pub async fn update_course(
        &self,
        user_id: &str,
        id: &str,
        update: NewCourse,
    ) -> Result<Course, Error> {
        let existing = self.owned_course(user_id, id).await?;
        let mut course = update.into_course(existing.creator_id)?;
        course.id = existing.id;
        self.courses.put(course.clone()).await?;
        Ok(course)
    }

    pub async fn delete_course(&self, user_id: &str, id: &str) -> Result<(), Error> {
        self.owned_course(user_id, id).await?;
        self.courses.delete(id).await?;
        info!("{user_id} deleted course {id}");
        Ok(())
    }

    pub async fn hole(&self, course_id: &str, number: u8) -> Result<Hole, Error> {
        let course = self.course(course_id).await?;
        course
            .hole(number)
            .cloned()
            .ok_or(Error::HoleNotFound {
                course: course.id,
                hole: number,
            })
    }

    async fn owned_course(&self, user_id: &str, id: &str) -> Result<Course, Error> {
        let course = self.course(id).await?;
        if course.creator_id != user_id {
            return Err(Error::NotCourseOwner(course.id));
        }
        Ok(course)
    }
}
