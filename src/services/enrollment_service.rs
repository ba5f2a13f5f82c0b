use crate::error::AppError;
use crate::models::{Course, Enrollment};
use crate::repository::CatalogStore;

pub struct EnrollmentService {
    store: CatalogStore,
}

impl EnrollmentService {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    /// Enrolls a known student in a known course once.
    pub async fn enroll(&self, student_id: &str, course_id: &str) -> Result<Enrollment, AppError> {
        self.store.enroll_once(student_id, course_id).await
    }

    pub async fn unenroll(&self, student_id: &str, course_id: &str) -> Result<(), AppError> {
        if self.store.get_user(student_id).await?.is_none() {
            return Err(AppError::NotFound);
        }
        self.store.remove_enrollment(student_id, course_id).await
    }

    pub async fn enrolled_courses(&self, student_id: &str) -> Result<Vec<Course>, AppError> {
        let student = self.store.get_user(student_id).await?.ok_or(AppError::NotFound)?;
        Ok(self
            .store
            .get_courses()
            .await?
            .into_iter()
            .filter(|c| student.is_enrolled_in(&c.id))
            .collect())
    }
}
