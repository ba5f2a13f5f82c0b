use crate::repository::CatalogStore;
use crate::services::{AuthService, CourseService, EnrollmentService};

#[derive(Clone)]
pub struct AppState {
    pub store: CatalogStore,
}

impl AppState {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.store.clone())
    }

    pub fn courses(&self) -> CourseService {
        CourseService::new(self.store.clone())
    }

    pub fn enrollments(&self) -> EnrollmentService {
        EnrollmentService::new(self.store.clone())
    }
}
