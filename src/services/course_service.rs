use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{CatalogStats, Course, CourseQuery, NewCourseRequest};
use crate::repository::CatalogStore;

pub const DEFAULT_COURSE_IMAGE: &str = "/src/assets/programming-course.jpg";
pub const DEFAULT_COURSE_RATING: f64 = 4.5;
pub const ALL_CATEGORIES: &str = "all";

pub struct CourseService {
    store: CatalogStore,
}

impl CourseService {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    pub async fn create_course(&self, req: NewCourseRequest) -> Result<Course, AppError> {
        if req.title.trim().is_empty() {
            return Err(AppError::BadRequest("title is required".to_string()));
        }
        if !req.price.is_finite() || req.price < 0.0 {
            return Err(AppError::BadRequest(format!("invalid price: {}", req.price)));
        }

        let modules = req
            .modules
            .into_iter()
            .filter(|m| !m.trim().is_empty())
            .collect();

        let course = Course {
            id: format!("course_{}", Uuid::new_v4()),
            title: req.title,
            description: req.description,
            instructor: req.instructor,
            duration: req.duration,
            level: req.level,
            image: req.image.unwrap_or_else(|| DEFAULT_COURSE_IMAGE.to_string()),
            price: req.price,
            category: req.category,
            modules,
            rating: DEFAULT_COURSE_RATING,
            students: 0,
        };

        self.store.add_course(course.clone()).await?;
        info!("course {} added: {} ({})", course.id, course.title, course.level);
        Ok(course)
    }

    pub async fn search(&self, query: &CourseQuery) -> Result<Vec<Course>, AppError> {
        let courses = self.store.get_courses().await?;

        let enrolled = match &query.student_id {
            Some(student_id) => self
                .store
                .get_user(student_id)
                .await?
                .map(|u| u.enrolled_courses)
                .unwrap_or_default(),
            None => Vec::new(),
        };

        let term = query
            .search
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();
        let category = query
            .category
            .as_deref()
            .filter(|c| *c != ALL_CATEGORIES);

        Ok(courses
            .into_iter()
            .filter(|c| matches_term(c, &term))
            .filter(|c| category.is_none_or(|cat| c.category == cat))
            .filter(|c| !enrolled.contains(&c.id))
            .collect())
    }

    pub async fn categories(&self) -> Result<Vec<String>, AppError> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for course in self.store.get_courses().await? {
            if !categories.contains(&course.category) {
                categories.push(course.category);
            }
        }
        Ok(categories)
    }

    pub async fn stats(&self) -> Result<CatalogStats, AppError> {
        let courses = self.store.get_courses().await?;
        let enrollments = self.store.get_enrollments().await?;

        Ok(CatalogStats {
            total_courses: courses.len(),
            total_students: courses.iter().map(|c| c.students).sum(),
            total_enrollments: enrollments.len(),
        })
    }
}

fn matches_term(course: &Course, term: &str) -> bool {
    term.is_empty()
        || course.title.to_lowercase().contains(term)
        || course.description.to_lowercase().contains(term)
        || course.instructor.to_lowercase().contains(term)
}
