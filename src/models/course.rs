use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: String,
    pub level: Level,
    pub image: String,
    pub price: f64,
    pub category: String,
    pub modules: Vec<String>,
    pub rating: f64,
    pub students: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: String,
    pub level: Level,
    #[serde(default)]
    pub image: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub modules: Vec<String>,
}

/// Filters applied when browsing the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseQuery {
    #[serde(default)]
    pub search: Option<String>,
    /// `"all"` or absent matches every category.
    #[serde(default)]
    pub category: Option<String>,
    /// Courses this student is already enrolled in are left out.
    #[serde(default)]
    pub student_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_courses: usize,
    pub total_students: u64,
    pub total_enrollments: usize,
}
