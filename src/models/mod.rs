pub mod course;
pub mod enrollment;
pub mod user;

pub use course::{CatalogStats, Course, CourseQuery, Level, NewCourseRequest};
pub use enrollment::{EnrollRequest, Enrollment};
pub use user::{LoginRequest, RegisterRequest, Role, User};
