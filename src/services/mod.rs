pub mod auth_service;
pub mod course_service;
pub mod enrollment_service;

pub use auth_service::AuthService;
pub use course_service::CourseService;
pub use enrollment_service::EnrollmentService;
