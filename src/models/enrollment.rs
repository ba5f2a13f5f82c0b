use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub enrolled_at: String,
    pub progress: u32,
}

impl Enrollment {
    pub fn matches(&self, student_id: &str, course_id: &str) -> bool {
        self.student_id == student_id && self.course_id == course_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub student_id: String,
    pub course_id: String,
}
