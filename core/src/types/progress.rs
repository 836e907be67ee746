use serde::{Deserialize, Serialize};

use super::Course;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LectureProgress {
    pub lecture_id: String,
    pub viewed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub course_details: Course,
    #[serde(default)]
    pub progress: Vec<LectureProgress>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseProgressResponse {
    pub data: CourseProgress,
}
