use serde::{Deserialize, Serialize};

use super::Course;

/// Payment-provider session the browser is redirected to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutSession {
    #[serde(default)]
    pub success: bool,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetailWithStatus {
    pub course: Course,
    pub purchased: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedCourse {
    #[serde(rename = "_id")]
    pub id: String,
    pub course_id: Course,
    pub user_id: String,
    #[serde(default)]
    pub amount: Option<f64>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedCourses {
    #[serde(default)]
    pub purchased_course: Vec<PurchasedCourse>,
}
