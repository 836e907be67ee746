//! Stored entities and the shared in-memory store.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub enrolled_courses: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub course_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_thumbnail: Option<String>,
    pub enrolled_students: Vec<String>,
    pub lectures: Vec<String>,
    pub creator: String,
    pub is_published: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    #[serde(rename = "_id")]
    pub id: String,
    pub lecture_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    pub is_preview_free: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureProgress {
    pub lecture_id: String,
    pub viewed: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Progress {
    pub lectures: Vec<LectureProgress>,
    pub completed: bool,
}

#[derive(Clone, Debug)]
pub struct Purchase {
    pub id: String,
    pub course_id: String,
    pub user_id: String,
    pub amount: Option<f64>,
    pub status: String,
}

/// Everything the backend knows. Only one browser session is tracked.
#[derive(Debug, Default)]
pub struct Store {
    pub users: HashMap<String, User>,
    pub current_user: Option<String>,
    pub courses: HashMap<String, Course>,
    pub lectures: HashMap<String, Lecture>,
    pub progress: HashMap<(String, String), Progress>,
    pub purchases: Vec<Purchase>,
}

impl Store {
    pub fn require_user(&self) -> Result<&User, Failure> {
        self.current_user
            .as_ref()
            .and_then(|id| self.users.get(id))
            .ok_or(Failure(StatusCode::UNAUTHORIZED, "User not authenticated"))
    }

    pub fn course(&self, id: &str) -> Result<&Course, Failure> {
        self.courses
            .get(id)
            .ok_or(Failure(StatusCode::NOT_FOUND, "Course not found"))
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Error response rendered as `{"success": false, "message": ...}`.
#[derive(Debug)]
pub struct Failure(pub StatusCode, pub &'static str);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "success": false, "message": self.1 });
        (self.0, Json(body)).into_response()
    }
}
