//! Request and response DTOs for the four backend resources.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift. Field names follow the backend's
//! camelCase JSON, with Mongo-style `_id` mapped to `id`.

pub mod auth;
pub mod course;
pub mod progress;
pub mod purchase;

use serde::{Deserialize, Serialize};

pub use auth::{LoginUser, ProfileFields, ProfileUpdate, RegisterUser, Role, User, UserResponse};
pub use course::{
    Course, CourseEdit, CourseResponse, CoursesResponse, CreateCourse, CreateLecture, EditLecture,
    Lecture, LectureResponse, LecturesResponse, SearchParams, SortByPrice, Thumbnail, VideoInfo,
};
pub use progress::{CourseProgress, CourseProgressResponse, LectureProgress};
pub use purchase::{CheckoutSession, CourseDetailWithStatus, PurchasedCourse, PurchasedCourses};

/// Bare `{success, message}` acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
