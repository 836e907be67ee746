//! In-memory backend for the course platform API.
//!
//! Serves the user, course, progress and purchase resources under
//! `/api/v1/`. State lives in a single `Store` behind a `tokio` `RwLock` and
//! only one signed-in session is tracked at a time.

pub mod course;
pub mod model;
pub mod progress;
pub mod purchase;
pub mod user;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};

pub use model::{Course, Db, Lecture, Store, User};

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/v1/user/register", post(user::register))
        .route("/api/v1/user/login", post(user::login))
        .route("/api/v1/user/logout", get(user::logout))
        .route("/api/v1/user/profile", get(user::profile))
        .route("/api/v1/user/profile/update", put(user::update_profile))
        .route(
            "/api/v1/course/",
            post(course::create_course).get(course::creator_courses),
        )
        .route("/api/v1/course/search", get(course::search_courses))
        .route("/api/v1/course/published-courses", get(course::published_courses))
        .route(
            "/api/v1/course/{id}",
            get(course::get_course)
                .put(course::edit_course)
                .patch(course::publish_course),
        )
        .route(
            "/api/v1/course/{id}/lecture",
            post(course::create_lecture).get(course::course_lectures),
        )
        .route(
            "/api/v1/course/{id}/lecture/{lecture_id}",
            post(course::edit_lecture),
        )
        .route(
            "/api/v1/course/lecture/{lecture_id}",
            get(course::get_lecture).delete(course::remove_lecture),
        )
        .route("/api/v1/progress/{id}", get(progress::get_progress))
        .route(
            "/api/v1/progress/{id}/lecture/{lecture_id}/view",
            post(progress::view_lecture),
        )
        .route("/api/v1/progress/{id}/complete", post(progress::complete))
        .route("/api/v1/progress/{id}/incomplete", post(progress::incomplete))
        .route(
            "/api/v1/purchase/checkout/create-checkout-session",
            post(purchase::create_checkout_session),
        )
        .route(
            "/api/v1/purchase/course/{id}/detail-with-status",
            get(purchase::detail_with_status),
        )
        .route("/api/v1/purchase/", get(purchase::purchased_courses))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}
