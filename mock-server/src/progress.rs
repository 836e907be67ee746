use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::model::{Db, Failure, LectureProgress, Store};

/// Resolves the signed-in user and checks the course exists.
fn key(store: &Store, course_id: &str) -> Result<(String, String), Failure> {
    let user = store.require_user()?.id.clone();
    store.course(course_id)?;
    Ok((user, course_id.to_string()))
}

pub async fn get_progress(
    State(db): State<Db>,
    Path(course_id): Path<String>,
) -> Result<Json<Value>, Failure> {
    let store = db.read().await;
    let key = key(&store, &course_id)?;
    let course = store.course(&course_id)?;
    let progress = store.progress.get(&key).cloned().unwrap_or_default();
    Ok(Json(json!({
        "data": {
            "courseDetails": course,
            "progress": progress.lectures,
            "completed": progress.completed,
        }
    })))
}

pub async fn view_lecture(
    State(db): State<Db>,
    Path((course_id, lecture_id)): Path<(String, String)>,
) -> Result<Json<Value>, Failure> {
    let mut store = db.write().await;
    let key = key(&store, &course_id)?;
    let total = store.course(&course_id)?.lectures.len();
    if !store.course(&course_id)?.lectures.contains(&lecture_id) {
        return Err(Failure(StatusCode::NOT_FOUND, "Lecture not found!"));
    }
    let progress = store.progress.entry(key).or_default();
    match progress.lectures.iter_mut().find(|l| l.lecture_id == lecture_id) {
        Some(entry) => entry.viewed = true,
        None => progress.lectures.push(LectureProgress {
            lecture_id,
            viewed: true,
        }),
    }
    let viewed = progress.lectures.iter().filter(|l| l.viewed).count();
    if viewed == total {
        progress.completed = true;
    }
    Ok(Json(json!({ "message": "Lecture progress updated successfully." })))
}

async fn set_completed(db: Db, course_id: String, completed: bool) -> Result<Json<Value>, Failure> {
    let mut store = db.write().await;
    let key = key(&store, &course_id)?;
    let lecture_ids = store.course(&course_id)?.lectures.clone();
    let progress = store.progress.entry(key).or_default();
    progress.lectures = lecture_ids
        .into_iter()
        .map(|lecture_id| LectureProgress {
            lecture_id,
            viewed: completed,
        })
        .collect();
    progress.completed = completed;
    let message = if completed {
        "Course marked as completed."
    } else {
        "Course marked as incompleted."
    };
    Ok(Json(json!({ "message": message })))
}

pub async fn complete(
    State(db): State<Db>,
    Path(course_id): Path<String>,
) -> Result<Json<Value>, Failure> {
    set_completed(db, course_id, true).await
}

pub async fn incomplete(
    State(db): State<Db>,
    Path(course_id): Path<String>,
) -> Result<Json<Value>, Failure> {
    set_completed(db, course_id, false).await
}
