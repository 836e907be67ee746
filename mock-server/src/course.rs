use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::model::{new_id, Course, Db, Failure, Lecture};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseInput {
    pub course_title: String,
    pub category: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInput {
    pub query: Option<String>,
    pub categories: Option<String>,
    pub sort_by_price: Option<String>,
}

#[derive(Deserialize)]
pub struct PublishInput {
    pub publish: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLectureInput {
    pub lecture_title: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub video_url: String,
    pub public_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditLectureInput {
    pub lecture_title: Option<String>,
    pub video_info: Option<VideoInfo>,
    #[serde(default)]
    pub is_preview_free: bool,
}

pub async fn create_course(
    State(db): State<Db>,
    Json(input): Json<CreateCourseInput>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    if input.course_title.is_empty() || input.category.is_empty() {
        return Err(Failure(StatusCode::BAD_REQUEST, "Course title and category is required."));
    }
    let mut store = db.write().await;
    let creator = store.require_user()?.id.clone();
    let course = Course {
        id: new_id(),
        course_title: input.course_title,
        sub_title: None,
        description: None,
        category: input.category,
        course_level: None,
        course_price: None,
        course_thumbnail: None,
        enrolled_students: Vec::new(),
        lectures: Vec::new(),
        creator,
        is_published: false,
    };
    info!(course = %course.id, "course created");
    store.courses.insert(course.id.clone(), course.clone());
    Ok((
        StatusCode::CREATED,
        Json(json!({ "course": course, "message": "Course created." })),
    ))
}

pub async fn search_courses(
    State(db): State<Db>,
    Query(input): Query<SearchInput>,
) -> Json<Value> {
    let store = db.read().await;
    let needle = input.query.unwrap_or_default().to_lowercase();
    let categories: Vec<String> = input
        .categories
        .map(|c| c.split(',').map(str::to_string).collect())
        .unwrap_or_default();
    let mut courses: Vec<Course> = store
        .courses
        .values()
        .filter(|c| c.is_published)
        .filter(|c| {
            needle.is_empty()
                || c.course_title.to_lowercase().contains(&needle)
                || c.category.to_lowercase().contains(&needle)
        })
        .filter(|c| categories.is_empty() || categories.contains(&c.category))
        .cloned()
        .collect();
    let price = |c: &Course| c.course_price.unwrap_or(0.0);
    match input.sort_by_price.as_deref() {
        Some("low") => courses.sort_by(|a, b| price(a).total_cmp(&price(b))),
        Some("high") => courses.sort_by(|a, b| price(b).total_cmp(&price(a))),
        _ => courses.sort_by(|a, b| a.course_title.cmp(&b.course_title)),
    }
    Json(json!({ "success": true, "courses": courses }))
}

pub async fn published_courses(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    let courses: Vec<&Course> = store.courses.values().filter(|c| c.is_published).collect();
    Json(json!({ "courses": courses }))
}

pub async fn creator_courses(State(db): State<Db>) -> Result<Json<Value>, Failure> {
    let store = db.read().await;
    let creator = &store.require_user()?.id;
    let courses: Vec<&Course> = store
        .courses
        .values()
        .filter(|c| &c.creator == creator)
        .collect();
    Ok(Json(json!({ "courses": courses })))
}

/// Replaces the fields present in the form; a file part sets the thumbnail.
pub async fn edit_course(
    State(db): State<Db>,
    Path(id): Path<String>,
    mut form: Multipart,
) -> Result<Json<Value>, Response> {
    let mut fields = Vec::new();
    let mut thumbnail = None;
    while let Some(field) = form.next_field().await.map_err(IntoResponse::into_response)? {
        let name = field.name().unwrap_or_default().to_string();
        if let Some(file_name) = field.file_name().map(str::to_string) {
            field.bytes().await.map_err(IntoResponse::into_response)?;
            thumbnail = Some(format!("https://media.example.com/{}-{file_name}", new_id()));
        } else {
            fields.push((name, field.text().await.map_err(IntoResponse::into_response)?));
        }
    }

    let mut store = db.write().await;
    store.require_user().map_err(IntoResponse::into_response)?;
    let Some(course) = store.courses.get_mut(&id) else {
        return Err(Failure(StatusCode::NOT_FOUND, "Course not found!").into_response());
    };
    for (name, value) in fields {
        match name.as_str() {
            "courseTitle" => course.course_title = value,
            "subTitle" => course.sub_title = Some(value),
            "description" => course.description = Some(value),
            "category" => course.category = value,
            "courseLevel" => course.course_level = Some(value),
            "coursePrice" => course.course_price = value.parse().ok(),
            _ => {}
        }
    }
    if thumbnail.is_some() {
        course.course_thumbnail = thumbnail;
    }
    Ok(Json(json!({ "course": course, "message": "Course updated successfully." })))
}

pub async fn get_course(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Failure> {
    let store = db.read().await;
    let course = store.course(&id)?;
    Ok(Json(json!({ "course": course })))
}

pub async fn publish_course(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(input): Query<PublishInput>,
) -> Result<Json<Value>, Failure> {
    let mut store = db.write().await;
    store.require_user()?;
    let course = store
        .courses
        .get_mut(&id)
        .ok_or(Failure(StatusCode::NOT_FOUND, "Course not found!"))?;
    course.is_published = input.publish;
    let message = if input.publish {
        "Course is Published"
    } else {
        "Course is Unpublished"
    };
    Ok(Json(json!({ "message": message })))
}

pub async fn create_lecture(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<CreateLectureInput>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    if input.lecture_title.is_empty() {
        return Err(Failure(StatusCode::BAD_REQUEST, "Lecture title is required"));
    }
    let mut store = db.write().await;
    store.require_user()?;
    let lecture = Lecture {
        id: new_id(),
        lecture_title: input.lecture_title,
        video_url: None,
        public_id: None,
        is_preview_free: false,
    };
    let course = store
        .courses
        .get_mut(&id)
        .ok_or(Failure(StatusCode::NOT_FOUND, "Course not found"))?;
    course.lectures.push(lecture.id.clone());
    store.lectures.insert(lecture.id.clone(), lecture.clone());
    Ok((
        StatusCode::CREATED,
        Json(json!({ "lecture": lecture, "message": "Lecture created successfully." })),
    ))
}

pub async fn course_lectures(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Failure> {
    let store = db.read().await;
    let course = store.course(&id)?;
    let lectures: Vec<&Lecture> = course
        .lectures
        .iter()
        .filter_map(|l| store.lectures.get(l))
        .collect();
    Ok(Json(json!({ "lectures": lectures })))
}

pub async fn edit_lecture(
    State(db): State<Db>,
    Path((course_id, lecture_id)): Path<(String, String)>,
    Json(input): Json<EditLectureInput>,
) -> Result<Json<Value>, Failure> {
    let mut store = db.write().await;
    store.require_user()?;
    let course = store.course(&course_id)?;
    if !course.lectures.contains(&lecture_id) {
        return Err(Failure(StatusCode::NOT_FOUND, "Lecture not found!"));
    }
    let lecture = store
        .lectures
        .get_mut(&lecture_id)
        .ok_or(Failure(StatusCode::NOT_FOUND, "Lecture not found!"))?;
    if let Some(title) = input.lecture_title {
        lecture.lecture_title = title;
    }
    if let Some(video) = input.video_info {
        lecture.video_url = Some(video.video_url);
        lecture.public_id = Some(video.public_id);
    }
    lecture.is_preview_free = input.is_preview_free;
    Ok(Json(json!({ "lecture": lecture, "message": "Lecture updated successfully." })))
}

pub async fn remove_lecture(
    State(db): State<Db>,
    Path(lecture_id): Path<String>,
) -> Result<Json<Value>, Failure> {
    let mut store = db.write().await;
    store.require_user()?;
    if store.lectures.remove(&lecture_id).is_none() {
        return Err(Failure(StatusCode::NOT_FOUND, "Lecture not found!"));
    }
    for course in store.courses.values_mut() {
        course.lectures.retain(|l| l != &lecture_id);
    }
    Ok(Json(json!({ "success": true, "message": "Lecture removed successfully." })))
}

pub async fn get_lecture(
    State(db): State<Db>,
    Path(lecture_id): Path<String>,
) -> Result<Json<Value>, Failure> {
    let store = db.read().await;
    let lecture = store
        .lectures
        .get(&lecture_id)
        .ok_or(Failure(StatusCode::NOT_FOUND, "Lecture not found!"))?;
    Ok(Json(json!({ "lecture": lecture })))
}
