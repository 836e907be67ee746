use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::model::{new_id, Db, Failure, User};

#[derive(Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ProfileInput {
    pub name: Option<String>,
}

pub async fn register(
    State(db): State<Db>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    if input.name.is_empty() || input.email.is_empty() || input.password.is_empty() {
        return Err(Failure(StatusCode::BAD_REQUEST, "All fields are required."));
    }
    let mut store = db.write().await;
    if store.users.values().any(|u| u.email == input.email) {
        return Err(Failure(StatusCode::BAD_REQUEST, "User already exist with this email."));
    }
    let user = User {
        id: new_id(),
        name: input.name,
        email: input.email,
        password: input.password,
        role: "instructor".to_string(),
        photo_url: None,
        enrolled_courses: Vec::new(),
    };
    info!(user = %user.id, "registered");
    store.users.insert(user.id.clone(), user);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Account created successfully." })),
    ))
}

pub async fn login(
    State(db): State<Db>,
    Json(input): Json<LoginInput>,
) -> Result<Response, Failure> {
    let mut store = db.write().await;
    let user = store
        .users
        .values()
        .find(|u| u.email == input.email && u.password == input.password)
        .cloned()
        .ok_or(Failure(StatusCode::BAD_REQUEST, "Incorrect email or password"))?;
    store.current_user = Some(user.id.clone());
    let cookie = format!("token={}; HttpOnly; Path=/; SameSite=Strict", user.id);
    let body = json!({
        "success": true,
        "message": format!("Welcome back {}", user.name),
        "user": user,
    });
    Ok(([(header::SET_COOKIE, cookie)], Json(body)).into_response())
}

pub async fn logout(State(db): State<Db>) -> impl IntoResponse {
    db.write().await.current_user = None;
    (
        [(header::SET_COOKIE, "token=; Max-Age=0; Path=/".to_string())],
        Json(json!({ "success": true, "message": "Logged out successfully." })),
    )
}

pub async fn profile(State(db): State<Db>) -> Result<Json<Value>, Failure> {
    let store = db.read().await;
    let user = store.require_user()?;
    Ok(Json(json!({ "success": true, "user": user })))
}

/// Accepts either a JSON object or form data carrying `profilePhoto`.
pub async fn update_profile(
    State(db): State<Db>,
    headers: HeaderMap,
    request: Request,
) -> Result<Json<Value>, Response> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    let (name, photo) = if is_json {
        let Json(input) = Json::<ProfileInput>::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        (input.name, None)
    } else {
        let mut form = Multipart::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        let mut name = None;
        let mut photo = None;
        while let Some(field) = form.next_field().await.map_err(IntoResponse::into_response)? {
            let field_name = field.name().unwrap_or_default().to_string();
            if let Some(file_name) = field.file_name().map(str::to_string) {
                field.bytes().await.map_err(IntoResponse::into_response)?;
                photo = Some(format!("https://media.example.com/{}-{file_name}", new_id()));
            } else if field_name == "name" {
                name = Some(field.text().await.map_err(IntoResponse::into_response)?);
            }
        }
        (name, photo)
    };

    let mut store = db.write().await;
    let id = store.require_user().map_err(IntoResponse::into_response)?.id.clone();
    let Some(user) = store.users.get_mut(&id) else {
        return Err(Failure(StatusCode::NOT_FOUND, "User not found").into_response());
    };
    if let Some(name) = name {
        user.name = name;
    }
    if photo.is_some() {
        user.photo_url = photo;
    }
    Ok(Json(json!({
        "success": true,
        "message": "Profile updated successfully.",
        "user": user,
    })))
}
