use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::model::{new_id, Db, Failure, Purchase};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutInput {
    pub course_id: String,
}

/// No payment provider is involved: the purchase completes immediately and
/// the returned URL is a placeholder redirect. A repeated checkout returns the
/// existing purchase's session.
pub async fn create_checkout_session(
    State(db): State<Db>,
    Json(input): Json<CheckoutInput>,
) -> Result<Json<Value>, Failure> {
    let mut store = db.write().await;
    let user_id = store.require_user()?.id.clone();
    let amount = store.course(&input.course_id)?.course_price;
    if let Some(existing) = store
        .purchases
        .iter()
        .find(|p| p.user_id == user_id && p.course_id == input.course_id)
    {
        info!(purchase = %existing.id, course = %input.course_id, "checkout repeated");
        let url = format!("https://checkout.example.com/session/{}", existing.id);
        return Ok(Json(json!({ "success": true, "url": url })));
    }
    let purchase = Purchase {
        id: new_id(),
        course_id: input.course_id.clone(),
        user_id: user_id.clone(),
        amount,
        status: "completed".to_string(),
    };
    let url = format!("https://checkout.example.com/session/{}", purchase.id);
    info!(purchase = %purchase.id, course = %input.course_id, "checkout");
    store.purchases.push(purchase);
    if let Some(course) = store.courses.get_mut(&input.course_id) {
        if !course.enrolled_students.contains(&user_id) {
            course.enrolled_students.push(user_id.clone());
        }
    }
    if let Some(user) = store.users.get_mut(&user_id) {
        if !user.enrolled_courses.contains(&input.course_id) {
            user.enrolled_courses.push(input.course_id);
        }
    }
    Ok(Json(json!({ "success": true, "url": url })))
}

pub async fn detail_with_status(
    State(db): State<Db>,
    Path(course_id): Path<String>,
) -> Result<Json<Value>, Failure> {
    let store = db.read().await;
    let user_id = &store.require_user()?.id;
    let course = store.course(&course_id)?;
    let purchased = store
        .purchases
        .iter()
        .any(|p| &p.user_id == user_id && p.course_id == course_id && p.status == "completed");
    Ok(Json(json!({ "course": course, "purchased": purchased })))
}

pub async fn purchased_courses(State(db): State<Db>) -> Result<Json<Value>, Failure> {
    let store = db.read().await;
    let user_id = &store.require_user()?.id;
    let purchased: Vec<Value> = store
        .purchases
        .iter()
        .filter(|p| &p.user_id == user_id && p.status == "completed")
        .map(|p| {
            let course = store.courses.get(&p.course_id);
            json!({
                "_id": p.id,
                "courseId": course,
                "userId": p.user_id,
                "amount": p.amount,
                "status": p.status,
            })
        })
        .collect();
    Ok(Json(json!({ "purchasedCourse": purchased })))
}
