use serde::Serialize;

use super::{build_request, json_body, parse_json, resource_url};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::registry::{Endpoint, Resource};
use crate::types::{CheckoutSession, CourseDetailWithStatus, PurchasedCourses};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutRequest<'a> {
    course_id: &'a str,
}

/// Client for `/api/v1/purchase`: checkout and purchased courses.
#[derive(Debug, Clone)]
pub struct PurchaseClient {
    base_url: String,
}

impl PurchaseClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: resource_url(base_url, Resource::Purchase),
        }
    }

    pub fn build_create_checkout_session(&self, course_id: &str) -> Result<HttpRequest, ApiError> {
        Ok(build_request(
            &self.base_url,
            Endpoint::CreateCheckoutSession {
                course_id: course_id.to_string(),
            },
            "",
            Some(json_body(&CheckoutRequest { course_id })?),
        ))
    }

    pub fn build_get_course_detail_with_status(&self, course_id: &str) -> HttpRequest {
        build_request(
            &self.base_url,
            Endpoint::GetCourseDetailWithStatus {
                course_id: course_id.to_string(),
            },
            "",
            None,
        )
    }

    pub fn build_get_purchased_courses(&self) -> HttpRequest {
        build_request(&self.base_url, Endpoint::GetPurchasedCourses, "", None)
    }

    pub fn parse_create_checkout_session(
        &self,
        response: HttpResponse,
    ) -> Result<CheckoutSession, ApiError> {
        parse_json(&response)
    }

    pub fn parse_get_course_detail_with_status(
        &self,
        response: HttpResponse,
    ) -> Result<CourseDetailWithStatus, ApiError> {
        parse_json(&response)
    }

    pub fn parse_get_purchased_courses(
        &self,
        response: HttpResponse,
    ) -> Result<PurchasedCourses, ApiError> {
        parse_json(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{response, BASE, COURSE_JSON};
    use crate::http::{HttpMethod, RequestBody};

    fn client() -> PurchaseClient {
        PurchaseClient::new(BASE)
    }

    #[test]
    fn build_create_checkout_session_produces_correct_request() {
        let req = client().build_create_checkout_session("c1").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.path,
            "http://localhost:8080/api/v1/purchase/checkout/create-checkout-session"
        );
        assert_eq!(
            req.body.as_ref().and_then(RequestBody::as_json),
            Some(r#"{"courseId":"c1"}"#)
        );
    }

    #[test]
    fn build_detail_and_list_paths() {
        let c = client();
        assert_eq!(
            c.build_get_course_detail_with_status("c1").path,
            "http://localhost:8080/api/v1/purchase/course/c1/detail-with-status"
        );
        assert_eq!(
            c.build_get_purchased_courses().path,
            "http://localhost:8080/api/v1/purchase/"
        );
    }

    #[test]
    fn purchase_requests_declare_json() {
        let c = client();
        for req in [
            c.build_get_course_detail_with_status("c1"),
            c.build_get_purchased_courses(),
            c.build_create_checkout_session("c1").unwrap(),
        ] {
            assert_eq!(
                req.headers,
                vec![("content-type".to_string(), "application/json".to_string())],
                "{}",
                req.endpoint.name()
            );
        }
    }

    #[test]
    fn parse_checkout_session_success() {
        let session = client()
            .parse_create_checkout_session(response(200, r#"{"success":true,"url":"https://pay.example.com/s/1"}"#))
            .unwrap();
        assert_eq!(session.url, "https://pay.example.com/s/1");
    }

    #[test]
    fn parse_detail_with_status_success() {
        let body = format!(r#"{{"course":{COURSE_JSON},"purchased":true}}"#);
        let detail = client()
            .parse_get_course_detail_with_status(response(200, &body))
            .unwrap();
        assert!(detail.purchased);
        assert_eq!(detail.course.id, "c1");
    }

    #[test]
    fn parse_purchased_courses_success() {
        let body = format!(
            r#"{{"purchasedCourse":[{{"_id":"p1","courseId":{COURSE_JSON},"userId":"u1","amount":49.0,"status":"completed"}}]}}"#
        );
        let purchased = client().parse_get_purchased_courses(response(200, &body)).unwrap();
        assert_eq!(purchased.purchased_course.len(), 1);
        assert_eq!(purchased.purchased_course[0].course_id.id, "c1");
    }
}
