use url::form_urlencoded;

use super::{build_request, json_body, parse_json, resource_url};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, MultipartForm, RequestBody};
use crate::registry::{Endpoint, Resource};
use crate::types::{
    CourseResponse, CoursesResponse, CreateCourse, CreateLecture, EditLecture, LectureResponse,
    LecturesResponse, MessageResponse, SearchParams,
};

/// Client for `/api/v1/course`: courses, search, publishing and lectures.
#[derive(Debug, Clone)]
pub struct CourseClient {
    base_url: String,
}

impl CourseClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: resource_url(base_url, Resource::Course),
        }
    }

    pub fn build_create_course(&self, input: &CreateCourse) -> Result<HttpRequest, ApiError> {
        Ok(build_request(
            &self.base_url,
            Endpoint::CreateCourse,
            "",
            Some(json_body(input)?),
        ))
    }

    pub fn build_get_search_course(&self, params: &SearchParams) -> HttpRequest {
        build_request(
            &self.base_url,
            Endpoint::GetSearchCourse,
            &search_query(params),
            None,
        )
    }

    pub fn build_get_published_course(&self) -> HttpRequest {
        build_request(&self.base_url, Endpoint::GetPublishedCourse, "", None)
    }

    pub fn build_get_creator_course(&self) -> HttpRequest {
        build_request(&self.base_url, Endpoint::GetCreatorCourse, "", None)
    }

    pub fn build_edit_course(&self, course_id: &str, form: &MultipartForm) -> HttpRequest {
        build_request(
            &self.base_url,
            Endpoint::EditCourse {
                course_id: course_id.to_string(),
            },
            "",
            Some(RequestBody::Multipart(form.clone())),
        )
    }

    pub fn build_get_course_by_id(&self, course_id: &str) -> HttpRequest {
        build_request(
            &self.base_url,
            Endpoint::GetCourseById {
                course_id: course_id.to_string(),
            },
            "",
            None,
        )
    }

    pub fn build_create_lecture(
        &self,
        course_id: &str,
        input: &CreateLecture,
    ) -> Result<HttpRequest, ApiError> {
        Ok(build_request(
            &self.base_url,
            Endpoint::CreateLecture {
                course_id: course_id.to_string(),
            },
            "",
            Some(json_body(input)?),
        ))
    }

    pub fn build_get_course_lecture(&self, course_id: &str) -> HttpRequest {
        build_request(
            &self.base_url,
            Endpoint::GetCourseLecture {
                course_id: course_id.to_string(),
            },
            "",
            None,
        )
    }

    pub fn build_edit_lecture(
        &self,
        course_id: &str,
        lecture_id: &str,
        input: &EditLecture,
    ) -> Result<HttpRequest, ApiError> {
        Ok(build_request(
            &self.base_url,
            Endpoint::EditLecture {
                course_id: course_id.to_string(),
                lecture_id: lecture_id.to_string(),
            },
            "",
            Some(json_body(input)?),
        ))
    }

    pub fn build_remove_lecture(&self, lecture_id: &str) -> HttpRequest {
        build_request(
            &self.base_url,
            Endpoint::RemoveLecture {
                lecture_id: lecture_id.to_string(),
            },
            "",
            None,
        )
    }

    pub fn build_get_lecture_by_id(&self, lecture_id: &str) -> HttpRequest {
        build_request(
            &self.base_url,
            Endpoint::GetLectureById {
                lecture_id: lecture_id.to_string(),
            },
            "",
            None,
        )
    }

    pub fn build_publish_course(&self, course_id: &str, publish: bool) -> HttpRequest {
        build_request(
            &self.base_url,
            Endpoint::PublishCourse {
                course_id: course_id.to_string(),
            },
            &format!("publish={publish}"),
            None,
        )
    }

    pub fn parse_create_course(&self, response: HttpResponse) -> Result<CourseResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_get_search_course(&self, response: HttpResponse) -> Result<CoursesResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_get_published_course(
        &self,
        response: HttpResponse,
    ) -> Result<CoursesResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_get_creator_course(&self, response: HttpResponse) -> Result<CoursesResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_edit_course(&self, response: HttpResponse) -> Result<CourseResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_get_course_by_id(&self, response: HttpResponse) -> Result<CourseResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_create_lecture(&self, response: HttpResponse) -> Result<LectureResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_get_course_lecture(
        &self,
        response: HttpResponse,
    ) -> Result<LecturesResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_edit_lecture(&self, response: HttpResponse) -> Result<LectureResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_remove_lecture(&self, response: HttpResponse) -> Result<MessageResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_get_lecture_by_id(&self, response: HttpResponse) -> Result<LectureResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_publish_course(&self, response: HttpResponse) -> Result<MessageResponse, ApiError> {
        parse_json(&response)
    }
}

/// Form-encodes the supplied filters in a fixed key order: `query`,
/// `categories` (comma-joined), `sortByPrice`. Empty filters are dropped.
fn search_query(params: &SearchParams) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(q) = params.query.as_deref().filter(|q| !q.is_empty()) {
        query.append_pair("query", q);
    }
    if !params.categories.is_empty() {
        query.append_pair("categories", &params.categories.join(","));
    }
    if let Some(sort) = params.sort_by_price {
        query.append_pair("sortByPrice", sort.as_str());
    }
    query.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{response, BASE, COURSE_JSON};
    use crate::http::HttpMethod;
    use crate::types::{SortByPrice, VideoInfo};

    fn client() -> CourseClient {
        CourseClient::new(BASE)
    }

    fn search_path(params: SearchParams) -> String {
        client().build_get_search_course(&params).path
    }

    #[test]
    fn search_with_only_categories() {
        let path = search_path(SearchParams {
            categories: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        });
        assert_eq!(path, "http://localhost:8080/api/v1/course/search?categories=a%2Cb");
    }

    #[test]
    fn search_with_all_params_keeps_stable_order() {
        let path = search_path(SearchParams {
            query: Some("rust async".to_string()),
            categories: vec!["Backend".to_string()],
            sort_by_price: Some(SortByPrice::Low),
        });
        assert_eq!(
            path,
            "http://localhost:8080/api/v1/course/search?query=rust+async&categories=Backend&sortByPrice=low"
        );
    }

    #[test]
    fn search_drops_empty_query() {
        let path = search_path(SearchParams {
            query: Some(String::new()),
            sort_by_price: Some(SortByPrice::High),
            ..Default::default()
        });
        assert_eq!(path, "http://localhost:8080/api/v1/course/search?sortByPrice=high");
    }

    #[test]
    fn search_without_params_has_no_query_string() {
        assert_eq!(
            search_path(SearchParams::default()),
            "http://localhost:8080/api/v1/course/search"
        );
    }

    #[test]
    fn build_create_course_produces_correct_request() {
        let req = client()
            .build_create_course(&CreateCourse {
                course_title: "Rust".to_string(),
                category: "Programming".to_string(),
            })
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/api/v1/course/");
        let body: serde_json::Value =
            serde_json::from_str(req.body.as_ref().and_then(RequestBody::as_json).unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"courseTitle": "Rust", "category": "Programming"}));
    }

    #[test]
    fn build_edit_course_sends_form_data() {
        let form = MultipartForm::new().text("courseTitle", "Rust 2");
        let req = client().build_edit_course("c1", &form);
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8080/api/v1/course/c1");
        assert!(req.header("content-type").is_none());
        assert_eq!(req.body, Some(RequestBody::Multipart(form)));
    }

    #[test]
    fn build_edit_lecture_uses_post() {
        let req = client()
            .build_edit_lecture(
                "c1",
                "l1",
                &EditLecture {
                    lecture_title: "Intro".to_string(),
                    video_info: Some(VideoInfo {
                        video_url: "https://cdn.example.com/v.mp4".to_string(),
                        public_id: "v1".to_string(),
                    }),
                    is_preview_free: false,
                },
            )
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/api/v1/course/c1/lecture/l1");
        let body: serde_json::Value =
            serde_json::from_str(req.body.as_ref().and_then(RequestBody::as_json).unwrap()).unwrap();
        assert_eq!(body["videoInfo"]["publicId"], "v1");
    }

    #[test]
    fn build_remove_lecture_is_delete() {
        let req = client().build_remove_lecture("l1");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8080/api/v1/course/lecture/l1");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_publish_course_passes_flag_in_query() {
        let req = client().build_publish_course("c1", true);
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "http://localhost:8080/api/v1/course/c1?publish=true");
        let req = client().build_publish_course("c1", false);
        assert_eq!(req.path, "http://localhost:8080/api/v1/course/c1?publish=false");
    }

    #[test]
    fn ids_are_escaped_into_one_segment() {
        let req = client().build_get_course_by_id("a/b?c");
        assert_eq!(req.path, "http://localhost:8080/api/v1/course/a%2Fb%3Fc");
        let req = client().build_publish_course("x#1", true);
        assert_eq!(req.path, "http://localhost:8080/api/v1/course/x%231?publish=true");
        // The endpoint keeps the raw id for tagging.
        assert_eq!(req.endpoint.course_id(), Some("x#1"));
    }

    #[test]
    fn course_requests_without_json_body_send_no_content_type() {
        assert!(client().build_get_course_by_id("c1").headers.is_empty());
        assert!(client()
            .build_edit_course("c1", &MultipartForm::new().text("courseTitle", "Rust"))
            .headers
            .is_empty());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = CourseClient::new("http://localhost:8080/");
        let req = client.build_get_published_course();
        assert_eq!(req.path, "http://localhost:8080/api/v1/course/published-courses");
    }

    #[test]
    fn parse_get_creator_course_success() {
        let body = format!(r#"{{"courses":[{COURSE_JSON}]}}"#);
        let list = client().parse_get_creator_course(response(200, &body)).unwrap();
        assert_eq!(list.courses.len(), 1);
        assert_eq!(list.courses[0].course_title, "Rust");
    }

    #[test]
    fn parse_get_course_by_id_not_found() {
        let err = client()
            .parse_get_course_by_id(response(404, r#"{"message":"Course not found!"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_lecture_bad_json() {
        let err = client().parse_create_lecture(response(201, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
