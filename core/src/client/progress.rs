use super::{build_request, parse_json, resource_url};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::registry::{Endpoint, Resource};
use crate::types::{CourseProgressResponse, MessageResponse};

/// Client for `/api/v1/progress`. Every mutation is scoped to one course.
#[derive(Debug, Clone)]
pub struct ProgressClient {
    base_url: String,
}

impl ProgressClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: resource_url(base_url, Resource::Progress),
        }
    }

    pub fn build_get_course_progress(&self, course_id: &str) -> HttpRequest {
        build_request(
            &self.base_url,
            Endpoint::GetCourseProgress {
                course_id: course_id.to_string(),
            },
            "",
            None,
        )
    }

    pub fn build_update_lecture_progress(&self, course_id: &str, lecture_id: &str) -> HttpRequest {
        build_request(
            &self.base_url,
            Endpoint::UpdateLectureProgress {
                course_id: course_id.to_string(),
                lecture_id: lecture_id.to_string(),
            },
            "",
            None,
        )
    }

    pub fn build_complete_course(&self, course_id: &str) -> HttpRequest {
        build_request(
            &self.base_url,
            Endpoint::CompleteCourse {
                course_id: course_id.to_string(),
            },
            "",
            None,
        )
    }

    pub fn build_in_complete_course(&self, course_id: &str) -> HttpRequest {
        build_request(
            &self.base_url,
            Endpoint::InCompleteCourse {
                course_id: course_id.to_string(),
            },
            "",
            None,
        )
    }

    pub fn parse_get_course_progress(
        &self,
        response: HttpResponse,
    ) -> Result<CourseProgressResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_update_lecture_progress(
        &self,
        response: HttpResponse,
    ) -> Result<MessageResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_complete_course(&self, response: HttpResponse) -> Result<MessageResponse, ApiError> {
        parse_json(&response)
    }

    pub fn parse_in_complete_course(
        &self,
        response: HttpResponse,
    ) -> Result<MessageResponse, ApiError> {
        parse_json(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheTag, TagKind};
    use crate::client::test_support::{response, BASE, COURSE_JSON};
    use crate::http::HttpMethod;

    fn client() -> ProgressClient {
        ProgressClient::new(BASE)
    }

    #[test]
    fn build_update_lecture_progress_produces_correct_request() {
        let req = client().build_update_lecture_progress("c1", "l2");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/api/v1/progress/c1/lecture/l2/view");
        assert!(req.body.is_none());
    }

    #[test]
    fn bodyless_progress_requests_still_declare_json() {
        let c = client();
        for req in [
            c.build_get_course_progress("c1"),
            c.build_update_lecture_progress("c1", "l1"),
            c.build_complete_course("c1"),
            c.build_in_complete_course("c1"),
        ] {
            assert!(req.body.is_none());
            assert_eq!(req.header("Content-Type"), Some("application/json"), "{}", req.endpoint.name());
        }
    }

    #[test]
    fn completion_toggles_target_their_course() {
        let c = client();
        let complete = c.build_complete_course("c1");
        let incomplete = c.build_in_complete_course("c1");
        assert_eq!(complete.path, "http://localhost:8080/api/v1/progress/c1/complete");
        assert_eq!(incomplete.path, "http://localhost:8080/api/v1/progress/c1/incomplete");
        for req in [complete, incomplete] {
            assert_eq!(
                req.endpoint.invalidates(),
                vec![CacheTag::with_id(TagKind::CourseProgress, "c1")]
            );
        }
    }

    #[test]
    fn get_course_progress_provides_course_tag() {
        let req = client().build_get_course_progress("c7");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.endpoint.provides(),
            vec![CacheTag::with_id(TagKind::CourseProgress, "c7")]
        );
    }

    #[test]
    fn parse_get_course_progress_success() {
        let body = format!(
            r#"{{"data":{{"courseDetails":{COURSE_JSON},"progress":[{{"lectureId":"l1","viewed":true}}],"completed":false}}}}"#
        );
        let progress = client().parse_get_course_progress(response(200, &body)).unwrap();
        assert_eq!(progress.data.course_details.id, "c1");
        assert_eq!(progress.data.progress.len(), 1);
        assert!(progress.data.progress[0].viewed);
        assert!(!progress.data.completed);
    }

    #[test]
    fn parse_complete_course_server_error() {
        let err = client().parse_complete_course(response(500, "oops")).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
    }
}
