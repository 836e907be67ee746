//! Cache-aware execution of requests over a host-supplied transport.
//!
//! The host implements `Transport` for whatever HTTP stack it has. `Fetcher`
//! serves fresh cached query results without calling it, and files every
//! completed round-trip in its `QueryCache`. `refetch` skips the cache for one
//! query. Failed requests are returned once; nothing is retried.

use tracing::debug;

use crate::cache::QueryCache;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip. Non-2xx statuses are responses, not errors.
pub trait Transport {
    type Error: std::error::Error + 'static;

    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError<E: std::error::Error + 'static> {
    #[error("transport error: {0}")]
    Transport(#[source] E),
}

#[derive(Debug)]
pub struct Fetcher<T> {
    transport: T,
    cache: QueryCache,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self::with_cache(transport, QueryCache::new())
    }

    pub fn with_cache(transport: T, cache: QueryCache) -> Self {
        Self { transport, cache }
    }

    /// Returns the response for `request`, from cache when a fresh entry
    /// exists. Mutations always reach the transport and invalidate their
    /// tags once they complete.
    pub fn fetch(&mut self, request: &HttpRequest) -> Result<HttpResponse, FetchError<T::Error>> {
        self.cache.purge_expired();
        if let Some(cached) = self.cache.lookup(request) {
            return Ok(cached.clone());
        }
        self.execute(request)
    }

    /// Sends `request` even when a fresh cached response exists, and files
    /// the new response in its place.
    pub fn refetch(&mut self, request: &HttpRequest) -> Result<HttpResponse, FetchError<T::Error>> {
        self.execute(request)
    }

    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, FetchError<T::Error>> {
        debug!(endpoint = request.endpoint.name(), method = request.method.as_str(), "executing request");
        let response = self
            .transport
            .execute(request)
            .map_err(FetchError::Transport)?;
        self.cache.apply(request, &response);
        Ok(response)
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut QueryCache {
        &mut self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use std::time::Duration;

    use crate::client::{AuthClient, CourseClient, ProgressClient};
    use crate::session::SessionContext;
    use crate::types::{CreateCourse, LoginUser};

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    /// Replays canned responses and records what was sent.
    #[derive(Default)]
    struct Scripted {
        responses: VecDeque<HttpResponse>,
        sent: Vec<String>,
    }

    impl Scripted {
        fn push(&mut self, status: u16, body: &str) {
            self.responses.push_back(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            });
        }
    }

    impl Transport for Scripted {
        type Error = Refused;

        fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, Refused> {
            self.sent.push(request.endpoint.name().to_string());
            self.responses.pop_front().ok_or(Refused)
        }
    }

    const BASE: &str = "http://localhost:8080";

    #[test]
    fn repeated_query_is_served_from_cache() {
        let courses = CourseClient::new(BASE);
        let mut transport = Scripted::default();
        transport.push(200, r#"{"courses":[]}"#);
        let mut fetcher = Fetcher::new(transport);

        let list = courses.build_get_creator_course();
        fetcher.fetch(&list).unwrap();
        fetcher.fetch(&list).unwrap();
        assert_eq!(fetcher.transport().sent, ["getCreatorCourse"]);
    }

    #[test]
    fn mutation_forces_refetch() {
        let courses = CourseClient::new(BASE);
        let mut transport = Scripted::default();
        transport.push(200, r#"{"courses":[]}"#);
        transport.push(201, r#"{"course":{"_id":"c1","courseTitle":"Rust","category":"Programming"}}"#);
        transport.push(200, r#"{"courses":[{"_id":"c1","courseTitle":"Rust","category":"Programming"}]}"#);
        let mut fetcher = Fetcher::new(transport);

        let list = courses.build_get_creator_course();
        let before = courses.parse_get_creator_course(fetcher.fetch(&list).unwrap()).unwrap();
        assert!(before.courses.is_empty());

        let create = courses
            .build_create_course(&CreateCourse {
                course_title: "Rust".to_string(),
                category: "Programming".to_string(),
            })
            .unwrap();
        fetcher.fetch(&create).unwrap();

        let after = courses.parse_get_creator_course(fetcher.fetch(&list).unwrap()).unwrap();
        assert_eq!(after.courses.len(), 1);
        assert_eq!(
            fetcher.transport().sent,
            ["getCreatorCourse", "createCourse", "getCreatorCourse"]
        );
    }

    #[test]
    fn progress_mutation_keeps_other_course_cached() {
        let progress = ProgressClient::new(BASE);
        let mut transport = Scripted::default();
        for _ in 0..4 {
            transport.push(200, "{}");
        }
        let mut fetcher = Fetcher::new(transport);

        let c1 = progress.build_get_course_progress("c1");
        let c2 = progress.build_get_course_progress("c2");
        fetcher.fetch(&c1).unwrap();
        fetcher.fetch(&c2).unwrap();
        fetcher.fetch(&progress.build_update_lecture_progress("c1", "l1")).unwrap();
        fetcher.fetch(&c2).unwrap();

        assert_eq!(
            fetcher.transport().sent,
            ["getCourseProgress", "getCourseProgress", "updateLectureProgress"]
        );
        assert!(fetcher.cache().is_stale(&c1));
    }

    #[test]
    fn signed_out_user_is_not_restored_from_cache() {
        let auth = AuthClient::new(BASE);
        let session = SessionContext::new();
        let user = r#"{"_id":"u1","name":"Ada","email":"ada@example.com","role":"student"}"#;
        let mut transport = Scripted::default();
        transport.push(200, &format!(r#"{{"success":true,"user":{user}}}"#));
        transport.push(200, &format!(r#"{{"success":true,"user":{user}}}"#));
        transport.push(200, r#"{"success":true,"message":"Logged out successfully."}"#);
        transport.push(401, r#"{"success":false,"message":"User not authenticated"}"#);
        let mut fetcher = Fetcher::new(transport);

        let login = auth
            .build_login_user(&LoginUser {
                email: "ada@example.com".to_string(),
                password: "pw".to_string(),
            })
            .unwrap();
        auth.parse_login_user(fetcher.fetch(&login).unwrap(), &session).unwrap();
        let load = auth.build_load_user();
        auth.parse_load_user(fetcher.fetch(&load).unwrap(), &session).unwrap();
        let logout = auth.build_logout_user();
        auth.parse_logout_user(fetcher.fetch(&logout).unwrap(), &session).unwrap();

        let after = auth.parse_load_user(fetcher.fetch(&load).unwrap(), &session);
        assert!(after.is_err());
        assert!(!session.is_authenticated());
        assert_eq!(
            fetcher.transport().sent,
            ["loginUser", "loadUser", "logoutUser", "loadUser"]
        );
    }

    #[test]
    fn refetch_bypasses_a_fresh_entry() {
        let courses = CourseClient::new(BASE);
        let mut transport = Scripted::default();
        transport.push(200, r#"{"course":{"_id":"c1","courseTitle":"Rust","category":"Programming"}}"#);
        transport.push(200, r#"{"course":{"_id":"c1","courseTitle":"Rust 2","category":"Programming"}}"#);
        let mut fetcher = Fetcher::new(transport);

        let by_id = courses.build_get_course_by_id("c1");
        fetcher.fetch(&by_id).unwrap();
        let fresh = courses.parse_get_course_by_id(fetcher.refetch(&by_id).unwrap()).unwrap();
        assert_eq!(fresh.course.course_title, "Rust 2");

        let cached = courses.parse_get_course_by_id(fetcher.fetch(&by_id).unwrap()).unwrap();
        assert_eq!(cached.course.course_title, "Rust 2");
        assert_eq!(fetcher.transport().sent, ["getCourseById", "getCourseById"]);
    }

    #[test]
    fn expired_queries_go_back_to_the_transport() {
        let courses = CourseClient::new(BASE);
        let mut transport = Scripted::default();
        transport.push(200, "{}");
        transport.push(200, "{}");
        let mut fetcher = Fetcher::with_cache(transport, QueryCache::with_keep_for(Duration::ZERO));

        let by_id = courses.build_get_course_by_id("c1");
        fetcher.fetch(&by_id).unwrap();
        fetcher.fetch(&by_id).unwrap();
        assert_eq!(fetcher.transport().sent, ["getCourseById", "getCourseById"]);
    }

    #[test]
    fn transport_failure_is_reported_once() {
        let courses = CourseClient::new(BASE);
        let mut fetcher = Fetcher::new(Scripted::default());
        let err = fetcher.fetch(&courses.build_get_published_course()).unwrap_err();
        assert!(matches!(err, FetchError::Transport(Refused)));
        assert_eq!(fetcher.transport().sent.len(), 1);
        assert!(fetcher.cache().is_empty());
    }
}
