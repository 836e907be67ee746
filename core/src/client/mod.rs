//! Stateless HTTP request builders and response parsers, one client per
//! backend resource.
//!
//! # Design
//! Each client holds only its resource base URL and carries no mutable state
//! between calls. Every operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the round-trip in between.

mod auth;
mod course;
mod progress;
mod purchase;

pub use auth::AuthClient;
pub use course::CourseClient;
pub use progress::ProgressClient;
pub use purchase::PurchaseClient;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{Credentials, HttpRequest, HttpResponse, RequestBody};
use crate::registry::{Endpoint, Resource};

/// `{base_url}{resource prefix}` with any trailing slash on `base_url` removed.
fn resource_url(base_url: &str, resource: Resource) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), resource.prefix())
}

/// Assembles a request for `endpoint` under the resource URL `base_url`.
///
/// Method and path come from the registry; `query` is appended after `?`
/// when non-empty. A JSON body gets its content-type, and progress and
/// purchase requests always declare JSON. Multipart bodies are left to the
/// host.
fn build_request(
    base_url: &str,
    endpoint: Endpoint,
    query: &str,
    body: Option<RequestBody>,
) -> HttpRequest {
    let mut path = format!("{base_url}{}", endpoint.path());
    if !query.is_empty() {
        path.push('?');
        path.push_str(query);
    }
    let json = matches!(body, Some(RequestBody::Json(_)))
        || matches!(endpoint.resource(), Resource::Progress | Resource::Purchase);
    let headers = if json {
        vec![("content-type".to_string(), "application/json".to_string())]
    } else {
        Vec::new()
    };
    debug!(endpoint = endpoint.name(), %path, "built request");
    HttpRequest {
        method: endpoint.method(),
        endpoint,
        path,
        headers,
        body,
        credentials: Credentials::Include,
    }
}

fn json_body<T: Serialize>(input: &T) -> Result<RequestBody, ApiError> {
    serde_json::to_string(input)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_response(response))
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
