//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network; the caller (host) executes the actual I/O.
//!
//! A request also carries the `Endpoint` it was built for, so the host can
//! file the response in a `QueryCache` or invalidate the tags a mutation
//! touches without re-deriving what was called.

use hyper_old::header::{Charset, ContentDisposition, DispositionParam, DispositionType, Headers};
use mime_multipart::{Node, Part};

use crate::error::ApiError;
use crate::registry::Endpoint;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Whether the host should attach stored cookies to the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    Include,
    Omit,
}

/// An HTTP request described as plain data.
///
/// Built by the `build_*` methods of the resource clients. `path` is the
/// absolute URL including any query string.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub endpoint: Endpoint,
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub credentials: Credentials,
}

impl HttpRequest {
    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Key under which a query's response is cached.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.endpoint.name(), self.path)
    }
}

/// Request payload.
///
/// JSON bodies are sent with `content-type: application/json`. Multipart
/// bodies leave the header unset; the host picks a boundary and supplies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Json(String),
    Multipart(MultipartForm),
}

impl RequestBody {
    pub fn as_json(&self) -> Option<&str> {
        match self {
            RequestBody::Json(s) => Some(s),
            RequestBody::Multipart(_) => None,
        }
    }
}

/// One field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// Ordered `multipart/form-data` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        });
        self
    }

    pub fn has_files(&self) -> bool {
        self.parts.iter().any(|p| matches!(p, FormPart::File { .. }))
    }

    /// Fresh random boundary for `encode`.
    pub fn boundary() -> String {
        String::from_utf8_lossy(&mime_multipart::generate_boundary()).into_owned()
    }

    /// `content-type` header value for a body encoded with `boundary`. The
    /// boundary is quoted since generated ones may contain `/` or `=`.
    pub fn content_type(boundary: &str) -> String {
        format!("multipart/form-data; boundary=\"{boundary}\"")
    }

    /// Encodes the form as RFC 7578 bytes. `boundary` must not occur in any
    /// part's data.
    pub fn encode(&self, boundary: &str) -> Result<Vec<u8>, ApiError> {
        let nodes: Vec<Node> = self.parts.iter().map(FormPart::to_node).collect();
        let mut out = Vec::new();
        mime_multipart::write_multipart(&mut out, &boundary.as_bytes().to_vec(), &nodes)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(out)
    }
}

impl FormPart {
    fn to_node(&self) -> Node {
        let mut parameters = vec![DispositionParam::Ext(
            "name".to_string(),
            escape_disposition_value(self.name()),
        )];
        let (content_type, body) = match self {
            FormPart::Text { value, .. } => (None, value.as_bytes().to_vec()),
            FormPart::File {
                file_name,
                content_type,
                data,
                ..
            } => {
                parameters.push(DispositionParam::Filename(
                    Charset::Ext("utf-8".to_string()),
                    None,
                    escape_disposition_value(file_name).into_bytes(),
                ));
                (Some(content_type), data.clone())
            }
        };
        let mut headers = Headers::new();
        headers.set(ContentDisposition {
            disposition: DispositionType::Ext("form-data".to_string()),
            parameters,
        });
        if let Some(content_type) = content_type {
            headers.set_raw("Content-Type", vec![content_type.as_bytes().to_vec()]);
        }
        Node::Part(Part { headers, body })
    }
}

/// Percent-escapes `"`, CR and LF in a quoted `Content-Disposition` value
/// (RFC 7578 section 4.2), so a name cannot close the quote or start a new
/// header line.
fn escape_disposition_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("%22"),
            '\r' => escaped.push_str("%0D"),
            '\n' => escaped.push_str("%0A"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to the matching `parse_*` method.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
