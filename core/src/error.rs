//! Error types for the API clients.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the status code
//! and the server's message.

use serde::Deserialize;
use thiserror::Error;

use crate::http::HttpResponse;

/// Errors returned by client `build_*` and `parse_*` methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Builds the error for a non-2xx response. The backend reports failures
    /// as `{"message": "..."}`; anything else is passed through verbatim.
    pub fn from_response(response: &HttpResponse) -> Self {
        #[derive(Deserialize)]
        struct Envelope {
            message: String,
        }

        if response.status == 404 {
            return ApiError::NotFound;
        }
        let message = serde_json::from_str::<Envelope>(&response.body)
            .map(|e| e.message)
            .unwrap_or_else(|_| response.body.clone());
        ApiError::Http {
            status: response.status,
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
