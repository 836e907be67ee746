//! Backend location shared by all four clients.

use crate::client::{AuthClient, CourseClient, ProgressClient, PurchaseClient};

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_VAR: &str = "BACKEND_URL";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Reads `BACKEND_URL`, falling back to `DEFAULT_BACKEND_URL`.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(BACKEND_URL_VAR).ok())
    }

    fn from_value(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_BACKEND_URL),
        }
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::new(&self.base_url)
    }

    pub fn course(&self) -> CourseClient {
        CourseClient::new(&self.base_url)
    }

    pub fn progress(&self) -> ProgressClient {
        ProgressClient::new(&self.base_url)
    }

    pub fn purchase(&self) -> PurchaseClient {
        PurchaseClient::new(&self.base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}
