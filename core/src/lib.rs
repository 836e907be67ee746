//! Synchronous API clients for the course platform backend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - One stateless client per backend resource: `AuthClient`,
//!   `CourseClient`, `ProgressClient`, `PurchaseClient`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Every request names its `Endpoint`; the registry maps endpoints to the
//!   cache tags they provide or invalidate, and `QueryCache` applies them.
//! - Login, logout and load-user update an explicit `SessionContext` and
//!   report the outcome instead of hiding it.
//! - `Fetcher` ties a host `Transport` to a `QueryCache`.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod registry;
pub mod session;
pub mod types;

pub use cache::{CacheTag, QueryCache, TagKind};
pub use client::{AuthClient, CourseClient, ProgressClient, PurchaseClient};
pub use config::ClientConfig;
pub use error::ApiError;
pub use fetcher::{FetchError, Fetcher, Transport};
pub use http::{Credentials, FormPart, HttpMethod, HttpRequest, HttpResponse, MultipartForm, RequestBody};
pub use registry::{Endpoint, OperationKind, Resource};
pub use session::{SessionContext, SessionError, Synced};
