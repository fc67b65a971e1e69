//! Synchronous JSON REST client for the posts/comments/albums/photos/todos/
//! users API.
//!
//! # Overview
//! `RestClient` turns a (method, endpoint, payload) triple into one HTTP
//! call against a configured base URL and returns either the decoded JSON
//! body or, for DELETE, the status code. `ResourceClient` binds the client
//! to one collection so callers never assemble paths by hand.
//!
//! # Design
//! - `RestClient` is stateless; it holds only the base URL and a transport.
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`).
//!   The `Transport` trait is the only I/O seam; `UreqTransport` is the
//!   default.
//! - Failures are one of two `ApiError` variants: `Transport` (no usable
//!   response) or `HttpStatus` (non-2xx, code preserved).
//! - The base URL comes from an explicit `ClientConfig`; a missing
//!   `API_BASE_URL` is a construction-time `ConfigError`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod resource;
pub mod transport;

pub use client::{Outcome, RestClient};
pub use config::{ClientConfig, LogConfig};
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resource::{Resource, ResourceClient, UnknownResource};
pub use transport::{Transport, UreqTransport};
