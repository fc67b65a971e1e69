//! Generic request builder, dispatcher and response interpreter.
//!
//! # Design
//! `RestClient` holds the base URL and a `Transport`, nothing else. Every
//! verb goes through the same three steps: `build_request` produces an
//! `HttpRequest`, the transport executes it, and `interpret` classifies the
//! `HttpResponse`. The build and interpret steps are pure so they can be
//! checked against canned data without a server.

use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::resource::{Resource, ResourceClient};
use crate::transport::{Transport, UreqTransport};

/// Successful result of a dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Decoded body of a GET, POST or PUT.
    Json(Value),
    /// Status code of a DELETE; the body is not read.
    Status(u16),
}

impl Outcome {
    pub fn into_json(self) -> Result<Value, ApiError> {
        match self {
            Outcome::Json(value) => Ok(value),
            Outcome::Status(code) => Err(ApiError::transport(format!(
                "expected a JSON body, got bare status {code}"
            ))),
        }
    }

    pub fn into_status(self) -> Result<u16, ApiError> {
        match self {
            Outcome::Status(code) => Ok(code),
            Outcome::Json(_) => Err(ApiError::transport("expected a status, got a JSON body")),
        }
    }
}

/// Synchronous, stateless client for a JSON REST API.
///
/// Cloning is cheap for the default transport and clones share nothing
/// mutable, so a client can be used from several threads at once.
#[derive(Debug, Clone)]
pub struct RestClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl RestClient<UreqTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    /// Build a client from `API_BASE_URL`, failing immediately if it is
    /// absent or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = ClientConfig::from_env()?;
        Ok(Self::new(&config))
    }
}

impl<T: Transport> RestClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Accessor bound to one resource collection.
    pub fn resource(&self, resource: Resource) -> ResourceClient<'_, T> {
        ResourceClient::new(self, resource)
    }

    /// Join base URL and endpoint with exactly one `/`.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    pub fn build_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Option<&Value>,
    ) -> HttpRequest {
        let (headers, body) = match payload {
            Some(value) => (
                vec![("content-type".to_string(), "application/json".to_string())],
                Some(value.to_string()),
            ),
            None => (Vec::new(), None),
        };
        HttpRequest {
            method,
            url: self.url_for(endpoint),
            headers,
            body,
        }
    }

    /// Classify a response received for `method`.
    ///
    /// Non-2xx becomes `HttpStatus`. DELETE yields its status code; other
    /// verbs yield the decoded body, and an undecodable body is a
    /// `Transport` error.
    pub fn interpret(
        &self,
        method: HttpMethod,
        response: HttpResponse,
    ) -> Result<Outcome, ApiError> {
        check_status(&response)?;
        match method {
            HttpMethod::Delete => Ok(Outcome::Status(response.status)),
            _ => decode_body(&response).map(Outcome::Json),
        }
    }

    /// Build, send and interpret one request. Every verb goes through here.
    pub fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: Option<&Value>,
    ) -> Result<Outcome, ApiError> {
        let request = self.build_request(method, endpoint, payload);
        tracing::debug!(%method, url = %request.url, "sending request");

        let result = self
            .transport
            .execute(&request)
            .and_then(|response| self.interpret(method, response));
        match &result {
            Ok(_) => tracing::debug!(%method, url = %request.url, "request succeeded"),
            Err(e) => tracing::debug!(%method, url = %request.url, error = %e, "request failed"),
        }
        result
    }

    pub fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(HttpMethod::Get, endpoint, None)?.into_json()
    }

    pub fn post<P>(&self, endpoint: &str, payload: &P) -> Result<Value, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let payload = encode_payload(payload)?;
        self.request(HttpMethod::Post, endpoint, Some(&payload))?
            .into_json()
    }

    pub fn put<P>(&self, endpoint: &str, payload: &P) -> Result<Value, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let payload = encode_payload(payload)?;
        self.request(HttpMethod::Put, endpoint, Some(&payload))?
            .into_json()
    }

    /// Returns the raw status code, e.g. `200` or `204`.
    pub fn delete(&self, endpoint: &str) -> Result<u16, ApiError> {
        self.request(HttpMethod::Delete, endpoint, None)?
            .into_status()
    }
}

fn encode_payload<P: Serialize + ?Sized>(payload: &P) -> Result<Value, ApiError> {
    serde_json::to_value(payload)
        .map_err(|e| ApiError::transport(format!("payload could not be encoded: {e}")))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        code: response.status,
        body: serde_json::from_slice(&response.body).ok(),
    })
}

fn decode_body(response: &HttpResponse) -> Result<Value, ApiError> {
    serde_json::from_slice(&response.body)
        .map_err(|e| ApiError::transport(format!("malformed JSON body: {e}")))
}
