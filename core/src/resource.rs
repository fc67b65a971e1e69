//! Per-resource accessors over the generic client.
//!
//! Each collection of the API (posts, comments, ...) is addressed as
//! `"{name}"` and each record as `"{name}/{id}"`. `ResourceClient` binds a
//! `RestClient` to one `Resource` and logs the outcome of every operation.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::client::RestClient;
use crate::error::ApiError;
use crate::transport::Transport;

/// Collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Posts,
    Comments,
    Albums,
    Photos,
    Todos,
    Users,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Posts,
        Resource::Comments,
        Resource::Albums,
        Resource::Photos,
        Resource::Todos,
        Resource::Users,
    ];

    /// Pluralized path segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Posts => "posts",
            Resource::Comments => "comments",
            Resource::Albums => "albums",
            Resource::Photos => "photos",
            Resource::Todos => "todos",
            Resource::Users => "users",
        }
    }

    pub fn collection_path(self) -> String {
        self.as_str().to_string()
    }

    pub fn item_path(self, id: impl fmt::Display) -> String {
        format!("{}/{id}", self.as_str())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource '{0}'")]
pub struct UnknownResource(pub String);

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

/// A `RestClient` bound to one collection.
#[derive(Debug, Clone)]
pub struct ResourceClient<'a, T> {
    client: &'a RestClient<T>,
    resource: Resource,
}

impl<'a, T: Transport> ResourceClient<'a, T> {
    pub fn new(client: &'a RestClient<T>, resource: Resource) -> Self {
        Self { client, resource }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Every record in the collection.
    pub fn list(&self) -> Result<Value, ApiError> {
        let result = self.client.get(&self.resource.collection_path());
        self.log(&result, "fetch all", None);
        result
    }

    pub fn fetch(&self, id: impl fmt::Display) -> Result<Value, ApiError> {
        let id = id.to_string();
        let result = self.client.get(&self.resource.item_path(&id));
        self.log(&result, "fetch", Some(&id));
        result
    }

    /// Returns the created record, including any server-assigned `id`.
    pub fn create<P>(&self, payload: &P) -> Result<Value, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let result = self.client.post(&self.resource.collection_path(), payload);
        self.log(&result, "create", None);
        result
    }

    pub fn update<P>(&self, id: impl fmt::Display, payload: &P) -> Result<Value, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let id = id.to_string();
        let result = self.client.put(&self.resource.item_path(&id), payload);
        self.log(&result, "update", Some(&id));
        result
    }

    /// Returns the status code of the delete.
    pub fn remove(&self, id: impl fmt::Display) -> Result<u16, ApiError> {
        let id = id.to_string();
        let result = self.client.delete(&self.resource.item_path(&id));
        self.log(&result, "delete", Some(&id));
        result
    }

    fn log<R>(&self, result: &Result<R, ApiError>, action: &str, id: Option<&str>) {
        let resource = self.resource.as_str();
        match result {
            Ok(_) => tracing::info!(resource, id, "{action} succeeded"),
            Err(e) => tracing::error!(resource, id, error = %e, "{action} failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::config::ClientConfig;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl Transport for Recorder {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.sent.lock().unwrap().push(request.clone());
            let (status, body) = match request.method {
                HttpMethod::Get if request.url.ends_with("/999") => (404, "{}".to_string()),
                HttpMethod::Delete => (200, "{}".to_string()),
                _ => (200, request.body.clone().unwrap_or_else(|| "[]".to_string())),
            };
            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.into_bytes(),
            })
        }
    }

    fn sent(recorder: &Recorder) -> Vec<(HttpMethod, String)> {
        recorder
            .sent
            .lock()
            .unwrap()
            .iter()
            .map(|r| (r.method, r.url.clone()))
            .collect()
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for resource in Resource::ALL {
            assert_eq!(resource.as_str().parse::<Resource>().unwrap(), resource);
        }
        assert_eq!(
            "widgets".parse::<Resource>().unwrap_err(),
            UnknownResource("widgets".to_string())
        );
    }

    #[test]
    fn item_path_accepts_any_display_id() {
        assert_eq!(Resource::Photos.item_path(7), "photos/7");
        assert_eq!(Resource::Users.item_path("abc"), "users/abc");
    }

    #[test]
    fn operations_address_collection_and_items() {
        let recorder = Recorder::default();
        let client = RestClient::with_transport(
            &ClientConfig::new("http://api.test").unwrap(),
            &recorder,
        );
        let comments = client.resource(Resource::Comments);
        assert_eq!(comments.resource(), Resource::Comments);

        comments.list().unwrap();
        comments.fetch(1).unwrap();
        comments.create(&json!({"name": "foo"})).unwrap();
        comments.update(1, &json!({"name": "bar"})).unwrap();
        assert_eq!(comments.remove(1).unwrap(), 200);

        assert_eq!(
            sent(&recorder),
            vec![
                (HttpMethod::Get, "http://api.test/comments".to_string()),
                (HttpMethod::Get, "http://api.test/comments/1".to_string()),
                (HttpMethod::Post, "http://api.test/comments".to_string()),
                (HttpMethod::Put, "http://api.test/comments/1".to_string()),
                (HttpMethod::Delete, "http://api.test/comments/1".to_string()),
            ]
        );
    }

    #[test]
    fn missing_record_surfaces_status() {
        let recorder = Recorder::default();
        let client = RestClient::with_transport(
            &ClientConfig::new("http://api.test").unwrap(),
            &recorder,
        );
        let err = client.resource(Resource::Todos).fetch(999).unwrap_err();
        assert!(err.is_not_found());
    }
}
