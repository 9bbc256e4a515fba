use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::protocol::HealthEnvelope;

use crate::error::TransportError;

/// Thin adapter over the backend REST API: fixed base URL, JSON in, JSON out.
/// No retries, no status-field interpretation; callers own both.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// The backend wraps failures in the same JSON envelope regardless of
    /// HTTP status code, so the body is decoded unconditionally and the
    /// envelope's application status is left to the caller.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|source| TransportError::Request {
                path: path.to_string(),
                source,
            })?;
        response
            .json::<T>()
            .await
            .map_err(|source| TransportError::Decode {
                path: path.to_string(),
                source,
            })
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                path: path.to_string(),
                source,
            })?;
        response
            .json::<T>()
            .await
            .map_err(|source| TransportError::Decode {
                path: path.to_string(),
                source,
            })
    }

    pub async fn health(&self) -> Result<HealthEnvelope, TransportError> {
        self.get_json("/health").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed_from_base_url() {
        let client = ApiClient::new("http://localhost:5000//");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/api/users"), "http://localhost:5000/api/users");
    }
}
