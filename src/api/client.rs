use crate::api::models::{AuthResponse, FileUpload, LoginRequest};
use crate::error::ApiError;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("gestock-cli/", env!("CARGO_PKG_VERSION"));

/// Single configured HTTP client for the gestion-de-stock REST API.
///
/// Every outgoing request receives `Authorization: Bearer <token>` when a
/// session token is present. Failure responses are classified into the
/// [`ApiError`] taxonomy here and nowhere else; callers branch on the
/// variants uniformly. Nothing is retried automatically.
#[derive(Debug, Clone)]
pub struct StockClient {
    client: Client,
    pub base_url: String,
    pub bearer_token: Option<String>,
}

impl StockClient {
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    /// Uniform request timeout; every call through this client is bounded.
    pub fn with_timeout(base_url: String, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Network {
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(StockClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: None,
        })
    }

    pub fn set_bearer_token(&mut self, token: String) {
        self.bearer_token = Some(token);
    }

    pub fn clear_bearer_token(&mut self) {
        self.bearer_token = None;
    }

    pub fn get_bearer_token(&self) -> Option<String> {
        self.bearer_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer_token.is_some()
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        request
    }

    /// Send a built request, mapping transport failures (no response
    /// received) to [`ApiError::Network`].
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, ApiError> {
        request.send().await.map_err(|e| {
            log::error!("Network error calling {}: {}", endpoint, e);
            ApiError::Network {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })
    }

    /// Classify a response once, at the transport boundary:
    /// 401 → SessionExpired, 403 → Forbidden, 5xx → Server (logged),
    /// other 4xx → Validation with the server's message.
    pub async fn handle_response<T>(&self, response: Response, endpoint: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| ApiError::Decode {
                endpoint: endpoint.to_string(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(Self::classify_failure(status.as_u16(), endpoint, body))
        }
    }

    fn classify_failure(status: u16, endpoint: &str, body: String) -> ApiError {
        let message = extract_server_message(&body);
        match status {
            401 => ApiError::SessionExpired {
                endpoint: endpoint.to_string(),
            },
            403 => ApiError::Forbidden {
                endpoint: endpoint.to_string(),
            },
            500..=599 => {
                log::error!("Server error {} on {}: {}", status, endpoint, message);
                ApiError::Server {
                    status,
                    endpoint: endpoint.to_string(),
                    message,
                }
            }
            _ => ApiError::Validation {
                status,
                endpoint: endpoint.to_string(),
                message,
            },
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.build_request(Method::GET, path), path).await?;
        self.handle_response(response, path).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_request(Method::POST, path).json(body);
        let response = self.send(request, path).await?;
        self.handle_response(response, path).await
    }

    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_request(Method::PUT, path).json(body);
        let response = self.send(request, path).await?;
        self.handle_response(response, path).await
    }

    /// DELETE calls return no useful body; only the status is inspected.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .send(self.build_request(Method::DELETE, path), path)
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(Self::classify_failure(status.as_u16(), path, body))
        }
    }

    /// Multipart submit with scalar fields as query parameters (backend
    /// convention for entities with a photo/image). The file part is
    /// omitted entirely when no file is provided.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        part_name: &str,
        file: Option<&FileUpload>,
    ) -> Result<T, ApiError> {
        let request = self
            .build_request(Method::POST, path)
            .query(query)
            .multipart(build_form(part_name, file));
        let response = self.send(request, path).await?;
        self.handle_response(response, path).await
    }

    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        part_name: &str,
        file: Option<&FileUpload>,
    ) -> Result<T, ApiError> {
        let request = self
            .build_request(Method::PUT, path)
            .query(query)
            .multipart(build_form(part_name, file));
        let response = self.send(request, path).await?;
        self.handle_response(response, path).await
    }

    /// Exchange credentials for a bearer token at `POST /auth/login` and
    /// attach the token to every subsequent request.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.post_json("/auth/login", &body).await?;
        self.set_bearer_token(response.token.clone());
        Ok(response)
    }
}

fn build_form(part_name: &str, file: Option<&FileUpload>) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();
    if let Some(file) = file {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str("application/octet-stream")
            .unwrap_or_else(|_| {
                reqwest::multipart::Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
            });
        form = form.part(part_name.to_string(), part);
    }
    form
}

/// Backend error payloads carry a `message` field; fall back to the raw
/// body when the payload is not JSON.
fn extract_server_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = StockClient::new("http://example.test".to_string());
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = StockClient::new("http://example.test/".to_string()).unwrap();
        assert_eq!(client.base_url, "http://example.test");
    }

    #[test]
    fn test_set_bearer_token_is_authenticated() {
        let mut client =
            StockClient::new("http://example.test".to_string()).expect("client creation failed");
        assert!(!client.is_authenticated());
        client.set_bearer_token("token".to_string());
        assert!(client.is_authenticated());
        assert_eq!(Some("token".to_string()), client.get_bearer_token());
    }

    #[test]
    fn test_build_request_without_token_has_no_auth_header() {
        let client =
            StockClient::new("http://example.test".to_string()).expect("client creation failed");
        let request = client.build_request(Method::GET, "/articles/showAll");
        let built_request = request.build().expect("Failed to build request");

        assert_eq!(
            built_request.url().as_str(),
            "http://example.test/articles/showAll"
        );
        assert!(built_request.headers().get("Authorization").is_none());
    }

    #[test]
    fn test_build_request_attaches_bearer_token() {
        let mut client =
            StockClient::new("http://example.test".to_string()).expect("client creation failed");
        client.set_bearer_token("jwt-abc".to_string());

        let request = client.build_request(Method::POST, "/categories/create");
        let built_request = request.build().expect("Failed to build request");

        assert_eq!(
            built_request
                .headers()
                .get("Authorization")
                .unwrap()
                .to_str()
                .unwrap(),
            "Bearer jwt-abc"
        );
    }

    #[test]
    fn test_clear_bearer_token() {
        let mut client =
            StockClient::new("http://example.test".to_string()).expect("client creation failed");
        client.set_bearer_token("jwt-abc".to_string());
        client.clear_bearer_token();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_classify_failure_taxonomy() {
        let err = StockClient::classify_failure(401, "/articles/showAll", String::new());
        assert!(matches!(err, ApiError::SessionExpired { .. }));

        let err = StockClient::classify_failure(403, "/roles/showAll", String::new());
        assert!(matches!(err, ApiError::Forbidden { .. }));

        let err = StockClient::classify_failure(500, "/ventes/create", "oops".to_string());
        assert!(matches!(err, ApiError::Server { status: 500, .. }));

        let err = StockClient::classify_failure(422, "/categories/create", String::new());
        assert!(matches!(err, ApiError::Validation { status: 422, .. }));
    }

    #[test]
    fn test_extract_server_message_from_json() {
        let message = extract_server_message(r#"{"message": "code already used"}"#);
        assert_eq!(message, "code already used");

        let message = extract_server_message("plain text error");
        assert_eq!(message, "plain text error");
    }
}
