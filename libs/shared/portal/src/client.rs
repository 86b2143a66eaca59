use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::{ApiError, CreateVisitRequest, SessionProvider, UserProfile, VisitApi, VisitConfirmation};

pub struct PortalClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl PortalClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.portal_api_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        headers
    }

    async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.get_headers())
            .timeout(self.timeout);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::new());
            error!("Portal API error ({}): {}", status, error_text);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth(error_text),
                StatusCode::NOT_FOUND => ApiError::NotFound(error_text),
                _ => match extract_message(&error_text) {
                    Some(message) => ApiError::Rejected(message),
                    None => ApiError::Network(format!("API error ({}): {}", status, error_text)),
                },
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Pull the human-readable message out of an error payload. The portal uses
/// both `{"message": ...}` and `{"error": ...}` envelopes.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl VisitApi for PortalClient {
    async fn create_visit(&self, request: CreateVisitRequest) -> Result<VisitConfirmation, ApiError> {
        debug!(
            "Creating visit for doctor {} at clinic {} on {}",
            request.doctor_id, request.clinic_id, request.date
        );

        let body = serde_json::to_value(&request).map_err(|e| ApiError::Decode(e.to_string()))?;

        self.request(Method::POST, "/api/v1/visits", Some(body)).await
    }
}

#[async_trait]
impl SessionProvider for PortalClient {
    async fn current_user(&self) -> Result<Option<UserProfile>, ApiError> {
        match self
            .request::<UserProfile>(Method::GET, "/api/v1/profile", None)
            .await
        {
            Ok(profile) => Ok(Some(profile)),
            // An anonymous visitor is an ordinary outcome, not a failure.
            Err(ApiError::Auth(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
