// src/api/client.rs
// reqwest-backed implementation of the prediction service interface

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::types::{
    ComparisonResult, FormOptionsResponse, HealthResponse, ModelInfo, SinglePrediction,
};
use super::PredictionApi;
use crate::config::ApiConfig;
use crate::error::{PredictError, Result};
use crate::form::FormState;

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Result<Self> {
        // Fail on a malformed base before the first request does
        config.endpoint("/")?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let builder = Client::builder().default_headers(headers);

        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .user_agent(concat!("pricepredict/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs));

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.endpoint(path)?;
        info!(method = "GET", url = %url, "Calling prediction service");
        let response = self.client.get(url).send().await?;
        read_json(path, response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path)?;
        info!(method = "POST", url = %url, "Calling prediction service");
        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(body = %serde_json::to_string(body)?, "Request payload");
        }
        let response = self.client.post(url).json(body).send().await?;
        read_json(path, response).await
    }
}

async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let detail = error_detail(&body);
        warn!(path, status = status.as_u16(), %detail, "Prediction service returned an error");
        return Err(PredictError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_slice(&body).map_err(|e| PredictError::Decode(format!("{}: {}", path, e)))
}

/// Human-readable reason from an error body.
///
/// The service answers failures with `{"detail": ...}`; anything else is
/// passed through as text.
pub fn error_detail(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(other) => return other.to_string(),
            None => {}
        }
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        "no response body".to_string()
    } else {
        text
    }
}

#[async_trait(?Send)]
impl PredictionApi for HttpApi {
    async fn health(&self) -> Result<HealthResponse> {
        self.get_json("/health").await
    }

    async fn form_options(&self) -> Result<FormOptionsResponse> {
        self.get_json("/form-options").await
    }

    async fn model_info(&self) -> Result<ModelInfo> {
        self.get_json("/model-info").await
    }

    async fn predict_linear(&self, form: &FormState) -> Result<SinglePrediction> {
        self.post_json("/predict/linear", form).await
    }

    async fn predict_both(&self, form: &FormState) -> Result<ComparisonResult> {
        self.post_json("/predict/both", form).await
    }
}
