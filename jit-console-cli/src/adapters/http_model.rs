//! Backend model over HTTP

use std::time::Duration;

use async_trait::async_trait;
use jit_console_core::error::{CoreError, CoreResult, ModelError};
use jit_console_core::types::{EnvironmentList, ModelContext};
use jit_console_core::ModelClient;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

/// Header carrying the server-side trace id, `<trace-id>/<span-id>;o=<flag>`.
const TRACE_HEADER: &str = "x-cloud-trace-context";

/// Model client talking to the backend's JSON API
pub struct HttpModelClient {
    client: Client,
    api: Url,
}

impl HttpModelClient {
    pub fn new(base_url: &str, timeout: Duration) -> CoreResult<Self> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let api = Url::parse(&base)
            .and_then(|url| url.join("api/"))
            .map_err(|e| CoreError::NetworkError(format!("Invalid base URL '{base_url}': {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::NetworkError(e.to_string()))?;

        Ok(Self { client, api })
    }

    fn endpoint(&self, path: &str) -> CoreResult<Url> {
        self.api
            .join(path.trim_start_matches('/'))
            .map_err(|e| CoreError::NetworkError(format!("Invalid request path '{path}': {e}")))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> CoreResult<T> {
        let url = self.endpoint(path)?;
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CoreError::NetworkError(e.to_string()))?;

        let status = response.status();
        log::debug!("Response Status: {status}");
        if !status.is_success() {
            return Err(Self::model_error(response).await.into());
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CoreError::SerializationError(format!("Invalid response from {url}: {e}")))
    }

    async fn model_error(response: Response) -> ModelError {
        let status = response.status();
        let trace_id = response
            .headers()
            .get(TRACE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_trace_id);
        let body = response.text().await.unwrap_or_default();

        ModelError::from_response(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            trace_id,
            &body,
        )
    }
}

fn parse_trace_id(header: &str) -> Option<String> {
    let id = header.split(['/', ';']).next()?.trim();
    (!id.is_empty()).then(|| id.to_string())
}

#[async_trait]
impl ModelClient for HttpModelClient {
    async fn list_environments(&self) -> CoreResult<EnvironmentList> {
        self.get("environments").await
    }

    async fn initialize(
        &self,
        environment: &str,
        resource: Option<&str>,
    ) -> CoreResult<ModelContext> {
        let context: ModelContext = self.get("user").await?;

        // Loading the resource verifies that the environment exists and is accessible.
        let path = resource.map_or_else(|| format!("environments/{environment}"), str::to_string);
        let _: serde_json::Value = self.get(&path).await?;

        Ok(context)
    }
}
