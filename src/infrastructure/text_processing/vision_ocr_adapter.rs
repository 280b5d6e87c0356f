use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::application::ports::{OcrEngine, OcrEngineError};
use crate::domain::{OcrJobHandle, OcrJobStatus, OcrRequest, StoragePath};
use crate::presentation::config::OcrSettings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const PDF_MIME: &str = "application/pdf";
const FEATURE: &str = "DOCUMENT_TEXT_DETECTION";

/// Google Cloud Vision asynchronous file annotation. Input and output live in
/// the configured GCS bucket; the staged paths are mapped to `gs://` URIs.
pub struct VisionOcrAdapter {
    client: Client,
    endpoint: String,
    bucket: String,
    api_key: Option<String>,
    access_token: Option<String>,
}

impl VisionOcrAdapter {
    pub fn new(settings: &OcrSettings, bucket: &str) -> Result<Self, OcrEngineError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| OcrEngineError::SubmitFailed(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            api_key: settings.api_key.clone(),
            access_token: settings.access_token.clone(),
        })
    }

    pub fn gcs_uri(&self, path: &StoragePath) -> String {
        format!("gs://{}/{}", self.bucket, path.as_str())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        match &self.api_key {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        }
    }

    pub fn build_request(&self, request: &OcrRequest) -> AsyncBatchAnnotateRequest {
        AsyncBatchAnnotateRequest {
            requests: vec![AnnotateFileRequest {
                input_config: InputConfig {
                    gcs_source: GcsLocation {
                        uri: self.gcs_uri(&request.input),
                    },
                    mime_type: PDF_MIME.to_string(),
                },
                features: vec![Feature {
                    feature_type: FEATURE.to_string(),
                }],
                output_config: OutputConfig {
                    gcs_destination: GcsLocation {
                        uri: self.gcs_uri(&request.output_prefix),
                    },
                    batch_size: request.batch_size,
                },
            }],
        }
    }
}

#[async_trait]
impl OcrEngine for VisionOcrAdapter {
    #[tracing::instrument(skip(self, request), fields(input = %request.input))]
    async fn submit(&self, request: &OcrRequest) -> Result<OcrJobHandle, OcrEngineError> {
        let body = self.build_request(request);
        let url = format!("{}/v1/files:asyncBatchAnnotate", self.endpoint);

        let response = self
            .authorize(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| OcrEngineError::SubmitFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(OcrEngineError::SubmitFailed(format!(
                "Vision submit returned {status}: {text}"
            )));
        }

        let operation: Operation = response
            .json()
            .await
            .map_err(|e| OcrEngineError::InvalidResponse(e.to_string()))?;

        Ok(OcrJobHandle::new(operation.name))
    }

    async fn poll(&self, handle: &OcrJobHandle) -> Result<OcrJobStatus, OcrEngineError> {
        let url = format!("{}/v1/{}", self.endpoint, handle.as_str());

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| OcrEngineError::PollFailed(e.to_string()))?;

        if response.status().as_u16() == 429 {
            return Ok(OcrJobStatus::Pending);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(OcrEngineError::PollFailed(format!(
                "Vision poll returned {status}: {text}"
            )));
        }

        let operation: Operation = response
            .json()
            .await
            .map_err(|e| OcrEngineError::InvalidResponse(e.to_string()))?;

        Ok(operation.status())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncBatchAnnotateRequest {
    pub requests: Vec<AnnotateFileRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateFileRequest {
    pub input_config: InputConfig,
    pub features: Vec<Feature>,
    pub output_config: OutputConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputConfig {
    pub gcs_source: GcsLocation,
    pub mime_type: String,
}

#[derive(Debug, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    pub gcs_destination: GcsLocation,
    pub batch_size: u32,
}

#[derive(Debug, Serialize)]
pub struct GcsLocation {
    pub uri: String,
}

/// Long-running operation as returned by submit and poll.
#[derive(Debug, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub message: String,
}

impl Operation {
    pub fn status(&self) -> OcrJobStatus {
        match (&self.error, self.done) {
            (Some(error), _) => OcrJobStatus::Failed(error.message.clone()),
            (None, true) => OcrJobStatus::Done,
            (None, false) => OcrJobStatus::Pending,
        }
    }
}
