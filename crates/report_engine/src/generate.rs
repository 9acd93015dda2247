use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;

use report_core::{GeneratedReport, GenerationRequest, UsageInfo};
use report_logging::{report_debug, report_info, report_warn};

use crate::settings::{endpoint, ServiceSettings};
use crate::{FailureKind, GenerationError, GenerationResponse};

const ERROR_BODY_LIMIT: u64 = 64 * 1024;

#[async_trait::async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGenerationClient {
    client: reqwest::Client,
    endpoint: url::Url,
    max_bytes: u64,
}

impl ReqwestGenerationClient {
    pub fn new(settings: &ServiceSettings) -> Result<Self, GenerationError> {
        let endpoint = endpoint(&settings.generation_base_url, "reports/generate")
            .map_err(|err| GenerationError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GenerationError::new(FailureKind::Transport, err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            max_bytes: settings.max_bytes,
        })
    }
}

#[async_trait::async_trait]
impl GenerationClient for ReqwestGenerationClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let body = serde_json::to_vec(request)
            .map_err(|err| GenerationError::new(FailureKind::InvalidRequest, err.to_string()))?;
        report_info!(
            "Requesting {} report from {}",
            request.report_type,
            self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let success = response.status().is_success();
        if success {
            if let Some(content_len) = response.content_length() {
                if content_len > self.max_bytes {
                    return Err(too_large(self.max_bytes, content_len));
                }
            }
        }

        // Failures are read only far enough to find their message.
        let limit = if success {
            self.max_bytes
        } else {
            ERROR_BODY_LIMIT
        };
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > limit {
                if success {
                    return Err(too_large(self.max_bytes, next_len));
                }
                report_debug!("Error body from {status} cut at {} bytes", bytes.len());
                break;
            }
            bytes.extend_from_slice(&chunk);
        }
        report_debug!("Generation service answered {status} with {} bytes", bytes.len());

        classify_response(status, &bytes)
    }
}

#[derive(Deserialize)]
struct SuccessBody {
    #[serde(default)]
    report: Option<serde_json::Value>,
    #[serde(default)]
    usage: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorField,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Text(String),
    Detailed { message: String },
}

/// Maps a finished HTTP exchange onto the generation contract. The status
/// decides success or failure; the body only refines it.
pub fn classify_response(
    status: u16,
    body: &[u8],
) -> Result<GenerationResponse, GenerationError> {
    if !(200..300).contains(&status) {
        let message = service_message(body);
        let description = message
            .clone()
            .unwrap_or_else(|| format!("service answered {status} without a message"));
        report_warn!("Generation rejected ({status}): {description}");
        return Err(GenerationError::new(
            FailureKind::Service { status, message },
            description,
        ));
    }

    let parsed: SuccessBody = serde_json::from_slice(body).map_err(|err| {
        GenerationError::new(FailureKind::UnexpectedPayload, err.to_string())
    })?;
    let Some(report) = parsed.report else {
        return Err(GenerationError::new(
            FailureKind::UnexpectedPayload,
            "success response without a report",
        ));
    };
    let report: GeneratedReport = serde_json::from_value(report).map_err(|err| {
        GenerationError::new(FailureKind::UnexpectedPayload, err.to_string())
    })?;
    // Usage is informational; a malformed block is dropped rather than failing the report.
    let usage = parsed
        .usage
        .and_then(|value| serde_json::from_value::<UsageInfo>(value).ok());

    Ok(GenerationResponse { report, usage })
}

fn service_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let message = match parsed.error {
        ErrorField::Text(text) => text,
        ErrorField::Detailed { message } => message,
    };
    let message = message.trim();
    (!message.is_empty()).then(|| message.to_string())
}

fn too_large(max_bytes: u64, actual: u64) -> GenerationError {
    GenerationError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> GenerationError {
    if err.is_timeout() {
        return GenerationError::new(FailureKind::Timeout, err.to_string());
    }
    GenerationError::new(FailureKind::Transport, err.to_string())
}
