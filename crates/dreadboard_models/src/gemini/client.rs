//! REST client for Gemini structured segmentation.

use super::GeminiResult;
use super::dto::{
    ApiErrorEnvelope, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use super::prompt::{build_segmentation_prompt, segmentation_schema};
use crate::extract_json;
use async_trait::async_trait;
use dreadboard_core::{SegmentationRequest, SegmentationResponse};
use dreadboard_error::{DreadboardResult, GeminiError, GeminiErrorKind};
use dreadboard_interface::SceneGenerator;
use dreadboard_retry::{DreadboardConfig, GeminiConfig, RetryPolicy};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Environment variable holding the API key.
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini segmentation backend.
///
/// Each call to [`SceneGenerator::segment`] sends one `generateContent`
/// request, retried on transient failures according to the configured
/// [`RetryPolicy`].
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    config: GeminiConfig,
    retry: RetryPolicy,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", self.config.model())
            .field("base_url", self.config.base_url())
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client from layered configuration and `GEMINI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails to load or the API key is unset.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dreadboard_models::GeminiClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new()?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> DreadboardResult<Self> {
        let config = DreadboardConfig::load()?;
        Self::from_config(&config)
    }

    /// Create a client from an already loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::MissingApiKey`] if `GEMINI_API_KEY` is unset.
    #[instrument(name = "gemini_client_from_config", skip(config))]
    pub fn from_config(config: &DreadboardConfig) -> DreadboardResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey))?;
        Self::with_api_key(api_key, config.gemini().clone(), config.retry().clone())
    }

    /// Create a client with an explicit key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client cannot be built.
    pub fn with_api_key(
        api_key: impl Into<String>,
        config: GeminiConfig,
        retry: RetryPolicy,
    ) -> DreadboardResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey).into());
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        debug!(model = %config.model(), "Created Gemini client");

        Ok(Self {
            http,
            api_key,
            config,
            retry,
        })
    }

    /// Full URL of the `generateContent` endpoint for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url().trim_end_matches('/'),
            self.config.model()
        )
    }

    /// Retry policy applied to each call.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Build the request body for a segmentation batch.
    fn build_body(request: &SegmentationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user_text(build_segmentation_prompt(request))],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(segmentation_schema()),
            }),
        }
    }

    /// One HTTP round trip, classified into typed errors.
    async fn generate_once(
        &self,
        body: &GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(http_error(status.as_u16(), &text));
        }

        let text = response.text().await.map_err(classify_transport_error)?;
        serde_json::from_str(&text).map_err(|e| {
            GeminiError::new(GeminiErrorKind::MalformedResponse(format!(
                "Invalid generateContent body: {}",
                e
            )))
        })
    }

    async fn segment_internal(
        &self,
        request: &SegmentationRequest,
    ) -> GeminiResult<SegmentationResponse> {
        let body = Self::build_body(request);
        let started = Instant::now();

        let response = self.retry.execute(|| self.generate_once(&body)).await?;
        let segmentation = parse_segmentation_response(&response)?;

        info!(
            scenes = segmentation.scenes.len(),
            has_more_scenes = segmentation.has_more_scenes,
            tokens = segmentation.tokens_used,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Gemini segmentation batch completed"
        );

        Ok(segmentation)
    }
}

#[async_trait]
impl SceneGenerator for GeminiClient {
    #[instrument(
        name = "gemini_segment",
        skip(self, req),
        fields(
            model = %self.config.model(),
            start = req.starting_scene_number(),
            batch_size = req.batch_size(),
            window_len = req.text_window().len()
        )
    )]
    async fn segment(&self, req: &SegmentationRequest) -> DreadboardResult<SegmentationResponse> {
        Ok(self.segment_internal(req).await?)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}

/// Map a `generateContent` response to a segmentation result.
///
/// The first candidate's text is parsed as the structured payload (after
/// stripping any markdown fence) and token usage is taken from
/// `usageMetadata` as prompt plus candidate tokens.
///
/// # Errors
///
/// Returns [`GeminiErrorKind::MalformedResponse`] if there is no candidate
/// text or it does not parse.
pub fn parse_segmentation_response(
    response: &GenerateContentResponse,
) -> GeminiResult<SegmentationResponse> {
    let text = match response.text() {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            let reason = response.finish_reason().unwrap_or("none");
            warn!(finish_reason = reason, "Gemini returned no candidate text");
            return Err(GeminiError::new(GeminiErrorKind::MalformedResponse(
                format!("No candidate text (finish reason: {})", reason),
            )));
        }
    };

    let json = extract_json(&text)?;
    let mut segmentation: SegmentationResponse = serde_json::from_str(&json).map_err(|e| {
        let preview: String = json.chars().take(100).collect();
        GeminiError::new(GeminiErrorKind::MalformedResponse(format!(
            "Failed to parse segmentation JSON: {} (JSON: {}...)",
            e, preview
        )))
    })?;

    segmentation.tokens_used = response.billed_tokens();
    Ok(segmentation)
}

fn classify_transport_error(error: reqwest::Error) -> GeminiError {
    let kind = if error.is_timeout() {
        GeminiErrorKind::Timeout(error.to_string())
    } else if error.is_decode() {
        GeminiErrorKind::MalformedResponse(error.to_string())
    } else {
        GeminiErrorKind::Transport(error.to_string())
    };
    GeminiError::new(kind)
}

fn http_error(status_code: u16, body: &str) -> GeminiError {
    let message = match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            if envelope.error.status.is_empty() {
                envelope.error.message
            } else {
                format!("{} ({})", envelope.error.message, envelope.error.status)
            }
        }
        _ => body.chars().take(200).collect(),
    };
    GeminiError::new(GeminiErrorKind::HttpError {
        status_code,
        message,
    })
}
