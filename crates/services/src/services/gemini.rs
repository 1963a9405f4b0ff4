//! Gemini API client for page and image generation.

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const MAX_OUTPUT_TOKENS: u32 = 8192;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Error)]
pub enum GeminiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("rate limited")]
    RateLimited,
    #[error("invalid api key")]
    InvalidApiKey,
    #[error("json error: {0}")]
    Serde(String),
    #[error("missing api key: GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    #[error("no image data in response")]
    NoImage,
}

impl GeminiError {
    /// Returns true if the error is transient and should be retried.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout | Self::RateLimited => true,
            Self::Http { status, .. } => (500..=599).contains(status),
            _ => false,
        }
    }
}

/// A content block in the Gemini wire format. The system instruction carries
/// no role; conversation turns do.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

/// Base64 image payload returned by image-capable models.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Response from the generateContent endpoint.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Extract the first text part from the response.
    fn text(&self) -> Option<&str> {
        self.candidates.iter().find_map(|candidate| {
            candidate
                .content
                .as_ref()?
                .parts
                .iter()
                .find_map(|part| part.text.as_deref())
        })
    }

    /// Extract the first inline image payload from the response.
    fn inline_image(&self) -> Option<&InlineData> {
        self.candidates.iter().find_map(|candidate| {
            candidate
                .content
                .as_ref()?
                .parts
                .iter()
                .find_map(|part| part.inline_data.as_ref())
        })
    }
}

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    /// Create a new client using the GEMINI_API_KEY environment variable.
    /// `PAGEFORGE_TEXT_MODEL` and `PAGEFORGE_IMAGE_MODEL` override the
    /// default models when set.
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| GeminiError::MissingApiKey)?;
        Self::new(
            api_key,
            std::env::var("PAGEFORGE_TEXT_MODEL").ok(),
            std::env::var("PAGEFORGE_IMAGE_MODEL").ok(),
        )
    }

    /// Create a new client with the given API key
    pub fn new(
        api_key: String,
        text_model: Option<String>,
        image_model: Option<String>,
    ) -> Result<Self, GeminiError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("pageforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeminiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            text_model: text_model.unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            image_model: image_model.unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        })
    }

    /// Send a text completion request, retrying transient failures.
    pub async fn generate_text(&self, system: &str, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateRequest {
            system_instruction: Some(Content::system(system)),
            contents: vec![Content::user(prompt)],
            generation_config: GenerationConfig {
                max_output_tokens: Some(MAX_OUTPUT_TOKENS),
                temperature: Some(TEMPERATURE),
                response_modalities: None,
            },
        };

        let response = (|| async { self.send_request(&self.text_model, &request).await })
            .retry(
                &ExponentialBuilder::default()
                    .with_min_delay(Duration::from_secs(1))
                    .with_max_delay(Duration::from_secs(30))
                    .with_max_times(3)
                    .with_jitter(),
            )
            .when(|e: &GeminiError| e.should_retry())
            .notify(|e, dur| {
                warn!(
                    "Gemini API call failed, retrying after {:.2}s: {}",
                    dur.as_secs_f64(),
                    e
                )
            })
            .await?;

        response
            .text()
            .map(|s| s.to_string())
            .ok_or_else(|| GeminiError::Serde("No text content in response".to_string()))
    }

    /// Send a prompt expecting JSON in the response.
    pub async fn generate_json<T: for<'de> Deserialize<'de>>(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<T, GeminiError> {
        let response = self.generate_text(system, prompt).await?;
        parse_json(&response)
    }

    /// Generate one image and return it as a `data:` URI. Single attempt:
    /// callers own the timeout and fallback policy per placeholder.
    pub async fn generate_image(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateRequest {
            system_instruction: None,
            contents: vec![Content::user(prompt)],
            generation_config: GenerationConfig {
                max_output_tokens: None,
                temperature: None,
                response_modalities: Some(vec!["IMAGE".to_string()]),
            },
        };

        let response = self.send_request(&self.image_model, &request).await?;
        let inline = response.inline_image().ok_or(GeminiError::NoImage)?;

        // Reject payloads that are not actually base64 before handing out a
        // data URI the renderer would choke on.
        if BASE64.decode(inline.data.as_bytes()).is_err() {
            return Err(GeminiError::Serde(
                "inline image data is not valid base64".to_string(),
            ));
        }

        let mime = inline.mime_type.as_deref().unwrap_or("image/png");
        Ok(format!("data:{};base64,{}", mime, inline.data))
    }

    async fn send_request(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, GeminiError> {
        let url = format!("{GEMINI_API_BASE}/{model}:generateContent");
        let res = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match res.status() {
            s if s.is_success() => res
                .json::<GenerateResponse>()
                .await
                .map_err(|e| GeminiError::Serde(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GeminiError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => Err(GeminiError::RateLimited),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(GeminiError::Http { status, body })
            }
        }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> GeminiError {
    if e.is_timeout() {
        GeminiError::Timeout
    } else {
        GeminiError::Transport(e.to_string())
    }
}

/// Parse a model response that should contain JSON, tolerating markdown
/// fences, surrounding prose, and trailing commentary.
pub fn parse_json<T: for<'de> Deserialize<'de>>(text: &str) -> Result<T, GeminiError> {
    if text.trim().is_empty() {
        tracing::error!("Gemini returned an empty response");
        return Err(GeminiError::Serde("Empty response from Gemini".to_string()));
    }

    let json_str = extract_json(text);

    match serde_json::from_str(json_str) {
        Ok(value) => Ok(value),
        Err(parse_err) => {
            // The model sometimes wraps the JSON in prose; retry on the
            // outermost brace/bracket span before giving up.
            if let Some(span) = recover_json_span(json_str) {
                if let Ok(value) = serde_json::from_str(span) {
                    return Ok(value);
                }
            }
            tracing::error!(
                json_error = %parse_err,
                response_length = text.len(),
                extracted_json_preview = %json_str.chars().take(200).collect::<String>(),
                "Failed to parse JSON response from Gemini"
            );
            Err(GeminiError::Serde(format!(
                "{} (response preview: {})",
                parse_err,
                json_str.chars().take(200).collect::<String>()
            )))
        }
    }
}

/// Extract JSON from a string that might contain markdown code blocks
fn extract_json(text: &str) -> &str {
    let text = text.trim();

    // Try to find JSON in code blocks
    if let Some(start) = text.find("```json") {
        let content_start = start + 7;
        if let Some(end) = text[content_start..].find("```") {
            return text[content_start..content_start + end].trim();
        }
    }

    // Try generic code block
    if let Some(start) = text.find("```") {
        let content_start = start + 3;
        // Skip past any language identifier on the same line
        let content_start = text[content_start..]
            .find('\n')
            .map(|i| content_start + i + 1)
            .unwrap_or(content_start);
        if let Some(end) = text[content_start..].find("```") {
            return text[content_start..content_start + end].trim();
        }
    }

    // Return as-is if no code block found
    text
}

/// Last-resort recovery: the span from the first `{` (or `[`, whichever comes
/// first) to the last matching closer.
fn recover_json_span(text: &str) -> Option<&str> {
    let first_obj = text.find('{');
    let first_arr = text.find('[');
    let (start, closer) = match (first_obj, first_arr) {
        (Some(obj), Some(arr)) if obj < arr => (obj, '}'),
        (_, Some(arr)) => (arr, ']'),
        (Some(obj), None) => (obj, '}'),
        (None, None) => return None,
    };
    let end = text.rfind(closer)?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}
