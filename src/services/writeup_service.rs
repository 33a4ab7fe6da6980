//! Event writeup generation through the Gemini `generateContent` API.
//!
//! `generate_writeup` never fails: missing credentials and request errors both
//! degrade to fixed HTML fragments, so callers can always display the result.

use reqwest::Client;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{info, warn};

pub const UNAVAILABLE_HTML: &str = "<h3>Writeup Generation Unavailable</h3><p>The API key is not configured. Please add a writeup manually.</p>";
pub const ERROR_HTML: &str = "<h3>Error Generating Content</h3><p>Could not generate writeup at this time. Please try again later or write one manually.</p>";

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
enum WriteupError {
    #[error("writeup request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("writeup response missing text")]
    MissingText,
}

#[derive(Clone, Debug)]
pub struct WriteupConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
}

impl Default for WriteupConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct WriteupService {
    config: WriteupConfig,
    client: Client,
}

impl WriteupService {
    pub fn new(config: WriteupConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Produce an HTML writeup (only `<h3>` and `<p>`) for an event.
    pub async fn generate_writeup(&self, event_name: &str, location: &str) -> String {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return UNAVAILABLE_HTML.to_string();
        };

        match self.request(api_key, &build_prompt(event_name, location)).await {
            Ok(html) => {
                info!("generated writeup for {}", event_name);
                html
            }
            Err(err) => {
                warn!("error generating writeup for {}: {}", event_name, err);
                ERROR_HTML.to_string()
            }
        }
    }

    async fn request(&self, api_key: &str, prompt: &str) -> Result<String, WriteupError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        );
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(WriteupError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = serde_json::from_str(&body).map_err(|_| WriteupError::MissingText)?;
        extract_text(&value).ok_or(WriteupError::MissingText)
    }
}

fn build_prompt(event_name: &str, location: &str) -> String {
    format!(
        r#"You are a professional event copywriter for an events company called "Five16 Events".
Your tone is exciting, professional, and engaging.
Generate a short, captivating event writeup for an event called "{event_name}" that took place at "{location}".
The writeup should be 2-3 paragraphs long.
Output the result as a simple HTML string containing only <h3> and <p> tags.
The h3 tag should be a catchy title for the writeup.
Do not include any other HTML tags like <html>, <body>, etc."#
    )
}

/// Concatenate the text parts of the first candidate.
fn extract_text(value: &Value) -> Option<String> {
    let parts = value
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    let html = strip_code_fence(&text);
    (!html.is_empty()).then_some(html)
}

/// Models sometimes wrap HTML in a Markdown fence.
fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
        .to_string()
}
