use std::error::Error as _;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// Placeholder returned by `list_models` when the service can't be
/// reached so callers always have something to show in a selector.
pub const UNAVAILABLE_MODEL: &str = "unavailable";

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Per request generation parameters. Values are forwarded to the
/// endpoint unmodified.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: i64,
    pub legacy_sampling: bool,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompletionError {
    /// The request never got a response (DNS, refused connection,
    /// dropped connection, timeout).
    #[error("could not reach completion service: {0}")]
    Transport(String),
    /// The service answered with a non-2xx status or a body that
    /// doesn't look like a chat completion.
    #[error("completion service returned {status}: {body}")]
    Service { status: u16, body: String },
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest hides the useful part (e.g. "Connection refused")
        // in the source chain
        let mut detail = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        CompletionError::Transport(detail)
    }
}

pub fn completion_payload(messages: &[Message], options: &CompletionOptions) -> Value {
    let mut payload = json!({
        "model": options.model,
        "messages": messages,
        "temperature": options.temperature,
        "max_tokens": options.max_tokens,
    });
    if options.legacy_sampling {
        payload["top_p"] = json!(1);
        payload["frequency_penalty"] = json!(0);
        payload["presence_penalty"] = json!(0);
    }
    payload
}

/// Pull `choices[0].message.content` out of a completion response.
fn parse_completion(body: &str) -> Option<String> {
    let resp: Value = serde_json::from_str(body).ok()?;
    resp["choices"][0]["message"]["content"]
        .as_str()
        .map(String::from)
}

/// Send one chat completion request and return the reply text. There
/// is no retry and no client side timeout.
pub async fn completion(
    messages: &[Message],
    options: &CompletionOptions,
    api_hostname: &str,
    api_key: &str,
) -> Result<String, CompletionError> {
    let payload = completion_payload(messages, options);
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    tracing::debug!(
        "Requesting completion from {} with {} messages",
        url,
        messages.len()
    );

    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(CompletionError::Service {
            status: status.as_u16(),
            body,
        });
    }

    parse_completion(&body).ok_or(CompletionError::Service {
        status: status.as_u16(),
        body,
    })
}

#[derive(Deserialize)]
struct ModelEntry {
    id: String,
}

#[derive(Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

async fn fetch_models(api_hostname: &str, api_key: &str) -> Result<Vec<String>, reqwest::Error> {
    let url = format!("{}/v1/models", api_hostname.trim_end_matches("/"));
    let resp: ModelList = reqwest::Client::new()
        .get(url)
        .bearer_auth(api_key)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(resp.data.into_iter().map(|m| m.id).collect())
}

/// List the model identifiers the service offers. Never fails: if the
/// service is down or answers with garbage the result is a single
/// `UNAVAILABLE_MODEL` entry.
pub async fn list_models(api_hostname: &str, api_key: &str) -> Vec<String> {
    match fetch_models(api_hostname, api_key).await {
        Ok(models) if !models.is_empty() => models,
        Ok(_) => {
            tracing::warn!("Completion service at {} lists no models", api_hostname);
            vec![UNAVAILABLE_MODEL.to_string()]
        }
        Err(e) => {
            tracing::warn!("Listing models from {} failed: {}", api_hostname, e);
            vec![UNAVAILABLE_MODEL.to_string()]
        }
    }
}

/// Anything that can turn a message sequence into a reply. The
/// conversation talks to the completion service through this so it
/// can be swapped out.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<String, CompletionError>;
}

/// Client for an OpenAI compatible server such as LM Studio,
/// llama.cpp or Ollama.
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    api_hostname: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_hostname: &str, api_key: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn models(&self) -> Vec<String> {
        list_models(&self.api_hostname, &self.api_key).await
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        completion(messages, options, &self.api_hostname, &self.api_key).await
    }
}
