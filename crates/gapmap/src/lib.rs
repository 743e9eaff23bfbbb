//! Career-transition roadmap generator.
//!
//! `gapmap` asks a hosted LLM for a learning roadmap between two roles and
//! turns its unreliable text completion into a typed, guaranteed-valid
//! [`Roadmap`](schema::Roadmap). The pipeline is a single straight line:
//!
//! 1. [`prompt::build_prompt`] — system instruction + the JSON Schema
//!    derived from the roadmap types + the user's role/timeframe parameters.
//! 2. [`InferenceClient::chat`] — one blocking chat-completion request to
//!    the Hugging Face router.
//! 3. [`roadmap_from_completion`] — boundary extraction, truncation repair,
//!    and the single authoritative schema validation.
//! 4. [`report::render`] — fixed-format console report.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`schema`] | Roadmap document types, serde validation, URL checks |
//! | [`repair`] | JSON boundary extraction and truncation repair |
//! | [`prompt`] | Prompt assembly with embedded JSON Schema |
//! | [`report`] | Console rendering of a validated roadmap |
//! | [`error`] | [`RoadmapError`](error::RoadmapError) taxonomy |

pub mod error;
pub mod prompt;
pub mod repair;
pub mod report;
pub mod schema;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

use error::RoadmapError;
use schema::Roadmap;

// ── Constants ──────────────────────────────────────────────────────

/// OpenAI-compatible chat completions endpoint of the Hugging Face router.
pub const HF_ROUTER_URL: &str = "https://router.huggingface.co/v1/chat/completions";

/// Default model for roadmap generation.
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

/// Default completion budget. Roadmaps that hit this limit arrive truncated
/// and go through repair.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Default sampling temperature. Low, since the output must track a schema.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

// ── Schema generation ──────────────────────────────────────────────

/// Generate a JSON Schema `serde_json::Value` from a type that implements
/// `schemars::JsonSchema`. This is the bridge between the strong Rust types
/// in [`schema`] and the schema text embedded in the prompt.
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body. Only the fields this system sends; zero
/// values are omitted from serialization.
#[derive(Serialize, Debug, Default)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "is_zero_f32")]
    pub temperature: f32,
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}
fn is_zero_f32(v: &f32) -> bool {
    *v == 0.0
}

/// Role of a message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message in the conversation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

/// Clean return type from [`InferenceClient::chat`].
#[derive(Debug)]
pub struct ChatCompletion {
    pub content: Option<String>,
    pub usage: Option<UsageInfo>,
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Deserialize, Debug, Clone)]
pub struct UsageInfo {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for the inference provider.
///
/// Explicitly constructed and passed by reference — it owns the credential
/// token and the connection pool, and drops both at scope exit. There is no
/// module-level singleton.
pub struct InferenceClient {
    client: reqwest::Client,
    token: String,
}

impl InferenceClient {
    /// Create a new client with the given bearer token.
    pub fn new(token: impl Into<String>) -> Result<Self, RoadmapError> {
        let client = reqwest::Client::builder()
            .user_agent("gapmap/0.1")
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| RoadmapError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            token: token.into(),
        })
    }

    /// Send a chat completion request and block until the provider answers.
    pub async fn chat(&self, body: &ChatRequest) -> Result<ChatCompletion, RoadmapError> {
        debug!(
            "LLM request: model={}, messages={}, max_tokens={}, temp={}",
            body.model,
            body.messages.len(),
            body.max_tokens,
            body.temperature,
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(HF_ROUTER_URL)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(body)
            .send()
            .await
            .map_err(|e| RoadmapError::Transport(format!("request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| RoadmapError::Transport(format!("failed to read response: {e}")))?;

        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            return Err(RoadmapError::Transport(format!(
                "provider returned HTTP {status}: {text}"
            )));
        }

        let parsed: RawChatResponse = serde_json::from_str(&text)
            .map_err(|e| RoadmapError::Transport(format!("failed to parse response: {e}")))?;

        if let Some(err) = parsed.error {
            return Err(RoadmapError::Transport(format!(
                "provider error: {}",
                err.message
            )));
        }

        if let Some(ref usage) = parsed.usage {
            debug!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens.unwrap_or(0),
                usage.completion_tokens.unwrap_or(0),
                usage.total_tokens.unwrap_or(0),
            );
        }

        let choice = parsed.choices.and_then(|c| c.into_iter().next());
        match choice {
            Some(c) => Ok(ChatCompletion {
                content: c.message.content,
                usage: parsed.usage,
                finish_reason: c.finish_reason,
            }),
            None => Ok(ChatCompletion {
                content: None,
                usage: parsed.usage,
                finish_reason: None,
            }),
        }
    }
}

// ── Pipeline ───────────────────────────────────────────────────────

/// Turn raw model output into a validated [`Roadmap`].
///
/// Repair runs unconditionally before the single authoritative validation:
/// extract the JSON candidate, close open structures, then parse and
/// validate. A document either fully validates or is fully discarded with a
/// [`RoadmapError::Validation`] diagnostic.
pub fn roadmap_from_completion(raw: &str) -> Result<Roadmap, RoadmapError> {
    let repaired = repair::repair(raw);
    Roadmap::parse(&repaired)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors() {
        let sys = Message::system("hello");
        assert_eq!(sys.role, MessageRole::System);
        assert_eq!(sys.content, "hello");

        let user = Message::user("world");
        assert_eq!(user.role, MessageRole::User);
    }

    #[test]
    fn chat_request_skips_zero_fields() {
        let req = ChatRequest {
            model: "test-model".into(),
            messages: vec![Message::user("hi")],
            max_tokens: 0,
            temperature: 0.0,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());
        assert_eq!(json["model"], "test-model");
    }

    #[test]
    fn truncated_completion_repairs_to_valid_roadmap() {
        // Commentary before the JSON, token-limit truncation after the one
        // resource: extraction strips the noise, repair closes the resources
        // array, the gap object, the gaps array, and the root object.
        let raw = concat!(
            "Here you go! {\"target\":\"ML Engineer\",\"time_allocated\":\"1 month\",",
            "\"roadmap_summary\":\"s\",\"gaps\":[{\"skill\":\"Python\",\"description\":\"d\",",
            "\"learning_time_estimate\":\"1wk\",\"learning_resources\":[{\"type\":\"course\",",
            "\"name\":\"X\",\"link\":\"https://x.com\"}"
        );
        let roadmap = roadmap_from_completion(raw).unwrap();
        assert_eq!(roadmap.target, "ML Engineer");
        assert_eq!(roadmap.gaps.len(), 1);
        assert_eq!(roadmap.gaps[0].skill, "Python");
        let res = &roadmap.gaps[0].learning_resources[0];
        assert_eq!(res.name, "X");
        assert_eq!(res.priority, "medium");
    }

    #[test]
    fn incomplete_document_fails_with_named_field() {
        let err = roadmap_from_completion("{\"target\":\"X\"}").unwrap_err();
        assert!(matches!(err, error::RoadmapError::Validation(_)));
        assert!(err.to_string().contains("time_allocated"));
    }

    #[test]
    fn fenced_block_with_trailing_commentary_validates() {
        let raw = format!(
            "```json\n{}\n```\nLet me know if you want changes.",
            serde_json::json!({
                "target": "SRE",
                "time_allocated": "3 months",
                "roadmap_summary": "s",
                "gaps": []
            })
        );
        let roadmap = roadmap_from_completion(&raw).unwrap();
        assert_eq!(roadmap.target, "SRE");
        assert!(roadmap.gaps.is_empty());
    }
}
