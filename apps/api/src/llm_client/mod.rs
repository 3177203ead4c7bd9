/// LLM Client — the single point of entry for all model calls in the resume API.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions go through the `ChatModel` trait defined here.
///
/// Model: gemini-2.5-flash at temperature 0.3 (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod conversation;

pub use conversation::{Conversation, Role};

/// The model used for all structured-extraction calls.
pub const MODEL: &str = "gemini-2.5-flash";
pub const TEMPERATURE: f32 = 0.3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model response was blocked: {0}")]
    Blocked(String),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Conversation has no user message")]
    NoUserMessage,
}

/// Anything that can answer a conversation with one text reply.
///
/// Carried in `AppState` as `Arc<dyn ChatModel>`; tests swap in a stub.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, conversation: &Conversation) -> Result<String, LlmError>;
}

/// Appends `message` as the user turn, asks the model, and appends the reply.
/// One round trip; no retry.
pub async fn ask(
    model: &dyn ChatModel,
    conversation: &mut Conversation,
    message: &str,
) -> Result<String, LlmError> {
    conversation.push_user(message);
    let reply = model.complete(conversation).await?;
    conversation.push_assistant(reply.clone());
    Ok(reply)
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent<'a>>,
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

fn build_request(conversation: &Conversation) -> Result<GenerateContentRequest<'_>, LlmError> {
    let system_instruction = conversation.system().map(|text| GeminiContent {
        role: None,
        parts: vec![GeminiPart { text }],
    });

    let contents: Vec<GeminiContent<'_>> = conversation
        .turns()
        .map(|m| GeminiContent {
            role: Some(match m.role {
                Role::Assistant => "model",
                _ => "user",
            }),
            parts: vec![GeminiPart { text: &m.content }],
        })
        .collect();

    if !conversation.turns().any(|m| m.role == Role::User) {
        return Err(LlmError::NoUserMessage);
    }

    Ok(GenerateContentRequest {
        system_instruction,
        contents,
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
        },
    })
}

/// Gemini `generateContent` client used in production.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        base_url: String,
        timeout: std::time::Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, MODEL)
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    pub async fn call(
        &self,
        conversation: &Conversation,
    ) -> Result<GenerateContentResponse, LlmError> {
        let request_body = build_request(conversation)?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn complete(&self, conversation: &Conversation) -> Result<String, LlmError> {
        let response = self.call(conversation).await?;

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(LlmError::Blocked(reason));
        }

        match response.text() {
            Some(text) => Ok(text),
            None => match response.candidates.first().and_then(|c| c.finish_reason.clone()) {
                Some(reason) if reason != "STOP" => Err(LlmError::Blocked(reason)),
                _ => Err(LlmError::EmptyContent),
            },
        }
    }
}
