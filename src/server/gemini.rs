use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{ContentService, GenerationRequest};
use crate::error::AppError;
use crate::model::book::{ChatRole, ChatTurn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout = match non_empty("GEMINI_TIMEOUT_SECS").map(|v| v.trim().parse::<u64>()) {
            Some(Ok(secs)) => Duration::from_secs(secs),
            Some(Err(e)) => {
                tracing::warn!("ignoring invalid GEMINI_TIMEOUT_SECS: {e}");
                defaults.timeout
            }
            None => defaults.timeout,
        };

        Self {
            api_key: non_empty("GEMINI_API_KEY")
                .or_else(|| non_empty("API_KEY"))
                .unwrap_or_default(),
            model: non_empty("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: non_empty("GEMINI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

fn wire_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "model",
    }
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    async fn generate_content(&self, request: &GenerateRequest) -> Result<String, AppError> {
        if !self.is_configured() {
            return Err(AppError::new("Gemini API key not configured"));
        }

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::new(format!("Gemini API error {status}: {body}")));
        }

        let result: GenerateResponse = resp.json().await?;
        response_text(result)
    }
}

fn response_text(response: GenerateResponse) -> Result<String, AppError> {
    let content = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| AppError::new("no Gemini candidate returned"))?;

    Ok(content.parts.into_iter().map(|p| p.text).collect())
}

fn build_generate(request: GenerationRequest) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content::text(Some("user"), &request.prompt)],
        system_instruction: request
            .system_instruction
            .as_deref()
            .map(|s| Content::text(None, s)),
        generation_config: request.response_schema.map(|schema| GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        }),
    }
}

fn build_chat(history: &[ChatTurn], message: &str, system_instruction: &str) -> GenerateRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|t| Content::text(Some(wire_role(t.role)), &t.text))
        .collect();
    contents.push(Content::text(Some("user"), message));

    GenerateRequest {
        contents,
        system_instruction: Some(Content::text(None, system_instruction)),
        generation_config: None,
    }
}

impl ContentService for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, AppError> {
        self.generate_content(&build_generate(request)).await
    }

    async fn converse(
        &self,
        history: &[ChatTurn],
        message: &str,
        system_instruction: &str,
    ) -> Result<String, AppError> {
        self.generate_content(&build_chat(history, message, system_instruction))
            .await
    }
}
