//! Generative-text capability.
//!
//! Requests to the shell's generative backend, plus the model catalog the AI
//! studio exposes. Prompt templates live here so every feature phrases its
//! requests the same way.

use serde::{Deserialize, Serialize};

use crate::model::{MessageId, RoomId};

/// Hard cap on outgoing prompt size; anything bigger is a caller bug.
pub const MAX_PROMPT_CHARS: usize = 8_192;

/// Catalog model identifiers. The two `*Mock` entries exist for side-by-side
/// comparison in the studio and compose flows; they are never sent to the
/// real backend (see [`AiModelId::sandbox_resolved`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiModelId {
    #[serde(rename = "gemini-3-flash-preview")]
    Gemini3FlashPreview,
    #[serde(rename = "gemini-3-pro-preview")]
    Gemini3ProPreview,
    #[serde(rename = "gpt-4o-mock")]
    Gpt4oMock,
    #[serde(rename = "claude-3-mock")]
    Claude3Mock,
}

impl AiModelId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini3FlashPreview => "gemini-3-flash-preview",
            Self::Gemini3ProPreview => "gemini-3-pro-preview",
            Self::Gpt4oMock => "gpt-4o-mock",
            Self::Claude3Mock => "claude-3-mock",
        }
    }

    pub const fn is_gemini(&self) -> bool {
        matches!(self, Self::Gemini3FlashPreview | Self::Gemini3ProPreview)
    }

    /// The model the sandbox actually runs. Only gemini models are wired to
    /// the backend; everything else falls back to the flash model.
    pub const fn sandbox_resolved(self) -> Self {
        if self.is_gemini() {
            self
        } else {
            Self::Gemini3FlashPreview
        }
    }

    pub fn info(&self) -> &'static AiModelInfo {
        AI_MODEL_CATALOG
            .iter()
            .find(|m| m.id == *self)
            .unwrap_or(&AI_MODEL_CATALOG[0])
    }
}

pub struct AiModelInfo {
    pub id: AiModelId,
    pub name: &'static str,
    pub capabilities: &'static [&'static str],
}

pub const AI_MODEL_CATALOG: &[AiModelInfo] = &[
    AiModelInfo {
        id: AiModelId::Gemini3FlashPreview,
        name: "Gemini 3 Flash",
        capabilities: &["Vision", "Audio", "Speed"],
    },
    AiModelInfo {
        id: AiModelId::Gemini3ProPreview,
        name: "Gemini 3 Pro",
        capabilities: &["Reasoning", "Coding", "Creativity"],
    },
    AiModelInfo {
        id: AiModelId::Gpt4oMock,
        name: "ChatGPT 4o",
        capabilities: &["Logic", "Versatile"],
    },
    AiModelInfo {
        id: AiModelId::Claude3Mock,
        name: "Claude 3.5",
        capabilities: &["Nuance", "Long Context"],
    },
];

/// Models offered in the compose flow's side-by-side draft comparison. Only
/// `Gemini` reaches the backend; the rest are simulated locally.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComposeModel {
    Gemini,
    ChatGpt,
    Claude,
    Llama,
}

impl ComposeModel {
    pub const ALL: [ComposeModel; 4] = [Self::Gemini, Self::ChatGpt, Self::Claude, Self::Llama];

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::ChatGpt => "ChatGPT",
            Self::Claude => "Claude",
            Self::Llama => "Llama",
        }
    }

    const fn tag(&self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI",
            Self::ChatGpt => "CHATGPT",
            Self::Claude => "CLAUDE",
            Self::Llama => "LLAMA",
        }
    }
}

/// Why a generation was requested; routes the completion event back to the
/// state it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "purpose", rename_all = "snake_case")]
pub enum GenAiPurpose {
    /// Seed batch for an empty feed.
    FeedSeed,
    /// Rewrite the user's chat draft.
    RephraseDraft { room_id: RoomId },
    /// Translate a received chat message.
    TranslateMessage { message_id: MessageId },
    /// AI studio sandbox run.
    StudioRun,
    /// One draft in the compose comparison grid.
    ComposeAssist { model: ComposeModel },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: AiModelId,
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub temperature: Option<f32>,
    /// Ask the backend for a JSON response (schema enforcement is the
    /// shell's concern; the core re-validates whatever comes back).
    pub json_response: bool,
}

impl GenerateRequest {
    pub fn new(model: AiModelId, prompt: impl Into<String>) -> Result<Self, GenAiError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(GenAiError::InvalidRequest("empty prompt".into()));
        }
        if prompt.chars().count() > MAX_PROMPT_CHARS {
            return Err(GenAiError::InvalidRequest(format!(
                "prompt exceeds {MAX_PROMPT_CHARS} chars"
            )));
        }
        Ok(Self {
            model,
            prompt,
            system_instruction: None,
            temperature: None,
            json_response: false,
        })
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Result<Self, GenAiError> {
        if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
            return Err(GenAiError::InvalidRequest(format!(
                "temperature {temperature} outside 0.0..=2.0"
            )));
        }
        self.temperature = Some(temperature);
        Ok(self)
    }

    pub fn with_json_response(mut self) -> Self {
        self.json_response = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenAiError {
    #[error("quota exhausted")]
    Quota,

    #[error("network failure: {0}")]
    Network(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl GenAiError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Backend(_))
    }

    /// Message shown inline where the generated text would have appeared.
    pub fn user_message(&self) -> String {
        match self {
            Self::Quota => "The AI service is out of capacity right now.".to_string(),
            Self::Network(_) => "Could not reach the AI service.".to_string(),
            Self::InvalidRequest(detail) => format!("Request rejected: {detail}"),
            Self::Backend(detail) => detail.clone(),
        }
    }
}

// --- Prompt templates ---

pub const FEED_SEED_PROMPT: &str = "Generate 5 diverse social media posts. Some should be about \
    nature, some about technology, and some lifestyle. Include realistic like counts and comments.";

pub fn rephrase_prompt(draft: &str) -> String {
    format!(
        "Rewrite this chat message to be more engaging and charismatic for a social community: \
         \"{draft}\""
    )
}

pub fn translate_prompt(text: &str) -> String {
    format!(
        "Translate the following text into English. If it is already in English, provide a more \
         poetic version: \"{text}\""
    )
}

pub fn compose_prompt(topic: &str) -> String {
    format!(
        "Write a high-quality social media post based on this prompt: \"{topic}\". Make it \
         engaging, include a few relevant hashtags, and keep it under 280 characters."
    )
}

/// Canned draft for the compose models that are simulated locally.
pub fn mock_compose_text(model: ComposeModel, topic: &str) -> String {
    format!(
        "[{} GENERATION]\n\nExploring the depths of \"{topic}\" reveals a fascinating \
         intersection of culture and technology. This is precisely why we build at EarthPost.\n\n\
         #Future #Ecosystem #Innovation",
        model.tag()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_empty_prompt() {
        assert!(GenerateRequest::new(AiModelId::Gemini3FlashPreview, "   ").is_err());
    }

    #[test]
    fn test_request_rejects_oversized_prompt() {
        let big = "x".repeat(MAX_PROMPT_CHARS + 1);
        assert!(GenerateRequest::new(AiModelId::Gemini3FlashPreview, big).is_err());
    }

    #[test]
    fn test_temperature_bounds() {
        let req = GenerateRequest::new(AiModelId::Gemini3FlashPreview, "hi").unwrap();
        assert!(req.clone().with_temperature(0.7).is_ok());
        assert!(req.clone().with_temperature(2.0).is_ok());
        assert!(req.clone().with_temperature(-0.1).is_err());
        assert!(req.clone().with_temperature(2.1).is_err());
        assert!(req.with_temperature(f32::NAN).is_err());
    }

    #[test]
    fn test_sandbox_fallback_for_non_gemini() {
        assert_eq!(
            AiModelId::Gpt4oMock.sandbox_resolved(),
            AiModelId::Gemini3FlashPreview
        );
        assert_eq!(
            AiModelId::Claude3Mock.sandbox_resolved(),
            AiModelId::Gemini3FlashPreview
        );
        assert_eq!(
            AiModelId::Gemini3ProPreview.sandbox_resolved(),
            AiModelId::Gemini3ProPreview
        );
    }

    #[test]
    fn test_model_id_serde_names() {
        let v = serde_json::to_value(AiModelId::Gemini3FlashPreview).unwrap();
        assert_eq!(v, "gemini-3-flash-preview");
        let id: AiModelId = serde_json::from_value(serde_json::json!("claude-3-mock")).unwrap();
        assert_eq!(id, AiModelId::Claude3Mock);
    }

    #[test]
    fn test_catalog_covers_all_ids() {
        for id in [
            AiModelId::Gemini3FlashPreview,
            AiModelId::Gemini3ProPreview,
            AiModelId::Gpt4oMock,
            AiModelId::Claude3Mock,
        ] {
            assert_eq!(id.info().id, id);
        }
    }

    #[test]
    fn test_prompt_templates_embed_input() {
        assert!(rephrase_prompt("hello there").contains("\"hello there\""));
        assert!(translate_prompt("bonjour").contains("\"bonjour\""));
        assert!(compose_prompt("city lights").contains("\"city lights\""));
    }

    #[test]
    fn test_mock_compose_text_tags_model() {
        let text = mock_compose_text(ComposeModel::Claude, "oceans");
        assert!(text.starts_with("[CLAUDE GENERATION]"));
        assert!(text.contains("\"oceans\""));
    }
}
