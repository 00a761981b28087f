//! Study assistant backed by Gemini: summaries, quizzes and document chat.

use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::AiConfig;

pub mod gemini;
pub mod parse;
pub mod prompts;

pub use gemini::{GeminiClient, GeminiError, GenerateRequest};
pub use parse::{QuizItem, Summary};

pub const DEFAULT_QUIZ_QUESTIONS: u32 = 5;
pub const MAX_QUIZ_QUESTIONS: u32 = 20;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("GEMINI_API_KEY is not set. Please add it to your .env file.")]
    MissingApiKey,

    #[error("Failed to generate summary: {0}")]
    Summary(#[source] GeminiError),

    #[error("Failed to generate quiz: {0}")]
    Quiz(#[source] GeminiError),

    #[error("Failed to chat with document: {0}")]
    Chat(#[source] GeminiError),
}

pub struct StudyAssistant {
    client: Option<GeminiClient>,
}

impl StudyAssistant {
    pub fn new(cfg: &AiConfig) -> anyhow::Result<Self> {
        let client = match cfg.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Some(GeminiClient::new(
                &cfg.base_url,
                key,
                &cfg.model,
                Duration::from_secs(cfg.timeout_secs),
            )?),
            _ => None,
        };

        if let Some(c) = &client {
            info!("Gemini client configured (model: {})", c.model());
        }
        Ok(Self { client })
    }

    /// An assistant with no credentials; every call fails with `MissingApiKey`.
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&GeminiClient, AiError> {
        self.client.as_ref().ok_or(AiError::MissingApiKey)
    }

    pub async fn summarize(&self, text: &str) -> Result<Summary, AiError> {
        let client = self.client()?;
        let req = GenerateRequest {
            prompt: prompts::summary_prompt(text),
            system_instruction: None,
            temperature: 0.5,
            max_output_tokens: 1200,
            json_output: true,
        };
        let reply = client.generate(&req).await.map_err(AiError::Summary)?;
        Ok(Summary::from_model_text(&reply))
    }

    pub async fn quiz(&self, text: &str, num_questions: u32) -> Result<Vec<QuizItem>, AiError> {
        let client = self.client()?;
        let req = GenerateRequest {
            prompt: prompts::quiz_prompt(text, num_questions),
            system_instruction: None,
            temperature: 0.7,
            max_output_tokens: 2000,
            json_output: true,
        };
        let reply = client.generate(&req).await.map_err(AiError::Quiz)?;
        Ok(parse::parse_quiz_items(&reply))
    }

    pub async fn chat(&self, text: &str, question: &str) -> Result<String, AiError> {
        let client = self.client()?;
        let req = GenerateRequest {
            prompt: question.to_string(),
            system_instruction: Some(prompts::chat_system_instruction(text)),
            temperature: 0.4,
            max_output_tokens: 1000,
            json_output: false,
        };
        client.generate(&req).await.map_err(AiError::Chat)
    }
}
