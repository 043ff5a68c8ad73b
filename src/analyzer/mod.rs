pub mod prompt;
pub mod reply;

use crate::llm::chat::ChatClient;
use crate::llm::LlmType;
use crate::logs::LogRing;
use crate::models::analysis::AnalysisResult;
use crate::models::chat::ChatLine;
use log::{ debug, warn };
use std::sync::Arc;

pub const NOT_CONFIGURED: &str = "not configured";

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("not configured")]
    NotConfigured,
    #[error("malformed reply: {0}")]
    MalformedReply(#[from] serde_json::Error),
    #[error("{0}")]
    Transport(String),
}

/// Classifies the mood of a chat excerpt through whichever backend it was
/// built with. [`Analyzer::analyze`] never fails: every error path collapses
/// into a default [`AnalysisResult`].
pub struct Analyzer {
    chat_client: Arc<dyn ChatClient>,
    log_ring: Arc<LogRing>,
}

impl Analyzer {
    pub fn new(chat_client: Arc<dyn ChatClient>, log_ring: Arc<LogRing>) -> Self {
        Self { chat_client, log_ring }
    }

    pub fn chat_client(&self) -> &Arc<dyn ChatClient> {
        &self.chat_client
    }

    /// Name used as the log source for backend events, e.g. `Ollama`.
    fn backend_label(&self) -> &'static str {
        match self.chat_client.get_llm_backend() {
            LlmType::Ollama => "Ollama",
            LlmType::Groq => "Groq",
        }
    }

    pub async fn analyze(&self, lines: &[ChatLine]) -> AnalysisResult {
        match self.try_analyze(lines).await {
            Ok(result) => result,
            Err(AnalyzeError::MalformedReply(e)) => {
                self.log_ring.append(self.backend_label(), format!("JSON parse error: {}", e));
                AnalysisResult::default()
            }
            Err(AnalyzeError::NotConfigured) => {
                self.log_ring.append(self.backend_label(), "Backend not configured, skipping analysis");
                AnalysisResult::with_error(NOT_CONFIGURED)
            }
            Err(AnalyzeError::Transport(message)) => {
                self.log_ring.append(self.backend_label(), format!("Error: {}", message));
                AnalysisResult::with_error(message)
            }
        }
    }

    pub async fn try_analyze(&self, lines: &[ChatLine]) -> Result<AnalysisResult, AnalyzeError> {
        if !self.chat_client.is_configured() {
            return Err(AnalyzeError::NotConfigured);
        }

        let prompt = prompt::build_prompt(lines);
        debug!("Analyzing {} chat lines ({} prompt bytes)", lines.len(), prompt.len());

        let completion = self.chat_client.complete(&prompt).await.map_err(|e| {
            warn!("{} request failed: {}", self.backend_label(), e);
            AnalyzeError::Transport(e.to_string())
        })?;
        debug!("Raw backend reply: {}", completion.response);

        Ok(reply::parse_reply(&completion.response)?)
    }
}
