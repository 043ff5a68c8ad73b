pub mod groq;
pub mod ollama;

use async_trait::async_trait;
use std::error::Error as StdError;
use std::sync::Arc;
use super::{ LlmConfig, LlmType };
use self::groq::GroqChatClient;
use self::ollama::OllamaClient;

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

/// A backend able to answer a single prompt with a single block of text.
///
/// Both implementations honor the same contract, so callers never need to
/// know which one they hold.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(
        &self,
        prompt: &str
    ) -> Result<CompletionResponse, Box<dyn StdError + Send + Sync>>;

    /// False when the backend cannot be called at all (e.g. missing credential).
    fn is_configured(&self) -> bool {
        true
    }

    /// Whether [`ChatClient::set_api_key`] has any effect on this backend.
    fn accepts_api_key(&self) -> bool {
        false
    }

    /// Replaces the backend credential. Returns whether the client is
    /// configured afterwards. Backends that take no credential (see
    /// [`ChatClient::accepts_api_key`]) drop the key and report their
    /// current state unchanged.
    fn set_api_key(&self, _api_key: String) -> bool {
        self.is_configured()
    }

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
    fn get_llm_backend(&self) -> LlmType;
}

pub fn new_client(
    config: &LlmConfig
) -> Result<Arc<dyn ChatClient>, Box<dyn StdError + Send + Sync>> {
    let client: Arc<dyn ChatClient> = match config.llm_type {
        LlmType::Ollama => {
            let specific_client = OllamaClient::from_config(config)?;
            Arc::new(specific_client)
        }
        LlmType::Groq => {
            let specific_client = GroqChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
    };
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_selects_backend() {
        let ollama = new_client(&LlmConfig::default()).unwrap();
        assert_eq!(ollama.get_llm_backend(), LlmType::Ollama);
        assert!(ollama.is_configured());
        assert!(!ollama.accepts_api_key());

        let groq = new_client(&LlmConfig {
            llm_type: LlmType::Groq,
            ..LlmConfig::default()
        }).unwrap();
        assert_eq!(groq.get_llm_backend(), LlmType::Groq);
        assert!(!groq.is_configured());
        assert!(groq.accepts_api_key());
    }
}
