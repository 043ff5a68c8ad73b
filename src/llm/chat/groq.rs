use async_trait::async_trait;
use log::{ debug, info };
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE } };
use serde::{ Deserialize, Serialize };
use std::error::Error as StdError;
use std::sync::RwLock;
use std::time::Duration;

use super::{ ChatClient, CompletionResponse };
use crate::llm::{ LlmConfig, LlmType };

const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_BASE_URL: &str = "https://api.groq.com";
const CHAT_COMPLETIONS_ROUTE: &str = "/openai/v1/chat/completions";

pub struct GroqChatClient {
    http: HttpClient,
    api_key: RwLock<Option<String>>,
    model: String,
    base_url: String,
}

#[derive(Serialize, Deserialize)]
struct GroqMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct GroqRequest {
    messages: Vec<GroqMessage>,
    model: String,
    temperature: f32,
    #[serde(rename = "max_tokens")]
    max_tokens: u32,
}

#[derive(Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Deserialize)]
struct GroqChoice {
    message: GroqMessage,
}

impl GroqChatClient {
    pub fn new(
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let chat_model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| Box::new(e) as Box<dyn StdError + Send + Sync>)?;

        Ok(Self {
            http,
            api_key: RwLock::new(api_key.filter(|k| !k.trim().is_empty())),
            model: chat_model,
            base_url: api_url,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        if config.llm_type != LlmType::Groq {
            return Err("Invalid config type for GroqChatClient".into());
        }

        Self::new(
            config.api_key.clone(),
            config.completion_model.clone(),
            config.base_url.clone(),
            config.timeout,
        )
    }

    fn current_api_key(&self) -> Option<String> {
        match self.api_key.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl ChatClient for GroqChatClient {
    async fn complete(
        &self,
        prompt: &str
    ) -> Result<CompletionResponse, Box<dyn StdError + Send + Sync>> {
        let api_key = self.current_api_key().ok_or_else(|| "Groq API key is required".to_string())?;
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), CHAT_COMPLETIONS_ROUTE);

        let messages = vec![GroqMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        }];

        let req = GroqRequest {
            messages,
            model: self.model.clone(),
            temperature: 0.3,
            max_tokens: 300,
        };

        debug!("Sending Groq completion request to {}", url);
        let resp = self.http.post(&url)
            .bearer_auth(api_key)
            .json(&req)
            .send()
            .await?
            .error_for_status()?
            .json::<GroqResponse>()
            .await?;

        let content = resp.choices
            .into_iter()
            .next()
            .ok_or_else(|| "No response from Groq API".to_string())?
            .message.content;

        Ok(CompletionResponse { response: content.trim().to_string() })
    }

    fn is_configured(&self) -> bool {
        self.current_api_key().is_some()
    }

    fn accepts_api_key(&self) -> bool {
        true
    }

    fn set_api_key(&self, api_key: String) -> bool {
        let key = Some(api_key).filter(|k| !k.trim().is_empty());
        match self.api_key.write() {
            Ok(mut guard) => *guard = key,
            Err(poisoned) => *poisoned.into_inner() = key,
        }
        let configured = self.is_configured();
        info!("Groq API key updated (configured: {})", configured);
        configured
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }

    fn get_llm_backend(&self) -> LlmType {
        LlmType::Groq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::DEFAULT_REQUEST_TIMEOUT;

    #[test]
    fn test_unconfigured_without_key() {
        let client = GroqChatClient::new(None, None, None, DEFAULT_REQUEST_TIMEOUT).unwrap();
        assert!(!client.is_configured());
        assert_eq!(client.get_model(), DEFAULT_MODEL);
        assert_eq!(client.get_base_url().as_deref(), Some(DEFAULT_BASE_URL));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let client = GroqChatClient::new(Some("  ".into()), None, None, DEFAULT_REQUEST_TIMEOUT).unwrap();
        assert!(!client.is_configured());
    }

    #[test]
    fn test_set_api_key_at_runtime() {
        let client = GroqChatClient::new(None, None, None, DEFAULT_REQUEST_TIMEOUT).unwrap();
        assert!(client.set_api_key("gsk_live".into()));
        assert!(client.is_configured());
        assert!(!client.set_api_key(String::new()));
    }

    #[test]
    fn test_from_config_rejects_other_backend() {
        assert!(GroqChatClient::from_config(&LlmConfig::default()).is_err());
    }
}
