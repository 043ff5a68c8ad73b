pub mod chat;
use serde::{ Deserialize, Serialize };
use std::str::FromStr;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmType {
    Ollama,
    Groq,
}

impl LlmType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmType::Ollama => "ollama",
            LlmType::Groq => "groq",
        }
    }
}

impl fmt::Display for LlmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Invalid LLM type: '{value}' (expected 'ollama' or 'groq')")]
pub struct ParseLlmTypeError {
    value: String,
}

impl FromStr for LlmType {
    type Err = ParseLlmTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(LlmType::Ollama),
            "groq" => Ok(LlmType::Groq),
            _ =>
                Err(ParseLlmTypeError {
                    value: s.to_string(),
                }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub llm_type: LlmType,
    pub api_key: Option<String>,
    pub completion_model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            llm_type: LlmType::Ollama,
            api_key: None,
            completion_model: None,
            base_url: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

pub fn parse_llm_type(type_str: &str) -> Result<LlmType, ParseLlmTypeError> {
    type_str.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_llm_type() {
        assert_eq!(parse_llm_type("ollama"), Ok(LlmType::Ollama));
        assert_eq!(parse_llm_type(" Groq "), Ok(LlmType::Groq));
        assert!(parse_llm_type("openai").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        assert_eq!(LlmType::Groq.to_string().parse::<LlmType>(), Ok(LlmType::Groq));
    }
}
