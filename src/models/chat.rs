use serde::{ Serialize, Deserialize };

/// One line of RP chat as captured by the table client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLine {
    pub speaker: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(rename = "actorId", alias = "actor_id", default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
}

impl ChatLine {
    pub fn new(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            content: content.into(),
            timestamp: None,
            actor_id: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub messages: Vec<ChatLine>,
}
