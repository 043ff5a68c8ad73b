use serde::{ Deserialize, Serialize };
use std::fmt;
use std::str::FromStr;

/// Scene atmosphere categories the analyzer can report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Combat,
    Romance,
    Drama,
    Comedy,
    Mystery,
    Celebration,
    #[default]
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Combat,
        Mood::Romance,
        Mood::Drama,
        Mood::Comedy,
        Mood::Mystery,
        Mood::Celebration,
        Mood::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Combat => "combat",
            Mood::Romance => "romance",
            Mood::Drama => "drama",
            Mood::Comedy => "comedy",
            Mood::Mystery => "mystery",
            Mood::Celebration => "celebration",
            Mood::Neutral => "neutral",
        }
    }

    /// One-line description used when listing the categories in a prompt.
    pub fn description(&self) -> &'static str {
        match self {
            Mood::Combat => "fighting, action, tense standoffs",
            Mood::Romance => "romance, intimate moments",
            Mood::Drama => "emotional scenes, conflict, grief",
            Mood::Comedy => "humor, lighthearted scenes",
            Mood::Mystery => "mystery, investigation, suspense",
            Mood::Celebration => "festivities, victory, joy",
            Mood::Neutral => "everyday moments, nothing special",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mood: '{0}'")]
pub struct ParseMoodError(String);

impl FromStr for Mood {
    type Err = ParseMoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == lowered)
            .ok_or_else(|| ParseMoodError(s.to_string()))
    }
}

/// Verdict returned for one batch of chat lines. Every field always holds a
/// value; `error` is only present when the backend could not be used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub mood: Mood,
    pub intensity: u8,
    pub is_highlight: bool,
    #[serde(default)]
    pub scene_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    pub const MAX_INTENSITY: u8 = 100;

    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral_and_has_no_error_key() {
        let value = serde_json::to_value(AnalysisResult::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "mood": "neutral",
                "intensity": 0,
                "is_highlight": false,
                "scene_summary": ""
            })
        );
    }

    #[test]
    fn test_with_error_serializes_error() {
        let value = serde_json::to_value(AnalysisResult::with_error("not configured")).unwrap();
        assert_eq!(value["error"], "not configured");
        assert_eq!(value["mood"], "neutral");
    }

    #[test]
    fn test_mood_from_str() {
        assert_eq!("Combat".parse::<Mood>(), Ok(Mood::Combat));
        assert_eq!(" celebration ".parse::<Mood>(), Ok(Mood::Celebration));
        assert!("horror".parse::<Mood>().is_err());
    }
}
