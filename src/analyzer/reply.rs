use crate::models::analysis::{ AnalysisResult, Mood };
use serde_json::{ Map, Value as JsonValue };

const FENCE: &str = "```";

/// Removes a surrounding markdown code fence. The opening line (which may
/// carry a language tag) and everything from the last fence onward are
/// dropped; unfenced text is returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed;
    }

    let body = match trimmed.split_once('\n') {
        Some((_, rest)) => rest,
        None => &trimmed[FENCE.len()..],
    };
    match body.rfind(FENCE) {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

/// Parses a backend reply into a normalized [`AnalysisResult`].
///
/// The reply must be (or contain) a JSON object. Missing or invalid fields
/// fall back to their defaults; intensity is clamped to 0..=100.
pub fn parse_reply(text: &str) -> Result<AnalysisResult, serde_json::Error> {
    let body = strip_code_fence(text);
    let object = match serde_json::from_str::<JsonValue>(body) {
        Ok(value) => value,
        Err(e) => embedded_object(body).ok_or(e)?,
    };

    match object {
        JsonValue::Object(fields) => Ok(from_fields(&fields)),
        other => {
            // Surface a serde error so callers handle it like any malformed reply.
            serde_json::from_value::<Map<String, JsonValue>>(other).map(|fields| from_fields(&fields))
        }
    }
}

fn embedded_object(body: &str) -> Option<JsonValue> {
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<JsonValue>(&body[start..=end]).ok().filter(JsonValue::is_object)
}

fn from_fields(fields: &Map<String, JsonValue>) -> AnalysisResult {
    let mood = fields
        .get("mood")
        .and_then(JsonValue::as_str)
        .and_then(|m| m.parse::<Mood>().ok())
        .unwrap_or_default();

    let intensity = fields.get("intensity").map(intensity_from).unwrap_or(0);

    let is_highlight = match fields.get("is_highlight") {
        Some(JsonValue::Bool(b)) => *b,
        Some(JsonValue::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    };

    let scene_summary = fields
        .get("scene_summary")
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string();

    AnalysisResult {
        mood,
        intensity,
        is_highlight,
        scene_summary,
        error: None,
    }
}

fn intensity_from(value: &JsonValue) -> u8 {
    let raw = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(v) if v.is_finite() => v.round().clamp(0.0, f64::from(AnalysisResult::MAX_INTENSITY)) as u8,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fence_with_language_tag() {
        let reply = "```json\n{\"mood\":\"drama\"}\n```";
        assert_eq!(strip_code_fence(reply), "{\"mood\":\"drama\"}");
    }

    #[test]
    fn test_strip_fence_leaves_plain_text() {
        assert_eq!(strip_code_fence("  {\"a\":1}\n"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fence_without_closing() {
        assert_eq!(strip_code_fence("```\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_parse_full_reply() {
        let result = parse_reply(
            r#"{"mood":"combat","intensity":85,"is_highlight":true,"scene_summary":"A dragon attacks."}"#
        ).unwrap();
        assert_eq!(result.mood, Mood::Combat);
        assert_eq!(result.intensity, 85);
        assert!(result.is_highlight);
        assert_eq!(result.scene_summary, "A dragon attacks.");
        assert!(result.error.is_none());
    }

    #[test]
    fn test_parse_fenced_reply() {
        let result = parse_reply("```json\n{\"mood\":\"romance\",\"intensity\":40}\n```").unwrap();
        assert_eq!(result.mood, Mood::Romance);
        assert_eq!(result.intensity, 40);
    }

    #[test]
    fn test_parse_rejects_prose() {
        assert!(parse_reply("I cannot analyze this.").is_err());
    }

    #[test]
    fn test_parse_rejects_non_object_json() {
        assert!(parse_reply("[1, 2, 3]").is_err());
        assert!(parse_reply("42").is_err());
    }

    #[test]
    fn test_parse_object_embedded_in_prose() {
        let result = parse_reply("Sure! {\"mood\":\"comedy\",\"intensity\":20} Hope this helps.").unwrap();
        assert_eq!(result.mood, Mood::Comedy);
    }

    #[test]
    fn test_out_of_range_values_are_normalized() {
        let result = parse_reply(
            r#"{"mood":"horror","intensity":250,"is_highlight":"true","scene_summary":7}"#
        ).unwrap();
        assert_eq!(result.mood, Mood::Neutral);
        assert_eq!(result.intensity, 100);
        assert!(result.is_highlight);
        assert_eq!(result.scene_summary, "");

        let negative = parse_reply(r#"{"intensity":-5}"#).unwrap();
        assert_eq!(negative.intensity, 0);

        let textual = parse_reply(r#"{"intensity":"72.6%"}"#).unwrap();
        assert_eq!(textual.intensity, 73);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(parse_reply("{}").unwrap(), AnalysisResult::default());
    }
}
