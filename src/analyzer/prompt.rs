use crate::models::analysis::Mood;
use crate::models::chat::ChatLine;

const HEADER: &str = "You are an atmosphere analyst for tabletop RPG role-play.
Read the chat log below and determine the mood of the current scene.";

const HIGHLIGHT_CRITERIA: [&str; 4] = [
    "A dramatic combat scene",
    "An emotionally intense moment (confession, farewell, reunion)",
    "A major turning point in the story",
    "A visually striking scene description",
];

const RESPONSE_FORMAT: &str = "## Response format (output JSON only, no other text)
{\"mood\": \"category\", \"intensity\": 0-100, \"is_highlight\": true/false, \"scene_summary\": \"scene summary (2-3 sentences)\"}";

/// Renders chat lines as `speaker: content`, one per line.
pub fn format_chat_log(lines: &[ChatLine]) -> String {
    lines
        .iter()
        .map(|line| format!("{}: {}", line.speaker, line.content))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(lines: &[ChatLine]) -> String {
    let categories = Mood::ALL
        .iter()
        .map(|mood| format!("- {}: {}", mood.as_str(), mood.description()))
        .collect::<Vec<_>>()
        .join("\n");

    let criteria = HIGHLIGHT_CRITERIA
        .iter()
        .map(|c| format!("- {}", c))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\n## Mood categories\n{}\n\n## Highlight criteria\n{}\n\n## Chat log\n{}\n\n{}",
        HEADER,
        categories,
        criteria,
        format_chat_log(lines),
        RESPONSE_FORMAT
    )
}
