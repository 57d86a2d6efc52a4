use serde_json::Value;
use wawa_core::MessageDescriptor;

use crate::error::DialogueError;

/// Turn raw model output into message descriptors
///
/// Accepts a bare JSON array or an object with a `messages` array,
/// optionally wrapped in a Markdown code fence. Replies longer than
/// `max_messages` are cut to the first `max_messages` entries.
pub fn parse_descriptors(raw: &str, max_messages: usize) -> Result<Vec<MessageDescriptor>, DialogueError> {
    let body = strip_code_fence(raw);

    let value: Value =
        serde_json::from_str(body).map_err(|e| DialogueError::Format(format!("reply is not JSON: {e}")))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("messages") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(DialogueError::Format(
                    "reply object has no messages array".to_owned(),
                ));
            }
        },
        _ => return Err(DialogueError::Format("reply is not a message array".to_owned())),
    };

    if items.is_empty() {
        return Err(DialogueError::Format("reply contains no messages".to_owned()));
    }

    if items.len() > max_messages {
        tracing::warn!(
            received = items.len(),
            max_messages,
            "reply has too many messages, keeping the first ones"
        );
    }

    items
        .into_iter()
        .take(max_messages)
        .enumerate()
        .map(|(index, item)| {
            let descriptor: MessageDescriptor = serde_json::from_value(item)
                .map_err(|e| DialogueError::Format(format!("message {index}: {e}")))?;

            if descriptor.text.trim().is_empty() {
                return Err(DialogueError::Format(format!("message {index} has empty text")));
            }

            Ok(descriptor)
        })
        .collect()
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // drop the info string (```json)
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);

    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
