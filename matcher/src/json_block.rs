//! Extraction of a JSON object embedded in free-form model output.
//!
//! Language models wrap their answer in prose or markdown fences. The first
//! `{` that starts a complete JSON object wins; anything before or after it
//! is ignored.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{RemoteError, RemoteResult};

/// Return the first complete JSON object found in `text`.
pub fn first_json_object(text: &str) -> Option<Value> {
    text.match_indices('{').find_map(|(start, _)| {
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value)) if value.is_object() => Some(value),
            _ => None,
        }
    })
}

/// Locate the first JSON object in `text` and deserialize it.
pub fn extract_json_block<T: DeserializeOwned>(text: &str) -> RemoteResult<T> {
    let value = first_json_object(text)
        .ok_or_else(|| RemoteError::Malformed("no JSON object in response".to_string()))?;

    serde_json::from_value(value)
        .map_err(|err| RemoteError::Malformed(format!("unexpected JSON shape: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pick {
        index: i64,
    }

    #[test]
    fn test_bare_object() {
        let pick: Pick = extract_json_block(r#"{"index": 2}"#).unwrap();
        assert_eq!(pick, Pick { index: 2 });
    }

    #[test]
    fn test_fenced_object_with_prose() {
        let text = "Sure! Here is the answer:\n```json\n{\n  \"index\": 4\n}\n```\nHope it helps.";
        let pick: Pick = extract_json_block(text).unwrap();
        assert_eq!(pick, Pick { index: 4 });
    }

    #[test]
    fn test_nested_object_taken_whole() {
        let value = first_json_object(r#"result: {"a": {"b": 1}, "c": [1, 2]} done"#).unwrap();
        assert_eq!(value["a"]["b"], 1);
        assert_eq!(value["c"][1], 2);
    }

    #[test]
    fn test_skips_broken_brace() {
        let text = r#"{not json} then {"index": 7}"#;
        let pick: Pick = extract_json_block(text).unwrap();
        assert_eq!(pick, Pick { index: 7 });
    }

    #[test]
    fn test_no_object() {
        let result: RemoteResult<Pick> = extract_json_block("I could not decide.");
        assert!(matches!(result, Err(RemoteError::Malformed(_))));
    }

    #[test]
    fn test_wrong_shape() {
        let result: RemoteResult<Pick> = extract_json_block(r#"{"choice": "first"}"#);
        assert!(matches!(result, Err(RemoteError::Malformed(_))));
    }
}
