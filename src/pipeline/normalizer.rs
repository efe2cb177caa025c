//! Conversion of heterogeneous agent replies into [`NormalizedResponse`].
//!
//! Missing or oddly typed fields are tolerated and defaulted. Normalization
//! only fails when a text reply is not JSON at all.

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::{Chunk, ChunkMetadata, NO_SEARCH_RESULTS, NormalizedResponse, RawResponse};
use crate::error::ParseError;

/// Maximum characters of a malformed reply quoted in the error.
const EXCERPT_CHARS: usize = 120;

/// Key holding the web search results text.
const SEARCH_RESULTS_KEY: &str = "search_results";
/// Key holding the retrieved chunk list.
const RAG_ANALYSIS_KEY: &str = "rag_analysis";

/// Normalizes a raw agent reply.
///
/// # Errors
///
/// Returns [`ParseError::MalformedResponse`] if `raw` is text that does not
/// parse as JSON.
pub fn normalize(raw: &RawResponse) -> Result<NormalizedResponse, ParseError> {
    match raw {
        RawResponse::Mapping(map) => Ok(from_mapping(map)),
        RawResponse::Text(text) => {
            let value: Value =
                serde_json::from_str(text).map_err(|_| ParseError::MalformedResponse {
                    excerpt: excerpt(text),
                })?;
            match value {
                Value::Object(map) => Ok(from_mapping(&map)),
                other => {
                    debug!(shape = json_kind(&other), "agent reply is not a mapping");
                    Ok(NormalizedResponse::unavailable())
                }
            }
        }
    }
}

/// Builds the normalized form from a mapping, applying defaults.
fn from_mapping(map: &Map<String, Value>) -> NormalizedResponse {
    let search_results = match map.get(SEARCH_RESULTS_KEY) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        None | Some(Value::Null | Value::String(_)) => NO_SEARCH_RESULTS.to_string(),
        Some(other) => other.to_string(),
    };

    let rag_chunks: Vec<Chunk> = match map.get(RAG_ANALYSIS_KEY) {
        Some(Value::Array(items)) => items.iter().filter_map(chunk_from_value).collect(),
        Some(other) => {
            debug!(
                shape = json_kind(other),
                "ignoring rag_analysis that is not a list"
            );
            Vec::new()
        }
        None => Vec::new(),
    };

    NormalizedResponse {
        search_results,
        rag_chunks,
    }
}

/// Converts one `rag_analysis` entry into a [`Chunk`].
///
/// Non-object entries are skipped. Missing or non-string `content` becomes
/// empty. A missing or null `source` becomes `None`; any other non-string
/// `source` is kept as its JSON text.
fn chunk_from_value(value: &Value) -> Option<Chunk> {
    let Value::Object(item) = value else {
        debug!(shape = json_kind(value), "skipping rag_analysis entry");
        return None;
    };

    let content = item
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut extra = item
        .get("metadata")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let source = match extra.remove("source") {
        Some(Value::String(s)) => Some(s),
        None | Some(Value::Null) => None,
        Some(other) => Some(other.to_string()),
    };

    Some(Chunk {
        content,
        metadata: ChunkMetadata { source, extra },
    })
}

/// Leading portion of `text`, cut on a character boundary.
fn excerpt(text: &str) -> String {
    let mut out: String = text.chars().take(EXCERPT_CHARS).collect();
    if text.chars().nth(EXCERPT_CHARS).is_some() {
        out.push_str("...");
    }
    out
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NO_RESULTS_AVAILABLE;
    use crate::pipeline::KeyPointExtractor;
    use proptest::prelude::*;
    use serde_json::json;

    fn mapping(value: Value) -> RawResponse {
        match value {
            Value::Object(map) => map.into(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_structured_mapping() {
        let raw = mapping(json!({
            "search_results": "Search Results: A. B.",
            "rag_analysis": [
                {"content": "This is a meaningful sentence here. Short.", "metadata": {"source": "https://x"}}
            ]
        }));
        let normalized = normalize(&raw).unwrap_or_else(|_| unreachable!());
        assert_eq!(normalized.search_results, "Search Results: A. B.");
        assert_eq!(normalized.rag_chunks.len(), 1);
        assert_eq!(normalized.rag_chunks[0].source(), Some("https://x"));
    }

    #[test]
    fn test_json_text_is_parsed() {
        let raw = RawResponse::Text(
            r#"{"search_results": "web", "rag_analysis": [{"content": "c"}]}"#.to_string(),
        );
        let normalized = normalize(&raw).unwrap_or_else(|_| unreachable!());
        assert_eq!(normalized.search_results, "web");
        assert_eq!(normalized.rag_chunks[0].content, "c");
        assert_eq!(normalized.rag_chunks[0].source(), None);
    }

    #[test]
    fn test_malformed_text_fails() {
        let err = normalize(&RawResponse::Text("not json".to_string()));
        assert_eq!(
            err,
            Err(ParseError::MalformedResponse {
                excerpt: "not json".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_excerpt_is_capped() {
        let text = "x".repeat(500);
        match normalize(&RawResponse::Text(text)) {
            Err(ParseError::MalformedResponse { excerpt }) => {
                assert_eq!(excerpt.chars().count(), EXCERPT_CHARS + 3);
                assert!(excerpt.ends_with("..."));
            }
            Ok(_) => unreachable!(),
        }
    }

    #[test]
    fn test_missing_keys_default() {
        let normalized = normalize(&mapping(json!({}))).unwrap_or_else(|_| unreachable!());
        assert_eq!(normalized.search_results, NO_SEARCH_RESULTS);
        assert!(normalized.rag_chunks.is_empty());
    }

    #[test]
    fn test_null_and_empty_search_results_default() {
        for value in [json!({"search_results": null}), json!({"search_results": ""})] {
            let normalized = normalize(&mapping(value)).unwrap_or_else(|_| unreachable!());
            assert_eq!(normalized.search_results, NO_SEARCH_RESULTS);
        }
    }

    #[test]
    fn test_non_string_search_results_rendered_as_json() {
        let normalized = normalize(&mapping(json!({"search_results": ["a", "b"]})))
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(normalized.search_results, r#"["a","b"]"#);
    }

    #[test]
    fn test_json_that_is_not_a_mapping() {
        for text in ["[1, 2]", "42", "\"just a string\"", "null"] {
            let normalized =
                normalize(&RawResponse::Text(text.to_string())).unwrap_or_else(|_| unreachable!());
            assert_eq!(normalized.search_results, NO_RESULTS_AVAILABLE);
            assert!(normalized.rag_chunks.is_empty());
        }
    }

    #[test]
    fn test_tolerates_odd_chunk_entries() {
        let raw = mapping(json!({
            "rag_analysis": [
                "stray string",
                {"content": 12, "metadata": {"source": 7, "page": 3}},
                {"metadata": "not a map"},
                {"content": "kept", "metadata": {"source": "s", "title": "T"}}
            ]
        }));
        let normalized = normalize(&raw).unwrap_or_else(|_| unreachable!());
        assert_eq!(normalized.rag_chunks.len(), 3);

        let odd = &normalized.rag_chunks[0];
        assert_eq!(odd.content, "");
        assert_eq!(odd.source(), Some("7"));
        assert!(!odd.metadata.extra.contains_key("source"));
        assert_eq!(odd.metadata.extra.get("page"), Some(&json!(3)));

        assert_eq!(normalized.rag_chunks[1], Chunk::default());

        let kept = &normalized.rag_chunks[2];
        assert_eq!(kept.source(), Some("s"));
        assert_eq!(kept.metadata.extra.get("title"), Some(&json!("T")));
    }

    #[test]
    fn test_non_string_source_cites_json_text() {
        let raw = mapping(json!({
            "rag_analysis": [
                {"content": "Numbered sources still get a citation here.", "metadata": {"source": 7}},
                {"content": "Null sources are treated as missing here.", "metadata": {"source": null}}
            ]
        }));
        let normalized = normalize(&raw).unwrap_or_else(|_| unreachable!());
        assert_eq!(normalized.rag_chunks[0].source(), Some("7"));
        assert_eq!(normalized.rag_chunks[1].source(), None);

        let points = KeyPointExtractor::default().extract(&normalized.rag_chunks);
        assert_eq!(points[0].source, "7");
        assert_eq!(points[1].source, "");
    }

    #[test]
    fn test_rag_analysis_not_a_list() {
        let normalized = normalize(&mapping(json!({"rag_analysis": {"content": "x"}})))
            .unwrap_or_else(|_| unreachable!());
        assert!(normalized.rag_chunks.is_empty());
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            ".{0,16}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                proptest::collection::btree_map("[a-z_]{1,14}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_json_mappings_always_normalize(
            entries in proptest::collection::btree_map(
                prop_oneof![Just("search_results".to_string()), Just("rag_analysis".to_string()), "[a-z]{1,8}"],
                arb_json(),
                0..4,
            )
        ) {
            let map: Map<String, Value> = entries.into_iter().collect();
            let text = serde_json::to_string(&map).unwrap_or_default();
            let normalized = normalize(&RawResponse::Text(text));
            prop_assert!(normalized.is_ok());
            prop_assert!(!normalized.unwrap_or_else(|_| unreachable!()).search_results.is_empty());
        }
    }
}
