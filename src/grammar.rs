//! Seam to the external grammar parser.
//!
//! Tokenizing and parsing Gherkin text is not done here. A [`GrammarParser`]
//! hands over the dynamic tree of one document, or a grammar-level error.
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::GrammarError;

pub trait GrammarParser {
    /// Parse `source` into the dynamic tree of one document.
    fn parse(&self, source: &str) -> Result<Value, GrammarError>;
}

impl<F> GrammarParser for F
where
    F: Fn(&str) -> Result<Value, GrammarError>,
{
    fn parse(&self, source: &str) -> Result<Value, GrammarError> {
        self(source)
    }
}

/// Reads the JSON message stream written by the Cucumber `gherkin` tool.
///
/// Accepts NDJSON envelopes or a single (possibly pretty-printed) value:
/// - `{"parseError": {...}}` → grammar error with its message and location
/// - `{"gherkinDocument": {...}}` → the document
/// - `source`, `pickle`, `meta` envelopes → skipped
/// - anything else → taken as a bare document
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageStreamParser;

const SKIPPED_ENVELOPES: &[&str] = &["source", "pickle", "meta"];

impl GrammarParser for MessageStreamParser {
    fn parse(&self, source: &str) -> Result<Value, GrammarError> {
        let mut documents = Vec::new();
        for message in serde_json::Deserializer::from_str(source).into_iter::<Value>() {
            let message = message.map_err(|err| {
                GrammarError::new(err.to_string()).at(Some(err.line() as u64), Some(err.column() as u64))
            })?;
            match message {
                Value::Object(mut envelope) if envelope.len() == 1 => {
                    if let Some(error) = envelope.get("parseError") {
                        return Err(parse_error(error));
                    }
                    if let Some(document) = envelope.remove("gherkinDocument") {
                        documents.push(document);
                    } else if envelope.keys().any(|key| SKIPPED_ENVELOPES.contains(&key.as_str())) {
                        trace!(kind = ?envelope.keys().next(), "skipping envelope");
                    } else {
                        documents.push(Value::Object(envelope));
                    }
                }
                other => documents.push(other),
            }
        }

        match documents.len() {
            1 => Ok(documents.remove(0)),
            0 => Err(GrammarError::new("no gherkin document in input")),
            n => Err(GrammarError::new(format!("expected one gherkin document, found {n}"))),
        }
    }
}

/// `{"source": {"location": {"line", "column"}}, "message": "..."}`
fn parse_error(error: &Value) -> GrammarError {
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown parse error");
    let location = error
        .pointer("/source/location")
        .and_then(Value::as_object);
    let coordinate = |location: &Map<String, Value>, key: &str| location.get(key).and_then(Value::as_u64);
    GrammarError::new(message).at(
        location.and_then(|l| coordinate(l, "line")),
        location.and_then(|l| coordinate(l, "column")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_a_bare_document() {
        let doc = MessageStreamParser.parse(r#"{ "comments": [], "feature": null }"#).unwrap();
        assert_eq!(doc, json!({ "comments": [], "feature": null }));
    }

    #[test]
    fn reads_ndjson_envelopes() {
        let source = concat!(
            r#"{"source":{"uri":"a.feature","data":"Feature: A","mediaType":"text/x.cucumber.gherkin+plain"}}"#,
            "\n",
            r#"{"gherkinDocument":{"uri":"a.feature","comments":[]}}"#,
            "\n",
            r#"{"pickle":{"id":"1"}}"#,
            "\n",
        );
        let doc = MessageStreamParser.parse(source).unwrap();
        assert_eq!(doc, json!({ "uri": "a.feature", "comments": [] }));
    }

    #[test]
    fn parse_error_envelope_is_a_grammar_error() {
        let source = r#"{"parseError":{"source":{"uri":"a.feature","location":{"line":3,"column":5}},"message":"(3:5): expected: #EOF, #TableRow, got 'Scenario'"}}"#;
        let err = MessageStreamParser.parse(source).unwrap_err();
        assert_eq!(err.line, Some(3));
        assert_eq!(err.column, Some(5));
        assert!(err.message.contains("expected: #EOF"));
    }

    #[test]
    fn malformed_json_reports_position() {
        let err = MessageStreamParser.parse("{\n  \"feature\": [,\n}").unwrap_err();
        assert_eq!(err.line, Some(2));
        assert!(err.column.is_some());
    }

    #[test]
    fn rejects_empty_and_multiple_documents() {
        assert_eq!(
            MessageStreamParser.parse("  ").unwrap_err().message,
            "no gherkin document in input"
        );
        let err = MessageStreamParser
            .parse(r#"{"gherkinDocument":{}} {"gherkinDocument":{}}"#)
            .unwrap_err();
        assert_eq!(err.message, "expected one gherkin document, found 2");
    }

    #[test]
    fn closures_are_grammar_parsers() {
        let parser = |source: &str| -> Result<Value, GrammarError> { Ok(json!({ "len": source.len() })) };
        assert_eq!(parser.parse("abc").unwrap(), json!({ "len": 3 }));
    }
}
