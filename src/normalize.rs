//! Pulls the JSON payload out of free-text model output.
//!
//! Models asked for JSON still like to wrap it in prose ("Here are some
//! books: ...") or markdown fences. Extraction anchors on the first opening
//! delimiter and the last closing delimiter of the expected shape, which
//! handles nested delimiters inside the payload. It does not balance
//! brackets: a stray closing delimiter in prose after the payload ends up in
//! the candidate and decoding fails. Callers own that failure.

use std::borrow::Cow;

use serde::de::DeserializeOwned;

use crate::model::book::{Analysis, Book};

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Array,
    Object,
}

impl Shape {
    fn delimiters(self) -> (char, char) {
        match self {
            Shape::Array => ('[', ']'),
            Shape::Object => ('{', '}'),
        }
    }

    fn empty_literal(self) -> &'static str {
        match self {
            Shape::Array => "[]",
            Shape::Object => "{}",
        }
    }
}

/// Candidate JSON text for `shape` found in `raw`.
pub fn extract_payload(raw: Option<&str>, shape: Shape) -> Cow<'_, str> {
    let text = match raw {
        Some(t) if !t.is_empty() => t,
        _ => return Cow::Borrowed(shape.empty_literal()),
    };

    let (open, close) = shape.delimiters();
    if let (Some(start), Some(end)) = (text.find(open), text.rfind(close)) {
        if end > start {
            return Cow::Borrowed(&text[start..=end]);
        }
    }

    Cow::Owned(strip_fences(text).trim().to_string())
}

/// Removes every code fence marker along with its language tag.
fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(FENCE) {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + FENCE.len()..];
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
            .unwrap_or(rest.len());
        rest = &rest[tag_len..];
    }
    out.push_str(rest);

    out
}

pub fn decode<T: DeserializeOwned>(raw: Option<&str>, shape: Shape) -> Result<T, serde_json::Error> {
    let payload = extract_payload(raw, shape);
    serde_json::from_str(&payload)
}

pub fn books(raw: Option<&str>) -> Result<Vec<Book>, serde_json::Error> {
    decode(raw, Shape::Array)
}

pub fn analysis(raw: Option<&str>) -> Result<Analysis, serde_json::Error> {
    decode(raw, Shape::Object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WRAPPED: &str = "Here are some books:\n[{\"title\":\"X\",\"author\":\"Y\",\"description\":\"Z\",\"genre\":\"G\",\"coverColor\":\"#112233\"}]\nEnjoy!";

    #[test]
    fn extracts_array_from_prose() {
        let payload = extract_payload(Some(WRAPPED), Shape::Array);
        assert!(payload.starts_with("[{"));
        assert!(payload.ends_with("}]"));

        let books = books(Some(WRAPPED)).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "X");
        assert_eq!(books[0].cover_color.as_deref(), Some("#112233"));
    }

    #[test]
    fn empty_or_absent_input_is_the_empty_literal() {
        assert_eq!(extract_payload(Some(""), Shape::Array), "[]");
        assert_eq!(extract_payload(None, Shape::Array), "[]");
        assert_eq!(extract_payload(None, Shape::Object), "{}");

        assert!(books(Some("")).unwrap().is_empty());
        assert!(analysis(None).unwrap().is_empty());
        let value: serde_json::Value = decode(Some(""), Shape::Object).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn nested_closers_inside_payload_are_kept() {
        let raw = r#"Sure! [{"title":"A [draft]","author":"B","description":"uses ] inside"}] hope it helps"#;
        let books = books(Some(raw)).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "A [draft]");
        assert_eq!(books[0].description, "uses ] inside");
    }

    #[test]
    fn stray_closer_after_payload_breaks_decoding() {
        let raw = r#"[{"title":"A","author":"B","description":"C"}] (see note ])"#;
        assert_eq!(
            extract_payload(Some(raw), Shape::Array),
            r#"[{"title":"A","author":"B","description":"C"}] (see note ]"#
        );
        assert!(books(Some(raw)).is_err());
    }

    #[test]
    fn object_extraction_spans_first_to_last_brace() {
        let raw = "```json\n{\"summary\":\"S\",\"themes\":[\"t1\",\"t2\"],\"funFact\":\"F\"}\n```";
        let analysis = analysis(Some(raw)).unwrap();
        assert_eq!(analysis.summary, "S");
        assert_eq!(analysis.themes, vec!["t1".to_string(), "t2".to_string()]);
        assert_eq!(analysis.fun_fact, "F");
    }

    #[test]
    fn misordered_delimiters_fall_back_to_fence_stripping() {
        assert_eq!(extract_payload(Some("] nothing ["), Shape::Array), "] nothing [");
        assert_eq!(extract_payload(Some("```json\n  42 \n```"), Shape::Array), "42");
        assert_eq!(extract_payload(Some("```\nplain\n```"), Shape::Object), "plain");
        assert_eq!(extract_payload(Some("```python\nx\n```"), Shape::Array), "x");
        assert!(books(Some("no brackets at all")).is_err());
    }

    #[test]
    fn normalizing_twice_is_identical() {
        let first = extract_payload(Some(WRAPPED), Shape::Array).into_owned();
        let second = extract_payload(Some(WRAPPED), Shape::Array).into_owned();
        assert_eq!(first, second);
        assert_eq!(books(Some(WRAPPED)).unwrap(), books(Some(WRAPPED)).unwrap());
    }
}
