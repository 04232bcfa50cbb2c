//! Server-sent forms and client responses.
//!
//! Some clients emit custom-form responses with bare empty elements at comma
//! boundaries (`[A,,"B, C",]`), which is not JSON. [`decode_form_response`]
//! repairs that shape before parsing and reports both texts when it cannot.

use serde_json::Value;
use thiserror::Error;

/// The response text could not be parsed, even after repair.
#[derive(Debug, Error)]
#[error("malformed form response: {source} (original `{original}`, repaired `{repaired}`)")]
pub struct FormRepairError {
    pub original: String,
    pub repaired: String,
    #[source]
    pub source: serde_json::Error,
}

/// Parse a form response, repairing list elements the client left empty.
/// Anything that is not a non-empty bracketed list is parsed as is.
pub fn decode_form_response(raw: &str) -> Result<Value, FormRepairError> {
    let repaired = repair_list(raw).unwrap_or_else(|| raw.to_owned());
    serde_json::from_str(&repaired).map_err(|source| FormRepairError {
        original: raw.to_owned(),
        repaired,
        source,
    })
}

/// Rebuild a top-level `[...]` with every element made explicit. `None` if
/// the text is not a bracketed list or the brackets are empty.
fn repair_list(raw: &str) -> Option<String> {
    let inner = raw.trim().strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }

    let parts: Vec<String> = split_top_level(inner)
        .into_iter()
        .map(|part| repair_element(part.trim()))
        .collect();
    Some(format!("[{}]", parts.join(",")))
}

fn repair_element(part: &str) -> String {
    if part.is_empty() {
        return "\"\"".to_owned();
    }
    let bare = !part.contains(['"', '[', ']', '{', '}']);
    if bare && serde_json::from_str::<Value>(part).is_err() {
        // Serializing a str cannot fail.
        return Value::String(part.to_owned()).to_string();
    }
    part.to_owned()
}

/// Split on commas outside quoted strings and nested brackets.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

// ── Forms ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum FormKind {
    /// Two-button yes/no dialog.
    Modal,
    /// Vertical list of buttons.
    Menu { buttons: usize },
    /// Input elements (toggles, sliders, text fields...).
    Custom { elements: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub title: String,
    pub kind: FormKind,
}

impl Form {
    pub fn modal(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: FormKind::Modal,
        }
    }

    pub fn menu(title: impl Into<String>, buttons: usize) -> Self {
        Self {
            title: title.into(),
            kind: FormKind::Menu { buttons },
        }
    }

    pub fn custom(title: impl Into<String>, elements: usize) -> Self {
        Self {
            title: title.into(),
            kind: FormKind::Custom { elements },
        }
    }

    /// Check a decoded response against this form's shape.
    pub fn interpret(&self, value: Value) -> Result<FormResponse, FormResponseError> {
        if value.is_null() {
            return Ok(FormResponse::Closed);
        }
        match (&self.kind, value) {
            (FormKind::Modal, Value::Bool(choice)) => Ok(FormResponse::Modal(choice)),
            (FormKind::Menu { buttons }, Value::Number(n)) => match n.as_u64() {
                Some(i) if (i as usize) < *buttons => Ok(FormResponse::Menu(i as usize)),
                _ => Err(FormResponseError::ButtonOutOfRange {
                    index: n.to_string(),
                    buttons: *buttons,
                }),
            },
            (FormKind::Custom { elements }, Value::Array(values)) => {
                if values.len() != *elements {
                    return Err(FormResponseError::ElementCount {
                        expected: *elements,
                        actual: values.len(),
                    });
                }
                Ok(FormResponse::Custom(values))
            }
            (kind, other) => Err(FormResponseError::WrongShape {
                kind: kind.clone(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormResponse {
    /// The player closed the form without answering.
    Closed,
    Modal(bool),
    Menu(usize),
    Custom(Vec<Value>),
}

#[derive(Debug, Error, PartialEq)]
pub enum FormResponseError {
    #[error("button {index} out of range for a menu of {buttons}")]
    ButtonOutOfRange { index: String, buttons: usize },
    #[error("expected {expected} custom form values, got {actual}")]
    ElementCount { expected: usize, actual: usize },
    #[error("{value} is not a valid response to a {kind:?} form")]
    WrongShape { kind: FormKind, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_ignores_commas_in_strings_and_nesting() {
        let parts = split_top_level(r#"1,"a,\"b",[2,3],{"k":4}"#);
        assert_eq!(parts, vec!["1", r#""a,\"b""#, "[2,3]", r#"{"k":4}"#]);
    }

    #[test]
    fn well_formed_json_is_untouched() {
        assert_eq!(decode_form_response("[true,3]").unwrap(), json!([true, 3]));
        assert_eq!(decode_form_response("null").unwrap(), Value::Null);
    }

    #[test]
    fn whitespace_only_list_is_one_empty_string() {
        assert_eq!(decode_form_response("[  ]").unwrap(), json!([""]));
        assert_eq!(decode_form_response(" [ ] ").unwrap(), json!([""]));
    }

    #[test]
    fn empty_brackets_stay_an_empty_list() {
        assert_eq!(decode_form_response("[]").unwrap(), json!([]));
    }

    #[test]
    fn valid_lists_survive_the_repair_path() {
        assert_eq!(
            decode_form_response(r#"[true, 3, "a, b", [1,2], {"k":null}]"#).unwrap(),
            json!([true, 3, "a, b", [1, 2], {"k": null}])
        );
    }
}
