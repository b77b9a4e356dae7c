//! Answer value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single answer: one option code, or a list of codes for multi-select kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multi(Vec<String>),
}

impl Default for AnswerValue {
    fn default() -> Self {
        AnswerValue::Single(String::new())
    }
}

impl AnswerValue {
    pub fn single(value: impl Into<String>) -> Self {
        AnswerValue::Single(value.into())
    }

    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnswerValue::Multi(values.into_iter().map(Into::into).collect())
    }

    /// Empty string or empty list
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Single(s) => s.is_empty(),
            AnswerValue::Multi(v) => v.is_empty(),
        }
    }

    /// The single value, if this is a non-empty single answer
    pub fn as_single(&self) -> Option<&str> {
        match self {
            AnswerValue::Single(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// All selected codes
    pub fn codes(&self) -> Vec<&str> {
        match self {
            AnswerValue::Single(s) if s.is_empty() => Vec::new(),
            AnswerValue::Single(s) => vec![s.as_str()],
            AnswerValue::Multi(v) => v.iter().map(String::as_str).collect(),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes().contains(&code)
    }

    /// Return a multi answer with `code` added or removed
    pub fn toggled(&self, code: &str) -> AnswerValue {
        let mut codes: Vec<String> = self.codes().into_iter().map(str::to_string).collect();
        if let Some(pos) = codes.iter().position(|c| c == code) {
            codes.remove(pos);
        } else {
            codes.push(code.to_string());
        }
        AnswerValue::Multi(codes)
    }
}

/// Question id -> answer. Key order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerState {
    answers: BTreeMap<String, AnswerValue>,
}

impl AnswerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.answers.get(id)
    }

    /// The current single value for `id`, treating empty as unset
    pub fn single(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(AnswerValue::as_single)
    }

    /// Whether `id` holds a non-empty answer
    pub fn is_answered(&self, id: &str) -> bool {
        self.get(id).is_some_and(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.answers.iter()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub(in crate::state) fn insert(&mut self, id: impl Into<String>, value: AnswerValue) {
        self.answers.insert(id.into(), value);
    }

    pub(in crate::state) fn remove(&mut self, id: &str) -> Option<AnswerValue> {
        self.answers.remove(id)
    }

    pub(in crate::state) fn clear(&mut self) {
        self.answers.clear();
    }
}

impl<K: Into<String>> FromIterator<(K, AnswerValue)> for AnswerState {
    fn from_iter<T: IntoIterator<Item = (K, AnswerValue)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(AnswerValue::single("").is_empty());
        assert!(AnswerValue::Multi(Vec::new()).is_empty());
        assert!(!AnswerValue::single("a").is_empty());
        assert!(!AnswerValue::multi(["a"]).is_empty());
    }

    #[test]
    fn test_as_single_ignores_lists_and_empty() {
        assert_eq!(AnswerValue::single("x").as_single(), Some("x"));
        assert_eq!(AnswerValue::single("").as_single(), None);
        assert_eq!(AnswerValue::multi(["x"]).as_single(), None);
    }

    #[test]
    fn test_toggled_adds_then_removes() {
        let value = AnswerValue::Multi(Vec::new());
        let value = value.toggled("a");
        let value = value.toggled("b");
        assert_eq!(value, AnswerValue::multi(["a", "b"]));
        let value = value.toggled("a");
        assert_eq!(value, AnswerValue::multi(["b"]));
    }

    #[test]
    fn test_serde_untagged_shapes() {
        let single: AnswerValue = serde_json::from_str(r#""a""#).unwrap();
        let multi: AnswerValue = serde_json::from_str(r#"["b","c"]"#).unwrap();
        assert_eq!(single, AnswerValue::single("a"));
        assert_eq!(multi, AnswerValue::multi(["b", "c"]));
        assert_eq!(serde_json::to_string(&multi).unwrap(), r#"["b","c"]"#);
    }

    #[test]
    fn test_answer_state_is_answered() {
        let state: AnswerState = [
            ("a", AnswerValue::single("1")),
            ("b", AnswerValue::single("")),
            ("c", AnswerValue::Multi(Vec::new())),
        ]
        .into_iter()
        .collect();

        assert!(state.is_answered("a"));
        assert!(!state.is_answered("b"));
        assert!(!state.is_answered("c"));
        assert!(!state.is_answered("missing"));
        assert_eq!(state.single("a"), Some("1"));
        assert_eq!(state.single("b"), None);
    }
}
