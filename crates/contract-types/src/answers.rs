//! Answers collected for one generation run

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix of answer keys holding a clause's activation answer (`clause_<id>`)
pub const CLAUSE_ANSWER_PREFIX: &str = "clause_";

/// Map from placeholder name (or `clause_<id>`) to the user's answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer key of a clause's activation question
    pub fn clause_key(clause_id: u64) -> String {
        format!("{}{}", CLAUSE_ANSWER_PREFIX, clause_id)
    }

    pub fn is_clause_key(key: &str) -> bool {
        key.starts_with(CLAUSE_ANSWER_PREFIX)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn with_clause(self, clause_id: u64, value: impl Into<String>) -> Self {
        self.with(Self::clause_key(clause_id), value)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Placeholder answer, `None` for reserved clause keys
    pub fn placeholder(&self, name: &str) -> Option<&str> {
        if Self::is_clause_key(name) {
            return None;
        }
        self.get(name)
    }

    pub fn clause(&self, clause_id: u64) -> Option<&str> {
        self.get(&Self::clause_key(clause_id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
