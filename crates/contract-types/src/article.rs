//! Numbered sections of a contract body

use serde::{Deserialize, Serialize};

/// Where an article came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ArticleOrigin {
    /// Parsed from the template; `line` is the 0-based index of the header line
    Template { line: usize },
    /// Synthesized from an active clause
    Clause,
}

/// A numbered, titled section of the contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Number as written by the author, or the final number after renumbering
    pub number: u32,
    pub title: String,
    pub content: String,
    pub origin: ArticleOrigin,
}

impl Article {
    pub fn from_template(
        number: u32,
        title: impl Into<String>,
        content: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            number,
            title: title.into(),
            content: content.into(),
            origin: ArticleOrigin::Template { line },
        }
    }

    pub fn from_clause(number: u32, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            content: content.into(),
            origin: ArticleOrigin::Clause,
        }
    }

    pub fn is_clause(&self) -> bool {
        self.origin == ArticleOrigin::Clause
    }

    /// Same article under a new number
    pub fn renumbered(self, number: u32) -> Self {
        Self { number, ..self }
    }
}
