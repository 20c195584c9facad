//! Questions asked to the end user and the conditions attached to clauses

use serde::{Deserialize, Serialize};
use std::fmt;

/// A question shown in the questionnaire
///
/// Stored as `{"question": "...", "type": "...", "required": true, "options": [...]}`.
/// Clause activation questions use `text` for the prompt, which is accepted
/// as an alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question", alias = "text", default)]
    pub prompt: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    #[serde(default)]
    pub required: bool,
}

impl Question {
    pub fn new(prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            prompt: prompt.into(),
            kind,
            required: true,
        }
    }

    /// Mark the question as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Yes/no choice, the default activation question of a new clause
    pub fn yes_no(prompt: impl Into<String>) -> Self {
        Self::new(
            prompt,
            QuestionKind::Choice {
                options: vec!["Sì".to_string(), "No".to_string()],
            },
        )
    }
}

impl Default for Question {
    fn default() -> Self {
        Self::yes_no("")
    }
}

/// Input kind of a question
///
/// Only the select and choice kinds carry options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Text,
    Email,
    Number,
    Date,
    #[serde(rename = "textarea")]
    Multiline,
    Select {
        #[serde(default)]
        options: Vec<String>,
    },
    #[serde(rename = "radio")]
    Choice {
        #[serde(default)]
        options: Vec<String>,
    },
}

impl QuestionKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Text => "text",
            QuestionKind::Email => "email",
            QuestionKind::Number => "number",
            QuestionKind::Date => "date",
            QuestionKind::Multiline => "textarea",
            QuestionKind::Select { .. } => "select",
            QuestionKind::Choice { .. } => "radio",
        }
    }

    /// Options offered to the user, empty for free-form kinds
    pub fn options(&self) -> &[String] {
        match self {
            QuestionKind::Select { options } | QuestionKind::Choice { options } => options,
            QuestionKind::Text
            | QuestionKind::Email
            | QuestionKind::Number
            | QuestionKind::Date
            | QuestionKind::Multiline => &[],
        }
    }

    pub fn has_options(&self) -> bool {
        matches!(
            self,
            QuestionKind::Select { .. } | QuestionKind::Choice { .. }
        )
    }
}

/// Comparison operator of a clause condition
///
/// Unrecognised operators are kept verbatim in [`Operator::Unknown`] and
/// never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Equals,
    NotEquals,
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
    Contains,
    Unknown(String),
}

impl Operator {
    pub fn parse(token: &str) -> Self {
        match token {
            "=" => Operator::Equals,
            "!=" => Operator::NotEquals,
            ">" => Operator::Greater,
            "<" => Operator::Less,
            ">=" => Operator::GreaterOrEqual,
            "<=" => Operator::LessOrEqual,
            "contains" => Operator::Contains,
            other => Operator::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
            Operator::Contains => "contains",
            Operator::Unknown(token) => token,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Operator::Unknown(_))
    }
}

impl From<String> for Operator {
    fn from(token: String) -> Self {
        Operator::parse(&token)
    }
}

impl From<Operator> for String {
    fn from(operator: Operator) -> Self {
        operator.as_str().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule deciding whether a clause is included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub operator: Operator,
    #[serde(default)]
    pub value: String,
}

impl Condition {
    pub fn new(operator: Operator, value: impl Into<String>) -> Self {
        Self {
            operator,
            value: value.into(),
        }
    }
}

impl Default for Condition {
    fn default() -> Self {
        Self::new(Operator::Equals, "Sì")
    }
}
