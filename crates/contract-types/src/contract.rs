//! Contract configurations, projects and generated contracts

use crate::answers::AnswerSet;
use crate::question::{Condition, Question};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Party of a two-party project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    A,
    B,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::A => "A",
            Role::B => "B",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "A" | "a" => Some(Role::A),
            "B" | "b" => Some(Role::B),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional section included when its condition holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Original article number after which the clause goes (0 = document start)
    #[serde(
        rename = "insertAfterArticle",
        default,
        deserialize_with = "deserialize_anchor"
    )]
    pub anchor: u32,
    #[serde(default)]
    pub question: Question,
    #[serde(default)]
    pub condition: Condition,
}

/// A stored `null` anchor means the document start
fn deserialize_anchor<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

impl Clause {
    pub fn new(id: u64, title: impl Into<String>, content: impl Into<String>, anchor: u32) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            anchor,
            question: Question::default(),
            condition: Condition::default(),
        }
    }

    pub fn with_question(mut self, question: Question) -> Self {
        self.question = question;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    /// Key of this clause's activation answer
    pub fn answer_key(&self) -> String {
        AnswerSet::clause_key(self.id)
    }
}

/// One party's contract: template, questions and optional clauses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub template: String,
    /// Placeholder names in first-appearance order
    #[serde(default)]
    pub placeholders: Vec<String>,
    #[serde(default)]
    pub questions: BTreeMap<String, Question>,
    #[serde(default)]
    pub clauses: Vec<Clause>,
}

impl ContractConfig {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            ..Self::default()
        }
    }

    pub fn with_clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }
}

/// Both contracts of a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contracts {
    #[serde(rename = "A")]
    pub a: ContractConfig,
    #[serde(rename = "B")]
    pub b: ContractConfig,
}

impl Contracts {
    pub fn get(&self, role: Role) -> &ContractConfig {
        match role {
            Role::A => &self.a,
            Role::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, role: Role) -> &mut ContractConfig {
        match role {
            Role::A => &mut self.a,
            Role::B => &mut self.b,
        }
    }
}

/// A two-party contract project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub contracts: Contracts,
    pub created_at: DateTime<Utc>,
}

/// Project as authored, before it is stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contracts: Contracts,
}

impl ProjectDefinition {
    pub fn into_project(self, id: impl Into<String>, created_at: DateTime<Utc>) -> Project {
        Project {
            id: id.into(),
            name: self.name,
            description: self.description,
            contracts: self.contracts,
            created_at,
        }
    }
}

/// A finished contract as stored after generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContract {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub project_name: String,
    pub role: Role,
    #[serde(default)]
    pub role_name: String,
    pub content: String,
    #[serde(default)]
    pub answers: AnswerSet,
    pub generated_at: DateTime<Utc>,
}
