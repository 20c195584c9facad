//! Request, response and database models for the contract API

use chrono::{DateTime, Utc};
use contract_engine::{QuestionnaireStep, TemplateAnalysis};
use contract_types::{
    AnswerSet, Article, Contracts, GeneratedContract, Project, Question, Role,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;

use crate::error::ApiError;

/// Project row
#[derive(Debug, Clone, FromRow)]
pub struct DbProject {
    pub id: String,
    pub name: String,
    pub description: String,
    pub contracts_json: String,
    pub created_at: DateTime<Utc>,
}

impl DbProject {
    pub fn into_project(self) -> Result<Project, ApiError> {
        let contracts: Contracts =
            serde_json::from_str(&self.contracts_json).map_err(|e| ApiError::Internal(e.into()))?;

        Ok(Project {
            id: self.id,
            name: self.name,
            description: self.description,
            contracts,
            created_at: self.created_at,
        })
    }
}

/// Generated contract row
#[derive(Debug, Clone, FromRow)]
pub struct DbContract {
    pub id: String,
    pub project_id: String,
    pub project_name: String,
    pub role: String,
    pub role_name: String,
    pub content: String,
    pub answers_json: String,
    pub generated_at: DateTime<Utc>,
}

impl DbContract {
    pub fn into_contract(self) -> Result<GeneratedContract, ApiError> {
        let role = Role::parse(&self.role).ok_or_else(|| {
            ApiError::Internal(anyhow::anyhow!("Stored contract {} has role '{}'", self.id, self.role))
        })?;
        let answers: AnswerSet =
            serde_json::from_str(&self.answers_json).map_err(|e| ApiError::Internal(e.into()))?;

        Ok(GeneratedContract {
            id: self.id,
            project_id: self.project_id,
            project_name: self.project_name,
            role,
            role_name: self.role_name,
            content: self.content,
            answers,
            generated_at: self.generated_at,
        })
    }
}

/// Body of project create and update requests
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub contracts: Option<Contracts>,
}

/// Request to generate one party's contract
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub role: String,
    #[serde(default)]
    pub answers: AnswerSet,
    /// Date printed in the signature block; today when absent
    #[serde(default)]
    pub date: Option<String>,
}

/// Generated contract plus what the engine did with the clauses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub contract: GeneratedContract,
    pub articles: Vec<Article>,
    pub active_clauses: Vec<u64>,
    pub unplaced_clauses: Vec<u64>,
    /// Answer keys of questionnaire steps left empty
    pub unanswered: Vec<String>,
    /// Placeholder markers still present in the contract text
    pub unresolved_placeholders: Vec<String>,
}

/// Request to store a contract generated elsewhere
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContractRequest {
    pub project_id: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    pub role: Option<String>,
    #[serde(default)]
    pub role_name: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub answers: AnswerSet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub template: String,
}

/// Template analysis with a default question for every placeholder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub analysis: TemplateAnalysis,
    pub questions: BTreeMap<String, Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    pub project_id: String,
    pub role: Role,
    pub role_name: String,
    pub steps: Vec<QuestionnaireStep>,
}
