//! Reading project definitions and answer sets from JSON files

use crate::error::EngineError;
use crate::questions::fill_missing_questions;
use contract_types::{AnswerSet, ProjectDefinition, Role};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, EngineError> {
    let content = fs::read_to_string(path).map_err(|source| EngineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| EngineError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a project definition and bring both contracts' placeholders and
/// questions in line with their templates
pub fn load_project(path: &Path) -> Result<ProjectDefinition, EngineError> {
    let mut project: ProjectDefinition = read_json(path)?;
    if project.name.trim().is_empty() {
        return Err(EngineError::MissingField("name"));
    }
    for role in [Role::A, Role::B] {
        fill_missing_questions(project.contracts.get_mut(role));
    }
    Ok(project)
}

pub fn load_answers(path: &Path) -> Result<AnswerSet, EngineError> {
    read_json(path)
}
