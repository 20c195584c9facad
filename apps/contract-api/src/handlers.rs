//! HTTP handlers for the contract API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use contract_engine::{
    analyze_template as analyze, fill_missing_questions, generate_contract, infer_question,
    questionnaire, today, unanswered_steps, validate_config,
};
use contract_types::{GeneratedContract, Project, ProjectDefinition, Role};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// List all projects, newest first
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let rows: Vec<DbProject> = sqlx::query_as(
        r#"
        SELECT id, name, description, contracts_json, created_at
        FROM projects
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    let projects = rows
        .into_iter()
        .map(DbProject::into_project)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(projects))
}

/// Create a new project
///
/// Placeholder lists are recomputed from the templates and placeholders
/// without a question get an inferred one.
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProjectRequest>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let definition = project_definition(req)?;
    let project = definition.into_project(Uuid::new_v4().to_string(), Utc::now());
    let contracts_json = serialize_contracts(&project)?;

    sqlx::query(
        r#"
        INSERT INTO projects (id, name, description, contracts_json, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&project.id)
    .bind(&project.name)
    .bind(&project.description)
    .bind(&contracts_json)
    .bind(project.created_at.to_rfc3339())
    .execute(&state.db)
    .await?;

    tracing::info!("Created project: {}", project.id);

    Ok((StatusCode::CREATED, Json(project)))
}

/// Get project by ID
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(fetch_project(&state, &id).await?))
}

/// Replace a project's name, description and contracts
///
/// Placeholders and missing questions are refreshed as on creation; the id
/// and creation time are kept.
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ProjectRequest>,
) -> Result<Json<Project>, ApiError> {
    let existing = fetch_project(&state, &id).await?;
    let definition = project_definition(req)?;
    let project = definition.into_project(existing.id, existing.created_at);
    let contracts_json = serialize_contracts(&project)?;

    sqlx::query(
        r#"
        UPDATE projects
        SET name = ?, description = ?, contracts_json = ?
        WHERE id = ?
        "#,
    )
    .bind(&project.name)
    .bind(&project.description)
    .bind(&contracts_json)
    .bind(&project.id)
    .execute(&state.db)
    .await?;

    tracing::info!("Updated project: {}", project.id);

    Ok(Json(project))
}

/// Delete a project together with the contracts generated from it
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut tx = state.db.begin().await?;

    let result = sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(&id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::ProjectNotFound(id));
    }

    let removed = sqlx::query("DELETE FROM generated_contracts WHERE project_id = ?")
        .bind(&id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    tracing::info!(contracts = removed, "Deleted project: {}", id);

    Ok(StatusCode::NO_CONTENT)
}

/// Ordered questions for one party of a project
pub async fn get_questionnaire(
    State(state): State<Arc<AppState>>,
    Path((id, role)): Path<(String, String)>,
) -> Result<Json<QuestionnaireResponse>, ApiError> {
    let role = parse_role(&role)?;
    let project = fetch_project(&state, &id).await?;
    let config = project.contracts.get(role);

    Ok(Json(QuestionnaireResponse {
        project_id: project.id.clone(),
        role,
        role_name: config.name.clone(),
        steps: questionnaire(config),
    }))
}

/// Generate one party's contract from the answers and store it
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<GenerateResponse>), ApiError> {
    let role = parse_role(&req.role)?;
    let project = fetch_project(&state, &id).await?;
    let config = project.contracts.get(role);

    let date = req.date.unwrap_or_else(today);
    let document = generate_contract(&project.name, config, &req.answers, &date);
    let unanswered = unanswered_steps(config, &req.answers)
        .into_iter()
        .map(|step| step.key)
        .collect();

    let unresolved_placeholders = document.unresolved_placeholders;

    let contract = GeneratedContract {
        id: Uuid::new_v4().to_string(),
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        role,
        role_name: config.name.clone(),
        content: document.content,
        answers: req.answers,
        generated_at: Utc::now(),
    };
    insert_contract(&state, &contract).await?;

    tracing::info!(project = %project.id, role = %role, "Generated contract: {}", contract.id);

    Ok((
        StatusCode::CREATED,
        Json(GenerateResponse {
            contract,
            articles: document.articles,
            active_clauses: document.active_clauses,
            unplaced_clauses: document.unplaced_clauses,
            unanswered,
            unresolved_placeholders,
        }),
    ))
}

/// List all generated contracts, newest first
pub async fn list_contracts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GeneratedContract>>, ApiError> {
    let rows: Vec<DbContract> = sqlx::query_as(
        r#"
        SELECT id, project_id, project_name, role, role_name, content, answers_json, generated_at
        FROM generated_contracts
        ORDER BY generated_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    let contracts = rows
        .into_iter()
        .map(DbContract::into_contract)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(contracts))
}

/// Store a contract generated by a client
pub async fn create_contract(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateContractRequest>,
) -> Result<(StatusCode, Json<GeneratedContract>), ApiError> {
    let (project_id, role, content) = match (req.project_id, req.role, req.content) {
        (Some(project_id), Some(role), Some(content))
            if !project_id.is_empty() && !content.is_empty() =>
        {
            (project_id, role, content)
        }
        _ => {
            return Err(ApiError::InvalidRequest(
                "Missing required fields".to_string(),
            ))
        }
    };

    let contract = GeneratedContract {
        id: Uuid::new_v4().to_string(),
        project_id,
        project_name: req.project_name.unwrap_or_default(),
        role: parse_role(&role)?,
        role_name: req.role_name.unwrap_or_default(),
        content,
        answers: req.answers,
        generated_at: Utc::now(),
    };
    insert_contract(&state, &contract).await?;

    tracing::info!("Stored contract: {}", contract.id);

    Ok((StatusCode::CREATED, Json(contract)))
}

/// Placeholders, articles and anchor choices of a template
pub async fn analyze_template(Json(req): Json<AnalyzeRequest>) -> Json<AnalyzeResponse> {
    let analysis = analyze(&req.template);
    let questions = analysis
        .placeholders
        .iter()
        .map(|name| (name.clone(), infer_question(name)))
        .collect();

    Json(AnalyzeResponse {
        analysis,
        questions,
    })
}

/// Validate a project body and bring both contracts in line with their templates
fn project_definition(req: ProjectRequest) -> Result<ProjectDefinition, ApiError> {
    let (name, contracts) = match (req.name, req.contracts) {
        (Some(name), Some(contracts)) if !name.trim().is_empty() => (name, contracts),
        _ => {
            return Err(ApiError::InvalidRequest(
                "Missing required fields: name, contracts".to_string(),
            ))
        }
    };

    let mut definition = ProjectDefinition {
        name,
        description: req.description.unwrap_or_default(),
        contracts,
    };

    for role in [Role::A, Role::B] {
        let config = definition.contracts.get_mut(role);
        let filled = fill_missing_questions(config);
        if !filled.is_empty() {
            tracing::debug!(role = %role, count = filled.len(), "Inferred missing questions");
        }
        for issue in validate_config(config) {
            tracing::warn!(role = %role, "{}", issue.message());
        }
    }

    Ok(definition)
}

fn serialize_contracts(project: &Project) -> Result<String, ApiError> {
    serde_json::to_string(&project.contracts)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid contracts: {}", e)))
}

async fn fetch_project(state: &AppState, id: &str) -> Result<Project, ApiError> {
    let row: Option<DbProject> = sqlx::query_as(
        r#"
        SELECT id, name, description, contracts_json, created_at
        FROM projects
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?;

    row.ok_or_else(|| ApiError::ProjectNotFound(id.to_string()))?
        .into_project()
}

async fn insert_contract(state: &AppState, contract: &GeneratedContract) -> Result<(), ApiError> {
    let answers_json = serde_json::to_string(&contract.answers)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid answers: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO generated_contracts
            (id, project_id, project_name, role, role_name, content, answers_json, generated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&contract.id)
    .bind(&contract.project_id)
    .bind(&contract.project_name)
    .bind(contract.role.as_str())
    .bind(&contract.role_name)
    .bind(&contract.content)
    .bind(&answers_json)
    .bind(contract.generated_at.to_rfc3339())
    .execute(&state.db)
    .await?;

    Ok(())
}

fn parse_role(value: &str) -> Result<Role, ApiError> {
    Role::parse(value)
        .ok_or_else(|| ApiError::InvalidRequest(format!("Invalid role: {} (expected A or B)", value)))
}
