//! End-to-end contract generation for one configuration and answer set

use crate::articles::parse_articles;
use crate::assembly::{assemble, ActiveClause};
use crate::conditions::evaluate_condition;
use crate::format::format_document;
use crate::placeholders::{substitute_placeholders, unresolved_placeholders};
use contract_types::{AnswerSet, Article, ContractConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Output of a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    /// Final contract text
    pub content: String,
    /// Articles as numbered in `content`
    pub articles: Vec<Article>,
    /// Ids of the clauses whose condition held
    pub active_clauses: Vec<u64>,
    /// Ids of active clauses left out because their anchor matched no article
    pub unplaced_clauses: Vec<u64>,
    /// Placeholder names left unsubstituted in article titles or bodies
    pub unresolved_placeholders: Vec<String>,
}

/// Clauses whose condition holds, with placeholders substituted
pub fn active_clauses(config: &ContractConfig, answers: &AnswerSet) -> Vec<ActiveClause> {
    config
        .clauses
        .iter()
        .filter(|clause| evaluate_condition(&clause.condition, answers.clause(clause.id)))
        .map(|clause| ActiveClause {
            id: clause.id,
            title: substitute_placeholders(&clause.title, answers),
            content: substitute_placeholders(&clause.content, answers),
            anchor: clause.anchor,
        })
        .collect()
}

/// Substitute, parse, select clauses, renumber and lay out the contract
pub fn generate_contract(
    title: &str,
    config: &ContractConfig,
    answers: &AnswerSet,
    date: &str,
) -> GeneratedDocument {
    let text = substitute_placeholders(&config.template, answers);
    let articles = parse_articles(&text);
    let clauses = active_clauses(config, answers);
    let assembly = assemble(&articles, &clauses);
    let content = format_document(title, &assembly.articles, date);
    let body: String = assembly
        .articles
        .iter()
        .map(|a| format!("{}\n{}\n", a.title, a.content))
        .collect();
    let unresolved = unresolved_placeholders(&body);

    info!(
        contract = %config.name,
        articles = assembly.articles.len(),
        active_clauses = clauses.len(),
        unplaced_clauses = assembly.unplaced.len(),
        unresolved_placeholders = unresolved.len(),
        "Generated contract"
    );

    GeneratedDocument {
        content,
        articles: assembly.articles,
        active_clauses: clauses.iter().map(|c| c.id).collect(),
        unplaced_clauses: assembly.unplaced.iter().map(|c| c.id).collect(),
        unresolved_placeholders: unresolved,
    }
}
