//! Contract assembly engine
//!
//! Turns a contract template, its optional clauses and a set of answers into
//! the final contract text:
//! - Placeholder extraction and substitution (`{{name}}`)
//! - Default question inference and questionnaire ordering
//! - Article parsing ("Art. 1 - OGGETTO")
//! - Clause condition evaluation, insertion and renumbering
//! - Plain-text document layout
//!
//! Apart from the file loader, every operation is a pure function of its inputs.

pub mod analysis;
pub mod articles;
pub mod assembly;
pub mod conditions;
pub mod error;
pub mod format;
pub mod generate;
pub mod loader;
pub mod patterns;
pub mod placeholders;
pub mod questions;

pub use analysis::{analyze_template, validate_config, ConfigIssue, IssueSeverity, TemplateAnalysis};
pub use articles::{parse_article_header, parse_articles, ArticleHeader};
pub use assembly::{assemble, insert_and_renumber, ActiveClause, Assembly};
pub use conditions::evaluate_condition;
pub use error::EngineError;
pub use format::{format_document, today};
pub use generate::{generate_contract, GeneratedDocument};
pub use placeholders::{extract_placeholders, substitute_placeholders};
pub use questions::{
    fill_missing_questions, infer_question, questionnaire, unanswered_steps, QuestionnaireStep,
    StepTarget,
};

use contract_types::{AnswerSet, ContractConfig, Project, Role};

/// ContractEngine entry point
pub struct ContractEngine;

impl ContractEngine {
    pub fn new() -> Self {
        Self
    }

    /// Generate one party's contract of a project, dated today
    pub fn generate(&self, project: &Project, role: Role, answers: &AnswerSet) -> GeneratedDocument {
        self.generate_on(project, role, answers, &today())
    }

    pub fn generate_on(
        &self,
        project: &Project,
        role: Role,
        answers: &AnswerSet,
        date: &str,
    ) -> GeneratedDocument {
        generate_contract(&project.name, project.contracts.get(role), answers, date)
    }

    pub fn analyze(&self, template: &str) -> TemplateAnalysis {
        analyze_template(template)
    }

    pub fn validate(&self, config: &ContractConfig) -> Vec<ConfigIssue> {
        validate_config(config)
    }

    pub fn questionnaire(&self, config: &ContractConfig) -> Vec<QuestionnaireStep> {
        questionnaire(config)
    }
}

impl Default for ContractEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contract_types::{Clause, Contracts, Question};

    fn project() -> Project {
        let a = ContractConfig::new(
            "Fornitore",
            "Art. 1 - OGGETTO\nFornitura a {{cliente}}.\nArt. 2 - PREZZO\nIl prezzo è {{prezzo}}.",
        )
        .with_clause(
            Clause::new(11, "RISERVATEZZA", "Le parti mantengono il riserbo.", 0)
                .with_question(Question::yes_no("Serve riservatezza?")),
        );
        let b = ContractConfig::new("Cliente", "Art. 1 - ACCETTAZIONE\n{{cliente}} accetta.");

        Project {
            id: "p1".to_string(),
            name: "Fornitura servizi".to_string(),
            description: String::new(),
            contracts: Contracts { a, b },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_engine_generates_each_role() {
        let engine = ContractEngine::new();
        let answers = AnswerSet::new()
            .with("cliente", "Rossi S.r.l.")
            .with("prezzo", "500")
            .with_clause(11, "Sì");

        let a = engine.generate_on(&project(), Role::A, &answers, "2/3/2026");
        assert_eq!(a.articles.len(), 3);
        assert_eq!(a.articles[0].title, "RISERVATEZZA");
        assert!(a.content.contains("Art. 3 - PREZZO"));
        assert!(a.content.contains("FORNITURA SERVIZI"));

        let b = engine.generate_on(&project(), Role::B, &answers, "2/3/2026");
        assert_eq!(b.articles.len(), 1);
        assert!(b.content.contains("Rossi S.r.l. accetta."));
    }

    #[test]
    fn test_engine_generate_uses_today() {
        let engine = ContractEngine::default();
        let doc = engine.generate(&project(), Role::B, &AnswerSet::new());
        assert!(doc.content.contains(&format!("Data: {}", today())));
    }

    #[test]
    fn test_engine_reports_on_configuration() {
        let engine = ContractEngine::new();
        let project = project();
        let config = project.contracts.get(Role::A);

        assert_eq!(engine.analyze(&config.template).placeholders, vec!["cliente", "prezzo"]);
        assert_eq!(engine.questionnaire(config).len(), 3);
        assert!(engine
            .validate(config)
            .iter()
            .any(|issue| matches!(issue, ConfigIssue::MissingQuestion { .. })));
    }
}
