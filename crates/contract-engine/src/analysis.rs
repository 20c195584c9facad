//! Template analysis and contract configuration checks
//!
//! Everything here is advisory: issues are reported, generation still runs.

use crate::articles::parse_articles;
use crate::patterns::ARTICLE_REFERENCE_PATTERN;
use crate::placeholders::extract_placeholders;
use contract_types::ContractConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Article number and title as found in a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub number: u32,
    pub title: String,
}

/// What a template contains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateAnalysis {
    pub placeholders: Vec<String>,
    pub articles: Vec<ArticleSummary>,
    /// Positive article numbers referenced anywhere, sorted, usable as clause anchors
    pub anchor_choices: Vec<u32>,
}

impl TemplateAnalysis {
    pub fn has_articles(&self) -> bool {
        !self.articles.is_empty()
    }
}

pub fn analyze_template(template: &str) -> TemplateAnalysis {
    let articles = parse_articles(template)
        .into_iter()
        .map(|a| ArticleSummary {
            number: a.number,
            title: a.title,
        })
        .collect();

    TemplateAnalysis {
        placeholders: extract_placeholders(template),
        articles,
        anchor_choices: anchor_choices(template),
    }
}

/// Distinct positive numbers of every article reference, ascending
pub fn anchor_choices(template: &str) -> Vec<u32> {
    ARTICLE_REFERENCE_PATTERN
        .captures_iter(template)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .filter(|n| *n > 0)
        .collect::<BTreeSet<u32>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Problem found in a contract configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigIssue {
    /// The template has no recognisable article header
    NoArticles,
    /// A placeholder has no configured question
    MissingQuestion { placeholder: String },
    /// A select or choice question offers nothing to pick
    MissingOptions { key: String },
    UntitledClause { clause_id: u64 },
    /// The clause question has no prompt, so it is never asked and never active
    ClauseNeverAsked { clause_id: u64 },
    UnknownOperator { clause_id: u64, operator: String },
    /// The anchor matches no article; the clause would be left out
    AnchorNotFound { clause_id: u64, anchor: u32 },
}

impl ConfigIssue {
    pub fn severity(&self) -> IssueSeverity {
        match self {
            ConfigIssue::MissingOptions { .. } | ConfigIssue::UnknownOperator { .. } => {
                IssueSeverity::Error
            }
            ConfigIssue::NoArticles
            | ConfigIssue::MissingQuestion { .. }
            | ConfigIssue::UntitledClause { .. }
            | ConfigIssue::ClauseNeverAsked { .. }
            | ConfigIssue::AnchorNotFound { .. } => IssueSeverity::Warning,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ConfigIssue::NoArticles => "No articles found in the template".to_string(),
            ConfigIssue::MissingQuestion { placeholder } => {
                format!("Placeholder '{}' has no question", placeholder)
            }
            ConfigIssue::MissingOptions { key } => {
                format!("Question '{}' needs at least one option", key)
            }
            ConfigIssue::UntitledClause { clause_id } => {
                format!("Clause {} has no title", clause_id)
            }
            ConfigIssue::ClauseNeverAsked { clause_id } => {
                format!("Clause {} has no question text and can never be activated", clause_id)
            }
            ConfigIssue::UnknownOperator {
                clause_id,
                operator,
            } => format!("Clause {} uses unknown operator '{}'", clause_id, operator),
            ConfigIssue::AnchorNotFound { clause_id, anchor } => format!(
                "Clause {} is anchored after article {}, which does not exist",
                clause_id, anchor
            ),
        }
    }
}

/// Check a contract configuration for problems an editor should fix
pub fn validate_config(config: &ContractConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let articles = parse_articles(&config.template);
    let article_numbers: BTreeSet<u32> = articles.iter().map(|a| a.number).collect();

    if articles.is_empty() {
        issues.push(ConfigIssue::NoArticles);
    }

    for name in extract_placeholders(&config.template) {
        match config.questions.get(&name) {
            None => issues.push(ConfigIssue::MissingQuestion { placeholder: name }),
            Some(q) if q.kind.has_options() && q.kind.options().is_empty() => {
                issues.push(ConfigIssue::MissingOptions { key: name })
            }
            Some(_) => {}
        }
    }

    for clause in &config.clauses {
        if clause.title.trim().is_empty() {
            issues.push(ConfigIssue::UntitledClause {
                clause_id: clause.id,
            });
        }
        if clause.question.prompt.trim().is_empty() {
            issues.push(ConfigIssue::ClauseNeverAsked {
                clause_id: clause.id,
            });
        } else if clause.question.kind.has_options() && clause.question.kind.options().is_empty()
        {
            issues.push(ConfigIssue::MissingOptions {
                key: clause.answer_key(),
            });
        }
        if !clause.condition.operator.is_known() {
            issues.push(ConfigIssue::UnknownOperator {
                clause_id: clause.id,
                operator: clause.condition.operator.to_string(),
            });
        }
        if clause.anchor > 0 && !article_numbers.contains(&clause.anchor) {
            issues.push(ConfigIssue::AnchorNotFound {
                clause_id: clause.id,
                anchor: clause.anchor,
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_types::{Clause, Condition, Operator, Question, QuestionKind};
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = "CONTRATTO\nArt. 1 - OGGETTO\nFornitura per {{nome_cliente}}.\n\
                            Art. 3 - PREZZO\nIl prezzo è {{prezzo}}, vedi art. 1 e Articolo 7.";

    #[test]
    fn test_analyze_template() {
        let analysis = analyze_template(TEMPLATE);

        assert_eq!(analysis.placeholders, vec!["nome_cliente", "prezzo"]);
        assert_eq!(
            analysis.articles,
            vec![
                ArticleSummary {
                    number: 1,
                    title: "OGGETTO".to_string()
                },
                ArticleSummary {
                    number: 3,
                    title: "PREZZO".to_string()
                },
            ]
        );
        assert_eq!(analysis.anchor_choices, vec![1, 3, 7]);
        assert!(analysis.has_articles());
    }

    #[test]
    fn test_analyze_empty_template() {
        let analysis = analyze_template("");
        assert!(!analysis.has_articles());
        assert!(analysis.placeholders.is_empty());
        assert!(analysis.anchor_choices.is_empty());
    }

    #[test]
    fn test_anchor_choices_skip_zero() {
        assert_eq!(anchor_choices("Art. 0 - X\nART 2\nart.2"), vec![2]);
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut config = ContractConfig::new("A", TEMPLATE)
            .with_clause(Clause::new(1, "", "x", 0).with_question(Question::yes_no("")))
            .with_clause(
                Clause::new(2, "Fantasma", "y", 9)
                    .with_question(Question::new("Quale?", QuestionKind::Select { options: vec![] }))
                    .with_condition(Condition::new(Operator::parse("between"), "1")),
            );
        config.questions.insert(
            "prezzo".to_string(),
            Question::new("Quanto?", QuestionKind::Number),
        );

        let issues = validate_config(&config);

        assert_eq!(
            issues,
            vec![
                ConfigIssue::MissingQuestion {
                    placeholder: "nome_cliente".to_string()
                },
                ConfigIssue::UntitledClause { clause_id: 1 },
                ConfigIssue::ClauseNeverAsked { clause_id: 1 },
                ConfigIssue::MissingOptions {
                    key: "clause_2".to_string()
                },
                ConfigIssue::UnknownOperator {
                    clause_id: 2,
                    operator: "between".to_string()
                },
                ConfigIssue::AnchorNotFound {
                    clause_id: 2,
                    anchor: 9
                },
            ]
        );
        assert_eq!(issues[3].severity(), IssueSeverity::Error);
        assert_eq!(issues[5].severity(), IssueSeverity::Warning);
    }

    #[test]
    fn test_validate_empty_template() {
        let issues = validate_config(&ContractConfig::default());
        assert_eq!(issues, vec![ConfigIssue::NoArticles]);
        assert_eq!(issues[0].message(), "No articles found in the template");
    }
}
