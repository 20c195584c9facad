//! Default questions for placeholders and the questionnaire order

use crate::patterns::{
    matches_any, ADDRESS_KEYWORDS, DATE_KEYWORDS, DESCRIPTION_KEYWORDS, EMAIL_KEYWORDS,
    FISCAL_CODE_KEYWORDS, MONETARY_KEYWORDS, NAME_KEYWORDS, PHONE_KEYWORDS, QUANTITY_KEYWORDS,
    VAT_KEYWORDS,
};
use crate::placeholders::extract_placeholders;
use contract_types::{AnswerSet, ContractConfig, Question, QuestionKind};
use serde::{Deserialize, Serialize};

/// How the prompt of an inferred question is worded
#[derive(Debug, Clone, Copy)]
enum Prompt {
    /// "Qual è <name>?"
    Ask,
    /// "Inserisci <name>"
    Enter,
    Fixed(&'static str),
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Text,
    Email,
    Number,
    Date,
    Multiline,
}

/// Keyword groups in match order; the first hit decides prompt and kind
const RULES: &[(&[&str], Prompt, Kind)] = &[
    (NAME_KEYWORDS, Prompt::Ask, Kind::Text),
    (DATE_KEYWORDS, Prompt::Enter, Kind::Date),
    (MONETARY_KEYWORDS, Prompt::Ask, Kind::Number),
    (QUANTITY_KEYWORDS, Prompt::Enter, Kind::Number),
    (ADDRESS_KEYWORDS, Prompt::Ask, Kind::Text),
    (EMAIL_KEYWORDS, Prompt::Enter, Kind::Email),
    (PHONE_KEYWORDS, Prompt::Enter, Kind::Text),
    (VAT_KEYWORDS, Prompt::Fixed("Qual è la partita IVA?"), Kind::Text),
    (FISCAL_CODE_KEYWORDS, Prompt::Fixed("Qual è il codice fiscale?"), Kind::Text),
    (DESCRIPTION_KEYWORDS, Prompt::Enter, Kind::Multiline),
];

/// "data_inizio" -> "data inizio"
pub fn normalize_name(name: &str) -> String {
    name.replace('_', " ").to_lowercase()
}

/// Default question for a placeholder that has none configured
pub fn infer_question(name: &str) -> Question {
    let normalized = normalize_name(name);

    let (prompt, kind) = RULES
        .iter()
        .find(|(keywords, _, _)| matches_any(&normalized, keywords))
        .map(|(_, prompt, kind)| (*prompt, *kind))
        .unwrap_or((Prompt::Enter, Kind::Text));

    let prompt = match prompt {
        Prompt::Ask => format!("Qual è {}?", normalized),
        Prompt::Enter => format!("Inserisci {}", normalized),
        Prompt::Fixed(text) => text.to_string(),
    };

    let kind = match kind {
        Kind::Text => QuestionKind::Text,
        Kind::Email => QuestionKind::Email,
        Kind::Number => QuestionKind::Number,
        Kind::Date => QuestionKind::Date,
        Kind::Multiline => QuestionKind::Multiline,
    };

    Question::new(prompt, kind)
}

/// Refresh the placeholder list from the template and add an inferred
/// question for every placeholder without one
///
/// Existing questions are never modified. Returns the names that received
/// a new question.
pub fn fill_missing_questions(config: &mut ContractConfig) -> Vec<String> {
    config.placeholders = extract_placeholders(&config.template);

    let mut filled = Vec::new();
    for name in &config.placeholders {
        if !config.questions.contains_key(name) {
            config.questions.insert(name.clone(), infer_question(name));
            filled.push(name.clone());
        }
    }
    filled
}

/// What a questionnaire step fills in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepTarget {
    Placeholder { name: String },
    Clause { id: u64 },
}

/// One question of the end-user questionnaire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireStep {
    /// Key the answer is stored under
    pub key: String,
    pub target: StepTarget,
    pub question: Question,
}

/// Questions in the order the user answers them
///
/// Template placeholders come first, then every clause with a non-blank
/// activation prompt. A placeholder without a configured question gets an
/// inferred one.
pub fn questionnaire(config: &ContractConfig) -> Vec<QuestionnaireStep> {
    let placeholders = if config.placeholders.is_empty() {
        extract_placeholders(&config.template)
    } else {
        config.placeholders.clone()
    };

    let placeholder_steps = placeholders.into_iter().map(|name| QuestionnaireStep {
        key: name.clone(),
        question: config
            .questions
            .get(&name)
            .cloned()
            .unwrap_or_else(|| infer_question(&name)),
        target: StepTarget::Placeholder { name },
    });

    let clause_steps = config
        .clauses
        .iter()
        .filter(|clause| !clause.question.prompt.trim().is_empty())
        .map(|clause| QuestionnaireStep {
            key: clause.answer_key(),
            target: StepTarget::Clause { id: clause.id },
            question: clause.question.clone(),
        });

    placeholder_steps.chain(clause_steps).collect()
}

/// Steps whose answer is missing or empty
pub fn unanswered_steps(config: &ContractConfig, answers: &AnswerSet) -> Vec<QuestionnaireStep> {
    questionnaire(config)
        .into_iter()
        .filter(|step| answers.get(&step.key).map_or(true, str::is_empty))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_types::Clause;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_infer_name() {
        let q = infer_question("nome_cliente");
        assert_eq!(q.prompt, "Qual è nome cliente?");
        assert_eq!(q.kind, QuestionKind::Text);
        assert!(q.required);
    }

    #[test]
    fn test_infer_date() {
        let q = infer_question("Data_Inizio");
        assert_eq!(q.prompt, "Inserisci data inizio");
        assert_eq!(q.kind, QuestionKind::Date);
    }

    #[test]
    fn test_date_wins_over_quantity() {
        let q = infer_question("numero_data");
        assert_eq!(q.kind, QuestionKind::Date);
    }

    #[test]
    fn test_infer_money_and_quantity() {
        assert_eq!(infer_question("prezzo").prompt, "Qual è prezzo?");
        assert_eq!(infer_question("prezzo").kind, QuestionKind::Number);
        assert_eq!(infer_question("quantità_pezzi").prompt, "Inserisci quantità pezzi");
        assert_eq!(infer_question("quantità_pezzi").kind, QuestionKind::Number);
    }

    #[test]
    fn test_infer_contact_fields() {
        assert_eq!(infer_question("indirizzo_sede").prompt, "Qual è indirizzo sede?");
        assert_eq!(infer_question("email_referente").kind, QuestionKind::Email);
        assert_eq!(infer_question("telefono").prompt, "Inserisci telefono");
    }

    #[test]
    fn test_first_group_decides_kind_too() {
        let q = infer_question("indirizzo_email");
        assert_eq!(q.prompt, "Qual è indirizzo email?");
        assert_eq!(q.kind, QuestionKind::Text);
    }

    #[test]
    fn test_infer_tax_ids() {
        assert_eq!(infer_question("partita_iva").prompt, "Qual è la partita IVA?");
        assert_eq!(infer_question("codice_fiscale").prompt, "Qual è il codice fiscale?");
        assert_eq!(infer_question("cf").kind, QuestionKind::Text);
    }

    #[test]
    fn test_infer_description_is_multiline() {
        assert_eq!(infer_question("note_aggiuntive").kind, QuestionKind::Multiline);
    }

    #[test]
    fn test_infer_fallback() {
        let q = infer_question("luogo_consegna");
        assert_eq!(q.prompt, "Inserisci luogo consegna");
        assert_eq!(q.kind, QuestionKind::Text);
    }

    #[test]
    fn test_fill_missing_keeps_existing_questions() {
        let mut config = ContractConfig::new("A", "{{prezzo}} {{nome}} {{prezzo}}");
        config.questions.insert(
            "prezzo".to_string(),
            Question::new("Quanto costa?", QuestionKind::Text).optional(),
        );

        let filled = fill_missing_questions(&mut config);

        assert_eq!(filled, vec!["nome"]);
        assert_eq!(config.placeholders, vec!["prezzo", "nome"]);
        assert_eq!(config.questions["prezzo"].prompt, "Quanto costa?");
        assert!(!config.questions["prezzo"].required);
        assert_eq!(config.questions["nome"].prompt, "Qual è nome?");
    }

    #[test]
    fn test_questionnaire_order() {
        let mut config = ContractConfig::new("A", "{{b}} {{a}}")
            .with_clause(Clause::new(5, "Nascosta", "x", 0).with_question(Question::yes_no("")))
            .with_clause(
                Clause::new(9, "Garanzia", "y", 1).with_question(Question::yes_no("Garanzia?")),
            );
        fill_missing_questions(&mut config);

        let keys: Vec<String> = questionnaire(&config).into_iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["b", "a", "clause_9"]);
    }

    #[test]
    fn test_unanswered_steps() {
        let config = ContractConfig::new("A", "{{a}} {{b}}").with_clause(
            Clause::new(1, "G", "g", 0).with_question(Question::yes_no("Vuoi G?")),
        );
        let answers = AnswerSet::new().with("a", "1").with("b", "");

        let missing: Vec<String> = unanswered_steps(&config, &answers)
            .into_iter()
            .map(|s| s.key)
            .collect();
        assert_eq!(missing, vec!["b", "clause_1"]);
    }
}
