//! Clause condition evaluation

use crate::patterns::NUMERIC_PREFIX_PATTERN;
use contract_types::{Condition, Operator};

/// Decide whether a clause is active for the given answer
///
/// A missing answer, an unknown operator or a non-numeric operand of an
/// ordering comparison all evaluate to `false`.
pub fn evaluate_condition(condition: &Condition, answer: Option<&str>) -> bool {
    let Some(answer) = answer else {
        return false;
    };
    let value = condition.value.as_str();

    match &condition.operator {
        Operator::Equals => answer == value,
        Operator::NotEquals => answer != value,
        Operator::Greater => compare_numbers(answer, value, |a, b| a > b),
        Operator::Less => compare_numbers(answer, value, |a, b| a < b),
        Operator::GreaterOrEqual => compare_numbers(answer, value, |a, b| a >= b),
        Operator::LessOrEqual => compare_numbers(answer, value, |a, b| a <= b),
        Operator::Contains => answer.to_lowercase().contains(&value.to_lowercase()),
        Operator::Unknown(_) => false,
    }
}

fn compare_numbers(answer: &str, value: &str, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (parse_lenient_float(answer), parse_lenient_float(value)) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

/// Parse the leading number of a string, ignoring whatever follows it
///
/// `" 12.5 mesi"` is 12.5, `"abc"` is `None`. `"Infinity"` is accepted.
pub fn parse_lenient_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let prefix = NUMERIC_PREFIX_PATTERN.find(trimmed)?.as_str();
    prefix.parse::<f64>().ok().filter(|n| !n.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(op: &str, value: &str) -> Condition {
        Condition::new(Operator::parse(op), value)
    }

    #[test]
    fn test_equals_and_not_equals() {
        assert!(evaluate_condition(&cond("=", "Sì"), Some("Sì")));
        assert!(!evaluate_condition(&cond("=", "Sì"), Some("No")));
        assert!(!evaluate_condition(&cond("=", "Sì"), Some("sì")));
        assert!(evaluate_condition(&cond("!=", "Sì"), Some("No")));
        assert!(!evaluate_condition(&cond("!=", "Sì"), Some("Sì")));
    }

    #[test]
    fn test_absent_answer_is_never_satisfied() {
        for op in ["=", "!=", ">", "<", ">=", "<=", "contains"] {
            assert!(!evaluate_condition(&cond(op, ""), None), "operator {}", op);
        }
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        assert!(evaluate_condition(
            &cond("contains", "via roma"),
            Some("Milano, Via Roma 5")
        ));
        assert!(!evaluate_condition(
            &cond("contains", "via verdi"),
            Some("Milano, Via Roma 5")
        ));
        assert!(evaluate_condition(&cond("contains", ""), Some("qualsiasi")));
    }

    #[test]
    fn test_numeric_comparisons() {
        assert!(evaluate_condition(&cond(">", "5"), Some("10")));
        assert!(!evaluate_condition(&cond(">", "5"), Some("5")));
        assert!(evaluate_condition(&cond(">=", "5"), Some("5")));
        assert!(evaluate_condition(&cond("<", "5"), Some("4.99")));
        assert!(evaluate_condition(&cond("<=", "5"), Some("5.0")));
        assert!(!evaluate_condition(&cond("<=", "5"), Some("6")));
    }

    #[test]
    fn test_non_numeric_operand_fails_closed() {
        assert!(!evaluate_condition(&cond(">", "5"), Some("abc")));
        assert!(!evaluate_condition(&cond("<", "abc"), Some("5")));
        assert!(!evaluate_condition(&cond(">=", "5"), Some("")));
    }

    #[test]
    fn test_unknown_operator_fails_closed() {
        assert!(!evaluate_condition(&cond("~", "Sì"), Some("Sì")));
    }

    #[test]
    fn test_lenient_float() {
        assert_eq!(parse_lenient_float("12"), Some(12.0));
        assert_eq!(parse_lenient_float("  12.5 mesi"), Some(12.5));
        assert_eq!(parse_lenient_float("-3e2"), Some(-300.0));
        assert_eq!(parse_lenient_float(".5"), Some(0.5));
        assert_eq!(parse_lenient_float("1e"), Some(1.0));
        assert_eq!(parse_lenient_float("1.000,50"), Some(1.0));
        assert_eq!(parse_lenient_float("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_lenient_float("abc"), None);
        assert_eq!(parse_lenient_float(""), None);
        assert_eq!(parse_lenient_float("-"), None);
    }
}
