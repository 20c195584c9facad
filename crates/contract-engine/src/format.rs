//! Plain-text contract layout

use chrono::Local;
use contract_types::Article;

/// Character of the horizontal rules
pub const RULE_CHAR: char = '━';

/// Width of the horizontal rules, in characters
pub const RULE_WIDTH: usize = 60;

/// Indentation of the document title
pub const TITLE_INDENT: usize = 20;

const CLOSING_FORMULA: &str = "Letto, confermato e sottoscritto";
const SIGNATURE_LINES: &str = "_____________________    _____________________";
const SIGNATURE_LABELS: &str = "    PARTE A                   PARTE B";

/// Today's date in the document locale (it-IT, `d/m/yyyy`)
pub fn today() -> String {
    Local::now().format("%-d/%-m/%Y").to_string()
}

/// Render the final contract text
///
/// Layout: rule, indented upper-case title, rule, blank line, then each
/// article as `Art. <n> - <TITLE>` followed by its body, and finally the
/// closing rule, the date and the signature block for both parties.
pub fn format_document(title: &str, articles: &[Article], date: &str) -> String {
    let rule = RULE_CHAR.to_string().repeat(RULE_WIDTH);
    let mut output = String::new();

    output.push_str(&rule);
    output.push('\n');
    output.push_str(&" ".repeat(TITLE_INDENT));
    output.push_str(&title.to_uppercase());
    output.push('\n');
    output.push_str(&rule);
    output.push_str("\n\n");

    for article in articles {
        output.push_str(&format!(
            "Art. {} - {}\n\n",
            article.number,
            article.title.to_uppercase()
        ));
        output.push_str(&article.content);
        output.push_str("\n\n");
    }

    output.push_str(&rule);
    output.push('\n');
    output.push_str(CLOSING_FORMULA);
    output.push('\n');
    output.push_str(&format!("Data: {}\n\n", date));
    output.push_str(SIGNATURE_LINES);
    output.push('\n');
    output.push_str(SIGNATURE_LABELS);
    output.push('\n');

    output
}
