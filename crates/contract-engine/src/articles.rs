//! Article parser
//!
//! Splits contract text into numbered articles. Recognised headers:
//! - "Art. 1 - OGGETTO"
//! - "ART. 2 - Prezzo"
//! - "Articolo 3 - DURATA"
//!
//! Every line after a header, up to the next header, belongs to that
//! article. Blank lines are dropped and text before the first header is
//! discarded.

use crate::patterns::ARTICLE_HEADER_PATTERN;
use contract_types::Article;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number and title read from a header line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleHeader {
    pub number: u32,
    pub title: String,
}

/// Recognise an article header anywhere in the line
///
/// Returns `None` for ordinary body lines and for headers whose number does
/// not fit in a `u32`. The title may be empty ("Art. 4 - ").
pub fn parse_article_header(line: &str) -> Option<ArticleHeader> {
    let caps = ARTICLE_HEADER_PATTERN.captures(line)?;

    let number = match caps[1].parse::<u32>() {
        Ok(n) => n,
        Err(e) => {
            debug!(line = %line, error = %e, "Article number out of range, treating as body");
            return None;
        }
    };

    Some(ArticleHeader {
        number,
        title: caps[2].trim().to_string(),
    })
}

/// Parse articles in source order, keeping the numbers the author wrote
pub fn parse_articles(text: &str) -> Vec<Article> {
    let mut articles = Vec::new();
    let mut current: Option<(ArticleHeader, usize, Vec<&str>)> = None;

    for (index, line) in text.split('\n').enumerate() {
        if let Some(header) = parse_article_header(line) {
            if let Some(open) = current.take() {
                articles.push(close_article(open));
            }
            current = Some((header, index, Vec::new()));
        } else if let Some((_, _, ref mut body)) = current {
            if !line.trim().is_empty() {
                body.push(line);
            }
        }
    }

    if let Some(open) = current {
        articles.push(close_article(open));
    }

    if articles.is_empty() {
        debug!("No articles found in text");
    } else {
        debug!(count = articles.len(), "Parsed articles");
    }

    articles
}

fn close_article((header, line, body): (ArticleHeader, usize, Vec<&str>)) -> Article {
    Article::from_template(header.number, header.title, body.join("\n").trim(), line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_types::ArticleOrigin;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_predicate() {
        assert_eq!(
            parse_article_header("Art. 12 - Foro competente"),
            Some(ArticleHeader {
                number: 12,
                title: "Foro competente".to_string()
            })
        );
        assert_eq!(
            parse_article_header("ARTICOLO 3 -   DURATA  ").map(|h| h.title),
            Some("DURATA".to_string())
        );
        assert_eq!(parse_article_header("Il prezzo è 1000."), None);
        assert_eq!(parse_article_header("Art. X - Titolo"), None);
    }

    #[test]
    fn test_header_with_empty_title() {
        let header = parse_article_header("Art. 4 - ").unwrap();
        assert_eq!(header.number, 4);
        assert_eq!(header.title, "");
    }

    #[test]
    fn test_header_number_overflow_is_body() {
        assert_eq!(parse_article_header("Art. 99999999999 - TROPPO"), None);
    }

    #[test]
    fn test_parse_basic_articles() {
        let text = "Art. 1 - OGGETTO\nIl presente contratto..\nArt. 2 - PREZZO\nIl prezzo è 1000.";
        let articles = parse_articles(text);

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].number, 1);
        assert_eq!(articles[0].title, "OGGETTO");
        assert_eq!(articles[0].content, "Il presente contratto..");
        assert_eq!(articles[0].origin, ArticleOrigin::Template { line: 0 });
        assert_eq!(articles[1].title, "PREZZO");
        assert_eq!(articles[1].content, "Il prezzo è 1000.");
        assert_eq!(articles[1].origin, ArticleOrigin::Template { line: 2 });
    }

    #[test]
    fn test_preamble_is_discarded() {
        let text = "CONTRATTO DI FORNITURA\nTra le parti\n\nArt. 1 - OGGETTO\nFornitura di beni.";
        let articles = parse_articles(text);

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].content, "Fornitura di beni.");
    }

    #[test]
    fn test_blank_lines_inside_body_are_dropped() {
        let text = "Art. 1 - OGGETTO\n\nPrima riga\n   \nSeconda riga\n\n";
        let articles = parse_articles(text);

        assert_eq!(articles[0].content, "Prima riga\nSeconda riga");
    }

    #[test]
    fn test_author_numbers_are_kept() {
        let text = "Art. 5 - A\nx\nArt. 2 - B\ny\nArt. 5 - C\nz";
        let numbers: Vec<u32> = parse_articles(text).iter().map(|a| a.number).collect();
        assert_eq!(numbers, vec![5, 2, 5]);
    }

    #[test]
    fn test_no_headers_yields_empty() {
        assert!(parse_articles("Solo testo libero\nsenza articoli").is_empty());
        assert!(parse_articles("").is_empty());
    }

    #[test]
    fn test_header_without_body() {
        let articles = parse_articles("Art. 1 - VUOTO\nArt. 2 - PIENO\ntesto");
        assert_eq!(articles[0].content, "");
        assert_eq!(articles[1].content, "testo");
    }

    #[test]
    fn test_windows_line_endings() {
        let articles = parse_articles("Art. 1 - OGGETTO\r\nCorpo\r\n");
        assert_eq!(articles[0].title, "OGGETTO");
        assert_eq!(articles[0].content, "Corpo");
    }
}
