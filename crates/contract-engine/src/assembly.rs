//! Clause insertion and article renumbering

use contract_types::Article;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// An active clause ready to be placed, with placeholders already substituted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveClause {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// Original article number to insert after (0 = document start)
    pub anchor: u32,
}

impl ActiveClause {
    pub fn new(id: u64, title: impl Into<String>, content: impl Into<String>, anchor: u32) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            anchor,
        }
    }

    fn to_article(&self) -> Article {
        Article::from_clause(0, self.title.clone(), self.content.clone())
    }
}

/// Result of merging clauses into the article sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    /// Final articles, numbered 1..=N without gaps
    pub articles: Vec<Article>,
    /// Active clauses whose anchor matched no article; not in `articles`
    pub unplaced: Vec<ActiveClause>,
}

/// Merge active clauses into the parsed articles and renumber from 1
///
/// Clauses anchored at 0 open the document. A clause anchored at N follows
/// every article the author numbered N; clauses sharing an anchor keep
/// their definition order. Clauses whose anchor matches no article are
/// left out and reported in [`Assembly::unplaced`].
pub fn assemble(articles: &[Article], clauses: &[ActiveClause]) -> Assembly {
    let (at_start, anchored): (Vec<&ActiveClause>, Vec<&ActiveClause>) =
        clauses.iter().partition(|c| c.anchor == 0);

    let body = articles.iter().fold(Vec::new(), |mut out: Vec<Article>, article| {
        out.push(article.clone());
        out.extend(
            anchored
                .iter()
                .filter(|c| c.anchor == article.number)
                .map(|c| c.to_article()),
        );
        out
    });

    let seen: HashSet<u32> = articles.iter().map(|a| a.number).collect();

    let unplaced: Vec<ActiveClause> = anchored
        .iter()
        .filter(|c| !seen.contains(&c.anchor))
        .map(|c| (*c).clone())
        .collect();

    for clause in &unplaced {
        warn!(
            clause_id = clause.id,
            anchor = clause.anchor,
            title = %clause.title,
            "Active clause anchored to a missing article, not inserted"
        );
    }

    let articles = at_start
        .iter()
        .map(|c| c.to_article())
        .chain(body)
        .enumerate()
        .map(|(index, article)| article.renumbered(index as u32 + 1))
        .collect();

    Assembly { articles, unplaced }
}

/// Final article sequence; see [`assemble`]
pub fn insert_and_renumber(articles: &[Article], clauses: &[ActiveClause]) -> Vec<Article> {
    assemble(articles, clauses).articles
}
