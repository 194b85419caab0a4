//! Keyword-based categorization for imported statement descriptions.
//!
//! Mirrors how a human would bucket a bank statement: an ordered table of
//! category rules, each with a list of keyword substrings. The first rule
//! with a case-insensitive match wins, and anything unmatched falls back to
//! `Outros`. The table is data, not code: a JSON file in the data directory
//! replaces the built-in default without touching this module.

use crate::model::Category;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An ordered keyword table mapping description substrings to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
}

/// One entry of the table: a category and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub(crate) category: Category,
    pub(crate) keywords: Vec<String>,
}

impl CategoryRules {
    /// Loads rules from `path`, or returns the built-in table when the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read category rules at {}", path.display()))?;
        let rules = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse category rules at {}", path.display()))?;
        Ok(rules)
    }

    /// Returns the category of the first rule with a keyword contained in
    /// `description`, or `Outros` when nothing matches. Table order is the
    /// priority order.
    pub fn classify(&self, description: &str) -> Category {
        let lowered = description.to_lowercase();
        for rule in &self.rules {
            if rule
                .keywords
                .iter()
                .any(|keyword| lowered.contains(&keyword.to_lowercase()))
            {
                return rule.category;
            }
        }
        Category::Other
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        let table: &[(Category, &[&str])] = &[
            (
                Category::Food,
                &[
                    "restaurant",
                    "food",
                    "bar",
                    "cafe",
                    "lanches",
                    "tortas",
                    "pizzaria",
                    "padaria",
                    "burguer",
                    "mcdonalds",
                ],
            ),
            (
                Category::Health,
                &["farmacia", "droga", "pacheco", "saude", "clinic"],
            ),
            (
                Category::Transport,
                &["uber", "99pop", "gasolina", "posto", "combustivel"],
            ),
            (
                Category::Leisure,
                &["netflix", "spotify", "cinema", "teatro", "viagem"],
            ),
            (
                Category::Education,
                &["curso", "escola", "faculdade", "canva"],
            ),
            (
                Category::Shopping,
                &["shopping", "loja", "mercado", "amazon", "magalu", "casas bahia"],
            ),
            (
                Category::Subscriptions,
                &["prime video", "disney", "globo play", "hbo", "quinto andar"],
            ),
            (
                Category::Housing,
                &[
                    "aluguel",
                    "condominio",
                    "energia",
                    "internet",
                    "claro",
                    "vivo",
                    "tim",
                    "oi",
                ],
            ),
        ];

        Self {
            rules: table
                .iter()
                .map(|(category, keywords)| CategoryRule {
                    category: *category,
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                })
                .collect(),
        }
    }
}
