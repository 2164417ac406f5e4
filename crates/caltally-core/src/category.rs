//! Keyword-based classification of event titles into categories.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A user-defined label and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Category {
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered list of categories. Earlier entries win ties.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryConfig {
    categories: Vec<Category>,
    /// Lowercased effective keywords (configured keywords plus the name), per category.
    needles: Vec<Vec<String>>,
}

impl CategoryConfig {
    /// Validate and index a list of categories.
    ///
    /// # Errors
    ///
    /// Rejects empty names, empty keywords, and names repeated
    /// case-insensitively.
    pub fn new(categories: Vec<Category>) -> Result<Self, ValidationError> {
        let mut needles: Vec<Vec<String>> = Vec::with_capacity(categories.len());
        for (i, category) in categories.iter().enumerate() {
            let name = category.name.trim();
            if name.is_empty() {
                return Err(ValidationError::EmptyCategoryField {
                    category: category.name.clone(),
                    what: "name",
                });
            }
            if categories[..i]
                .iter()
                .any(|c| c.name.trim().eq_ignore_ascii_case(name))
            {
                return Err(ValidationError::DuplicateCategory(category.name.clone()));
            }
            if category.keywords.iter().any(|k| k.is_empty()) {
                return Err(ValidationError::EmptyCategoryField {
                    category: category.name.clone(),
                    what: "keyword",
                });
            }
            needles.push(
                category
                    .keywords
                    .iter()
                    .map(String::as_str)
                    .chain(std::iter::once(category.name.as_str()))
                    .map(str::to_lowercase)
                    .collect(),
            );
        }
        Ok(Self {
            categories,
            needles,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in priority order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Outcome of classifying one title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    Category(&'a str),
    Uncategorized,
}

impl<'a> Classification<'a> {
    pub fn category(self) -> Option<&'a str> {
        match self {
            Classification::Category(name) => Some(name),
            Classification::Uncategorized => None,
        }
    }
}

/// First category, in configured order, with a keyword contained in `title`.
///
/// Matching is a case-insensitive substring test; the category name is
/// itself a keyword.
pub fn classify<'a>(title: &str, config: &'a CategoryConfig) -> Classification<'a> {
    let title = title.to_lowercase();
    config
        .categories
        .iter()
        .zip(&config.needles)
        .find(|(_, needles)| needles.iter().any(|n| title.contains(n.as_str())))
        .map_or(Classification::Uncategorized, |(category, _)| {
            Classification::Category(category.name.as_str())
        })
}
