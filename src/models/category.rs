//! Expense categories
//!
//! Categories form a closed, ordered set of canonical names. The set is a
//! value handed to whoever validates expenses, so a configuration file (or a
//! test) can supply a different one.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The canonical categories used when nothing else is configured
pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "Food & Dining",
    "Transportation",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Shopping",
    "Education",
    "Travel",
    "Other",
];

/// An ordered set of canonical category names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    /// Create a category set from canonical names
    ///
    /// Blank names are dropped, as are later names that only differ in case
    /// from an earlier one.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if name.is_empty() {
                continue;
            }
            if unique.iter().any(|n| n.to_lowercase() == name.to_lowercase()) {
                continue;
            }
            unique.push(name);
        }
        Self { names: unique }
    }

    /// Canonical names in their configured order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Exact (canonical-cased) membership check
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Resolve user input to its canonical name
    ///
    /// Input is trimmed and matched case-insensitively.
    pub fn resolve(&self, input: &str) -> Result<&str, ValidationError> {
        let wanted = input.trim().to_lowercase();
        if wanted.is_empty() {
            return Err(ValidationError::InvalidCategory(input.to_string()));
        }

        self.names
            .iter()
            .find(|n| n.to_lowercase() == wanted)
            .map(String::as_str)
            .ok_or_else(|| ValidationError::InvalidCategory(input.to_string()))
    }

    /// Comma-separated list for prompts and error hints
    pub fn describe(&self) -> String {
        self.names.join(", ")
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES)
    }
}
