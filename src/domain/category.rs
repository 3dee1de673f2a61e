//! The closed set of transaction categories and their display table.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::common::Displayable;
use crate::errors::LedgerError;

/// Colour used for categories without a dedicated chart colour.
pub const FALLBACK_COLOR: &str = "#95A5A6";

/// Category shared by income and expense transactions. Nothing ties a category
/// to a kind; `salary` on an expense is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transportation,
    Shopping,
    Entertainment,
    Bills,
    Health,
    Education,
    Travel,
    Salary,
    Freelance,
    Investment,
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Food,
        Category::Transportation,
        Category::Shopping,
        Category::Entertainment,
        Category::Bills,
        Category::Health,
        Category::Education,
        Category::Travel,
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Other,
    ];

    /// Storage key, as written in persisted ledgers.
    pub fn key(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transportation => "transportation",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Bills => "bills",
            Category::Health => "health",
            Category::Education => "education",
            Category::Travel => "travel",
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investment => "investment",
            Category::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Bills => "Bills & Utilities",
            Category::Health => "Health & Fitness",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Investment => "Investment",
            Category::Other => "Other",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Category::Food => "🍔",
            Category::Transportation => "🚗",
            Category::Shopping => "🛍️",
            Category::Entertainment => "🎬",
            Category::Bills => "💡",
            Category::Health => "🏥",
            Category::Education => "📚",
            Category::Travel => "✈️",
            Category::Salary => "💼",
            Category::Freelance => "💻",
            Category::Investment => "📈",
            Category::Other => "🔗",
        }
    }

    /// Chart colour as a hex triplet. Income-side categories share the fallback.
    pub fn color(self) -> &'static str {
        match self {
            Category::Food => "#2ECC71",
            Category::Transportation => "#3498DB",
            Category::Shopping => "#E67E22",
            Category::Entertainment => "#9B59B6",
            Category::Bills => "#E74C3C",
            Category::Health => "#1ABC9C",
            Category::Education => "#F39C12",
            Category::Travel => "#34495E",
            Category::Salary | Category::Freelance | Category::Investment | Category::Other => {
                FALLBACK_COLOR
            }
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let needle = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|category| category.key() == needle)
    }

    /// Lenient lookup used when reading stored data: unknown keys map to `Other`.
    pub fn from_key_or_other(key: &str) -> Self {
        Self::from_key(key).unwrap_or(Category::Other)
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_key(value).ok_or_else(|| {
            LedgerError::InvalidInput(format!(
                "unknown category `{}`; expected one of: {}",
                value,
                Self::ALL.map(Category::key).join(", ")
            ))
        })
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        Ok(Category::from_key_or_other(&key))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} {}", self.glyph(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_lookup() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert_eq!(Category::from_key(" Food "), Some(Category::Food));
        assert_eq!(Category::from_key("BILLS"), Some(Category::Bills));
    }

    #[test]
    fn unknown_key_is_rejected_by_from_str() {
        let err = "groceries".parse::<Category>().expect_err("unknown key");
        assert!(err.to_string().contains("groceries"));
    }

    #[test]
    fn unknown_key_deserializes_as_other() {
        let category: Category = serde_json::from_str("\"pets\"").unwrap();
        assert_eq!(category, Category::Other);
    }

    #[test]
    fn serializes_as_lowercase_key() {
        assert_eq!(
            serde_json::to_string(&Category::Transportation).unwrap(),
            "\"transportation\""
        );
    }

    #[test]
    fn income_categories_use_fallback_color() {
        assert_eq!(Category::Salary.color(), FALLBACK_COLOR);
        assert_eq!(Category::Food.color(), "#2ECC71");
    }

    #[test]
    fn display_label_prefixes_glyph() {
        assert_eq!(Category::Bills.display_label(), "💡 Bills & Utilities");
    }
}
