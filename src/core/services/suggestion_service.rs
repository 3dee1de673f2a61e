use serde::{Deserialize, Serialize};

use crate::domain::Ledger;
use crate::errors::LedgerError;

use super::summary_service::SummaryService;

/// Icon references attached to suggestions. Renderers map them to glyphs.
pub mod icons {
    pub const LIGHTBULB: &str = "lightbulb";
    pub const WARNING: &str = "exclamation-triangle";
    pub const TROPHY: &str = "trophy";
    pub const CHART_PIE: &str = "chart-pie";
    pub const PLUS_CIRCLE: &str = "plus-circle";
    pub const PIGGY_BANK: &str = "piggy-bank";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Tip,
    Budget,
    Achievement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub icon: String,
    pub title: String,
    pub message: String,
}

impl Suggestion {
    fn new(
        kind: SuggestionKind,
        icon: &str,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            icon: icon.to_string(),
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Ratios that drive the suggestion rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionThresholds {
    /// Expenses above `income * ratio` raise a spending alert.
    pub high_spending_ratio: f64,
    /// Expenses below `income * ratio` earn a saving achievement.
    pub saving_ratio: f64,
    /// A category above `expenses * ratio` gets its own tip.
    pub concentration_ratio: f64,
    pub max_suggestions: usize,
}

impl Default for SuggestionThresholds {
    fn default() -> Self {
        Self {
            high_spending_ratio: 0.8,
            saving_ratio: 0.5,
            concentration_ratio: 0.4,
            max_suggestions: 3,
        }
    }
}

impl SuggestionThresholds {
    pub fn validate(&self) -> Result<(), LedgerError> {
        let ratios = [
            ("high_spending_ratio", self.high_spending_ratio),
            ("saving_ratio", self.saving_ratio),
            ("concentration_ratio", self.concentration_ratio),
        ];
        for (name, value) in ratios {
            if !value.is_finite() || value < 0.0 {
                return Err(LedgerError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.saving_ratio > self.high_spending_ratio {
            return Err(LedgerError::Config(
                "saving_ratio must not exceed high_spending_ratio".into(),
            ));
        }
        if self.max_suggestions == 0 {
            return Err(LedgerError::Config(
                "max_suggestions must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

pub struct SuggestionService;

impl SuggestionService {
    /// Suggestions with the default thresholds.
    pub fn generate(ledger: &Ledger) -> Vec<Suggestion> {
        Self::generate_with(ledger, &SuggestionThresholds::default())
    }

    /// Rules run in a fixed order: spending ratio, category concentration, zero
    /// income. If none fires two evergreen tips are used. The result is capped
    /// at `max_suggestions` keeping generation order.
    ///
    /// With zero income any expense counts as high spending, since
    /// `expense > 0 * ratio` holds for every positive expense.
    pub fn generate_with(ledger: &Ledger, thresholds: &SuggestionThresholds) -> Vec<Suggestion> {
        if ledger.is_empty() {
            return vec![Self::get_started()];
        }

        let summary = SummaryService::compute_summary(ledger);
        let totals = SummaryService::compute_category_totals(ledger);
        let top = totals.top();
        let (income, expense) = (summary.total_income, summary.total_expense);

        let mut suggestions = Vec::new();

        if expense > income * thresholds.high_spending_ratio {
            suggestions.push(Suggestion::new(
                SuggestionKind::Budget,
                icons::WARNING,
                "High Spending Alert",
                format!(
                    "You're spending over {}% of your income. Consider reviewing your budget.",
                    percent(thresholds.high_spending_ratio)
                ),
            ));
        } else if expense < income * thresholds.saving_ratio {
            suggestions.push(Suggestion::new(
                SuggestionKind::Achievement,
                icons::TROPHY,
                "Great Saving!",
                format!(
                    "You're saving more than {}% of your income. Keep up the excellent work!",
                    percent(1.0 - thresholds.saving_ratio)
                ),
            ));
        }

        if let Some((category, total)) = top {
            if total > expense * thresholds.concentration_ratio {
                suggestions.push(Suggestion::new(
                    SuggestionKind::Tip,
                    icons::CHART_PIE,
                    format!("{} Spending", category.label()),
                    format!(
                        "You're spending a lot on {}. Consider setting a budget for this category.",
                        category.label().to_lowercase()
                    ),
                ));
            }
        }

        if income == 0.0 {
            suggestions.push(Suggestion::new(
                SuggestionKind::Tip,
                icons::PLUS_CIRCLE,
                "Add Income",
                "Don't forget to add your income sources to get a complete financial picture.",
            ));
        }

        if suggestions.is_empty() {
            suggestions = Self::defaults();
        }

        suggestions.truncate(thresholds.max_suggestions);
        suggestions
    }

    fn get_started() -> Suggestion {
        Suggestion::new(
            SuggestionKind::Tip,
            icons::LIGHTBULB,
            "Get Started",
            "Add your first transaction to begin tracking your expenses and gaining insights!",
        )
    }

    fn defaults() -> Vec<Suggestion> {
        vec![
            Suggestion::new(
                SuggestionKind::Tip,
                icons::LIGHTBULB,
                "Daily Tracking",
                "Track your expenses daily for better insights into your spending habits.",
            ),
            Suggestion::new(
                SuggestionKind::Budget,
                icons::PIGGY_BANK,
                "Emergency Fund",
                "Try to save at least 3-6 months of expenses for emergencies.",
            ),
        ]
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.0}", ratio * 100.0)
}
