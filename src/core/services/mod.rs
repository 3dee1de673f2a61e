pub mod suggestion_service;
pub mod summary_service;

pub use suggestion_service::{
    icons, Suggestion, SuggestionKind, SuggestionService, SuggestionThresholds,
};
pub use summary_service::{CategoryShare, CategoryTotals, LedgerSummary, SummaryService};
