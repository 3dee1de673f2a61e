//! Owning controller: holds the ledger, persists every mutation and derives
//! the views a renderer needs.

use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;

use crate::{
    core::services::{
        CategoryShare, CategoryTotals, LedgerSummary, Suggestion, SuggestionService,
        SuggestionThresholds, SummaryService,
    },
    domain::{Ledger, Transaction, TransactionDraft, TransactionId},
    errors::Result,
    storage::{self, KeyValueStore},
};

/// Gate consulted before destructive operations.
pub trait ConfirmationGate {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Gate with a fixed answer, for scripted runs and `--yes` flags.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl ConfirmationGate for FixedAnswer {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(self.0)
    }
}

pub const CLEAR_ALL_PROMPT: &str =
    "Are you sure you want to delete all transactions? This action cannot be undone.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Ledger was already empty; the gate was not consulted.
    NothingToClear,
    Cancelled,
    Cleared(usize),
}

/// Every derived view of a ledger, bundled for one redraw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub summary: LedgerSummary,
    pub category_totals: CategoryTotals,
    pub breakdown: Vec<CategoryShare>,
    pub suggestions: Vec<Suggestion>,
}

impl Dashboard {
    pub fn from_ledger(ledger: &Ledger, thresholds: &SuggestionThresholds) -> Self {
        let category_totals = SummaryService::compute_category_totals(ledger);
        Self {
            summary: SummaryService::compute_summary(ledger),
            breakdown: SummaryService::category_breakdown(&category_totals),
            category_totals,
            suggestions: SuggestionService::generate_with(ledger, thresholds),
        }
    }
}

/// Source of the current date and id clock, swappable in tests.
pub trait Clock {
    fn today(&self) -> NaiveDate;
    fn now_millis(&self) -> TransactionId;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now_millis(&self) -> TransactionId {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
    }
}

pub struct Tracker {
    ledger: Ledger,
    store: Box<dyn KeyValueStore>,
    key: String,
    thresholds: SuggestionThresholds,
    clock: Box<dyn Clock>,
}

impl Tracker {
    /// Loads the ledger stored under `key`, starting empty when nothing usable
    /// is stored.
    pub fn open(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let ledger = storage::load_ledger(store.as_ref(), &key);
        tracing::info!(key = %key, transactions = ledger.len(), "tracker opened");
        Self {
            ledger,
            store,
            key,
            thresholds: SuggestionThresholds::default(),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_thresholds(mut self, thresholds: SuggestionThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn thresholds(&self) -> &SuggestionThresholds {
        &self.thresholds
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Validates the draft, assigns a fresh id, prepends and persists it.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<&Transaction> {
        let id = self.ledger.next_id(self.clock.now_millis())?;
        let transaction = draft.finalize(id, self.clock.today())?;
        let mut next = self.ledger.clone();
        next.prepend(transaction)?;
        self.commit(next)?;
        tracing::info!(id, "transaction added");
        Ok(&self.ledger.transactions()[0])
    }

    /// Removes the matching transaction. Unknown ids change nothing and skip
    /// the save.
    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<Option<Transaction>> {
        let mut next = self.ledger.clone();
        let Some(removed) = next.remove(id) else {
            tracing::debug!(id, "delete ignored, id not found");
            return Ok(None);
        };
        self.commit(next)?;
        tracing::info!(id, "transaction deleted");
        Ok(Some(removed))
    }

    /// Clears every transaction once the gate agrees. An empty ledger returns
    /// [`ClearOutcome::NothingToClear`] without asking.
    pub fn clear_all(&mut self, gate: &mut dyn ConfirmationGate) -> Result<ClearOutcome> {
        if self.ledger.is_empty() {
            return Ok(ClearOutcome::NothingToClear);
        }
        if !gate.confirm(CLEAR_ALL_PROMPT)? {
            return Ok(ClearOutcome::Cancelled);
        }
        let mut next = self.ledger.clone();
        let removed = next.clear();
        self.commit(next)?;
        tracing::info!(removed, "ledger cleared");
        Ok(ClearOutcome::Cleared(removed))
    }

    pub fn summary(&self) -> LedgerSummary {
        SummaryService::compute_summary(&self.ledger)
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::from_ledger(&self.ledger, &self.thresholds)
    }

    /// Persists `next` and only then swaps it in, so a failed save leaves the
    /// in-memory ledger matching what is stored.
    fn commit(&mut self, next: Ledger) -> Result<()> {
        storage::save_ledger(self.store.as_ref(), &self.key, &next)?;
        self.ledger = next;
        Ok(())
    }
}
