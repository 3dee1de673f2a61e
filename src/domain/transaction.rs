use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    category::Category,
    common::{Displayable, Identifiable},
};
use crate::errors::LedgerError;

/// Time-derived identifier (milliseconds since the Unix epoch).
pub type TransactionId = u64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn key(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Sign shown in front of amounts in transaction lists.
    pub fn sign(self) -> char {
        match self {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        }
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(TransactionKind::Income),
            "expense" | "out" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown transaction type `{other}`; expected `income` or `expense`"
            ))),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// One income or expense record. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub title: String,
    pub amount: f64,
    #[serde(alias = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        title: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            amount,
            kind,
            category,
            date,
        }
    }

    /// Checks the invariants every stored record must hold. Records written by
    /// other tools go through this on load.
    pub fn validate(&self) -> Result<(), LedgerError> {
        check_amount(self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> TransactionId {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} [{} {}]", self.id, self.kind.key(), self.category.key())
    }
}

/// Candidate transaction produced by an input form, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub title: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: Category,
    pub date: Option<NaiveDate>,
}

impl TransactionDraft {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: Category,
    ) -> Self {
        Self {
            title: title.into(),
            amount,
            kind,
            category,
            date: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Validates the draft and turns it into a transaction. A missing date
    /// falls back to `today`.
    pub fn finalize(self, id: TransactionId, today: NaiveDate) -> Result<Transaction, LedgerError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(LedgerError::InvalidInput("title must not be empty".into()));
        }
        check_amount(self.amount)?;
        Ok(Transaction::new(
            id,
            title,
            self.amount,
            self.kind,
            self.category,
            self.date.unwrap_or(today),
        ))
    }
}

fn check_amount(amount: f64) -> Result<(), LedgerError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(LedgerError::InvalidInput(format!(
            "amount must be a non-negative number, got {amount}"
        )));
    }
    Ok(())
}
