use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{
    common::Identifiable,
    transaction::{Transaction, TransactionId},
};
use crate::errors::LedgerError;

/// Ordered collection of transactions, newest insertion first.
///
/// Ids are unique. Summaries are never stored here; they are derived on demand
/// by [`crate::core::services`]. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Transaction>", into = "Vec<Transaction>")]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from an already newest-first list. Records that fail
    /// [`Transaction::validate`] and later duplicates of an id are dropped.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let mut seen = HashSet::with_capacity(transactions.len());
        let mut kept = Vec::with_capacity(transactions.len());
        for txn in transactions {
            if let Err(err) = txn.validate() {
                tracing::warn!(id = txn.id, error = %err, "dropping invalid transaction");
            } else if seen.insert(txn.id()) {
                kept.push(txn);
            } else {
                tracing::warn!(id = txn.id, "dropping transaction with duplicate id");
            }
        }
        Self { transactions: kept }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn contains(&self, id: TransactionId) -> bool {
        self.get(id).is_some()
    }

    pub fn max_id(&self) -> Option<TransactionId> {
        self.transactions.iter().map(|txn| txn.id).max()
    }

    /// Next identifier given the current clock reading: the clock value unless an
    /// existing id is already at or beyond it. Fails once `u64::MAX` is taken.
    pub fn next_id(&self, now_millis: TransactionId) -> Result<TransactionId, LedgerError> {
        match self.max_id() {
            Some(max) if max >= now_millis => max.checked_add(1).ok_or_else(|| {
                LedgerError::Storage(format!("no transaction id left after {max}"))
            }),
            _ => Ok(now_millis),
        }
    }

    /// Inserts at the front. Fails when the id is already taken.
    pub fn prepend(&mut self, transaction: Transaction) -> Result<&Transaction, LedgerError> {
        if self.contains(transaction.id) {
            return Err(LedgerError::InvalidInput(format!(
                "transaction id {} already exists",
                transaction.id
            )));
        }
        self.transactions.insert(0, transaction);
        Ok(&self.transactions[0])
    }

    /// Removes the transaction with `id`, keeping the order of the rest.
    /// Missing ids are a no-op.
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(index))
    }

    /// Drops every transaction, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.transactions.len();
        self.transactions.clear();
        removed
    }
}

impl From<Vec<Transaction>> for Ledger {
    fn from(transactions: Vec<Transaction>) -> Self {
        Self::from_transactions(transactions)
    }
}

impl From<Ledger> for Vec<Transaction> {
    fn from(ledger: Ledger) -> Self {
        ledger.transactions
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
