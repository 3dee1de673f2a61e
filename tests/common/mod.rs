#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use pocket_ledger::{
    core::tracker::Tracker,
    domain::{Category, Ledger, Transaction, TransactionKind},
    storage::{json_backend::JsonFileStore, DEFAULT_LEDGER_KEY},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Unique directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// File-backed store rooted in a fresh temp directory.
pub fn file_store() -> (JsonFileStore, PathBuf) {
    let root = temp_base().join("data");
    let store = JsonFileStore::new(Some(root.clone())).expect("create json file store");
    (store, root)
}

pub fn open_tracker(root: &PathBuf) -> Tracker {
    let store = JsonFileStore::new(Some(root.clone())).expect("create json file store");
    Tracker::open(Box::new(store), DEFAULT_LEDGER_KEY)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn income(id: u64, amount: f64) -> Transaction {
    Transaction::new(
        id,
        "Salary",
        amount,
        TransactionKind::Income,
        Category::Salary,
        date(2024, 1, 1),
    )
}

pub fn expense(id: u64, amount: f64, category: Category) -> Transaction {
    Transaction::new(
        id,
        category.label(),
        amount,
        TransactionKind::Expense,
        category,
        date(2024, 1, 2),
    )
}

pub fn ledger(transactions: Vec<Transaction>) -> Ledger {
    Ledger::from_transactions(transactions)
}
