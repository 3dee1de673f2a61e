#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger tracks income and expense transactions, derives totals and a
//! per-category breakdown, and produces rule-based budgeting tips.
//!
//! The aggregation layer in [`core::services`] is pure: it only reads a
//! [`domain::Ledger`]. Persistence and confirmation live behind the
//! [`core::tracker::Tracker`] controller.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pocket Ledger tracing initialized.");
    });
}
