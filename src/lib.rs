#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger keeps a single list of income and expense transactions,
//! derives running totals, and projects both onto a list view and a two-bar
//! chart. State survives restarts through a pluggable key-value store.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;
pub mod view;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Pocket Ledger tracing initialized.");
    });
}
