#![allow(dead_code)]

use pocket_ledger::{
    core::{LedgerStore, Session},
    currency::MoneyFormat,
    ledger::FixedClock,
    storage::{MemoryStore, PersistenceAdapter},
    view::{ChartProjector, MemorySurface, ViewProjector},
};

pub const FROZEN_MILLIS: i64 = 1_704_067_200_000;

/// Store backed by `backend` with a clock frozen at [`FROZEN_MILLIS`].
pub fn frozen_store(backend: &MemoryStore) -> LedgerStore {
    LedgerStore::with_clock(
        PersistenceAdapter::new(backend.clone()),
        Box::new(FixedClock(FROZEN_MILLIS)),
    )
}

/// Session over an in-memory surface; `chart` decides whether a chart is wired.
pub fn memory_session(backend: &MemoryStore, chart: ChartProjector) -> Session<MemorySurface> {
    Session::start(
        frozen_store(backend),
        ViewProjector::new(MemorySurface::new(), MoneyFormat::default()),
        chart,
    )
}
