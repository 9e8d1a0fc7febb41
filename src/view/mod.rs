//! Read-only projections of ledger state: the list view and the chart.

pub mod chart;
pub mod projector;
pub mod surface;

pub use chart::{ChartBar, ChartCapability, ChartError, ChartProjector};
pub use projector::{DeleteControl, ViewProjector, EMPTY_PLACEHOLDER};
pub use surface::{DisplaySurface, MemorySurface, TotalsView, TransactionRow};
