use crate::{
    core::theme::Theme,
    ledger::{TransactionId, TransactionKind},
};

/// One rendered list entry. `position` is the 1-based row number its delete
/// control answers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    pub position: usize,
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub indicator: char,
    pub label: String,
    pub date: String,
    pub amount: String,
}

/// Formatted summary figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsView {
    pub income: String,
    pub expense: String,
    pub balance: String,
    pub balance_negative: bool,
}

/// Something a [`ViewProjector`](super::ViewProjector) can draw a frame onto.
///
/// A frame is `begin_frame`, then either one placeholder or the rows in
/// order, then the totals, then `end_frame`.
pub trait DisplaySurface {
    fn begin_frame(&mut self);
    fn show_placeholder(&mut self, message: &str);
    fn push_row(&mut self, row: &TransactionRow);
    fn show_totals(&mut self, totals: &TotalsView);
    fn end_frame(&mut self) {}
    fn apply_theme(&mut self, theme: Theme);
}

/// Keeps the most recent frame in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub rows: Vec<TransactionRow>,
    pub placeholder: Option<String>,
    pub totals: Option<TotalsView>,
    pub theme: Option<Theme>,
    pub frames: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.label.as_str()).collect()
    }
}

impl DisplaySurface for MemorySurface {
    fn begin_frame(&mut self) {
        self.rows.clear();
        self.placeholder = None;
        self.totals = None;
    }

    fn show_placeholder(&mut self, message: &str) {
        self.placeholder = Some(message.to_string());
    }

    fn push_row(&mut self, row: &TransactionRow) {
        self.rows.push(row.clone());
    }

    fn show_totals(&mut self, totals: &TotalsView) {
        self.totals = Some(totals.clone());
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }
}
