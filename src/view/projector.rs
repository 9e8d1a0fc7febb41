use crate::{
    core::{aggregates::Totals, theme::Theme},
    currency::MoneyFormat,
    ledger::{Transaction, TransactionId},
};

use super::surface::{DisplaySurface, TotalsView, TransactionRow};

pub const EMPTY_PLACEHOLDER: &str = "No transactions yet.";

/// A rendered delete affordance: row number bound to a transaction id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteControl {
    pub row: usize,
    pub id: TransactionId,
}

/// Projects ledger snapshots onto a [`DisplaySurface`]. Every render rebuilds
/// the whole frame; the projector never touches the store.
pub struct ViewProjector<S> {
    surface: S,
    format: MoneyFormat,
    controls: Vec<DeleteControl>,
}

impl<S: DisplaySurface> ViewProjector<S> {
    pub fn new(surface: S, format: MoneyFormat) -> Self {
        Self {
            surface,
            format,
            controls: Vec::new(),
        }
    }

    pub fn render(&mut self, transactions: &[Transaction], totals: &Totals) {
        self.surface.begin_frame();
        self.controls.clear();

        if transactions.is_empty() {
            self.surface.show_placeholder(EMPTY_PLACEHOLDER);
        }
        for (idx, txn) in transactions.iter().enumerate() {
            let row = TransactionRow {
                position: idx + 1,
                id: txn.id.clone(),
                kind: txn.kind,
                indicator: txn.kind.indicator(),
                label: txn.label().to_string(),
                date: txn.date.clone(),
                amount: self.format.format(txn.amount.money()),
            };
            self.surface.push_row(&row);
            self.controls.push(DeleteControl {
                row: row.position,
                id: row.id,
            });
        }

        let summary = self.totals_view(totals);
        self.surface.show_totals(&summary);
        self.surface.end_frame();
    }

    pub fn totals_view(&self, totals: &Totals) -> TotalsView {
        TotalsView {
            income: self.format.format(totals.income),
            expense: self.format.format(totals.expense),
            balance: self.format.format(totals.balance),
            balance_negative: totals.balance.is_negative(),
        }
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        self.surface.apply_theme(theme);
    }

    /// The delete control rendered on 1-based `row` in the last frame.
    pub fn control(&self, row: usize) -> Option<&DeleteControl> {
        self.controls.iter().find(|control| control.row == row)
    }

    pub fn controls(&self) -> &[DeleteControl] {
        &self.controls
    }

    pub fn format(&self) -> &MoneyFormat {
        &self.format
    }

    /// Takes effect on the next render.
    pub fn set_format(&mut self, format: MoneyFormat) {
        self.format = format;
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
