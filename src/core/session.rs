use tracing::debug;

use crate::{
    currency::MoneyFormat,
    errors::ValidationError,
    ledger::{Transaction, TransactionId, TransactionInput, TransactionKind},
    view::{ChartProjector, DisplaySurface, ViewProjector},
};

use super::{
    aggregates::{aggregates, Totals},
    ledger_store::LedgerStore,
    theme::{Theme, ThemePreference},
};

/// Wires one user event through the engine: store mutation (which persists),
/// aggregate recompute, list render and chart update, in that order.
pub struct Session<S> {
    store: LedgerStore,
    theme: ThemePreference,
    view: ViewProjector<S>,
    chart: ChartProjector,
}

impl<S: DisplaySurface> Session<S> {
    /// Restores the theme, applies it and draws the first frame.
    pub fn start(store: LedgerStore, view: ViewProjector<S>, chart: ChartProjector) -> Self {
        let theme = ThemePreference::load(store.adapter());
        let mut session = Self {
            store,
            theme,
            view,
            chart,
        };
        session.view.apply_theme(session.theme.current());
        session.refresh();
        session
    }

    pub fn submit(&mut self, input: &TransactionInput) -> Result<Transaction, ValidationError> {
        let txn = self.store.submit(input)?;
        self.refresh();
        Ok(txn)
    }

    pub fn add(
        &mut self,
        kind: TransactionKind,
        amount: &str,
        date: &str,
        category: &str,
    ) -> Result<Transaction, ValidationError> {
        let txn = self.store.add(kind, amount, date, category)?;
        self.refresh();
        Ok(txn)
    }

    /// Activates the delete control on 1-based `row` of the last frame.
    /// Returns the removed id, or `None` when no such row was rendered.
    pub fn activate_delete(&mut self, row: usize) -> Option<TransactionId> {
        let id = self.view.control(row)?.id.clone();
        self.remove(id.as_str());
        Some(id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.store.remove(id);
        self.refresh();
        removed
    }

    /// Flips the theme and repaints the list in the new palette.
    pub fn toggle_theme(&mut self) -> Theme {
        let view = &mut self.view;
        let theme = self
            .theme
            .toggle(self.store.adapter(), |theme| view.apply_theme(theme));
        let totals = aggregates(self.store.list());
        self.view.render(self.store.list(), &totals);
        theme
    }

    /// Swaps the display format and re-renders.
    pub fn set_money_format(&mut self, format: MoneyFormat) {
        self.view.set_format(format);
        self.refresh();
    }

    /// Swaps the chart projector and pushes the current totals into it.
    pub fn replace_chart(&mut self, chart: ChartProjector) {
        self.chart = chart;
        self.refresh();
    }

    /// Full re-projection of the current store state.
    pub fn refresh(&mut self) {
        let totals = aggregates(self.store.list());
        self.view.render(self.store.list(), &totals);
        self.chart.update(totals.income, totals.expense);
        debug!(rows = self.store.len(), "view refreshed");
    }

    pub fn totals(&self) -> Totals {
        aggregates(self.store.list())
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn view(&self) -> &ViewProjector<S> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewProjector<S> {
        &mut self.view
    }

    pub fn chart(&self) -> &ChartProjector {
        &self.chart
    }

    pub fn surface(&self) -> &S {
        self.view.surface()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::LocaleConfig;
    use crate::ledger::FixedClock;
    use crate::storage::{MemoryStore, PersistenceAdapter};
    use crate::view::MemorySurface;

    fn session(backend: &MemoryStore) -> Session<MemorySurface> {
        let store = LedgerStore::with_clock(
            PersistenceAdapter::new(backend.clone()),
            Box::new(FixedClock(1_700_000_000_000)),
        );
        Session::start(
            store,
            ViewProjector::new(MemorySurface::new(), MoneyFormat::default()),
            ChartProjector::disabled(),
        )
    }

    #[test]
    fn start_renders_an_initial_frame_with_the_stored_theme() {
        let backend = MemoryStore::new();
        backend.insert_raw("theme", "light");
        let session = session(&backend);
        assert_eq!(session.surface().theme, Some(Theme::Light));
        assert_eq!(session.surface().frames, 1);
        assert!(session.surface().placeholder.is_some());
        assert!(session.chart().latest().is_some());
    }

    #[test]
    fn delete_control_removes_and_rerenders() {
        let backend = MemoryStore::new();
        let mut session = session(&backend);
        session
            .add(TransactionKind::Income, "100", "2024-01-01", "Salary")
            .unwrap();
        session
            .add(TransactionKind::Expense, "40", "2024-01-02", "Rent")
            .unwrap();

        let removed = session.activate_delete(1).expect("row 1 rendered");
        assert!(session.store().get(removed.as_str()).is_none());
        assert_eq!(session.surface().labels(), vec!["Salary"]);
        assert!(session.activate_delete(5).is_none());
    }

    #[test]
    fn theme_toggle_repaints_the_list() {
        let backend = MemoryStore::new();
        let mut session = session(&backend);
        session.toggle_theme();
        assert_eq!(session.surface().frames, 2);
        assert_eq!(session.surface().theme, Some(Theme::Light));
    }

    #[test]
    fn rejected_submission_does_not_rerender() {
        let backend = MemoryStore::new();
        let mut session = session(&backend);
        let input = TransactionInput::new("expense", "abc", "2024-01-01", "");
        assert!(session.submit(&input).is_err());
        assert_eq!(session.surface().frames, 1);
    }

    #[test]
    fn format_change_rerenders_with_new_separators() {
        let backend = MemoryStore::new();
        let mut session = session(&backend);
        session
            .add(TransactionKind::Income, "1234.5", "2024-01-01", "")
            .unwrap();
        let locale = LocaleConfig {
            decimal_separator: '.',
            grouping_separator: ',',
        };
        session.set_money_format(MoneyFormat::new(locale, "EUR"));
        assert_eq!(session.surface().rows[0].amount, "1,234.50 EUR");
        assert_eq!(backend.write_count(), 1);
    }
}
