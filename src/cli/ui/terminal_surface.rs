use colored::{Color, Colorize};

use crate::{
    core::Theme,
    ledger::TransactionKind,
    view::{DisplaySurface, TotalsView, TransactionRow},
};

use super::table_renderer::{Alignment, Table, TableColumn};

const CATEGORY_WIDTH: usize = 28;

#[derive(Debug, Clone, Copy)]
struct Palette {
    income: Color,
    expense: Color,
    muted: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                income: Color::BrightGreen,
                expense: Color::BrightRed,
                muted: Color::BrightBlack,
            },
            Theme::Light => Self {
                income: Color::Green,
                expense: Color::Red,
                muted: Color::Blue,
            },
        }
    }
}

/// Renders frames as text for the interactive shell.
///
/// The finished frame is kept until the next `begin_frame`; the shell decides
/// when to print it.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    plain: bool,
    theme: Theme,
    table: Table,
    placeholder: Option<String>,
    totals: Vec<String>,
    frame: String,
}

impl TerminalSurface {
    pub fn new(plain: bool) -> Self {
        Self {
            plain,
            theme: Theme::default(),
            table: Self::empty_table(),
            placeholder: None,
            totals: Vec::new(),
            frame: String::new(),
        }
    }

    fn empty_table() -> Table {
        Table::new(vec![
            TableColumn::new("#", Alignment::Right),
            TableColumn::new("", Alignment::Left),
            TableColumn::new("Date", Alignment::Left).min(10),
            TableColumn::new("Category", Alignment::Left).max(CATEGORY_WIDTH),
            TableColumn::new("Amount", Alignment::Right),
        ])
    }

    /// The last completed frame.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.plain {
            text
        } else {
            text.color(color).to_string()
        }
    }

    fn kind_color(&self, kind: TransactionKind) -> Color {
        let palette = Palette::for_theme(self.theme);
        match kind {
            TransactionKind::Income => palette.income,
            TransactionKind::Expense => palette.expense,
        }
    }
}

impl DisplaySurface for TerminalSurface {
    fn begin_frame(&mut self) {
        self.table = Self::empty_table();
        self.placeholder = None;
        self.totals.clear();
    }

    fn show_placeholder(&mut self, message: &str) {
        let muted = Palette::for_theme(self.theme).muted;
        self.placeholder = Some(self.paint(message.to_string(), muted));
    }

    fn push_row(&mut self, row: &TransactionRow) {
        let color = self.kind_color(row.kind);
        let indicator = if self.plain {
            match row.kind {
                TransactionKind::Income => '+',
                TransactionKind::Expense => '-',
            }
        } else {
            row.indicator
        };
        let cells = vec![
            row.position.to_string(),
            self.paint(indicator.to_string(), color),
            row.date.clone(),
            row.label.clone(),
            self.paint(row.amount.clone(), color),
        ];
        self.table.push_row(cells);
    }

    fn show_totals(&mut self, totals: &TotalsView) {
        let palette = Palette::for_theme(self.theme);
        let balance_color = if totals.balance_negative {
            palette.expense
        } else {
            palette.income
        };
        self.totals = vec![
            format!(
                "Income : {}",
                self.paint(totals.income.clone(), palette.income)
            ),
            format!(
                "Expense: {}",
                self.paint(totals.expense.clone(), palette.expense)
            ),
            format!(
                "Balance: {}",
                self.paint(totals.balance.clone(), balance_color)
            ),
        ];
    }

    fn end_frame(&mut self) {
        let mut out = Vec::new();
        match &self.placeholder {
            Some(message) => out.push(message.clone()),
            None => out.push(self.table.render()),
        }
        out.push(String::new());
        out.extend(self.totals.iter().cloned());
        self.frame = out.join("\n");
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionId;

    fn row(position: usize, kind: TransactionKind, label: &str, amount: &str) -> TransactionRow {
        TransactionRow {
            position,
            id: TransactionId::new(position.to_string()),
            kind,
            indicator: kind.indicator(),
            label: label.into(),
            date: "2024-01-01".into(),
            amount: amount.into(),
        }
    }

    fn totals(balance: &str, negative: bool) -> TotalsView {
        TotalsView {
            income: "100,00 TND".into(),
            expense: "40,00 TND".into(),
            balance: balance.into(),
            balance_negative: negative,
        }
    }

    #[test]
    fn plain_frame_lists_rows_then_totals() {
        let mut surface = TerminalSurface::new(true);
        surface.begin_frame();
        surface.push_row(&row(1, TransactionKind::Expense, "Rent", "40,00 TND"));
        surface.push_row(&row(2, TransactionKind::Income, "Salary", "100,00 TND"));
        surface.show_totals(&totals("60,00 TND", false));
        surface.end_frame();

        let frame = surface.frame();
        let rent = frame.find("Rent").expect("rent row");
        let salary = frame.find("Salary").expect("salary row");
        assert!(rent < salary);
        assert!(frame.contains("Balance: 60,00 TND"));
        assert!(!frame.contains('\u{1b}'));
    }

    #[test]
    fn placeholder_replaces_the_table() {
        let mut surface = TerminalSurface::new(true);
        surface.begin_frame();
        surface.show_placeholder("No transactions yet.");
        surface.show_totals(&totals("0,00 TND", false));
        surface.end_frame();
        assert!(surface.frame().starts_with("No transactions yet."));
        assert!(!surface.frame().contains("Category"));
    }

    #[test]
    fn theme_is_tracked() {
        let mut surface = TerminalSurface::new(false);
        surface.apply_theme(Theme::Light);
        assert_eq!(surface.theme(), Theme::Light);
    }
}
