use crate::ledger::{Money, Transaction, TransactionKind};

/// Income, expense and balance derived from a transaction list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
}

impl Totals {
    /// `(income, expense)` as plain numbers for a chart sink.
    pub fn as_chart_series(&self) -> (f64, f64) {
        (self.income.to_f64(), self.expense.to_f64())
    }
}

/// Sums each direction in exact minor units. `balance = income - expense`.
pub fn aggregates(transactions: &[Transaction]) -> Totals {
    let sum_of = |kind: TransactionKind| -> Money {
        transactions
            .iter()
            .filter(|txn| txn.kind == kind)
            .map(|txn| txn.amount.money())
            .sum()
    };
    let income = sum_of(TransactionKind::Income);
    let expense = sum_of(TransactionKind::Expense);
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Amount, TransactionId};

    fn txn(id: &str, kind: TransactionKind, raw: &str) -> Transaction {
        Transaction::new(
            TransactionId::new(id),
            kind,
            Amount::parse(raw).unwrap(),
            "",
            "",
        )
    }

    #[test]
    fn empty_ledger_is_all_zero() {
        assert_eq!(aggregates(&[]), Totals::default());
    }

    #[test]
    fn income_minus_expense() {
        let totals = aggregates(&[
            txn("2", TransactionKind::Expense, "40"),
            txn("1", TransactionKind::Income, "100"),
        ]);
        assert_eq!(totals.income, Money::from_minor(10_000));
        assert_eq!(totals.expense, Money::from_minor(4_000));
        assert_eq!(totals.balance, Money::from_minor(6_000));
        assert_eq!(totals.as_chart_series(), (100.0, 40.0));
    }

    #[test]
    fn cent_amounts_do_not_drift() {
        let list: Vec<_> = (0..1_000)
            .map(|idx| txn(&idx.to_string(), TransactionKind::Income, "0.10"))
            .collect();
        let totals = aggregates(&list);
        assert_eq!(totals.income, Money::from_minor(10_000));
        assert_eq!(totals.balance.to_string(), "100.00");
    }

    #[test]
    fn balance_can_go_negative() {
        let totals = aggregates(&[
            txn("1", TransactionKind::Income, "10.05"),
            txn("2", TransactionKind::Expense, "20.10"),
        ]);
        assert_eq!(totals.balance, Money::from_minor(-1_005));
    }
}
