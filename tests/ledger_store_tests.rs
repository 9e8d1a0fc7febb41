mod common;

use std::collections::HashSet;

use common::{frozen_store, FROZEN_MILLIS};
use pocket_ledger::{
    core::aggregates,
    errors::ValidationError,
    ledger::{Money, TransactionKind},
    storage::{MemoryStore, PersistenceAdapter},
};

#[test]
fn newest_transaction_is_listed_first() {
    let backend = MemoryStore::new();
    let mut store = frozen_store(&backend);
    let a = store
        .add(TransactionKind::Income, "10", "2024-01-01", "A")
        .unwrap();
    let b = store
        .add(TransactionKind::Expense, "5", "2024-01-02", "B")
        .unwrap();

    let ids: Vec<&str> = store.list().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![b.id.as_str(), a.id.as_str()]);
}

#[test]
fn ids_stay_unique_under_a_frozen_clock() {
    let backend = MemoryStore::new();
    let mut store = frozen_store(&backend);
    for _ in 0..50 {
        store
            .add(TransactionKind::Expense, "1", "2024-01-01", "")
            .unwrap();
    }
    let unique: HashSet<&str> = store.list().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(unique.len(), 50);
    assert!(unique.contains(FROZEN_MILLIS.to_string().as_str()));
}

#[test]
fn remove_is_idempotent() {
    let backend = MemoryStore::new();
    let mut store = frozen_store(&backend);
    let keep = store
        .add(TransactionKind::Income, "100", "2024-01-01", "Salary")
        .unwrap();
    let gone = store
        .add(TransactionKind::Expense, "40", "2024-01-02", "Rent")
        .unwrap();

    assert!(store.remove(gone.id.as_str()));
    let after_first = store.list().to_vec();
    assert!(!store.remove(gone.id.as_str()));
    assert_eq!(store.list(), after_first.as_slice());
    assert_eq!(store.list()[0].id, keep.id);
}

#[test]
fn balance_matches_income_minus_expense_in_cents() {
    let backend = MemoryStore::new();
    let mut store = frozen_store(&backend);
    let entries = [
        (TransactionKind::Income, "1200.10"),
        (TransactionKind::Expense, "0.30"),
        (TransactionKind::Expense, "99.99"),
        (TransactionKind::Income, "0.01"),
        (TransactionKind::Expense, "1500"),
    ];
    for (kind, amount) in entries {
        store.add(kind, amount, "2024-01-01", "").unwrap();
    }

    let totals = aggregates(store.list());
    assert_eq!(totals.income, Money::from_minor(120_011));
    assert_eq!(totals.expense, Money::from_minor(160_029));
    assert_eq!(totals.balance, totals.income - totals.expense);
    assert!(totals.balance.is_negative());
}

#[test]
fn negative_input_is_stored_as_magnitude() {
    let backend = MemoryStore::new();
    let mut store = frozen_store(&backend);
    let txn = store
        .add(TransactionKind::Expense, "-5", "2024-01-01", "")
        .unwrap();
    assert_eq!(txn.amount.minor_units(), 500);
    assert_eq!(txn.kind, TransactionKind::Expense);
}

#[test]
fn invalid_amounts_change_nothing() {
    let backend = MemoryStore::new();
    let mut store = frozen_store(&backend);
    for raw in ["abc", "", "0", "-0"] {
        assert!(store
            .add(TransactionKind::Expense, raw, "2024-01-01", "")
            .is_err());
    }
    assert_eq!(
        store.add(TransactionKind::Income, "   ", "", ""),
        Err(ValidationError::Missing)
    );
    assert!(store.is_empty());
    assert_eq!(backend.write_count(), 0);
}

#[test]
fn hydrated_ids_are_never_reissued() {
    let backend = MemoryStore::new();
    let seed = format!(
        r#"[{{"id":"{}","type":"income","amount":5,"date":"2024-01-01","category":""}}]"#,
        FROZEN_MILLIS
    );
    backend.insert_raw("transactions", &seed);

    let mut store = frozen_store(&backend);
    let txn = store
        .add(TransactionKind::Expense, "1", "2024-01-02", "")
        .unwrap();
    assert_ne!(txn.id.as_str(), FROZEN_MILLIS.to_string());
    assert_eq!(store.len(), 2);
}

#[test]
fn failed_writes_keep_memory_authoritative() {
    let backend = MemoryStore::new();
    let mut store = frozen_store(&backend);
    backend.set_fail_writes(true);
    store
        .add(TransactionKind::Income, "10", "2024-01-01", "")
        .unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.last_write_error().is_some());

    backend.set_fail_writes(false);
    store
        .add(TransactionKind::Income, "20", "2024-01-01", "")
        .unwrap();
    assert!(store.last_write_error().is_none());

    let reloaded = PersistenceAdapter::new(backend.clone()).load_transactions();
    assert_eq!(reloaded.len(), 2);
}
