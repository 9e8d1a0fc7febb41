//! The single owner of the transaction collection.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::{
    errors::{PersistenceWriteError, ValidationError},
    ledger::{
        Amount, Clock, IdGenerator, SystemClock, Transaction, TransactionId, TransactionInput,
        TransactionKind,
    },
    storage::PersistenceAdapter,
};

/// Owns the newest-first transaction list and flushes it after every mutation.
///
/// Other components only ever see `&[Transaction]` through [`list`](Self::list).
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    adapter: PersistenceAdapter,
    ids: IdGenerator,
    last_write_error: Option<PersistenceWriteError>,
}

impl LedgerStore {
    /// Hydrates from `adapter` using the system clock for new ids.
    pub fn open(adapter: PersistenceAdapter) -> Self {
        Self::with_clock(adapter, Box::new(SystemClock))
    }

    pub fn with_clock(adapter: PersistenceAdapter, clock: Box<dyn Clock>) -> Self {
        let transactions = drop_duplicate_ids(adapter.load_transactions());
        let mut ids = IdGenerator::new(clock);
        for txn in &transactions {
            ids.observe(&txn.id);
        }
        info!(count = transactions.len(), "ledger hydrated");
        Self {
            transactions,
            adapter,
            ids,
            last_write_error: None,
        }
    }

    pub fn adapter(&self) -> &PersistenceAdapter {
        &self.adapter
    }

    /// Validates `amount` from raw input, then records the transaction at the
    /// head of the list. Nothing changes and nothing is written on rejection.
    pub fn add(
        &mut self,
        kind: TransactionKind,
        amount: &str,
        date: &str,
        category: &str,
    ) -> Result<Transaction, ValidationError> {
        let amount = Amount::parse(amount)?;
        Ok(self.add_amount(kind, amount, date, category))
    }

    pub fn submit(&mut self, input: &TransactionInput) -> Result<Transaction, ValidationError> {
        self.add(input.kind, &input.amount, &input.date, &input.category)
    }

    pub fn add_amount(
        &mut self,
        kind: TransactionKind,
        amount: Amount,
        date: &str,
        category: &str,
    ) -> Transaction {
        let existing = &self.transactions;
        let id = self
            .ids
            .next_id(|candidate| existing.iter().any(|txn| &txn.id == candidate));
        let txn = Transaction::new(id, kind, amount, date, category.trim());
        self.transactions.insert(0, txn.clone());
        debug!(id = %txn.id, kind = %kind, amount = %amount, "transaction added");
        self.persist();
        txn
    }

    /// Removes the transaction with `id`. An unknown id is a no-op that
    /// returns `false`; the collection is persisted either way.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id.as_str() != id);
        let removed = self.transactions.len() != before;
        if removed {
            debug!(id, "transaction removed");
        } else {
            debug!(id, "remove ignored, transaction not found");
        }
        self.persist();
        removed
    }

    /// Current collection, newest first.
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The failure of the most recent write, cleared by the next success.
    pub fn last_write_error(&self) -> Option<&PersistenceWriteError> {
        self.last_write_error.as_ref()
    }

    fn persist(&mut self) {
        match self.adapter.save_transactions(&self.transactions) {
            Ok(()) => self.last_write_error = None,
            Err(err) => {
                warn!(error = %err, "ledger write failed, in-memory state kept");
                self.last_write_error = Some(err);
            }
        }
    }
}

fn drop_duplicate_ids(loaded: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen: HashSet<TransactionId> = HashSet::with_capacity(loaded.len());
    loaded
        .into_iter()
        .filter(|txn| {
            let fresh = seen.insert(txn.id.clone());
            if !fresh {
                warn!(id = %txn.id, "dropping stored transaction with duplicate id");
            }
            fresh
        })
        .collect()
}
