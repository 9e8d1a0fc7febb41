use chrono::Utc;

use super::transaction::TransactionId;

/// Millisecond time source used to mint transaction ids.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Mints creation-timestamp ids that never repeat, even when the clock does
/// not advance between calls.
pub struct IdGenerator {
    clock: Box<dyn Clock>,
    last: i64,
    overflow: u64,
}

impl IdGenerator {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            last: i64::MIN,
            overflow: 0,
        }
    }

    /// Records an existing id so later ids sort after it.
    pub fn observe(&mut self, id: &TransactionId) {
        if let Ok(value) = id.as_str().parse::<i64>() {
            self.last = self.last.max(value);
        }
    }

    /// Returns a fresh id for which `taken` is false.
    ///
    /// Once the numeric range is exhausted, ids become `<now>-<n>` tokens.
    pub fn next_id(&mut self, taken: impl Fn(&TransactionId) -> bool) -> TransactionId {
        let now = self.clock.now_millis();
        let mut next = self.last.checked_add(1).map(|after| now.max(after));
        while let Some(candidate) = next {
            let id = TransactionId::new(candidate.to_string());
            if !taken(&id) {
                self.last = candidate;
                return id;
            }
            next = candidate.checked_add(1);
        }
        self.last = i64::MAX;
        loop {
            self.overflow += 1;
            let id = TransactionId::new(format!("{}-{}", now, self.overflow));
            if !taken(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_clock_still_yields_distinct_ids() {
        let mut ids = IdGenerator::new(Box::new(FixedClock(1_000)));
        let first = ids.next_id(|_| false);
        let second = ids.next_id(|_| false);
        assert_eq!(first.as_str(), "1000");
        assert_eq!(second.as_str(), "1001");
    }

    #[test]
    fn observed_ids_are_never_reissued() {
        let mut ids = IdGenerator::new(Box::new(FixedClock(1_000)));
        ids.observe(&TransactionId::new("5000"));
        ids.observe(&TransactionId::new("legacy-id"));
        assert_eq!(ids.next_id(|_| false).as_str(), "5001");
    }

    #[test]
    fn taken_ids_are_skipped() {
        let mut ids = IdGenerator::new(Box::new(FixedClock(7)));
        let id = ids.next_id(|candidate| candidate.as_str() == "7");
        assert_eq!(id.as_str(), "8");
    }

    #[test]
    fn exhausted_numeric_range_falls_back_to_suffixed_ids() {
        let mut ids = IdGenerator::new(Box::new(FixedClock(1_000)));
        ids.observe(&TransactionId::new(i64::MAX.to_string()));
        let first = ids.next_id(|id| id.as_str() == "9223372036854775807");
        assert_eq!(first.as_str(), "1000-1");
        let second = ids.next_id(|id| id.as_str() == "1000-2");
        assert_eq!(second.as_str(), "1000-3");
    }

    #[test]
    fn last_numeric_id_is_still_issued() {
        let mut ids = IdGenerator::new(Box::new(FixedClock(1_000)));
        ids.observe(&TransactionId::new((i64::MAX - 1).to_string()));
        assert_eq!(ids.next_id(|_| false).as_str(), "9223372036854775807");
        assert_eq!(ids.next_id(|_| false).as_str(), "1000-1");
    }
}
