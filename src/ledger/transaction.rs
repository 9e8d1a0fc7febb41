use std::fmt;

use serde::{Deserialize, Serialize};

use super::money::{Amount, Money};

/// Direction of a transaction. Serialized as the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Maps a form token to a kind. Anything other than `income` is an expense.
    pub fn from_token(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("income") {
            Self::Income
        } else {
            Self::Expense
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Display label used when a transaction has no category.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub fn indicator(self) -> char {
        match self {
            Self::Income => '+',
            Self::Expense => '−',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque, unique identifier assigned at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for TransactionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Amount,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        kind: TransactionKind,
        amount: Amount,
        date: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            amount,
            date: date.into(),
            category: category.into(),
        }
    }

    /// Category, or the kind's label when the category is empty.
    pub fn label(&self) -> &str {
        if self.category.is_empty() {
            self.kind.label()
        } else {
            &self.category
        }
    }

    /// Amount with the direction applied: negative for expenses.
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount.money(),
            TransactionKind::Expense => -self.amount.money(),
        }
    }
}

/// Raw submission coming from a form collaborator. The amount is validated by
/// the store, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    pub kind: TransactionKind,
    pub amount: String,
    pub date: String,
    pub category: String,
}

impl TransactionInput {
    pub fn new(
        kind_token: &str,
        amount: impl Into<String>,
        date: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            kind: TransactionKind::from_token(kind_token),
            amount: amount.into(),
            date: date.into(),
            category: category.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(category: &str) -> Transaction {
        Transaction::new(
            TransactionId::new("1700000000000"),
            TransactionKind::Expense,
            Amount::from_minor(4_000).unwrap(),
            "2024-01-02",
            category,
        )
    }

    #[test]
    fn serializes_with_storage_field_names() {
        let json = serde_json::to_value(sample("Groceries")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1700000000000",
                "type": "expense",
                "amount": 40.0,
                "date": "2024-01-02",
                "category": "Groceries"
            })
        );
    }

    #[test]
    fn unknown_type_token_is_rejected_on_load() {
        let raw = r#"{"id":"1","type":"transfer","amount":1,"date":"","category":""}"#;
        assert!(serde_json::from_str::<Transaction>(raw).is_err());
    }

    #[test]
    fn empty_category_falls_back_to_kind_label() {
        assert_eq!(sample("").label(), "Expense");
        assert_eq!(sample("Rent").label(), "Rent");
        assert_eq!(sample("").signed_amount(), Money::from_minor(-4_000));
    }

    #[test]
    fn kind_tokens_default_to_expense() {
        assert_eq!(TransactionKind::from_token("Income"), TransactionKind::Income);
        assert_eq!(TransactionKind::from_token("expense"), TransactionKind::Expense);
        assert_eq!(TransactionKind::from_token("other"), TransactionKind::Expense);
    }
}
