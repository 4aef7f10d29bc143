//! Transaction primitives.
//!
//! A `Transaction` is the canonical record returned by the persistence
//! collaborator, tagged on the client with the [`TransactionKind`] that was
//! selected when it was submitted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{EngineError, MoneyCents, ResultEngine};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Classifies a raw type tag, falling back to [`TransactionKind::Expense`]
    /// when the tag is missing or unrecognised.
    ///
    /// The fallback mirrors how the ledger has always summed untyped records.
    /// It may hide a categorisation bug upstream, so callers that can reject
    /// bad input should prefer [`TryFrom<&str>`].
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        tag.and_then(|tag| Self::try_from(tag).ok())
            .unwrap_or(Self::Expense)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidKind(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_tag(tag.as_deref()))
    }
}

/// Opaque identifier assigned by the persistence collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> ResultEngine<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EngineError::InvalidId("empty transaction id".to_string()));
        }
        Ok(Self(id))
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

/// Validated input of a create request, built before anything leaves the
/// client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTransaction {
    pub amount: MoneyCents,
    pub category: String,
    pub note: Option<String>,
}

impl NewTransaction {
    /// Validates raw form input.
    ///
    /// - `amount` must parse as a decimal with at most 2 fraction digits and
    ///   be > 0
    /// - `category` must not be blank (it is trimmed)
    /// - a blank `note` becomes `None`
    pub fn parse(amount: &str, category: &str, note: &str) -> ResultEngine<Self> {
        let amount = MoneyCents::parse_positive(amount)?;
        Ok(Self {
            amount,
            category: normalize_category(category)?,
            note: normalize_note(Some(note)),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
    pub amount: MoneyCents,
    pub category: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds a stored transaction from a canonical record and the kind chosen
    /// at submission time.
    ///
    /// The record is re-validated: a collaborator returning a non-positive
    /// amount or a blank category produces an error instead of a ledger entry.
    pub fn new(
        id: TransactionId,
        kind: TransactionKind,
        amount: MoneyCents,
        category: &str,
        note: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        Ok(Self {
            id,
            kind,
            amount: amount.ensure_positive()?,
            category: normalize_category(category)?,
            note: normalize_note(note),
            created_at,
        })
    }

    /// Signed contribution to the balance: `+amount` for income, `-amount`
    /// for expense.
    #[must_use]
    pub fn signed_amount(&self) -> MoneyCents {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => MoneyCents::ZERO - self.amount,
        }
    }
}

fn normalize_category(category: &str) -> ResultEngine<String> {
    let category = category.trim();
    if category.is_empty() {
        return Err(EngineError::InvalidCategory(
            "category must not be empty".to_string(),
        ));
    }
    Ok(category.to_string())
}

fn normalize_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|note| !note.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn new_transaction_parses_form_input() {
        let draft = NewTransaction::parse("50", " 餐饮 ", "").unwrap();
        assert_eq!(draft.amount, MoneyCents::new(5000));
        assert_eq!(draft.category, "餐饮");
        assert_eq!(draft.note, None);
    }

    #[test]
    fn new_transaction_rejects_invalid_amounts() {
        for amount in ["", "abc", "0", "-3", "1.234"] {
            let err = NewTransaction::parse(amount, "餐饮", "").unwrap_err();
            assert!(matches!(err, EngineError::InvalidAmount(_)), "{amount:?}");
        }
    }

    #[test]
    fn new_transaction_rejects_blank_category() {
        let err = NewTransaction::parse("5", "   ", "").unwrap_err();
        assert!(matches!(err, EngineError::InvalidCategory(_)));
    }

    #[test]
    fn transaction_rejects_non_positive_record() {
        let id = TransactionId::new("tx-1").unwrap();
        let res = Transaction::new(
            id,
            TransactionKind::Income,
            MoneyCents::ZERO,
            "工资",
            None,
            created_at(),
        );
        assert!(res.is_err());
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(TransactionId::new("").is_err());
        assert!(TransactionId::new("  ").is_err());
    }

    #[test]
    fn signed_amount_follows_kind() {
        let income = Transaction::new(
            TransactionId::new("a").unwrap(),
            TransactionKind::Income,
            MoneyCents::new(100),
            "工资",
            Some("  "),
            created_at(),
        )
        .unwrap();
        assert_eq!(income.signed_amount(), MoneyCents::new(100));
        assert_eq!(income.note, None);

        let expense = Transaction {
            kind: TransactionKind::Expense,
            ..income
        };
        assert_eq!(expense.signed_amount(), MoneyCents::new(-100));
    }

    #[test]
    fn kind_parse_reports_invalid_kind() {
        assert_eq!(TransactionKind::try_from(" Expense ").unwrap(), TransactionKind::Expense);
        assert_eq!(
            TransactionKind::try_from("Transfer"),
            Err(EngineError::InvalidKind("transfer".to_string()))
        );
    }

    #[test]
    fn kind_tag_falls_back_to_expense() {
        assert_eq!(TransactionKind::from_tag(Some("income")), TransactionKind::Income);
        assert_eq!(TransactionKind::from_tag(Some("INCOME")), TransactionKind::Income);
        assert_eq!(TransactionKind::from_tag(Some("transfer")), TransactionKind::Expense);
        assert_eq!(TransactionKind::from_tag(None), TransactionKind::Expense);
        assert!(TransactionKind::try_from("transfer").is_err());
    }

    #[test]
    fn untyped_record_deserializes_as_expense() {
        let raw = r#"{"id":"x","amount":500,"category":"餐饮","note":null,"created_at":"2024-05-01T12:00:00Z"}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.kind, TransactionKind::Expense);

        let raw = r#"{"id":"y","type":"bonus","amount":500,"category":"奖金","note":null,"created_at":"2024-05-01T12:00:00Z"}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.kind, TransactionKind::Expense);
    }
}
