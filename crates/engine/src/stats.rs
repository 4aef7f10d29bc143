//! Totals and filtered views over a sequence of transactions.
//!
//! Everything here is a pure function of its input. Nothing is cached: callers
//! pass the current ledger on every read, so a view can never go stale after
//! an `add` or `remove`.

use std::fmt;

use crate::{EngineError, MoneyCents, Transaction, TransactionKind};

/// Summed amounts per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: MoneyCents,
    pub expense: MoneyCents,
}

impl Totals {
    /// `income - expense`. Derived, never stored.
    #[must_use]
    pub fn balance(&self) -> MoneyCents {
        self.income - self.expense
    }
}

/// Per-tab counts for the filter selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub all: usize,
    pub income: usize,
    pub expense: usize,
}

/// Criterion used to produce a view of the ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selector {
    #[default]
    All,
    Kind(TransactionKind),
}

impl Selector {
    pub fn matches(self, transaction: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Kind(kind) => transaction.kind == kind,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Kind(kind) => kind.as_str(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Selector {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        TransactionKind::try_from(value).map(Self::Kind)
    }
}

impl From<TransactionKind> for Selector {
    fn from(kind: TransactionKind) -> Self {
        Self::Kind(kind)
    }
}

/// Sums amounts by kind.
///
/// Each transaction lands in exactly one bucket: income goes to `income`,
/// everything else to `expense`. Records decoded without a recognised type
/// already carry [`TransactionKind::Expense`] (see
/// [`TransactionKind::from_tag`]), so they are summed as expenses too.
///
/// Sums saturate at the `i64` bounds instead of overflowing.
pub fn aggregate<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(Totals::default(), |mut totals, tx| {
            let bucket = match tx.kind {
                TransactionKind::Income => &mut totals.income,
                TransactionKind::Expense => &mut totals.expense,
            };
            *bucket = bucket.saturating_add(tx.amount);
            totals
        })
}

/// Order-preserving subsequence matching `selector`.
pub fn filter<'a, I>(transactions: I, selector: Selector) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|tx| selector.matches(tx))
        .collect()
}

/// Number of transactions of `kind`. Always equals `filter(.., kind).len()`.
pub fn count_by_kind<'a, I>(transactions: I, kind: TransactionKind) -> usize
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|tx| tx.kind == kind)
        .count()
}

/// Counts for all three filter tabs in one pass.
pub fn counts<'a, I>(transactions: I) -> Counts
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(Counts::default(), |mut counts, tx| {
            counts.all += 1;
            match tx.kind {
                TransactionKind::Income => counts.income += 1,
                TransactionKind::Expense => counts.expense += 1,
            }
            counts
        })
}
