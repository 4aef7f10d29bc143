//! Labels rendered next to each transaction.
//!
//! Nothing here is stored: labels are computed at render time from the
//! record and an explicit `now`, so the same inputs always give the same text.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::{EngineError, Transaction, TransactionKind};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Language of the generated labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl TryFrom<&str> for Locale {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "zh" => Ok(Self::Zh),
            other => Err(EngineError::InvalidLocale(other.to_string())),
        }
    }
}

/// Coarse age of a timestamp relative to `now`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayAge {
    Today,
    Yesterday,
    DaysAgo(i64),
    Older,
}

impl DayAge {
    /// Buckets the whole-day difference `floor((now - created_at) / 1 day)`.
    ///
    /// A timestamp in the future (clock skew between client and server)
    /// counts as today.
    #[must_use]
    pub fn between(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        match whole_days(now - created_at) {
            ..=0 => Self::Today,
            1 => Self::Yesterday,
            days @ 2..=6 => Self::DaysAgo(days),
            _ => Self::Older,
        }
    }
}

fn whole_days(elapsed: TimeDelta) -> i64 {
    elapsed.num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// Renders timestamps and amounts for a given locale and time zone.
#[derive(Clone, Copy, Debug)]
pub struct Formatter {
    locale: Locale,
    timezone: Tz,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(Locale::default(), Tz::UTC)
    }
}

impl Formatter {
    #[must_use]
    pub fn new(locale: Locale, timezone: Tz) -> Self {
        Self { locale, timezone }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// "today", "yesterday", "N days ago", or a short month/day label.
    ///
    /// The day difference is computed on elapsed time; only the month/day
    /// label depends on the configured time zone.
    #[must_use]
    pub fn created_label(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
        match (DayAge::between(created_at, now), self.locale) {
            (DayAge::Today, Locale::En) => "today".to_string(),
            (DayAge::Today, Locale::Zh) => "今天".to_string(),
            (DayAge::Yesterday, Locale::En) => "yesterday".to_string(),
            (DayAge::Yesterday, Locale::Zh) => "昨天".to_string(),
            (DayAge::DaysAgo(days), Locale::En) => format!("{days} days ago"),
            (DayAge::DaysAgo(days), Locale::Zh) => format!("{days}天前"),
            (DayAge::Older, locale) => {
                let local = created_at.with_timezone(&self.timezone);
                let pattern = match locale {
                    Locale::En => "%b %-d",
                    Locale::Zh => "%-m月%-d日",
                };
                local.format(pattern).to_string()
            }
        }
    }

    /// Amount with the direction made explicit, e.g. `+1000.00` or `-50.00`.
    #[must_use]
    pub fn signed_amount(&self, transaction: &Transaction) -> String {
        let sign = match transaction.kind {
            TransactionKind::Income => "+",
            TransactionKind::Expense => "-",
        };
        format!("{sign}{}", transaction.amount)
    }

    #[must_use]
    pub fn kind_label(&self, kind: TransactionKind) -> &'static str {
        match (kind, self.locale) {
            (TransactionKind::Income, Locale::En) => "income",
            (TransactionKind::Income, Locale::Zh) => "收入",
            (TransactionKind::Expense, Locale::En) => "expense",
            (TransactionKind::Expense, Locale::Zh) => "支出",
        }
    }

    /// One list row: label, kind, signed amount, category and note.
    #[must_use]
    pub fn row<'a>(&'a self, transaction: &'a Transaction, now: DateTime<Utc>) -> Row<'a> {
        Row {
            formatter: self,
            transaction,
            now,
        }
    }
}

/// Lazily formatted list row, see [`Formatter::row`].
pub struct Row<'a> {
    formatter: &'a Formatter,
    transaction: &'a Transaction,
    now: DateTime<Utc>,
}

impl fmt::Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tx = self.transaction;
        let date = self.formatter.created_label(tx.created_at, self.now);
        let amount = self.formatter.signed_amount(tx);
        write!(
            f,
            "{date:<12} {:<8} {amount:>12}  {}",
            self.formatter.kind_label(tx.kind),
            tx.category
        )?;
        if let Some(note) = &tx.note {
            write!(f, "  {note}")?;
        }
        write!(f, "  [{}]", tx.id)
    }
}
