//! In-memory ledger for a personal income/expense tracker.
//!
//! The crate is synchronous and free of I/O: a [`Ledger`] holds the session's
//! transactions, [`stats`] derives totals and filtered views from it and
//! [`display`] turns records into labels. Talking to the persistence
//! collaborator is the job of the `client` crate.

pub use display::{DayAge, Formatter, Locale};
pub use error::EngineError;
pub use ledger::Ledger;
pub use money::MoneyCents;
pub use stats::{Counts, Selector, Totals};
pub use transactions::{NewTransaction, Transaction, TransactionId, TransactionKind};

pub mod categories;
pub mod display;
mod error;
mod ledger;
mod money;
pub mod stats;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
