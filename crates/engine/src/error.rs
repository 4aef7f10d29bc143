//! The module contains the errors the ledger can raise.
//!
//! Every variant is a validation failure: the ledger itself never fails on
//! `add` or `remove`, so the only errors come from turning user input, a
//! setting or a collaborator record into a [`Transaction`] or a label.
//!
//!  [`Transaction`]: super::Transaction
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Invalid transaction kind: {0}")]
    InvalidKind(String),
    #[error("Unsupported locale: {0}")]
    InvalidLocale(String),
}
