//! Session ledger.
//!
//! The ledger is the single owner of the session's transactions. It keeps no
//! derived state: totals and filtered views are computed from [`Ledger::list`]
//! every time they are read (see [`crate::stats`]).

use crate::{Transaction, TransactionId};

/// Ordered transactions for the current session, most recent first.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    // Stored oldest → newest so that `add` is a push; `list` reverses.
    items: Vec<Transaction>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends `transaction`.
    ///
    /// Never fails. Ids stay unique: if a transaction with the same id is
    /// already stored it is dropped and returned, and the new record takes the
    /// most recent position.
    pub fn add(&mut self, transaction: Transaction) -> Option<Transaction> {
        let replaced = self.take(&transaction.id);
        self.items.push(transaction);
        replaced
    }

    /// Removes the transaction with `id`, if present.
    ///
    /// Removing an id that is not stored is a no-op and returns `None`.
    pub fn remove(&mut self, id: &TransactionId) -> Option<Transaction> {
        self.take(id)
    }

    /// Transactions in most-recent-first order.
    pub fn list(&self) -> impl DoubleEndedIterator<Item = &Transaction> + ExactSizeIterator {
        self.items.iter().rev()
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.items.iter().find(|tx| &tx.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn take(&mut self, id: &TransactionId) -> Option<Transaction> {
        let index = self.items.iter().position(|tx| &tx.id == id)?;
        Some(self.items.remove(index))
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::iter::Rev<std::slice::Iter<'a, Transaction>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().rev()
    }
}
