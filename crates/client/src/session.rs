//! Client-side session state.
//!
//! A [`Session`] owns the ledger, the entry form and the current filter. It is
//! the only place where a collaborator response turns into a ledger entry.
//!
//! Creating a transaction happens in two steps so that a UI can keep running
//! while the request is in flight:
//!
//! 1. [`Session::begin_submit`] validates the form and returns a
//!    [`PendingCreate`]; no further submit is accepted until it completes.
//! 2. [`Session::complete_submit`] takes the collaborator's answer and either
//!    prepends the record or records the error.
//!
//! [`Session::submit`] runs both steps against the configured backend.

use api_types::transaction::{TransactionCreate, TransactionRead};
use engine::{
    Counts, Ledger, Locale, Selector, Totals, Transaction, TransactionId, TransactionKind,
    stats,
};

use crate::{
    api::TransactionBackend,
    error::{ClientError, SubmitError},
    form::EntryForm,
};

/// A create request that has been validated and handed to the collaborator.
///
/// The kind is captured when the request starts: switching the form's kind
/// while the request is pending does not change how the record is tagged.
#[derive(Debug)]
#[must_use = "a pending create must be completed"]
pub struct PendingCreate {
    payload: TransactionCreate,
    kind: TransactionKind,
}

impl PendingCreate {
    pub fn payload(&self) -> &TransactionCreate {
        &self.payload
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }
}

#[derive(Debug)]
pub struct Session<B> {
    backend: B,
    ledger: Ledger,
    pub form: EntryForm,
    selector: Selector,
    pending: bool,
    locale: Locale,
    error: Option<String>,
}

impl<B: TransactionBackend> Session<B> {
    pub fn new(backend: B) -> Self {
        Self::with_locale(backend, Locale::default())
    }

    /// A session whose error messages are written in `locale`.
    pub fn with_locale(backend: B, locale: Locale) -> Self {
        Self {
            backend,
            ledger: Ledger::new(),
            form: EntryForm::default(),
            selector: Selector::All,
            pending: false,
            locale,
            error: None,
        }
    }

    /// Validates the form, sends it and merges the response.
    ///
    /// Any failure is also recorded as the session's error message; the
    /// session stays usable afterwards.
    pub async fn submit(&mut self) -> Result<Transaction, SubmitError> {
        let pending = self.begin_submit()?;
        let result = self.backend.create_transaction(pending.payload()).await;
        self.complete_submit(pending, result)
    }

    /// First half of [`Session::submit`].
    pub fn begin_submit(&mut self) -> Result<PendingCreate, SubmitError> {
        if self.pending {
            return Err(self.fail(SubmitError::Busy));
        }
        let payload = match self.form.to_request() {
            Ok(payload) => payload,
            Err(err) => return Err(self.fail(err.into())),
        };
        self.pending = true;
        self.error = None;
        Ok(PendingCreate {
            payload,
            kind: self.form.kind,
        })
    }

    /// Second half of [`Session::submit`].
    ///
    /// On success the record is tagged with the pending kind, prepended to the
    /// ledger and the form's amount and note are cleared. On failure the
    /// ledger and the form are left exactly as they were.
    pub fn complete_submit(
        &mut self,
        pending: PendingCreate,
        result: Result<TransactionRead, ClientError>,
    ) -> Result<Transaction, SubmitError> {
        self.pending = false;

        let transaction = match result.and_then(|record| tag(record, pending.kind)) {
            Ok(transaction) => transaction,
            Err(err) => return Err(self.fail(err.into())),
        };

        tracing::info!(
            id = %transaction.id,
            kind = %transaction.kind,
            amount = %transaction.amount,
            "transaction saved"
        );
        if let Some(replaced) = self.ledger.add(transaction.clone()) {
            tracing::warn!(id = %replaced.id, "duplicate id from server, replacing stored record");
        }
        self.form.clear_after_success();
        self.error = None;
        Ok(transaction)
    }

    /// Removes a transaction. Unknown ids are ignored.
    pub fn delete(&mut self, id: &TransactionId) {
        match self.ledger.remove(id) {
            Some(removed) => tracing::info!(id = %removed.id, "transaction removed"),
            None => tracing::debug!(%id, "remove of unknown id ignored"),
        }
    }

    pub fn set_kind(&mut self, kind: TransactionKind) {
        self.form.set_kind(kind);
    }

    pub fn set_selector(&mut self, selector: Selector) {
        self.selector = selector;
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// The ledger filtered by the current selector, most recent first.
    pub fn visible(&self) -> Vec<&Transaction> {
        stats::filter(&self.ledger, self.selector)
    }

    pub fn totals(&self) -> Totals {
        stats::aggregate(&self.ledger)
    }

    pub fn counts(&self) -> Counts {
        stats::counts(&self.ledger)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Last user-visible error, cleared by the next successful submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn fail(&mut self, err: SubmitError) -> SubmitError {
        tracing::warn!("submit failed: {err}");
        self.error = Some(err.message(self.locale));
        err
    }
}

/// Attaches the submitted kind to a canonical record.
fn tag(record: TransactionRead, kind: TransactionKind) -> Result<Transaction, ClientError> {
    let malformed = |err: engine::EngineError| ClientError::MalformedResponse(err.to_string());
    let id = TransactionId::new(record.id).map_err(malformed)?;
    Transaction::new(
        id,
        kind,
        record.amount_minor.into(),
        &record.category,
        record.note.as_deref(),
        record.created_at,
    )
    .map_err(malformed)
}
