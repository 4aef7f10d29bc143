//! Client side of the tracker: the HTTP collaborator and the session that
//! merges its responses into the local [`engine::Ledger`].

pub use api::{Client, TransactionBackend};
pub use error::{ClientError, SubmitError};
pub use form::EntryForm;
pub use session::{PendingCreate, Session};

mod api;
mod error;
mod form;
mod session;
