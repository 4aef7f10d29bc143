use api_types::transaction::TransactionCreate;
use engine::{EngineError, NewTransaction, TransactionKind, categories};

/// Raw values of the entry form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    pub kind: TransactionKind,
    pub amount: String,
    pub category: String,
    pub note: String,
}

impl Default for EntryForm {
    fn default() -> Self {
        let kind = TransactionKind::Expense;
        Self {
            kind,
            amount: String::new(),
            category: categories::default_for(kind).to_string(),
            note: String::new(),
        }
    }
}

impl EntryForm {
    /// Switches the kind and resets the category to the first suggestion
    /// for it. Selecting the current kind again leaves the form untouched.
    pub fn set_kind(&mut self, kind: TransactionKind) {
        if self.kind == kind {
            return;
        }
        self.kind = kind;
        self.category = categories::default_for(kind).to_string();
    }

    /// Validates the form into a create request.
    pub fn to_request(&self) -> Result<TransactionCreate, EngineError> {
        let draft = NewTransaction::parse(&self.amount, &self.category, &self.note)?;
        Ok(TransactionCreate {
            amount_minor: draft.amount.cents(),
            category: draft.category,
            note: draft.note,
        })
    }

    /// Clears amount and note after a successful save. Kind and category
    /// stay selected for the next entry.
    pub fn clear_after_success(&mut self) {
        self.amount.clear();
        self.note.clear();
    }
}
