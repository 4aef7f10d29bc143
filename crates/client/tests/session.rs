use std::sync::Mutex;

use api_types::transaction::{TransactionCreate, TransactionRead};
use chrono::Utc;
use client::{ClientError, Session, SubmitError, TransactionBackend};
use engine::{Locale, MoneyCents, Selector, TransactionId, TransactionKind};
use reqwest::StatusCode;

/// In-memory collaborator: assigns sequential ids, or fails with `status`.
#[derive(Default)]
struct FakeBackend {
    status: Option<StatusCode>,
    requests: Mutex<Vec<TransactionCreate>>,
}

impl FakeBackend {
    fn failing(status: StatusCode) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    fn requests(&self) -> Vec<TransactionCreate> {
        self.requests.lock().unwrap().clone()
    }
}

impl TransactionBackend for FakeBackend {
    async fn create_transaction(
        &self,
        payload: &TransactionCreate,
    ) -> Result<TransactionRead, ClientError> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(payload.clone());
        if let Some(status) = self.status {
            return Err(ClientError::Server {
                status,
                message: None,
            });
        }
        Ok(TransactionRead {
            id: format!("tx-{}", requests.len()),
            amount_minor: payload.amount_minor,
            category: payload.category.clone(),
            note: payload.note.clone(),
            created_at: Utc::now(),
        })
    }
}

fn fill(session: &mut Session<FakeBackend>, kind: TransactionKind, amount: &str, note: &str) {
    session.set_kind(kind);
    session.form.amount = amount.to_string();
    session.form.note = note.to_string();
}

#[tokio::test]
async fn submit_tags_kind_and_prepends() {
    let mut session = Session::new(FakeBackend::default());

    fill(&mut session, TransactionKind::Expense, "50", "午饭");
    let first = session.submit().await.unwrap();
    assert_eq!(first.kind, TransactionKind::Expense);
    assert_eq!(first.category, "餐饮");
    assert_eq!(first.note.as_deref(), Some("午饭"));

    fill(&mut session, TransactionKind::Income, "1000", "");
    let second = session.submit().await.unwrap();
    assert_eq!(second.kind, TransactionKind::Income);
    assert_eq!(second.category, "工资");

    let ids: Vec<_> = session.ledger().list().map(|tx| tx.id.as_str()).collect();
    assert_eq!(ids, ["tx-2", "tx-1"]);

    let totals = session.totals();
    assert_eq!(totals.income, MoneyCents::new(100_000));
    assert_eq!(totals.expense, MoneyCents::new(5_000));
    assert_eq!(totals.balance(), MoneyCents::new(95_000));

    let counts = session.counts();
    assert_eq!((counts.all, counts.income, counts.expense), (2, 1, 1));

    // The request never carries the kind and sends `null` for an empty note.
    let requests = session.backend().requests();
    assert_eq!(requests[1].note, None);
    assert_eq!(requests[1].amount_minor, 100_000);
}

#[tokio::test]
async fn success_clears_amount_and_note_only() {
    let mut session = Session::new(FakeBackend::default());
    fill(&mut session, TransactionKind::Income, "20", "红包");
    session.form.category = "奖金".to_string();

    session.submit().await.unwrap();

    assert_eq!(session.form.amount, "");
    assert_eq!(session.form.note, "");
    assert_eq!(session.form.kind, TransactionKind::Income);
    assert_eq!(session.form.category, "奖金");
    assert_eq!(session.error(), None);
}

#[tokio::test]
async fn server_failure_keeps_ledger_and_form() {
    let mut session = Session::new(FakeBackend::failing(StatusCode::INTERNAL_SERVER_ERROR));
    fill(&mut session, TransactionKind::Expense, "12.50", "taxi");

    let err = session.submit().await.unwrap_err();
    assert!(matches!(err, SubmitError::Transport(ClientError::Server { .. })));
    assert!(session.ledger().is_empty());
    assert_eq!(session.error(), Some("request failed: 500"));
    assert_eq!(session.form.amount, "12.50");
    assert_eq!(session.form.note, "taxi");
    assert!(!session.is_pending());

    // The session is still usable and the form can be resubmitted.
    assert!(session.begin_submit().is_ok());
}

#[tokio::test]
async fn errors_follow_the_session_locale() {
    let mut session = Session::with_locale(
        FakeBackend::failing(StatusCode::SERVICE_UNAVAILABLE),
        Locale::Zh,
    );
    fill(&mut session, TransactionKind::Income, "1000", "");
    session.submit().await.unwrap_err();
    assert_eq!(session.error(), Some("请求失败：503"));

    session.form.amount = "0".to_string();
    session.submit().await.unwrap_err();
    assert!(session.error().unwrap().starts_with("输入无效："));
}

#[tokio::test]
async fn invalid_amount_is_never_sent() {
    let mut session = Session::new(FakeBackend::default());

    for amount in ["", "0", "-5", "abc", "1.001"] {
        fill(&mut session, TransactionKind::Expense, amount, "");
        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, SubmitError::Validation(_)), "{amount:?}");
        assert!(session.error().is_some());
    }
    assert!(session.backend().requests().is_empty());
    assert!(session.ledger().is_empty());
}

#[test]
fn only_one_create_in_flight() {
    let mut session = Session::new(FakeBackend::default());
    fill(&mut session, TransactionKind::Expense, "3", "");

    let pending = session.begin_submit().unwrap();
    assert!(session.is_pending());
    assert!(matches!(session.begin_submit(), Err(SubmitError::Busy)));

    // Switching kind mid-flight does not change the tag.
    session.set_kind(TransactionKind::Income);
    let record = TransactionRead {
        id: "srv-1".to_string(),
        amount_minor: pending.payload().amount_minor,
        category: pending.payload().category.clone(),
        note: None,
        created_at: Utc::now(),
    };
    let saved = session.complete_submit(pending, Ok(record)).unwrap();
    assert_eq!(saved.kind, TransactionKind::Expense);
    assert!(!session.is_pending());
}

#[test]
fn malformed_record_is_a_transport_failure() {
    let mut session = Session::new(FakeBackend::default());
    fill(&mut session, TransactionKind::Expense, "3", "");

    let pending = session.begin_submit().unwrap();
    let record = TransactionRead {
        id: "srv-1".to_string(),
        amount_minor: 0,
        category: "餐饮".to_string(),
        note: None,
        created_at: Utc::now(),
    };
    let err = session.complete_submit(pending, Ok(record)).unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Transport(ClientError::MalformedResponse(_))
    ));
    assert!(session.ledger().is_empty());
    assert_eq!(session.form.amount, "3");
}

#[tokio::test]
async fn delete_and_filter() {
    let mut session = Session::new(FakeBackend::default());
    fill(&mut session, TransactionKind::Expense, "50", "");
    session.submit().await.unwrap();
    fill(&mut session, TransactionKind::Income, "1000", "");
    session.submit().await.unwrap();

    session.set_selector(Selector::Kind(TransactionKind::Income));
    let visible: Vec<_> = session.visible().iter().map(|tx| tx.id.as_str()).collect();
    assert_eq!(visible, ["tx-2"]);

    let id = TransactionId::new("tx-2").unwrap();
    session.delete(&id);
    session.delete(&id);
    assert!(session.visible().is_empty());
    assert_eq!(session.totals().income, MoneyCents::ZERO);

    session.set_selector(Selector::All);
    assert_eq!(session.visible().len(), 1);
}
