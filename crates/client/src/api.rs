use std::{future::Future, time::Duration};

use api_types::transaction::{TransactionCreate, TransactionRead};
use reqwest::Url;
use serde::{Deserialize, de::DeserializeOwned};

use crate::error::ClientError;

/// The persistence collaborator: stores a new transaction and returns the
/// canonical record.
pub trait TransactionBackend {
    fn create_transaction(
        &self,
        payload: &TransactionCreate,
    ) -> impl Future<Output = Result<TransactionRead, ClientError>> + Send;
}

/// Error payloads we know how to read: `{"error": ".."}` or FastAPI's
/// `{"detail": ..}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    fn message(self) -> Option<String> {
        self.error.or_else(|| {
            self.detail.map(|detail| match detail {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            })
        })
    }
}

/// HTTP client for the transactions API.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// `base_url` is the API root, e.g. `http://127.0.0.1:8000/api`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        // `Url::join` drops the last segment unless the base ends with '/'.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post_json<TReq, TResp>(&self, path: &str, body: &TReq) -> Result<TResp, ClientError>
    where
        TReq: serde::Serialize + ?Sized,
        TResp: DeserializeOwned,
    {
        let endpoint = self
            .base_url
            .join(path)
            .map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))?;

        tracing::debug!(%endpoint, "POST");
        let res = self.http.post(endpoint).json(body).send().await?;
        let status = res.status();
        let text = res.text().await?;

        if status.is_success() {
            return serde_json::from_str(&text)
                .map_err(|err| ClientError::MalformedResponse(err.to_string()));
        }

        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::message);
        Err(ClientError::Server { status, message })
    }
}

impl TransactionBackend for Client {
    async fn create_transaction(
        &self,
        payload: &TransactionCreate,
    ) -> Result<TransactionRead, ClientError> {
        self.post_json("transactions", payload).await
    }
}
