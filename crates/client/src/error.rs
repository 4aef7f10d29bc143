use engine::{EngineError, Locale};
use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the persistence API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request failed: {}", .status.as_u16())]
    Server {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// HTTP status of a non-success response, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Everything that can go wrong at the submission boundary.
///
/// `Display` is the English form used in logs; [`SubmitError::message`] is
/// what the user sees.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("invalid input: {0}")]
    Validation(#[from] EngineError),
    #[error("a transaction is already being saved")]
    Busy,
    #[error(transparent)]
    Transport(#[from] ClientError),
}

impl SubmitError {
    /// User-facing message in `locale`. A server error carries the detail from
    /// the response body when there is one.
    pub fn message(&self, locale: Locale) -> String {
        match (self, locale) {
            (Self::Transport(ClientError::Server { status, message }), _) => {
                let status = status.as_u16();
                match (locale, message) {
                    (Locale::En, None) => format!("request failed: {status}"),
                    (Locale::En, Some(detail)) => format!("request failed: {status} ({detail})"),
                    (Locale::Zh, None) => format!("请求失败：{status}"),
                    (Locale::Zh, Some(detail)) => format!("请求失败：{status}（{detail}）"),
                }
            }
            (_, Locale::En) => self.to_string(),
            (Self::Validation(err), Locale::Zh) => format!("输入无效：{err}"),
            (Self::Busy, Locale::Zh) => "正在保存，请稍候".to_string(),
            (Self::Transport(ClientError::Network(err)), Locale::Zh) => format!("网络错误：{err}"),
            (Self::Transport(ClientError::MalformedResponse(detail)), Locale::Zh) => {
                format!("响应无效：{detail}")
            }
            (Self::Transport(ClientError::InvalidBaseUrl(url)), Locale::Zh) => {
                format!("base_url 无效：{url}")
            }
        }
    }
}
