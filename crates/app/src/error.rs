use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid timezone: {0}")]
    Timezone(String),
    #[error("client error: {0}")]
    Client(#[from] client::ClientError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
