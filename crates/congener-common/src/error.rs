use thiserror::Error;

#[derive(Debug, Error)]
pub enum CongenerError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Table error: {0}")]
    Table(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export error: {0}")]
    Export(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CongenerError>;
