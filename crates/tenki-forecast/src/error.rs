//! Forecast-specific error types.

use std::path::PathBuf;

use tenki_core::error::{ReqwestErrorExt, RusqliteErrorExt};
use tenki_core::{AppError, DatabaseError, NetworkError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Malformed forecast payload: {0}")]
    UpstreamFormat(#[from] serde_json::Error),

    #[error("Forecast payload is missing {0}")]
    UpstreamShape(&'static str),

    #[error("Persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("Failed to prepare cache directory {path}: {source}")]
    StoragePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ForecastError {
    /// Whether the query façade should fall back to cached records.
    ///
    /// Upstream failures are recoverable; anything touching the store is not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::UpstreamStatus { .. }
                | Self::UpstreamFormat(_)
                | Self::UpstreamShape(_)
        )
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Network error. Check your connection.".to_string(),
            Self::UpstreamStatus { status, .. } => {
                format!("Forecast service returned an error ({}).", status)
            }
            Self::UpstreamFormat(_) | Self::UpstreamShape(_) => {
                "Forecast service returned unexpected data.".to_string()
            }
            Self::Persistence(_) | Self::StoragePath { .. } | Self::Task(_) => {
                "Local forecast cache error".to_string()
            }
        }
    }
}

impl From<ForecastError> for AppError {
    fn from(err: ForecastError) -> Self {
        match err {
            ForecastError::Network(e) => AppError::Network(e.into_network_error()),
            ForecastError::UpstreamStatus { status, url } => {
                AppError::Network(NetworkError::ServerError {
                    status,
                    message: url,
                })
            }
            ForecastError::UpstreamFormat(e) => {
                AppError::Network(NetworkError::InvalidResponse(e.to_string()))
            }
            ForecastError::Persistence(e) => AppError::Database(e.into_database_error()),
            ForecastError::StoragePath { path, source } => AppError::Database(
                DatabaseError::ConnectionFailed(format!("{}: {}", path.display(), source)),
            ),
            other @ (ForecastError::UpstreamShape(_) | ForecastError::Task(_)) => {
                AppError::Forecast(other.to_string())
            }
        }
    }
}
