//! Error types for `roster-core`.

use thiserror::Error;

use crate::api::ApiError;

/// Errors raised by the in-memory [`crate::api::RosterApi`] implementation.
#[derive(Debug, Error)]
pub enum Error {
  #[error("client group not found: {0}")]
  UnknownGroup(String),

  #[error("request rejected by server")]
  Rejected { detail: Option<String> },
}

impl ApiError for Error {
  fn detail(&self) -> Option<&str> {
    match self {
      Self::Rejected { detail } => detail.as_deref(),
      Self::UnknownGroup(_) => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
