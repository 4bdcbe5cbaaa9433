//! Error types for the generation pipeline and the problem store.
//!
//! Generation errors never reach a caller: the generator converts every one of
//! them into a fallback problem. They exist so the logs say what went wrong.

use thiserror::Error;

use crate::store::ProblemId;

/// Why a model-generated problem was discarded.
#[derive(Debug, Error)]
pub enum GenerationError {
  /// The API answered with a non-success status.
  #[error("OpenAI HTTP {status}: {message}")]
  Http { status: u16, message: String },

  /// Connection, TLS or body-decoding failure.
  #[error("network error: {0}")]
  Network(String),

  /// The request exceeded the client timeout.
  #[error("request timed out")]
  Timeout,

  /// The completion carried no text.
  #[error("empty completion")]
  EmptyCompletion,

  /// The sanitized text is not a JSON object.
  #[error("malformed problem payload: {0}")]
  Malformed(String),

  #[error("problem payload is missing `{0}`")]
  MissingField(&'static str),

  #[error("answer is not numeric: {0}")]
  NonNumericAnswer(String),
}

impl From<reqwest::Error> for GenerationError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_timeout() {
      GenerationError::Timeout
    } else {
      GenerationError::Network(e.to_string())
    }
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
  #[error("unknown problem id {0}")]
  UnknownProblem(ProblemId),
}
