//! Core behaviors behind the HTTP handlers:
//!   - issuing a fresh problem (generate, then store)
//!   - checking a submitted answer against the store

use tracing::{info, instrument, warn};

use crate::error::StoreError;
use crate::protocol::{CheckAnswerIn, CheckAnswerReply, ErrorOut, ProblemOut, INVALID_PROBLEM_ID};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn issue_problem(state: &AppState) -> ProblemOut {
  let record = state.generator.generate_problem().await;
  let id = state.store.issue(&record).await;
  info!(target: "problem", id, theme = %record.theme, problem_type = %record.problem_type, num_steps = record.num_steps, "Problem issued");
  ProblemOut::new(id, record)
}

#[instrument(level = "info", skip(state))]
pub async fn check_answer(state: &AppState, body: &CheckAnswerIn) -> CheckAnswerReply {
  match state.store.validate(body.problem_id, body.user_answer).await {
    Ok(verdict) => {
      info!(target: "problem", id = body.problem_id, correct = verdict.correct, "Answer checked");
      CheckAnswerReply::Verdict(verdict.into())
    }
    Err(StoreError::UnknownProblem(id)) => {
      warn!(target: "problem", id, "Answer submitted for unknown problem");
      CheckAnswerReply::Error(ErrorOut::new(INVALID_PROBLEM_ID))
    }
  }
}
