//! In-memory problem store: assigns ids on issue and validates submitted answers.
//!
//! One `RwLock` guards both the id counter and the map, so allocation and
//! insertion happen as a unit. Validation only takes the read lock.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::domain::{Answer, ProblemRecord};
use crate::error::StoreError;

/// Signed so any client-supplied integer reaches the lookup; issued ids are always >= 1000.
pub type ProblemId = i64;

pub const FIRST_PROBLEM_ID: ProblemId = 1000;

/// Absolute tolerance for answer comparison (absorbs rounding like 24.375 vs 24.37).
pub const ANSWER_TOLERANCE: f64 = 0.01;

pub fn is_correct(submitted: f64, expected: f64) -> bool {
    (submitted - expected).abs() < ANSWER_TOLERANCE
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoredProblem {
    pub answer: Answer,
    pub explanation: String,
}

/// Outcome of checking one submission.
#[derive(Clone, Debug, PartialEq)]
pub struct Verdict {
    pub correct: bool,
    pub correct_answer: Answer,
    pub explanation: String,
}

struct Inner {
    next_id: ProblemId,
    problems: HashMap<ProblemId, StoredProblem>,
}

impl Inner {
    fn empty() -> Self {
        Self { next_id: FIRST_PROBLEM_ID, problems: HashMap::new() }
    }
}

pub struct ProblemStore {
    inner: RwLock<Inner>,
}

impl Default for ProblemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemStore {
    pub fn new() -> Self {
        Self { inner: RwLock::new(Inner::empty()) }
    }

    /// Allocate a fresh id and retain the answer + explanation under it.
    #[instrument(level = "debug", skip_all)]
    pub async fn issue(&self, record: &ProblemRecord) -> ProblemId {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.problems.insert(
            id,
            StoredProblem { answer: record.answer, explanation: record.explanation.clone() },
        );
        debug!(target: "problem", id, outstanding = inner.problems.len(), "Problem issued");
        id
    }

    /// Check `submitted` against the stored answer. Repeat calls are allowed.
    #[instrument(level = "debug", skip(self))]
    pub async fn validate(&self, id: ProblemId, submitted: f64) -> Result<Verdict, StoreError> {
        let inner = self.inner.read().await;
        let stored = inner.problems.get(&id).ok_or(StoreError::UnknownProblem(id))?;
        Ok(Verdict {
            correct: is_correct(submitted, stored.answer.as_f64()),
            correct_answer: stored.answer,
            explanation: stored.explanation.clone(),
        })
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.problems.len()
    }

    /// Drop every problem and rewind ids to `FIRST_PROBLEM_ID`.
    #[cfg(test)]
    pub async fn reset(&self) {
        *self.inner.write().await = Inner::empty();
    }
}
