//! Public HTTP request/response structs (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Answer, ProblemRecord};
use crate::store::{ProblemId, Verdict};

pub const INVALID_PROBLEM_ID: &str = "Invalid problem ID";

/// Problem as delivered to the client. The answer and explanation stay server-side.
#[derive(Debug, Serialize)]
pub struct ProblemOut {
    pub problem_id: ProblemId,
    pub question: String,
    pub theme: String,
    pub problem_type: String,
    pub num_steps: u32,
}

impl ProblemOut {
    pub fn new(problem_id: ProblemId, p: ProblemRecord) -> Self {
        Self {
            problem_id,
            question: p.question,
            theme: p.theme,
            problem_type: p.problem_type,
            num_steps: p.num_steps,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckAnswerIn {
    pub problem_id: ProblemId,
    pub user_answer: f64,
}

#[derive(Debug, Serialize)]
pub struct CheckAnswerOut {
    pub correct: bool,
    pub correct_answer: Answer,
    pub explanation: String,
}

impl From<Verdict> for CheckAnswerOut {
    fn from(v: Verdict) -> Self {
        Self { correct: v.correct, correct_answer: v.correct_answer, explanation: v.explanation }
    }
}

/// `{"status": "error", "message": ...}`, returned with HTTP 200 for unknown ids.
#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub status: &'static str,
    pub message: String,
}

impl ErrorOut {
    pub fn new(message: impl Into<String>) -> Self {
        Self { status: "error", message: message.into() }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CheckAnswerReply {
    Verdict(CheckAnswerOut),
    Error(ErrorOut),
}

#[derive(Serialize)]
pub struct HealthOut {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn check_answer_reply_shapes() {
        let ok = CheckAnswerReply::Verdict(CheckAnswerOut {
            correct: true,
            correct_answer: Answer::Int(40),
            explanation: "1. x".into(),
        });
        assert_eq!(
            serde_json::to_value(ok).unwrap(),
            json!({"correct": true, "correct_answer": 40, "explanation": "1. x"})
        );

        let err = CheckAnswerReply::Error(ErrorOut::new(INVALID_PROBLEM_ID));
        assert_eq!(
            serde_json::to_value(err).unwrap(),
            json!({"status": "error", "message": "Invalid problem ID"})
        );
    }

    #[test]
    fn check_answer_in_accepts_integer_answers() {
        let body: CheckAnswerIn = serde_json::from_value(json!({"problem_id": 1000, "user_answer": 6})).unwrap();
        assert_eq!(body.problem_id, 1000);
        assert_eq!(body.user_answer, 6.0);

        let body: CheckAnswerIn = serde_json::from_value(json!({"problem_id": -1, "user_answer": 0})).unwrap();
        assert_eq!(body.problem_id, -1);
    }
}
