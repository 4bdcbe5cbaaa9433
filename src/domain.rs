//! Domain models: the problem record, its numeric answer, and the theme/type
//! enumerations used to vary generated problems.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Everyday contexts a problem can be set in.
pub const THEMES: &[&str] = &[
  "sports and games",
  "cooking and recipes",
  "shopping and money",
  "travel and transportation",
  "nature and animals",
  "space exploration",
  "music and art",
  "building and construction",
];

/// Math skill categories a problem can exercise.
pub const PROBLEM_TYPES: &[&str] = &[
  "ratios and proportions",
  "percentages",
  "fractions and decimals",
  "algebraic equations",
  "geometry and measurement",
  "rates and speed",
  "number patterns",
  "age problems",
];

/// Numeric answer. Integers stay integers on the wire (`6`, not `6.0`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
  Int(i64),
  Float(f64),
}

impl Answer {
  pub fn as_f64(self) -> f64 {
    match self {
      Answer::Int(n) => n as f64,
      Answer::Float(x) => x,
    }
  }

  /// Convert a JSON number. Returns None for non-numbers.
  pub fn from_json(v: &serde_json::Value) -> Option<Self> {
    let serde_json::Value::Number(n) = v else { return None };
    if let Some(i) = n.as_i64() {
      return Some(Answer::Int(i));
    }
    n.as_f64().map(Answer::Float)
  }
}

impl fmt::Display for Answer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Answer::Int(n) => write!(f, "{n}"),
      Answer::Float(x) => write!(f, "{x}"),
    }
  }
}

/// A fully-formed word problem, either generated or from the fallback pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProblemRecord {
  pub question: String,
  pub answer: Answer,
  pub explanation: String,
  pub theme: String,
  pub problem_type: String,
  pub num_steps: u32,
}

/// Theme + problem type picked for one generation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Topic {
  pub theme: &'static str,
  pub problem_type: &'static str,
}

/// Pick a theme and a problem type uniformly at random.
pub fn pick_topic<R: Rng + ?Sized>(rng: &mut R) -> Topic {
  Topic {
    theme: THEMES[rng.gen_range(0..THEMES.len())],
    problem_type: PROBLEM_TYPES[rng.gen_range(0..PROBLEM_TYPES.len())],
  }
}
