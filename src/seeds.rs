//! Built-in fallback problems: served whenever generation is unavailable or
//! its output is unusable, so the app is useful even without OpenAI.

use crate::domain::{Answer, ProblemRecord};
use crate::generator::count_steps;

fn seed(question: &str, answer: Answer, explanation: &str, theme: &str, problem_type: &str) -> ProblemRecord {
  ProblemRecord {
    question: question.into(),
    answer,
    explanation: explanation.into(),
    theme: theme.into(),
    problem_type: problem_type.into(),
    num_steps: count_steps(explanation),
  }
}

/// Hand-authored problems. Every entry satisfies the record invariants.
pub fn fallback_problems() -> Vec<ProblemRecord> {
  vec![
    seed(
      "A store sells notebooks for $2.50 each. If you have $15, how many notebooks can you buy?",
      Answer::Int(6),
      "1. Money available = $15\n2. Cost per notebook = $2.50\n3. Number of notebooks = $15 ÷ $2.50 = 6",
      "shopping and money",
      "fractions and decimals",
    ),
    seed(
      "If a train travels 120 miles in 2 hours, what is its average speed in miles per hour?",
      Answer::Int(60),
      "1. Speed = Distance ÷ Time\n2. Distance = 120 miles\n3. Time = 2 hours\n4. Speed = 120 ÷ 2 = 60 mph",
      "travel and transportation",
      "rates and speed",
    ),
    seed(
      "A rectangle has a length of 8 inches and a width of 5 inches. What is its area in square inches?",
      Answer::Int(40),
      "1. Area of rectangle = length × width\n2. Area = 8 × 5 = 40 square inches",
      "building and construction",
      "geometry and measurement",
    ),
    seed(
      "A basketball player made 39 of her 48 free throws this season. What fraction of her free throws did she make, written as a decimal?",
      Answer::Float(0.8125),
      "1. Made shots = 39, attempts = 48\n2. Fraction made = 39 / 48\n3. Simplify: 39 / 48 = 13 / 16\n4. As a decimal: 13 ÷ 16 = 0.8125",
      "sports and games",
      "fractions and decimals",
    ),
    seed(
      "A recipe for 8 cookies uses 3 cups of flour. How many cups of flour are needed for 65 cookies?",
      Answer::Float(24.375),
      "1. Flour per cookie = 3 ÷ 8 = 0.375 cups\n2. Cookies wanted = 65\n3. Flour needed = 65 × 0.375 = 24.375 cups",
      "cooking and recipes",
      "ratios and proportions",
    ),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pool_is_large_enough_and_well_formed() {
    let pool = fallback_problems();
    assert!(pool.len() >= 3);
    for p in &pool {
      assert!(!p.question.is_empty());
      assert!(!p.explanation.is_empty());
      assert!(p.answer.as_f64().is_finite());
      assert!(p.num_steps >= 1);
    }
  }

  #[test]
  fn step_counts_match_explanations() {
    let counts: Vec<u32> = fallback_problems().iter().map(|p| p.num_steps).collect();
    assert_eq!(counts, vec![3, 4, 2, 4, 3]);
  }
}
