//! Configuration: server settings from the environment, and the optional TOML
//! problem config (prompt overrides, temperature, extra fallback problems).
//!
//! See `ProblemConfig` and `Prompts` for the expected schema.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{Answer, ProblemRecord};
use crate::generator::count_steps;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Process-level settings consumed by `main` and the router.
#[derive(Clone, Debug)]
pub struct ServerSettings {
  pub port: u16,
  pub static_dir: PathBuf,
  /// When set, CORS is limited to this origin plus the local dev server.
  pub frontend_url: Option<String>,
}

impl ServerSettings {
  pub fn from_env() -> Self {
    let port = std::env::var("PORT")
      .ok()
      .and_then(|p| p.parse::<u16>().ok())
      .unwrap_or(DEFAULT_PORT);
    let static_dir = std::env::var("STATIC_DIR")
      .map(PathBuf::from)
      .unwrap_or_else(|_| PathBuf::from("./static"));
    let frontend_url = std::env::var("FRONTEND_URL").ok().filter(|s| !s.trim().is_empty());
    Self { port, static_dir, frontend_url }
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProblemConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default = "default_temperature")]
  pub temperature: f32,
  /// Appended to the built-in fallback pool.
  #[serde(default)]
  pub fallback: Vec<FallbackCfg>,
}

impl Default for ProblemConfig {
  fn default() -> Self {
    Self { prompts: Prompts::default(), temperature: DEFAULT_TEMPERATURE, fallback: Vec::new() }
  }
}

fn default_temperature() -> f32 { DEFAULT_TEMPERATURE }

/// Fallback problem entry accepted in TOML. `num_steps` is derived from the explanation.
#[derive(Clone, Debug, Deserialize)]
pub struct FallbackCfg {
  pub question: String,
  pub answer: Answer,
  pub explanation: String,
  pub theme: String,
  pub problem_type: String,
}

impl FallbackCfg {
  pub fn into_record(self) -> ProblemRecord {
    let num_steps = count_steps(&self.explanation);
    ProblemRecord {
      question: self.question,
      answer: self.answer,
      explanation: self.explanation,
      theme: self.theme,
      problem_type: self.problem_type,
      num_steps,
    }
  }
}

/// Prompts sent to the model. `user_template` understands `{theme}` and `{problem_type}`.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub system: String,
  pub user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      system: "You are a math teacher creating word problems. Respond ONLY with strict JSON.".into(),
      user_template: DEFAULT_USER_TEMPLATE.into(),
    }
  }
}

const DEFAULT_USER_TEMPLATE: &str = r#"Generate one math word problem with these requirements:
1. Suitable for grades 5-8. Assume the student is talented and seeking acceleration, so make it an interesting, challenging puzzle.
2. Theme: {theme}.
3. Problem type: {problem_type}.
4. The answer must be a single number (integer or decimal). No units, no words.
5. Solving it should take 3 to 5 reasoning steps.
6. Before answering, solve the problem yourself and check your work. Only return it if the answer is correct.
7. Number every step of the explanation as "1.", "2.", ... each on its own line.

Return ONLY a JSON object in exactly this shape:
{"question": "the word problem text", "answer": <number>, "explanation": "step by step solution"}

Examples:
{"question": "Sam is twice as old as Max. In 4 years, Sam will be 1.5 times as old as Max. How old is Max now?", "answer": 4, "explanation": "1. Let x be Max's current age, so Sam is 2x.\n2. In 4 years: 2x + 4 = 1.5(x + 4).\n3. Expand: 2x + 4 = 1.5x + 6.\n4. Solve: 0.5x = 2, so x = 4.\nMax is 4 years old."}
{"question": "A recipe uses 3 cups of flour for every 2 cups of sugar. A baker has 13 cups of flour and plenty of sugar. If she uses all the flour, how many cups of sugar does she need?", "answer": 8.667, "explanation": "1. The ratio of flour to sugar is 3:2.\n2. Sugar = 13 x 2 / 3.\n3. Sugar = 26 / 3 = 8.667 cups (rounded to three decimals)."}
{"question": "A soccer team won 60% of its first 20 games. How many of the next 10 games must it win to finish with a 70% win rate?", "answer": 9, "explanation": "1. Wins so far: 60% of 20 = 12.\n2. Total games: 20 + 10 = 30.\n3. Wins needed for 70%: 0.7 x 30 = 21.\n4. Additional wins: 21 - 12 = 9."}
"#;

/// Attempt to load `ProblemConfig` from PROBLEM_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_problem_config_from_env() -> Option<ProblemConfig> {
  let path = std::env::var("PROBLEM_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<ProblemConfig>(&s) {
      Ok(cfg) => {
        info!(target: "math_challenge_backend", %path, extra_fallbacks = cfg.fallback.len(), "Loaded problem config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "math_challenge_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "math_challenge_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_prompt_carries_placeholders_and_examples() {
    let p = Prompts::default();
    assert!(p.user_template.contains("{theme}"));
    assert!(p.user_template.contains("{problem_type}"));
    assert_eq!(p.user_template.matches(r#"{"question": "#).count(), 4);
  }

  #[test]
  fn toml_config_parses_with_partial_fields() {
    let cfg: ProblemConfig = toml::from_str(
      r#"
      temperature = 0.4

      [[fallback]]
      question = "What is 15% of 80?"
      answer = 12
      explanation = "1. 15% = 0.15\n2. 0.15 x 80 = 12"
      theme = "shopping and money"
      problem_type = "percentages"
      "#,
    )
    .unwrap();
    assert_eq!(cfg.temperature, 0.4);
    assert_eq!(cfg.prompts.system, Prompts::default().system);
    let rec = cfg.fallback.into_iter().next().unwrap().into_record();
    assert_eq!(rec.answer, Answer::Int(12));
    assert_eq!(rec.num_steps, 2);
  }

  #[test]
  fn example_config_parses() {
    let cfg: ProblemConfig = toml::from_str(include_str!("../problems.example.toml")).unwrap();
    let rec = cfg.fallback.into_iter().next().unwrap().into_record();
    assert_eq!(rec.answer, Answer::Int(68));
    assert_eq!(rec.num_steps, 3);
  }

  #[test]
  fn toml_float_answer_stays_float() {
    let cfg: ProblemConfig = toml::from_str(
      r#"
      [[fallback]]
      question = "q"
      answer = 2.5
      explanation = "e"
      theme = "t"
      problem_type = "p"
      "#,
    )
    .unwrap();
    assert_eq!(cfg.fallback[0].answer, Answer::Float(2.5));
    assert_eq!(cfg.temperature, DEFAULT_TEMPERATURE);
  }
}
