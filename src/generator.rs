//! Problem generation pipeline.
//!
//! Flow:
//! 1) No OpenAI client → fallback immediately.
//! 2) Pick a theme + problem type, fill the prompt template.
//! 3) Ask the model for one JSON-object completion.
//! 4) Sanitize the text, parse `question`/`answer`/`explanation`, require a numeric answer.
//! 5) Attach the picked topic and the step count.
//!
//! Any failure along the way is logged and replaced by a random fallback
//! problem, so `generate_problem` always returns a complete record.

use std::sync::LazyLock;

use rand::{rngs::StdRng, Rng, SeedableRng};
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::config::{ProblemConfig, Prompts};
use crate::domain::{pick_topic, Answer, ProblemRecord, Topic};
use crate::error::GenerationError;
use crate::openai::OpenAI;
use crate::seeds::fallback_problems;
use crate::util::{fill_template, trunc_for_log};

const REQUIRED_KEYS: [&str; 3] = ["question", "answer", "explanation"];

static STEP_MARKER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^[0-9]+\.").expect("step marker pattern is valid"));

/// Count lines that start with an "N." step marker. At least 1.
pub fn count_steps(explanation: &str) -> u32 {
  let n = STEP_MARKER.find_iter(explanation).count();
  u32::try_from(n).unwrap_or(u32::MAX).max(1)
}

/// Clean model output before JSON parsing: code fences, C0/C1 control
/// characters and typographic quotes are removed or normalized.
pub fn sanitize(raw: &str) -> String {
  raw
    .replace("```json", "")
    .replace("```", "")
    .chars()
    .filter(|&c| !matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}'))
    .map(|c| match c {
      '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
      '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
      other => other,
    })
    .collect::<String>()
    .trim()
    .to_string()
}

/// The three fields we accept from the model.
#[derive(Debug, PartialEq)]
pub struct GeneratedProblem {
  pub question: String,
  pub answer: Answer,
  pub explanation: String,
}

impl GeneratedProblem {
  pub fn into_record(self, topic: Topic) -> ProblemRecord {
    let num_steps = count_steps(&self.explanation);
    ProblemRecord {
      question: self.question,
      answer: self.answer,
      explanation: self.explanation,
      theme: topic.theme.to_string(),
      problem_type: topic.problem_type.to_string(),
      num_steps,
    }
  }
}

/// Parse sanitized text into a problem. Extra keys (e.g. a model-invented
/// `theme`) are ignored.
pub fn parse_payload(text: &str) -> Result<GeneratedProblem, GenerationError> {
  let value: Value = serde_json::from_str(text).map_err(|e| GenerationError::Malformed(e.to_string()))?;
  let Value::Object(obj) = value else {
    return Err(GenerationError::Malformed("expected a JSON object".into()));
  };
  if let Some(missing) = REQUIRED_KEYS.iter().find(|k| !obj.contains_key(**k)) {
    return Err(GenerationError::MissingField(*missing));
  }

  let question = required_text(&obj, "question")?;
  let explanation = required_text(&obj, "explanation")?;
  let raw_answer = &obj["answer"];
  let answer = Answer::from_json(raw_answer)
    .ok_or_else(|| GenerationError::NonNumericAnswer(raw_answer.to_string()))?;

  Ok(GeneratedProblem { question, answer, explanation })
}

fn required_text(obj: &Map<String, Value>, key: &'static str) -> Result<String, GenerationError> {
  match obj.get(key) {
    Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
    Some(Value::String(_)) | Some(Value::Null) | None => Err(GenerationError::MissingField(key)),
    Some(other) => Err(GenerationError::Malformed(format!("`{key}` must be a string, got {other}"))),
  }
}

pub fn build_prompt(prompts: &Prompts, topic: Topic) -> String {
  fill_template(
    &prompts.user_template,
    &[("theme", topic.theme), ("problem_type", topic.problem_type)],
  )
}

pub struct ProblemGenerator {
  openai: Option<OpenAI>,
  prompts: Prompts,
  temperature: f32,
  fallbacks: Vec<ProblemRecord>,
}

impl ProblemGenerator {
  /// An empty `fallbacks` list is replaced by the built-in pool.
  pub fn new(openai: Option<OpenAI>, prompts: Prompts, temperature: f32, fallbacks: Vec<ProblemRecord>) -> Self {
    let fallbacks = if fallbacks.is_empty() { fallback_problems() } else { fallbacks };
    Self { openai, prompts, temperature, fallbacks }
  }

  /// Built-in fallbacks plus any from the TOML config.
  pub fn from_config(openai: Option<OpenAI>, cfg: ProblemConfig) -> Self {
    let mut pool = fallback_problems();
    pool.extend(cfg.fallback.into_iter().map(|f| f.into_record()));
    Self::new(openai, cfg.prompts, cfg.temperature, pool)
  }

  /// Fallback-only generator with the default prompts.
  #[cfg(test)]
  pub fn offline(fallbacks: Vec<ProblemRecord>) -> Self {
    Self::new(None, Prompts::default(), crate::config::DEFAULT_TEMPERATURE, fallbacks)
  }

  pub fn is_live(&self) -> bool {
    self.openai.is_some()
  }

  pub fn fallback_pool_size(&self) -> usize {
    self.fallbacks.len()
  }

  /// Always returns a complete problem; see module docs.
  pub async fn generate_problem(&self) -> ProblemRecord {
    let mut rng = StdRng::from_entropy();
    self.generate_with(&mut rng).await
  }

  #[instrument(level = "info", skip_all, fields(live = self.openai.is_some()))]
  pub async fn generate_with<R: Rng + Send>(&self, rng: &mut R) -> ProblemRecord {
    let Some(oa) = &self.openai else {
      debug!(target: "problem", "No OpenAI credential; serving fallback problem");
      return self.fallback(rng);
    };

    let topic = pick_topic(rng);
    match self.try_generate(oa, topic).await {
      Ok(record) => {
        info!(
          target: "problem",
          theme = %record.theme,
          problem_type = %record.problem_type,
          num_steps = record.num_steps,
          answer = %record.answer,
          "Generated problem"
        );
        record
      }
      Err(e) => {
        warn!(target: "problem", theme = topic.theme, problem_type = topic.problem_type, error = %e, "Generation failed; serving fallback problem");
        self.fallback(rng)
      }
    }
  }

  async fn try_generate(&self, oa: &OpenAI, topic: Topic) -> Result<ProblemRecord, GenerationError> {
    let user = build_prompt(&self.prompts, topic);
    let raw = oa.chat_json_text(&self.prompts.system, &user, self.temperature).await?;
    debug!(target: "problem", raw = %trunc_for_log(&raw, 200), "Raw model output");

    let clean = sanitize(&raw);
    let parsed = parse_payload(&clean).inspect_err(|_| {
      debug!(target: "problem", sanitized = %trunc_for_log(&clean, 200), "Unusable model output");
    })?;
    Ok(parsed.into_record(topic))
  }

  pub fn fallback<R: Rng + ?Sized>(&self, rng: &mut R) -> ProblemRecord {
    self.fallbacks[rng.gen_range(0..self.fallbacks.len())].clone()
  }
}
