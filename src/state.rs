//! Application state: the problem generator and the problem store.
//!
//! Built once at the composition root (`main`) and shared with handlers as
//! `Arc<AppState>`. Tests build their own instance so nothing leaks between them.

use tracing::{info, instrument, warn};

use crate::config::load_problem_config_from_env;
use crate::generator::ProblemGenerator;
use crate::openai::OpenAI;
use crate::store::ProblemStore;

pub struct AppState {
    pub generator: ProblemGenerator,
    pub store: ProblemStore,
}

impl AppState {
    pub fn new(generator: ProblemGenerator) -> Self {
        Self { generator, store: ProblemStore::new() }
    }

    /// Build state from env: load TOML config, init OpenAI, seed the fallback pool.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Self {
        let cfg = load_problem_config_from_env().unwrap_or_default();

        // Missing key is not a startup failure: we just serve fallback problems.
        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "math_challenge_backend", base_url = %oa.base_url, model = %oa.model, timeout = ?oa.timeout, "OpenAI enabled.");
        } else {
            warn!(target: "math_challenge_backend", "OpenAI disabled (no OPENAI_API_KEY). Serving fallback problems only.");
        }

        let generator = ProblemGenerator::from_config(openai, cfg);
        info!(target: "problem", live = generator.is_live(), fallback_pool = generator.fallback_pool_size(), "Startup problem inventory");
        Self::new(generator)
    }
}
