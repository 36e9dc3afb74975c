//! Agent and runner factory.
//!
//! Centralizes how configuration turns into boxed agents and match runners so
//! the CLI and tests wire things the same way.

use super::config::{AgentConfig, AgentKind};
use crate::{
    Result,
    pipeline::{MatchConfig, MatchRunner, MinimaxAgent, RandomAgent},
    ports::Agent,
};

/// Application factory.
///
/// # Examples
///
/// ```
/// use overflow::app::{AgentConfig, App, Difficulty};
/// use overflow::ports::Agent;
///
/// let app = App::new().with_default_seed(42);
/// let agent = app.create_agent(&AgentConfig::minimax(Difficulty::Easy))?;
/// assert_eq!(agent.name(), "minimax (easy)");
/// # Ok::<(), overflow::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a default random seed for everything this app creates.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    /// Create an agent; the config seed overrides the app default.
    pub fn create_agent(&self, config: &AgentConfig) -> Result<Box<dyn Agent>> {
        let name = config.display_name();
        let mut agent: Box<dyn Agent> = match config.kind {
            AgentKind::Minimax(difficulty) => Box::new(MinimaxAgent::new(name, difficulty)),
            AgentKind::Random => Box::new(RandomAgent::new(name)),
        };

        if let Some(seed) = config.seed.or(self.default_seed) {
            agent.set_rng_seed(seed)?;
        }
        Ok(agent)
    }

    /// Create a match runner, filling in the default seed when the config
    /// has none.
    pub fn create_runner<'a>(&self, mut config: MatchConfig) -> Result<MatchRunner<'a>> {
        config.validate()?;
        if config.seed.is_none() {
            config.seed = self.default_seed;
        }
        Ok(MatchRunner::new(config))
    }
}
