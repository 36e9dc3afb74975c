//! Configuration types for agent creation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Lowest depth at which the search root has children to choose from
pub const MIN_DIFFICULTY_DEPTH: usize = 2;

/// Search depth presets for the minimax agent.
///
/// Depth counts plies including the root, so depth 2 looks one move ahead.
/// Serialized as the plain depth; deserializing goes through
/// [`Difficulty::from_depth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum Difficulty {
    /// Depth 2
    Easy,
    /// Depth 3
    Normal,
    /// Depth 4
    #[default]
    Hard,
    /// Any depth beyond the presets
    Depth(CustomDepth),
}

/// A depth deeper than [`Difficulty::Hard`], only built by
/// [`Difficulty::from_depth`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomDepth(usize);

impl CustomDepth {
    pub fn get(self) -> usize {
        self.0
    }
}

impl Difficulty {
    pub fn depth(self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Normal => 3,
            Difficulty::Hard => 4,
            Difficulty::Depth(depth) => depth.get(),
        }
    }

    /// Map a depth onto its preset, or a custom depth past the presets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DifficultyTooShallow`] below 2, where the search root
    /// has no children and no move can be chosen.
    pub fn from_depth(depth: usize) -> Result<Self, Error> {
        match depth {
            0 | 1 => Err(Error::DifficultyTooShallow {
                depth,
                minimum: MIN_DIFFICULTY_DEPTH,
            }),
            2 => Ok(Difficulty::Easy),
            3 => Ok(Difficulty::Normal),
            4 => Ok(Difficulty::Hard),
            other => Ok(Difficulty::Depth(CustomDepth(other))),
        }
    }
}

impl TryFrom<usize> for Difficulty {
    type Error = Error;

    fn try_from(depth: usize) -> Result<Self, Self::Error> {
        Difficulty::from_depth(depth)
    }
}

impl From<Difficulty> for usize {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.depth()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Depth(depth) => write!(f, "depth {}", depth.get()),
        }
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "easy" => return Ok(Difficulty::Easy),
            "normal" => return Ok(Difficulty::Normal),
            "hard" => return Ok(Difficulty::Hard),
            _ => {}
        }

        normalized
            .parse::<usize>()
            .ok()
            .and_then(|depth| Difficulty::from_depth(depth).ok())
            .ok_or_else(|| Error::ParseDifficulty {
                input: s.to_string(),
                expected: "easy, normal, hard, or a depth of at least 2".to_string(),
            })
    }
}

/// Which kind of agent to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    Minimax(Difficulty),
    Random,
}

impl Default for AgentKind {
    fn default() -> Self {
        AgentKind::Minimax(Difficulty::default())
    }
}

/// Configuration for creating an agent.
///
/// # Examples
///
/// ```
/// use overflow::app::{AgentConfig, Difficulty};
///
/// let config = AgentConfig::minimax(Difficulty::Normal)
///     .with_name("Bot")
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub kind: AgentKind,
    /// Display name; derived from the kind when absent
    pub name: Option<String>,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub fn new(kind: AgentKind) -> Self {
        Self {
            kind,
            name: None,
            seed: None,
        }
    }

    pub fn minimax(difficulty: Difficulty) -> Self {
        Self::new(AgentKind::Minimax(difficulty))
    }

    pub fn random() -> Self {
        Self::new(AgentKind::Random)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configured name, or one describing the agent kind
    pub fn display_name(&self) -> String {
        match (&self.name, self.kind) {
            (Some(name), _) => name.clone(),
            (None, AgentKind::Minimax(difficulty)) => format!("minimax ({difficulty})"),
            (None, AgentKind::Random) => "random".to_string(),
        }
    }
}
