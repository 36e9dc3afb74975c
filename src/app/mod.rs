//! Application layer: agent configuration and the factory wiring it up.
//!
//! ```
//! use overflow::app::{AgentConfig, App, Difficulty};
//! use overflow::pipeline::MatchConfig;
//!
//! let app = App::new().with_default_seed(7);
//! let mut one = app.create_agent(&AgentConfig::minimax(Difficulty::Easy))?;
//! let mut two = app.create_agent(&AgentConfig::random())?;
//! let config = MatchConfig { rows: 3, cols: 3, ..MatchConfig::default() };
//! let result = app
//!     .create_runner(config)?
//!     .run_series(2, one.as_mut(), two.as_mut())?;
//! assert_eq!(result.total_games, 2);
//! # Ok::<(), overflow::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::{AgentConfig, AgentKind, CustomDepth, Difficulty, MIN_DIFFICULTY_DEPTH};
pub use container::App;
