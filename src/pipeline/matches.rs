//! Headless match runner for two agents

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Error, Result,
    game::{GameOutcome, Player, Session},
    ports::{Agent, Observer, observer::MoveEvent},
};

/// Match configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub rows: usize,
    pub cols: usize,

    /// Side that opens every game of a series
    pub first_player: Player,

    /// Games still running after this many moves end as unfinished
    pub turn_limit: usize,

    /// Random seed handed to both agents
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 6,
            first_player: Player::One,
            turn_limit: 500,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Check that the opening position exists and games can progress.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for boards too small to hold
    /// both opening gems or a zero turn limit.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 || self.rows * self.cols < 2 {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "a {}x{} board cannot hold both opening gems",
                    self.rows, self.cols
                ),
            });
        }
        if self.turn_limit == 0 {
            return Err(Error::InvalidConfiguration {
                message: "turn limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Result of one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub outcome: GameOutcome,
    /// Legal moves played
    pub turns: usize,
    /// Cascade steps over the whole game
    pub cascade_steps: usize,
}

/// Result of a series of games, counted per side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesResult {
    pub player_one: String,
    pub player_two: String,

    pub total_games: usize,
    pub player_one_wins: usize,
    pub player_two_wins: usize,
    pub unfinished: usize,

    /// Wins awarded because the other side played an illegal move
    pub forfeits: usize,

    pub player_one_win_rate: f64,
    pub player_two_win_rate: f64,
    pub unfinished_rate: f64,
}

impl SeriesResult {
    pub fn new(player_one: String, player_two: String, reports: &[GameReport]) -> Self {
        let mut player_one_wins = 0;
        let mut player_two_wins = 0;
        let mut unfinished = 0;
        let mut forfeits = 0;

        for report in reports {
            match report.outcome.winner() {
                Some(Player::One) => player_one_wins += 1,
                Some(Player::Two) => player_two_wins += 1,
                None => unfinished += 1,
            }
            if matches!(report.outcome, GameOutcome::Forfeit(_)) {
                forfeits += 1;
            }
        }

        let total_games = reports.len();
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            player_one,
            player_two,
            total_games,
            player_one_wins,
            player_two_wins,
            unfinished,
            forfeits,
            player_one_win_rate: rate(player_one_wins),
            player_two_win_rate: rate(player_two_wins),
            unfinished_rate: rate(unfinished),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open {}", path.display()),
            source,
        })?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Plays games between two agents and reports to observers
pub struct MatchRunner<'a> {
    config: MatchConfig,
    observers: Vec<Box<dyn Observer + 'a>>,
}

impl<'a> MatchRunner<'a> {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer; pass `&mut observer` boxed to read it back afterwards.
    pub fn with_observer(mut self, observer: Box<dyn Observer + 'a>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play `games` games, `one` always controlling player one.
    pub fn run_series(
        &mut self,
        games: usize,
        one: &mut dyn Agent,
        two: &mut dyn Agent,
    ) -> Result<SeriesResult> {
        self.config.validate()?;
        if let Some(seed) = self.config.seed {
            one.set_rng_seed(seed)?;
            two.set_rng_seed(seed.wrapping_add(1))?;
        }

        for observer in &mut self.observers {
            observer.on_series_start(games)?;
        }

        let mut reports = Vec::with_capacity(games);
        for game_num in 0..games {
            reports.push(self.play_game(game_num, one, two)?);
        }

        for observer in &mut self.observers {
            observer.on_series_end()?;
        }

        Ok(SeriesResult::new(
            one.name().to_string(),
            two.name().to_string(),
            &reports,
        ))
    }

    /// Play a single game from the opening position.
    ///
    /// # Errors
    ///
    /// Agent and observer errors abort the game. An illegal move does not:
    /// it ends the game as a forfeit.
    pub fn play_game(
        &mut self,
        game_num: usize,
        one: &mut dyn Agent,
        two: &mut dyn Agent,
    ) -> Result<GameReport> {
        self.config.validate()?;
        let mut session =
            Session::with_first_player(self.config.rows, self.config.cols, self.config.first_player);

        for observer in &mut self.observers {
            observer.on_game_start(game_num, session.grid())?;
        }

        let mut cascade_steps = 0;
        let outcome = loop {
            if let Some(winner) = session.winner() {
                break GameOutcome::Win(winner);
            }
            if session.turn() >= self.config.turn_limit {
                break GameOutcome::Unfinished;
            }

            let player = session.to_move();
            let agent: &mut dyn Agent = match player {
                Player::One => &mut *one,
                Player::Two => &mut *two,
            };

            let mv = agent.select_move(session.grid(), player)?;
            if !session.is_valid_move(mv) {
                warn!(
                    game = game_num,
                    agent = agent.name(),
                    %player,
                    %mv,
                    "illegal move, game forfeited"
                );
                break GameOutcome::Forfeit(player.opponent());
            }

            let turn = session.turn();
            let mut cascade = Vec::new();
            cascade_steps += session.play_recorded(mv, &mut cascade)?;

            let event = MoveEvent {
                game_num,
                turn,
                player,
                mv,
                grid: session.grid(),
                cascade: &cascade,
            };
            for observer in &mut self.observers {
                observer.on_move(&event)?;
            }
        };

        info!(
            game = game_num,
            ?outcome,
            turns = session.turn(),
            cascade_steps,
            "game finished"
        );

        for observer in &mut self.observers {
            observer.on_game_end(game_num, outcome)?;
        }

        Ok(GameReport {
            outcome,
            turns: session.turn(),
            cascade_steps,
        })
    }
}
