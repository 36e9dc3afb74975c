//! Observer implementations for match series
//!
//! Observers allow composable data collection during a series without
//! coupling the match runner to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::{GameOutcome, Grid, Move, Player},
    ports::{Observer, observer::MoveEvent},
};

/// One line of a JSONL export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveObservation {
    pub game_num: usize,
    pub turn: usize,
    pub player: Player,
    #[serde(rename = "move")]
    pub mv: Move,
    pub cascade_steps: usize,
    /// Board after the chain reaction settled
    pub grid: Grid,
    /// Intermediate boards, one per cascade step
    pub snapshots: Vec<Grid>,
}

/// Progress bar observer - shows series progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    player_one_wins: usize,
    player_two_wins: usize,
    unfinished: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            player_one_wins: 0,
            player_two_wins: 0,
            unfinished: 0,
        }
    }

    fn message(&self) -> String {
        format!(
            "{} P2:{} U:{}",
            self.player_one_wins, self.player_two_wins, self.unfinished
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_series_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (P1:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        match outcome.winner() {
            Some(Player::One) => self.player_one_wins += 1,
            Some(Player::Two) => self.player_two_wins += 1,
            None => self.unfinished += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_series_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - tracks outcomes, game lengths and cascades
#[derive(Debug, Default)]
pub struct MetricsObserver {
    total_games: usize,
    player_one_wins: usize,
    player_two_wins: usize,
    unfinished: usize,
    forfeits: usize,
    move_counts: Vec<usize>,
    total_cascade_steps: usize,
    longest_cascade: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }

    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::One => self.player_one_wins,
            Player::Two => self.player_two_wins,
        }
    }

    /// Win rate of `player` over finished and unfinished games
    pub fn win_rate(&self, player: Player) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.wins(player) as f64 / self.total_games as f64
        }
    }

    /// Mean number of moves per game
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    pub fn total_cascade_steps(&self) -> usize {
        self.total_cascade_steps
    }

    /// Most cascade steps caused by a single move
    pub fn longest_cascade(&self) -> usize {
        self.longest_cascade
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            player_one_wins: self.player_one_wins,
            player_two_wins: self.player_two_wins,
            unfinished: self.unfinished,
            forfeits: self.forfeits,
            player_one_win_rate: self.win_rate(Player::One),
            player_two_win_rate: self.win_rate(Player::Two),
            avg_game_length: self.avg_game_length(),
            total_cascade_steps: self.total_cascade_steps,
            longest_cascade: self.longest_cascade,
        }
    }
}

/// Summary of series metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub player_one_wins: usize,
    pub player_two_wins: usize,
    pub unfinished: usize,
    pub forfeits: usize,
    pub player_one_win_rate: f64,
    pub player_two_win_rate: f64,
    pub avg_game_length: f64,
    pub total_cascade_steps: usize,
    pub longest_cascade: usize,
}

impl Observer for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize, _grid: &Grid) -> Result<()> {
        self.move_counts.push(0);
        Ok(())
    }

    fn on_move(&mut self, event: &MoveEvent<'_>) -> Result<()> {
        if let Some(last) = self.move_counts.last_mut() {
            *last += 1;
        }
        let steps = event.cascade_steps();
        self.total_cascade_steps += steps;
        self.longest_cascade = self.longest_cascade.max(steps);
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.total_games += 1;
        match outcome {
            GameOutcome::Win(Player::One) => self.player_one_wins += 1,
            GameOutcome::Win(Player::Two) => self.player_two_wins += 1,
            GameOutcome::Forfeit(player) => {
                self.forfeits += 1;
                match player {
                    Player::One => self.player_one_wins += 1,
                    Player::Two => self.player_two_wins += 1,
                }
            }
            GameOutcome::Unfinished => self.unfinished += 1,
        }
        Ok(())
    }
}

/// JSONL observer - writes one JSON object per move
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_move(&mut self, event: &MoveEvent<'_>) -> Result<()> {
        let observation = MoveObservation {
            game_num: event.game_num,
            turn: event.turn,
            player: event.player,
            mv: event.mv,
            cascade_steps: event.cascade_steps(),
            grid: event.grid.clone(),
            snapshots: event.cascade.to_vec(),
        };

        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn on_series_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_observer() {
        let mut observer = MetricsObserver::new();

        assert_eq!(observer.win_rate(Player::One), 0.0);

        observer.on_game_end(0, GameOutcome::Win(Player::One)).unwrap();
        observer.on_game_end(1, GameOutcome::Unfinished).unwrap();
        observer
            .on_game_end(2, GameOutcome::Forfeit(Player::One))
            .unwrap();

        assert_eq!(observer.total_games(), 3);
        assert_eq!(observer.wins(Player::One), 2);
        assert_eq!(observer.wins(Player::Two), 0);
        assert_eq!(observer.summary().forfeits, 1);
        assert!((observer.win_rate(Player::One) - 0.666).abs() < 0.01);
    }

    #[test]
    fn test_metrics_observer_tracks_cascades() {
        let mut observer = MetricsObserver::new();
        let grid = Grid::opening(2, 2);
        let cascade = vec![grid.clone(), grid.clone(), grid.clone()];

        observer.on_game_start(0, &grid).unwrap();
        for (turn, steps) in [0usize, 3, 1].into_iter().enumerate() {
            let event = MoveEvent {
                game_num: 0,
                turn,
                player: Player::One,
                mv: Move::new(0, 0),
                grid: &grid,
                cascade: &cascade[..steps],
            };
            observer.on_move(&event).unwrap();
        }

        assert_eq!(observer.avg_game_length(), 3.0);
        assert_eq!(observer.total_cascade_steps(), 4);
        assert_eq!(observer.longest_cascade(), 3);
    }
}
