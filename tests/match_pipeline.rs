//! Match runner, agents and observers end to end

use std::io::{BufRead, BufReader};

use overflow::{
    GameOutcome, Grid, Move, Player, Result,
    app::{AgentConfig, App, Difficulty},
    pipeline::{
        JsonlObserver, MatchConfig, MatchRunner, MetricsObserver, MinimaxAgent, MoveObservation,
        RandomAgent, SeriesResult,
    },
    ports::{Agent, Observer, observer::MoveEvent},
};

/// Always plays the opponent's opening corner, which is never legal
struct Cheater;

impl Agent for Cheater {
    fn select_move(&mut self, grid: &Grid, _player: Player) -> Result<Move> {
        Ok(Move::new(grid.rows() - 1, grid.cols() - 1))
    }

    fn name(&self) -> &str {
        "cheater"
    }
}

/// Records the order of observer callbacks
#[derive(Default)]
struct EventLog {
    events: Vec<String>,
}

impl Observer for EventLog {
    fn on_series_start(&mut self, total_games: usize) -> Result<()> {
        self.events.push(format!("series_start {total_games}"));
        Ok(())
    }

    fn on_game_start(&mut self, game_num: usize, _grid: &Grid) -> Result<()> {
        self.events.push(format!("game_start {game_num}"));
        Ok(())
    }

    fn on_move(&mut self, event: &MoveEvent<'_>) -> Result<()> {
        self.events.push(format!("move {} {}", event.game_num, event.turn));
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, _outcome: GameOutcome) -> Result<()> {
        self.events.push(format!("game_end {game_num}"));
        Ok(())
    }

    fn on_series_end(&mut self) -> Result<()> {
        self.events.push("series_end".to_string());
        Ok(())
    }
}

fn small_config(seed: u64) -> MatchConfig {
    MatchConfig {
        rows: 3,
        cols: 4,
        seed: Some(seed),
        ..MatchConfig::default()
    }
}

#[test]
fn test_illegal_move_forfeits_to_the_opponent() {
    let mut runner = MatchRunner::new(small_config(1));
    let mut cheater = Cheater;
    let mut random = RandomAgent::new("random");

    let report = runner.play_game(0, &mut cheater, &mut random).unwrap();
    assert_eq!(report.outcome, GameOutcome::Forfeit(Player::Two));
    assert_eq!(report.turns, 0);

    let result = runner.run_series(3, &mut cheater, &mut random).unwrap();
    assert_eq!(result.player_two_wins, 3);
    assert_eq!(result.forfeits, 3);
    assert_eq!(result.player_one, "cheater");
}

#[test]
fn test_turn_limit_leaves_game_unfinished() {
    let config = MatchConfig {
        turn_limit: 1,
        seed: Some(5),
        ..MatchConfig::default()
    };
    let mut runner = MatchRunner::new(config);
    let mut one = RandomAgent::new("one");
    let mut two = RandomAgent::new("two");

    let result = runner.run_series(4, &mut one, &mut two).unwrap();
    assert_eq!(result.unfinished, 4);
    assert_eq!(result.unfinished_rate, 1.0);
}

#[test]
fn test_games_reach_a_winner() {
    let mut runner = MatchRunner::new(small_config(77));
    let mut one = RandomAgent::new("one");
    let mut two = RandomAgent::new("two");

    for game_num in 0..20 {
        let report = runner.play_game(game_num, &mut one, &mut two).unwrap();
        assert!(matches!(report.outcome, GameOutcome::Win(_)));
        assert!(report.turns >= 2);
    }
}

#[test]
fn test_observer_event_order() {
    let mut log = EventLog::default();
    {
        let mut runner = MatchRunner::new(small_config(3)).with_observer(Box::new(&mut log));
        let mut one = RandomAgent::new("one");
        let mut two = RandomAgent::new("two");
        runner.run_series(2, &mut one, &mut two).unwrap();
    }

    assert_eq!(log.events.first().map(String::as_str), Some("series_start 2"));
    assert_eq!(log.events.last().map(String::as_str), Some("series_end"));
    assert_eq!(log.events[1], "game_start 0");
    assert_eq!(log.events[2], "move 0 0");

    let game_ends: Vec<_> = log
        .events
        .iter()
        .filter(|event| event.starts_with("game_end"))
        .collect();
    assert_eq!(game_ends, ["game_end 0", "game_end 1"]);
}

#[test]
fn test_seeded_series_are_reproducible() {
    let play = || {
        let mut metrics = MetricsObserver::new();
        let result = {
            let mut runner =
                MatchRunner::new(small_config(2718)).with_observer(Box::new(&mut metrics));
            let mut one = RandomAgent::new("one");
            let mut two = RandomAgent::new("two");
            runner.run_series(10, &mut one, &mut two).unwrap()
        };
        (
            result.player_one_wins,
            metrics.avg_game_length(),
            metrics.total_cascade_steps(),
        )
    };

    assert_eq!(play(), play());
}

#[test]
fn test_jsonl_export_matches_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moves.jsonl");

    let mut metrics = MetricsObserver::new();
    {
        let mut runner = MatchRunner::new(small_config(9))
            .with_observer(Box::new(&mut metrics))
            .with_observer(Box::new(JsonlObserver::new(&path).unwrap()));
        let mut one = MinimaxAgent::new("ai", Difficulty::Easy);
        let mut two = RandomAgent::new("random");
        runner.run_series(3, &mut one, &mut two).unwrap();
    }

    let file = std::fs::File::open(&path).unwrap();
    let observations: Vec<MoveObservation> = BufReader::new(file)
        .lines()
        .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
        .collect();

    let total_moves = (metrics.avg_game_length() * 3.0).round() as usize;
    assert_eq!(observations.len(), total_moves);

    let mut cascade_steps = 0;
    for observation in &observations {
        assert_eq!(observation.snapshots.len(), observation.cascade_steps);
        if let Some(last) = observation.snapshots.last() {
            assert_eq!(last, &observation.grid);
        }
        cascade_steps += observation.cascade_steps;
    }
    assert_eq!(cascade_steps, metrics.total_cascade_steps());
    assert_eq!(observations[0].player, Player::One);
    assert_eq!(observations[0].turn, 0);
}

#[test]
fn test_series_result_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");

    let app = App::new().with_default_seed(4);
    let mut one = app.create_agent(&AgentConfig::minimax(Difficulty::Easy)).unwrap();
    let mut two = app.create_agent(&AgentConfig::random()).unwrap();
    let result = app
        .create_runner(small_config(4))
        .unwrap()
        .run_series(2, one.as_mut(), two.as_mut())
        .unwrap();

    result.save(&path).unwrap();
    let loaded = SeriesResult::load(&path).unwrap();

    assert_eq!(loaded.total_games, 2);
    assert_eq!(loaded.player_one, "minimax (easy)");
    assert_eq!(loaded.player_two, "random");
    assert_eq!(loaded.player_one_wins, result.player_one_wins);
    assert_eq!(loaded.player_one_win_rate, result.player_one_win_rate);
}

#[test]
fn test_missing_summary_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SeriesResult::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, overflow::Error::Io { .. }));
}
