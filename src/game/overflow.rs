//! Chain-reaction simulator
//!
//! A cell overflows once its gem count reaches its neighbour count. Each
//! cascade step empties every overflowing cell at once and hands one gem to
//! each orthogonal neighbour, converting the neighbour to the cascading side.
//! Steps repeat until nothing overflows or only one side is left on the board.

use tracing::trace;

use super::{grid::Grid, record::Recorder};

/// Coordinates of every overflowing cell, in row-major order
pub fn overflowing_cells(grid: &Grid) -> Vec<(usize, usize)> {
    grid.iter()
        .filter(|&(row, col, value)| value.unsigned_abs() as usize >= grid.neighbor_count(row, col))
        .map(|(row, col, _)| (row, col))
        .collect()
}

/// Resolve the chain reaction on `grid` in place.
///
/// Returns the number of cascade steps performed; 0 means the grid was
/// already stable.
pub fn resolve(grid: &mut Grid) -> usize {
    run(grid, None)
}

/// Resolve the chain reaction on `grid`, handing a snapshot of the grid to
/// `recorder` after every cascade step.
pub fn resolve_recorded(grid: &mut Grid, recorder: &mut dyn Recorder) -> usize {
    run(grid, Some(recorder))
}

fn run(grid: &mut Grid, mut recorder: Option<&mut dyn Recorder>) -> usize {
    if grid.is_empty() {
        return 0;
    }

    let mut steps = 0;
    loop {
        let overflowing = overflowing_cells(grid);
        let Some(&(first_row, first_col)) = overflowing.first() else {
            break;
        };
        if grid.is_single_signed() {
            break;
        }

        // The first overflowing cell in scan order decides whose gems spread.
        let sign = grid.get(first_row, first_col).signum();

        for &(row, col) in &overflowing {
            grid.set(row, col, 0);
        }
        for &(row, col) in &overflowing {
            spread(grid, row, col, sign);
        }

        if let Some(recorder) = recorder.as_deref_mut() {
            recorder.record(grid);
        }
        steps += 1;
        trace!(
            step = steps,
            overflowing = overflowing.len(),
            sign,
            "cascade step"
        );
    }

    steps
}

/// Give one gem to each neighbour of (row, col), capturing occupied
/// neighbours for the side given by `sign` without changing their count.
fn spread(grid: &mut Grid, row: usize, col: usize, sign: i32) {
    for (r, c) in grid.neighbors(row, col) {
        let captured = grid.get(r, c).abs() * sign;
        grid.set(r, c, captured + sign);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::record::OverflowRecord;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    #[test]
    fn test_no_overflow_below_threshold() {
        let mut board = grid("1 1 / 0 -1");
        assert_eq!(resolve(&mut board), 0);
        assert_eq!(board, grid("1 1 / 0 -1"));
    }

    #[test]
    fn test_single_corner_overflow() {
        let mut board = grid("2 0 / 0 -1");
        let mut frames = OverflowRecord::new();

        assert_eq!(resolve_recorded(&mut board, &mut frames), 1);
        assert_eq!(board, grid("0 1 / 1 -1"));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames.back(), Some(&board));
    }

    #[test]
    fn test_cascade_captures_and_stops_when_one_side_left() {
        let mut board = grid("2 1 / 0 -1");
        let mut frames = Vec::new();

        let steps = resolve_recorded(&mut board, &mut frames);

        assert_eq!(steps, 2);
        assert_eq!(frames[0], grid("0 2 / 1 -1"));
        // (1,1) is captured at magnitude 1 and then receives a gem.
        assert_eq!(board, grid("1 0 / 1 2"));
        assert_eq!(frames[1], board);
    }

    #[test]
    fn test_first_overflowing_cell_sets_sign() {
        let mut board = grid("2 0 0 / 0 0 0 / 0 0 -2");
        assert_eq!(resolve(&mut board), 1);
        assert_eq!(board, grid("0 1 0 / 1 0 1 / 0 1 0"));
    }

    #[test]
    fn test_single_signed_board_is_left_alone() {
        let mut board = grid("2 0 / 0 3");
        assert_eq!(resolve(&mut board), 0);
        assert_eq!(board, grid("2 0 / 0 3"));
    }

    #[test]
    fn test_overflowing_cells_row_major() {
        let board = grid("0 3 0 / 4 -4 2 / 0 0 -2");
        assert_eq!(overflowing_cells(&board), vec![(0, 1), (1, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_empty_grid_is_noop() {
        let mut board = Grid::new(0, 0);
        assert_eq!(resolve(&mut board), 0);
    }

    #[test]
    fn test_resolved_grid_is_stable() {
        let mut board = grid("2 1 -1 / 0 3 -2 / -1 0 1");
        resolve(&mut board);
        let settled = board.clone();
        assert_eq!(resolve(&mut board), 0);
        assert_eq!(board, settled);
    }
}
