//! Grid representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the two sides in the game
///
/// Player one owns positive cells, player two owns negative cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Signed unit this player adds to a cell: +1 or -1
    pub fn sign(self) -> i32 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Owner of a cell value, or `None` for an empty cell
    pub fn from_sign(value: i32) -> Option<Player> {
        match value.signum() {
            1 => Some(Player::One),
            -1 => Some(Player::Two),
            _ => None,
        }
    }

    /// Whether a cell value belongs to this player
    pub fn owns(self, value: i32) -> bool {
        value.signum() == self.sign()
    }

    /// 1-based player number used in reports
    pub fn number(self) -> usize {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

impl FromStr for Player {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "one" | "p1" | "+" | "+1" => Ok(Player::One),
            "2" | "two" | "p2" | "-" | "-1" => Ok(Player::Two),
            other => Err(crate::Error::ParsePlayer {
                input: other.to_string(),
                expected: "1, 2, one, two, p1, p2".to_string(),
            }),
        }
    }
}

/// A placement at a (row, col) coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rectangular matrix of signed gem counts
///
/// The sign of a cell is its owner (see [`Player::sign`]) and the magnitude is
/// the number of gems stacked there. Dimensions never change after
/// construction; `Clone` produces an independent copy of the storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Create the starting position: one gem for player one in the top-left
    /// corner and one for player two in the bottom-right corner.
    pub fn opening(rows: usize, cols: usize) -> Self {
        let mut grid = Self::new(rows, cols);
        if !grid.is_empty() {
            grid.set(0, 0, Player::One.sign());
            grid.set(rows - 1, cols - 1, Player::Two.sign());
        }
        grid
    }

    /// Build a grid from row vectors.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedGrid`] when there are no rows, no
    /// columns, or the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, crate::Error> {
        let Some(first) = rows.first() else {
            return Err(crate::Error::MalformedGrid {
                message: "grid has no rows".to_string(),
            });
        };
        let cols = first.len();
        if cols == 0 {
            return Err(crate::Error::MalformedGrid {
                message: "grid has no columns".to_string(),
            });
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(crate::Error::MalformedGrid {
                    message: format!(
                        "row {index} has {} cells, expected {cols}",
                        row.len()
                    ),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True for a grid with no cells at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major view of all cell values
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Whether (row, col) lies inside the grid
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(self.contains(row, col), "({row}, {col}) out of bounds");
        row * self.cols + col
    }

    /// Get the cell value at (row, col)
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.cells[self.index(row, col)]
    }

    /// Overwrite the cell value at (row, col)
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, value: i32) {
        let idx = self.index(row, col);
        self.cells[idx] = value;
    }

    /// Owner of the cell at (row, col), `None` when empty
    pub fn owner(&self, row: usize, col: usize) -> Option<Player> {
        Player::from_sign(self.get(row, col))
    }

    /// Number of orthogonal neighbours: 2 in corners, 3 on edges, 4 inside.
    ///
    /// This is also the gem count at which a cell overflows.
    pub fn neighbor_count(&self, row: usize, col: usize) -> usize {
        let on_row_edge = row == 0 || row + 1 == self.rows;
        let on_col_edge = col == 0 || col + 1 == self.cols;
        4 - usize::from(on_row_edge) - usize::from(on_col_edge)
    }

    /// In-bounds orthogonal neighbours in the order up, down, left, right
    pub fn neighbors(
        &self,
        row: usize,
        col: usize,
    ) -> impl Iterator<Item = (usize, usize)> + use<> {
        let up = (row > 0).then(|| (row - 1, col));
        let down = (row + 1 < self.rows).then(|| (row + 1, col));
        let left = (col > 0).then(|| (row, col - 1));
        let right = (col + 1 < self.cols).then(|| (row, col + 1));
        [up, down, left, right].into_iter().flatten()
    }

    /// All cells of the 3x3 block centred on (row, col), the centre included
    pub fn neighborhood(&self, row: usize, col: usize) -> impl Iterator<Item = i32> + '_ {
        let rows = row.saturating_sub(1)..=(row + 1).min(self.rows - 1);
        rows.flat_map(move |r| {
            let cols = col.saturating_sub(1)..=(col + 1).min(self.cols - 1);
            cols.map(move |c| self.get(r, c))
        })
    }

    /// Iterate `(row, col, value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &value)| (i / self.cols, i % self.cols, value))
    }

    /// Whether `player` may place on `mv`: the cell is empty or already theirs
    pub fn is_legal(&self, mv: Move, player: Player) -> bool {
        if !self.contains(mv.row, mv.col) {
            return false;
        }
        let value = self.get(mv.row, mv.col);
        value == 0 || player.owns(value)
    }

    /// Legal moves for `player` in row-major order
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        self.iter()
            .filter(|&(_, _, value)| value == 0 || player.owns(value))
            .map(|(row, col, _)| Move::new(row, col))
            .collect()
    }

    /// Add one of `player`'s gems to the target cell.
    ///
    /// This does not resolve chain reactions; see [`crate::game::overflow`].
    ///
    /// # Errors
    ///
    /// Returns an error if the target is outside the grid or owned by the
    /// opponent.
    pub fn place(&mut self, mv: Move, player: Player) -> Result<(), crate::Error> {
        if !self.contains(mv.row, mv.col) {
            return Err(crate::Error::OutOfBounds {
                row: mv.row,
                col: mv.col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !self.is_legal(mv, player) {
            return Err(crate::Error::InvalidMove {
                row: mv.row,
                col: mv.col,
                player,
            });
        }
        let idx = self.index(mv.row, mv.col);
        self.cells[idx] += player.sign();
        Ok(())
    }

    /// Number of cells owned by `player`
    pub fn count_cells(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&value| player.owns(value)).count()
    }

    /// Total gems on the board regardless of owner
    pub fn total_gems(&self) -> u64 {
        self.cells.iter().map(|value| u64::from(value.unsigned_abs())).sum()
    }

    /// True when no two non-zero cells have opposite signs (an empty board
    /// counts as single-signed).
    pub fn is_single_signed(&self) -> bool {
        let mut seen = None;
        for &value in &self.cells {
            let Some(owner) = Player::from_sign(value) else {
                continue;
            };
            match seen {
                None => seen = Some(owner),
                Some(first) if first != owner => return false,
                Some(_) => {}
            }
        }
        true
    }

    /// The only player with cells on the board, if exactly one side remains
    pub fn sole_owner(&self) -> Option<Player> {
        let ones = self.count_cells(Player::One);
        let twos = self.count_cells(Player::Two);
        match (ones, twos) {
            (0, 0) => None,
            (_, 0) => Some(Player::One),
            (0, _) => Some(Player::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>2}", self.get(row, col))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = crate::Error;

    /// Parse rows separated by `/` or newlines, cells by whitespace or commas.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for line in s.split(['/', '\n', ';']) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row_index = rows.len();
            let row = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|token| !token.is_empty())
                .map(|token| {
                    token
                        .parse::<i32>()
                        .map_err(|_| crate::Error::InvalidCellValue {
                            token: token.to_string(),
                            row: row_index,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }
}
