//! Fixed-depth game tree with minimax and alpha-beta pruning
//!
//! The tree is expanded eagerly into an arena of nodes. Every child is the
//! parent's grid after one legal move and a fully resolved chain reaction.
//! Nodes stay available after a search for inspection; the whole tree is
//! dropped once the caller has extracted its move.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::evaluation::evaluate;
use crate::game::{Grid, Move, Player, overflow};

/// Index of a node inside a [`GameTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How much of a node's score the search established
///
/// Alpha-beta stops exploring a node once its value can no longer matter to
/// the parent, leaving only a bound on the true minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoreBound {
    /// The minimax value itself
    #[default]
    Exact,
    /// The true value is at most the score
    Upper,
    /// The true value is at least the score
    Lower,
}

/// A root move with its searched score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "move")]
    pub mv: Move,
    pub score: f64,
    pub bound: ScoreBound,
}

impl Candidate {
    pub fn is_exact(&self) -> bool {
        self.bound == ScoreBound::Exact
    }
}

/// One hypothetical board state in the search
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Board after the move that produced this node, fully resolved
    pub grid: Grid,
    /// Ply index, 0 at the root
    pub depth: usize,
    /// Side to move at this node
    pub to_move: Player,
    /// Move that produced this node (`None` at the root)
    pub mv: Option<Move>,
    /// Children in row-major move order
    pub children: Vec<NodeId>,
    /// Minimax value, `None` until visited by a search
    pub score: Option<f64>,
    /// Whether `score` is exact or a cutoff bound
    pub bound: ScoreBound,
}

impl SearchNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes visited by the search
    pub nodes_visited: usize,
    /// Leaves handed to the evaluator
    pub leaves_evaluated: usize,
    /// Sibling lists abandoned because `beta <= alpha`
    pub cutoffs: usize,
}

/// Search strategy over an already built tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchMode {
    /// Minimax with alpha-beta pruning
    #[default]
    AlphaBeta,
    /// Plain minimax visiting every node
    Exhaustive,
}

/// Game tree rooted at the current position of `player`
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<SearchNode>,
    player: Player,
    height: usize,
    stats: SearchStats,
    searched: bool,
}

const ROOT: NodeId = NodeId(0);

impl GameTree {
    /// Expand the full tree of `height` plies below a copy of `grid`.
    ///
    /// Nodes at depth `height - 1` are leaves, so a height of 1 produces a
    /// root without children.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDepth`] when `height` is 0.
    pub fn build(grid: &Grid, player: Player, height: usize) -> Result<Self, crate::Error> {
        if height == 0 {
            return Err(crate::Error::InvalidDepth { depth: height });
        }

        let mut tree = Self {
            nodes: vec![SearchNode {
                grid: grid.clone(),
                depth: 0,
                to_move: player,
                mv: None,
                children: Vec::new(),
                score: None,
                bound: ScoreBound::Exact,
            }],
            player,
            height,
            stats: SearchStats::default(),
            searched: false,
        };

        let mut pending = vec![ROOT];
        while let Some(id) = pending.pop() {
            tree.expand(id)?;
            pending.extend(tree.nodes[id.0].children.iter().rev());
        }

        Ok(tree)
    }

    fn expand(&mut self, id: NodeId) -> Result<(), crate::Error> {
        let parent = &self.nodes[id.0];
        if parent.depth + 1 >= self.height {
            return Ok(());
        }

        let depth = parent.depth + 1;
        let mover = parent.to_move;
        let mut children = Vec::new();
        for mv in parent.grid.legal_moves(mover) {
            let mut grid = parent.grid.clone();
            grid.place(mv, mover)?;
            overflow::resolve(&mut grid);
            children.push(SearchNode {
                grid,
                depth,
                to_move: mover.opponent(),
                mv: Some(mv),
                children: Vec::new(),
                score: None,
                bound: ScoreBound::Exact,
            });
        }

        let first = self.nodes.len();
        self.nodes.extend(children);
        self.nodes[id.0].children = (first..self.nodes.len()).map(NodeId).collect();
        Ok(())
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// Total number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Player the tree is searched for
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Counters from the most recent search
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Run minimax with alpha-beta pruning and return the root value.
    pub fn search(&mut self) -> f64 {
        self.run(SearchMode::AlphaBeta)
    }

    /// Run minimax without pruning and return the root value.
    pub fn search_exhaustive(&mut self) -> f64 {
        self.run(SearchMode::Exhaustive)
    }

    /// Search with the given strategy, replacing scores from earlier searches
    pub fn run(&mut self, mode: SearchMode) -> f64 {
        for node in &mut self.nodes {
            node.score = None;
            node.bound = ScoreBound::Exact;
        }
        self.stats = SearchStats::default();

        let value = self.minimax(ROOT, f64::NEG_INFINITY, f64::INFINITY, mode);
        self.searched = true;
        debug!(
            player = %self.player,
            height = self.height,
            ?mode,
            tree_nodes = self.nodes.len(),
            visited = self.stats.nodes_visited,
            leaves = self.stats.leaves_evaluated,
            cutoffs = self.stats.cutoffs,
            value,
            "search finished"
        );
        value
    }

    fn minimax(&mut self, id: NodeId, floor: f64, ceiling: f64, mode: SearchMode) -> f64 {
        self.stats.nodes_visited += 1;

        let node = &self.nodes[id.0];
        if node.is_leaf() {
            let value = evaluate(&node.grid, self.player);
            self.stats.leaves_evaluated += 1;
            self.nodes[id.0].score = Some(value);
            return value;
        }

        let maximizing = node.to_move == self.player;
        let (mut alpha, mut beta) = (floor, ceiling);
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for i in 0..self.nodes[id.0].children.len() {
            let child = self.nodes[id.0].children[i];
            let value = self.minimax(child, alpha, beta, mode);
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }
            if mode == SearchMode::AlphaBeta && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        // Outside the incoming window the value only bounds the true one.
        let bound = match mode {
            SearchMode::Exhaustive => ScoreBound::Exact,
            SearchMode::AlphaBeta if best <= floor => ScoreBound::Upper,
            SearchMode::AlphaBeta if best >= ceiling => ScoreBound::Lower,
            SearchMode::AlphaBeta => ScoreBound::Exact,
        };
        let node = &mut self.nodes[id.0];
        node.score = Some(best);
        node.bound = bound;
        best
    }

    /// Scored root children in expansion order; empty before a search.
    ///
    /// After an alpha-beta search a child refuted early carries an
    /// [`ScoreBound::Upper`] bound. The chosen move is always exact.
    pub fn root_scores(&self) -> Vec<Candidate> {
        self.nodes[ROOT.0]
            .children
            .iter()
            .filter_map(|&id| {
                let node = &self.nodes[id.0];
                Some(Candidate {
                    mv: node.mv?,
                    score: node.score?,
                    bound: node.bound,
                })
            })
            .collect()
    }

    /// Move of the highest-scoring root child; the first one wins ties.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoMoveAvailable`] when the root has no scored
    /// children, either because no legal move exists or because the tree has
    /// not been searched.
    pub fn best_move(&self) -> Result<Move, crate::Error> {
        let mut best: Option<(Move, f64)> = None;
        if self.searched {
            for candidate in self.root_scores() {
                if best.is_none_or(|(_, best_score)| candidate.score > best_score) {
                    best = Some((candidate.mv, candidate.score));
                }
            }
        }
        best.map(|(mv, _)| mv)
            .ok_or(crate::Error::NoMoveAvailable {
                player: self.player,
            })
    }
}

/// Outcome of one decision, with enough detail for reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub player: Player,
    pub depth: usize,
    pub mode: SearchMode,
    pub best_move: Move,
    /// Minimax value of the root
    pub value: f64,
    /// Root children in expansion order. Under alpha-beta, children refuted
    /// early report an upper bound instead of their exact score.
    pub candidates: Vec<Candidate>,
    pub tree_nodes: usize,
    pub stats: SearchStats,
}

/// Search `grid` for `player` and describe the decision.
///
/// The caller's grid is copied, never modified.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidDepth`] for depth 0 and
/// [`crate::Error::NoMoveAvailable`] when the root has no children.
pub fn analyze(
    grid: &Grid,
    player: Player,
    depth: usize,
    mode: SearchMode,
) -> Result<SearchReport, crate::Error> {
    let mut tree = GameTree::build(grid, player, depth)?;
    let value = tree.run(mode);
    let best_move = tree.best_move()?;

    Ok(SearchReport {
        player,
        depth,
        mode,
        best_move,
        value,
        candidates: tree.root_scores(),
        tree_nodes: tree.len(),
        stats: tree.stats(),
    })
}

/// Pick the best move for `player` with a fixed-depth alpha-beta search.
///
/// # Errors
///
/// See [`analyze`].
pub fn choose_move(grid: &Grid, player: Player, depth: usize) -> Result<Move, crate::Error> {
    let mut tree = GameTree::build(grid, player, depth)?;
    tree.search();
    let mv = tree.best_move()?;
    debug!(player = %player, depth, mv = %mv, "move chosen");
    Ok(mv)
}
