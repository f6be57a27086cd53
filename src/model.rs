//! Core data models for the minimax explorer.
//! Wire types mirror the game service's JSON bodies; the session reducer
//! holds the client-side state fed by the service round trips.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

/// One board cell, serialized the way the service writes it: "X", "O" or "".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[serde(rename = "X")]
    X,
    #[serde(rename = "O")]
    O,
    #[default]
    #[serde(rename = "")]
    Empty,
}

impl Mark {
    pub fn as_str(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
            Mark::Empty => "",
        }
    }
}

/// Row-major 3x3 board.
pub type Board = [Mark; 9];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum Winner {
    X,
    O,
    Tie,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AiStats {
    pub nodes_explored: u64,
    pub algorithm: String,
}

/// Full game state as reported by the service after a move or reset.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current_player: Mark,
    pub game_over: bool,
    #[serde(default)]
    pub winner: Option<Winner>,
    #[serde(default)]
    pub ai_stats: Option<AiStats>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [Mark::Empty; 9],
            current_player: Mark::X,
            game_over: false,
            winner: None,
            ai_stats: None,
        }
    }
}

/// Status line shown above the board.
pub fn status_text(game: &GameState) -> String {
    if game.game_over {
        match game.winner {
            Some(Winner::X) => "Player X wins!".to_string(),
            Some(Winner::O) => "Player O wins!".to_string(),
            _ => "It's a tie!".to_string(),
        }
    } else {
        format!("{}'s turn", game.current_player.as_str())
    }
}

/// One node of a search-tree snapshot.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub board: Board,
    pub score: i32,
    pub depth: u32,
    #[serde(rename = "isPruned", default)]
    pub is_pruned: bool,
    #[serde(rename = "currentPlayer")]
    pub current_player: Mark,
}

impl TreeNode {
    /// The mark shown as "to move" on the node card. `currentPlayer` records
    /// the mark that moved into this position, so the card shows its opposite.
    pub fn next_player(&self) -> Mark {
        if self.current_player == Mark::X {
            Mark::O
        } else {
            Mark::X
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TreeEdge {
    pub from: String,
    pub to: String,
    #[serde(rename = "isPruned", default)]
    pub is_pruned: bool,
}

/// One complete search-tree snapshot for a single board state. Immutable once
/// received; a new board state always produces a whole new snapshot.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
    pub edges: Vec<TreeEdge>,
    #[serde(rename = "maxDepth", default)]
    pub max_depth: Option<u32>,
    #[serde(rename = "nodesExplored", default)]
    pub nodes_explored: Option<u64>,
}

/// Sign bucket for a node score, used to pick the badge styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreTone {
    Positive,
    Negative,
    Neutral,
}

impl ScoreTone {
    pub fn for_score(score: i32) -> Self {
        if score > 0 {
            ScoreTone::Positive
        } else if score < 0 {
            ScoreTone::Negative
        } else {
            ScoreTone::Neutral
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreTone::Positive => "score-positive",
            ScoreTone::Negative => "score-negative",
            ScoreTone::Neutral => "score-neutral",
        }
    }
}

/// Positive scores carry an explicit sign: "+3", "-2", "0".
pub fn format_score(score: i32) -> String {
    if score > 0 {
        format!("+{score}")
    } else {
        score.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "minmax")]
    MinMax,
    #[serde(rename = "alphabeta")]
    AlphaBeta,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::MinMax => "minmax",
            Algorithm::AlphaBeta => "alphabeta",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::MinMax => "MinMax",
            Algorithm::AlphaBeta => "Alpha-Beta",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "minmax" => Some(Algorithm::MinMax),
            "alphabeta" => Some(Algorithm::AlphaBeta),
            _ => None,
        }
    }
}

// ---------------- Session reducer & actions -----------------

#[derive(Clone, Debug)]
pub enum SessionAction {
    ApplyGame(GameState),
    ApplyTree(Tree),
    SelectAlgorithm(Algorithm),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub game: GameState,
    pub tree: Rc<Tree>,
    pub algorithm: Algorithm,
    /// Bumped on every applied tree so dependent effects re-run even when two
    /// consecutive snapshots compare equal.
    pub tree_version: u64,
}

impl Session {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            game: GameState::default(),
            tree: Rc::new(Tree::default()),
            algorithm,
            tree_version: 0,
        }
    }
}

impl Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            SessionAction::ApplyGame(game) => {
                next.game = game;
            }
            SessionAction::ApplyTree(tree) => {
                next.tree = Rc::new(tree);
                next.tree_version += 1;
            }
            SessionAction::SelectAlgorithm(algorithm) => {
                next.algorithm = algorithm;
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_tone_follows_sign() {
        assert_eq!(ScoreTone::for_score(3), ScoreTone::Positive);
        assert_eq!(ScoreTone::for_score(-2), ScoreTone::Negative);
        assert_eq!(ScoreTone::for_score(0), ScoreTone::Neutral);
    }

    #[test]
    fn score_formatting_signs() {
        assert_eq!(format_score(3), "+3");
        assert_eq!(format_score(-2), "-2");
        assert_eq!(format_score(0), "0");
    }

    #[test]
    fn node_card_shows_opposite_of_current_player() {
        let mut node = TreeNode {
            id: "n".to_string(),
            board: [Mark::Empty; 9],
            score: 0,
            depth: 0,
            is_pruned: false,
            current_player: Mark::X,
        };
        assert_eq!(node.next_player(), Mark::O);
        node.current_player = Mark::O;
        assert_eq!(node.next_player(), Mark::X);
    }

    #[test]
    fn status_line_variants() {
        let mut game = GameState::default();
        assert_eq!(status_text(&game), "X's turn");

        game.game_over = true;
        game.winner = Some(Winner::Tie);
        assert_eq!(status_text(&game), "It's a tie!");

        game.winner = Some(Winner::O);
        assert_eq!(status_text(&game), "Player O wins!");
    }

    #[test]
    fn parses_game_state_payload() {
        let payload = r#"{
            "board": ["X", "", "", "", "O", "", "", "", ""],
            "current_player": "X",
            "game_over": false,
            "winner": null,
            "ai_stats": {"nodes_explored": 549946, "algorithm": "alphabeta"}
        }"#;
        let game: GameState = serde_json::from_str(payload).unwrap();
        assert_eq!(game.board[0], Mark::X);
        assert_eq!(game.board[4], Mark::O);
        assert_eq!(game.board[1], Mark::Empty);
        assert!(!game.game_over);
        assert_eq!(game.winner, None);
        assert_eq!(game.ai_stats.unwrap().nodes_explored, 549946);
    }

    #[test]
    fn parses_tree_payload() {
        let payload = r#"{
            "nodes": [
                {"id": "-71", "board": ["", "", "", "", "", "", "", "", ""],
                 "score": 0, "depth": 0, "isPruned": false, "currentPlayer": "X"},
                {"id": "82", "board": ["X", "", "", "", "", "", "", "", ""],
                 "score": -1, "depth": 1, "isPruned": true, "currentPlayer": "O"}
            ],
            "edges": [{"from": "-71", "to": "82", "isPruned": true}],
            "maxDepth": 3,
            "nodesExplored": 10
        }"#;
        let tree: Tree = serde_json::from_str(payload).unwrap();
        assert_eq!(tree.nodes.len(), 2);
        assert_eq!(tree.nodes[1].score, -1);
        assert!(tree.nodes[1].is_pruned);
        assert_eq!(tree.nodes[1].current_player, Mark::O);
        assert_eq!(tree.edges[0].from, "-71");
        assert!(tree.edges[0].is_pruned);
        assert_eq!(tree.max_depth, Some(3));
        assert_eq!(tree.nodes_explored, Some(10));
    }

    #[test]
    fn algorithm_wire_names() {
        assert_eq!(Algorithm::MinMax.as_str(), "minmax");
        assert_eq!(Algorithm::AlphaBeta.as_str(), "alphabeta");
        assert_eq!(Algorithm::from_wire("alphabeta"), Some(Algorithm::AlphaBeta));
        assert_eq!(Algorithm::from_wire("negamax"), None);
        assert_eq!(
            serde_json::to_string(&Algorithm::AlphaBeta).unwrap(),
            "\"alphabeta\""
        );
    }

    #[test]
    fn applying_a_tree_bumps_the_version() {
        let session = Rc::new(Session::new(Algorithm::MinMax));
        let next = session.reduce(SessionAction::ApplyTree(Tree::default()));
        assert_eq!(next.tree_version, 1);
        let next = next.reduce(SessionAction::ApplyTree(Tree::default()));
        assert_eq!(next.tree_version, 2);
    }
}
