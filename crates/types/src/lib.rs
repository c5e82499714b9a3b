//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used by
//! the rules engine, the terminal renderer and the input mapping alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn row**: 0, horizontally centered per shape width
//!
//! # Cell Values
//!
//! A board cell is a `u8` in `0..=7`. `0` is empty; `1..=7` is the color id of the
//! piece that locked there:
//!
//! | Piece | Color id |
//! |-------|----------|
//! | T | 1 |
//! | I | 2 |
//! | O | 3 |
//! | L | 4 |
//! | J | 5 |
//! | S | 6 |
//! | Z | 7 |
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY_INTERVAL_MS` | 1000 | One forced row of descent per second |
//! | `TICK_MS` | 16 | Default frame period of the terminal loop (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color_id(), 1);
//! assert_eq!(PieceKind::from_color_id(2), Some(PieceKind::I));
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Largest shape matrix side (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Gravity interval in milliseconds. Constant: there is no level-based speed-up.
pub const GRAVITY_INTERVAL_MS: u32 = 1000;

/// Points per cleared line. Multi-line clears are linear (4 lines = 400).
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Default frame period of the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// A cell on the game board: `0` is empty, `1..=7` is a color id.
pub type Cell = u8;

/// Value of an empty board cell.
pub const EMPTY_CELL: Cell = 0;

/// The seven tetromino piece kinds
///
/// Declaration order matches the color ids, so `PieceKind::ALL[id - 1]` is the piece
/// for color id `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    I,
    O,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// Every piece kind, in color id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::I,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Color id written into the board when this piece locks (1..=7).
    pub fn color_id(&self) -> Cell {
        match self {
            PieceKind::T => 1,
            PieceKind::I => 2,
            PieceKind::O => 3,
            PieceKind::L => 4,
            PieceKind::J => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Map a board cell value back to its piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_color_id(0), None);
    /// assert_eq!(PieceKind::from_color_id(7), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_color_id(8), None);
    /// ```
    pub fn from_color_id(id: Cell) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Side length of this piece's shape matrix.
    pub fn shape_size(&self) -> usize {
        match self {
            PieceKind::I => 4,
            PieceKind::O => 2,
            _ => 3,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(PieceKind::T),
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter used by previews and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "T",
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }
}

/// Game actions an input collaborator can apply.
///
/// Each action is a single synchronous call into the game state; there is no batching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (no extra score)
    SoftDrop,
    /// Rotate piece 90° clockwise, in place
    Rotate,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Set the active piece aside (once per lock cycle)
    Hold,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
        }
    }
}

/// Why a [`CellEvent`] was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellEventCause {
    /// The cell was written by a locking piece.
    Lock,
    /// The cell was removed as part of a full row.
    LineClear,
}

/// A single board cell touched by a lock or a line clear.
///
/// Renderers turn these into particle effects; the core attaches no meaning to them
/// beyond emitting them in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellEvent {
    pub x: i8,
    pub y: i8,
    pub color: Cell,
    pub cause: CellEventCause,
}

/// Observable outcome emitted by the game state, drained by collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A cell was locked or cleared.
    Cell(CellEvent),
    /// One lock removed `count` full rows (`count > 0`).
    LinesCleared { count: u32 },
    /// The score changed to the contained value.
    ScoreChanged(u32),
    /// The spawn position was blocked; board and score have been reset.
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_ids_round_trip_through_all() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.color_id() as usize, i + 1);
            assert_eq!(PieceKind::from_color_id(kind.color_id()), Some(*kind));
        }
    }

    #[test]
    fn shape_sizes_match_templates() {
        assert_eq!(PieceKind::I.shape_size(), 4);
        assert_eq!(PieceKind::O.shape_size(), 2);
        for kind in [PieceKind::T, PieceKind::L, PieceKind::J, PieceKind::S, PieceKind::Z] {
            assert_eq!(kind.shape_size(), 3);
        }
    }

    #[test]
    fn action_names_parse_back() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::Rotate,
            GameAction::HardDrop,
            GameAction::Hold,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn gravity_and_scoring_defaults() {
        assert_eq!(GRAVITY_INTERVAL_MS, 1000);
        assert_eq!(LINE_CLEAR_POINTS, 100);
        assert_eq!(MAX_SHAPE_SIZE, 4);
    }
}
