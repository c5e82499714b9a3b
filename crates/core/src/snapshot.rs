use crate::board::{COLS, ROWS};
use crate::pieces::{get_shape, Shape};
use crate::types::{Cell, PieceKind, EMPTY_CELL};
use crate::Tetromino;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    pub fn color(&self) -> Cell {
        self.kind.color_id()
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of a game for render and preview collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; COLS]; ROWS],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub episode_id: u32,
    pub piece_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[EMPTY_CELL; COLS]; ROWS];
        self.active = None;
        self.ghost_y = None;
        self.next = PieceKind::T;
        self.hold = None;
        self.can_hold = true;
        self.score = 0;
        self.episode_id = 0;
        self.piece_id = 0;
    }

    /// Template of the queued piece, for the next preview.
    pub fn next_shape(&self) -> Shape {
        get_shape(self.next)
    }

    /// Template of the held piece, for the hold preview.
    pub fn hold_shape(&self) -> Option<Shape> {
        self.hold.map(get_shape)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[EMPTY_CELL; COLS]; ROWS],
            active: None,
            ghost_y: None,
            next: PieceKind::T,
            hold: None,
            can_hold: true,
            score: 0,
            episode_id: 0,
            piece_id: 0,
        }
    }
}
