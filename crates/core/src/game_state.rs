//! Game state module - manages the complete game state
//!
//! This module ties together the board, the piece catalog, the active piece and the
//! hold/next queue. It applies player actions, runs the gravity timer, and sequences
//! lock → clear → spawn, including the game-over reset.
//!
//! Rejected actions (blocked move, blocked rotation, hold while hold is spent) leave the
//! state untouched and return `false`. Game over is not an error: the board and score are
//! reset and a [`GameEvent::GameOver`] is queued, after which play continues.

use tracing::{debug, info, trace};

use crate::clock::Clock;
use crate::pieces::{get_shape, spawn_x, Shape, SPAWN_Y};
use crate::rng::PieceCatalog;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;
use crate::Board;

/// Active falling piece
///
/// Holds its own copy of the shape matrix; rotating it never touches the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at its spawn position
    pub fn new(kind: PieceKind) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(shape.size()),
            y: SPAWN_Y,
        }
    }

    /// Check if any mino is out of bounds or overlaps a locked cell
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    /// Copy of this piece shifted by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy of this piece rotated 90° clockwise in place
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    /// Copy of this piece at the row a hard drop would reach
    pub fn ghost(&self, board: &Board) -> Self {
        Self {
            y: board.drop_y(&self.shape, self.x, self.y),
            ..*self
        }
    }
}

/// Tunables for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Milliseconds of accumulated time per forced row of descent.
    pub gravity_interval_ms: u32,
    /// Piece sequence seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity_interval_ms: GRAVITY_INTERVAL_MS,
            seed: None,
        }
    }
}

/// Result of spawning the next piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned,
    /// The spawn placement collided; the board and score were reset.
    GameOver,
}

/// Result of locking the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub lines_cleared: u32,
    pub game_over: bool,
}

/// What one gravity tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not enough time accumulated yet.
    Idle,
    /// The active piece fell one row.
    Fell,
    /// The piece could not fall and was locked.
    Locked(LockOutcome),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Tetromino,
    next: PieceKind,
    hold: Option<PieceKind>,
    can_hold: bool,
    catalog: PieceCatalog,
    score: u32,
    drop_timer_ms: u32,
    gravity_interval_ms: u32,
    /// Monotonic count of game-over resets.
    episode_id: u32,
    /// Monotonic id of spawned pieces (increments on every spawn, including hold spawns).
    piece_id: u32,
    /// Pending events for collaborators.
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed and default gravity
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        })
    }

    pub fn with_config(config: GameConfig) -> Self {
        let mut catalog = match config.seed {
            Some(seed) => PieceCatalog::new(seed),
            None => PieceCatalog::from_entropy(),
        };

        // The first draw becomes active, the second waits in `next`.
        let first = catalog.random_piece();
        let next = catalog.random_piece();

        Self {
            board: Board::new(),
            active: Tetromino::new(first),
            next,
            hold: None,
            can_hold: true,
            catalog,
            score: 0,
            drop_timer_ms: 0,
            gravity_interval_ms: config.gravity_interval_ms.max(1),
            episode_id: 0,
            piece_id: 1,
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up positions (puzzles, tests).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Tetromino {
        self.active
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn gravity_interval_ms(&self) -> u32 {
        self.gravity_interval_ms
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Landing projection of the active piece. Never moves the real piece.
    pub fn ghost(&self) -> Tetromino {
        self.active.ghost(&self.board)
    }

    /// Take all events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = self.board.to_rows();
        out.active = Some(ActiveSnapshot::from(self.active));
        out.ghost_y = Some(self.ghost().y);
        out.next = self.next;
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a single player action. Returns false if the action was rejected.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Hold => self.hold(),
        }
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let moved = self.active.shifted(dx, dy);
        if moved.collides(&self.board) {
            return false;
        }
        self.active = moved;
        true
    }

    /// Try to rotate the active piece clockwise. No kicks: blocked means no-op.
    pub fn try_rotate(&mut self) -> bool {
        let rotated = self.active.rotated();
        if rotated.collides(&self.board) {
            return false;
        }
        self.active = rotated;
        true
    }

    /// Drop the active piece as far as it goes, then lock it
    pub fn hard_drop(&mut self) -> LockOutcome {
        let mut distance = 0u32;
        while self.try_move(0, 1) {
            distance += 1;
        }
        trace!(kind = ?self.active.kind, distance, "hard drop");
        self.lock_piece()
    }

    /// Set the active piece aside, once per lock cycle.
    ///
    /// With an empty hold slot the active kind is stored and the next piece spawns from
    /// the queue. Otherwise the active and held kinds swap and the incoming piece starts
    /// over at its spawn position. The held piece is always kept unrotated.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }

        let current = self.active.kind;
        match self.hold {
            None => {
                self.hold = Some(current);
                self.spawn_piece();
            }
            Some(held) => {
                let swapped = Tetromino::new(held);
                if swapped.collides(&self.board) {
                    return false;
                }
                self.active = swapped;
                self.hold = Some(current);
            }
        }

        self.can_hold = false;
        debug!(held = ?current, active = ?self.active.kind, "hold");
        true
    }

    /// Lock the active piece onto the board, clear lines and spawn the next piece
    pub fn lock_piece(&mut self) -> LockOutcome {
        let active = self.active;
        let events = &mut self.events;

        self.board.lock(&active.shape, active.x, active.y, |e| {
            events.push(GameEvent::Cell(e))
        });
        let cleared = self.board.clear_lines(|e| events.push(GameEvent::Cell(e)));
        let lines_cleared = cleared.len() as u32;

        debug!(kind = ?active.kind, x = active.x, y = active.y, lines_cleared, "piece locked");

        if lines_cleared > 0 {
            self.score += lines_cleared * LINE_CLEAR_POINTS;
            self.events.push(GameEvent::LinesCleared {
                count: lines_cleared,
            });
            self.events.push(GameEvent::ScoreChanged(self.score));
            debug!(rows = ?cleared.as_slice(), score = self.score, "lines cleared");
        }

        let game_over = self.spawn_piece() == SpawnOutcome::GameOver;
        LockOutcome {
            lines_cleared,
            game_over,
        }
    }

    /// Promote `next` to active, draw a fresh `next`, and check the spawn placement.
    ///
    /// A blocked spawn is game over: the board empties and the score resets, but the new
    /// piece stays active so play can continue immediately.
    pub fn spawn_piece(&mut self) -> SpawnOutcome {
        let kind = self.next;
        self.next = self.catalog.random_piece();
        self.active = Tetromino::new(kind);
        self.piece_id = self.piece_id.wrapping_add(1);
        self.can_hold = true;

        trace!(?kind, next = ?self.next, x = self.active.x, "spawn");

        if self.active.collides(&self.board) {
            self.reset_after_game_over();
            return SpawnOutcome::GameOver;
        }

        SpawnOutcome::Spawned
    }

    fn reset_after_game_over(&mut self) {
        info!(
            score = self.score,
            episode = self.episode_id,
            "spawn blocked, game over"
        );
        self.board.reset_to_empty();
        self.score = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::GameOver);
    }

    /// Main game tick - accumulate time and apply gravity
    ///
    /// Once the accumulated time reaches the gravity interval the piece falls one row, or
    /// locks if it cannot. The accumulator resets after either branch.
    pub fn tick(&mut self, elapsed_ms: u32) -> TickOutcome {
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.gravity_interval_ms {
            return TickOutcome::Idle;
        }

        let outcome = if self.try_move(0, 1) {
            TickOutcome::Fell
        } else {
            TickOutcome::Locked(self.lock_piece())
        };
        self.drop_timer_ms = 0;
        outcome
    }

    /// Tick with whatever time the clock reports.
    pub fn advance(&mut self, clock: &mut impl Clock) -> TickOutcome {
        self.tick(clock.delta_ms())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
