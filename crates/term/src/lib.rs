//! Terminal frontend for the falling-block engine.
//!
//! A small, game-oriented rendering layer: snapshots are drawn into a plain
//! framebuffer and flushed to the terminal with crossterm, without widget or
//! layout libraries.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: snapshot to framebuffer (board, ghost, previews, banner)
//! - [`particles`]: cosmetic bursts spawned from the core's cell events
//! - [`renderer`]: the [`Renderer`] seam and the diffing terminal implementation

pub mod fb;
pub mod game_view;
pub mod particles;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{cell_color, AnchorY, Effects, GameView, Viewport};
pub use particles::{Particle, ParticleField};
pub use renderer::{encode_diff_into, encode_full_into, Renderer, TerminalRenderer};
