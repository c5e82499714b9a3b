//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::particles::Particle;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, MAX_SHAPE_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Frontend-only decorations drawn on top of a snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Effects<'a> {
    pub particles: &'a [Particle],
    /// Transient banner centered over the board (e.g. after a game over).
    pub banner: Option<&'a str>,
}

const PLAY_BG: Rgb = Rgb::new(17, 17, 17);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Display color for a board cell value; `None` for empty or unknown ids.
pub fn cell_color(cell: Cell) -> Option<Rgb> {
    let rgb = match cell {
        1 => Rgb::new(0xFF, 0x0D, 0x72),
        2 => Rgb::new(0x0D, 0xC2, 0xFF),
        3 => Rgb::new(0x0D, 0xFF, 0x72),
        4 => Rgb::new(0xF5, 0x38, 0xFF),
        5 => Rgb::new(0xFF, 0x8E, 0x0D),
        6 => Rgb::new(0xFF, 0xE1, 0x38),
        7 => Rgb::new(0x38, 0x77, 0xFF),
        _ => return None,
    };
    Some(rgb)
}

/// A lightweight terminal renderer for the playfield.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the playfield landed inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers reuse the framebuffer across frames; it is only resized when the
    /// viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_effects(snap, &Effects::default(), viewport, fb);
    }

    pub fn render_into_with_effects(
        &self,
        snap: &GameSnapshot,
        effects: &Effects<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let layout = Layout {
            start_x: viewport.width.saturating_sub(board_px_w + 2) / 2,
            start_y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_px_h + 2) / 2,
                AnchorY::Top => 0,
            },
            frame_w: board_px_w + 2,
            frame_h: board_px_h + 2,
        };

        let bg = CellStyle::fg_on(Rgb::new(60, 60, 60), PLAY_BG);
        fb.fill_rect(layout.start_x + 1, layout.start_y + 1, board_px_w, board_px_h, ' ', bg);
        draw_border(
            fb,
            layout.start_x,
            layout.start_y,
            layout.frame_w,
            layout.frame_h,
            CellStyle::fg_on(Rgb::new(200, 200, 200), PANEL_BG),
        );

        // Locked cells.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if let Some(rgb) = cell_color(cell) {
                    self.draw_block(fb, &layout, x as i8, y as i8, rgb);
                } else {
                    let dot = CellStyle {
                        dim: true,
                        ..CellStyle::fg_on(Rgb::new(60, 60, 60), PLAY_BG)
                    };
                    self.fill_cell(fb, &layout, x as i8, y as i8, '·', dot);
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y {
                let ghost = CellStyle {
                    dim: true,
                    ..CellStyle::fg_on(Rgb::new(140, 140, 140), PLAY_BG)
                };
                for (dx, dy, _) in active.shape.minos() {
                    self.fill_cell(fb, &layout, active.x + dx, ghost_y + dy, '░', ghost);
                }
            }

            for (dx, dy, color) in active.shape.minos() {
                if let Some(rgb) = cell_color(color) {
                    self.draw_block(fb, &layout, active.x + dx, active.y + dy, rgb);
                }
            }
        }

        for particle in effects.particles {
            self.draw_particle(fb, &layout, particle);
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if let Some(text) = effects.banner {
            draw_banner(fb, &layout, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_effects(
        &self,
        snap: &GameSnapshot,
        effects: &Effects<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_effects(snap, effects, viewport, &mut fb);
        fb
    }

    /// Shaded block: highlight on the left column, shadow on the right.
    fn draw_block(&self, fb: &mut FrameBuffer, layout: &Layout, x: i8, y: i8, rgb: Rgb) {
        let Some((px, py)) = self.cell_origin(layout, x, y) else {
            return;
        };
        for dy in 0..self.cell_h {
            for dx in 0..self.cell_w {
                let fg = if dx == 0 {
                    rgb.lighten(60)
                } else if dx + 1 == self.cell_w {
                    rgb.darken(60)
                } else {
                    rgb
                };
                fb.put_char(px + dx, py + dy, '█', CellStyle::fg_on(fg, PLAY_BG));
            }
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: &Layout, x: i8, y: i8, ch: char, style: CellStyle) {
        if let Some((px, py)) = self.cell_origin(layout, x, y) {
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
        }
    }

    /// Terminal position of a board cell; `None` outside the visible board.
    fn cell_origin(&self, layout: &Layout, x: i8, y: i8) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((
            layout.start_x + 1 + x as u16 * self.cell_w,
            layout.start_y + 1 + y as u16 * self.cell_h,
        ))
    }

    fn draw_particle(&self, fb: &mut FrameBuffer, layout: &Layout, p: &Particle) {
        if p.x < 0.0 || p.y < 0.0 {
            return;
        }
        let col = (p.x * self.cell_w as f32) as u16;
        let row = (p.y * self.cell_h as f32) as u16;
        if col >= BOARD_WIDTH as u16 * self.cell_w || row >= BOARD_HEIGHT as u16 * self.cell_h {
            return;
        }
        let Some(rgb) = cell_color(p.color) else {
            return;
        };
        let ch = if p.size > 0.15 { '•' } else { '·' };
        fb.put_char(
            layout.start_x + 1 + col,
            layout.start_y + 1 + row,
            ch,
            CellStyle::fg_on(rgb.lighten(80), PLAY_BG),
        );
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: &Layout) {
        let panel_x = layout.start_x.saturating_add(layout.frame_w).saturating_add(2);
        let preview_w = MAX_SHAPE_SIZE as u16 * self.cell_w + 2;
        if panel_x >= viewport.width || viewport.width - panel_x < preview_w {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::fg_on(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::fg_on(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, Some(snap.next_shape()), false);
        y = y.saturating_add(MAX_SHAPE_SIZE as u16 * self.cell_h + 3);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, snap.hold_shape(), !snap.can_hold);
    }

    /// Boxed 4x4 preview with the shape centered inside.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: Option<Shape>, dim: bool) {
        let inner_w = MAX_SHAPE_SIZE as u16 * self.cell_w;
        let inner_h = MAX_SHAPE_SIZE as u16 * self.cell_h;
        draw_border(
            fb,
            x,
            y,
            inner_w + 2,
            inner_h + 2,
            CellStyle::fg_on(Rgb::new(120, 120, 120), PANEL_BG),
        );
        fb.fill_rect(x + 1, y + 1, inner_w, inner_h, ' ', CellStyle::fg_on(PLAY_BG, PLAY_BG));

        let Some(shape) = shape else {
            return;
        };
        let pad = (MAX_SHAPE_SIZE - shape.size()) as u16;
        let off_x = x + 1 + pad * self.cell_w / 2;
        let off_y = y + 1 + pad * self.cell_h / 2;
        for (dx, dy, color) in shape.minos() {
            let Some(rgb) = cell_color(color) else {
                continue;
            };
            let style = CellStyle {
                dim,
                ..CellStyle::fg_on(rgb, PLAY_BG)
            };
            fb.fill_rect(
                off_x + dx as u16 * self.cell_w,
                off_y + dy as u16 * self.cell_h,
                self.cell_w,
                self.cell_h,
                '█',
                style,
            );
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_banner(fb: &mut FrameBuffer, layout: &Layout, text: &str) {
    let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = layout.start_x.saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle {
        bold: true,
        ..CellStyle::fg_on(Rgb::new(255, 255, 255), PANEL_BG)
    };
    fb.put_str(x, mid_y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_palette_covers_color_ids() {
        assert_eq!(cell_color(0), None);
        assert_eq!(cell_color(1), Rgb::from_hex("#FF0D72"));
        assert_eq!(cell_color(7), Rgb::from_hex("#3877FF"));
        assert_eq!(cell_color(8), None);
    }

    #[test]
    fn test_top_anchor_puts_border_on_first_row() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&GameSnapshot::default(), Viewport::new(22, 22));
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
    }

    #[test]
    fn test_preview_centers_o_piece() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let snap = GameSnapshot {
            next: PieceKind::O,
            ..GameSnapshot::default()
        };
        let fb = view.render(&snap, Viewport::new(50, 24));

        // Panel starts two columns right of the 22-wide board frame; NEXT box at row 4.
        let box_x = 14 + 22 + 2;
        let box_y = 4;
        assert_eq!(fb.get(box_x, box_y).unwrap().ch, '┌');
        // O is 2x2 inside a 4x4 box: one cell of padding on every side.
        let inner_y = box_y + 1;
        assert_eq!(fb.get(box_x + 1 + 2, inner_y).unwrap().ch, ' ');
        assert_eq!(fb.get(box_x + 1 + 2, inner_y + 1).unwrap().ch, '█');
        assert_eq!(fb.get(box_x + 1 + 5, inner_y + 2).unwrap().ch, '█');
        assert_eq!(fb.get(box_x + 1 + 6, inner_y + 2).unwrap().ch, ' ');
    }
}
