//! Presenting frames: the [`Renderer`] seam and its crossterm implementation.
//!
//! [`TerminalRenderer`] keeps the last presented framebuffer and only emits the runs
//! of cells that changed, falling back to a full redraw on the first frame or after a
//! resize.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{Effects, GameView, Viewport};

/// Anything that can show a game frame.
///
/// The game loop only talks to this trait, so a headless or recording implementation
/// can stand in for the terminal.
pub trait Renderer {
    fn present(&mut self, snap: &GameSnapshot, effects: &Effects<'_>) -> Result<()>;
}

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    view: GameView,
    viewport: Viewport,
    frame: FrameBuffer,
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    /// Renderer on stdout sized to the current terminal.
    pub fn stdout() -> Result<Self> {
        let (w, h) = terminal::size()?;
        Ok(Self::with_writer(io::stdout(), Viewport::new(w, h)))
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W, viewport: Viewport) -> Self {
        Self {
            out,
            view: GameView::default(),
            viewport,
            frame: FrameBuffer::new(viewport.width, viewport.height),
            shown: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn with_view(mut self, view: GameView) -> Self {
        self.view = view;
        self
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Adopt a new terminal size; the next frame is a full redraw.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.shown = None;
    }

    /// Push `self.frame` to the writer, diffing against the previous frame.
    fn flush_frame(&mut self) -> Result<()> {
        self.buf.clear();
        match self.shown.as_mut() {
            Some(prev) if same_size(prev, &self.frame) => {
                encode_diff_into(prev, &self.frame, &mut self.buf)?;
                // Swap so the old buffer is reused for the next render.
                std::mem::swap(prev, &mut self.frame);
            }
            _ => {
                encode_full_into(&self.frame, &mut self.buf)?;
                self.shown = Some(self.frame.clone());
            }
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn present(&mut self, snap: &GameSnapshot, effects: &Effects<'_>) -> Result<()> {
        self.view
            .render_into_with_effects(snap, effects, self.viewport, &mut self.frame);
        self.flush_frame()
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Tracks the active style so consecutive cells with equal styles emit one SGR sequence.
struct StyleCursor {
    current: Option<CellStyle>,
}

impl StyleCursor {
    fn new() -> Self {
        Self { current: None }
    }

    fn print(&mut self, out: &mut Vec<u8>, fb: &FrameBuffer, x: u16, y: u16) -> Result<()> {
        let cell = fb.get(x, y).unwrap_or_default();
        if self.current != Some(cell.style) {
            queue_style(out, cell.style)?;
            self.current = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut styles = StyleCursor::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            styles.print(out, fb, x, y)?;
        }
        if y + 1 < fb.height() {
            out.queue(Print("\r\n"))?;
        }
    }
    styles.finish(out)
}

/// Encode only the changed runs between two same-sized frames into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut styles = StyleCursor::new();
    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            styles.print(out, next, x + dx, y)?;
        }
    }
    styles.finish(out)
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Horizontal runs `(x, y, len)` of cells that differ between `prev` and `next`.
///
/// A size mismatch marks every row dirty.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let resized = !same_size(prev, next);
    let w = next.width();

    (0..next.height()).flat_map(move |y| {
        let mut runs = Vec::new();
        if resized {
            runs.push((0, y, w));
            return runs;
        }
        let dirty = |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        while x < w {
            if !dirty(x) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && dirty(x) {
                x += 1;
            }
            runs.push((start, y, x - start));
        }
        runs
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Cell;

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            b.set(x, 0, Cell { ch: 'X', style });
        }
        b.set(5, 1, Cell { ch: 'Y', style });

        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn resized_frames_are_fully_dirty() {
        let a = FrameBuffer::new(3, 1);
        let b = FrameBuffer::new(4, 2);
        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(0, 0, 4), (0, 1, 4)]);
    }

    #[test]
    fn identical_frames_emit_only_reset() {
        let fb = FrameBuffer::new(4, 4);
        let mut diff = Vec::new();
        encode_diff_into(&fb, &fb, &mut diff).unwrap();

        let mut reset = Vec::new();
        StyleCursor::new().finish(&mut reset).unwrap();
        assert_eq!(diff, reset);
    }

    #[test]
    fn second_present_of_same_state_is_small() {
        let mut renderer = TerminalRenderer::with_writer(Vec::new(), Viewport::new(40, 24));
        let snap = GameSnapshot::default();

        renderer.present(&snap, &Effects::default()).unwrap();
        let first = renderer.writer().len();
        renderer.present(&snap, &Effects::default()).unwrap();
        let second = renderer.writer().len() - first;

        assert!(first > 0);
        assert!(second < first / 10);
    }
}
