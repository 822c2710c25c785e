/// Rendering layer — all terminal output lives here.
///
/// `TerminalSurface` squeezes the playfield onto the terminal grid: every
/// sprite is printed as its text art at the cell under its top-left corner.
/// No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use fight_kokaton::assets::{Sprite, SpriteId};
use fight_kokaton::entities::{Point, Rect, Rgb};
use fight_kokaton::surface::Surface;
use fight_kokaton::GameResult;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS_HINT: &str = "← ↑ ↓ → / W A S D : Move   SPACE : Shoot   Q : Quit";

pub struct TerminalSurface<W: Write> {
    out: W,
    /// Playfield size in pixels.
    width: i32,
    height: i32,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, width: i32, height: i32) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(TerminalSurface {
            out,
            width,
            height,
            cols,
            rows,
        })
    }

    /// Rows 0 and `rows - 1` belong to the border; the playfield fills the rest.
    fn cell(&self, p: Point) -> Option<(u16, u16)> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        let inner_cols = i64::from(self.cols.saturating_sub(2));
        let inner_rows = i64::from(self.rows.saturating_sub(3));
        let col = 1 + i64::from(p.x) * inner_cols / i64::from(self.width);
        let row = 1 + i64::from(p.y) * inner_rows / i64::from(self.height);
        Some((col as u16, row as u16))
    }

    fn draw_background(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()?;
        self.draw_controls_hint()
    }

    // ── Border ────────────────────────────────────────────────────────────────

    fn draw_border(&mut self) -> std::io::Result<()> {
        let w = self.cols as usize;
        let bottom = self.rows.saturating_sub(2);

        self.out.queue(style::SetForegroundColor(C_BORDER))?;

        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out
            .queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        self.out.queue(cursor::MoveTo(0, bottom))?;
        self.out
            .queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 1..bottom {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.cols.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    // ── Controls hint (last row) ──────────────────────────────────────────────

    fn draw_controls_hint(&mut self) -> std::io::Result<()> {
        self.out
            .queue(cursor::MoveTo(1, self.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(CONTROLS_HINT))?;
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn blit(&mut self, sprite: &Sprite, at: Rect) -> GameResult<()> {
        if sprite.id == SpriteId::Background {
            self.draw_background()?;
            return Ok(());
        }
        let Some((col, row)) = self.cell(Point::new(at.x.max(0), at.y.max(0))) else {
            return Ok(());
        };
        let last_row = self.rows.saturating_sub(3);
        self.out.queue(style::SetForegroundColor(color(sprite.color)))?;
        for (i, line) in sprite.glyphs.iter().enumerate() {
            let r = row + i as u16;
            if r > last_row {
                break;
            }
            self.out.queue(cursor::MoveTo(col, r))?;
            self.out.queue(Print(line))?;
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, rgb: Rgb, at: Point) -> GameResult<()> {
        if let Some((col, row)) = self.cell(at) {
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(color(rgb)))?;
            self.out.queue(Print(text))?;
        }
        Ok(())
    }

    fn present(&mut self) -> GameResult<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}
