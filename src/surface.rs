/// Render target abstraction.
///
/// The simulation only ever blits sprites, draws text and presents; it never
/// reads anything back.

use crate::assets::Sprite;
use crate::entities::{Point, Rect, Rgb};
use crate::error::GameResult;

pub trait Surface {
    /// Draw `sprite` with its top-left corner at `at`'s top-left.
    fn blit(&mut self, sprite: &Sprite, at: Rect) -> GameResult<()>;
    /// Draw a line of text with its top-left corner at `at`.
    fn draw_text(&mut self, text: &str, color: Rgb, at: Point) -> GameResult<()>;
    /// Show everything drawn since the last present.
    fn present(&mut self) -> GameResult<()>;
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Blit { sprite: Sprite, at: Rect },
    Text { text: String, color: Rgb, at: Point },
}

/// Headless surface that keeps every draw call, grouped by presented frame.
#[derive(Debug, Default)]
pub struct Recorder {
    /// Draw calls since the last `present`.
    pub pending: Vec<DrawOp>,
    /// Completed frames, oldest first.
    pub frames: Vec<Vec<DrawOp>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently presented frame.
    pub fn last_frame(&self) -> Option<&[DrawOp]> {
        self.frames.last().map(|f| f.as_slice())
    }

    /// Every text drawn in pending and presented frames.
    pub fn texts(&self) -> Vec<&str> {
        self.frames
            .iter()
            .flatten()
            .chain(self.pending.iter())
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Blit { .. } => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    fn blit(&mut self, sprite: &Sprite, at: Rect) -> GameResult<()> {
        self.pending.push(DrawOp::Blit {
            sprite: sprite.clone(),
            at,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, color: Rgb, at: Point) -> GameResult<()> {
        self.pending.push(DrawOp::Text {
            text: text.to_string(),
            color,
            at,
        });
        Ok(())
    }

    fn present(&mut self) -> GameResult<()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}
