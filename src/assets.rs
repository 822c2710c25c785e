/// Sprite resolution.
///
/// The simulation only needs a sprite's size (for its bounding box) and an
/// opaque handle to hand back to a `Surface`.  `GlyphAssets` is the built-in
/// provider: small text-art pictures sized in playfield pixels.

use log::debug;

use crate::entities::{Direction, PoseId, Rgb};
use crate::error::{GameError, GameResult};

/// Logical identifier of a picture.
#[derive(Clone, Debug, PartialEq)]
pub enum SpriteId {
    Background,
    Player(Direction),
    Pose(PoseId),
    /// The beam image rotated counter-clockwise by `degrees`.
    Beam { degrees: i32 },
    Explosion(Flip),
    /// Filled circle, as used for the bomb.
    Disc { radius: i32, color: Rgb },
}

/// Orientation of an explosion picture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flip {
    Identity,
    Horizontal,
    Vertical,
    Both,
}

impl Flip {
    pub const ALL: [Flip; 4] = [Flip::Identity, Flip::Horizontal, Flip::Vertical, Flip::Both];
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub id: SpriteId,
    pub width: i32,
    pub height: i32,
    /// Rows of text art, top to bottom.
    pub glyphs: Vec<String>,
    pub color: Rgb,
}

/// Resolves a `SpriteId` to a loaded picture.  Failures are fatal to the caller.
pub trait AssetProvider {
    fn load(&self, id: &SpriteId) -> GameResult<Sprite>;
}

// ── Built-in text-art provider ────────────────────────────────────────────────

const PLAYER_SIZE: i32 = 72;
const BEAM_WIDTH: i32 = 50;
const BEAM_HEIGHT: i32 = 12;
const EXPLOSION_SIZE: i32 = 60;
/// Scale applied to generated discs (bomb pictures are shrunk to 90%).
const DISC_SCALE: f64 = 0.9;

const POSE_FACES: [&str; 10] = [
    "(-v-)", "(ovo)", "(OvO)", "(>v<)", "(;v;)", "(=v=)", "(^v^)", "(@v@)", "(xvx)", "(TvT)",
];

#[derive(Clone, Debug)]
pub struct GlyphAssets {
    width: i32,
    height: i32,
}

impl GlyphAssets {
    /// `width`×`height` is the size of the background picture.
    pub fn new(width: i32, height: i32) -> Self {
        GlyphAssets { width, height }
    }
}

impl AssetProvider for GlyphAssets {
    fn load(&self, id: &SpriteId) -> GameResult<Sprite> {
        debug!("loading sprite {:?}", id);
        let sprite = match id {
            SpriteId::Background => Sprite {
                id: id.clone(),
                width: self.width,
                height: self.height,
                glyphs: Vec::new(),
                color: Rgb::DARK_GREY,
            },
            SpriteId::Player(dir) => {
                let arrow = match dir {
                    Direction::Right => "→",
                    Direction::UpRight => "↗",
                    Direction::Up => "↑",
                    Direction::UpLeft => "↖",
                    Direction::Left => "←",
                    Direction::DownLeft => "↙",
                    Direction::Down => "↓",
                    Direction::DownRight => "↘",
                };
                Sprite {
                    id: id.clone(),
                    width: PLAYER_SIZE,
                    height: PLAYER_SIZE,
                    glyphs: vec!["(ºvº)".to_string(), format!("  {}  ", arrow)],
                    color: Rgb::WHITE,
                }
            }
            SpriteId::Pose(PoseId(num)) => {
                let face = POSE_FACES
                    .get(*num as usize)
                    .ok_or_else(|| GameError::asset(id.clone(), "no such pose"))?;
                Sprite {
                    id: id.clone(),
                    width: PLAYER_SIZE,
                    height: PLAYER_SIZE,
                    glyphs: vec![face.to_string()],
                    color: Rgb::YELLOW,
                }
            }
            SpriteId::Beam { degrees } => beam(id, *degrees)?,
            SpriteId::Explosion(flip) => {
                let glyphs: [&str; 3] = match flip {
                    Flip::Identity => ["\\ |  ", "-*** ", " / \\ "],
                    Flip::Horizontal => ["  | /", " ***-", " / \\ "],
                    Flip::Vertical => [" \\ / ", "-*** ", "\\ |  "],
                    Flip::Both => [" \\ / ", " ***-", "  | /"],
                };
                let color = match flip {
                    Flip::Identity | Flip::Both => Rgb::ORANGE,
                    Flip::Horizontal | Flip::Vertical => Rgb::YELLOW,
                };
                Sprite {
                    id: id.clone(),
                    width: EXPLOSION_SIZE,
                    height: EXPLOSION_SIZE,
                    glyphs: glyphs.iter().map(|g| g.to_string()).collect(),
                    color,
                }
            }
            SpriteId::Disc { radius, color } => {
                if *radius <= 0 {
                    return Err(GameError::asset(id.clone(), "radius must be positive"));
                }
                let side = (f64::from(2 * radius) * DISC_SCALE).round() as i32;
                Sprite {
                    id: id.clone(),
                    width: side,
                    height: side,
                    glyphs: vec!["●".to_string()],
                    color: *color,
                }
            }
        };
        Ok(sprite)
    }
}

/// The beam picture only exists in 45° steps.
fn beam(id: &SpriteId, degrees: i32) -> GameResult<Sprite> {
    if degrees % 45 != 0 {
        return Err(GameError::asset(id.clone(), "beam angle must be a multiple of 45°"));
    }
    let glyph = match degrees.rem_euclid(360) {
        0 => "==>",
        45 => "↗",
        90 => "↑",
        135 => "↖",
        180 => "<==",
        225 => "↙",
        270 => "↓",
        _ => "↘",
    };
    let (width, height) = rotated_size(BEAM_WIDTH, BEAM_HEIGHT, f64::from(degrees));
    Ok(Sprite {
        id: id.clone(),
        width,
        height,
        glyphs: vec![glyph.to_string()],
        color: Rgb::YELLOW,
    })
}

/// Bounding box of a `width`×`height` picture after rotating it by `degrees`.
pub fn rotated_size(width: i32, height: i32, degrees: f64) -> (i32, i32) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (w, h) = (f64::from(width), f64::from(height));
    let rw = (w * cos).abs() + (h * sin).abs();
    let rh = (w * sin).abs() + (h * cos).abs();
    (rw.round() as i32, rh.round() as i32)
}
