/// All game entity types — pure data, no logic.
///
/// Behaviour lives in `compute` (entity updates) and `game` (the per-frame
/// orchestrator).  Coordinates are playfield pixels with y growing downward.

use serde::{Deserialize, Serialize};

use crate::assets::Sprite;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Discrete movement / velocity step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector2i {
    pub dx: i32,
    pub dy: i32,
}

impl Vector2i {
    pub const ZERO: Vector2i = Vector2i { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Vector2i { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl std::ops::Add for Vector2i {
    type Output = Vector2i;

    fn add(self, rhs: Vector2i) -> Vector2i {
        Vector2i::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl std::ops::Neg for Vector2i {
    type Output = Vector2i;

    fn neg(self) -> Vector2i {
        Vector2i::new(-self.dx, -self.dy)
    }
}

/// Axis-aligned bounding box.  `right`/`bottom` are exclusive edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    /// A `width`×`height` box whose center is `center`.
    pub fn centered_at(center: Point, width: i32, height: i32) -> Self {
        Rect::new(center.x - width / 2, center.y - height / 2, width, height)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn move_by(&mut self, delta: Vector2i) {
        self.x += delta.dx;
        self.y += delta.dy;
    }

    /// True when the two boxes share a non-empty intersection.
    pub fn collides(&self, other: &Rect) -> bool {
        if self.width <= 0 || self.height <= 0 || other.width <= 0 || other.height <= 0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const YELLOW: Rgb = Rgb(255, 220, 0);
    pub const ORANGE: Rgb = Rgb(255, 140, 0);
    pub const DARK_GREY: Rgb = Rgb(90, 90, 90);
}

// ── Directions ────────────────────────────────────────────────────────────────

/// One of the four movement keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cardinal {
    Up,
    Down,
    Left,
    Right,
}

impl Cardinal {
    pub const ALL: [Cardinal; 4] = [Cardinal::Up, Cardinal::Down, Cardinal::Left, Cardinal::Right];

    /// Unit step for this key (multiply by the step size).
    pub fn unit(self) -> Vector2i {
        match self {
            Cardinal::Up => Vector2i::new(0, -1),
            Cardinal::Down => Vector2i::new(0, 1),
            Cardinal::Left => Vector2i::new(-1, 0),
            Cardinal::Right => Vector2i::new(1, 0),
        }
    }
}

/// Eight-way facing.  Declared counter-clockwise from 0° (screen right);
/// the discriminant doubles as the sprite-table index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right = 0,
    UpRight = 1,
    Up = 2,
    UpLeft = 3,
    Left = 4,
    DownLeft = 5,
    Down = 6,
    DownRight = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::UpRight,
        Direction::Up,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
    ];

    /// Classify a movement delta by the signs of its components.
    /// The zero vector has no direction.
    pub fn from_delta(delta: Vector2i) -> Option<Direction> {
        match (delta.dx.signum(), delta.dy.signum()) {
            (1, 0) => Some(Direction::Right),
            (1, -1) => Some(Direction::UpRight),
            (0, -1) => Some(Direction::Up),
            (-1, -1) => Some(Direction::UpLeft),
            (-1, 0) => Some(Direction::Left),
            (-1, 1) => Some(Direction::DownLeft),
            (0, 1) => Some(Direction::Down),
            (1, 1) => Some(Direction::DownRight),
            _ => None,
        }
    }

    /// Unit vector (components in -1..=1) pointing this way in screen space.
    pub fn unit(self) -> Vector2i {
        match self {
            Direction::Right => Vector2i::new(1, 0),
            Direction::UpRight => Vector2i::new(1, -1),
            Direction::Up => Vector2i::new(0, -1),
            Direction::UpLeft => Vector2i::new(-1, -1),
            Direction::Left => Vector2i::new(-1, 0),
            Direction::DownLeft => Vector2i::new(-1, 1),
            Direction::Down => Vector2i::new(0, 1),
            Direction::DownRight => Vector2i::new(1, 1),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Numbered alternate player pictures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoseId(pub u8);

impl PoseId {
    pub const HAPPY: PoseId = PoseId(6);
    pub const HURT: PoseId = PoseId(8);
}

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Pre-oriented player sprites, one per `Direction`.
#[derive(Clone, Debug)]
pub struct DirectionalSprites(pub [Sprite; 8]);

impl DirectionalSprites {
    pub fn get(&self, dir: Direction) -> &Sprite {
        &self.0[dir.index()]
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    /// Last non-zero movement delta.
    pub facing: Vector2i,
    /// Picture currently shown (directional or a pose).
    pub sprite: Sprite,
    pub sprites: DirectionalSprites,
    /// Pixels moved per pressed key per frame.
    pub step: i32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub rect: Rect,
    pub velocity: Vector2i,
    /// Render rotation in degrees, counter-clockwise.
    pub angle: f64,
    pub sprite: Sprite,
}

// ── Hazard ────────────────────────────────────────────────────────────────────

/// The bouncing bomb.  At most one is alive; the game holds it in an `Option`.
#[derive(Clone, Debug)]
pub struct Hazard {
    pub rect: Rect,
    pub velocity: Vector2i,
    pub color: Rgb,
    pub radius: i32,
    pub sprite: Sprite,
}

// ── Effects ───────────────────────────────────────────────────────────────────

/// A short explosion animation.
#[derive(Clone, Debug)]
pub struct Effect {
    pub rect: Rect,
    /// Remaining frames to display.
    pub life: u32,
    /// Frames each animation picture stays up.
    pub frame_period: u32,
    pub frames: [Sprite; 4],
}

// ── Score ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Score {
    pub value: u32,
    pub color: Rgb,
    /// Top-left corner of the score text.
    pub position: Point,
}
