//! Fight! Kokaton — a single-screen arcade game.
//!
//! The player steers a bird around the playfield, shooting beams at a
//! bouncing bomb.  Destroying the bomb scores a point; touching it ends the
//! game.
//!
//! - `entities`: pure data for every game object
//! - `compute`: per-entity movement, bouncing and animation
//! - `game`: the frame loop, collisions and game-over
//! - `assets`, `surface`, `input`, `clock`: the outside world as traits

pub mod assets;
pub mod clock;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod surface;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use game::{run, Game, TickOutcome};
