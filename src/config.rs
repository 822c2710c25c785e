/// Game configuration.
///
/// Defaults reproduce the stock game; a JSON file can override any field.

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::entities::{Point, Rgb};
use crate::error::{GameError, GameResult};

/// Fixed values that are not worth exposing as settings.
pub mod consts {
    /// Pose shown when the bomb is destroyed.
    pub const HAPPY_POSE: crate::entities::PoseId = crate::entities::PoseId::HAPPY;
    /// Pose shown on game over.
    pub const HURT_POSE: crate::entities::PoseId = crate::entities::PoseId::HURT;
    pub const GAME_OVER_TEXT: &str = "Game Over";
    /// Game-over banner offset left of the playfield center.
    pub const GAME_OVER_OFFSET_X: i32 = 150;
    pub const TITLE: &str = "Fight! Kokaton";
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    /// Frames per second.
    pub tick_rate: u32,
    pub player_start: Point,
    /// Pixels per pressed key per frame.
    pub player_step: i32,
    pub projectile_speed: i32,
    pub hazard_radius: i32,
    pub hazard_color: Rgb,
    pub hazard_speed: i32,
    /// Explosion length in frames.
    pub effect_lifetime: u32,
    /// Frames per explosion picture.
    pub effect_frame_period: u32,
    pub game_over_delay_ms: u64,
    pub score_color: Rgb,
    pub score_position: Point,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1100,
            height: 650,
            tick_rate: 50,
            player_start: Point::new(300, 200),
            player_step: 5,
            projectile_speed: 5,
            hazard_radius: 10,
            hazard_color: Rgb::RED,
            hazard_speed: 5,
            effect_lifetime: 20,
            effect_frame_period: 5,
            game_over_delay_ms: 2000,
            score_color: Rgb::BLUE,
            score_position: Point::new(30, 33),
        }
    }
}

impl GameConfig {
    /// Read `path` if given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> GameResult<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                let config: GameConfig = serde_json::from_str(&text)?;
                info!("loaded config from {}", path.display());
                config
            }
            None => {
                warn!("no config file given, using defaults");
                GameConfig::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GameResult<()> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("player_step", self.player_step),
            ("projectile_speed", self.projectile_speed),
            ("hazard_radius", self.hazard_radius),
            ("hazard_speed", self.hazard_speed),
        ];
        for (name, value) in positive {
            if value <= 0 {
                return Err(GameError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.tick_rate == 0 {
            return Err(GameError::InvalidConfig("tick_rate must be positive".into()));
        }
        if self.effect_frame_period == 0 {
            return Err(GameError::InvalidConfig(
                "effect_frame_period must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn game_over_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.game_over_delay_ms)
    }
}
