/// Entity behaviour.
///
/// Each `update` advances one entity by one frame and draws it onto the
/// supplied surface.  Nothing here owns another entity; cross-entity rules
/// (collisions, spawning, removal) live in `game`.

use log::debug;
use rand::Rng;

use crate::assets::{AssetProvider, Flip, Sprite, SpriteId};
use crate::config::GameConfig;
use crate::entities::{
    Cardinal, Direction, DirectionalSprites, Effect, Hazard, Player, Point, PoseId, Projectile,
    Rect, Score, Vector2i,
};
use crate::error::{GameError, GameResult};
use crate::input::KeySnapshot;
use crate::surface::Surface;

// ── Bounds ───────────────────────────────────────────────────────────────────

/// Per-axis containment of `rect` inside `playfield`: `(within_x, within_y)`.
pub fn check_bounds(rect: &Rect, playfield: &Rect) -> (bool, bool) {
    let within_x = !(rect.left() < playfield.left() || rect.right() > playfield.right());
    let within_y = !(rect.top() < playfield.top() || rect.bottom() > playfield.bottom());
    (within_x, within_y)
}

pub fn is_inside(rect: &Rect, playfield: &Rect) -> bool {
    check_bounds(rect, playfield) == (true, true)
}

// ── Player ───────────────────────────────────────────────────────────────────

impl Player {
    /// Player centered on `center`, facing right.
    pub fn new(center: Point, step: i32, assets: &dyn AssetProvider) -> GameResult<Player> {
        let loaded = Direction::ALL
            .iter()
            .map(|dir| assets.load(&SpriteId::Player(*dir)))
            .collect::<GameResult<Vec<Sprite>>>()?;
        let table: [Sprite; 8] = loaded.try_into().map_err(|_| {
            GameError::asset(SpriteId::Player(Direction::Right), "incomplete direction table")
        })?;
        let sprites = DirectionalSprites(table);
        let sprite = sprites.get(Direction::Right).clone();
        Ok(Player {
            rect: Rect::centered_at(center, sprite.width, sprite.height),
            facing: Vector2i::new(step, 0),
            sprite,
            sprites,
            step,
        })
    }

    /// Net movement for the held keys.  Opposite keys cancel out.
    pub fn movement(&self, keys: &KeySnapshot) -> Vector2i {
        Cardinal::ALL
            .iter()
            .filter(|key| keys.is_pressed(**key))
            .fold(Vector2i::ZERO, |sum, key| {
                let unit = key.unit();
                sum + Vector2i::new(unit.dx * self.step, unit.dy * self.step)
            })
    }

    /// Move by the held keys, refusing any move that would leave the
    /// playfield, then draw.  Returns the attempted delta.
    pub fn update<S: Surface>(
        &mut self,
        keys: &KeySnapshot,
        playfield: &Rect,
        surface: &mut S,
    ) -> GameResult<Vector2i> {
        let delta = self.movement(keys);
        self.rect.move_by(delta);
        if !is_inside(&self.rect, playfield) {
            self.rect.move_by(-delta);
        }
        if let Some(dir) = Direction::from_delta(delta) {
            self.sprite = self.sprites.get(dir).clone();
            self.facing = delta;
        }
        surface.blit(&self.sprite, self.rect)?;
        Ok(delta)
    }

    /// Show an alternate picture in place.  Position and facing are kept; the
    /// pose stays up until the player next moves.
    pub fn trigger_pose<S: Surface>(
        &mut self,
        pose: PoseId,
        assets: &dyn AssetProvider,
        surface: &mut S,
    ) -> GameResult<()> {
        self.sprite = assets.load(&SpriteId::Pose(pose))?;
        surface.blit(&self.sprite, self.rect)
    }

    pub fn direction(&self) -> Option<Direction> {
        Direction::from_delta(self.facing)
    }
}

// ── Projectile ───────────────────────────────────────────────────────────────

impl Projectile {
    /// Beam leaving `firer`'s edge in its facing direction.  A firer with no
    /// facing shoots right.
    pub fn new(firer: &Player, speed: i32, assets: &dyn AssetProvider) -> GameResult<Projectile> {
        let facing = firer.facing;
        let unit = Vector2i::new(facing.dx.signum(), facing.dy.signum());
        let velocity = if unit.is_zero() {
            Vector2i::new(speed, 0)
        } else {
            Vector2i::new(unit.dx * speed, unit.dy * speed)
        };
        let angle = if facing.is_zero() {
            0.0
        } else {
            f64::from(-facing.dy).atan2(f64::from(facing.dx)).to_degrees()
        };
        let sprite = assets.load(&SpriteId::Beam {
            degrees: angle.round() as i32,
        })?;

        let origin = firer.rect.center();
        let center = Point::new(
            origin.x + firer.rect.width / 2 * unit.dx,
            origin.y + firer.rect.height / 2 * unit.dy,
        );
        debug!("beam fired at {:?} with velocity {:?}", center, velocity);
        Ok(Projectile {
            rect: Rect::centered_at(center, sprite.width, sprite.height),
            velocity,
            angle,
            sprite,
        })
    }

    /// Advance and draw while fully inside the playfield.  Once outside it
    /// neither moves nor draws; the owner removes it.
    pub fn update<S: Surface>(&mut self, playfield: &Rect, surface: &mut S) -> GameResult<()> {
        if is_inside(&self.rect, playfield) {
            self.rect.move_by(self.velocity);
            surface.blit(&self.sprite, self.rect)?;
        }
        Ok(())
    }
}

// ── Hazard ───────────────────────────────────────────────────────────────────

impl Hazard {
    pub fn new(
        center: Point,
        config: &GameConfig,
        assets: &dyn AssetProvider,
    ) -> GameResult<Hazard> {
        let sprite = assets.load(&SpriteId::Disc {
            radius: config.hazard_radius,
            color: config.hazard_color,
        })?;
        Ok(Hazard {
            rect: Rect::centered_at(center, sprite.width, sprite.height),
            velocity: Vector2i::new(config.hazard_speed, config.hazard_speed),
            color: config.hazard_color,
            radius: config.hazard_radius,
            sprite,
        })
    }

    /// Hazard at a random position fully inside the playfield.
    pub fn spawn(
        config: &GameConfig,
        assets: &dyn AssetProvider,
        rng: &mut impl Rng,
    ) -> GameResult<Hazard> {
        let mut hazard = Hazard::new(Point::new(0, 0), config, assets)?;
        let max_x = (config.width - hazard.rect.width).max(0);
        let max_y = (config.height - hazard.rect.height).max(0);
        hazard.rect.x = rng.gen_range(0..=max_x);
        hazard.rect.y = rng.gen_range(0..=max_y);
        Ok(hazard)
    }

    /// Reflect off any edge it is crossing, then move and draw.
    pub fn update<S: Surface>(&mut self, playfield: &Rect, surface: &mut S) -> GameResult<()> {
        let (within_x, within_y) = check_bounds(&self.rect, playfield);
        if !within_x {
            self.velocity.dx = -self.velocity.dx;
        }
        if !within_y {
            self.velocity.dy = -self.velocity.dy;
        }
        self.rect.move_by(self.velocity);
        surface.blit(&self.sprite, self.rect)
    }
}

// ── Effect ───────────────────────────────────────────────────────────────────

impl Effect {
    pub fn new(
        center: Point,
        lifetime: u32,
        frame_period: u32,
        assets: &dyn AssetProvider,
    ) -> GameResult<Effect> {
        let [a, b, c, d] = Flip::ALL;
        let frames = [
            assets.load(&SpriteId::Explosion(a))?,
            assets.load(&SpriteId::Explosion(b))?,
            assets.load(&SpriteId::Explosion(c))?,
            assets.load(&SpriteId::Explosion(d))?,
        ];
        let rect = Rect::centered_at(center, frames[0].width, frames[0].height);
        Ok(Effect {
            rect,
            life: lifetime,
            frame_period: frame_period.max(1),
            frames,
        })
    }

    /// Animation picture for the current remaining life.
    pub fn frame_index(&self) -> usize {
        (self.life / self.frame_period) as usize % self.frames.len()
    }

    /// Draw the current picture and count down one frame.
    pub fn update<S: Surface>(&mut self, surface: &mut S) -> GameResult<()> {
        if self.life > 0 {
            surface.blit(&self.frames[self.frame_index()], self.rect)?;
            self.life -= 1;
        }
        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        self.life == 0
    }
}

// ── Score ────────────────────────────────────────────────────────────────────

impl Score {
    pub fn new(config: &GameConfig) -> Score {
        Score {
            value: 0,
            color: config.score_color,
            position: config.score_position,
        }
    }

    pub fn increment(&mut self) {
        self.value += 1;
    }

    pub fn text(&self) -> String {
        format!("Score: {}", self.value)
    }

    pub fn render<S: Surface>(&self, surface: &mut S) -> GameResult<()> {
        surface.draw_text(&self.text(), self.color, self.position)
    }
}
