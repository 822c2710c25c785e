/// The per-frame orchestrator.
///
/// `Game` owns every entity.  `tick` runs one frame in a fixed order; the
/// order decides both what is drawn on top and which collisions can happen
/// within the same frame:
///
/// 1. input events (fire / quit)
/// 2. background
/// 3. beams vs. bomb
/// 4. player vs. bomb (game over)
/// 5. player
/// 6. beams
/// 7. bomb
/// 8. explosions
/// 9. score, then present

use log::{info, trace};
use rand::Rng;

use crate::assets::{AssetProvider, Sprite, SpriteId};
use crate::clock::Clock;
use crate::compute::is_inside;
use crate::config::{consts, GameConfig};
use crate::entities::{Effect, GameStatus, Hazard, Player, Point, Projectile, Rect, Rgb, Score};
use crate::error::{GameError, GameResult};
use crate::input::{FrameInput, InputEvent, InputSource};
use crate::surface::Surface;

/// What the caller should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver,
    Quit,
}

pub struct Game {
    pub config: GameConfig,
    pub playfield: Rect,
    pub player: Player,
    /// Live beams in firing order.
    pub projectiles: Vec<Projectile>,
    /// The bomb, until a beam destroys it.  It never respawns.
    pub hazard: Option<Hazard>,
    /// Live explosions in spawn order.
    pub effects: Vec<Effect>,
    pub score: Score,
    pub status: GameStatus,
    /// Completed frames.
    pub frame: u64,
    assets: Box<dyn AssetProvider>,
    background: Sprite,
}

impl Game {
    /// Build the opening position.  Any missing picture aborts start-up.
    pub fn new(
        config: GameConfig,
        assets: Box<dyn AssetProvider>,
        rng: &mut impl Rng,
    ) -> GameResult<Game> {
        config.validate()?;
        let background = assets.load(&SpriteId::Background)?;
        let playfield = Rect::new(0, 0, config.width, config.height);
        let player = Player::new(config.player_start, config.player_step, assets.as_ref())?;
        if !is_inside(&player.rect, &playfield) {
            return Err(GameError::InvalidConfig(format!(
                "player_start {:?} puts the player outside the playfield",
                config.player_start
            )));
        }
        let hazard = Hazard::spawn(&config, assets.as_ref(), rng)?;
        info!(
            "new game: player at {:?}, bomb at {:?}",
            player.rect.center(),
            hazard.rect.center()
        );
        Ok(Game {
            playfield,
            score: Score::new(&config),
            player,
            projectiles: Vec::new(),
            hazard: Some(hazard),
            effects: Vec::new(),
            status: GameStatus::Playing,
            frame: 0,
            config,
            assets,
            background,
        })
    }

    /// Launch one beam from the player's current facing.
    pub fn fire(&mut self) -> GameResult<()> {
        let beam = Projectile::new(&self.player, self.config.projectile_speed, self.assets.as_ref())?;
        self.projectiles.push(beam);
        Ok(())
    }

    /// Run one frame.  After game over this does nothing.
    pub fn tick<S: Surface, C: Clock>(
        &mut self,
        input: &FrameInput,
        surface: &mut S,
        clock: &mut C,
    ) -> GameResult<TickOutcome> {
        if self.status == GameStatus::GameOver {
            return Ok(TickOutcome::GameOver);
        }

        for event in &input.events {
            match event {
                InputEvent::Fire => self.fire()?,
                InputEvent::Quit => {
                    info!("quit requested at frame {}", self.frame);
                    return Ok(TickOutcome::Quit);
                }
            }
        }

        surface.blit(&self.background, self.playfield)?;

        self.resolve_beam_hits(surface)?;

        if self.player_hit() {
            self.game_over(surface, clock)?;
            return Ok(TickOutcome::GameOver);
        }

        self.player.update(&input.keys, &self.playfield, surface)?;

        for beam in &mut self.projectiles {
            beam.update(&self.playfield, surface)?;
        }
        let before = self.projectiles.len();
        let playfield = self.playfield;
        self.projectiles.retain(|beam| is_inside(&beam.rect, &playfield));
        if self.projectiles.len() < before {
            trace!("{} beam(s) left the playfield", before - self.projectiles.len());
        }

        if let Some(hazard) = &mut self.hazard {
            hazard.update(&self.playfield, surface)?;
        }

        for effect in &mut self.effects {
            effect.update(surface)?;
        }
        self.effects.retain(|effect| !effect.is_expired());

        self.score.render(surface)?;
        surface.present()?;
        self.frame += 1;
        Ok(TickOutcome::Continue)
    }

    /// The first beam (in firing order) touching the bomb destroys it.  With
    /// the bomb gone, other overlapping beams this frame fly on.
    fn resolve_beam_hits<S: Surface>(&mut self, surface: &mut S) -> GameResult<()> {
        let hit = self.hazard.as_ref().and_then(|hazard| {
            self.projectiles
                .iter()
                .position(|beam| beam.rect.collides(&hazard.rect))
        });
        let Some(index) = hit else {
            return Ok(());
        };
        let Some(hazard) = self.hazard.take() else {
            return Ok(());
        };

        self.projectiles.remove(index);
        let center = hazard.rect.center();
        self.effects.push(Effect::new(
            center,
            self.config.effect_lifetime,
            self.config.effect_frame_period,
            self.assets.as_ref(),
        )?);
        self.player
            .trigger_pose(consts::HAPPY_POSE, self.assets.as_ref(), surface)?;
        self.score.increment();
        info!(
            "bomb destroyed at {:?} on frame {}, score {}",
            center, self.frame, self.score.value
        );
        Ok(())
    }

    fn player_hit(&self) -> bool {
        self.hazard
            .as_ref()
            .is_some_and(|hazard| self.player.rect.collides(&hazard.rect))
    }

    fn game_over<S: Surface, C: Clock>(&mut self, surface: &mut S, clock: &mut C) -> GameResult<()> {
        self.player
            .trigger_pose(consts::HURT_POSE, self.assets.as_ref(), surface)?;
        let at = Point::new(
            self.config.width / 2 - consts::GAME_OVER_OFFSET_X,
            self.config.height / 2,
        );
        surface.draw_text(consts::GAME_OVER_TEXT, Rgb::RED, at)?;
        surface.present()?;
        clock.sleep(self.config.game_over_delay());
        self.status = GameStatus::GameOver;
        info!("game over on frame {} with score {}", self.frame, self.score.value);
        Ok(())
    }
}

/// Drive `game` until it ends or the player quits, pacing frames with `clock`.
pub fn run<I: InputSource, S: Surface, C: Clock>(
    game: &mut Game,
    input: &mut I,
    surface: &mut S,
    clock: &mut C,
) -> GameResult<TickOutcome> {
    loop {
        let frame = input.poll()?;
        match game.tick(&frame, surface, clock)? {
            TickOutcome::Continue => clock.throttle(game.config.tick_rate),
            outcome => return Ok(outcome),
        }
    }
}
