use std::time::Duration;

use fight_kokaton::assets::{AssetProvider, GlyphAssets, Sprite, SpriteId};
use fight_kokaton::clock::ManualClock;
use fight_kokaton::compute::is_inside;
use fight_kokaton::entities::*;
use fight_kokaton::input::{FrameInput, InputEvent, ScriptedInput};
use fight_kokaton::surface::{DrawOp, Recorder};
use fight_kokaton::{run, Game, GameConfig, GameError, GameResult, TickOutcome};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn new_game() -> Game {
    let config = GameConfig::default();
    let assets = GlyphAssets::new(config.width, config.height);
    let mut game = Game::new(config, Box::new(assets), &mut StdRng::seed_from_u64(42)).unwrap();
    // Park the bomb well away from the player so tests control every contact.
    game.hazard = Some(hazard_at(&game, Point::new(900, 500)));
    game
}

fn hazard_at(game: &Game, center: Point) -> Hazard {
    let assets = GlyphAssets::new(game.config.width, game.config.height);
    Hazard::new(center, &game.config, &assets).unwrap()
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn fire() -> FrameInput {
    FrameInput::default().with_event(InputEvent::Fire)
}

fn tick(game: &mut Game, input: &FrameInput) -> (TickOutcome, Recorder, ManualClock) {
    let mut surface = Recorder::new();
    let mut clock = ManualClock::new();
    let outcome = game.tick(input, &mut surface, &mut clock).unwrap();
    (outcome, surface, clock)
}

/// Move the only beam so its center sits at `center`.
fn place_beam(game: &mut Game, index: usize, center: Point) {
    let beam = &mut game.projectiles[index];
    beam.rect = Rect::centered_at(center, beam.rect.width, beam.rect.height);
}

// ── Start-up ──────────────────────────────────────────────────────────────────

#[test]
fn new_game_opening_position() {
    let config = GameConfig::default();
    let assets = GlyphAssets::new(config.width, config.height);
    let game = Game::new(config, Box::new(assets), &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(game.player.rect.center(), Point::new(300, 200));
    assert_eq!(game.player.direction(), Some(Direction::Right));
    assert!(game.projectiles.is_empty());
    assert!(game.effects.is_empty());
    assert_eq!(game.score.value, 0);
    assert_eq!(game.status, GameStatus::Playing);
    assert_eq!(game.frame, 0);
    let hazard = game.hazard.as_ref().unwrap();
    assert!(is_inside(&hazard.rect, &game.playfield));
    assert_eq!(hazard.velocity, Vector2i::new(5, 5));
}

#[test]
fn new_game_rejects_invalid_config() {
    let config = GameConfig {
        tick_rate: 0,
        ..GameConfig::default()
    };
    let assets = GlyphAssets::new(1100, 650);
    let result = Game::new(config, Box::new(assets), &mut StdRng::seed_from_u64(1));
    assert!(matches!(result, Err(GameError::InvalidConfig(_))));
}

#[test]
fn new_game_rejects_start_outside_playfield() {
    let config = GameConfig {
        player_start: Point::new(5, 5),
        ..GameConfig::default()
    };
    let assets = GlyphAssets::new(1100, 650);
    let result = Game::new(config, Box::new(assets), &mut StdRng::seed_from_u64(1));
    assert!(matches!(result, Err(GameError::InvalidConfig(_))));
}

#[test]
fn new_game_accepts_start_touching_the_edge() {
    // 72×72 player centered at (36, 36) sits exactly in the corner.
    let config = GameConfig {
        player_start: Point::new(36, 36),
        ..GameConfig::default()
    };
    let assets = GlyphAssets::new(1100, 650);
    let game = Game::new(config, Box::new(assets), &mut StdRng::seed_from_u64(1)).unwrap();
    assert!(is_inside(&game.player.rect, &game.playfield));
}

/// Provider missing some pictures.
struct Broken {
    inner: GlyphAssets,
    poses: bool,
    players: bool,
}

impl AssetProvider for Broken {
    fn load(&self, id: &SpriteId) -> GameResult<Sprite> {
        match id {
            SpriteId::Pose(_) if !self.poses => Err(GameError::asset(id.clone(), "missing")),
            SpriteId::Player(_) if !self.players => Err(GameError::asset(id.clone(), "missing")),
            _ => self.inner.load(id),
        }
    }
}

#[test]
fn missing_player_sprites_abort_startup() {
    let assets = Broken {
        inner: GlyphAssets::new(1100, 650),
        poses: true,
        players: false,
    };
    let result = Game::new(
        GameConfig::default(),
        Box::new(assets),
        &mut StdRng::seed_from_u64(1),
    );
    assert!(matches!(result, Err(GameError::AssetLoad { .. })));
}

#[test]
fn missing_pose_sprite_fails_the_tick() {
    let assets = Broken {
        inner: GlyphAssets::new(1100, 650),
        poses: false,
        players: true,
    };
    let mut game = Game::new(
        GameConfig::default(),
        Box::new(assets),
        &mut StdRng::seed_from_u64(1),
    )
    .unwrap();
    game.hazard = Some(hazard_at(&game, Point::new(300, 200)));
    let mut surface = Recorder::new();
    let mut clock = ManualClock::new();
    let err = game.tick(&idle(), &mut surface, &mut clock).unwrap_err();
    assert!(matches!(err, GameError::AssetLoad { .. }));
}

// ── Firing ────────────────────────────────────────────────────────────────────

#[test]
fn fire_event_spawns_one_beam_from_player_edge() {
    let mut game = new_game();
    game.fire().unwrap();
    assert_eq!(game.projectiles.len(), 1);
    let beam = &game.projectiles[0];
    let half = game.player.rect.width / 2;
    assert_eq!(beam.rect.center(), Point::new(300 + half, 200));
    assert_eq!(beam.velocity, Vector2i::new(5, 0));
}

#[test]
fn fired_beam_moves_in_the_same_tick() {
    let mut game = new_game();
    let half = game.player.rect.width / 2;
    let (outcome, _, _) = tick(&mut game, &fire());
    assert_eq!(outcome, TickOutcome::Continue);
    assert_eq!(game.projectiles.len(), 1);
    assert_eq!(game.projectiles[0].rect.center(), Point::new(300 + half + 5, 200));
}

#[test]
fn each_fire_event_adds_a_beam_in_order() {
    let mut game = new_game();
    let input = fire().with_event(InputEvent::Fire);
    tick(&mut game, &input);
    assert_eq!(game.projectiles.len(), 2);
}

#[test]
fn beam_uses_facing_after_movement() {
    let mut game = new_game();
    tick(&mut game, &FrameInput::keys(&[Cardinal::Down]));
    tick(&mut game, &fire());
    assert_eq!(game.projectiles[0].velocity, Vector2i::new(0, 5));
}

#[test]
fn beam_leaving_the_playfield_is_removed() {
    let mut game = new_game();
    game.fire().unwrap();
    let width = game.projectiles[0].rect.width;
    game.projectiles[0].rect.x = game.config.width - width;
    let (_, surface, _) = tick(&mut game, &idle());
    assert!(game.projectiles.is_empty());
    // It was still drawn on its final step.
    let frame = surface.last_frame().unwrap();
    assert!(frame.iter().any(|op| matches!(
        op,
        DrawOp::Blit { sprite, .. } if matches!(sprite.id, SpriteId::Beam { .. })
    )));
}

// ── Beam vs. bomb ─────────────────────────────────────────────────────────────

#[test]
fn beam_hit_destroys_bomb_scores_and_explodes() {
    let mut game = new_game();
    game.fire().unwrap();
    place_beam(&mut game, 0, Point::new(600, 400));
    game.hazard = Some(hazard_at(&game, Point::new(600, 400)));

    let (outcome, _, _) = tick(&mut game, &idle());
    assert_eq!(outcome, TickOutcome::Continue);
    assert!(game.hazard.is_none());
    assert!(game.projectiles.is_empty());
    assert_eq!(game.score.value, 1);
    assert_eq!(game.effects.len(), 1);
    assert_eq!(game.effects[0].rect.center(), Point::new(600, 400));
    assert_eq!(game.player.sprite.id, SpriteId::Pose(PoseId::HAPPY));
}

#[test]
fn only_first_overlapping_beam_is_consumed() {
    let mut game = new_game();
    game.fire().unwrap();
    game.fire().unwrap();
    place_beam(&mut game, 0, Point::new(600, 400));
    place_beam(&mut game, 1, Point::new(601, 400));
    game.hazard = Some(hazard_at(&game, Point::new(600, 400)));

    tick(&mut game, &idle());
    assert_eq!(game.score.value, 1);
    assert_eq!(game.effects.len(), 1);
    assert_eq!(game.projectiles.len(), 1);
    // The survivor is the second beam, now one step further on.
    assert_eq!(game.projectiles[0].rect.center(), Point::new(606, 400));
}

#[test]
fn beam_hit_is_resolved_before_player_contact() {
    let mut game = new_game();
    game.fire().unwrap();
    game.hazard = Some(hazard_at(&game, Point::new(330, 200)));
    assert!(game.player.rect.collides(&game.hazard.as_ref().unwrap().rect));

    let (outcome, _, clock) = tick(&mut game, &idle());
    assert_eq!(outcome, TickOutcome::Continue);
    assert_eq!(game.status, GameStatus::Playing);
    assert_eq!(game.score.value, 1);
    assert!(clock.sleeps.is_empty());
}

#[test]
fn bomb_never_respawns() {
    let mut game = new_game();
    game.hazard = None;
    for _ in 0..100 {
        let (outcome, _, _) = tick(&mut game, &idle());
        assert_eq!(outcome, TickOutcome::Continue);
    }
    assert!(game.hazard.is_none());
}

#[test]
fn no_game_over_on_former_bomb_position() {
    let mut game = new_game();
    game.fire().unwrap();
    place_beam(&mut game, 0, Point::new(600, 400));
    game.hazard = Some(hazard_at(&game, Point::new(600, 400)));
    tick(&mut game, &idle());
    assert!(game.hazard.is_none());

    game.player.rect = Rect::centered_at(
        Point::new(600, 400),
        game.player.rect.width,
        game.player.rect.height,
    );
    let (outcome, _, _) = tick(&mut game, &idle());
    assert_eq!(outcome, TickOutcome::Continue);
    assert_eq!(game.status, GameStatus::Playing);
}

#[test]
fn explosion_is_removed_after_its_lifetime() {
    let mut game = new_game();
    game.fire().unwrap();
    place_beam(&mut game, 0, Point::new(600, 400));
    game.hazard = Some(hazard_at(&game, Point::new(600, 400)));

    // The hit frame already plays the first explosion picture.
    tick(&mut game, &idle());
    assert_eq!(game.effects[0].life, 19);
    for _ in 0..18 {
        tick(&mut game, &idle());
        assert_eq!(game.effects.len(), 1);
    }
    tick(&mut game, &idle());
    assert!(game.effects.is_empty());
}

// ── Player vs. bomb ───────────────────────────────────────────────────────────

#[test]
fn touching_the_bomb_ends_the_game() {
    let mut game = new_game();
    game.hazard = Some(hazard_at(&game, Point::new(300, 200)));

    let (outcome, surface, clock) = tick(&mut game, &FrameInput::keys(&[Cardinal::Right]));
    assert_eq!(outcome, TickOutcome::GameOver);
    assert_eq!(game.status, GameStatus::GameOver);
    assert_eq!(clock.sleeps, vec![Duration::from_secs(2)]);
    assert_eq!(game.player.sprite.id, SpriteId::Pose(PoseId::HURT));
    // Player did not move on the fatal frame.
    assert_eq!(game.player.rect.center(), Point::new(300, 200));

    let frame = surface.last_frame().unwrap();
    assert!(frame.contains(&DrawOp::Text {
        text: "Game Over".to_string(),
        color: Rgb::RED,
        at: Point::new(400, 325),
    }));
}

#[test]
fn ticks_after_game_over_do_nothing() {
    let mut game = new_game();
    game.hazard = Some(hazard_at(&game, Point::new(300, 200)));
    tick(&mut game, &idle());
    let frame = game.frame;

    let (outcome, surface, clock) = tick(&mut game, &fire());
    assert_eq!(outcome, TickOutcome::GameOver);
    assert!(surface.frames.is_empty());
    assert!(surface.pending.is_empty());
    assert!(clock.sleeps.is_empty());
    assert!(game.projectiles.is_empty());
    assert_eq!(game.frame, frame);
}

#[test]
fn bouncing_bomb_eventually_reaches_idle_player() {
    let mut game = new_game();
    game.hazard = Some(hazard_at(&game, Point::new(200, 100)));
    let mut outcome = TickOutcome::Continue;
    for _ in 0..50 {
        outcome = tick(&mut game, &idle()).0;
        if outcome != TickOutcome::Continue {
            break;
        }
    }
    assert_eq!(outcome, TickOutcome::GameOver);
}

// ── Frame structure ───────────────────────────────────────────────────────────

#[test]
fn frame_draws_background_first_and_score_last() {
    let mut game = new_game();
    let (_, surface, _) = tick(&mut game, &idle());
    assert_eq!(surface.frames.len(), 1);
    let frame = surface.last_frame().unwrap();
    assert!(matches!(
        frame.first(),
        Some(DrawOp::Blit { sprite, .. }) if sprite.id == SpriteId::Background
    ));
    assert!(matches!(
        frame.last(),
        Some(DrawOp::Text { text, .. }) if text == "Score: 0"
    ));
}

#[test]
fn frame_counter_advances_per_tick() {
    let mut game = new_game();
    for _ in 0..3 {
        tick(&mut game, &idle());
    }
    assert_eq!(game.frame, 3);
}

#[test]
fn bomb_moves_each_frame() {
    let mut game = new_game();
    tick(&mut game, &idle());
    assert_eq!(
        game.hazard.as_ref().unwrap().rect.center(),
        Point::new(905, 505)
    );
}

// ── Quit & run loop ───────────────────────────────────────────────────────────

#[test]
fn quit_stops_the_tick_after_earlier_events() {
    let mut game = new_game();
    let input = fire().with_event(InputEvent::Quit).with_event(InputEvent::Fire);
    let (outcome, surface, _) = tick(&mut game, &input);
    assert_eq!(outcome, TickOutcome::Quit);
    assert_eq!(game.projectiles.len(), 1);
    assert!(surface.frames.is_empty());
    assert_eq!(game.frame, 0);
}

#[test]
fn run_plays_scripted_frames_until_quit() {
    let mut game = new_game();
    let mut input = ScriptedInput::new(vec![
        FrameInput::keys(&[Cardinal::Right]),
        FrameInput::keys(&[Cardinal::Right]),
        FrameInput::keys(&[Cardinal::Down]),
    ]);
    let mut surface = Recorder::new();
    let mut clock = ManualClock::new();
    let outcome = run(&mut game, &mut input, &mut surface, &mut clock).unwrap();

    assert_eq!(outcome, TickOutcome::Quit);
    assert_eq!(game.player.rect.center(), Point::new(310, 205));
    assert_eq!(surface.frames.len(), 3);
    assert_eq!(clock.ticks, 3);
    assert_eq!(clock.elapsed(game.config.tick_rate), Duration::from_millis(60));
}

#[test]
fn run_stops_on_game_over() {
    let mut game = new_game();
    game.hazard = Some(hazard_at(&game, Point::new(300, 200)));
    let mut input = ScriptedInput::new(vec![idle(), idle()]);
    let mut surface = Recorder::new();
    let mut clock = ManualClock::new();
    let outcome = run(&mut game, &mut input, &mut surface, &mut clock).unwrap();
    assert_eq!(outcome, TickOutcome::GameOver);
    assert_eq!(clock.ticks, 0);
    assert_eq!(clock.sleeps, vec![Duration::from_secs(2)]);
}
