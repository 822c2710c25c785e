mod display;

use std::cell::Cell;
use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::thread_rng;

use fight_kokaton::assets::GlyphAssets;
use fight_kokaton::clock::FrameClock;
use fight_kokaton::config::consts;
use fight_kokaton::entities::Cardinal;
use fight_kokaton::input::{FrameInput, InputEvent, InputSource};
use fight_kokaton::{run, Game, GameConfig, GameResult, TickOutcome};

use display::TerminalSurface;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 7 frames (140 ms at 50 FPS) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 7;

fn keys_for(direction: Cardinal) -> &'static [KeyCode] {
    match direction {
        Cardinal::Up => &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
        Cardinal::Down => &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
        Cardinal::Left => &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
        Cardinal::Right => &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
    }
}

// ── Terminal input ────────────────────────────────────────────────────────────

/// Turns the terminal's key events into per-frame snapshots.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key; each frame the movement keys still
/// "fresh" (within `HOLD_WINDOW` frames) are reported as held.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames.
///
/// Fire is edge-triggered: one beam per `Press` of Space, repeats ignored.
/// On a classic terminal a held Space therefore auto-fires at the OS repeat rate.
#[derive(Default)]
struct TerminalInput {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl TerminalInput {
    fn new() -> Self {
        Self::default()
    }

    fn is_held(&self, key: &KeyCode) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn on_key(&mut self, key: KeyEvent, input: &mut FrameInput) {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = key;
        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, self.frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        input.events.push(InputEvent::Quit);
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        input.events.push(InputEvent::Quit);
                    }
                    KeyCode::Char(' ') => input.events.push(InputEvent::Fire),
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    /// Start a new frame and fold `events` into its input.
    fn frame_input(&mut self, events: impl IntoIterator<Item = Event>) -> FrameInput {
        self.frame += 1;
        let mut input = FrameInput::default();
        for event in events {
            if let Event::Key(key) = event {
                self.on_key(key, &mut input);
            }
        }
        for direction in Cardinal::ALL {
            let held = keys_for(direction).iter().any(|key| self.is_held(key));
            input.keys.set(direction, held);
        }
        input
    }
}

/// Everything the terminal has queued, without blocking.
fn pending_events() -> std::io::Result<Vec<Event>> {
    let mut events = Vec::new();
    while event::poll(Duration::ZERO)? {
        events.push(event::read()?);
    }
    Ok(events)
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> GameResult<FrameInput> {
        let (events, broken) = match pending_events() {
            Ok(events) => (events, false),
            Err(err) => {
                warn!("cannot read terminal input ({}), quitting", err);
                (Vec::new(), true)
            }
        };
        let mut input = self.frame_input(events);
        if broken {
            input.events.push(InputEvent::Quit);
        }
        Ok(input)
    }
}

// ── Terminal session ──────────────────────────────────────────────────────────

/// Runs its closure when dropped, on every exit path including `?` returns.
struct OnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}

fn restore_terminal(keyboard_enhanced: bool) {
    let mut out = stdout();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Take over the terminal, play, and hand the terminal back whatever happens.
fn play_in_terminal(game: &mut Game) -> GameResult<TickOutcome> {
    let keyboard_enhanced = Cell::new(false);
    terminal::enable_raw_mode()?;
    let _restore = OnDrop(|| restore_terminal(keyboard_enhanced.get()));

    let mut out = BufWriter::new(stdout());
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::SetTitle(consts::TITLE))?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    keyboard_enhanced.set(
        out.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok(),
    );

    play(game, &mut out)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> GameResult<()> {
    // stderr shares the screen with the game, so stay quiet unless asked
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = GameConfig::load(config_path.as_deref())?;
    let assets = GlyphAssets::new(config.width, config.height);
    let mut game = Game::new(config, Box::new(assets), &mut thread_rng())?;

    let outcome = play_in_terminal(&mut game)?;
    info!("finished with {:?} after {} frames", outcome, game.frame);
    if outcome == TickOutcome::GameOver {
        println!("{}  {}", consts::GAME_OVER_TEXT, game.score.text());
    }
    Ok(())
}

fn play<W: Write>(game: &mut Game, out: &mut W) -> GameResult<TickOutcome> {
    let mut surface = TerminalSurface::new(out, game.config.width, game.config.height)?;
    let mut input = TerminalInput::new();
    let mut clock = FrameClock::new();
    run(game, &mut input, &mut surface, &mut clock)
}
