//! Platform layer
//!
//! Runs the game in a terminal:
//! - Frame loop at the configured rate
//! - Terminal setup and restore (crossterm)
//! - Held-key tracking for mallet control

pub mod input;
pub mod terminal;

pub use input::KeyTracker;
pub use terminal::{Input, Terminal};

use std::time::{Duration, Instant};

use crate::app::App;
use crate::error::Result;
use crate::render;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Per-match contact counts, logged when the match ends
#[derive(Debug, Default)]
struct MatchLog {
    hits: [u32; 2],
    takeovers: u32,
    bounces: u32,
}

impl MatchLog {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::MalletHit { side, speed_up } => {
                    self.hits[side.index()] += 1;
                    if speed_up {
                        self.takeovers += 1;
                    }
                }
                GameEvent::WallBounce => self.bounces += 1,
                GameEvent::MatchOver { .. } => {
                    log::info!(
                        "hits {} - {}, {} changes of possession, {} wall bounces",
                        self.hits[0],
                        self.hits[1],
                        self.takeovers,
                        self.bounces
                    );
                    *self = Self::default();
                }
                _ => {}
            }
        }
    }
}

/// Run until the player quits. One frame per tick: input, update, draw,
/// then sleep off the rest of the frame.
pub fn run(mut app: App, settings: &Settings) -> Result<()> {
    let frame_dur = Duration::from_secs_f64(1.0 / settings.fps.max(1) as f64);
    let mut term = Terminal::enter()?;
    let mut keys = KeyTracker::new(term.reports_releases(), settings.fps);
    let mut last_mode = app.mode();
    let mut match_log = MatchLog::default();

    while app.is_running() {
        let frame_start = Instant::now();

        for input in term.poll(&mut keys)? {
            match input {
                Input::Ui(event) => app.handle(event),
                Input::Quit => app.quit(),
            }
        }
        if !app.is_running() {
            break;
        }

        app.update(|k| keys.is_held(k));
        keys.tick();
        match_log.record(app.events());

        let mode = app.mode();
        if mode != last_mode {
            log::debug!("screen: {:?} -> {:?}", last_mode, mode);
            if mode == crate::app::Mode::Start {
                match_log = MatchLog::default();
            }
            last_mode = mode;
        }

        term.draw(&render::frame(&app))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        } else {
            log::trace!("frame overran by {:?}", elapsed - frame_dur);
        }
    }

    log::info!("bye");
    Ok(())
}
