//! Screen flow
//!
//! Owns the current screen and moves between them:
//!
//! ```text
//! Start <-> Controls
//! Start  -> Play <-> Pause
//!           Play  -> End -> Play (same names) | Start
//! ```
//!
//! Input arrives as [`UiEvent`]s through [`App::handle`]; time advances one
//! frame per [`App::update`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets::Assets;
use crate::error::Result;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, MatchPhase, MatchRules, Steer, TickInput, tick};
use crate::ui::{
    ControlsScreen, EndAction, EndScreen, PauseScreen, PlayAction, PlayScreen, StartAction,
    StartScreen, UiEvent,
};

/// Which screen is up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Start,
    Controls,
    Playing,
    Paused,
    End,
    Exit,
}

/// The current screen and whatever it has to come back to
#[derive(Debug, Clone)]
pub enum Screen {
    Start(StartScreen),
    /// The start screen is kept so typed names survive a look at the help
    Controls {
        start: StartScreen,
        controls: ControlsScreen,
    },
    Play(PlayScreen),
    Pause {
        play: PlayScreen,
        pause: PauseScreen,
    },
    End(EndScreen),
    Exit,
}

pub struct App {
    assets: Assets,
    rules: MatchRules,
    /// Seeds each match's serve RNG
    rng: Pcg32,
    screen: Screen,
    /// Names of the last match, for "Play again"
    names: Option<[String; 2]>,
    /// Pause/resume requested since the last update
    toggle_pause: bool,
    /// Events from the most recent match tick
    events: Vec<GameEvent>,
}

impl App {
    pub fn new(settings: &Settings, assets: Assets, seed: u64) -> Result<Self> {
        let rules = settings.rules()?;
        log::info!(
            "first to {} goals, {} ticks of play at {} ticks/s",
            rules.target_score,
            rules.time_limit_ticks,
            rules.ticks_per_sec
        );
        let screen = Screen::Start(StartScreen::new(&assets));
        Ok(Self {
            assets,
            rules,
            rng: Pcg32::seed_from_u64(seed),
            screen,
            names: None,
            toggle_pause: false,
            events: Vec::new(),
        })
    }

    pub fn mode(&self) -> Mode {
        match self.screen {
            Screen::Start(_) => Mode::Start,
            Screen::Controls { .. } => Mode::Controls,
            Screen::Play(_) => Mode::Playing,
            Screen::Pause { .. } => Mode::Paused,
            Screen::End(_) => Mode::End,
            Screen::Exit => Mode::Exit,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.mode() != Mode::Exit
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The match being played or paused, if any
    pub fn game(&self) -> Option<&GameState> {
        match &self.screen {
            Screen::Play(play) | Screen::Pause { play, .. } => Some(&play.state),
            _ => None,
        }
    }

    /// Events from the last match tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Leave immediately, whatever is on screen
    pub fn quit(&mut self) {
        log::info!("quit from {:?}", self.mode());
        self.screen = Screen::Exit;
    }

    /// Route one input event to the current screen
    pub fn handle(&mut self, event: UiEvent) {
        let screen = std::mem::replace(&mut self.screen, Screen::Exit);
        self.screen = match screen {
            Screen::Start(mut start) => match start.handle(&event) {
                Some(StartAction::ShowControls) => Screen::Controls {
                    start,
                    controls: ControlsScreen::new(&self.assets),
                },
                Some(StartAction::Start(names)) => self.start_match(names),
                Some(StartAction::Quit) => {
                    log::info!("quit from the start screen");
                    Screen::Exit
                }
                None => Screen::Start(start),
            },
            Screen::Controls {
                start,
                mut controls,
            } => {
                if controls.handle(&event) {
                    Screen::Start(start)
                } else {
                    Screen::Controls { start, controls }
                }
            }
            Screen::Play(mut play) => match play.handle(&event) {
                Some(PlayAction::Pause) => {
                    self.toggle_pause = true;
                    Screen::Play(play)
                }
                Some(PlayAction::Leave) => {
                    self.toggle_pause = false;
                    log::info!("match abandoned at {}", play.state.clock_display());
                    Screen::Start(StartScreen::new(&self.assets))
                }
                None => Screen::Play(play),
            },
            Screen::Pause { play, mut pause } => {
                if pause.handle(&event) {
                    self.toggle_pause = true;
                }
                Screen::Pause { play, pause }
            }
            Screen::End(mut end) => match end.handle(&event) {
                Some(EndAction::PlayAgain) => match self.names.clone() {
                    Some(names) => self.start_match(names),
                    None => Screen::Start(StartScreen::new(&self.assets)),
                },
                Some(EndAction::Menu) => Screen::Start(StartScreen::new(&self.assets)),
                None => Screen::End(end),
            },
            Screen::Exit => Screen::Exit,
        };
    }

    /// Advance one frame. `held` reports whether a key is down.
    pub fn update(&mut self, held: impl Fn(char) -> bool) {
        let screen = std::mem::replace(&mut self.screen, Screen::Exit);
        self.screen = match screen {
            Screen::Start(mut start) => {
                start.title.advance();
                Screen::Start(start)
            }
            Screen::Controls {
                start,
                mut controls,
            } => {
                controls.title.advance();
                Screen::Controls { start, controls }
            }
            Screen::Play(mut play) => {
                self.step_match(&mut play.state, &held);
                self.after_tick(play)
            }
            Screen::Pause { mut play, mut pause } => {
                pause.title.advance();
                self.step_match(&mut play.state, &held);
                if play.state.phase == MatchPhase::Paused {
                    Screen::Pause { play, pause }
                } else {
                    Screen::Play(play)
                }
            }
            Screen::End(mut end) => {
                end.title.advance();
                Screen::End(end)
            }
            Screen::Exit => Screen::Exit,
        };
    }

    fn step_match(&mut self, state: &mut GameState, held: &impl Fn(char) -> bool) {
        let mut input = TickInput {
            pause: std::mem::take(&mut self.toggle_pause),
            ..Default::default()
        };
        for (steer, mallet) in input.steer.iter_mut().zip(&state.mallets) {
            *steer = mallet
                .controls
                .map(|c| c.steer(held))
                .unwrap_or_else(Steer::default);
        }
        tick(state, &input);
        self.events.clone_from(&state.events);
    }

    fn after_tick(&mut self, play: PlayScreen) -> Screen {
        match play.state.phase {
            MatchPhase::Paused => Screen::Pause {
                pause: PauseScreen::new(&self.assets, &self.rules),
                play,
            },
            MatchPhase::Over => Screen::End(EndScreen::new(&self.assets, &play.state)),
            _ => Screen::Play(play),
        }
    }

    fn start_match(&mut self, names: [String; 2]) -> Screen {
        let seed: u64 = self.rng.random();
        log::info!("new match: {} vs {} (seed {})", names[0], names[1], seed);
        self.names = Some(names.clone());
        self.toggle_pause = false;
        self.events.clear();
        Screen::Play(PlayScreen::new(GameState::new(seed, self.rules, names)))
    }
}
