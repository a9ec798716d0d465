//! The screens: start, controls, play, pause, and end
//!
//! Each screen owns its widgets and turns [`UiEvent`]s into an action for
//! the [`App`](crate::App) to act on. Nothing here draws; see `render`.

use glam::Vec2;

use super::widgets::{Anchor, Animation, Button, InputBox};
use super::{Key, Rect, UiEvent};
use crate::assets::{Assets, Title};
use crate::consts::*;
use crate::sim::{GameState, Mallet, MatchRules, Puck, Side, format_clock};
use crate::{Rgb, court_center};

/// Static mallets and puck drawn on the menus
#[derive(Debug, Clone)]
pub struct Decor {
    pub mallets: Vec<Mallet>,
    pub puck: Option<Puck>,
}

impl Decor {
    fn court() -> Self {
        let mut mallets: Vec<Mallet> = Side::BOTH.into_iter().map(Mallet::display).collect();
        for mallet in &mut mallets {
            mallet.pos.y = COURT_HEIGHT / 2.0;
        }
        Self {
            mallets,
            puck: Some(Puck::new(court_center(), 0.0)),
        }
    }
}

fn title(assets: &Assets, which: Title, x: f32, y: f32) -> Animation {
    Animation::new(assets.title(which).to_vec(), Vec2::new(x, y))
}

/// What the start screen wants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartAction {
    ShowControls,
    Start([String; 2]),
    Quit,
}

/// Name entry and the main menu
#[derive(Debug, Clone)]
pub struct StartScreen {
    pub controls_btn: Button,
    pub start_btn: Button,
    pub quit_btn: Button,
    pub name_boxes: [InputBox; 2],
    pub title: Animation,
    pub decor: Decor,
}

impl StartScreen {
    pub const PLACEHOLDER: &'static str = "Enter name";

    pub fn new(assets: &Assets) -> Self {
        let w = COURT_WIDTH;
        let h = COURT_HEIGHT;
        let y = 425.0;
        Self {
            controls_btn: Button::new("Controls", Vec2::new(w / 2.0 - 190.0, y), 6, Anchor::Center),
            start_btn: Button::new("Start", Vec2::new(w / 2.0, y), 6, Anchor::Center),
            quit_btn: Button::new("Quit", Vec2::new(w / 2.0 + 160.0, y), 6, Anchor::Center),
            name_boxes: [
                InputBox::new(
                    Rect::new(w / 5.0 - 25.0, h / 2.0 - 40.0, 200.0, 75.0),
                    Self::PLACEHOLDER,
                ),
                InputBox::new(
                    Rect::new(w / 2.0 + 100.0, h / 2.0 - 40.0, 200.0, 75.0),
                    Self::PLACEHOLDER,
                ),
            ],
            title: title(assets, Title::Start, w / 4.0 - 10.0, 0.0),
            decor: Decor::court(),
        }
    }

    pub fn handle(&mut self, event: &UiEvent) -> Option<StartAction> {
        if *event == UiEvent::Close {
            return Some(StartAction::Quit);
        }
        for b in &mut self.name_boxes {
            b.handle(event);
            b.fit();
        }
        if self.start_btn.clicked(event) {
            if let Some(names) = self.names() {
                return Some(StartAction::Start(names));
            }
            log::debug!("start clicked without two committed names");
        }
        if self.quit_btn.clicked(event) {
            return Some(StartAction::Quit);
        }
        if self.controls_btn.clicked(event) {
            return Some(StartAction::ShowControls);
        }
        None
    }

    /// Both committed names, title-cased, if both boxes have one
    pub fn names(&self) -> Option<[String; 2]> {
        let [a, b] = &self.name_boxes;
        if a.value.is_empty() || b.value.is_empty() {
            return None;
        }
        Some([title_case(&a.value), title_case(&b.value)])
    }
}

/// Upper-case the first letter of every word, lower-case the rest
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Help text screen, reached from the start screen
#[derive(Debug, Clone)]
pub struct ControlsScreen {
    pub back_btn: Button,
    /// Help text columns
    pub columns: Vec<String>,
    pub title: Animation,
    pub decor: Decor,
}

impl ControlsScreen {
    pub const COLUMNS_AT: Vec2 = Vec2::new(225.0, 100.0);
    /// Distance between help columns, and between lines in a column
    pub const COLUMN_GAP: Vec2 = Vec2::new(400.0, 40.0);

    pub fn new(assets: &Assets) -> Self {
        Self {
            back_btn: Button::new("\u{2190}", Vec2::ZERO, 2, Anchor::TopLeft),
            columns: assets.controls.clone(),
            title: title(assets, Title::Controls, COURT_WIDTH / 4.0 - 10.0, 0.0),
            decor: Decor::court(),
        }
    }

    /// True when the player wants to go back
    pub fn handle(&mut self, event: &UiEvent) -> bool {
        matches!(event, UiEvent::Close | UiEvent::Key(Key::Char(' '))) || self.back_btn.clicked(event)
    }
}

/// What the play screen wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayAction {
    Pause,
    Leave,
}

/// A match in progress
#[derive(Debug, Clone)]
pub struct PlayScreen {
    pub state: GameState,
    pub pause_btn: Button,
}

impl PlayScreen {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            pause_btn: Button::new(
                "Pause",
                Vec2::new(COURT_WIDTH / 2.0 - 70.0, COURT_HEIGHT - 100.0),
                5,
                Anchor::TopLeft,
            ),
        }
    }

    pub fn handle(&mut self, event: &UiEvent) -> Option<PlayAction> {
        if *event == UiEvent::Close {
            return Some(PlayAction::Leave);
        }
        self.pause_btn.clicked(event).then_some(PlayAction::Pause)
    }
}

/// Rules reminder shown while paused
#[derive(Debug, Clone)]
pub struct PauseScreen {
    pub back_btn: Button,
    /// Lines of the rules text with their colours
    pub about: Vec<(String, Rgb)>,
    pub title: Animation,
}

impl PauseScreen {
    pub fn new(assets: &Assets, rules: &MatchRules) -> Self {
        let limit = format_clock(rules.time_limit_ticks / rules.ticks_per_sec.max(1) as u64);
        let about = vec![
            ("Air Hockey is a great two-player game!".to_string(), Rgb::RED),
            ("Control the mallet using the keyboard to score!".to_string(), Rgb::YELLOW),
            ("There are only two rules to the game:".to_string(), Rgb::BLUE),
            (
                format!("1. Be the first to score {} goals in {}", rules.target_score, limit),
                Rgb::RED,
            ),
            ("2. Enjoy!".to_string(), Rgb::RED),
        ];
        Self {
            back_btn: Button::new(
                "Return to game",
                Vec2::new(COURT_WIDTH / 2.0 - 150.0, COURT_HEIGHT - 100.0),
                5,
                Anchor::TopLeft,
            ),
            about,
            title: title(assets, Title::Pause, COURT_WIDTH / 5.0 - 5.0, 0.0),
        }
    }

    /// True when play should resume
    pub fn handle(&mut self, event: &UiEvent) -> bool {
        *event == UiEvent::Close || self.back_btn.clicked(event)
    }
}

/// What the end screen wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndAction {
    Menu,
    PlayAgain,
}

/// Results
#[derive(Debug, Clone)]
pub struct EndScreen {
    pub back_btn: Button,
    pub play_btn: Button,
    /// Winners' mallets, lined up in the middle of the court
    pub winners: Vec<Mallet>,
    pub credits: Vec<String>,
    pub title: Animation,
}

impl EndScreen {
    pub fn new(assets: &Assets, state: &GameState) -> Self {
        let count = state.winners().len() as f32;
        let winners = state
            .winners()
            .into_iter()
            .enumerate()
            .map(|(i, mallet)| {
                let mut m = mallet.clone();
                m.controls = None;
                m.pos = Vec2::new(
                    COURT_WIDTH / 2.0 - 3.5 * m.radius * (count - 1.0) + 7.0 * m.radius * i as f32,
                    COURT_HEIGHT / 2.0,
                );
                m
            })
            .collect();
        Self {
            back_btn: Button::new(
                "Back to menu",
                Vec2::new(COURT_WIDTH / 2.0 - 160.0, COURT_HEIGHT - 50.0),
                5,
                Anchor::Center,
            ),
            play_btn: Button::new(
                "Play again",
                Vec2::new(COURT_WIDTH / 2.0 + 135.0, COURT_HEIGHT - 50.0),
                5,
                Anchor::Center,
            ),
            winners,
            credits: vec![
                "Created by: Sanvit Katrekar".to_string(),
                "Terminal edition: text-art titles".to_string(),
            ],
            title: title(assets, Title::End, COURT_WIDTH / 4.0 - 20.0, 10.0),
        }
    }

    /// "Ada wins!" or "Ada and Bob win!"
    pub fn headline(&self) -> String {
        let names: Vec<&str> = self.winners.iter().map(|m| m.name.as_str()).collect();
        let verb = if names.len() == 1 { "wins" } else { "win" };
        format!("{} {}!", names.join(" and "), verb)
    }

    pub fn is_draw(&self) -> bool {
        self.winners.len() > 1
    }

    pub fn handle(&mut self, event: &UiEvent) -> Option<EndAction> {
        if *event == UiEvent::Close || self.back_btn.clicked(event) {
            return Some(EndAction::Menu);
        }
        self.play_btn.clicked(event).then_some(EndAction::PlayAgain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};

    fn click_center(b: &Button) -> UiEvent {
        UiEvent::Click(Vec2::new(b.rect.x + b.rect.w / 2.0, b.rect.y + b.rect.h / 2.0))
    }

    fn enter_name(screen: &mut StartScreen, i: usize, name: &str) {
        let r = screen.name_boxes[i].rect;
        screen.handle(&UiEvent::Click(Vec2::new(r.x + 10.0, r.y + 10.0)));
        for ch in name.chars() {
            screen.handle(&UiEvent::Key(Key::Char(ch)));
        }
        screen.handle(&UiEvent::Key(Key::Enter));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ada lovelace"), "Ada Lovelace");
        assert_eq!(title_case("bOB"), "Bob");
        assert_eq!(title_case("o'neil"), "O'Neil");
    }

    #[test]
    fn test_start_needs_two_names() {
        let mut screen = StartScreen::new(&Assets::default());
        let start = click_center(&screen.start_btn);
        assert_eq!(screen.handle(&start), None);

        enter_name(&mut screen, 0, "ada");
        assert_eq!(screen.handle(&start), None);

        enter_name(&mut screen, 1, "bob");
        assert_eq!(
            screen.handle(&start),
            Some(StartAction::Start(["Ada".to_string(), "Bob".to_string()]))
        );
    }

    #[test]
    fn test_start_buttons() {
        let mut screen = StartScreen::new(&Assets::default());
        let quit = click_center(&screen.quit_btn);
        let controls = click_center(&screen.controls_btn);
        assert_eq!(screen.handle(&quit), Some(StartAction::Quit));
        assert_eq!(screen.handle(&controls), Some(StartAction::ShowControls));
        assert_eq!(screen.handle(&UiEvent::Close), Some(StartAction::Quit));
    }

    #[test]
    fn test_controls_back() {
        let mut screen = ControlsScreen::new(&Assets::default());
        assert!(!screen.handle(&UiEvent::Key(Key::Char('x'))));
        assert!(screen.handle(&UiEvent::Key(Key::Char(' '))));
        let back = click_center(&screen.back_btn);
        assert!(screen.handle(&back));
    }

    #[test]
    fn test_pause_text_mentions_rules() {
        let screen = PauseScreen::new(&Assets::default(), &MatchRules::default());
        assert!(
            screen
                .about
                .iter()
                .any(|(line, _)| line == "1. Be the first to score 7 goals in 03:00")
        );
    }

    #[test]
    fn test_end_screen_draw() {
        let rules = MatchRules {
            time_limit_ticks: 1,
            goal_text_ticks: 0,
            ..Default::default()
        };
        let mut state = GameState::new(3, rules, ["Ada".to_string(), "Bob".to_string()]);
        tick(&mut state, &TickInput::default());
        assert!(state.is_over());

        let mut screen = EndScreen::new(&Assets::default(), &state);
        assert!(screen.is_draw());
        assert_eq!(screen.headline(), "Ada and Bob win!");
        assert_eq!(screen.winners[0].pos.x, COURT_WIDTH / 2.0 - 3.5 * MALLET_RADIUS);
        assert_eq!(screen.winners[1].pos.x, COURT_WIDTH / 2.0 + 3.5 * MALLET_RADIUS);

        let again = click_center(&screen.play_btn);
        assert_eq!(screen.handle(&again), Some(EndAction::PlayAgain));
        assert_eq!(screen.handle(&UiEvent::Close), Some(EndAction::Menu));
    }

    #[test]
    fn test_end_screen_single_winner() {
        let rules = MatchRules {
            time_limit_ticks: 1,
            goal_text_ticks: 0,
            ..Default::default()
        };
        let mut state = GameState::new(3, rules, ["Ada".to_string(), "Bob".to_string()]);
        state.mallets[0].score = 2;
        tick(&mut state, &TickInput::default());

        let screen = EndScreen::new(&Assets::default(), &state);
        assert!(!screen.is_draw());
        assert_eq!(screen.headline(), "Ada wins!");
        assert_eq!(screen.winners[0].pos, court_center());
    }
}
