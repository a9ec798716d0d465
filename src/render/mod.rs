//! Frame rendering
//!
//! Draws the current screen onto a [`Canvas`] covering the court. Pure: no
//! terminal access, so every frame can be inspected in tests.

pub mod canvas;

pub use canvas::{Canvas, Cell};

use glam::Vec2;

use crate::app::{App, Screen};
use crate::consts::*;
use crate::sim::{GameState, Mallet, MatchPhase, Puck};
use crate::ui::screens::Decor;
use crate::ui::{Animation, BoxState, Button, ControlsScreen, GLYPH_H, InputBox, Rect};
use crate::{Rgb, court_center};

/// Court size as a vector
fn court_size() -> Vec2 {
    Vec2::new(COURT_WIDTH, COURT_HEIGHT)
}

/// `rgb` with every channel moved `by` away from itself (`|c - by|`)
fn shade(rgb: Rgb, by: i16) -> Rgb {
    let f = |c: u8| (c as i16 - by).unsigned_abs().min(255) as u8;
    Rgb(f(rgb.0), f(rgb.1), f(rgb.2))
}

/// Render the whole frame for the current screen
pub fn frame(app: &App) -> Canvas {
    let mut canvas = Canvas::for_court(court_size());
    match app.screen() {
        Screen::Start(start) => {
            court(&mut canvas);
            decor(&mut canvas, &start.decor);
            for b in [&start.controls_btn, &start.start_btn, &start.quit_btn] {
                button(&mut canvas, b);
            }
            for b in &start.name_boxes {
                input_box(&mut canvas, b);
            }
            title(&mut canvas, &start.title);
        }
        Screen::Controls { controls, .. } => {
            court(&mut canvas);
            title(&mut canvas, &controls.title);
            help_columns(&mut canvas, &controls.columns);
            button(&mut canvas, &controls.back_btn);
            decor(&mut canvas, &controls.decor);
        }
        Screen::Play(play) => {
            court(&mut canvas);
            game(&mut canvas, &play.state);
            button(&mut canvas, &play.pause_btn);
        }
        Screen::Pause { pause, .. } => {
            court(&mut canvas);
            for (i, (line, color)) in pause.about.iter().enumerate() {
                let at = Vec2::new(COURT_WIDTH / 4.0 - 100.0, 125.0 + i as f32 * 50.0);
                canvas.text(at, line, *color);
            }
            button(&mut canvas, &pause.back_btn);
            title(&mut canvas, &pause.title);
        }
        Screen::End(end) => {
            court(&mut canvas);
            button(&mut canvas, &end.back_btn);
            button(&mut canvas, &end.play_btn);
            for (i, line) in end.credits.iter().enumerate() {
                let at = Vec2::new(
                    COURT_WIDTH / 4.0 + 25.0,
                    COURT_HEIGHT / 2.0 + 80.0 + i as f32 * 50.0,
                );
                canvas.text(at, line, Rgb::RED);
            }
            let center = court_center();
            canvas.text_centered(center - Vec2::new(0.0, 100.0), &end.headline(), Rgb::RED);
            if end.is_draw() {
                canvas.text_centered(center, "Draw", Rgb::RED);
            }
            title(&mut canvas, &end.title);
            for winner in &end.winners {
                mallet(&mut canvas, winner);
            }
        }
        Screen::Exit => {}
    }
    canvas
}

/// Green surface, centre line and circle, goal areas, and goals
fn court(canvas: &mut Canvas) {
    canvas.clear(Rgb::GREEN);
    canvas.outline_rect(Rect::new(0.0, COURT_HEIGHT / 5.0, 150.0, 300.0), 5.0, Rgb::WHITE);
    canvas.outline_rect(
        Rect::new(COURT_WIDTH - 150.0, COURT_HEIGHT / 5.0, 150.0, 300.0),
        5.0,
        Rgb::WHITE,
    );
    canvas.vline(COURT_WIDTH / 2.0, 0.0, COURT_HEIGHT, Rgb::WHITE);
    canvas.ring(
        court_center(),
        CENTER_CIRCLE_RADIUS - 5.0,
        CENTER_CIRCLE_RADIUS,
        Rgb::WHITE,
    );
    // goals
    canvas.vline(0.0, GOAL_TOP, GOAL_BOTTOM, Rgb::BLACK);
    canvas.vline(COURT_WIDTH - 1.0, GOAL_TOP, GOAL_BOTTOM, Rgb::BLACK);
}

fn mallet(canvas: &mut Canvas, m: &Mallet) {
    canvas.circle(m.pos, m.radius, m.color);
    canvas.label(m.pos, "o", Rgb::BLACK, m.color);
}

fn puck(canvas: &mut Canvas, p: &Puck) {
    if p.alive {
        canvas.circle(p.pos, p.radius, Rgb::WHITE);
    }
}

/// "Score: N" at the top of the mallet's half
fn score(canvas: &mut Canvas, m: &Mallet) {
    let x = if m.pos.x < COURT_WIDTH / 2.0 {
        m.bounds.min.x + 10.0
    } else {
        m.bounds.max.x - 150.0
    };
    canvas.text(Vec2::new(x, 0.0), &format!("Score: {}", m.score), Rgb::BLACK);
}

fn decor(canvas: &mut Canvas, decor: &Decor) {
    for m in &decor.mallets {
        mallet(canvas, m);
    }
    if let Some(p) = &decor.puck {
        puck(canvas, p);
    }
}

fn game(canvas: &mut Canvas, state: &GameState) {
    if state.clock_visible() {
        canvas.text(
            Vec2::new(COURT_WIDTH / 2.0 - 50.0, 50.0),
            &state.clock_display(),
            Rgb::RED,
        );
    }
    let banner = match state.phase {
        MatchPhase::Goal { .. } => Some("Goal!"),
        MatchPhase::TimeUp { .. } => Some("Time Up!"),
        _ => None,
    };
    if let Some(text) = banner {
        canvas.label(
            Vec2::new(COURT_WIDTH / 2.0 - text.len() as f32 * 5.0, COURT_HEIGHT / 4.0 + 50.0),
            text,
            Rgb::RED,
            Rgb::BLACK,
        );
    }
    for m in &state.mallets {
        mallet(canvas, m);
        if m.controls.is_some() {
            score(canvas, m);
        }
    }
    puck(canvas, &state.puck);
}

fn button(canvas: &mut Canvas, b: &Button) {
    let bg = shade(Rgb::ORANGE, 50);
    let fg = if b.enabled { Rgb::RED } else { shade(Rgb::RED, 100) };
    canvas.fill_rect(b.rect, bg);
    canvas.label(b.rect.top_left(), &b.text, fg, bg);
}

fn input_box(canvas: &mut Canvas, b: &InputBox) {
    let color = match b.state {
        BoxState::Inactive => Rgb::RED,
        BoxState::Active => Rgb::BLUE,
        BoxState::Committed => Rgb::BLACK,
    };
    canvas.outline_rect(b.rect, 2.0, color);
    let row = b.rect.y + (b.rect.h - GLYPH_H) / 2.0;
    canvas.text_centered(Vec2::new(b.rect.x + b.rect.w / 2.0, row), &b.display_text(), color);
}

fn title(canvas: &mut Canvas, anim: &Animation) {
    if let Some(frame) = anim.current() {
        canvas.block(anim.pos, frame, Rgb::YELLOW);
    }
}

fn help_columns(canvas: &mut Canvas, columns: &[String]) {
    let at = ControlsScreen::COLUMNS_AT;
    let gap = ControlsScreen::COLUMN_GAP;
    for (i, column) in columns.iter().enumerate() {
        for (j, line) in column.lines().enumerate() {
            let pos = at + Vec2::new(i as f32 * gap.x, j as f32 * gap.y);
            canvas.text(pos, line, Rgb::RED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::assets::Assets;
    use crate::ui::{Key, UiEvent};

    fn find(canvas: &Canvas, needle: &str) -> bool {
        (0..canvas.height()).any(|row| canvas.row_text(row).contains(needle))
    }

    fn app() -> App {
        App::new(&Settings::default(), Assets::default(), 1).unwrap()
    }

    #[test]
    fn test_shade() {
        assert_eq!(shade(Rgb::ORANGE, 50), Rgb(205, 115, 50));
        assert_eq!(shade(Rgb(10, 0, 255), 100), Rgb(90, 100, 155));
    }

    #[test]
    fn test_court_markings() {
        let mut canvas = Canvas::for_court(court_size());
        court(&mut canvas);
        // centre line
        assert_eq!(canvas.get(50, 0).unwrap().bg, Rgb::WHITE);
        // goal mouth on both ends
        assert_eq!(canvas.get(0, 12).unwrap().bg, Rgb::BLACK);
        assert_eq!(canvas.get(99, 12).unwrap().bg, Rgb::BLACK);
        // open surface
        assert_eq!(canvas.get(30, 3).unwrap().bg, Rgb::GREEN);
    }

    #[test]
    fn test_start_screen_frame() {
        let canvas = frame(&app());
        assert!(find(&canvas, "Start"));
        assert!(find(&canvas, "Controls"));
        assert!(find(&canvas, "Enter name"));
    }

    #[test]
    fn test_name_box_left_empty_shows_placeholder() {
        let mut app = app();
        let Screen::Start(start) = app.screen() else {
            unreachable!()
        };
        let inside = start.name_boxes[0].rect.top_left() + Vec2::splat(5.0);
        app.handle(UiEvent::Click(inside));
        app.handle(UiEvent::Click(Vec2::new(900.0, 10.0)));

        let canvas = frame(&app);
        let shown: usize = (0..canvas.height())
            .map(|row| canvas.row_text(row).matches("Enter name").count())
            .sum();
        assert_eq!(shown, 2);
    }

    #[test]
    fn test_play_frame_shows_scores_and_clock() {
        let mut app = app();
        let names = ["Ada", "Bob"];
        for (i, name) in names.iter().enumerate() {
            let Screen::Start(start) = app.screen() else {
                unreachable!()
            };
            let r = start.name_boxes[i].rect;
            app.handle(UiEvent::Click(Vec2::new(r.x + 5.0, r.y + 5.0)));
            for ch in name.chars() {
                app.handle(UiEvent::Key(Key::Char(ch)));
            }
            app.handle(UiEvent::Key(Key::Enter));
        }
        let Screen::Start(start) = app.screen() else {
            unreachable!()
        };
        let r = start.start_btn.rect;
        app.handle(UiEvent::Click(r.top_left() + Vec2::ONE));
        app.update(|_| false);

        let canvas = frame(&app);
        assert!(find(&canvas, "Score: 0"));
        assert!(find(&canvas, "00:00"));
        assert!(find(&canvas, "Pause"));
        assert!(!find(&canvas, "Goal!"));
    }

    #[test]
    fn test_goal_banner_hides_clock() {
        let mut state = GameState::new(
            4,
            crate::sim::MatchRules::default(),
            ["Ada".to_string(), "Bob".to_string()],
        );
        state.phase = MatchPhase::Goal { ticks_left: 10 };
        state.puck.alive = false;
        let mut canvas = Canvas::for_court(court_size());
        court(&mut canvas);
        game(&mut canvas, &state);
        assert!(find(&canvas, "Goal!"));
        assert!(!find(&canvas, "00:00"));
    }
}
