//! crossterm backend: terminal setup, drawing, and input
//!
//! The canvas is drawn centred in the terminal. Mouse clicks are mapped
//! back through that offset into court units.

use std::io::{Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self as ct, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use glam::Vec2;

use super::input::KeyTracker;
use crate::Rgb;
use crate::error::Result;
use crate::render::Canvas;
use crate::ui::{GLYPH_H, GLYPH_W, Key, UiEvent};

/// Input for the app
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Ui(UiEvent),
    /// Ctrl-C: leave at once
    Quit,
}

/// Owns the terminal while the game runs and restores it on drop
pub struct Terminal {
    out: Stdout,
    /// Key releases are reported
    releases: bool,
    /// Terminal cell of the canvas's top-left corner
    origin: (u16, u16),
    canvas_size: (u16, u16),
}

impl Terminal {
    fn init_term(out: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            out,
            EnableMouseCapture,
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All),
        )
    }

    fn clean_term() -> std::io::Result<()> {
        let mut out = std::io::stdout();
        // harmless when never pushed
        let _ = execute!(out, PopKeyboardEnhancementFlags);
        execute!(
            out,
            ResetColor,
            Clear(ClearType::All),
            Show,
            EnableLineWrap,
            LeaveAlternateScreen,
            DisableMouseCapture,
        )?;
        terminal::disable_raw_mode()
    }

    /// Take over the terminal: raw mode, alternate screen, mouse capture
    pub fn enter() -> Result<Self> {
        let mut out = std::io::stdout();
        Self::init_term(&mut out)?;

        let releases = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
        if releases {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!("terminal ready (key releases reported: {})", releases);

        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = Self::clean_term();
            previous(info);
        }));

        Ok(Self {
            out,
            releases,
            origin: (0, 0),
            canvas_size: (0, 0),
        })
    }

    /// Whether held keys can be tracked by release events
    pub fn reports_releases(&self) -> bool {
        self.releases
    }

    /// Centre a canvas of `size` cells in the terminal
    fn place(&mut self, size: (u16, u16)) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        let origin = (
            cols.saturating_sub(size.0) / 2,
            rows.saturating_sub(size.1) / 2,
        );
        if origin != self.origin || size != self.canvas_size {
            if cols < size.0 || rows < size.1 {
                log::warn!(
                    "terminal is {}x{}, the court needs {}x{}",
                    cols,
                    rows,
                    size.0,
                    size.1
                );
            }
            self.origin = origin;
            self.canvas_size = size;
            queue!(self.out, ResetColor, Clear(ClearType::All))?;
        }
        Ok(())
    }

    pub fn draw(&mut self, canvas: &Canvas) -> Result<()> {
        self.place((canvas.width() as u16, canvas.height() as u16))?;
        let (x0, y0) = self.origin;
        for (i, row) in canvas.rows().enumerate() {
            queue!(self.out, MoveTo(x0, y0 + i as u16))?;
            let mut colors = None;
            for cell in row {
                if colors != Some((cell.fg, cell.bg)) {
                    queue!(
                        self.out,
                        SetForegroundColor(color(cell.fg)),
                        SetBackgroundColor(color(cell.bg)),
                    )?;
                    colors = Some((cell.fg, cell.bg));
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    /// Drain pending terminal events without blocking
    pub fn poll(&mut self, keys: &mut KeyTracker) -> Result<Vec<Input>> {
        let mut inputs = Vec::new();
        while ct::poll(Duration::ZERO)? {
            match ct::read()? {
                ct::Event::Key(key) => Self::key(key, keys, &mut inputs),
                ct::Event::Mouse(ct::MouseEvent {
                    kind: ct::MouseEventKind::Down(ct::MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if let Some(p) = self.to_court(column, row) {
                        inputs.push(Input::Ui(UiEvent::Click(p)));
                    }
                }
                ct::Event::Resize(..) => {
                    // forces a re-place on the next draw
                    self.canvas_size = (0, 0);
                }
                ct::Event::FocusLost => keys.clear(),
                _ => {}
            }
        }
        Ok(inputs)
    }

    fn key(key: ct::KeyEvent, keys: &mut KeyTracker, inputs: &mut Vec<Input>) {
        if key.kind == ct::KeyEventKind::Release {
            if let ct::KeyCode::Char(ch) = key.code {
                keys.release(ch);
            }
            return;
        }
        let ui = match key.code {
            ct::KeyCode::Char('c') if key.modifiers.contains(ct::KeyModifiers::CONTROL) => {
                inputs.push(Input::Quit);
                return;
            }
            ct::KeyCode::Char(ch) => {
                keys.press(ch);
                UiEvent::Key(Key::Char(ch))
            }
            ct::KeyCode::Enter => UiEvent::Key(Key::Enter),
            ct::KeyCode::Backspace => UiEvent::Key(Key::Backspace),
            ct::KeyCode::Esc => UiEvent::Close,
            _ => return,
        };
        inputs.push(Input::Ui(ui));
    }

    /// Court position at the centre of a terminal cell, if it lies on the
    /// canvas
    fn to_court(&self, column: u16, row: u16) -> Option<Vec2> {
        cell_to_court((column, row), self.origin, self.canvas_size)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(e) = Self::clean_term() {
            log::error!("failed to restore the terminal: {}", e);
        }
    }
}

fn cell_to_court(cell: (u16, u16), origin: (u16, u16), size: (u16, u16)) -> Option<Vec2> {
    let col = cell.0.checked_sub(origin.0)?;
    let row = cell.1.checked_sub(origin.1)?;
    if col >= size.0 || row >= size.1 {
        return None;
    }
    Some(Vec2::new(
        (col as f32 + 0.5) * GLYPH_W,
        (row as f32 + 0.5) * GLYPH_H,
    ))
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}
