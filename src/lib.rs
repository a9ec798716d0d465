//! Air Hockey - a two-player air hockey game for the terminal
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (physics, collisions, match state)
//! - `ui`: Widgets and screens (start, controls, pause, play, end)
//! - `app`: Screen state machine tying the UI to the simulation
//! - `render`: Rasterises a frame onto a character canvas
//! - `platform`: Terminal backend (crossterm)
//! - `assets`: Help text and title animations loaded at startup
//! - `settings`: JSON game settings

pub mod app;
pub mod assets;
pub mod error;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::{App, Mode};
pub use error::{Error, Result};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Distances are court units, speeds are court units per tick.
pub mod consts {
    /// Simulation ticks per second
    pub const TICKS_PER_SEC: u32 = 60;

    /// Court dimensions
    pub const COURT_WIDTH: f32 = 1000.0;
    pub const COURT_HEIGHT: f32 = 500.0;
    pub const CENTER_CIRCLE_RADIUS: f32 = 75.0;

    /// Goal-mouth band on both end boundaries
    pub const GOAL_TOP: f32 = 175.0;
    pub const GOAL_BOTTOM: f32 = 325.0;

    /// Mallet defaults
    pub const MALLET_RADIUS: f32 = 35.0;
    pub const MALLET_SPEED: f32 = 10.0;
    /// Extra horizontal clearance kept from the court edge and centre line
    pub const MALLET_EDGE_MARGIN: f32 = 5.0;
    /// Home position: distance from the end boundary
    pub const MALLET_HOME_INSET: f32 = 75.0;
    /// Home position: lift above the horizontal centre line
    pub const MALLET_HOME_LIFT: f32 = 10.0;

    /// Puck defaults
    pub const PUCK_RADIUS: f32 = 20.0;
    pub const PUCK_START_SPEED: f32 = 10.0;
    /// Speed gained each time a different mallet takes the puck
    pub const PUCK_SPEED_INCREMENT: f32 = 0.5;
    /// Serve angle offset from horizontal (radians)
    pub const SERVE_ANGLE_OFFSET: f32 = 0.01;
}

/// RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 200, 0);
    pub const RED: Rgb = Rgb(255, 55, 55);
    pub const BLUE: Rgb = Rgb(20, 20, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Centre of the court
#[inline]
pub fn court_center() -> Vec2 {
    Vec2::new(consts::COURT_WIDTH / 2.0, consts::COURT_HEIGHT / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) - (-PI / 2.0)).abs() < 1e-6);
        assert!((normalize_angle(2.0 * PI + 0.5) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let v = polar_to_cartesian(10.0, PI / 2.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 10.0).abs() < 1e-5);
    }
}
