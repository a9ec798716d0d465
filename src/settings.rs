//! Game settings
//!
//! Read once at startup from a JSON file. Every field is optional; missing
//! fields (or a missing file) fall back to the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::MatchRules;

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "AIR_HOCKEY_CONFIG";
/// Settings file used when [`CONFIG_ENV`] is unset
pub const DEFAULT_CONFIG_FILE: &str = "air_hockey.json";

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Rules ===
    /// Goals needed to win
    pub score_to_win: u32,
    /// Match length as `MM:SS`
    pub time_limit: String,
    /// How long "Goal!" stays up before positions reset (seconds)
    pub goal_text_secs: f32,
    /// Frozen wait after the reset before play resumes (seconds)
    pub goal_wait_secs: f32,

    // === Loop ===
    /// Frames (and simulation ticks) per second
    pub fps: u32,

    // === Files ===
    /// Directory holding `controls.txt` and `titles/`
    pub assets_dir: PathBuf,
    /// Log output; the terminal belongs to the game
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            score_to_win: 7,
            time_limit: "03:00".to_string(),
            goal_text_secs: 2.0,
            goal_wait_secs: 1.0,

            fps: crate::consts::TICKS_PER_SEC,

            assets_dir: PathBuf::from("assets"),
            log_file: PathBuf::from("air_hockey.log"),
        }
    }
}

impl Settings {
    /// Where to look for the settings file
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load from [`Settings::config_path`]
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`. A missing file means defaults; anything else that
    /// goes wrong is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the game can't run with
    pub fn validate(&self) -> Result<()> {
        if self.score_to_win == 0 {
            return Err(Error::Settings("score_to_win must be at least 1".into()));
        }
        if self.fps == 0 {
            return Err(Error::Settings("fps must be at least 1".into()));
        }
        if !(self.goal_text_secs >= 0.0 && self.goal_wait_secs >= 0.0) {
            return Err(Error::Settings("goal timers must not be negative".into()));
        }
        self.time_limit_secs()?;
        Ok(())
    }

    /// The time limit in seconds
    pub fn time_limit_secs(&self) -> Result<u32> {
        parse_clock(&self.time_limit).ok_or_else(|| {
            Error::Settings(format!("time_limit {:?} is not MM:SS", self.time_limit).into())
        })
    }

    /// Win conditions and timers in ticks at the configured frame rate
    pub fn rules(&self) -> Result<MatchRules> {
        self.validate()?;
        let to_ticks = |secs: f32| (secs * self.fps as f32).round() as u32;
        Ok(MatchRules {
            ticks_per_sec: self.fps,
            target_score: self.score_to_win,
            time_limit_ticks: self.time_limit_secs()? as u64 * self.fps as u64,
            goal_text_ticks: to_ticks(self.goal_text_secs),
            goal_wait_ticks: to_ticks(self.goal_wait_secs),
        })
    }
}

/// Parse `MM:SS` into seconds. Seconds must be below 60; the limit must be
/// positive.
pub fn parse_clock(s: &str) -> Option<u32> {
    let (mins, secs) = s.trim().split_once(':')?;
    let mins: u32 = mins.parse().ok()?;
    let secs: u32 = secs.parse().ok()?;
    if secs >= 60 {
        return None;
    }
    let total = mins.checked_mul(60)?.checked_add(secs)?;
    (total > 0).then_some(total)
}
