//! Startup assets: the controls help text and the animated screen titles
//!
//! Layout under the assets directory:
//!
//! ```text
//! controls.txt
//! titles/start/start*.txt
//! titles/controls/controls*.txt
//! titles/pause/pause*.txt
//! titles/end/end*.txt
//! ```
//!
//! Anything missing is fatal; the game never reads files once it's running.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// One frame of title art, line by line
pub type Frame = Vec<String>;

/// Screens with an animated title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Title {
    Start,
    Controls,
    Pause,
    End,
}

impl Title {
    pub const ALL: [Title; 4] = [Title::Start, Title::Controls, Title::Pause, Title::End];

    /// Directory under `titles/`, also the frame file prefix
    pub fn name(self) -> &'static str {
        match self {
            Title::Start => "start",
            Title::Controls => "controls",
            Title::Pause => "pause",
            Title::End => "end",
        }
    }
}

/// Everything loaded from the assets directory
#[derive(Debug, Clone, Default)]
pub struct Assets {
    /// Help text columns from `controls.txt`
    pub controls: Vec<String>,
    pub titles: HashMap<Title, Vec<Frame>>,
}

impl Assets {
    /// Load and check every asset under `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let controls_path = dir.join("controls.txt");
        let text = read(&controls_path)?;
        let controls = parse_controls(&text)?;

        let mut titles = HashMap::new();
        for title in Title::ALL {
            let frames = load_frames(&dir.join("titles").join(title.name()), title.name())?;
            log::debug!("{} title: {} frames", title.name(), frames.len());
            titles.insert(title, frames);
        }

        log::info!(
            "Loaded assets from {} ({} help columns)",
            dir.display(),
            controls.len()
        );
        Ok(Self { controls, titles })
    }

    /// Frames for a title; empty if it was never loaded
    pub fn title(&self, title: Title) -> &[Frame] {
        self.titles.get(&title).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Asset {
        path: path.to_path_buf(),
        source,
    })
}

/// Split help text into columns.
///
/// The first character of the text is the delimiter. The rest is split on
/// it and every piece but the last (what follows the final delimiter) is a
/// column.
pub fn parse_controls(text: &str) -> Result<Vec<String>> {
    let mut chars = text.chars();
    let delimiter = chars
        .next()
        .ok_or(Error::ControlsText("file is empty".into()))?;
    let body = chars.as_str();

    let mut sections: Vec<&str> = body.split(delimiter).collect();
    sections.pop();
    if sections.is_empty() {
        return Err(Error::ControlsText(
            format!("no sections closed by delimiter {:?}", delimiter).into(),
        ));
    }

    Ok(sections
        .into_iter()
        .map(|s| s.trim_matches(|c| c == '\n' || c == '\r').replace('\r', ""))
        .collect())
}

/// Frames are the `<prefix>*.txt` files in `dir`, in file name order
fn load_frames(dir: &Path, prefix: &str) -> Result<Vec<Frame>> {
    let entries = std::fs::read_dir(dir).map_err(|source| Error::Asset {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| Error::Asset {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        let is_frame = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(prefix) && n.ends_with(".txt"));
        if is_frame {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(Error::Asset {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no title frames"),
        });
    }

    paths
        .iter()
        .map(|p| read(p).map(|text| text.lines().map(str::to_owned).collect()))
        .collect()
}
