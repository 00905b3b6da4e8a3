use std::{fs, io, path::PathBuf, str::FromStr};

use colored::Color;
use log::LevelFilter;
use mazecore::maze::{SetsKind, Termination};
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::base_path;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot access settings file {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("error reading settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum SetsVariant {
    Trivial,
    #[default]
    Faster,
}

impl From<SetsVariant> for SetsKind {
    fn from(value: SetsVariant) -> Self {
        match value {
            SetsVariant::Trivial => SetsKind::Trivial,
            SetsVariant::Faster => SetsKind::Faster,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazeTermination {
    #[default]
    Perfect,
    EntranceToExit,
}

impl From<MazeTermination> for Termination {
    fn from(value: MazeTermination) -> Self {
        match value {
            MazeTermination::Perfect => Termination::AllConnected,
            MazeTermination::EntranceToExit => Termination::EntranceToExit,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub height: Option<usize>,
    #[serde(default)]
    pub sets: Option<SetsVariant>,
    #[serde(default)]
    pub termination: Option<MazeTermination>,
    #[serde(default)]
    pub solve: Option<bool>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub wall: Option<String>,
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub path_color: Option<String>,
}

impl Settings {
    pub fn default_path() -> PathBuf {
        base_path().join("settings.ron")
    }

    pub fn get_width(&self) -> usize {
        self.width.unwrap_or(20)
    }

    pub fn get_height(&self) -> usize {
        self.height.unwrap_or(10)
    }

    pub fn get_sets(&self) -> SetsVariant {
        self.sets.unwrap_or_default()
    }

    pub fn get_termination(&self) -> MazeTermination {
        self.termination.unwrap_or_default()
    }

    pub fn get_solve(&self) -> bool {
        self.solve.unwrap_or_default()
    }

    /// Unknown level names fall back to `warn`.
    pub fn get_log_level(&self) -> LevelFilter {
        match &self.log_level {
            Some(level) => LevelFilter::from_str(level).unwrap_or_else(|_| {
                eprintln!("unknown log level {:?} in settings, using warn", level);
                LevelFilter::Warn
            }),
            None => LevelFilter::Warn,
        }
    }

    pub fn get_wall(&self) -> String {
        self.wall.clone().unwrap_or_else(|| "██".to_string())
    }

    pub fn get_open(&self) -> String {
        self.open.clone().unwrap_or_else(|| "  ".to_string())
    }

    pub fn get_path(&self) -> String {
        self.path.clone().unwrap_or_else(|| "··".to_string())
    }

    pub fn get_path_color(&self) -> Option<Color> {
        let name = self.path_color.as_deref().unwrap_or("red");
        let color = Color::from_str(name).ok();
        if color.is_none() {
            log::warn!("unknown path color {:?}, path is left uncolored", name);
        }
        color
    }

    pub fn parse(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(source)
    }

    /// Reads settings from `path`, writing the defaults there first if the file is missing.
    pub fn load(path: PathBuf) -> Result<Self, SettingsError> {
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Self::write_default(&path)?;
                DEFAULT_SETTINGS.to_string()
            }
            Err(source) => return Err(SettingsError::Io { path, source }),
        };

        Self::parse(&source).map_err(|source| SettingsError::Parse { path, source })
    }

    pub fn reset_config(path: PathBuf) -> Result<(), SettingsError> {
        Self::write_default(&path)
    }

    fn write_default(path: &PathBuf) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, DEFAULT_SETTINGS).map_err(io_err)
    }
}
