
use crate::physics::collision_mgr::MAX_DT;
use std::{
    path::Path,
    fs::File,
    io::{
        BufReader,
        BufWriter,
    },
};
use serde::{Serialize, Deserialize};
use anyhow::*;


pub const SETTINGS_FILE_NAME: &'static str = "settings.json";


/// Gameplay tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Player walking speed, in units per second.
    pub move_speed: f32,
    /// Upward jump velocity as a fraction of gravity's acceleration.
    pub jump_factor: f32,
    /// Longest physics step a frame is split into, in seconds.
    pub max_step: f32,
    /// Seconds between active color changes.
    pub color_interval: f32,
    /// Seconds after a color change before the old color's cubes retract.
    pub retract_delay: f32,
    /// How many board cells around the player to test for collisions.
    pub candidate_range: i64,
    /// Side length of a board cell.
    pub block_size: f32,
    /// How far the player may fall below the highest point reached before the game is lost.
    pub lose_distance: f32,
    /// How long the headless demo simulates, in seconds.
    pub demo_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            move_speed: 5.0,
            jump_factor: 0.6,
            max_step: 1.0 / 60.0,
            color_interval: 4.0,
            retract_delay: 1.5,
            candidate_range: 2,
            block_size: 0.5,
            lose_distance: 7.0,
            demo_seconds: 3.0,
        }
    }
}

impl Settings {
    /// Read settings from `path`, falling back to the defaults with a warning if it's missing or
    /// invalid.
    pub fn read(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::try_read(path)
            .unwrap_or_else(|e| {
                warn!(%e, path = %path.display(), "using default settings");
                Self::default()
            })
    }

    pub fn try_read(path: impl AsRef<Path>) -> Result<Self> {
        let settings: Self = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.max_step > 0.0 && self.max_step <= MAX_DT,
            "max_step must be in (0, {}], got {}",
            MAX_DT,
            self.max_step,
        );
        ensure!(self.block_size > 0.0, "block_size must be positive, got {}", self.block_size);
        ensure!(self.candidate_range >= 0, "candidate_range must not be negative");
        ensure!(
            self.lose_distance > 0.0,
            "lose_distance must be positive, got {}",
            self.lose_distance,
        );
        Ok(())
    }
}


#[test]
fn test_default_settings_valid() {
    assert!(Settings::default().validate().is_ok());
}

#[test]
fn test_settings_partial_json() {
    let settings: Settings = serde_json::from_str(r#"{ "move_speed": 7.5 }"#).unwrap();
    assert_eq!(settings.move_speed, 7.5);
    assert_eq!(settings.jump_factor, Settings::default().jump_factor);
}

#[test]
fn test_settings_rejects_large_step() {
    let settings = Settings {
        max_step: 0.25,
        ..Settings::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_file_round_trip() {
    let path = std::env::temp_dir().join(format!("color_jump_settings_{}.json", std::process::id()));
    let settings = Settings {
        demo_seconds: 10.0,
        ..Settings::default()
    };
    settings.write(&path).unwrap();
    assert_eq!(Settings::try_read(&path).unwrap(), settings);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(Settings::read(&path), Settings::default());
}

#[test]
fn test_invalid_settings_file_falls_back() {
    let path = std::env::temp_dir()
        .join(format!("color_jump_bad_settings_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "max_step": 5.0 }"#).unwrap();
    assert!(Settings::try_read(&path).is_err());
    assert_eq!(Settings::read(&path), Settings::default());
    std::fs::remove_file(&path).unwrap();
}
