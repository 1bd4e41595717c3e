//! Data-driven game balance
//!
//! [`Tuning`] mirrors every balance constant in [`crate::consts`]. Hosts can
//! load a JSON file that overrides any subset of fields; missing keys fall
//! back to the compile-time defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a tuning table
#[derive(Debug)]
pub enum TuningError {
    /// The tuning file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The JSON was malformed or had wrongly-typed fields
    Parse(serde_json::Error),
    /// A value is outside the range the simulation can run with
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io { path, source } => {
                write!(f, "failed to read tuning file {}: {}", path.display(), source)
            }
            TuningError::Parse(err) => write!(f, "malformed tuning JSON: {}", err),
            TuningError::OutOfRange {
                name,
                value,
                expected,
            } => write!(f, "tuning value '{}' = {} is out of range ({})", name, value, expected),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io { source, .. } => Some(source),
            TuningError::Parse(err) => Some(err),
            TuningError::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

/// Runtime-tunable balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Player ===
    pub player_speed: f32,
    pub player_hp: i32,
    pub shoot_cooldown_ms: f64,
    pub bullet_speed: f32,
    pub bullet_damage: i32,

    // === Power-ups ===
    pub heart_value: i32,
    pub shield_duration: u32,
    pub multishot_duration: u32,
    pub bomb_kill_chance: f32,

    // === Drop bands ===
    pub drop_chance_heart: f32,
    pub drop_chance_shield: f32,
    pub drop_chance_multishot: f32,
    pub drop_chance_bomb: f32,

    // === Spawn curve ===
    pub spawn_rate_base: u64,
    pub spawn_rate_min: u64,
    pub spawn_score_divisor: u64,

    // === Cosmetics ===
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            player_speed: PLAYER_SPEED,
            player_hp: PLAYER_HP,
            shoot_cooldown_ms: SHOOT_COOLDOWN_MS,
            bullet_speed: BULLET_SPEED,
            bullet_damage: BULLET_DAMAGE,

            heart_value: HEART_VALUE,
            shield_duration: SHIELD_DURATION,
            multishot_duration: MULTISHOT_DURATION,
            bomb_kill_chance: BOMB_KILL_CHANCE,

            drop_chance_heart: DROP_CHANCE_HEART,
            drop_chance_shield: DROP_CHANCE_SHIELD,
            drop_chance_multishot: DROP_CHANCE_MULTISHOT,
            drop_chance_bomb: DROP_CHANCE_BOMB,

            spawn_rate_base: SPAWN_RATE_BASE,
            spawn_rate_min: SPAWN_RATE_MIN,
            spawn_score_divisor: SPAWN_SCORE_DIVISOR,

            max_particles: MAX_PARTICLES,
        }
    }
}

impl Tuning {
    /// Parse a tuning table from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check every value the simulation divides by, rolls against, or spawns into
    pub fn validate(&self) -> Result<(), TuningError> {
        // Spawn y is drawn from [50, H - 50], so the canvas needs some height
        if self.canvas_height <= 100.0 || !self.canvas_height.is_finite() {
            return Err(out_of_range("canvas_height", self.canvas_height as f64, "> 100"));
        }
        if self.canvas_width <= PLAYER_WIDTH || !self.canvas_width.is_finite() {
            return Err(out_of_range("canvas_width", self.canvas_width as f64, "> player width"));
        }
        if self.player_hp <= 0 {
            return Err(out_of_range("player_hp", self.player_hp as f64, "> 0"));
        }
        if self.shoot_cooldown_ms < 0.0 {
            return Err(out_of_range("shoot_cooldown_ms", self.shoot_cooldown_ms, ">= 0"));
        }
        if self.spawn_rate_min == 0 {
            return Err(out_of_range("spawn_rate_min", 0.0, ">= 1"));
        }
        if self.spawn_score_divisor == 0 {
            return Err(out_of_range("spawn_score_divisor", 0.0, ">= 1"));
        }

        let chances = [
            ("drop_chance_heart", self.drop_chance_heart),
            ("drop_chance_shield", self.drop_chance_shield),
            ("drop_chance_multishot", self.drop_chance_multishot),
            ("drop_chance_bomb", self.drop_chance_bomb),
            ("bomb_kill_chance", self.bomb_kill_chance),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(out_of_range(name, value as f64, "0.0..=1.0"));
            }
        }

        let total_drop = self.drop_chance_heart
            + self.drop_chance_shield
            + self.drop_chance_multishot
            + self.drop_chance_bomb;
        if total_drop > 1.0 {
            return Err(out_of_range("drop_chance_*", total_drop as f64, "sum <= 1.0"));
        }

        Ok(())
    }
}

fn out_of_range(name: &'static str, value: f64, expected: &'static str) -> TuningError {
    TuningError::OutOfRange {
        name,
        value,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.canvas_width, 1200.0);
        assert_eq!(tuning.spawn_rate_base, 100);
        assert_eq!(tuning.heart_value, 20);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_hp": 250, "shield_duration": 120 }"#).unwrap();
        assert_eq!(tuning.player_hp, 250);
        assert_eq!(tuning.shield_duration, 120);
        assert_eq!(tuning.multishot_duration, MULTISHOT_DURATION);
        assert_eq!(tuning.drop_chance_bomb, DROP_CHANCE_BOMB);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "drop_chance_heart": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                name: "drop_chance_heart",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_overfull_drop_bands() {
        let json = r#"{ "drop_chance_heart": 0.6, "drop_chance_bomb": 0.6 }"#;
        assert!(matches!(
            Tuning::from_json(json),
            Err(TuningError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_divisor() {
        let err = Tuning::from_json(r#"{ "spawn_score_divisor": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("spawn_score_divisor"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }
}
