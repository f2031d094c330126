//! Frame loop configuration and the named build presets.
//!
//! The three presets capture how each shipped build behaved. A JSON file can
//! start from any preset and override individual fields:
//!
//! ```json
//! { "preset": "desktop", "bounds": "clamped", "pacing": { "mode": "delta", "fps": 60 } }
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::assets::AssetLayout;
use crate::controller::BoundsPolicy;
use crate::entity::SPRITE_SIZE;
use crate::time::Pacing;

pub const SCREEN_WIDTH: u32 = 640;
pub const SCREEN_HEIGHT: u32 = 480;
pub const MOVE_DELTA: u32 = 10;
pub const TARGET_FPS: u32 = 60;
/// Largest accepted screen edge, matching the 2D texture limit of common GPUs.
pub const MAX_SCREEN_DIMENSION: u32 = 16384;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// D-pad press/release events latch motion and colour.
    Edge,
    /// Key and D-pad held state is sampled every frame.
    #[default]
    Polled,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    ConsoleLegacy,
    ConsoleModern,
    #[default]
    Desktop,
}

impl Preset {
    pub const ALL: &'static [Preset] = &[
        Preset::ConsoleLegacy,
        Preset::ConsoleModern,
        Preset::Desktop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ConsoleLegacy => "console-legacy",
            Self::ConsoleModern => "console-modern",
            Self::Desktop => "desktop",
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .iter()
            .copied()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown preset '{s}' (expected one of: console-legacy, console-modern, desktop)"
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub move_delta: u32,
    pub input_mode: InputMode,
    pub bounds: BoundsPolicy,
    pub pacing: Pacing,
    pub asset_layout: AssetLayout,
}

impl LoopConfig {
    pub fn preset(preset: Preset) -> Self {
        let base = Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            move_delta: MOVE_DELTA,
            input_mode: InputMode::Polled,
            bounds: BoundsPolicy::Literal,
            pacing: Pacing::SinceStart { fps: TARGET_FPS },
            asset_layout: AssetLayout::Desktop,
        };
        match preset {
            // The first console build waited for vblank instead of sleeping.
            Preset::ConsoleLegacy => Self {
                input_mode: InputMode::Edge,
                pacing: Pacing::Unpaced,
                asset_layout: AssetLayout::Console,
                ..base
            },
            Preset::ConsoleModern => Self {
                asset_layout: AssetLayout::Console,
                ..base
            },
            Preset::Desktop => base,
        }
    }

    pub fn max_x(&self) -> i32 {
        self.screen_width as i32 - SPRITE_SIZE as i32
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.move_delta == 0 {
            return Err("Config validation failed: move_delta must be > 0".to_string());
        }
        if self.screen_width < SPRITE_SIZE || self.screen_height < SPRITE_SIZE {
            return Err(format!(
                "Config validation failed: screen {}x{} is smaller than the {SPRITE_SIZE}px sprite",
                self.screen_width, self.screen_height
            ));
        }
        if self.screen_width > MAX_SCREEN_DIMENSION || self.screen_height > MAX_SCREEN_DIMENSION {
            return Err(format!(
                "Config validation failed: screen {}x{} exceeds {MAX_SCREEN_DIMENSION}px",
                self.screen_width, self.screen_height
            ));
        }
        if i64::from(self.move_delta) > i64::from(self.max_x()) {
            return Err(format!(
                "Config validation failed: move_delta {} is wider than the {}px track",
                self.move_delta,
                self.max_x()
            ));
        }
        if self.pacing.target_fps() == Some(0) {
            return Err("Config validation failed: pacing fps must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    preset: Preset,
    screen_width: Option<u32>,
    screen_height: Option<u32>,
    move_delta: Option<u32>,
    input_mode: Option<InputMode>,
    bounds: Option<BoundsPolicy>,
    pacing: Option<Pacing>,
    asset_layout: Option<AssetLayout>,
}

impl ConfigFile {
    fn resolve(self) -> LoopConfig {
        let base = LoopConfig::preset(self.preset);
        LoopConfig {
            screen_width: self.screen_width.unwrap_or(base.screen_width),
            screen_height: self.screen_height.unwrap_or(base.screen_height),
            move_delta: self.move_delta.unwrap_or(base.move_delta),
            input_mode: self.input_mode.unwrap_or(base.input_mode),
            bounds: self.bounds.unwrap_or(base.bounds),
            pacing: self.pacing.unwrap_or(base.pacing),
            asset_layout: self.asset_layout.unwrap_or(base.asset_layout),
        }
    }
}

pub fn parse_config(raw: &str) -> Result<LoopConfig, String> {
    let file: ConfigFile =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse config JSON: {e}"))?;
    let config = file.resolve();
    config.validate()?;
    Ok(config)
}

pub fn load_config_from_path(path: &Path) -> Result<LoopConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
    parse_config(&raw).map_err(|e| format!("{}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn presets_match_shipped_builds() {
        let legacy = LoopConfig::preset(Preset::ConsoleLegacy);
        assert_eq!(legacy.input_mode, InputMode::Edge);
        assert_eq!(legacy.pacing, Pacing::Unpaced);
        assert_eq!(legacy.asset_layout, AssetLayout::Console);

        let modern = LoopConfig::preset(Preset::ConsoleModern);
        assert_eq!(modern.input_mode, InputMode::Polled);
        assert_eq!(modern.pacing, Pacing::SinceStart { fps: 60 });
        assert_eq!(modern.asset_layout, AssetLayout::Console);

        let desktop = LoopConfig::preset(Preset::Desktop);
        assert_eq!(desktop.asset_layout, AssetLayout::Desktop);
        assert_eq!(desktop.bounds, BoundsPolicy::Literal);
        assert_eq!(desktop.max_x(), 512);

        for &preset in Preset::ALL {
            assert!(LoopConfig::preset(preset).validate().is_ok());
        }
    }

    #[test]
    fn preset_names_round_trip() {
        for &preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>(), Ok(preset));
        }
        assert_eq!(" Console-Modern ".parse::<Preset>(), Ok(Preset::ConsoleModern));
        assert!("xbox".parse::<Preset>().is_err());
    }

    #[test]
    fn empty_file_is_desktop_preset() {
        assert_eq!(parse_config("{}").unwrap(), LoopConfig::preset(Preset::Desktop));
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = parse_config(
            r#"{
              "preset": "console-legacy",
              "bounds": "clamped",
              "move_delta": 4,
              "pacing": { "mode": "delta", "fps": 30 }
            }"#,
        )
        .expect("config should parse");
        assert_eq!(config.input_mode, InputMode::Edge);
        assert_eq!(config.bounds, BoundsPolicy::Clamped);
        assert_eq!(config.move_delta, 4);
        assert_eq!(config.pacing, Pacing::Delta { fps: 30 });
        assert_eq!(config.asset_layout, AssetLayout::Console);
    }

    #[test]
    fn shipped_demo_config_parses() {
        let config = parse_config(include_str!("../../../demos/clamped.json")).unwrap();
        assert_eq!(config.bounds, BoundsPolicy::Clamped);
        assert_eq!(config.pacing, Pacing::Delta { fps: 60 });
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert!(parse_config(r#"{ "move_delta": 0 }"#).is_err());
        assert!(parse_config(r#"{ "screen_width": 100 }"#).is_err());
        assert!(parse_config(r#"{ "pacing": { "mode": "since_start", "fps": 0 } }"#).is_err());
        assert!(parse_config(r#"{ "frame_rate": 60 }"#).is_err());
    }

    #[test]
    fn validation_rejects_steps_and_screens_that_overflow() {
        assert!(parse_config(r#"{ "move_delta": 2147483647 }"#).is_err());
        assert!(parse_config(r#"{ "move_delta": 4294967295 }"#).is_err());
        assert!(parse_config(r#"{ "move_delta": 513 }"#).is_err());
        assert!(parse_config(r#"{ "screen_width": 4294967295 }"#).is_err());
        assert!(parse_config(r#"{ "screen_height": 2147483648 }"#).is_err());

        let widest_step = parse_config(r#"{ "move_delta": 512 }"#).expect("config should parse");
        assert_eq!(widest_step.move_delta, 512);
        let wide_screen = parse_config(r#"{ "screen_width": 16384, "move_delta": 1000 }"#)
            .expect("config should parse");
        assert_eq!(wide_screen.max_x(), 16256);
    }

    #[test]
    fn load_reports_missing_file_path() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("rsbs_missing_config_{nanos}.json"));
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.contains("rsbs_missing_config_"));
    }

    #[test]
    fn load_reads_file() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "rsbs_config_test_{}_{}.json",
            std::process::id(),
            nanos
        ));
        fs::write(&path, r#"{ "preset": "console-modern", "input_mode": "edge" }"#)
            .expect("write config file");
        let config = load_config_from_path(&path).expect("config should load");
        assert_eq!(config.input_mode, InputMode::Edge);
        assert_eq!(config.asset_layout, AssetLayout::Console);
        let _ = fs::remove_file(path);
    }
}
