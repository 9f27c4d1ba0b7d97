//! Surface configuration supplied by the surrounding UI.
//!
//! Keys are camelCase so the host can pass its option object straight
//! through as JSON: `{"brushColor":"#ff0000","brushSize":4,"tool":"draw"}`.

use crate::color::Color;
use crate::error::ConfigError;
use crate::model::{Brush, ToolMode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BRUSH_COLOR: &str = "#000000";
pub const DEFAULT_BRUSH_SIZE: f32 = 6.0;
pub const DEFAULT_HISTORY_LIMIT: usize = 20;
pub const DEFAULT_FIT_FRACTION: f32 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurfaceConfig {
    /// CSS color for new strokes.
    pub brush_color: String,
    /// Stroke width in logical pixels.
    pub brush_size: f32,
    /// Initial tool mode.
    pub tool: ToolMode,
    /// Maximum undo depth.
    pub history_limit: usize,
    /// How many images the background layer holds. `1` means a new import
    /// replaces the previous image.
    pub max_images: usize,
    /// Fraction of each surface dimension an imported image may fill.
    pub fit_fraction: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            brush_color: DEFAULT_BRUSH_COLOR.to_string(),
            brush_size: DEFAULT_BRUSH_SIZE,
            tool: ToolMode::Move,
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_images: 1,
            fit_fraction: DEFAULT_FIT_FRACTION,
        }
    }
}

impl SurfaceConfig {
    /// Parse and validate a JSON config. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SurfaceConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!(
            "surface config: tool={} brush={}@{} history={} images={}",
            config.tool,
            config.brush_color,
            config.brush_size,
            config.history_limit,
            config.max_images
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Color::parse(&self.brush_color)?;
        validate_brush_size(self.brush_size)?;
        if self.history_limit == 0 {
            return Err(ConfigError::OutOfRange {
                field: "historyLimit",
                reason: "must be at least 1".into(),
            });
        }
        if self.max_images == 0 {
            return Err(ConfigError::OutOfRange {
                field: "maxImages",
                reason: "must be at least 1".into(),
            });
        }
        if !(self.fit_fraction > 0.0 && self.fit_fraction <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "fitFraction",
                reason: format!("{} is outside (0, 1]", self.fit_fraction),
            });
        }
        Ok(())
    }

    /// The brush described by `brush_color` / `brush_size`.
    pub fn brush(&self) -> Result<Brush, ConfigError> {
        validate_brush_size(self.brush_size)?;
        Ok(Brush {
            color: Color::parse(&self.brush_color)?,
            size: self.brush_size,
        })
    }
}

pub fn validate_brush_size(size: f32) -> Result<(), ConfigError> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field: "brushSize",
            reason: format!("{size} is not a positive width"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_design_generator() {
        let config = SurfaceConfig::default();
        assert_eq!(config.tool, ToolMode::Move);
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.brush().unwrap(), Brush::default());
    }

    #[test]
    fn parses_host_options() {
        let config =
            SurfaceConfig::from_json(r##"{"brushColor":"#ff0000","brushSize":4,"tool":"draw"}"##)
                .unwrap();
        assert_eq!(config.tool, ToolMode::Draw);
        assert_eq!(config.brush_size, 4.0);
        assert_eq!(config.brush().unwrap().color, Color::rgb(255, 0, 0));
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            SurfaceConfig::from_json(r#"{"brushSize":0}"#),
            Err(ConfigError::OutOfRange { field: "brushSize", .. })
        ));
        assert!(matches!(
            SurfaceConfig::from_json(r#"{"historyLimit":0}"#),
            Err(ConfigError::OutOfRange { field: "historyLimit", .. })
        ));
        assert!(matches!(
            SurfaceConfig::from_json(r#"{"fitFraction":1.5}"#),
            Err(ConfigError::OutOfRange { field: "fitFraction", .. })
        ));
        assert!(matches!(
            SurfaceConfig::from_json(r#"{"brushColor":"chartreuse"}"#),
            Err(ConfigError::Color(_))
        ));
        assert!(matches!(
            SurfaceConfig::from_json(r#"{"tool":"erase"}"#),
            Err(ConfigError::Json(_))
        ));
    }
}
