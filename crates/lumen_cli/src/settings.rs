//! JSON render settings.

use std::path::Path;

use anyhow::{Context, Result};
use lumen_math::{Point, Vector};
use lumen_renderer::{Camera, RenderConfig, RenderResult, DEFAULT_RECURSION_DEPTH};
use serde::{Deserialize, Serialize};

/// Camera and render parameters. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    pub field_of_view: f64,
    pub from: [f64; 3],
    pub to: [f64; 3],
    pub up: [f64; 3],
    pub aperture: f64,
    pub focal_length: f64,
    pub focal_samples: usize,
    pub supersampling: usize,
    pub max_depth: u32,
    pub seed: u64,
    /// Worker threads; 0 lets rayon decide
    pub threads: usize,
    /// Image mapped onto the demo floor
    pub floor_texture: Option<String>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            field_of_view: 1.05,
            from: [0.0, 1.5, -5.0],
            to: [0.0, 1.0, 0.0],
            up: [0.0, 1.0, 0.0],
            aperture: 0.0,
            focal_length: 1.0,
            focal_samples: 4,
            supersampling: 1,
            max_depth: DEFAULT_RECURSION_DEPTH,
            seed: 0,
            threads: 0,
            floor_texture: None,
        }
    }
}

impl RenderSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        Ok(settings)
    }

    pub fn camera(&self) -> RenderResult<Camera> {
        let [fx, fy, fz] = self.from;
        let [tx, ty, tz] = self.to;
        let [ux, uy, uz] = self.up;
        Ok(Camera::new(self.width, self.height, self.field_of_view)
            .with_view(Point::new(fx, fy, fz), Point::new(tx, ty, tz), Vector::new(ux, uy, uz))?
            .with_aperture(self.aperture)
            .with_focal_length(self.focal_length)
            .with_focal_samples(self.focal_samples)
            .with_supersampling(self.supersampling))
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::default()
            .with_max_depth(self.max_depth)
            .with_seed(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let settings: RenderSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn test_partial_json_overrides_fields() {
        let settings: RenderSettings =
            serde_json::from_str(r#"{"width": 320, "height": 240, "aperture": 0.1, "seed": 42}"#)
                .unwrap();
        assert_eq!(settings.width, 320);
        assert_eq!(settings.height, 240);
        assert_eq!(settings.aperture, 0.1);
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.max_depth, DEFAULT_RECURSION_DEPTH);
        assert!(settings.floor_texture.is_none());
    }

    #[test]
    fn test_camera_from_settings() {
        let settings = RenderSettings {
            width: 100,
            height: 50,
            aperture: 0.2,
            focal_samples: 6,
            supersampling: 3,
            ..Default::default()
        };
        let camera = settings.camera().unwrap();
        assert_eq!(camera.hsize(), 100);
        assert_eq!(camera.vsize(), 50);
        assert_eq!(camera.focal_samples(), 6);
        assert_eq!(camera.supersampling(), 3);
    }

    #[test]
    fn test_render_config_from_settings() {
        let settings = RenderSettings {
            max_depth: 2,
            seed: 11,
            ..Default::default()
        };
        let config = settings.render_config();
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.seed, 11);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = RenderSettings::load("/nonexistent/settings.json").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/settings.json"));
    }
}
