//! Demo configuration, loaded from YAML. Every field is optional.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shoreline_input::CameraBindings;
use shoreline_render::{EffectMode, SHADOW_MAP_SIZE};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{field} must be greater than zero")]
    ZeroSize { field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Which parts of the demo scene are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadToggles {
    pub quad: bool,
    pub mirror: bool,
    pub bunny: bool,
    pub buddha: bool,
    pub dragon: bool,
    pub spear: bool,
    pub walls: bool,
}

impl Default for LoadToggles {
    fn default() -> Self {
        Self {
            quad: false,
            mirror: true,
            bunny: true,
            buddha: true,
            dragon: true,
            spear: true,
            walls: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub theta: f32,
    pub phi: f32,
    pub bindings: CameraBindings,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(10.0, 10.0, 10.0),
            theta: -135.0,
            phi: -34.0,
            bindings: CameraBindings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub direction: Vec3,
    pub colour: Vec3,
    pub intensity: f32,
    /// Degrees per second the sun orbits the vertical axis during a run.
    pub sweep: f32,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.25, -0.25, 0.25),
            colour: Vec3::splat(0.5),
            intensity: 1.0,
            sweep: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub shadow_map_size: u32,
    pub load: LoadToggles,
    pub effect: EffectMode,
    pub show_grid: bool,
    pub camera: CameraConfig,
    pub sun: SunConfig,
    pub ambient: Vec3,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            shadow_map_size: SHADOW_MAP_SIZE,
            load: LoadToggles::default(),
            effect: EffectMode::None,
            show_grid: false,
            camera: CameraConfig::default(),
            sun: SunConfig::default(),
            ambient: Vec3::splat(0.25),
        }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Zero-sized windows or shadow maps would divide by zero in the
    /// projection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, size) in [
            ("window.width", self.window.width),
            ("window.height", self.window.height),
            ("shadow_map_size", self.shadow_map_size),
        ] {
            if size == 0 {
                return Err(ConfigError::ZeroSize { field });
            }
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_demo_startup() {
        let config = DemoConfig::default();
        assert_eq!(config.window, WindowConfig { width: 1280, height: 720 });
        assert_eq!(config.shadow_map_size, 2048);
        assert!(!config.load.quad);
        assert!(config.load.mirror && config.load.walls);
        assert_eq!(config.camera.theta, -135.0);
        assert_eq!(config.sun.direction, Vec3::new(0.25, -0.25, 0.25));
        assert_eq!(config.sun.sweep, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = DemoConfig::from_yaml(
            "effect: box_blur\nload:\n  quad: true\nwindow:\n  width: 800\n",
        )
        .unwrap();
        assert_eq!(config.effect, EffectMode::BoxBlur);
        assert!(config.load.quad);
        assert!(config.load.bunny);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.ambient, Vec3::splat(0.25));
    }

    #[test]
    fn default_survives_yaml() {
        let config = DemoConfig::default();
        let text = config.to_yaml().unwrap();
        assert_eq!(DemoConfig::from_yaml(&text).unwrap(), config);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "show_grid: true").unwrap();
        writeln!(file, "sun:\n  direction: [0.0, -1.0, 0.0]").unwrap();
        let config = DemoConfig::load(file.path()).unwrap();
        assert!(config.show_grid);
        assert_eq!(config.sun.direction, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(config.sun.intensity, 1.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DemoConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let err = DemoConfig::from_yaml("window:\n  height: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroSize { field: "window.height" }));

        let err = DemoConfig::from_yaml("shadow_map_size: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroSize { field: "shadow_map_size" }));
        assert_eq!(err.to_string(), "shadow_map_size must be greater than zero");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window:\n  width: 0").unwrap();
        let err = DemoConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroSize { field: "window.width" }));
    }

    #[test]
    fn bindings_accept_only_camera_keys() {
        let yaml = "camera:\n  bindings:\n    up: Z\n    down: X\n";
        let config = DemoConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.camera.bindings.up, shoreline_input::Key::Z);
        assert_eq!(config.camera.bindings.forward, shoreline_input::Key::W);

        let err = DemoConfig::from_yaml("camera:\n  bindings:\n    forward: Escape\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        let err = DemoConfig::from_yaml("effect: [not, a, mode]").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
