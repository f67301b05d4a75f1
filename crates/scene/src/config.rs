use crate::descriptor::SceneDescriptor;
use crate::resources::{MeshConfig, ShaderConfig, default_meshes, default_shaders};
use billard_camera::CameraSettings;
use billard_common::{MeshId, ShaderId, UniformNames};
use billard_input::InputSettings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Errors from loading or validating a viewer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("window size must be nonzero, got {width}x{height}")]
    EmptyWindow { width: u32, height: u32 },
    #[error("camera {field} must be finite, got {value}")]
    NonFiniteCamera { field: &'static str, value: f32 },
    #[error("clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    ClipPlanes { near: f32, far: f32 },
    #[error("shader {0} declared twice")]
    DuplicateShader(ShaderId),
    #[error("mesh {0} declared twice")]
    DuplicateMesh(MeshId),
    #[error("mesh {id}: {reason}")]
    InvalidMesh { id: MeshId, reason: String },
    #[error("target {target:?} uses undeclared shader {shader}")]
    UnknownShader { target: String, shader: ShaderId },
    #[error("target {target:?} uses undeclared mesh {mesh}")]
    UnknownMesh { target: String, mesh: MeshId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            title: "BillardGL".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub uniform_names: UniformNames,
    /// Present with FIFO when true, otherwise without waiting for vblank.
    pub vsync: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            uniform_names: UniformNames::default(),
            vsync: true,
        }
    }
}

/// Complete viewer configuration. Every section is optional in YAML and
/// falls back to the billiard room defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraSettings,
    pub input: InputSettings,
    pub render: RenderSettings,
    pub shaders: Vec<ShaderConfig>,
    pub meshes: Vec<MeshConfig>,
    pub scene: SceneDescriptor,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraSettings::default(),
            input: InputSettings::default(),
            render: RenderSettings::default(),
            shaders: default_shaders(),
            meshes: default_meshes(),
            scene: SceneDescriptor::billiard_room(),
        }
    }
}

impl ViewerConfig {
    /// Read, parse and validate a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            targets = config.scene.targets.len(),
            "loaded viewer config"
        );
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.window.width as f32 / self.window.height.max(1) as f32
    }

    pub fn shader(&self, id: &ShaderId) -> Option<&ShaderConfig> {
        self.shaders.iter().find(|s| &s.id == id)
    }

    pub fn mesh(&self, id: &MeshId) -> Option<&MeshConfig> {
        self.meshes.iter().find(|m| &m.id == id)
    }

    /// Check that the configuration describes a drawable scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let WindowConfig { width, height, .. } = self.window;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyWindow { width, height });
        }

        let camera = &self.camera;
        let scalars = [
            ("position.x", camera.position.x),
            ("position.y", camera.position.y),
            ("position.z", camera.position.z),
            ("yaw", camera.yaw),
            ("pitch", camera.pitch),
            ("zoom", camera.zoom),
            ("mouse_sensitivity", camera.mouse_sensitivity),
            ("near", camera.near),
            ("far", camera.far),
        ];
        if let Some(&(field, value)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFiniteCamera { field, value });
        }

        let CameraSettings { near, far, .. } = self.camera;
        if !(near > 0.0 && near < far) {
            return Err(ConfigError::ClipPlanes { near, far });
        }

        let mut shaders = BTreeSet::new();
        for shader in &self.shaders {
            if !shaders.insert(&shader.id) {
                return Err(ConfigError::DuplicateShader(shader.id.clone()));
            }
        }

        let mut meshes = BTreeSet::new();
        for mesh in &self.meshes {
            if !meshes.insert(&mesh.id) {
                return Err(ConfigError::DuplicateMesh(mesh.id.clone()));
            }
            if let Some(reason) = mesh.shape.problem() {
                return Err(ConfigError::InvalidMesh {
                    id: mesh.id.clone(),
                    reason,
                });
            }
        }

        for target in &self.scene.targets {
            if !shaders.contains(&target.shader) {
                return Err(ConfigError::UnknownShader {
                    target: target.name.clone(),
                    shader: target.shader.clone(),
                });
            }
            if !meshes.contains(&target.mesh) {
                return Err(ConfigError::UnknownMesh {
                    target: target.name.clone(),
                    mesh: target.mesh.clone(),
                });
            }
        }

        if self.scene.targets.is_empty() {
            tracing::warn!("scene has no render targets; frames will only clear");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::RenderTarget;
    use billard_common::Transform;
    use std::io::Write;

    const SHIPPED: &str = include_str!("../../../configs/billiard-room.yaml");

    #[test]
    fn default_config_is_valid() {
        let config = ViewerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.window.title, "BillardGL");
        assert_eq!(config.aspect_ratio(), 1.0);
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = ViewerConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let config = ViewerConfig::from_yaml_str(SHIPPED).unwrap();
        assert_eq!(config.scene, SceneDescriptor::billiard_room());
        assert_eq!(config.shaders, default_shaders());
        assert_eq!(config.meshes, default_meshes());
        assert_eq!(config.camera, CameraSettings::default());
    }

    #[test]
    fn yaml_round_trip_preserves_config() {
        let config = ViewerConfig::default();
        let text = config.to_yaml().unwrap();
        assert_eq!(ViewerConfig::from_yaml_str(&text).unwrap(), config);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = ViewerConfig::from_yaml_str(
            "window:\n  width: 1280\n  height: 720\nrender:\n  uniform_names: short\n",
        )
        .unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.title, "BillardGL");
        assert_eq!(config.render.uniform_names, UniformNames::Short);
        assert!(config.render.vsync);
    }

    #[test]
    fn undeclared_shader_is_rejected() {
        let mut config = ViewerConfig::default();
        config.scene.targets.push(RenderTarget::new(
            "cue",
            "chalk",
            "ball",
            Transform::default(),
        ));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownShader { .. }), "{err}");
    }

    #[test]
    fn undeclared_mesh_is_rejected() {
        let mut config = ViewerConfig::default();
        config.scene.targets[0].mesh = MeshId::new("missing");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownMesh { .. })
        ));
    }

    #[test]
    fn bad_clip_planes_are_rejected() {
        let err = ViewerConfig::from_yaml_str("camera:\n  near: 10.0\n  far: 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ClipPlanes { .. }));
    }

    #[test]
    fn non_finite_camera_values_are_rejected() {
        let err = ViewerConfig::from_yaml_str("camera:\n  zoom: .nan\n  pitch: .nan\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::NonFiniteCamera { field: "pitch", .. }),
            "{err}"
        );

        let err = ViewerConfig::from_yaml_str("camera:\n  position: [0.0, .inf, 20.0]\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonFiniteCamera {
                field: "position.y",
                ..
            }
        ));

        let mut config = ViewerConfig::default();
        config.camera.far = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteCamera { field: "far", .. })
        ));
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = ViewerConfig::from_yaml_str("window:\n  width: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyWindow { .. }));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut config = ViewerConfig::default();
        config.shaders.push(config.shaders[0].clone());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateShader(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SHIPPED.as_bytes()).unwrap();
        let config = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(config.scene.targets.len(), 3);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ViewerConfig::load("/nonexistent/billiard.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
