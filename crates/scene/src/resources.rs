use billard_common::{MeshId, ShaderId};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Built-in shading programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderProgram {
    /// Ambient, diffuse and specular terms from one point light.
    #[default]
    Phong,
    /// Phong plus an environment reflection weighted by
    /// `material.refractionIndex`.
    Reflective,
}

/// A shader the scene can refer to by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderConfig {
    pub id: ShaderId,
    #[serde(default)]
    pub program: ShaderProgram,
    /// WGSL file replacing the built-in source. Must expose the same
    /// bindings and entry points as the program it replaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl ShaderConfig {
    pub fn builtin(id: impl Into<String>, program: ShaderProgram) -> Self {
        Self {
            id: ShaderId::new(id),
            program,
            source: None,
        }
    }
}

/// Procedural mesh shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshShape {
    /// Axis-aligned box. `inward` flips normals and winding so the box is
    /// seen from inside.
    Cuboid {
        half_extents: Vec3,
        #[serde(default)]
        center: Vec3,
        #[serde(default)]
        inward: bool,
    },
    /// UV sphere centred on the origin.
    Sphere {
        radius: f32,
        sectors: u32,
        stacks: u32,
    },
}

/// Upper bound on sphere sectors and stacks.
pub const MAX_SPHERE_SEGMENTS: u32 = 1024;

impl MeshShape {
    /// Why this shape cannot be built, if it cannot.
    pub fn problem(&self) -> Option<String> {
        match *self {
            MeshShape::Cuboid { half_extents, .. } => {
                if half_extents.min_element() <= 0.0 {
                    Some(format!("cuboid half extents must be positive, got {half_extents}"))
                } else {
                    None
                }
            }
            MeshShape::Sphere {
                radius,
                sectors,
                stacks,
            } => {
                if radius <= 0.0 {
                    Some(format!("sphere radius must be positive, got {radius}"))
                } else if sectors < 3 || stacks < 2 {
                    Some(format!(
                        "sphere needs at least 3 sectors and 2 stacks, got {sectors}x{stacks}"
                    ))
                } else if sectors > MAX_SPHERE_SEGMENTS || stacks > MAX_SPHERE_SEGMENTS {
                    Some(format!(
                        "sphere allows at most {MAX_SPHERE_SEGMENTS} sectors and stacks, got {sectors}x{stacks}"
                    ))
                } else {
                    None
                }
            }
        }
    }
}

/// A mesh the scene can refer to by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    pub id: MeshId,
    pub shape: MeshShape,
}

impl MeshConfig {
    pub fn new(id: impl Into<String>, shape: MeshShape) -> Self {
        Self {
            id: MeshId::new(id),
            shape,
        }
    }
}

pub fn default_shaders() -> Vec<ShaderConfig> {
    vec![
        ShaderConfig::builtin("table", ShaderProgram::Phong),
        ShaderConfig::builtin("room", ShaderProgram::Phong),
        ShaderConfig::builtin("ball", ShaderProgram::Reflective),
    ]
}

/// Model-space meshes for the billiard room. A table at scale 10 has its top
/// at y = 2.6; the ball at scale 0.3 rests just above it.
pub fn default_meshes() -> Vec<MeshConfig> {
    vec![
        MeshConfig::new(
            "pooltable",
            MeshShape::Cuboid {
                half_extents: Vec3::new(0.6, 0.13, 0.3),
                center: Vec3::new(0.0, 0.13, 0.0),
                inward: false,
            },
        ),
        MeshConfig::new(
            "room",
            MeshShape::Cuboid {
                half_extents: Vec3::new(1.6, 0.8, 1.6),
                center: Vec3::new(0.0, 0.8, 0.0),
                inward: true,
            },
        ),
        MeshConfig::new(
            "ball",
            MeshShape::Sphere {
                radius: 1.0,
                sectors: 32,
                stacks: 16,
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_meshes_are_valid() {
        for mesh in default_meshes() {
            assert_eq!(mesh.shape.problem(), None, "{}", mesh.id);
        }
    }

    #[test]
    fn degenerate_shapes_are_reported() {
        let flat = MeshShape::Cuboid {
            half_extents: Vec3::new(1.0, 0.0, 1.0),
            center: Vec3::ZERO,
            inward: false,
        };
        assert!(flat.problem().is_some());

        let coarse = MeshShape::Sphere {
            radius: 1.0,
            sectors: 2,
            stacks: 8,
        };
        assert!(coarse.problem().unwrap().contains("sectors"));
    }

    #[test]
    fn oversized_spheres_are_reported() {
        let fine = MeshShape::Sphere {
            radius: 1.0,
            sectors: u32::MAX,
            stacks: 16,
        };
        assert!(fine.problem().unwrap().contains("at most"));

        let limit = MeshShape::Sphere {
            radius: 1.0,
            sectors: MAX_SPHERE_SEGMENTS,
            stacks: MAX_SPHERE_SEGMENTS,
        };
        assert_eq!(limit.problem(), None);
    }

    #[test]
    fn oversized_sphere_fails_config_validation() {
        let yaml = "meshes:\n  - id: ball\n    shape:\n      kind: sphere\n      radius: 1.0\n      sectors: 4294967295\n      stacks: 16\n";
        let err = crate::ViewerConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, crate::ConfigError::InvalidMesh { .. }), "{err}");
    }

    #[test]
    fn shape_yaml_is_tagged_by_kind() {
        let yaml = "id: cushion\nshape:\n  kind: cuboid\n  half_extents: [1.0, 0.1, 0.1]\n";
        let mesh: MeshConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            mesh.shape,
            MeshShape::Cuboid {
                half_extents: Vec3::new(1.0, 0.1, 0.1),
                center: Vec3::ZERO,
                inward: false,
            }
        );
    }

    #[test]
    fn shader_program_defaults_to_phong() {
        let shader: ShaderConfig = serde_yaml::from_str("id: felt\n").unwrap();
        assert_eq!(shader.program, ShaderProgram::Phong);
        assert!(shader.source.is_none());
    }
}
