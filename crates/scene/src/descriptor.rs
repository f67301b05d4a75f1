use crate::lighting::{LightingParams, Material, PointLight};
use billard_common::{MeshId, ShaderId, Transform};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One drawable: a mesh drawn with a shader at a model transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderTarget {
    pub name: String,
    pub shader: ShaderId,
    pub mesh: MeshId,
    #[serde(default)]
    pub transform: Transform,
    /// Per-target values written over the scene's shared parameters.
    #[serde(default, skip_serializing_if = "LightingParams::is_empty")]
    pub lighting: LightingParams,
}

impl RenderTarget {
    pub fn new(
        name: impl Into<String>,
        shader: impl Into<String>,
        mesh: impl Into<String>,
        transform: Transform,
    ) -> Self {
        Self {
            name: name.into(),
            shader: ShaderId::new(shader),
            mesh: MeshId::new(mesh),
            transform,
            lighting: LightingParams::new(),
        }
    }

    pub fn with_lighting(mut self, lighting: LightingParams) -> Self {
        self.lighting = lighting;
        self
    }
}

/// The fixed set of render targets drawn every frame, in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescriptor {
    pub clear_color: [f32; 4],
    /// Parameters applied to every target before its own overrides.
    pub shared: LightingParams,
    pub targets: Vec<RenderTarget>,
}

impl Default for SceneDescriptor {
    fn default() -> Self {
        Self::billiard_room()
    }
}

impl SceneDescriptor {
    /// Pool table, room and one ball under a single point light.
    pub fn billiard_room() -> Self {
        let shared = PointLight::default()
            .params()
            .merged(&Material::default().params());

        let ball_material = LightingParams::new().with("material.refractionIndex", 0.2_f32);

        Self {
            clear_color: [0.76, 0.88, 1.0, 1.0],
            shared,
            targets: vec![
                RenderTarget::new(
                    "pooltable",
                    "table",
                    "pooltable",
                    Transform::uniform(Vec3::ZERO, 10.0),
                ),
                RenderTarget::new("room", "room", "room", Transform::uniform(Vec3::ZERO, 15.0)),
                RenderTarget::new(
                    "ball",
                    "ball",
                    "ball",
                    Transform::uniform(Vec3::new(4.0, 2.9, 1.5), 0.3),
                )
                .with_lighting(ball_material),
            ],
        }
    }

    /// Shared parameters merged with the target's own.
    pub fn params_for(&self, target: &RenderTarget) -> LightingParams {
        self.shared.merged(&target.lighting)
    }

    pub fn target(&self, name: &str) -> Option<&RenderTarget> {
        self.targets.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billard_common::UniformValue;

    #[test]
    fn billiard_room_draw_order() {
        let scene = SceneDescriptor::billiard_room();
        let names: Vec<_> = scene.targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["pooltable", "room", "ball"]);
        assert_eq!(scene.clear_color, [0.76, 0.88, 1.0, 1.0]);
    }

    #[test]
    fn billiard_room_transforms() {
        let scene = SceneDescriptor::billiard_room();
        let ball = scene.target("ball").unwrap();
        assert_eq!(ball.transform.translation, Vec3::new(4.0, 2.9, 1.5));
        assert_eq!(ball.transform.scale, Vec3::splat(0.3));
        assert_eq!(scene.target("room").unwrap().transform.scale, Vec3::splat(15.0));
        assert_eq!(
            scene.target("pooltable").unwrap().transform.scale,
            Vec3::splat(10.0)
        );
    }

    #[test]
    fn only_the_ball_is_reflective() {
        let scene = SceneDescriptor::billiard_room();
        for target in &scene.targets {
            let params = scene.params_for(target);
            let refraction = params.get("material.refractionIndex");
            if target.name == "ball" {
                assert_eq!(refraction, Some(UniformValue::Scalar(0.2)));
            } else {
                assert_eq!(refraction, None);
            }
            assert!(params.get("light.position").is_some());
            assert!(params.get("material.shininess").is_some());
        }
    }

    #[test]
    fn yaml_target_defaults() {
        let yaml = "name: cue\nshader: table\nmesh: cue\n";
        let target: RenderTarget = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(target.transform, Transform::default());
        assert!(target.lighting.is_empty());
    }
}
