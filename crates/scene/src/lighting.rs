use billard_common::UniformValue;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named uniform values applied to a shader before a draw.
///
/// Keys follow the dotted shader convention (`light.diffuse`,
/// `material.shininess`). Iteration is sorted by name, so the order in which
/// values reach the shader is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightingParams(BTreeMap<String, UniformValue>);

impl LightingParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<UniformValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<UniformValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, UniformValue)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Copy of `self` with every entry of `overrides` written on top.
    pub fn merged(&self, overrides: &LightingParams) -> LightingParams {
        let mut out = self.clone();
        for (name, value) in overrides.iter() {
            out.set(name, value);
        }
        out
    }
}

/// A Phong point light. Colour terms are derived from one base colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    /// Fraction of `color` used for the diffuse term.
    pub diffuse_factor: f32,
    /// Fraction of the diffuse term used for the ambient term.
    pub ambient_factor: f32,
    /// Multiplier applied to ambient and diffuse.
    pub intensity: f32,
    pub specular: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 15.0, 0.0),
            color: Vec3::ONE,
            diffuse_factor: 0.5,
            ambient_factor: 0.2,
            intensity: 7.0,
            specular: Vec3::ONE,
        }
    }
}

impl PointLight {
    pub fn diffuse(&self) -> Vec3 {
        self.color * self.diffuse_factor
    }

    pub fn ambient(&self) -> Vec3 {
        self.diffuse() * self.ambient_factor
    }

    pub fn params(&self) -> LightingParams {
        LightingParams::new()
            .with("light.position", self.position)
            .with("light.ambient", self.ambient() * self.intensity)
            .with("light.diffuse", self.diffuse() * self.intensity)
            .with("light.specular", self.specular)
            .with("lightColor", self.color)
    }
}

/// Phong surface material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    /// Only set for reflective surfaces.
    pub refraction_index: Option<f32>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::new(1.0, 0.5, 0.31),
            diffuse: Vec3::new(1.0, 0.5, 0.31),
            specular: Vec3::splat(0.5),
            shininess: 32.0,
            refraction_index: None,
        }
    }
}

impl Material {
    pub fn params(&self) -> LightingParams {
        let params = LightingParams::new()
            .with("material.ambient", self.ambient)
            .with("material.diffuse", self.diffuse)
            .with("material.specular", self.specular)
            .with("material.shininess", self.shininess);
        match self.refraction_index {
            Some(index) => params.with("material.refractionIndex", index),
            None => params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec3(params: &LightingParams, name: &str) -> Vec3 {
        match params.get(name) {
            Some(UniformValue::Vec3(v)) => v,
            other => panic!("{name}: expected vec3, got {other:?}"),
        }
    }

    #[test]
    fn default_light_terms() {
        let params = PointLight::default().params();
        assert_eq!(params.len(), 5);
        assert!((vec3(&params, "light.diffuse") - Vec3::splat(3.5)).length() < 1e-5);
        assert!((vec3(&params, "light.ambient") - Vec3::splat(0.7)).length() < 1e-5);
        assert_eq!(vec3(&params, "light.specular"), Vec3::ONE);
        assert_eq!(vec3(&params, "light.position"), Vec3::new(0.0, 15.0, 0.0));
        assert_eq!(vec3(&params, "lightColor"), Vec3::ONE);
    }

    #[test]
    fn refraction_index_is_optional() {
        let plain = Material::default().params();
        assert_eq!(plain.len(), 4);
        assert_eq!(plain.get("material.refractionIndex"), None);

        let reflective = Material {
            refraction_index: Some(0.2),
            ..Material::default()
        }
        .params();
        assert_eq!(
            reflective.get("material.refractionIndex"),
            Some(UniformValue::Scalar(0.2))
        );
        assert_eq!(
            reflective.get("material.shininess"),
            Some(UniformValue::Scalar(32.0))
        );
    }

    #[test]
    fn merged_overrides_win() {
        let base = LightingParams::new()
            .with("material.shininess", 32.0_f32)
            .with("lightColor", Vec3::ONE);
        let overrides = LightingParams::new().with("material.shininess", 64.0_f32);
        let merged = base.merged(&overrides);
        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged.get("material.shininess"),
            Some(UniformValue::Scalar(64.0))
        );
    }

    #[test]
    fn iteration_is_sorted_by_name() {
        let params = LightingParams::new()
            .with("viewPos", Vec3::ZERO)
            .with("light.ambient", Vec3::ZERO)
            .with("material.diffuse", Vec3::ZERO);
        let names: Vec<_> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["light.ambient", "material.diffuse", "viewPos"]);
    }
}
