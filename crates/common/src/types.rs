use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a shader program declared in the viewer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShaderId(pub String);

impl ShaderId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies a mesh declared in the viewer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshId(pub String);

impl MeshId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Model transform of a render target: translate, then scale.
///
/// Rotation is not part of any scene the viewer draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub translation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new(translation: Vec3, scale: Vec3) -> Self {
        Self { translation, scale }
    }

    /// Uniformly scaled transform at `translation`.
    pub fn uniform(translation: Vec3, scale: f32) -> Self {
        Self::new(translation, Vec3::splat(scale))
    }

    /// Identity, translated, then scaled: `T * S`.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation) * Mat4::from_scale(self.scale)
    }
}

/// A value pushed into a named shader uniform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniformValue {
    Scalar(f32),
    Vec3(Vec3),
    Mat4(Mat4),
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        Self::Mat4(v)
    }
}

impl fmt::Display for UniformValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v:.3}"),
            Self::Vec3(v) => write!(f, "({:.3}, {:.3}, {:.3})", v.x, v.y, v.z),
            Self::Mat4(m) => {
                let t = m.w_axis;
                write!(f, "mat4[t=({:.3}, {:.3}, {:.3})]", t.x, t.y, t.z)
            }
        }
    }
}

/// Naming scheme for the per-frame matrix and eye uniforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniformNames {
    /// `model`, `view`, `projection`, `viewPos`.
    #[default]
    Full,
    /// `M`, `V`, `P`, `viewPos`.
    Short,
}

impl UniformNames {
    pub fn model(self) -> &'static str {
        match self {
            Self::Full => "model",
            Self::Short => "M",
        }
    }

    pub fn view(self) -> &'static str {
        match self {
            Self::Full => "view",
            Self::Short => "V",
        }
    }

    pub fn projection(self) -> &'static str {
        match self {
            Self::Full => "projection",
            Self::Short => "P",
        }
    }

    pub fn view_pos(self) -> &'static str {
        "viewPos"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn transform_scales_before_translating() {
        let t = Transform::uniform(Vec3::new(4.0, 2.9, 1.5), 0.3);
        let p = t.to_matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((p - Vec3::new(4.3, 2.9, 1.5)).length() < 1e-5);
    }

    #[test]
    fn uniform_value_conversions() {
        assert_eq!(UniformValue::from(32.0_f32), UniformValue::Scalar(32.0));
        assert_eq!(UniformValue::from(Vec3::X), UniformValue::Vec3(Vec3::X));
        assert_eq!(
            UniformValue::from(Mat4::IDENTITY),
            UniformValue::Mat4(Mat4::IDENTITY)
        );
    }

    #[test]
    fn short_names_only_rename_matrices() {
        assert_eq!(UniformNames::Short.model(), "M");
        assert_eq!(UniformNames::Short.view(), "V");
        assert_eq!(UniformNames::Short.projection(), "P");
        assert_eq!(UniformNames::Short.view_pos(), UniformNames::Full.view_pos());
    }

    #[test]
    fn ids_display_their_name() {
        assert_eq!(ShaderId::new("table").to_string(), "table");
        assert_eq!(MeshId::new("sphere").as_str(), "sphere");
    }
}
