use billard_common::UniformValue;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Per-draw uniform block shared by the built-in programs.
///
/// Layout follows WGSL uniform rules: every `vec3` starts on a 16-byte
/// boundary, so scalars fill the gap after a `vec3` where one fits.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PhongUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub shininess: f32,
    pub light_position: [f32; 3],
    pub refraction_index: f32,
    pub light_ambient: [f32; 3],
    pub _pad0: f32,
    pub light_diffuse: [f32; 3],
    pub _pad1: f32,
    pub light_specular: [f32; 3],
    pub _pad2: f32,
    pub light_color: [f32; 3],
    pub _pad3: f32,
    pub material_ambient: [f32; 3],
    pub _pad4: f32,
    pub material_diffuse: [f32; 3],
    pub _pad5: f32,
    pub material_specular: [f32; 3],
    pub _pad6: f32,
}

pub const UNIFORM_SIZE: u64 = std::mem::size_of::<PhongUniforms>() as u64;

impl Default for PhongUniforms {
    fn default() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            model: identity,
            view: identity,
            projection: identity,
            light_color: [1.0; 3],
            shininess: 32.0,
            ..Self::zeroed()
        }
    }
}

impl PhongUniforms {
    /// Write a named value into the block.
    ///
    /// Returns false when the name is unknown or the value has the wrong
    /// shape for it; the block is left unchanged in that case.
    pub fn apply(&mut self, name: &str, value: UniformValue) -> bool {
        match value {
            UniformValue::Mat4(m) => {
                let slot = match name {
                    "model" | "M" => &mut self.model,
                    "view" | "V" => &mut self.view,
                    "projection" | "P" => &mut self.projection,
                    _ => return false,
                };
                *slot = m.to_cols_array_2d();
            }
            UniformValue::Vec3(v) => {
                let slot = match name {
                    "viewPos" => &mut self.view_pos,
                    "lightColor" => &mut self.light_color,
                    "light.position" => &mut self.light_position,
                    "light.ambient" => &mut self.light_ambient,
                    "light.diffuse" => &mut self.light_diffuse,
                    "light.specular" => &mut self.light_specular,
                    "material.ambient" => &mut self.material_ambient,
                    "material.diffuse" => &mut self.material_diffuse,
                    "material.specular" => &mut self.material_specular,
                    _ => return false,
                };
                *slot = v.into();
            }
            UniformValue::Scalar(s) => {
                let slot = match name {
                    "material.shininess" => &mut self.shininess,
                    "material.refractionIndex" => &mut self.refraction_index,
                    _ => return false,
                };
                *slot = s;
            }
        }
        true
    }

    #[cfg(test)]
    fn model(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    #[cfg(test)]
    fn view_pos(&self) -> glam::Vec3 {
        glam::Vec3::from(self.view_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn block_size_matches_wgsl_layout() {
        assert_eq!(UNIFORM_SIZE, 336);
        assert_eq!(std::mem::offset_of!(PhongUniforms, view_pos), 192);
        assert_eq!(std::mem::offset_of!(PhongUniforms, light_ambient), 224);
        assert_eq!(std::mem::offset_of!(PhongUniforms, material_specular), 320);
    }

    #[test]
    fn full_and_short_matrix_names() {
        let mut u = PhongUniforms::default();
        let m = Mat4::from_translation(Vec3::new(4.0, 2.9, 1.5));
        assert!(u.apply("M", UniformValue::Mat4(m)));
        assert_eq!(u.model(), m);
        assert!(u.apply("projection", UniformValue::Mat4(Mat4::ZERO)));
        assert_eq!(u.projection, Mat4::ZERO.to_cols_array_2d());
    }

    #[test]
    fn dotted_names_fill_fields() {
        let mut u = PhongUniforms::default();
        assert!(u.apply("light.diffuse", UniformValue::Vec3(Vec3::splat(3.5))));
        assert!(u.apply("material.refractionIndex", UniformValue::Scalar(0.2)));
        assert!(u.apply("viewPos", UniformValue::Vec3(Vec3::new(0.0, 10.0, 20.0))));
        assert_eq!(u.light_diffuse, [3.5; 3]);
        assert_eq!(u.refraction_index, 0.2);
        assert_eq!(u.view_pos(), Vec3::new(0.0, 10.0, 20.0));
    }

    #[test]
    fn unknown_or_mistyped_values_are_rejected() {
        let mut u = PhongUniforms::default();
        let before = u;
        assert!(!u.apply("light.cutoff", UniformValue::Scalar(1.0)));
        assert!(!u.apply("material.shininess", UniformValue::Vec3(Vec3::ONE)));
        assert!(!u.apply("model", UniformValue::Scalar(1.0)));
        assert_eq!(u, before);
    }
}
