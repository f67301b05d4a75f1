//! Procedural geometry for configured meshes.
//!
//! Triangles are counter-clockwise when seen from the side their normal
//! points to, so back-face culling keeps the visible side.

use billard_scene::MeshShape;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }

    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
        }
    }
}

/// Indexed triangle list ready for upload.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn from_shape(shape: &MeshShape) -> Self {
        match *shape {
            MeshShape::Cuboid {
                half_extents,
                center,
                inward,
            } => cuboid(half_extents, center, inward),
            MeshShape::Sphere {
                radius,
                sectors,
                stacks,
            } => sphere(radius, sectors, stacks),
        }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    #[cfg(test)]
    fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.vertices[t[0] as usize],
                self.vertices[t[1] as usize],
                self.vertices[t[2] as usize],
            ]
        })
    }
}

/// Box with four vertices per face so each face has a flat normal.
pub fn cuboid(half_extents: Vec3, center: Vec3, inward: bool) -> MeshData {
    // (normal, u, v) with u x v == normal
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let mut mesh = MeshData::default();
    for (normal, u, v) in faces {
        // seen from inside: flip the normal and swap the tangents to reverse winding
        let (normal_out, u, v) = if inward { (-normal, v, u) } else { (normal, u, v) };
        let face_center = center + normal * half_extents;
        let du = u * half_extents;
        let dv = v * half_extents;

        let base = mesh.vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.vertices
                .push(Vertex::new(face_center + du * su + dv * sv, normal_out));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    mesh
}

/// UV sphere around the origin, y up.
pub fn sphere(radius: f32, sectors: u32, stacks: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let sector_step = TAU / sectors as f32;
    let stack_step = PI / stacks as f32;

    for i in 0..=stacks {
        let phi = FRAC_PI_2 - i as f32 * stack_step;
        let (ring_y, ring_r) = (phi.sin(), phi.cos());
        for j in 0..=sectors {
            let theta = j as f32 * sector_step;
            let normal = Vec3::new(ring_r * theta.cos(), ring_y, -ring_r * theta.sin());
            mesh.vertices.push(Vertex::new(normal * radius, normal));
        }
    }

    for i in 0..stacks {
        let mut k1 = i * (sectors + 1);
        let mut k2 = k1 + sectors + 1;
        for _ in 0..sectors {
            if i != 0 {
                mesh.indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            if i != stacks - 1 {
                mesh.indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
            k1 += 1;
            k2 += 1;
        }
    }
    mesh
}
