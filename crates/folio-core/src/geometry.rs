//! Unit meshes for the three primitive families.
//!
//! Every mesh is centred on the origin and sized so that the per-instance
//! scale from [`crate::scene::Primitive::unit_scale`] yields the real shape:
//! the cuboid spans [-0.5, 0.5] on each axis, the cylinder has radius 1 and
//! height 1, the sphere has radius 1.

use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    fn push(&mut self, position: [f32; 3], normal: [f32; 3]) -> u16 {
        self.vertices.push(Vertex { position, normal });
        (self.vertices.len() - 1) as u16
    }
}

pub fn unit_cuboid() -> MeshData {
    let mut mesh = MeshData::default();
    // (normal, u axis, v axis) per face; u x v == normal for CCW winding.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    for (n, u, v) in faces {
        let corner = |su: f32, sv: f32| {
            [
                0.5 * (n[0] + su * u[0] + sv * v[0]),
                0.5 * (n[1] + su * u[1] + sv * v[1]),
                0.5 * (n[2] + su * u[2] + sv * v[2]),
            ]
        };
        let a = mesh.push(corner(-1.0, -1.0), n);
        let b = mesh.push(corner(1.0, -1.0), n);
        let c = mesh.push(corner(1.0, 1.0), n);
        let d = mesh.push(corner(-1.0, 1.0), n);
        mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }
    mesh
}

pub fn unit_cylinder(segments: u32) -> MeshData {
    let segments = segments.clamp(3, 256);
    let mut mesh = MeshData::default();
    let ring = |i: u32| {
        let a = TAU * i as f32 / segments as f32;
        (a.cos(), a.sin())
    };
    // Side
    for i in 0..segments {
        let (x0, z0) = ring(i);
        let (x1, z1) = ring(i + 1);
        let a = mesh.push([x0, -0.5, z0], [x0, 0.0, z0]);
        let b = mesh.push([x1, -0.5, z1], [x1, 0.0, z1]);
        let c = mesh.push([x1, 0.5, z1], [x1, 0.0, z1]);
        let d = mesh.push([x0, 0.5, z0], [x0, 0.0, z0]);
        mesh.indices.extend_from_slice(&[a, c, b, a, d, c]);
    }
    // Caps
    for (y, ny) in [(0.5_f32, 1.0_f32), (-0.5, -1.0)] {
        let center = mesh.push([0.0, y, 0.0], [0.0, ny, 0.0]);
        for i in 0..segments {
            let (x0, z0) = ring(i);
            let (x1, z1) = ring(i + 1);
            let a = mesh.push([x0, y, z0], [0.0, ny, 0.0]);
            let b = mesh.push([x1, y, z1], [0.0, ny, 0.0]);
            if ny > 0.0 {
                mesh.indices.extend_from_slice(&[center, b, a]);
            } else {
                mesh.indices.extend_from_slice(&[center, a, b]);
            }
        }
    }
    mesh
}

pub fn unit_sphere(rings: u32, sectors: u32) -> MeshData {
    let rings = rings.clamp(2, 128);
    let sectors = sectors.clamp(3, 128);
    let mut mesh = MeshData::default();
    for r in 0..=rings {
        let phi = PI * r as f32 / rings as f32;
        for s in 0..=sectors {
            let theta = TAU * s as f32 / sectors as f32;
            let p = [phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin()];
            mesh.push(p, p);
        }
    }
    let stride = (sectors + 1) as u16;
    for r in 0..rings as u16 {
        for s in 0..sectors as u16 {
            let a = r * stride + s;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit_normals(mesh: &MeshData) {
        for v in &mesh.vertices {
            let [x, y, z] = v.normal;
            let len = (x * x + y * y + z * z).sqrt();
            assert!((len - 1.0).abs() < 1e-4, "normal {:?}", v.normal);
        }
    }

    fn assert_indices_in_range(mesh: &MeshData) {
        assert_eq!(mesh.indices.len() % 3, 0);
        let n = mesh.vertices.len() as u16;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn cuboid_has_flat_faces() {
        let m = unit_cuboid();
        assert_eq!(m.vertices.len(), 24);
        assert_eq!(m.indices.len(), 36);
        assert_unit_normals(&m);
        assert_indices_in_range(&m);
        for v in &m.vertices {
            assert!(v.position.iter().all(|c| (c.abs() - 0.5).abs() < 1e-6));
        }
    }

    #[test]
    fn cylinder_counts_follow_segments() {
        let m = unit_cylinder(16);
        assert_eq!(m.vertices.len(), 16 * 4 + 2 * (1 + 16 * 2));
        assert_eq!(m.indices.len(), 16 * 6 + 2 * 16 * 3);
        assert_unit_normals(&m);
        assert_indices_in_range(&m);
    }

    #[test]
    fn sphere_vertices_lie_on_unit_radius() {
        let m = unit_sphere(12, 16);
        assert_indices_in_range(&m);
        for v in &m.vertices {
            let [x, y, z] = v.position;
            assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-4);
        }
    }
}
