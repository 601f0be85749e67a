//! Mesh builders for the supported hero geometries.
//!
//! Builders follow the usual three.js conventions (planes face +Z, boxes are
//! six independently gridded faces, tori wrap around Z) so the default
//! parameters frame the same way as the published banner.

use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec3;
use std::f32::consts::TAU;

use crate::config::{
    BoxParams, GeometryKind, GeometryParams, IcosahedronParams, PlaneParams, TorusParams,
};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle mesh.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(MeshVertex {
            position: position.to_array(),
            normal: normal.to_array(),
        });
        index
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Line-list indices covering every triangle edge exactly once.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut seen: FnvHashSet<(u32, u32)> = FnvHashSet::default();
        let mut lines = Vec::with_capacity(self.indices.len() * 2);
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = if a < b { (a, b) } else { (b, a) };
                if seen.insert(key) {
                    lines.push(key.0);
                    lines.push(key.1);
                }
            }
        }
        lines
    }
}

pub fn build_geometry(params: &GeometryParams) -> MeshData {
    match params.kind {
        GeometryKind::Plane => plane(&params.plane),
        GeometryKind::Box => cube(&params.cube),
        GeometryKind::Icosahedron => icosahedron(&params.icosahedron),
        GeometryKind::Torus => torus(&params.torus),
    }
}

/// Quad-grid indices for a `(seg_u + 1) x (seg_v + 1)` block starting at `base`.
fn grid_indices(mesh: &mut MeshData, base: u32, seg_u: u32, seg_v: u32) {
    let row = seg_u + 1;
    for iy in 0..seg_v {
        for ix in 0..seg_u {
            let a = base + ix + row * iy;
            let b = base + ix + row * (iy + 1);
            let c = base + (ix + 1) + row * (iy + 1);
            let d = base + (ix + 1) + row * iy;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
}

pub fn plane(p: &PlaneParams) -> MeshData {
    let mut mesh = MeshData::default();
    let (gx, gy) = (p.width_segments.max(1), p.height_segments.max(1));
    for iy in 0..=gy {
        let y = iy as f32 * p.height / gy as f32 - p.height * 0.5;
        for ix in 0..=gx {
            let x = ix as f32 * p.width / gx as f32 - p.width * 0.5;
            mesh.push_vertex(Vec3::new(x, -y, 0.0), Vec3::Z);
        }
    }
    grid_indices(&mut mesh, 0, gx, gy);
    mesh
}

#[allow(clippy::too_many_arguments)]
fn box_face(
    mesh: &mut MeshData,
    normal: Vec3,
    u_axis: Vec3,
    v_axis: Vec3,
    size_u: f32,
    size_v: f32,
    half_depth: f32,
    seg_u: u32,
    seg_v: u32,
) {
    let base = mesh.vertices.len() as u32;
    for iy in 0..=seg_v {
        let v = 0.5 - iy as f32 / seg_v as f32;
        for ix in 0..=seg_u {
            let u = ix as f32 / seg_u as f32 - 0.5;
            let pos = normal * half_depth + u_axis * (u * size_u) + v_axis * (v * size_v);
            mesh.push_vertex(pos, normal);
        }
    }
    grid_indices(mesh, base, seg_u, seg_v);
}

pub fn cube(p: &BoxParams) -> MeshData {
    let mut mesh = MeshData::default();
    let (sw, sh, sd) = (
        p.width_segments.max(1),
        p.height_segments.max(1),
        p.depth_segments.max(1),
    );
    let (hw, hh, hd) = (p.width * 0.5, p.height * 0.5, p.depth * 0.5);
    // (normal, u, v) with u x v == normal so every face winds outward
    box_face(&mut mesh, Vec3::X, Vec3::NEG_Z, Vec3::Y, p.depth, p.height, hw, sd, sh);
    box_face(&mut mesh, Vec3::NEG_X, Vec3::Z, Vec3::Y, p.depth, p.height, hw, sd, sh);
    box_face(&mut mesh, Vec3::Y, Vec3::X, Vec3::NEG_Z, p.width, p.depth, hh, sw, sd);
    box_face(&mut mesh, Vec3::NEG_Y, Vec3::X, Vec3::Z, p.width, p.depth, hh, sw, sd);
    box_face(&mut mesh, Vec3::Z, Vec3::X, Vec3::Y, p.width, p.height, hd, sw, sh);
    box_face(&mut mesh, Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y, p.width, p.height, hd, sw, sh);
    mesh
}

const ICO_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn ico_corners() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

/// Subdivided icosahedron projected onto a sphere. Vertices shared between
/// faces are merged by their integer barycentric weights over the 12 corners,
/// so seams produce no doubled wireframe edges.
pub fn icosahedron(p: &IcosahedronParams) -> MeshData {
    let corners = ico_corners();
    let cols = p.detail + 1;
    let mut mesh = MeshData::default();
    let mut lookup: FnvHashMap<[u32; 12], u32> = FnvHashMap::default();

    for face in ICO_FACES {
        let mut vertex = |mesh: &mut MeshData, wa: u32, wb: u32, wc: u32| -> u32 {
            let mut key = [0u32; 12];
            key[face[0]] += wa;
            key[face[1]] += wb;
            key[face[2]] += wc;
            *lookup.entry(key).or_insert_with(|| {
                let v = key
                    .iter()
                    .zip(corners.iter())
                    .fold(Vec3::ZERO, |acc, (w, c)| acc + *c * *w as f32);
                let dir = v.normalize();
                mesh.push_vertex(dir * p.radius, dir)
            })
        };

        // rows[i][j]: i steps from edge ab toward c, j steps from a toward b
        let mut rows: Vec<Vec<u32>> = Vec::with_capacity(cols as usize + 1);
        for i in 0..=cols {
            let row = (0..=cols - i)
                .map(|j| vertex(&mut mesh, cols - i - j, j, i))
                .collect::<Vec<_>>();
            rows.push(row);
        }
        let cols = cols as usize;
        for i in 0..cols {
            for j in 0..(2 * (cols - i) - 1) {
                let k = j / 2;
                if j % 2 == 0 {
                    mesh.indices
                        .extend_from_slice(&[rows[i][k + 1], rows[i + 1][k], rows[i][k]]);
                } else {
                    mesh.indices
                        .extend_from_slice(&[rows[i][k + 1], rows[i + 1][k + 1], rows[i + 1][k]]);
                }
            }
        }
    }
    mesh
}

pub fn torus(p: &TorusParams) -> MeshData {
    let mut mesh = MeshData::default();
    let (radial, tubular) = (p.radial_segments.max(1), p.tubular_segments.max(1));
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = p.radius + p.tube * v.cos();
            let pos = Vec3::new(ring * u.cos(), ring * u.sin(), p.tube * v.sin());
            let center = Vec3::new(p.radius * u.cos(), p.radius * u.sin(), 0.0);
            mesh.push_vertex(pos, (pos - center).normalize_or_zero());
        }
    }
    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}
