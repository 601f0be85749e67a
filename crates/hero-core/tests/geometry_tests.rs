// Host-side tests for the mesh builders and wireframe extraction.

use fnv::FnvHashSet;
use glam::Vec3;
use hero_core::*;

fn assert_indices_in_range(mesh: &MeshData) {
    let n = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|&i| i < n));
    assert_eq!(mesh.indices.len() % 3, 0);
}

#[test]
fn plane_has_grid_vertex_and_triangle_counts() {
    let config = HeroConfig::default();
    let mesh = plane(&config.geometry.plane);
    assert_eq!(mesh.vertices.len(), 51 * 51);
    assert_eq!(mesh.triangle_count(), 50 * 50 * 2);
    assert_indices_in_range(&mesh);
}

#[test]
fn plane_is_centered_and_faces_positive_z() {
    let mesh = plane(&PlaneParams {
        width: 1.5,
        height: 1.5,
        width_segments: 4,
        height_segments: 4,
    });
    let first = Vec3::from(mesh.vertices[0].position);
    let last = Vec3::from(mesh.vertices.last().unwrap().position);
    assert_eq!(first, Vec3::new(-0.75, 0.75, 0.0));
    assert_eq!(last, Vec3::new(0.75, -0.75, 0.0));
    assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
}

#[test]
fn plane_wireframe_counts_each_edge_once() {
    let mesh = plane(&PlaneParams {
        width: 1.0,
        height: 1.0,
        width_segments: 3,
        height_segments: 2,
    });
    let lines = mesh.wireframe_indices();
    // horizontal + vertical + diagonal edges of a 3x2 quad grid
    let expected = 3 * 3 + 4 * 2 + 3 * 2;
    assert_eq!(lines.len(), expected * 2);

    let mut seen = FnvHashSet::default();
    for pair in lines.chunks_exact(2) {
        assert!(pair[0] < pair[1]);
        assert!(seen.insert((pair[0], pair[1])), "duplicate edge {pair:?}");
    }
}

#[test]
fn box_vertices_lie_on_its_surface() {
    let params = BoxParams {
        width: 2.0,
        height: 1.0,
        depth: 3.0,
        width_segments: 2,
        height_segments: 3,
        depth_segments: 4,
    };
    let mesh = cube(&params);
    assert_indices_in_range(&mesh);
    for v in &mesh.vertices {
        let p = Vec3::from(v.position);
        assert!(p.x.abs() <= 1.0 + 1e-6 && p.y.abs() <= 0.5 + 1e-6 && p.z.abs() <= 1.5 + 1e-6);
        let n = Vec3::from(v.normal);
        // the coordinate along the normal sits on the face plane
        let extent = Vec3::new(1.0, 0.5, 1.5);
        assert!((p.dot(n) - extent.dot(n.abs())).abs() < 1e-5);
    }
    // +-X: depth x height, +-Y: width x depth, +-Z: width x height
    let expected = 2 * (5 * 4) + 2 * (3 * 5) + 2 * (3 * 4);
    assert_eq!(mesh.vertices.len(), expected);
    assert_eq!(mesh.triangle_count(), 2 * 2 * (4 * 3 + 2 * 4 + 2 * 3));
}

#[test]
fn icosahedron_vertex_count_matches_subdivision() {
    for detail in 0..5 {
        let mesh = icosahedron(&IcosahedronParams {
            radius: 1.5,
            detail,
        });
        let n = detail as usize + 1;
        assert_eq!(mesh.vertices.len(), 10 * n * n + 2, "detail {detail}");
        assert_eq!(mesh.triangle_count(), 20 * n * n);
        assert_indices_in_range(&mesh);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.position).length() - 1.5).abs() < 1e-4);
        }
        // closed triangulated sphere: E = 3F / 2
        assert_eq!(mesh.wireframe_indices().len() / 2, 30 * n * n);
    }
}

#[test]
fn torus_points_sit_on_tube() {
    let params = TorusParams {
        radius: 1.2,
        tube: 0.5,
        radial_segments: 8,
        tubular_segments: 12,
    };
    let mesh = torus(&params);
    assert_eq!(mesh.vertices.len(), 9 * 13);
    assert_eq!(mesh.triangle_count(), 8 * 12 * 2);
    assert_indices_in_range(&mesh);
    for v in &mesh.vertices {
        let p = Vec3::from(v.position);
        let ring = glam::Vec2::new(p.x, p.y).length() - 1.2;
        let d = (ring * ring + p.z * p.z).sqrt();
        assert!((d - 0.5).abs() < 1e-4);
        assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn build_geometry_dispatches_on_kind() {
    let mut config = HeroConfig::default();
    assert_eq!(build_geometry(&config.geometry).vertices.len(), 51 * 51);
    config.geometry.kind = GeometryKind::Icosahedron;
    assert_eq!(build_geometry(&config.geometry).vertices.len(), 10 * 25 + 2);
    config.geometry.kind = GeometryKind::Torus;
    assert_eq!(build_geometry(&config.geometry).vertices.len(), 31 * 61);
}
