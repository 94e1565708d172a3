// Solid piece meshes: contour extruded along +z, no bevel.
//
// Layout of the vertex buffer: ring at z = 0 (back) followed by the same
// ring at z = depth (front). Triangles are counter-clockwise seen from
// outside the solid.

use std::collections::HashMap;

use geo::Area;
use glam::Vec3;

use crate::contour::Contour;
use crate::error::ExtrudeError;
use crate::models::Point;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PieceMesh {
    pub positions: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl PieceMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, pos: Vec3) -> u32 {
        let idx = self.positions.len() as u32;
        self.positions.push(pos);
        idx
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        debug_assert!(a != b && b != c && a != c, "degenerate triangle");
        self.triangles.push([a, b, c]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Positions as `[x, y, z, x, y, z, ...]` for a vertex buffer upload.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.to_array()).collect()
    }

    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// True when every edge is shared by exactly two triangles that traverse
    /// it in opposite directions.
    pub fn is_closed_manifold(&self) -> bool {
        let mut directed: HashMap<(u32, u32), u32> = HashMap::new();
        for t in &self.triangles {
            for k in 0..3 {
                *directed.entry((t[k], t[(k + 1) % 3])).or_insert(0) += 1;
            }
        }
        directed
            .iter()
            .all(|(&(a, b), &n)| n == 1 && directed.get(&(b, a)) == Some(&1))
    }
}

fn tri_area(pts: &[Point], a: usize, b: usize, c: usize) -> f64 {
    let (p, q, r) = (pts[a], pts[b], pts[c]);
    (q.x - p.x) * (r.y - p.y) - (r.x - p.x) * (q.y - p.y)
}

/// Extrude `contour` into a closed solid of thickness `depth`.
pub fn extrude(
    contour: &Contour,
    depth: f64,
    segments_per_curve: usize,
) -> Result<PieceMesh, ExtrudeError> {
    let mut ring = contour.flatten(segments_per_curve);
    if ring.len() < 3 {
        return Err(ExtrudeError::Degenerate(ring.len()));
    }
    if contour.to_polygon(segments_per_curve).signed_area() < 0.0 {
        ring.reverse();
    }
    let n = ring.len();

    let flat: Vec<f64> = ring.iter().flat_map(|p| [p.x, p.y]).collect();
    let cap = earcutr::earcut(&flat, &[], 2)
        .map_err(|e| ExtrudeError::Triangulation(format!("{e:?}")))?;
    if cap.len() != 3 * (n - 2) {
        return Err(ExtrudeError::Triangulation(format!(
            "expected {} cap triangles, got {}",
            n - 2,
            cap.len() / 3
        )));
    }

    let mut mesh = PieceMesh::new();
    for z in [0.0, depth] {
        for p in &ring {
            mesh.add_vertex(Vec3::new(p.x as f32, p.y as f32, z as f32));
        }
    }
    let back = |i: usize| i as u32;
    let front = |i: usize| (i + n) as u32;

    for tri in cap.chunks_exact(3) {
        let (a, mut b, mut c) = (tri[0], tri[1], tri[2]);
        if tri_area(&ring, a, b, c) < 0.0 {
            std::mem::swap(&mut b, &mut c);
        }
        // counter-clockwise in xy faces +z
        mesh.add_triangle(front(a), front(b), front(c));
        mesh.add_triangle(back(a), back(c), back(b));
    }

    for i in 0..n {
        let j = (i + 1) % n;
        mesh.add_triangle(back(i), back(j), front(j));
        mesh.add_triangle(back(i), front(j), front(i));
    }
    Ok(mesh)
}
