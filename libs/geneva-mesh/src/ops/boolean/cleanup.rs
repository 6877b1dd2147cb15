//! # Boolean Result Cleanup
//!
//! Turns the polygon soup left by BSP clipping back into an indexed,
//! closed mesh:
//!
//! 1. Weld vertices closer than [`VERTEX_WELD_EPSILON`]
//! 2. Drop faces that collapsed below three vertices or zero area
//! 3. Cancel coincident faces of opposite orientation
//! 4. Insert vertices that sit on neighbouring edges (T-junctions)
//! 5. Verify every directed edge is matched by its reverse
//! 6. Merge coplanar neighbours back into convex faces
//! 7. Drop vertices left in the middle of straight shared edges
//!
//! Steps 6 and 7 keep repeated booleans from compounding the fragments each
//! split leaves behind.
//!
//! Hash maps are only used for lookups. Output order always follows input
//! order so identical inputs produce identical meshes.

use std::collections::{HashMap, HashSet};

use config::constants::{
    COPLANAR_MERGE_EPSILON, DEGENERATE_AREA_EPSILON, EDGE_SNAP_EPSILON, VERTEX_WELD_EPSILON,
};
use glam::DVec3;

use super::polygon::Polygon;
use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;

/// Upper bound on T-junction repair passes.
const MAX_REPAIR_PASSES: usize = 8;

/// Sine of the largest turn still treated as straight when checking a
/// merged loop for convexity.
const STRAIGHT_TURN_SINE: f64 = 1e-9;

type CellKey = (i64, i64, i64);

/// Vertex welder over a uniform grid of weld-sized cells.
struct Welder {
    vertices: Vec<DVec3>,
    grid: HashMap<CellKey, Vec<u32>>,
}

impl Welder {
    fn new() -> Self {
        Self {
            vertices: Vec::new(),
            grid: HashMap::new(),
        }
    }

    fn cell(p: DVec3) -> CellKey {
        let q = (p / VERTEX_WELD_EPSILON).floor();
        (q.x as i64, q.y as i64, q.z as i64)
    }

    /// Returns the index of an existing vertex within weld distance, or
    /// adds `p` as a new vertex.
    fn insert(&mut self, p: DVec3) -> u32 {
        let (cx, cy, cz) = Self::cell(p);
        let mut found: Option<u32> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &i in bucket {
                        if self.vertices[i as usize].distance(p) < VERTEX_WELD_EPSILON
                            && found.map_or(true, |f| i < f)
                        {
                            found = Some(i);
                        }
                    }
                }
            }
        }

        if let Some(i) = found {
            return i;
        }

        let index = self.vertices.len() as u32;
        self.vertices.push(p);
        self.grid.entry((cx, cy, cz)).or_default().push(index);
        index
    }
}

/// Welds polygon loops into an indexed mesh, dropping collapsed faces.
pub fn weld_polygons(polygons: &[Polygon]) -> Mesh {
    let mut welder = Welder::new();
    let mut faces = Vec::with_capacity(polygons.len());

    for poly in polygons {
        let mut face: Vec<u32> = Vec::with_capacity(poly.vertices().len());
        for &v in poly.vertices() {
            let index = welder.insert(v);
            if face.last() != Some(&index) {
                face.push(index);
            }
        }
        while face.len() > 1 && face.first() == face.last() {
            face.pop();
        }
        if face.len() >= 3 {
            faces.push(face);
        }
    }

    let mut mesh = Mesh::from_parts(welder.vertices, faces);
    drop_degenerate_faces(&mut mesh);
    mesh
}

/// Removes faces whose area vanished.
fn drop_degenerate_faces(mesh: &mut Mesh) {
    let keep: Vec<bool> = (0..mesh.face_count())
        .map(|f| mesh.face_area_vector(f).length() >= DEGENERATE_AREA_EPSILON)
        .collect();
    retain_faces(mesh, &keep);
}

fn retain_faces(mesh: &mut Mesh, keep: &[bool]) {
    if keep.iter().all(|k| *k) {
        return;
    }
    let (vertices, faces) = std::mem::take(mesh).into_parts();
    let faces = faces
        .into_iter()
        .zip(keep)
        .filter_map(|(f, k)| k.then_some(f))
        .collect();
    *mesh = Mesh::from_parts(vertices, faces);
}

/// Rotates a loop so its smallest index comes first.
fn canonical_loop(face: &[u32]) -> Vec<u32> {
    let start = face
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| **v)
        .map_or(0, |(i, _)| i);
    face[start..].iter().chain(&face[..start]).copied().collect()
}

/// Removes pairs of faces that cover the same loop with opposite winding.
///
/// Such pairs enclose no volume and would leave internal sheets behind.
pub fn cancel_opposing_faces(mesh: &mut Mesh) -> usize {
    let mut by_loop: HashMap<Vec<u32>, Vec<usize>> = HashMap::new();
    for (i, face) in mesh.faces().iter().enumerate() {
        by_loop.entry(canonical_loop(face)).or_default().push(i);
    }

    let mut keep = vec![true; mesh.face_count()];
    let mut removed = 0;
    for (i, face) in mesh.faces().iter().enumerate() {
        if !keep[i] {
            continue;
        }
        let reversed: Vec<u32> = face.iter().rev().copied().collect();
        let Some(twins) = by_loop.get(&canonical_loop(&reversed)) else {
            continue;
        };
        if let Some(&twin) = twins.iter().find(|&&t| t != i && keep[t]) {
            keep[i] = false;
            keep[twin] = false;
            removed += 2;
        }
    }

    retain_faces(mesh, &keep);
    removed
}

/// Directed edges without a reverse partner.
fn open_edges(mesh: &Mesh) -> HashSet<(u32, u32)> {
    let mut directed: HashSet<(u32, u32)> = HashSet::new();
    for face in mesh.faces() {
        for (i, &a) in face.iter().enumerate() {
            directed.insert((a, face[(i + 1) % face.len()]));
        }
    }
    directed
        .iter()
        .filter(|(a, b)| !directed.contains(&(*b, *a)))
        .copied()
        .collect()
}

/// Inserts vertices lying on the interior of open edges into those edges.
///
/// Returns the number of inserted vertices.
pub fn repair_t_junctions(mesh: &mut Mesh) -> usize {
    let mut inserted = 0;

    for _ in 0..MAX_REPAIR_PASSES {
        let open = open_edges(mesh);
        if open.is_empty() {
            break;
        }

        // Candidate vertices: endpoints of open edges, sorted by x
        let mut endpoints: Vec<u32> = open.iter().flat_map(|(a, b)| [*a, *b]).collect();
        endpoints.sort_unstable();
        endpoints.dedup();
        let mut candidates: Vec<(f64, u32)> = endpoints
            .into_iter()
            .map(|i| (mesh.vertex(i).x, i))
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let (vertices, faces) = std::mem::take(mesh).into_parts();
        let mut pass_inserted = 0;
        let faces: Vec<Vec<u32>> = faces
            .into_iter()
            .map(|face| {
                let mut out = Vec::with_capacity(face.len());
                for (i, &a) in face.iter().enumerate() {
                    let b = face[(i + 1) % face.len()];
                    out.push(a);
                    if !open.contains(&(a, b)) {
                        continue;
                    }
                    let on_edge = points_on_edge(&vertices, &candidates, a, b);
                    pass_inserted += on_edge.len();
                    out.extend(on_edge);
                }
                out
            })
            .collect();
        *mesh = Mesh::from_parts(vertices, faces);

        if pass_inserted == 0 {
            break;
        }
        inserted += pass_inserted;
    }

    inserted
}

/// Candidates strictly inside segment `a-b`, ordered from `a` to `b`.
fn points_on_edge(vertices: &[DVec3], candidates: &[(f64, u32)], a: u32, b: u32) -> Vec<u32> {
    let pa = vertices[a as usize];
    let pb = vertices[b as usize];
    let ab = pb - pa;
    let len_sq = ab.length_squared();
    if len_sq <= VERTEX_WELD_EPSILON * VERTEX_WELD_EPSILON {
        return Vec::new();
    }

    let lo = pa.x.min(pb.x) - EDGE_SNAP_EPSILON;
    let hi = pa.x.max(pb.x) + EDGE_SNAP_EPSILON;
    let start = candidates.partition_point(|(x, _)| *x < lo);

    let mut hits: Vec<(f64, u32)> = candidates[start..]
        .iter()
        .take_while(|(x, _)| *x <= hi)
        .filter(|(_, v)| *v != a && *v != b)
        .filter_map(|&(_, v)| {
            let p = vertices[v as usize];
            let t = (p - pa).dot(ab) / len_sq;
            if t <= 0.0 || t >= 1.0 {
                return None;
            }
            let off_line = (pa + ab * t).distance(p);
            let near_end = p.distance(pa).min(p.distance(pb));
            (off_line < EDGE_SNAP_EPSILON && near_end > VERTEX_WELD_EPSILON).then_some((t, v))
        })
        .collect();

    hits.sort_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)));
    hits.into_iter().map(|(_, v)| v).collect()
}

// =============================================================================
// FACE MERGING
// =============================================================================

/// Directed edges of a loop, closing back to the first vertex.
fn loop_edges(face: &[u32]) -> impl Iterator<Item = (u32, u32)> + '_ {
    face.iter()
        .enumerate()
        .map(|(i, &a)| (a, face[(i + 1) % face.len()]))
}

/// Twice the vector area of a loop.
fn area_vector(vertices: &[DVec3], face: &[u32]) -> DVec3 {
    let origin = vertices[face[0] as usize];
    loop_edges(face).fold(DVec3::ZERO, |acc, (a, b)| {
        let pa = vertices[a as usize] - origin;
        let pb = vertices[b as usize] - origin;
        acc + pa.cross(pb)
    })
}

/// Merges edge-adjacent faces that share a plane and facing wherever the
/// joined loop stays convex.
///
/// Returns the number of merges. Faces are visited in order, so the result
/// is deterministic.
pub fn merge_coplanar_faces(mesh: &mut Mesh) -> usize {
    let (vertices, faces) = std::mem::take(mesh).into_parts();
    let mut faces: Vec<Option<Vec<u32>>> = faces.into_iter().map(Some).collect();

    let mut owner: HashMap<(u32, u32), usize> = HashMap::new();
    for (f, face) in faces.iter().enumerate() {
        if let Some(face) = face {
            for edge in loop_edges(face) {
                owner.insert(edge, f);
            }
        }
    }

    let mut merges = 0;
    for f in 0..faces.len() {
        while let Some((g, joined)) = find_merge(&vertices, &faces, &owner, f) {
            for edge in loop_edges(&joined) {
                owner.insert(edge, f);
            }
            faces[g] = None;
            faces[f] = Some(joined);
            merges += 1;
        }
    }

    *mesh = Mesh::from_parts(vertices, faces.into_iter().flatten().collect());
    merges
}

/// First neighbour of face `f` that can be absorbed, with the joined loop.
fn find_merge(
    vertices: &[DVec3],
    faces: &[Option<Vec<u32>>],
    owner: &HashMap<(u32, u32), usize>,
    f: usize,
) -> Option<(usize, Vec<u32>)> {
    let face = faces[f].as_ref()?;
    for (i, (a, b)) in loop_edges(face).enumerate() {
        let Some(&g) = owner.get(&(b, a)) else {
            continue;
        };
        if g == f {
            continue;
        }
        let Some(other) = faces[g].as_ref() else {
            continue;
        };
        let Some(normal) = shared_plane(vertices, face, other) else {
            continue;
        };
        let Some(joined) = join_loops(face, i, other) else {
            continue;
        };
        if is_convex(vertices, &joined, normal) {
            return Some((g, joined));
        }
    }
    None
}

/// Common unit normal of two faces lying in one plane and facing the same
/// way.
fn shared_plane(vertices: &[DVec3], face: &[u32], other: &[u32]) -> Option<DVec3> {
    let area = area_vector(vertices, face);
    let other_area = area_vector(vertices, other);
    if area.dot(other_area) <= 0.0 {
        return None;
    }
    let normal = (area + other_area).try_normalize()?;

    // Measure from the larger face, whose vertices pin the plane best
    let origin = if area.length_squared() >= other_area.length_squared() {
        vertices[face[0] as usize]
    } else {
        vertices[other[0] as usize]
    };
    let flat = face
        .iter()
        .chain(other)
        .all(|&v| normal.dot(vertices[v as usize] - origin).abs() <= COPLANAR_MERGE_EPSILON);
    flat.then_some(normal)
}

/// Joins `face` and `other` across the edge starting at `face[i]`.
///
/// Spurs left by a longer shared chain are trimmed. Returns None when the
/// faces meet along more than one chain.
fn join_loops(face: &[u32], i: usize, other: &[u32]) -> Option<Vec<u32>> {
    let n = face.len();
    let m = other.len();
    let a = face[i];
    let b = face[(i + 1) % n];
    let j = (0..m).find(|&j| other[j] == b && other[(j + 1) % m] == a)?;

    // face from b round to a, then other strictly between a and b
    let mut joined: Vec<u32> = (1..=n).map(|k| face[(i + k) % n]).collect();
    joined.extend((2..m).map(|k| other[(j + k) % m]));
    remove_spurs(&mut joined);

    let mut seen = HashSet::with_capacity(joined.len());
    let simple = joined.iter().all(|v| seen.insert(*v));
    (simple && joined.len() >= 3).then_some(joined)
}

/// Removes `x, y, x` back-tracks from a loop.
fn remove_spurs(face: &mut Vec<u32>) {
    let mut k = 0;
    while face.len() >= 3 && k < face.len() {
        let n = face.len();
        let tip = k;
        let base = (k + 1) % n;
        if face[(k + n - 1) % n] == face[base] {
            face.remove(tip.max(base));
            face.remove(tip.min(base));
            k = 0;
        } else {
            k += 1;
        }
    }
}

/// Every turn of the loop bends the same way as `normal`, or runs straight.
fn is_convex(vertices: &[DVec3], face: &[u32], normal: DVec3) -> bool {
    let n = face.len();
    (0..n).all(|k| {
        let p = vertices[face[(k + n - 1) % n] as usize];
        let q = vertices[face[k] as usize];
        let r = vertices[face[(k + 1) % n] as usize];
        let (incoming, outgoing) = (q - p, r - q);
        let turn = incoming.cross(outgoing).dot(normal);
        if turn.abs() <= STRAIGHT_TURN_SINE * incoming.length() * outgoing.length() {
            incoming.dot(outgoing) > 0.0
        } else {
            turn > 0.0
        }
    })
}

/// Removes vertices that sit inside a straight edge shared by exactly two
/// faces, shortening both loops.
///
/// Returns the number of vertices removed. Unused vertices are dropped and
/// the rest keep their relative order.
pub fn remove_collinear_vertices(mesh: &mut Mesh) -> usize {
    let (vertices, mut faces) = std::mem::take(mesh).into_parts();

    let mut users: Vec<Vec<usize>> = vec![Vec::new(); vertices.len()];
    for (f, face) in faces.iter().enumerate() {
        for &v in face {
            users[v as usize].push(f);
        }
    }

    let mut removed = 0;
    for (v, faces_of_v) in users.iter().enumerate() {
        let &[f, g] = faces_of_v.as_slice() else {
            continue;
        };
        if f == g || faces[f].len() <= 3 || faces[g].len() <= 3 {
            continue;
        }
        let v = v as u32;
        let (Some((u, w)), Some((w_back, u_back))) =
            (neighbours(&faces[f], v), neighbours(&faces[g], v))
        else {
            continue;
        };
        if u != u_back || w != w_back {
            continue;
        }
        let [pu, pv, pw] = [u, v, w].map(|i| vertices[i as usize]);
        if !inside_segment(pu, pv, pw) {
            continue;
        }
        faces[f].retain(|&x| x != v);
        faces[g].retain(|&x| x != v);
        removed += 1;
    }

    *mesh = compact(vertices, faces);
    removed
}

/// Previous and next vertex around `v` in a loop.
fn neighbours(face: &[u32], v: u32) -> Option<(u32, u32)> {
    let n = face.len();
    let k = face.iter().position(|&x| x == v)?;
    Some((face[(k + n - 1) % n], face[(k + 1) % n]))
}

/// `p` lies strictly between `a` and `b` on the segment joining them.
fn inside_segment(a: DVec3, p: DVec3, b: DVec3) -> bool {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return false;
    }
    let t = (p - a).dot(ab) / len_sq;
    t > 0.0 && t < 1.0 && (a + ab * t).distance(p) <= COPLANAR_MERGE_EPSILON
}

/// Drops vertices no face refers to.
fn compact(vertices: Vec<DVec3>, faces: Vec<Vec<u32>>) -> Mesh {
    let mut remap = vec![None; vertices.len()];
    for face in &faces {
        for &v in face {
            remap[v as usize] = Some(0);
        }
    }

    let mut kept = Vec::with_capacity(vertices.len());
    for (slot, p) in remap.iter_mut().zip(vertices) {
        if slot.is_some() {
            *slot = Some(kept.len() as u32);
            kept.push(p);
        }
    }

    let faces = faces
        .into_iter()
        .map(|face| face.into_iter().filter_map(|v| remap[v as usize]).collect())
        .collect();
    Mesh::from_parts(kept, faces)
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Runs the whole cleanup and validates the result.
pub fn finish(polygons: Vec<Polygon>, operation: &'static str) -> MeshResult<Mesh> {
    let mut mesh = weld_polygons(&polygons);
    let cancelled = cancel_opposing_faces(&mut mesh);
    let inserted = repair_t_junctions(&mut mesh);

    if mesh.is_empty() {
        return Err(MeshError::EmptyResult { operation });
    }

    let open_edges = mesh.open_edge_count();
    tracing::trace!(
        operation,
        faces = mesh.face_count(),
        vertices = mesh.vertex_count(),
        cancelled,
        inserted,
        open_edges,
        "boolean cleanup"
    );

    if open_edges > 0 {
        return Err(MeshError::NonManifold {
            operation,
            open_edges,
        });
    }

    let merged = merge_coplanar_faces(&mut mesh);
    let straightened = remove_collinear_vertices(&mut mesh);
    tracing::trace!(
        operation,
        faces = mesh.face_count(),
        vertices = mesh.vertex_count(),
        merged,
        straightened,
        "coplanar faces merged"
    );

    Ok(mesh)
}
