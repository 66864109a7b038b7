//! Planar graph over polygon boundaries.
//!
//! Segments are inserted with their split points, vertices are snapped
//! within the tolerance and duplicate edges merged. Faces are then found by
//! following half-edge chains:
//! 1. Prune dangling filaments
//! 2. Link half-edges by sorting the outgoing edges around each vertex
//! 3. Trace every cycle; clockwise cycles are bounded faces and
//!    counter-clockwise cycles are the outer boundaries of components
//! 4. Attach each component boundary as a hole of the face enclosing it

use super::polygon::Polygon;
use super::utils_2d::{point_in_polygon, points_equal, polygon_signed_area, project_point_on_line};
use super::Point2;
use std::collections::{HashMap, HashSet};
use tracing::trace;

#[derive(Debug, Clone)]
struct GraphVertex {
    pos: Point2,
    /// Outgoing half-edges
    edges: Vec<usize>,
}

#[derive(Debug, Clone)]
struct HalfEdge {
    start: usize,
    end: usize,
    twin: usize,
    /// Next half-edge along the face on this edge's right-hand side
    next: Option<usize>,
    removed: bool,
    used: bool,
}

/// A traced bounded face before holes are attached.
struct Face {
    component: usize,
    ring: Vec<Point2>,
    area: f64,
}

pub(crate) struct PlanarGraph {
    tolerance: f64,
    cell: f64,
    vertices: Vec<GraphVertex>,
    edges: Vec<HalfEdge>,
    grid: HashMap<(i64, i64), Vec<usize>>,
    undirected: HashSet<(usize, usize)>,
}

impl PlanarGraph {
    pub(crate) fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            cell: (2.0 * tolerance).max(f64::MIN_POSITIVE),
            vertices: Vec::new(),
            edges: Vec::new(),
            grid: HashMap::new(),
            undirected: HashSet::new(),
        }
    }

    /// Insert the segment `start -> end`, subdivided at every point of `cuts`.
    pub(crate) fn insert_segment(&mut self, start: Point2, end: Point2, cuts: &[Point2]) {
        let mut points: Vec<(f64, Point2)> = Vec::with_capacity(cuts.len() + 2);
        points.push((0.0, start));
        points.extend(cuts.iter().map(|p| (project_point_on_line(start, end, *p), *p)));
        points.push((1.0, end));
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let ids: Vec<usize> = points.iter().map(|(_, p)| self.vertex_at(*p)).collect();
        for pair in ids.windows(2) {
            self.add_edge(pair[0], pair[1]);
        }
    }

    /// Grid cell of `p`. Keys saturate for coordinates far beyond the cell
    /// size; such points share the boundary cell and are told apart by the
    /// exact comparison in [`Self::vertex_at`].
    fn grid_key(&self, p: Point2) -> (i64, i64) {
        ((p[0] / self.cell).floor() as i64, (p[1] / self.cell).floor() as i64)
    }

    /// Existing vertex within tolerance of `p`, or a new one.
    fn vertex_at(&mut self, p: Point2) -> usize {
        let (kx, ky) = self.grid_key(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(candidates) = self.grid.get(&(kx.saturating_add(dx), ky.saturating_add(dy))) {
                    if let Some(&idx) = candidates
                        .iter()
                        .find(|&&idx| points_equal(self.vertices[idx].pos, p, self.tolerance))
                    {
                        return idx;
                    }
                }
            }
        }

        let idx = self.vertices.len();
        self.vertices.push(GraphVertex { pos: p, edges: Vec::new() });
        self.grid.entry((kx, ky)).or_default().push(idx);
        idx
    }

    fn add_edge(&mut self, a: usize, b: usize) {
        if a == b || !self.undirected.insert((a.min(b), a.max(b))) {
            return;
        }
        let forward = self.edges.len();
        let backward = forward + 1;
        self.edges.push(HalfEdge {
            start: a,
            end: b,
            twin: backward,
            next: None,
            removed: false,
            used: false,
        });
        self.edges.push(HalfEdge {
            start: b,
            end: a,
            twin: forward,
            next: None,
            removed: false,
            used: false,
        });
        self.vertices[a].edges.push(forward);
        self.vertices[b].edges.push(backward);
    }

    /// Consume the graph and return its bounded faces as polygons.
    pub(crate) fn into_faces(mut self) -> Vec<Polygon> {
        self.prune_filaments();
        self.link_half_edges();
        let cycles = self.trace_cycles();
        let mut components = self.components();

        let min_area = self.tolerance * self.tolerance;
        let mut bounded: Vec<Face> = Vec::new();
        let mut outer: Vec<(usize, Vec<Point2>)> = Vec::new();

        for cycle in cycles {
            if cycle.len() < 3 {
                continue;
            }
            let mut ring: Vec<Point2> = cycle.iter().map(|&v| self.vertices[v].pos).collect();
            let area = polygon_signed_area(&ring);
            if area.abs() <= min_area {
                continue;
            }
            let component = components.find(cycle[0]);
            if area < 0.0 {
                ring.reverse();
                bounded.push(Face {
                    component,
                    ring,
                    area: -area,
                });
            } else {
                outer.push((component, ring));
            }
        }

        let mut holes: Vec<Vec<Vec<Point2>>> = vec![Vec::new(); bounded.len()];
        for (component, ring) in outer {
            let first = ring[0];
            let host = bounded
                .iter()
                .enumerate()
                .filter(|(_, face)| face.component != component && point_in_polygon(first, &face.ring))
                .min_by(|a, b| a.1.area.total_cmp(&b.1.area))
                .map(|(i, _)| i);
            if let Some(i) = host {
                holes[i].push(ring);
            }
        }

        trace!(
            vertices = self.vertices.len(),
            faces = bounded.len(),
            "planar graph faces extracted"
        );

        bounded
            .into_iter()
            .zip(holes)
            .map(|(face, holes)| Polygon::with_holes(face.ring, holes))
            .collect()
    }

    /// Iteratively remove degree-1 vertices and their edges.
    fn prune_filaments(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            let mut degree = vec![0usize; self.vertices.len()];
            let mut last_edge = vec![0usize; self.vertices.len()];
            for (i, edge) in self.edges.iter().enumerate() {
                if !edge.removed {
                    degree[edge.start] += 1;
                    last_edge[edge.start] = i;
                }
            }
            for v in 0..self.vertices.len() {
                if degree[v] == 1 {
                    let e = last_edge[v];
                    if !self.edges[e].removed {
                        let twin = self.edges[e].twin;
                        self.edges[e].removed = true;
                        self.edges[twin].removed = true;
                        changed = true;
                    }
                }
            }
        }

        let edges = &self.edges;
        for vertex in &mut self.vertices {
            vertex.edges.retain(|&e| !edges[e].removed);
        }
    }

    /// Incoming edge's next = the outgoing edge following its twin counter-clockwise.
    fn link_half_edges(&mut self) {
        for v in 0..self.vertices.len() {
            let origin = self.vertices[v].pos;
            let mut sorted = self.vertices[v].edges.clone();
            if sorted.is_empty() {
                continue;
            }
            let angle = |e: usize| {
                let end = self.vertices[self.edges[e].end].pos;
                (end[1] - origin[1]).atan2(end[0] - origin[0])
            };
            sorted.sort_by(|&a, &b| angle(a).total_cmp(&angle(b)));

            for i in 0..sorted.len() {
                let outgoing = sorted[i];
                let next_outgoing = sorted[(i + 1) % sorted.len()];
                let twin = self.edges[outgoing].twin;
                self.edges[twin].next = Some(next_outgoing);
            }
        }
    }

    /// Follow half-edge chains; each cycle is returned as its start vertices.
    fn trace_cycles(&mut self) -> Vec<Vec<usize>> {
        let mut cycles = Vec::new();
        let max_steps = self.edges.len() + 1;

        for start in 0..self.edges.len() {
            if self.edges[start].removed || self.edges[start].used {
                continue;
            }
            let mut cycle = Vec::new();
            let mut current = start;
            let mut closed = false;

            for _ in 0..max_steps {
                if self.edges[current].used {
                    break;
                }
                self.edges[current].used = true;
                cycle.push(self.edges[current].start);
                match self.edges[current].next {
                    Some(next) if next == start => {
                        closed = true;
                        break;
                    }
                    Some(next) => current = next,
                    None => break,
                }
            }

            if closed {
                cycles.push(cycle);
            }
        }
        cycles
    }

    fn components(&self) -> UnionFind {
        let mut sets = UnionFind::new(self.vertices.len());
        for edge in self.edges.iter().filter(|e| !e.removed) {
            sets.union(edge.start, edge.end);
        }
        sets
    }
}

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}
