//! Iso-lines and filled bands of a piecewise linear field on a triangulation.

use std::collections::HashMap;

use crate::error::check_len;
use crate::{Error, Result, V2};

// path codes of a filled contour
pub const MOVETO: u8 = 1;
pub const LINETO: u8 = 2;

/// Flat point list, `kinds[i] == MOVETO` starts a new ring at `points[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilledContour {
	pub points: Vec<V2>,
	pub kinds: Vec<u8>,
}

impl FilledContour {
	pub fn push_ring(&mut self, ring: &[V2]) {
		for (i, p) in ring.iter().enumerate() {
			self.points.push(*p);
			self.kinds.push(if i == 0 { MOVETO } else { LINETO });
		}
	}

	/// Splits the point list at every MOVETO. Rings are returned open.
	pub fn rings(&self) -> Result<Vec<Vec<V2>>> {
		if self.points.len() != self.kinds.len() {
			return Err(Error::MalformedContour(format!(
				"{} points but {} path codes",
				self.points.len(),
				self.kinds.len(),
			)));
		}
		if let Some(&k) = self.kinds.first() {
			if k != MOVETO {
				return Err(Error::MalformedContour(format!("path starts with code {}", k)));
			}
		}
		let mut rings: Vec<Vec<V2>> = Vec::new();
		for (p, &k) in self.points.iter().zip(self.kinds.iter()) {
			if k == MOVETO {
				rings.push(Vec::new());
			}
			// first code is MOVETO, so there is always a ring
			if let Some(ring) = rings.last_mut() {
				ring.push(*p);
			}
		}
		Ok(rings)
	}
}

pub trait ContourGenerator {
	/// Polylines where the field equals `level`. Closed loops repeat their
	/// first point.
	fn create_contour(&self, level: f64) -> Vec<Vec<V2>>;

	/// Regions where `lower <= field <= upper`.
	fn create_filled_contour(&self, lower: f64, upper: f64) -> FilledContour;
}

type EdgeKey = (usize, usize);

fn edge_key(a: usize, b: usize) -> EdgeKey {
	if a < b {
		(a, b)
	} else {
		(b, a)
	}
}

/// Marching triangles over a linear field given at the vertices.
pub struct TriContourGenerator<'a> {
	vertices: &'a [V2],
	cells: &'a [[usize; 3]],
	z: &'a [f64],
}

impl<'a> TriContourGenerator<'a> {
	pub fn new(vertices: &'a [V2], cells: &'a [[usize; 3]], z: &'a [f64]) -> Result<Self> {
		check_len("field values", vertices.len(), z.len())?;
		for (c, cell) in cells.iter().enumerate() {
			if let Some(&v) = cell.iter().find(|&&v| v >= vertices.len()) {
				return Err(Error::VertexOutOfRange {
					cell: c,
					vertex: v,
					count: vertices.len(),
				});
			}
		}
		Ok(Self { vertices, cells, z })
	}

	fn crossing(&self, key: EdgeKey, level: f64) -> V2 {
		let (a, b) = key;
		let t = (level - self.z[a]) / (self.z[b] - self.z[a]);
		self.vertices[a] + (self.vertices[b] - self.vertices[a]) * t
	}

	fn segments(&self, level: f64) -> Vec<[EdgeKey; 2]> {
		let mut segments = Vec::new();
		for cell in self.cells {
			let above = cell.map(|v| self.z[v] >= level);
			let mut keys = [(0, 0); 2];
			let mut n = 0;
			for (a, b) in [(0, 1), (1, 2), (2, 0)] {
				if above[a] != above[b] {
					keys[n] = edge_key(cell[a], cell[b]);
					n += 1;
				}
			}
			// a triangle is crossed on exactly zero or two edges
			if n == 2 {
				segments.push(keys);
			}
		}
		segments
	}
}

// Chains segments sharing an edge key. Open chains start from keys used by a
// single segment; whatever remains afterwards is a closed loop.
fn stitch(segments: &[[EdgeKey; 2]]) -> Vec<Vec<EdgeKey>> {
	let mut incident: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
	for (i, seg) in segments.iter().enumerate() {
		for k in seg {
			incident.entry(*k).or_default().push(i);
		}
	}
	let mut used = vec![false; segments.len()];
	let walk = |start: EdgeKey, used: &mut Vec<bool>| {
		let mut chain = vec![start];
		let mut key = start;
		loop {
			let next = incident[&key].iter().copied().find(|&i| !used[i]);
			let Some(i) = next else {
				break;
			};
			used[i] = true;
			key = if segments[i][0] == key {
				segments[i][1]
			} else {
				segments[i][0]
			};
			chain.push(key);
			if key == start {
				break;
			}
		}
		chain
	};

	let mut chains = Vec::new();
	for seg in segments {
		for &k in seg {
			if incident[&k].len() == 1 && !used[incident[&k][0]] {
				chains.push(walk(k, &mut used));
			}
		}
	}
	for i in 0..segments.len() {
		if !used[i] {
			chains.push(walk(segments[i][0], &mut used));
		}
	}
	chains.retain(|c| c.len() > 1);
	chains
}

// Sutherland-Hodgman against a level of the field; `keep_above` selects the
// side that survives.
fn clip(poly: &[(V2, f64)], level: f64, keep_above: bool) -> Vec<(V2, f64)> {
	let inside = |z: f64| if keep_above { z >= level } else { z <= level };
	let mut out = Vec::with_capacity(poly.len() + 2);
	for i in 0..poly.len() {
		let (pa, za) = poly[i];
		let (pb, zb) = poly[(i + 1) % poly.len()];
		if inside(za) {
			out.push((pa, za));
		}
		if inside(za) != inside(zb) {
			let t = (level - za) / (zb - za);
			out.push((pa + (pb - pa) * t, level));
		}
	}
	out
}

impl ContourGenerator for TriContourGenerator<'_> {
	fn create_contour(&self, level: f64) -> Vec<Vec<V2>> {
		stitch(&self.segments(level))
			.into_iter()
			.map(|chain| {
				// edges meeting at a vertex on the level cross at that vertex
				let mut line: Vec<V2> = chain.into_iter().map(|k| self.crossing(k, level)).collect();
				line.dedup();
				line
			})
			.collect()
	}

	fn create_filled_contour(&self, lower: f64, upper: f64) -> FilledContour {
		let mut out = FilledContour::default();
		for cell in self.cells {
			let zs = cell.map(|v| self.z[v]);
			if zs.iter().all(|&z| z < lower) || zs.iter().all(|&z| z > upper) {
				continue;
			}
			let tri: Vec<(V2, f64)> = cell.iter().map(|&v| (self.vertices[v], self.z[v])).collect();
			let piece = clip(&clip(&tri, lower, true), upper, false);
			let mut ring: Vec<V2> = piece.into_iter().map(|(p, _)| p).collect();
			ring.dedup();
			if ring.len() > 1 && ring.first() == ring.last() {
				ring.pop();
			}
			if ring.len() >= 3 {
				out.push_ring(&ring);
			}
		}
		out
	}
}
