// Shared fixtures for the integration tests.

#![allow(dead_code)]

use femlium::geometry::{Feature, Geometry, Position};
use femlium::source::ArrayMesh;
use femlium::V2;

/// Unit square split along its diagonal into two triangles.
pub fn square() -> ArrayMesh {
	ArrayMesh::new(
		vec![
			V2::new(0.0, 0.0),
			V2::new(1.0, 0.0),
			V2::new(1.0, 1.0),
			V2::new(0.0, 1.0),
		],
		vec![[0, 1, 2], [0, 2, 3]],
	)
}

/// Closed loop around the unit square.
pub fn square_loop() -> Vec<V2> {
	vec![
		V2::new(0.0, 0.0),
		V2::new(1.0, 0.0),
		V2::new(1.0, 1.0),
		V2::new(0.0, 1.0),
		V2::new(0.0, 0.0),
	]
}

/// Structured n x n grid on [0, 1]^2, two triangles per square.
pub fn grid(n: usize) -> ArrayMesh {
	let mut vertices = Vec::new();
	for j in 0..=n {
		for i in 0..=n {
			vertices.push(V2::new(i as f64 / n as f64, j as f64 / n as f64));
		}
	}
	let id = |i: usize, j: usize| j * (n + 1) + i;
	let mut cells = Vec::new();
	for j in 0..n {
		for i in 0..n {
			cells.push([id(i, j), id(i + 1, j), id(i + 1, j + 1)]);
			cells.push([id(i, j), id(i + 1, j + 1), id(i, j + 1)]);
		}
	}
	ArrayMesh::new(vertices, cells)
}

pub fn polygons(f: &Feature) -> &[Vec<Vec<Position>>] {
	match &f.geometry {
		Geometry::MultiPolygon(p) => p,
		Geometry::MultiLineString(_) => panic!("expected a MultiPolygon"),
	}
}

pub fn lines(f: &Feature) -> &[Vec<Position>] {
	match &f.geometry {
		Geometry::MultiLineString(l) => l,
		Geometry::MultiPolygon(_) => panic!("expected a MultiLineString"),
	}
}

/// Shoelace area of a closed ring.
pub fn ring_area(ring: &[Position]) -> f64 {
	ring.windows(2)
		.map(|w| w[0][0] * w[1][1] - w[1][0] * w[0][1])
		.sum::<f64>()
		.abs()
		/ 2.0
}
