//! Triangular cells and their faces to styled polygons and lines.
//!
//! A cell whose three faces share one marker carries that marker's stroke on
//! its own polygon. Otherwise the polygon is drawn without stroke and each
//! face is emitted as a separate segment grouped by its face marker.

use log::debug;

use crate::error::check_len;
use crate::geometry::{
	CellStyle, FaceStyle, FeatureCollection, Geometry, Grouped, LineString, Polygon, Position, Properties,
};
use crate::markers::{unique_markers, StyleArg, StyleTable};
use crate::sink::{Layer, Overlay};
use crate::transform::Transform;
use crate::{Error, Marker, Result, V2};

pub const NO_COLOR: &str = "none";
pub const DEFAULT_FACE_COLOR: &str = "black";
pub const DEFAULT_FACE_WEIGHT: u32 = 1;

// local edges of a cell, in face marker order
pub const FACES: [(usize, usize); 3] = [(0, 1), (1, 2), (0, 2)];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshStyle {
	pub cell_colors: StyleArg<String>,
	pub face_colors: StyleArg<String>,
	pub face_weights: StyleArg<u32>,
}

pub(crate) struct MeshTables {
	pub cell_colors: StyleTable<String>,
	pub face_colors: StyleTable<String>,
	pub face_weights: StyleTable<u32>,
}

impl MeshTables {
	fn cell_style(&self, cell_marker: Marker, face_marker: Option<Marker>) -> CellStyle {
		let (stroke, color, weight) = match face_marker {
			Some(f) => (true, Some(self.face_colors[f].clone()), Some(self.face_weights[f])),
			None => (false, None, None),
		};
		let fill_color = &self.cell_colors[cell_marker];
		let fill = fill_color != NO_COLOR;
		CellStyle {
			stroke,
			color,
			weight,
			fill,
			fill_color: fill.then(|| fill_color.clone()),
			fill_opacity: fill.then_some(1.0),
		}
	}

	fn face_style(&self, face_marker: Marker) -> FaceStyle {
		FaceStyle {
			stroke: true,
			color: self.face_colors[face_marker].clone(),
			weight: self.face_weights[face_marker],
		}
	}
}

pub(crate) fn project_cell(
	transform: &dyn Transform,
	vertices: &[V2],
	c: usize,
	cell: &[usize; 3],
) -> Result<[Position; 4]> {
	let mut ring = [[0.0; 2]; 4];
	for (i, &v) in cell.iter().enumerate() {
		let p = vertices.get(v).ok_or(Error::VertexOutOfRange {
			cell: c,
			vertex: v,
			count: vertices.len(),
		})?;
		ring[i] = transform.position(*p);
	}
	ring[3] = ring[0];
	Ok(ring)
}

// `tables` must cover every marker in `cell_markers` and `face_markers`
pub(crate) fn convert_mesh(
	transform: &dyn Transform,
	vertices: &[V2],
	cells: &[[usize; 3]],
	cell_markers: &[Marker],
	face_markers: &[[Marker; 3]],
	tables: &MeshTables,
) -> Result<FeatureCollection> {
	check_len("cell markers", cells.len(), cell_markers.len())?;
	check_len("face markers", cells.len(), face_markers.len())?;
	let mut polygons: Grouped<(Marker, Option<Marker>), Polygon> = Grouped::default();
	let mut lines: Grouped<Marker, LineString> = Grouped::default();
	for (c, cell) in cells.iter().enumerate() {
		let ring = project_cell(transform, vertices, c, cell)?;
		let cm = cell_markers[c];
		let fm = face_markers[c];
		let uniform = fm[0] == fm[1] && fm[1] == fm[2];
		let shared = uniform.then_some(fm[0]);
		polygons.push((cm, shared), vec![ring.to_vec()], || {
			Properties::Cell(tables.cell_style(cm, shared))
		});
		if !uniform {
			for (f, &(a, b)) in FACES.iter().enumerate() {
				lines.push(fm[f], vec![ring[a], ring[b]], || {
					Properties::Face(tables.face_style(fm[f]))
				});
			}
		}
	}
	debug!(
		"mesh: {} cells -> {} polygon groups, {} face groups",
		cells.len(),
		polygons.len(),
		lines.len(),
	);
	let features = polygons
		.into_features(Geometry::MultiPolygon)
		.chain(lines.into_features(Geometry::MultiLineString))
		.collect();
	Ok(FeatureCollection { features })
}

/// Mesh polygons plus legends for the cell and face markers in use.
pub fn mesh_overlay(
	transform: &dyn Transform,
	vertices: &[V2],
	cells: &[[usize; 3]],
	cell_markers: Option<&[Marker]>,
	face_markers: Option<&[[Marker; 3]]>,
	style: &MeshStyle,
) -> Result<Overlay> {
	let cell_markers = match cell_markers {
		Some(m) => {
			check_len("cell markers", cells.len(), m.len())?;
			m.to_vec()
		}
		None => vec![0; cells.len()],
	};
	let face_markers = match face_markers {
		Some(m) => {
			check_len("face markers", cells.len(), m.len())?;
			m.to_vec()
		}
		None => vec![[0; 3]; cells.len()],
	};
	let present_cells = unique_markers(cell_markers.iter().copied());
	let present_faces = unique_markers(face_markers.iter().flatten().copied());
	let tables = MeshTables {
		cell_colors: style.cell_colors.resolve(NO_COLOR.to_string(), &present_cells)?,
		face_colors: style.face_colors.resolve(DEFAULT_FACE_COLOR.to_string(), &present_faces)?,
		face_weights: style.face_weights.resolve(DEFAULT_FACE_WEIGHT, &present_faces)?,
	};
	let collection = convert_mesh(transform, vertices, cells, &cell_markers, &face_markers, &tables)?;

	let legends: Vec<_> = [
		tables.cell_colors.legend(&present_cells, Some(NO_COLOR), "Cell markers"),
		tables.face_colors.legend(&present_faces, None, "Face markers"),
	]
	.into_iter()
	.flatten()
	.collect();
	debug!("mesh: {} legends", legends.len());
	Ok(Overlay {
		layer: Layer {
			collection,
			arrowheads: None,
		},
		legends,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transform::Identity;

	fn square() -> (Vec<V2>, Vec<[usize; 3]>) {
		(
			vec![
				V2::new(0.0, 0.0),
				V2::new(1.0, 0.0),
				V2::new(1.0, 1.0),
				V2::new(0.0, 1.0),
			],
			vec![[0, 1, 2], [0, 2, 3]],
		)
	}

	#[test]
	fn cell_ring_is_closed() {
		let (vs, cs) = square();
		let ring = project_cell(&Identity, &vs, 1, &cs[1]).unwrap();
		assert_eq!(ring, [[0.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]);
	}

	#[test]
	fn out_of_range_vertex() {
		let (vs, _) = square();
		let err = mesh_overlay(&Identity, &vs, &[[0, 1, 4]], None, None, &MeshStyle::default()).unwrap_err();
		assert!(matches!(err, Error::VertexOutOfRange { cell: 0, vertex: 4, count: 4 }));
	}

	#[test]
	fn marker_shapes_are_checked() {
		let (vs, cs) = square();
		let err = mesh_overlay(&Identity, &vs, &cs, Some(&[1]), None, &MeshStyle::default()).unwrap_err();
		assert!(matches!(err, Error::ShapeMismatch { what: "cell markers", .. }));
		let err = mesh_overlay(&Identity, &vs, &cs, None, Some(&[[0; 3]]), &MeshStyle::default()).unwrap_err();
		assert!(matches!(err, Error::ShapeMismatch { what: "face markers", .. }));
	}

	#[test]
	fn convert_checks_marker_lengths() {
		let (vs, cs) = square();
		let tables = MeshTables {
			cell_colors: StyleArg::Unset.resolve(NO_COLOR.to_string(), &[0]).unwrap(),
			face_colors: StyleArg::Unset.resolve(DEFAULT_FACE_COLOR.to_string(), &[0]).unwrap(),
			face_weights: StyleArg::Unset.resolve(DEFAULT_FACE_WEIGHT, &[0]).unwrap(),
		};
		let err = convert_mesh(&Identity, &vs, &cs, &[0], &[[0; 3]; 2], &tables).unwrap_err();
		assert!(matches!(err, Error::ShapeMismatch { what: "cell markers", expected: 2, actual: 1 }));
		let err = convert_mesh(&Identity, &vs, &cs, &[0, 0], &[[0; 3]], &tables).unwrap_err();
		assert!(matches!(err, Error::ShapeMismatch { what: "face markers", expected: 2, actual: 1 }));
		assert_eq!(convert_mesh(&Identity, &vs, &cs, &[0, 0], &[[0; 3]; 2], &tables).unwrap().len(), 1);
	}

	#[test]
	fn negative_cell_marker() {
		let (vs, cs) = square();
		let err = mesh_overlay(&Identity, &vs, &cs, Some(&[0, -2]), None, &MeshStyle::default()).unwrap_err();
		assert!(matches!(err, Error::NegativeMarker(-2)));
	}

	#[test]
	fn uncolored_cells_have_null_fill() {
		let tables = MeshTables {
			cell_colors: StyleArg::Unset.resolve(NO_COLOR.to_string(), &[0]).unwrap(),
			face_colors: StyleArg::Unset.resolve(DEFAULT_FACE_COLOR.to_string(), &[0]).unwrap(),
			face_weights: StyleArg::Unset.resolve(DEFAULT_FACE_WEIGHT, &[0]).unwrap(),
		};
		let s = tables.cell_style(0, None);
		assert!(!s.stroke && !s.fill);
		assert_eq!((s.color, s.weight, s.fill_color, s.fill_opacity), (None, None, None, None));
	}
}
