use bimap::BiMap;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use crate::error::check_len;
use crate::markers::StyleArg;
use crate::mesh::FACES;
use crate::{Error, Marker, Result, V2};

/// Geometry and markers of a triangular mesh.
pub trait MeshSource {
	fn vertices(&self) -> &[V2];
	fn cells(&self) -> &[[usize; 3]];

	fn cell_markers(&self) -> Option<&[Marker]> {
		None
	}

	// one marker per local edge, see `mesh::FACES`
	fn face_markers(&self) -> Option<Cow<'_, [[Marker; 3]]>> {
		None
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Field<'a> {
	Scalar(&'a [f64]),
	Vector(&'a [V2]),
}

/// Values of a field at the vertices of a mesh.
pub trait FieldSource {
	fn field(&self) -> Field<'_>;
}

/// A mesh given as plain arrays.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayMesh {
	pub vertices: Vec<V2>,
	pub cells: Vec<[usize; 3]>,
	#[serde(default)]
	pub cell_markers: Option<Vec<Marker>>,
	#[serde(default)]
	pub face_markers: Option<Vec<[Marker; 3]>>,
}

impl ArrayMesh {
	pub fn new(vertices: Vec<V2>, cells: Vec<[usize; 3]>) -> Self {
		Self {
			vertices,
			cells,
			cell_markers: None,
			face_markers: None,
		}
	}

	pub fn with_cell_markers(mut self, markers: Vec<Marker>) -> Self {
		self.cell_markers = Some(markers);
		self
	}

	pub fn with_face_markers(mut self, markers: Vec<[Marker; 3]>) -> Self {
		self.face_markers = Some(markers);
		self
	}

	pub fn load<P: AsRef<Path>>(file: P) -> Result<Self> {
		let string: String = std::fs::read_to_string(file)?;
		Ok(serde_json::from_str(&string)?)
	}

	pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<()> {
		let string = serde_json::to_string(self)?;
		std::fs::write(file, string)?;
		Ok(())
	}
}

impl MeshSource for ArrayMesh {
	fn vertices(&self) -> &[V2] {
		&self.vertices
	}

	fn cells(&self) -> &[[usize; 3]] {
		&self.cells
	}

	fn cell_markers(&self) -> Option<&[Marker]> {
		self.cell_markers.as_deref()
	}

	fn face_markers(&self) -> Option<Cow<'_, [[Marker; 3]]>> {
		self.face_markers.as_deref().map(Cow::Borrowed)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValues {
	Scalar(Vec<f64>),
	Vector(Vec<V2>),
}

impl FieldSource for FieldValues {
	fn field(&self) -> Field<'_> {
		match self {
			FieldValues::Scalar(v) => Field::Scalar(v),
			FieldValues::Vector(v) => Field::Vector(v),
		}
	}
}

/// A gmsh-style mesh: triangles with physical markers, marked line elements
/// on (some of) their edges, and names for the physical groups.
#[serde_as]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TaggedMesh {
	pub vertices: Vec<V2>,
	pub cells: Vec<[usize; 3]>,
	#[serde(default)]
	pub cell_markers: Option<Vec<Marker>>,
	// keyed by sorted vertex pair
	#[serde_as(as = "Vec<(_, _)>")]
	#[serde(default)]
	pub lines: HashMap<[usize; 2], Marker>,
	#[serde(default)]
	pub names: BiMap<String, Marker>,
	// marker of edges without a line element
	#[serde(default)]
	pub unmarked_face_marker: Marker,
}

fn sorted(e: [usize; 2]) -> [usize; 2] {
	if e[0] <= e[1] {
		e
	} else {
		[e[1], e[0]]
	}
}

impl TaggedMesh {
	pub fn new(vertices: Vec<V2>, cells: Vec<[usize; 3]>) -> Self {
		Self {
			vertices,
			cells,
			..Self::default()
		}
	}

	pub fn load<P: AsRef<Path>>(file: P) -> Result<Self> {
		let string: String = std::fs::read_to_string(file)?;
		let mut mesh: Self = serde_json::from_str(&string)?;
		mesh.lines = mesh.lines.into_iter().map(|(e, m)| (sorted(e), m)).collect();
		if let Some(m) = &mesh.cell_markers {
			check_len("cell markers", mesh.cells.len(), m.len())?;
		}
		Ok(mesh)
	}

	pub fn add_line(&mut self, edge: [usize; 2], marker: Marker) {
		self.lines.insert(sorted(edge), marker);
	}

	pub fn name(&mut self, name: &str, marker: Marker) {
		self.names.insert(name.to_string(), marker);
	}

	pub fn marker_of(&self, name: &str) -> Result<Marker> {
		self.names
			.get_by_left(name)
			.copied()
			.ok_or_else(|| Error::UnknownMarkerName(name.to_string()))
	}

	pub fn name_of(&self, marker: Marker) -> Option<&str> {
		self.names.get_by_right(&marker).map(String::as_str)
	}

	/// Per-name style keys replaced by the marker they name.
	pub fn resolve_named<T: Clone>(&self, arg: &HashMap<String, T>) -> Result<StyleArg<T>> {
		let mut map = HashMap::with_capacity(arg.len());
		for (name, v) in arg {
			map.insert(self.marker_of(name)?, v.clone());
		}
		Ok(StyleArg::PerMarker(map))
	}

	fn compute_face_markers(&self) -> Vec<[Marker; 3]> {
		self.cells
			.iter()
			.map(|cell| {
				FACES.map(|(a, b)| {
					self.lines
						.get(&sorted([cell[a], cell[b]]))
						.copied()
						.unwrap_or(self.unmarked_face_marker)
				})
			})
			.collect()
	}

	pub fn to_array_mesh(&self) -> ArrayMesh {
		ArrayMesh {
			vertices: self.vertices.clone(),
			cells: self.cells.clone(),
			cell_markers: self.cell_markers.clone(),
			face_markers: self.face_markers().map(Cow::into_owned),
		}
	}
}

impl MeshSource for TaggedMesh {
	fn vertices(&self) -> &[V2] {
		&self.vertices
	}

	fn cells(&self) -> &[[usize; 3]] {
		&self.cells
	}

	fn cell_markers(&self) -> Option<&[Marker]> {
		self.cell_markers.as_deref()
	}

	fn face_markers(&self) -> Option<Cow<'_, [[Marker; 3]]>> {
		// no line elements at all means unmarked, not `unmarked_face_marker`
		if self.lines.is_empty() {
			None
		} else {
			Some(Cow::Owned(self.compute_face_markers()))
		}
	}
}
