use thiserror::Error;

use crate::Marker;

#[derive(Error, Debug)]
pub enum Error {
	/// An input array does not have the length implied by the mesh.
	#[error("shape mismatch for {what}: expected {expected}, got {actual}")]
	ShapeMismatch {
		what: &'static str,
		expected: usize,
		actual: usize,
	},

	#[error("marker {0} is negative")]
	NegativeMarker(Marker),

	// the dense style table for it cannot be allocated
	#[error("marker {0} is too large")]
	MarkerTooLarge(Marker),

	#[error("cell {cell} references vertex {vertex}, but the mesh has {count} vertices")]
	VertexOutOfRange {
		cell: usize,
		vertex: usize,
		count: usize,
	},

	#[error("unknown marker name {0:?}")]
	UnknownMarkerName(String),

	#[error("invalid mode {0:?}")]
	InvalidMode(String),

	#[error("invalid levels: {0}")]
	InvalidLevels(String),

	#[error("unknown colormap {0:?}")]
	UnknownColormap(String),

	#[error("field has no values")]
	EmptyField,

	/// The contour routine returned data that cannot be split into rings.
	#[error("malformed contour output: {0}")]
	MalformedContour(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
	pub fn shape_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
		Self::ShapeMismatch {
			what,
			expected,
			actual,
		}
	}
}

pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
	if expected == actual {
		Ok(())
	} else {
		Err(Error::shape_mismatch(what, expected, actual))
	}
}
