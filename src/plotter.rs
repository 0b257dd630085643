use crate::domain::{domain_overlay, DomainStyle};
use crate::field::{scalar_overlay, vector_overlay, FieldStyle};
use crate::mesh::{mesh_overlay, MeshStyle};
use crate::sink::Sink;
use crate::source::{Field, FieldSource, MeshSource};
use crate::transform::{Identity, Transform};
use crate::{Marker, Result, V2};

/// Adds meshes, domains and fields to a map, all through one coordinate
/// transform.
pub struct Plotter {
	transform: Box<dyn Transform>,
}

impl Default for Plotter {
	fn default() -> Self {
		Self::new()
	}
}

impl Plotter {
	pub fn new() -> Self {
		Self {
			transform: Box::new(Identity),
		}
	}

	pub fn with_transform<T: Transform + 'static>(transform: T) -> Self {
		Self {
			transform: Box::new(transform),
		}
	}

	pub fn transform(&self) -> &dyn Transform {
		self.transform.as_ref()
	}

	pub fn add_mesh_to(&self, sink: &mut dyn Sink, mesh: &dyn MeshSource, style: &MeshStyle) -> Result<()> {
		let face_markers = mesh.face_markers();
		let overlay = mesh_overlay(
			self.transform(),
			mesh.vertices(),
			mesh.cells(),
			mesh.cell_markers(),
			face_markers.as_deref(),
			style,
		)?;
		overlay.add_to(sink);
		Ok(())
	}

	// `vertices` is a closed loop: first and last vertex coincide
	pub fn add_domain_to(
		&self,
		sink: &mut dyn Sink,
		vertices: &[V2],
		segment_markers: Option<&[Marker]>,
		style: &DomainStyle,
	) -> Result<()> {
		domain_overlay(self.transform(), vertices, segment_markers, style)?.add_to(sink);
		Ok(())
	}

	pub fn add_scalar_field_to(
		&self,
		sink: &mut dyn Sink,
		mesh: &dyn MeshSource,
		values: &[f64],
		style: &FieldStyle,
	) -> Result<()> {
		scalar_overlay(self.transform(), mesh.vertices(), mesh.cells(), values, style)?.add_to(sink);
		Ok(())
	}

	pub fn add_vector_field_to(
		&self,
		sink: &mut dyn Sink,
		mesh: &dyn MeshSource,
		vectors: &[V2],
		style: &FieldStyle,
	) -> Result<()> {
		vector_overlay(self.transform(), mesh.vertices(), mesh.cells(), vectors, style)?.add_to(sink);
		Ok(())
	}

	pub fn add_field_to(
		&self,
		sink: &mut dyn Sink,
		mesh: &dyn MeshSource,
		field: &dyn FieldSource,
		style: &FieldStyle,
	) -> Result<()> {
		match field.field() {
			Field::Scalar(values) => self.add_scalar_field_to(sink, mesh, values, style),
			Field::Vector(vectors) => self.add_vector_field_to(sink, mesh, vectors, style),
		}
	}
}
