// json description of what to draw on top of a tagged mesh
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::colormap::Segmented;
use crate::domain::DomainStyle;
use crate::field::{FieldMode, FieldStyle, Levels};
use crate::markers::StyleArg;
use crate::mesh::MeshStyle;
use crate::plotter::Plotter;
use crate::sink::Sink;
use crate::source::{FieldValues, TaggedMesh};
use crate::transform::{Affine, Identity, WebMercator};
use crate::{Error, Marker, Result, M2, V2};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformConfig {
	#[default]
	Identity,
	WebMercator,
	Affine {
		// row major
		matrix: [[f64; 2]; 2],
		#[serde(default)]
		offset: [f64; 2],
	},
}

impl TransformConfig {
	pub fn plotter(&self) -> Plotter {
		match self {
			TransformConfig::Identity => Plotter::with_transform(Identity),
			TransformConfig::WebMercator => Plotter::with_transform(WebMercator),
			TransformConfig::Affine { matrix, offset } => Plotter::with_transform(Affine::new(
				M2::new(matrix[0][0], matrix[0][1], matrix[1][0], matrix[1][1]),
				V2::new(offset[0], offset[1]),
			)),
		}
	}
}

/// A style value for every marker, or per marker keyed by id or by
/// physical group name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleSpec<T> {
	Uniform(T),
	PerKey(HashMap<String, T>),
}

impl<T: Clone> StyleSpec<T> {
	pub fn resolve(spec: &Option<Self>, mesh: &TaggedMesh) -> Result<StyleArg<T>> {
		let per_key = match spec {
			None => return Ok(StyleArg::Unset),
			Some(StyleSpec::Uniform(v)) => return Ok(StyleArg::Uniform(v.clone())),
			Some(StyleSpec::PerKey(map)) => map,
		};
		let mut map = HashMap::with_capacity(per_key.len());
		for (key, v) in per_key {
			let marker = match key.parse::<Marker>() {
				Ok(m) => m,
				Err(_) => mesh.marker_of(key)?,
			};
			map.insert(marker, v.clone());
		}
		Ok(StyleArg::PerMarker(map))
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
	#[serde(default)]
	pub cell_colors: Option<StyleSpec<String>>,
	#[serde(default)]
	pub face_colors: Option<StyleSpec<String>>,
	#[serde(default)]
	pub face_weights: Option<StyleSpec<u32>>,
}

impl MeshConfig {
	pub fn style(&self, mesh: &TaggedMesh) -> Result<MeshStyle> {
		Ok(MeshStyle {
			cell_colors: StyleSpec::resolve(&self.cell_colors, mesh)?,
			face_colors: StyleSpec::resolve(&self.face_colors, mesh)?,
			face_weights: StyleSpec::resolve(&self.face_weights, mesh)?,
		})
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
	pub vertices: Vec<V2>,
	#[serde(default)]
	pub segment_markers: Option<Vec<Marker>>,
	#[serde(default)]
	pub colors: Option<StyleSpec<String>>,
	#[serde(default)]
	pub weights: Option<StyleSpec<u32>>,
}

impl DomainConfig {
	pub fn style(&self, mesh: &TaggedMesh) -> Result<DomainStyle> {
		Ok(DomainStyle {
			colors: StyleSpec::resolve(&self.colors, mesh)?,
			weights: StyleSpec::resolve(&self.weights, mesh)?,
		})
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
	pub values: FieldValues,
	// parsed in `style`, so bad values surface as argument errors
	#[serde(default)]
	pub mode: Option<String>,
	#[serde(default)]
	pub levels: Option<serde_json::Value>,
	#[serde(default)]
	pub cmap: Option<String>,
	#[serde(default)]
	pub scale: Option<f64>,
	#[serde(default)]
	pub name: Option<String>,
}

impl FieldConfig {
	pub fn style(&self) -> Result<FieldStyle> {
		let cmap = match &self.cmap {
			Some(name) => Segmented::by_name(name)?,
			None => Segmented::jet(),
		};
		let mode = match &self.mode {
			Some(m) => m.parse::<FieldMode>()?,
			None => FieldMode::default(),
		};
		let levels = match &self.levels {
			Some(v) => Levels::deserialize(v)
				.map_err(|_| Error::InvalidLevels(format!("expected a count or a list of numbers, got {}", v)))?,
			None => Levels::default(),
		};
		Ok(FieldStyle {
			mode,
			levels,
			cmap,
			scale: self.scale.unwrap_or(1.0),
			name: self.name.clone(),
		})
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
	#[serde(default)]
	pub transform: TransformConfig,
	// whether to draw the mesh itself
	#[serde(default)]
	pub mesh: Option<MeshConfig>,
	#[serde(default)]
	pub domain: Option<DomainConfig>,
	#[serde(default)]
	pub fields: Vec<FieldConfig>,
}

impl PlotConfig {
	pub fn load<P: AsRef<Path>>(file: P) -> Result<Self> {
		let string: String = std::fs::read_to_string(file)?;
		Ok(serde_json::from_str(&string)?)
	}

	// Fields first, then the mesh and domain outlines on top of them.
	pub fn render(&self, mesh: &TaggedMesh, sink: &mut dyn Sink) -> Result<()> {
		let plotter = self.transform.plotter();
		for field in &self.fields {
			let style = field.style()?;
			info!("adding {} field", style.mode);
			plotter.add_field_to(sink, mesh, &field.values, &style)?;
		}
		if let Some(m) = &self.mesh {
			info!("adding mesh with {} cells", mesh.cells.len());
			plotter.add_mesh_to(sink, mesh, &m.style(mesh)?)?;
		}
		if let Some(d) = &self.domain {
			info!("adding domain with {} vertices", d.vertices.len());
			plotter.add_domain_to(sink, &d.vertices, d.segment_markers.as_deref(), &d.style(mesh)?)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn style_keys_are_ids_or_names() {
		let mut mesh = TaggedMesh::default();
		mesh.name("wall", 4);
		let spec: Option<StyleSpec<String>> =
			serde_json::from_value(json!({"1": "blue", "wall": "red"})).unwrap();
		let arg = StyleSpec::resolve(&spec, &mesh).unwrap();
		assert_eq!(arg, StyleArg::per_marker([(1, "blue"), (4, "red")]));
		let spec: Option<StyleSpec<u32>> = serde_json::from_value(json!(3)).unwrap();
		assert_eq!(StyleSpec::resolve(&spec, &mesh).unwrap(), StyleArg::Uniform(3));
		assert_eq!(StyleSpec::<u32>::resolve(&None, &mesh).unwrap(), StyleArg::Unset);
	}

	#[test]
	fn unknown_name_fails() {
		let spec = Some(StyleSpec::PerKey(HashMap::from([("inlet".to_string(), 2u32)])));
		assert!(StyleSpec::resolve(&spec, &TaggedMesh::default()).is_err());
	}

	#[test]
	fn wrong_value_type_fails_to_parse() {
		let r: std::result::Result<MeshConfig, _> =
			serde_json::from_value(json!({"face_weights": {"1": "thick"}}));
		assert!(r.is_err());
	}

	#[test]
	fn parses_full_config() {
		let config: PlotConfig = serde_json::from_value(json!({
			"transform": {"affine": {"matrix": [[2.0, 0.0], [0.0, 2.0]]}},
			"mesh": {"face_colors": "red"},
			"fields": [{"values": [0.0, 1.0], "mode": "contour", "levels": 3, "cmap": "hot"}],
		}))
		.unwrap();
		assert_eq!(
			config.transform,
			TransformConfig::Affine {
				matrix: [[2.0, 0.0], [0.0, 2.0]],
				offset: [0.0, 0.0],
			}
		);
		let style = config.fields[0].style().unwrap();
		assert_eq!(style.mode, FieldMode::Contour);
		assert_eq!(style.levels, Levels::Count(3));
		assert_eq!(style.cmap.name, "hot");
		assert!(config.domain.is_none());
		assert_eq!(TransformConfig::default().plotter().transform().position(V2::new(1.0, 2.0)), [1.0, 2.0]);
	}

	#[test]
	fn unknown_mode_is_an_invalid_mode() {
		let config: PlotConfig =
			serde_json::from_value(json!({"fields": [{"values": [0.0], "mode": "surface"}]})).unwrap();
		let err = config.fields[0].style().unwrap_err();
		assert!(matches!(err, Error::InvalidMode(m) if m == "surface"));
		let err = config.render(&TaggedMesh::default(), &mut crate::GeoMap::default()).unwrap_err();
		assert!(matches!(err, Error::InvalidMode(_)));
	}

	#[test]
	fn wrongly_typed_levels_are_invalid_levels() {
		for levels in [json!("many"), json!(-2), json!([0.0, "one"])] {
			let field: FieldConfig = serde_json::from_value(json!({"values": [0.0], "levels": levels})).unwrap();
			assert!(matches!(field.style(), Err(Error::InvalidLevels(_))));
		}
		let field: FieldConfig = serde_json::from_value(json!({"values": [0.0], "levels": [0.0, 0.5]})).unwrap();
		assert_eq!(field.style().unwrap().levels, Levels::Values(vec![0.0, 0.5]));
	}

	#[test]
	fn unknown_colormap() {
		let field: FieldConfig = serde_json::from_value(json!({"values": [0.0], "cmap": "parula"})).unwrap();
		assert!(matches!(field.style(), Err(Error::UnknownColormap(c)) if c == "parula"));
	}
}
