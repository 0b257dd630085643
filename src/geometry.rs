//! GeoJSON feature collections with the style properties read by the map's
//! style callback.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

pub type Position = [f64; 2];
pub type Ring = Vec<Position>;
pub type Polygon = Vec<Ring>;
pub type LineString = Vec<Position>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
	MultiPolygon(Vec<Polygon>),
	MultiLineString(Vec<LineString>),
}

impl Geometry {
	// number of polygons or line strings
	pub fn len(&self) -> usize {
		match self {
			Geometry::MultiPolygon(ps) => ps.len(),
			Geometry::MultiLineString(ls) => ls.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Polygon of a mesh cell. Boundary fields are null when the cell's faces are
/// drawn as standalone lines, fill fields are null for uncolored cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
	pub stroke: bool,
	pub color: Option<String>,
	pub weight: Option<u32>,
	pub fill: bool,
	pub fill_color: Option<String>,
	pub fill_opacity: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceStyle {
	pub stroke: bool,
	pub color: String,
	pub weight: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
	pub color: String,
	pub weight: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandStyle {
	pub fill_color: String,
	pub fill_opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Properties {
	Cell(CellStyle),
	Face(FaceStyle),
	Line(LineStyle),
	Band(BandStyle),
}

impl Properties {
	pub fn color(&self) -> Option<&str> {
		match self {
			Properties::Cell(s) => s.color.as_deref(),
			Properties::Face(s) => Some(&s.color),
			Properties::Line(s) => Some(&s.color),
			Properties::Band(_) => None,
		}
	}

	pub fn weight(&self) -> Option<u32> {
		match self {
			Properties::Cell(s) => s.weight,
			Properties::Face(s) => Some(s.weight),
			Properties::Line(s) => Some(s.weight),
			Properties::Band(_) => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
	pub geometry: Geometry,
	pub properties: Properties,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
	pub features: Vec<Feature>,
}

impl FeatureCollection {
	pub fn len(&self) -> usize {
		self.features.len()
	}

	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	pub fn polygons(&self) -> impl Iterator<Item = &Feature> {
		self.features
			.iter()
			.filter(|f| matches!(f.geometry, Geometry::MultiPolygon(_)))
	}

	pub fn lines(&self) -> impl Iterator<Item = &Feature> {
		self.features
			.iter()
			.filter(|f| matches!(f.geometry, Geometry::MultiLineString(_)))
	}
}

// Parts grouped by key in first-seen order. The style of a group is computed
// once, from its key, when the key first appears.
pub(crate) struct Grouped<K, P> {
	index: HashMap<K, usize>,
	groups: Vec<(Properties, Vec<P>)>,
}

impl<K: Eq + Hash, P> Default for Grouped<K, P> {
	fn default() -> Self {
		Self {
			index: HashMap::new(),
			groups: Vec::new(),
		}
	}
}

impl<K: Eq + Hash, P> Grouped<K, P> {
	pub fn push<F: FnOnce() -> Properties>(&mut self, key: K, part: P, style: F) {
		let idx = match self.index.get(&key) {
			Some(&idx) => idx,
			None => {
				self.groups.push((style(), Vec::new()));
				self.index.insert(key, self.groups.len() - 1);
				self.groups.len() - 1
			}
		};
		self.groups[idx].1.push(part);
	}

	pub fn len(&self) -> usize {
		self.groups.len()
	}

	pub fn into_features<G: Fn(Vec<P>) -> Geometry>(self, geometry: G) -> impl Iterator<Item = Feature> {
		self.groups.into_iter().map(move |(properties, parts)| Feature {
			geometry: geometry(parts),
			properties,
		})
	}
}
