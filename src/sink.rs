use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::geometry::FeatureCollection;
use crate::Result;

/// Arrow head decoration drawn by the map on line features.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrowheads {
	// opening angle in degrees
	pub yawn: u32,
	pub size: String,
	pub frequency: String,
	pub proportional_to_total: bool,
}

impl Default for Arrowheads {
	fn default() -> Self {
		Self {
			yawn: 60,
			size: "15%".to_string(),
			frequency: "allvertices".to_string(),
			proportional_to_total: false,
		}
	}
}

impl Arrowheads {
	pub fn end_only() -> Self {
		Self {
			frequency: "endonly".to_string(),
			..Self::default()
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
	pub collection: FeatureCollection,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub arrowheads: Option<Arrowheads>,
}

/// Linear color scale: `colors[i]` sits at `values[i]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Legend {
	pub colors: Vec<String>,
	pub values: Vec<f64>,
	pub caption: String,
}

impl Legend {
	pub fn new<S: Into<String>>(colors: Vec<String>, values: Vec<f64>, caption: S) -> Self {
		debug_assert_eq!(colors.len(), values.len());
		Self {
			colors,
			values,
			caption: caption.into(),
		}
	}

	pub fn vmin(&self) -> Option<f64> {
		self.values.first().copied()
	}

	pub fn vmax(&self) -> Option<f64> {
		self.values.last().copied()
	}

	pub fn domain(&self) -> Option<[f64; 2]> {
		Some([self.vmin()?, self.vmax()?])
	}
}

/// Receives the rendered layers and legends, in call order.
pub trait Sink {
	fn add_layer(&mut self, layer: Layer);
	fn add_legend(&mut self, legend: Legend);
}

/// Everything produced by one plotting call. Nothing reaches a sink until
/// assembly has succeeded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
	pub layer: Layer,
	pub legends: Vec<Legend>,
}

impl Overlay {
	pub fn add_to(self, sink: &mut dyn Sink) {
		sink.add_layer(self.layer);
		for legend in self.legends {
			sink.add_legend(legend);
		}
	}
}

/// In-memory map that can be written out as JSON for a renderer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoMap {
	pub layers: Vec<Layer>,
	pub legends: Vec<Legend>,
}

impl Sink for GeoMap {
	fn add_layer(&mut self, layer: Layer) {
		self.layers.push(layer);
	}

	fn add_legend(&mut self, legend: Legend) {
		self.legends.push(legend);
	}
}

impl GeoMap {
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
