//! Nodal scalar and vector fields as iso-lines, filled bands or arrows.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::colormap::{to_hex, Colormap, Lut, Normalize, Segmented};
use crate::contour::{ContourGenerator, TriContourGenerator};
use crate::error::check_len;
use crate::geometry::{
	BandStyle, FeatureCollection, Geometry, Grouped, LineString, LineStyle, Polygon, Properties,
};
use crate::sink::{Arrowheads, Layer, Legend, Overlay};
use crate::transform::Transform;
use crate::{Error, Result, V2};

pub const LINE_WEIGHT: u32 = 2;
pub const DEFAULT_LEVELS: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
	Contour,
	#[default]
	Contourf,
	// vector fields only
	Quiver,
}

impl FromStr for FieldMode {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"contour" => Ok(Self::Contour),
			"contourf" => Ok(Self::Contourf),
			"quiver" => Ok(Self::Quiver),
			_ => Err(Error::InvalidMode(s.to_string())),
		}
	}
}

impl fmt::Display for FieldMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Contour => "contour",
			Self::Contourf => "contourf",
			Self::Quiver => "quiver",
		})
	}
}

/// Either a number of evenly spaced levels between the field's extrema, or
/// the levels themselves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Levels {
	Count(usize),
	Values(Vec<f64>),
}

impl Default for Levels {
	fn default() -> Self {
		Self::Count(DEFAULT_LEVELS)
	}
}

impl Levels {
	pub fn resolve(&self, field: &[f64]) -> Result<Vec<f64>> {
		match self {
			Levels::Count(0) => Err(Error::InvalidLevels("level count must be positive".to_string())),
			Levels::Count(n) => {
				let (min, max) = extrema(field).ok_or(Error::EmptyField)?;
				Ok(linspace(min, max, *n))
			}
			Levels::Values(v) if v.is_empty() => Err(Error::InvalidLevels("no levels given".to_string())),
			Levels::Values(v) => Ok(v.clone()),
		}
	}
}

fn extrema(field: &[f64]) -> Option<(f64, f64)> {
	let first = *field.first()?;
	Some(field.iter().fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
}

pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
	match n {
		0 => vec![],
		1 => vec![start],
		_ => {
			let step = (stop - start) / (n - 1) as f64;
			let mut v: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
			v[n - 1] = stop;
			v
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldStyle {
	pub mode: FieldMode,
	pub levels: Levels,
	pub cmap: Segmented,
	// arrow length per unit of field, quiver only
	pub scale: f64,
	pub name: Option<String>,
}

impl Default for FieldStyle {
	fn default() -> Self {
		Self {
			mode: FieldMode::default(),
			levels: Levels::default(),
			cmap: Segmented::jet(),
			scale: 1.0,
			name: None,
		}
	}
}

impl FieldStyle {
	pub fn with_mode(mode: FieldMode) -> Self {
		Self {
			mode,
			..Self::default()
		}
	}
}

/// Maps a value to the hex color of its level bin.
pub struct LevelColors<'a> {
	lut: Lut<'a>,
	norm: Normalize,
}

impl<'a> LevelColors<'a> {
	pub fn new(cmap: &'a dyn Colormap, levels: &[f64]) -> Self {
		let (first, last) = match (levels.first(), levels.last()) {
			(Some(&a), Some(&b)) => (a, b),
			_ => (0.0, 1.0),
		};
		Self {
			lut: Lut::new(cmap, levels.len()),
			norm: Normalize::new(first, last),
		}
	}

	pub fn color(&self, v: f64) -> String {
		to_hex(self.lut.rgb(self.norm.apply(v)))
	}
}

pub fn level_colors(cmap: &dyn Colormap, levels: &[f64]) -> Vec<String> {
	let colors = LevelColors::new(cmap, levels);
	levels.iter().map(|&l| colors.color(l)).collect()
}

pub fn contour_lines(
	gen: &dyn ContourGenerator,
	transform: &dyn Transform,
	levels: &[f64],
	colors: &[String],
) -> Result<FeatureCollection> {
	check_len("level colors", levels.len(), colors.len())?;
	let mut lines: Grouped<usize, LineString> = Grouped::default();
	for (lev, &level) in levels.iter().enumerate() {
		let curves = gen.create_contour(level);
		trace!("contour: level {} -> {} curves", level, curves.len());
		for curve in curves {
			if curve.len() < 2 {
				continue;
			}
			let coordinates = curve.iter().map(|p| transform.position(*p)).collect();
			lines.push(lev, coordinates, || {
				Properties::Line(LineStyle {
					color: colors[lev].clone(),
					weight: LINE_WEIGHT,
				})
			});
		}
	}
	Ok(FeatureCollection {
		features: lines.into_features(Geometry::MultiLineString).collect(),
	})
}

pub fn contour_bands(
	gen: &dyn ContourGenerator,
	transform: &dyn Transform,
	levels: &[f64],
	colors: &[String],
) -> Result<FeatureCollection> {
	check_len("level colors", levels.len(), colors.len())?;
	let mut polygons: Grouped<usize, Polygon> = Grouped::default();
	for lev in 0..levels.len().saturating_sub(1) {
		let rings = gen.create_filled_contour(levels[lev], levels[lev + 1]).rings()?;
		let mut dropped = 0;
		for mut ring in rings {
			if let Some(&first) = ring.first() {
				ring.push(first);
			}
			if ring.len() <= 2 {
				dropped += 1;
				continue;
			}
			let coordinates = ring.iter().map(|p| transform.position(*p)).collect();
			polygons.push(lev, vec![coordinates], || {
				Properties::Band(BandStyle {
					fill_color: colors[lev].clone(),
					fill_opacity: 1.0,
				})
			});
		}
		if dropped > 0 {
			warn!("contourf: dropped {} degenerate rings in band {}", dropped, lev);
		}
	}
	Ok(FeatureCollection {
		features: polygons.into_features(Geometry::MultiPolygon).collect(),
	})
}

/// One two-point segment per vertex, `p -> p + scale * v`, grouped by color.
pub fn quiver_lines(
	transform: &dyn Transform,
	vertices: &[V2],
	vectors: &[V2],
	scale: f64,
	color: impl Fn(f64) -> String,
) -> Result<FeatureCollection> {
	check_len("vector field", vertices.len(), vectors.len())?;
	let mut lines: Grouped<String, LineString> = Grouped::default();
	for (p, v) in vertices.iter().zip(vectors) {
		let c = color(v.norm());
		let segment = vec![transform.position(*p), transform.position(p + v * scale)];
		let key = c.clone();
		lines.push(key, segment, move || {
			Properties::Line(LineStyle {
				color: c,
				weight: LINE_WEIGHT,
			})
		});
	}
	Ok(FeatureCollection {
		features: lines.into_features(Geometry::MultiLineString).collect(),
	})
}

pub fn scalar_overlay(
	transform: &dyn Transform,
	vertices: &[V2],
	cells: &[[usize; 3]],
	field: &[f64],
	style: &FieldStyle,
) -> Result<Overlay> {
	let gen = TriContourGenerator::new(vertices, cells, field)?;
	let levels = style.levels.resolve(field)?;
	let colors = level_colors(&style.cmap, &levels);
	let collection = match style.mode {
		FieldMode::Contour => contour_lines(&gen, transform, &levels, &colors)?,
		FieldMode::Contourf => contour_bands(&gen, transform, &levels, &colors)?,
		FieldMode::Quiver => return Err(Error::InvalidMode(format!("{} on a scalar field", style.mode))),
	};
	debug!(
		"{}: {} levels -> {} features",
		style.mode,
		levels.len(),
		collection.len(),
	);
	let caption = style.name.as_deref().unwrap_or("Scalar field");
	Ok(Overlay {
		layer: Layer {
			collection,
			arrowheads: None,
		},
		legends: vec![Legend::new(colors, levels, caption)],
	})
}

pub fn vector_overlay(
	transform: &dyn Transform,
	vertices: &[V2],
	cells: &[[usize; 3]],
	vectors: &[V2],
	style: &FieldStyle,
) -> Result<Overlay> {
	check_len("vector field", vertices.len(), vectors.len())?;
	let magnitude: Vec<f64> = vectors.iter().map(|v| v.norm()).collect();
	let name = style.name.clone().unwrap_or_else(|| "Vector field".to_string());
	if style.mode != FieldMode::Quiver {
		let style = FieldStyle {
			name: Some(name),
			..style.clone()
		};
		return scalar_overlay(transform, vertices, cells, &magnitude, &style);
	}

	let levels = style.levels.resolve(&magnitude)?;
	let colors = LevelColors::new(&style.cmap, &levels);
	let collection = quiver_lines(transform, vertices, vectors, style.scale, |m| colors.color(m))?;
	debug!("quiver: {} vectors -> {} features", vectors.len(), collection.len());
	let legend_colors = levels.iter().map(|&l| colors.color(l)).collect();
	Ok(Overlay {
		layer: Layer {
			collection,
			arrowheads: Some(Arrowheads::end_only()),
		},
		legends: vec![Legend::new(legend_colors, levels, name)],
	})
}
