// closed boundary polyline, one marker per segment
use log::debug;

use crate::error::check_len;
use crate::geometry::{FeatureCollection, Geometry, Grouped, LineString, LineStyle, Properties};
use crate::markers::{unique_markers, StyleArg, StyleTable};
use crate::sink::{Layer, Overlay};
use crate::transform::Transform;
use crate::{Error, Marker, Result, V2};

pub const DEFAULT_COLOR: &str = "black";
pub const DEFAULT_WEIGHT: u32 = 1;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DomainStyle {
	pub colors: StyleArg<String>,
	pub weights: StyleArg<u32>,
}

// consecutive segments with the same marker
struct Run {
	marker: Marker,
	line: LineString,
}

pub fn convert_domain(
	transform: &dyn Transform,
	vertices: &[V2],
	segment_markers: &[Marker],
	colors: &StyleTable<String>,
	weights: &StyleTable<u32>,
) -> Result<FeatureCollection> {
	check_len("segment markers", vertices.len().saturating_sub(1), segment_markers.len())?;
	let points: Vec<_> = vertices.iter().map(|p| transform.position(*p)).collect();
	if points.len() < 2 {
		return Err(Error::shape_mismatch("domain vertices", 2, points.len()));
	}
	let mut lines: Grouped<Marker, LineString> = Grouped::default();
	let mut flush = |run: Run| {
		let marker = run.marker;
		lines.push(marker, run.line, || {
			Properties::Line(LineStyle {
				color: colors[marker].clone(),
				weight: weights[marker],
			})
		});
	};

	let mut run = Run {
		marker: segment_markers[0],
		line: vec![points[0]],
	};
	for (i, &marker) in segment_markers.iter().enumerate() {
		if marker != run.marker {
			// the next run starts where this one ended
			let next = Run {
				marker,
				line: vec![points[i]],
			};
			flush(std::mem::replace(&mut run, next));
		}
		run.line.push(points[i + 1]);
	}
	flush(run);
	debug!("domain: {} segments -> {} groups", segment_markers.len(), lines.len());
	Ok(FeatureCollection {
		features: lines.into_features(Geometry::MultiLineString).collect(),
	})
}

pub fn domain_overlay(
	transform: &dyn Transform,
	vertices: &[V2],
	segment_markers: Option<&[Marker]>,
	style: &DomainStyle,
) -> Result<Overlay> {
	let segments = vertices.len().saturating_sub(1);
	let markers = match segment_markers {
		Some(m) => {
			check_len("segment markers", segments, m.len())?;
			m.to_vec()
		}
		None => vec![0; segments],
	};
	let present = unique_markers(markers.iter().copied());
	let colors = style.colors.resolve(DEFAULT_COLOR.to_string(), &present)?;
	let weights = style.weights.resolve(DEFAULT_WEIGHT, &present)?;
	let collection = convert_domain(transform, vertices, &markers, &colors, &weights)?;
	Ok(Overlay {
		layer: Layer {
			collection,
			arrowheads: None,
		},
		legends: colors.legend(&present, None, "Segment markers").into_iter().collect(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transform::Identity;

	#[test]
	fn too_few_vertices() {
		let err = domain_overlay(&Identity, &[V2::zeros()], None, &DomainStyle::default()).unwrap_err();
		assert!(matches!(err, Error::ShapeMismatch { what: "domain vertices", .. }));
	}

	#[test]
	fn marker_count_must_match_segments() {
		let vs = [V2::zeros(), V2::new(1.0, 0.0), V2::zeros()];
		let err = domain_overlay(&Identity, &vs, Some(&[1]), &DomainStyle::default()).unwrap_err();
		assert!(matches!(err, Error::ShapeMismatch { expected: 2, actual: 1, .. }));
	}
}
