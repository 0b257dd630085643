use crate::geometry::Position;
use crate::{M2, V2};

// WGS84 semi-major axis, as used by EPSG:3857
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Maps input coordinates into the coordinate system of the map.
pub trait Transform {
	fn apply(&self, p: V2) -> V2;

	fn position(&self, p: V2) -> Position {
		let q = self.apply(p);
		[q[0], q[1]]
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Identity;

impl Transform for Identity {
	fn apply(&self, p: V2) -> V2 {
		p
	}
}

/// `p -> matrix * p + offset`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
	pub matrix: M2,
	pub offset: V2,
}

impl Affine {
	pub fn new(matrix: M2, offset: V2) -> Self {
		Self { matrix, offset }
	}

	pub fn offset(offset: V2) -> Self {
		Self::new(M2::identity(), offset)
	}

	pub fn scale(s: f64) -> Self {
		Self::new(M2::identity() * s, V2::zeros())
	}
}

impl Transform for Affine {
	fn apply(&self, p: V2) -> V2 {
		self.matrix * p + self.offset
	}
}

/// Spherical pseudo-mercator meters (EPSG:3857) to longitude/latitude degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WebMercator;

impl Transform for WebMercator {
	fn apply(&self, p: V2) -> V2 {
		let lon = (p[0] / EARTH_RADIUS).to_degrees();
		let lat = (2.0 * (p[1] / EARTH_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
		V2::new(lon, lat)
	}
}

/// Adapts any closure into a [`Transform`].
pub struct FnTransform<F>(pub F);

impl<F: Fn(V2) -> V2> Transform for FnTransform<F> {
	fn apply(&self, p: V2) -> V2 {
		(self.0)(p)
	}
}
