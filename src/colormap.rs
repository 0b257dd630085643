use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub type Rgb = [f64; 3];

pub trait Colormap {
	// t in [0, 1], values outside are clamped
	fn rgb(&self, t: f64) -> Rgb;
}

/// (x, value left of x, value right of x), with x increasing from 0 to 1.
pub type Segment = (f64, f64, f64);

/// Piecewise linear colormap given per channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segmented {
	pub name: String,
	pub red: Vec<Segment>,
	pub green: Vec<Segment>,
	pub blue: Vec<Segment>,
}

const JET: [&[Segment]; 3] = [
	&[(0.0, 0.0, 0.0), (0.35, 0.0, 0.0), (0.66, 1.0, 1.0), (0.89, 1.0, 1.0), (1.0, 0.5, 0.5)],
	&[
		(0.0, 0.0, 0.0),
		(0.125, 0.0, 0.0),
		(0.375, 1.0, 1.0),
		(0.64, 1.0, 1.0),
		(0.91, 0.0, 0.0),
		(1.0, 0.0, 0.0),
	],
	&[(0.0, 0.5, 0.5), (0.11, 1.0, 1.0), (0.34, 1.0, 1.0), (0.65, 0.0, 0.0), (1.0, 0.0, 0.0)],
];

const HOT: [&[Segment]; 3] = [
	&[(0.0, 0.0416, 0.0416), (0.365079, 1.0, 1.0), (1.0, 1.0, 1.0)],
	&[(0.0, 0.0, 0.0), (0.365079, 0.0, 0.0), (0.746032, 1.0, 1.0), (1.0, 1.0, 1.0)],
	&[(0.0, 0.0, 0.0), (0.746032, 0.0, 0.0), (1.0, 1.0, 1.0)],
];

const COOL: [&[Segment]; 3] = [
	&[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
	&[(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
	&[(0.0, 1.0, 1.0), (1.0, 1.0, 1.0)],
];

const GRAY: [&[Segment]; 3] = [
	&[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
	&[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
	&[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
];

pub const NAMES: [&str; 4] = ["jet", "hot", "cool", "gray"];

impl Segmented {
	pub fn by_name(name: &str) -> Result<Self> {
		let data = match name {
			"jet" => JET,
			"hot" => HOT,
			"cool" => COOL,
			"gray" | "grey" => GRAY,
			_ => return Err(Error::UnknownColormap(name.to_string())),
		};
		Ok(Self {
			name: name.to_string(),
			red: data[0].to_vec(),
			green: data[1].to_vec(),
			blue: data[2].to_vec(),
		})
	}

	pub fn jet() -> Self {
		Self {
			name: "jet".to_string(),
			red: JET[0].to_vec(),
			green: JET[1].to_vec(),
			blue: JET[2].to_vec(),
		}
	}
}

impl Default for Segmented {
	fn default() -> Self {
		Self::jet()
	}
}

fn channel(segments: &[Segment], x: f64) -> f64 {
	let Some(&(_, _, first)) = segments.first() else {
		return 0.0;
	};
	for w in segments.windows(2) {
		let (x0, _, y0) = w[0];
		let (x1, y1, _) = w[1];
		if x < x1 {
			if x1 <= x0 {
				return y0;
			}
			return y0 + (x - x0) / (x1 - x0) * (y1 - y0);
		}
	}
	segments.last().map_or(first, |s| s.1)
}

impl Colormap for Segmented {
	fn rgb(&self, t: f64) -> Rgb {
		let t = t.clamp(0.0, 1.0);
		[channel(&self.red, t), channel(&self.green, t), channel(&self.blue, t)]
	}
}

/// `base` resampled to `n` discrete colors.
pub struct Lut<'a> {
	base: &'a dyn Colormap,
	n: usize,
}

impl<'a> Lut<'a> {
	pub fn new(base: &'a dyn Colormap, n: usize) -> Self {
		Self { base, n: n.max(1) }
	}

	pub fn index(&self, t: f64) -> usize {
		if t.is_nan() || t <= 0.0 {
			return 0;
		}
		((t * self.n as f64) as usize).min(self.n - 1)
	}
}

impl Colormap for Lut<'_> {
	fn rgb(&self, t: f64) -> Rgb {
		if self.n == 1 {
			return self.base.rgb(0.0);
		}
		let k = self.index(t);
		self.base.rgb(k as f64 / (self.n - 1) as f64)
	}
}

/// Linear map of `[vmin, vmax]` onto `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalize {
	pub vmin: f64,
	pub vmax: f64,
}

impl Normalize {
	pub fn new(vmin: f64, vmax: f64) -> Self {
		Self { vmin, vmax }
	}

	pub fn apply(&self, v: f64) -> f64 {
		if self.vmin == self.vmax {
			0.0
		} else {
			(v - self.vmin) / (self.vmax - self.vmin)
		}
	}
}

pub fn to_hex(rgb: Rgb) -> String {
	let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round_ties_even() as u8);
	format!("#{:02x}{:02x}{:02x}", r, g, b)
}
