// per-marker style arguments, expanded into dense tables indexed by marker
use std::collections::{BTreeSet, HashMap};
use std::ops::Index;

use crate::sink::Legend;
use crate::{Error, Marker, Result};

/// A style option as accepted by the plotting entry points.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StyleArg<T> {
	// fall back to the default everywhere
	#[default]
	Unset,
	Uniform(T),
	// markers missing from the map fall back to the default
	PerMarker(HashMap<Marker, T>),
}

impl<T> StyleArg<T> {
	pub fn per_marker<I, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (Marker, V)>,
		V: Into<T>,
	{
		Self::PerMarker(entries.into_iter().map(|(m, v)| (m, v.into())).collect())
	}
}

impl<T: Clone> StyleArg<T> {
	/// Dense table of length `max(markers) + 1`.
	pub fn resolve(&self, default: T, markers: &[Marker]) -> Result<StyleTable<T>> {
		if let Some(&m) = markers.iter().find(|&&m| m < 0) {
			return Err(Error::NegativeMarker(m));
		}
		let max = markers.iter().max().copied().unwrap_or(-1);
		let len = max
			.checked_add(1)
			.and_then(|n| usize::try_from(n).ok())
			.ok_or(Error::MarkerTooLarge(max))?;
		let mut values = Vec::new();
		values.try_reserve_exact(len).map_err(|_| Error::MarkerTooLarge(max))?;
		values.resize(len, default);
		for &m in markers {
			match self {
				StyleArg::Unset => {}
				StyleArg::Uniform(v) => values[m as usize] = v.clone(),
				StyleArg::PerMarker(map) => {
					if let Some(v) = map.get(&m) {
						values[m as usize] = v.clone();
					}
				}
			}
		}
		Ok(StyleTable { values })
	}
}

impl From<&str> for StyleArg<String> {
	fn from(v: &str) -> Self {
		Self::Uniform(v.to_string())
	}
}

impl From<String> for StyleArg<String> {
	fn from(v: String) -> Self {
		Self::Uniform(v)
	}
}

impl From<u32> for StyleArg<u32> {
	fn from(v: u32) -> Self {
		Self::Uniform(v)
	}
}

impl<T> From<HashMap<Marker, T>> for StyleArg<T> {
	fn from(map: HashMap<Marker, T>) -> Self {
		Self::PerMarker(map)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyleTable<T> {
	values: Vec<T>,
}

impl<T> StyleTable<T> {
	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn get(&self, marker: Marker) -> Option<&T> {
		usize::try_from(marker).ok().and_then(|m| self.values.get(m))
	}

	pub fn as_slice(&self) -> &[T] {
		&self.values
	}
}

impl<T> Index<Marker> for StyleTable<T> {
	type Output = T;

	fn index(&self, marker: Marker) -> &T {
		&self.values[marker as usize]
	}
}

impl StyleTable<String> {
	// Only markers in `present` contribute, colors equal to `exclude` are
	// dropped, and a single remaining color is not worth a legend.
	pub fn legend(&self, present: &[Marker], exclude: Option<&str>, caption: &str) -> Option<Legend> {
		let (colors, values): (Vec<String>, Vec<f64>) = present
			.iter()
			.filter_map(|&m| self.get(m).map(|c| (c, m)))
			.filter(|(c, _)| Some(c.as_str()) != exclude)
			.map(|(c, m)| (c.clone(), m as f64))
			.unzip();
		let distinct: BTreeSet<&String> = colors.iter().collect();
		if distinct.len() > 1 {
			Some(Legend::new(colors, values, caption))
		} else {
			None
		}
	}
}

/// Sorted distinct markers.
pub fn unique_markers<I: IntoIterator<Item = Marker>>(markers: I) -> Vec<Marker> {
	markers.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}
