//! Styled GeoJSON overlays for triangular finite element meshes, their
//! markers and nodal fields.

pub mod colormap;
pub mod config;
pub mod contour;
pub mod domain;
pub mod error;
pub mod field;
pub mod geometry;
pub mod markers;
pub mod mesh;
pub mod plotter;
pub mod sink;
pub mod source;
pub mod transform;

pub type V2 = nalgebra::Vector2<f64>;
pub type M2 = nalgebra::Matrix2<f64>;

// subdomain / boundary tag, must be non-negative when styled
pub type Marker = i64;

pub use error::{Error, Result};
pub use plotter::Plotter;
pub use sink::{GeoMap, Sink};
