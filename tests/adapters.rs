mod helpers;

use femlium::config::PlotConfig;
use femlium::geometry::Properties;
use femlium::mesh::MeshStyle;
use femlium::source::{ArrayMesh, MeshSource, TaggedMesh};
use femlium::{Error, GeoMap, Plotter, V2};
use helpers::{lines, square};
use serde_json::json;
use std::path::PathBuf;

fn temp_file(name: &str) -> PathBuf {
	std::env::temp_dir().join(format!("femlium-{}-{}.json", std::process::id(), name))
}

fn write_json(name: &str, value: serde_json::Value) -> PathBuf {
	let path = temp_file(name);
	std::fs::write(&path, value.to_string()).unwrap();
	path
}

fn tagged_square() -> serde_json::Value {
	json!({
		"vertices": [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
		"cells": [[0, 1, 2], [0, 2, 3]],
		"cell_markers": [1, 1],
		"lines": [[[2, 0], 5]],
		"names": {"wall": 5, "fluid": 1},
	})
}

#[test]
fn tagged_mesh_resolves_line_elements() {
	let path = write_json("tagged", tagged_square());
	let mesh = TaggedMesh::load(&path).unwrap();
	std::fs::remove_file(&path).unwrap();

	assert_eq!(mesh.marker_of("wall").unwrap(), 5);
	assert_eq!(mesh.name_of(1), Some("fluid"));
	assert!(matches!(mesh.marker_of("inlet"), Err(Error::UnknownMarkerName(_))));
	let faces = mesh.face_markers().unwrap();
	assert_eq!(faces.as_ref(), &[[0, 0, 5], [5, 0, 0]]);

	let arrays = mesh.to_array_mesh();
	assert_eq!(arrays.face_markers.as_deref(), Some(faces.as_ref()));
	let path = temp_file("arrays");
	arrays.save(&path).unwrap();
	assert_eq!(ArrayMesh::load(&path).unwrap(), arrays);
	std::fs::remove_file(&path).unwrap();
}

#[test]
fn tagged_mesh_with_bad_cell_markers_fails_to_load() {
	let mut value = tagged_square();
	value["cell_markers"] = json!([1]);
	let path = write_json("bad-markers", value);
	let err = TaggedMesh::load(&path).unwrap_err();
	std::fs::remove_file(&path).unwrap();
	assert!(matches!(err, Error::ShapeMismatch { what: "cell markers", .. }));
}

#[test]
fn missing_file_is_an_io_error() {
	assert!(matches!(TaggedMesh::load(temp_file("missing")), Err(Error::Io(_))));
}

#[test]
fn tagged_and_array_meshes_plot_alike() {
	let path = write_json("alike", tagged_square());
	let tagged = TaggedMesh::load(&path).unwrap();
	std::fs::remove_file(&path).unwrap();
	let style = MeshStyle {
		face_colors: tagged.resolve_named(&[("wall".to_string(), "red".to_string())].into()).unwrap(),
		..MeshStyle::default()
	};
	let plotter = Plotter::new();
	let mut a = GeoMap::default();
	plotter.add_mesh_to(&mut a, &tagged, &style).unwrap();
	let mut b = GeoMap::default();
	plotter.add_mesh_to(&mut b, &tagged.to_array_mesh(), &style).unwrap();
	assert_eq!(a, b);
}

#[test]
fn config_renders_fields_then_mesh_then_domain() {
	let mesh_path = write_json("render-mesh", tagged_square());
	let mesh = TaggedMesh::load(&mesh_path).unwrap();
	std::fs::remove_file(&mesh_path).unwrap();
	let config_path = write_json(
		"render-config",
		json!({
			"transform": "identity",
			"fields": [{"values": [0.0, 1.0, 2.0, 1.0], "mode": "contour", "levels": [1.0]}],
			"mesh": {"face_colors": {"wall": "red"}, "face_weights": 2},
			"domain": {"vertices": [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]},
		}),
	);
	let config = PlotConfig::load(&config_path).unwrap();
	std::fs::remove_file(&config_path).unwrap();

	let mut map = GeoMap::default();
	config.render(&mesh, &mut map).unwrap();
	assert_eq!(map.layers.len(), 3);

	let field = &map.layers[0].collection;
	assert_eq!(lines(&field.features[0]), &[vec![[1.0, 0.0], [0.5, 0.5], [0.0, 1.0]]]);

	let mesh_layer = &map.layers[1].collection;
	// both cells carry the wall on their diagonal
	assert_eq!(mesh_layer.polygons().count(), 1);
	let faces: Vec<_> = mesh_layer.lines().collect();
	assert_eq!(faces.len(), 2);
	assert_eq!(faces[0].properties.color(), Some("black"));
	assert_eq!(lines(faces[0]).len(), 4);
	assert_eq!(faces[1].properties.color(), Some("red"));
	assert_eq!(lines(faces[1]), &[vec![[0.0, 0.0], [1.0, 1.0]], vec![[0.0, 0.0], [1.0, 1.0]]]);
	assert!(faces.iter().all(|f| f.properties.weight() == Some(2)));

	let domain = &map.layers[2].collection;
	assert_eq!(domain.len(), 1);

	let captions: Vec<_> = map.legends.iter().map(|l| l.caption.as_str()).collect();
	assert_eq!(captions, vec!["Scalar field", "Face markers"]);
	assert_eq!(map.legends[1].domain(), Some([0.0, 5.0]));

	let out = temp_file("render-out");
	map.save(&out).unwrap();
	let reloaded = GeoMap::load(&out).unwrap();
	std::fs::remove_file(&out).unwrap();
	assert_eq!(reloaded, map);
	assert!(matches!(reloaded.layers[1].collection.features[0].properties, Properties::Cell(_)));
	assert!(matches!(reloaded.layers[1].collection.features[1].properties, Properties::Face(_)));
}

#[test]
fn config_with_unknown_name_fails_before_drawing() {
	let mesh = TaggedMesh::new(square().vertices, square().cells);
	let config: PlotConfig = serde_json::from_value(json!({
		"mesh": {"cell_colors": {"solid": "grey"}},
	}))
	.unwrap();
	let mut map = GeoMap::default();
	let err = config.render(&mesh, &mut map).unwrap_err();
	assert!(matches!(err, Error::UnknownMarkerName(n) if n == "solid"));
	assert!(map.layers.is_empty());
}

#[test]
fn web_mercator_config() {
	let mesh = TaggedMesh::new(
		vec![V2::zeros(), V2::new(1000.0, 0.0), V2::new(0.0, 1000.0)],
		vec![[0, 1, 2]],
	);
	let config: PlotConfig = serde_json::from_value(json!({"transform": "web_mercator", "mesh": {}})).unwrap();
	let mut map = GeoMap::default();
	config.render(&mesh, &mut map).unwrap();
	let ring = &helpers::polygons(&map.layers[0].collection.features[0])[0][0];
	assert!(ring[0][0].abs() < 1e-12 && ring[0][1].abs() < 1e-12);
	assert!(ring[1][0] > 0.0 && ring[1][0] < 0.01);
	assert!(ring[2][1] > 0.0 && ring[2][1] < 0.01);
}
