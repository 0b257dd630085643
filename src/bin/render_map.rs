use femlium::config::PlotConfig;
use femlium::source::TaggedMesh;
use femlium::GeoMap;
use log::info;

fn main() -> femlium::Result<()> {
	env_logger::init();
	let args = std::env::args().collect::<Vec<_>>();
	if args.len() < 3 {
		eprintln!("usage: {} <mesh.json> <config.json> [out.json]", args[0]);
		std::process::exit(2);
	}
	let mesh = TaggedMesh::load(&args[1])?;
	info!("mesh: {} vertices, {} cells", mesh.vertices.len(), mesh.cells.len());
	let config = PlotConfig::load(&args[2])?;
	let mut map = GeoMap::default();
	config.render(&mesh, &mut map)?;
	let path = if args.len() == 3 {
		format!("{}.map.json", args[1].strip_suffix(".json").unwrap_or(&args[1]))
	} else {
		args[3].to_string()
	};
	map.save(&path)?;
	info!("{} layers, {} legends -> {}", map.layers.len(), map.legends.len(), path);
	Ok(())
}
