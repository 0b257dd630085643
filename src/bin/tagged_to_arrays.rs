// resolve line elements into per-cell face markers
use femlium::source::TaggedMesh;
use log::info;

fn main() -> femlium::Result<()> {
	env_logger::init();
	let args = std::env::args().collect::<Vec<_>>();
	if args.len() != 3 {
		eprintln!("usage: {} <tagged.json> <arrays.json>", args[0]);
		std::process::exit(2);
	}
	let mesh = TaggedMesh::load(&args[1])?;
	let arrays = mesh.to_array_mesh();
	if arrays.face_markers.is_none() {
		info!("no line elements, face markers left unset");
	}
	arrays.save(&args[2])?;
	Ok(())
}
