// Quick debug tool to inspect OBJ mesh data before rendering
// Run with: cargo run --release --bin inspect_obj -- <path_to.obj>

use lumen_core::load_obj;
use std::env;

/// argv[0], or the tool name when the OS passes an empty argv.
fn program_name(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("inspect_obj")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("Usage: {} <path_to.obj>", program_name(&args));
        std::process::exit(1);
    };
    println!("Loading OBJ: {}", path);

    let meshes = load_obj(path)?;
    println!("\nFound {} mesh(es)", meshes.len());

    for (i, mesh) in meshes.iter().enumerate() {
        println!("\n=== Mesh {} ===", i);
        println!("Name: {}", mesh.name);
        println!("Vertices: {}", mesh.vertex_count());
        println!("Triangles: {}", mesh.triangle_count());
        match &mesh.normals {
            Some(normals) => println!("Normals: {} (smooth triangles)", normals.len()),
            None => println!("Normals: None (flat triangles)"),
        }
        println!("Bounds: {:?} .. {:?}", mesh.bounds.min, mesh.bounds.max);

        let mut degenerate = 0;
        for [a, b, c] in mesh.triangles() {
            let e1 = mesh.positions[b] - mesh.positions[a];
            let e2 = mesh.positions[c] - mesh.positions[a];
            if e2.cross(e1).length() < 1e-12 {
                degenerate += 1;
            }
        }
        if degenerate > 0 {
            println!("Degenerate triangles: {} (never hit)", degenerate);
        }
    }

    Ok(())
}
