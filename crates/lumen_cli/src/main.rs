use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::TextureCache;
use lumen_renderer::render;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

mod scene;
mod settings;

use settings::RenderSettings;

#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Render the built-in demo scene or an OBJ model", long_about = None)]
struct Args {
    /// Camera and render settings (JSON). Missing fields use defaults
    #[arg(short, long, value_name = "FILE.json")]
    settings: Option<PathBuf>,

    /// Render an OBJ model instead of the built-in demo scene
    #[arg(short = 'm', long, value_name = "MODEL.obj")]
    obj: Option<PathBuf>,

    /// Output image; the format follows the extension
    #[arg(short, long, value_name = "IMAGE.png", default_value = "render.png")]
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => RenderSettings::load(path)?,
        None => RenderSettings::default(),
    };
    if settings.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(settings.threads)
            .build_global()
            .context("configuring render threads")?;
    }

    log::info!("Starting Lumen");
    let start = Instant::now();
    let mut textures = TextureCache::new();
    let floor_texture = settings.floor_texture.as_deref();
    let world = match &args.obj {
        Some(path) => scene::obj_scene(path, &mut textures, floor_texture)?,
        None => scene::demo_scene(&mut textures, floor_texture)?,
    };
    log::info!("Scene ready in {:.2?}", start.elapsed());

    let camera = settings.camera()?;
    // No signal handler is installed, so the flag stays false
    let cancel = AtomicBool::new(false);
    let canvas = render(&world, &camera, &settings.render_config(), &cancel)?;

    canvas
        .save(&args.out)
        .with_context(|| format!("saving {}", args.out.display()))?;
    log::info!("Saved {}", args.out.display());
    Ok(())
}
