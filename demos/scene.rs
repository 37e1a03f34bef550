use lsys_render::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let scene_path = args
        .next()
        .unwrap_or_else(|| "demos/scenes/tree.ron".to_string());
    let output = args.next().unwrap_or_else(|| "scene.bmp".to_string());

    let scene = Scene::load(&scene_path)?;
    let canvas = scene.render_to_file(&output)?;

    // Small scenes are easier to eyeball in the terminal.
    if canvas.width() <= 80 {
        canvas.write_ascii(&mut std::io::stdout())?;
    }
    Ok(())
}
