//! Lorenz iso-surface generator
//!
//! Builds the visit-density surface of the Lorenz attractor and writes it as a mesh file.

use std::error::Error;
use std::process;

use lorenz_iso::build_iso_surface;
use lorenz_iso::config::{AppConfig, MeshFormat};

fn run(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let params = config.to_iso_surface_params();
    let surface = build_iso_surface(&params)?;

    let path = &config.output.path;
    match config.output.format {
        MeshFormat::Obj => surface.mesh.save_obj(path)?,
        MeshFormat::Ron => surface.mesh.save_ron(path)?,
    }

    log::info!(
        "Wrote {} triangles to {}",
        surface.mesh.triangle_count(),
        path.display()
    );
    Ok(())
}

fn main() {
    // Logger isn't up yet, so hold on to the error until it is
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        process::exit(1);
    }
}
