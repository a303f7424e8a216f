//! Offline generator for labeled triangle training images.
//!
//! Reads the `[artist]` section of config.toml and writes a bundle of
//! PNG images plus a `triangles.json` label manifest.

use nibgrid::artist::ImageBundle;
use nibgrid::config::Config;
use std::path::Path;

fn main() {
    let config = Config::load();
    let artist = &config.artist;

    println!(
        "Generating {} images of {} triangles at {}x{} (seed {})",
        artist.batch_size,
        artist.num_triangles,
        artist.image_width,
        artist.image_height,
        config.env.seed
    );

    let bundle = ImageBundle::generate(
        artist.batch_size,
        artist.num_triangles,
        artist.image_width,
        artist.image_height,
        config.env.seed,
    );

    let out_dir = Path::new(&artist.output_dir);
    match bundle.save(out_dir) {
        Ok(()) => println!("Bundle saved to {}", out_dir.display()),
        Err(e) => {
            eprintln!("Failed to save bundle: {}", e);
            std::process::exit(1);
        }
    }
}
