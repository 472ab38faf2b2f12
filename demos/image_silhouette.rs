//! Run the flat effect over a user-supplied silhouette image.
//!
//! The image uses the marker-channel convention: green pixels become face
//! particles, red shadow, red+green highlight, blue symbol. Usage:
//!
//! ```sh
//! cargo run --example image_silhouette -- path/to/silhouette.png
//! ```

use pixelfield::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: image_silhouette <path-to-rgba-image>")?;
    let silhouette = Silhouette::from_path(&path)?;
    if silhouette.is_empty() {
        eprintln!("warning: no opaque marker pixels classified in {}", path);
    }
    run_titled(
        silhouette,
        EffectConfig::coin_2d(),
        42,
        "pixelfield - image silhouette",
    )?;
    Ok(())
}
