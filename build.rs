//! Build script for the MovieFan catalog CLI.
//!
//! Installs the `.env.example` template next to the place the application reads
//! its `.env` from, so a fresh install has a documented starting point.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into `<data_local_dir>/moviefan/`.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/moviefan/.env.example`
/// - macOS: `~/Library/Application Support/moviefan/.env.example`
/// - Windows: `%LOCALAPPDATA%/moviefan/.env.example`
///
/// A missing template only produces a cargo warning. An existing `.env` is
/// never touched.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("moviefan");
    fs::create_dir_all(&out_dir)?;

    if template.is_file() {
        fs::copy(&template, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
