//! Persist a settings table to disk and load it back, both as a dynamic
//! value and as a typed struct.
//!
//! Run with: cargo run --example persist_settings

use serde::Deserialize;
use std::error::Error;
use tabletext::fs::{load, load_as, persist};
use tabletext::{table, Options};

#[derive(Debug, Deserialize)]
struct Settings {
    name: String,
    volume: u8,
    recent: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join("tabletext-settings.lua");

    let settings = table!({
        "name": "main",
        "volume": 7,
        "recent": ["notes.txt", "todo.txt"]
    });

    persist(&settings, &path, &Options::new().with_name("settings"))?;
    println!("Wrote {}:\n{}", path.display(), std::fs::read_to_string(&path)?);

    let value = load(&path)?;
    println!("volume = {:?}", value.get("volume"));

    let typed: Settings = load_as(&path)?;
    println!("typed: {:?}", typed);
    assert_eq!(typed.recent.len(), 2);

    std::fs::remove_file(&path)?;
    Ok(())
}
