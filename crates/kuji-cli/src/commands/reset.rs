use std::path::Path;

use colored::Colorize;
use kuji_core::EntryStore;

pub fn run(path: &Path, all: bool) -> Result<(), String> {
    let mut store = super::open_store(path)?;

    if all {
        store.clear_all().map_err(|e| e.to_string())?;
        println!("  {} Roster cleared", "✓".green().bold());
    } else {
        store.clear_selections().map_err(|e| e.to_string())?;
        println!(
            "  {} {} entries ready to draw again",
            "✓".green().bold(),
            store.roster().len()
        );
    }

    Ok(())
}
