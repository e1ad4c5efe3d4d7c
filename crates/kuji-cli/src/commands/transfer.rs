use std::fs;
use std::path::Path;

use colored::Colorize;
use kuji_core::Roster;

pub fn export(path: &Path, output: Option<&Path>) -> Result<(), String> {
    let store = super::open_store(path)?;
    let json = store.roster().to_json().map_err(|e| e.to_string())?;

    match output {
        Some(out) => {
            fs::write(out, &json)
                .map_err(|e| format!("failed to write {}: {e}", out.display()))?;
            println!(
                "  {} Exported {} entries to {}",
                "✓".green().bold(),
                store.roster().len(),
                out.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

pub fn import(path: &Path, file: &Path) -> Result<(), String> {
    let json = fs::read_to_string(file)
        .map_err(|e| format!("failed to read {}: {e}", file.display()))?;
    let roster = Roster::from_json(&json).map_err(|e| format!("invalid export: {e}"))?;
    let count = roster.len();

    let mut store = super::open_store(path)?;
    store.replace(roster).map_err(|e| e.to_string())?;

    println!("  {} Imported {count} entries", "✓".green().bold());

    Ok(())
}
