use std::path::Path;

use colored::Colorize;

pub fn add(path: &Path, names: &[String]) -> Result<(), String> {
    let mut store = super::open_store(path)?;
    let added = store
        .update(|roster| Ok(roster.add_entries(names)))
        .map_err(|e| e.to_string())?;

    if added.is_empty() {
        return Err("no names given (blank names are skipped)".into());
    }

    for entry in &added {
        println!("  {} {} {}", "+".green(), entry.name.bold(), entry.id.to_string().dimmed());
    }
    println!();
    println!("  {} added, {} in roster", added.len(), store.roster().len());

    Ok(())
}

pub fn generate(path: &Path, count: usize) -> Result<(), String> {
    let mut store = super::open_store(path)?;
    let created = store
        .update(|roster| Ok(roster.generate(count)))
        .map_err(|e| e.to_string())?;

    println!("  {} Generated {} entries", "✓".green().bold(), created.len());

    Ok(())
}

pub fn rename(path: &Path, prefix: &str, name: &str) -> Result<(), String> {
    let mut store = super::open_store(path)?;
    let old = store
        .update(|roster| {
            let id = roster.find_by_prefix(prefix)?;
            let old = roster.get(id).map(|e| e.name.clone()).unwrap_or_default();
            roster.rename(id, name)?;
            Ok(old)
        })
        .map_err(|e| e.to_string())?;

    println!("  {} {} → {}", "✓".green().bold(), old, name.trim().bold());

    Ok(())
}

pub fn remove(path: &Path, prefix: &str) -> Result<(), String> {
    let mut store = super::open_store(path)?;
    let removed = store
        .update(|roster| {
            let id = roster.find_by_prefix(prefix)?;
            roster.remove(id)
        })
        .map_err(|e| e.to_string())?;

    println!("  {} {} {}", "-".red(), removed.name.bold(), removed.id.to_string().dimmed());

    Ok(())
}
