use std::path::Path;

use colored::Colorize;

pub fn run(path: &Path) -> Result<(), String> {
    let store = super::open_store(path)?;
    let stats = store.roster().statistics();

    println!("  {:<10} {}", "Total:".bold(), stats.total);
    println!("  {:<10} {}", "Drawn:".bold(), stats.selected);
    println!("  {:<10} {}", "Remaining:".bold(), stats.remaining);
    println!("  {:<10} {}%", "Progress:".bold(), stats.percentage);

    if stats.is_complete {
        println!();
        println!("  {}", "Every entry has been drawn.".green().bold());
    }

    Ok(())
}
