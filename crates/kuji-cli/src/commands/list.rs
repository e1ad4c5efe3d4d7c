use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(path: &Path) -> Result<(), String> {
    let store = super::open_store(path)?;
    let roster = store.roster();

    if roster.is_empty() {
        println!("  No entries. Add some with `kuji add <NAME>...`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Status"]);

    for entry in roster.entries() {
        let status = match entry.selected_at {
            Some(at) => format!("drawn {}", at.format("%Y-%m-%d %H:%M:%S")),
            None => "waiting".to_string(),
        };
        table.add_row(vec![entry.id.to_string(), entry.name.clone(), status]);
    }

    let stats = roster.statistics();
    println!("{table}");
    println!();
    println!("  {} entries, {} drawn", stats.total, stats.selected);

    Ok(())
}
