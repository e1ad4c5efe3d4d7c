use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use super::SessionArgs;

pub fn run(path: &Path, args: &SessionArgs) -> Result<(), String> {
    let session = super::start_session(path, args)?;
    let layout = session.layout();

    if layout.is_empty() {
        println!("  Nothing left to lay out.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Cell", "X", "Z", "Rotation", "Forced"]);

    for (index, placement) in layout.placements().iter().enumerate() {
        let name = session.entry(index).map(|e| e.name.as_str()).unwrap_or("?");
        table.add_row(vec![
            (index + 1).to_string(),
            name.to_string(),
            placement.cell.to_string(),
            format!("{:.2}", placement.position.x),
            format!("{:.2}", placement.position.z),
            format!("{:.1}°", placement.rotation),
            if placement.forced { "yes" } else { "" }.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} placements, {} forced",
        layout.len(),
        layout.forced_count()
    );

    Ok(())
}
