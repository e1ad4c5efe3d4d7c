use std::path::Path;

pub fn run(path: &Path, format: &str) -> Result<(), String> {
    let store = super::open_store(path)?;
    let log = store.roster().selections();

    let output = match format {
        "text" => {
            if log.is_empty() {
                "  No draws yet.".to_string()
            } else {
                log.export_text()
            }
        }
        "markdown" | "md" => log.export_markdown(),
        "json" => serde_json::to_string_pretty(log).map_err(|e| e.to_string())?,
        _ => {
            return Err(format!(
                "unknown format '{format}'. Expected: text, markdown, json"
            ));
        }
    };

    println!("{}", output.trim_end());

    Ok(())
}
