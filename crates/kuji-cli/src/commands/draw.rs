use std::path::Path;

use colored::Colorize;
use kuji_draw::SessionState;

use super::SessionArgs;

pub fn run(path: &Path, args: &SessionArgs) -> Result<(), String> {
    let mut session = super::start_session(path, args)?;

    if session.state() == SessionState::Complete {
        return Err("nothing left to draw; run `kuji reset` to start over".into());
    }

    let outcome = session.draw().map_err(|e| e.to_string())?;
    session.acknowledge_reveal().map_err(|e| e.to_string())?;

    println!(
        "  {} #{} {}",
        "★".yellow().bold(),
        outcome.display_index,
        outcome.name.bold()
    );
    println!("  {} remaining", outcome.remaining);

    Ok(())
}
