use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use kuji_core::JsonFileStore;
use kuji_draw::{LotterySession, SessionState, StateChange};

use super::SessionArgs;

pub fn run(path: &Path, args: &SessionArgs) -> Result<(), String> {
    let mut session = super::start_session(path, args)?;
    session.subscribe(|change: &StateChange| {
        if change.to == SessionState::Complete && change.from != SessionState::Complete {
            println!("  {}", "Every entry has been drawn.".green().bold());
        }
    });

    println!("  {}", "Kujikuji".bold());
    println!(
        "  {} in the lineup. Press Enter to {}, 'help' for commands.",
        session.lineup().len(),
        button_label(session.state())
    );
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("  [{}] > ", session.state());
        io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.map_err(|e| e.to_string())?;

        match line.trim().to_lowercase().as_str() {
            "" => press(&mut session),
            "go" | "draw" => draw(&mut session),
            "return" | "back" => acknowledge(&mut session),
            "reset" | "again" => reset(&mut session),
            "stats" => {
                let stats = session.store().roster().statistics();
                println!(
                    "  {}/{} drawn ({}%), {} in the pool",
                    stats.selected,
                    stats.total,
                    stats.percentage,
                    session.remaining()
                );
            }
            "help" => print_help(),
            "quit" | "exit" | "q" => break,
            other => println!("  {} unknown command '{other}'", "?".yellow()),
        }
    }

    println!("  {} draws this session", session.history().len());

    Ok(())
}

/// The action Enter performs in each state.
fn button_label(state: SessionState) -> &'static str {
    match state {
        SessionState::ReadyToDraw => "GO",
        SessionState::Revealing => "RETURN",
        SessionState::Complete => "Try Again",
    }
}

fn press(session: &mut LotterySession<JsonFileStore>) {
    match session.state() {
        SessionState::ReadyToDraw => draw(session),
        SessionState::Revealing => acknowledge(session),
        SessionState::Complete => reset(session),
    }
}

fn draw(session: &mut LotterySession<JsonFileStore>) {
    match session.draw() {
        Ok(outcome) => {
            let spot = session
                .layout()
                .get(outcome.lineup_index)
                .map(|p| format!(" at {}", p.position))
                .unwrap_or_default();
            println!(
                "  {} #{} {}{}",
                "★".yellow().bold(),
                outcome.display_index,
                outcome.name.bold(),
                spot.dimmed()
            );
        }
        Err(e) => println!("  {} {e}", "!".red().bold()),
    }
}

fn acknowledge(session: &mut LotterySession<JsonFileStore>) {
    match session.acknowledge_reveal() {
        Ok(SessionState::Complete) => {}
        Ok(_) => println!("  {} left to draw", session.remaining()),
        Err(e) => println!("  {} {e}", "!".red().bold()),
    }
}

fn reset(session: &mut LotterySession<JsonFileStore>) {
    match session.reset(true) {
        Ok(_) => println!(
            "  {} {} entries back in the pool",
            "↺".cyan().bold(),
            session.remaining()
        ),
        Err(e) => println!("  {} {e}", "!".red().bold()),
    }
}

fn print_help() {
    println!("  Enter     press the button (GO / RETURN / Try Again)");
    println!("  go        draw one entry");
    println!("  return    dismiss the reveal");
    println!("  reset     put every entry back in the pool");
    println!("  stats     show progress");
    println!("  quit      leave");
}
