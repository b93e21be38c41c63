//! Delve, a graph dungeon crawler.
//!
//! `delve 12` digs a fresh dungeon of 12 rooms; `delve crypt.dlv`
//! resumes a saved one. Walk from room to room, fight what lunges,
//! drink what glitters, and find the treasure before something finds
//! you.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use delve_core::dungeon::RoomId;
use delve_core::{GameRng, Session, TurnResult};
use delve_save::{default_save_path, list_saves, load_game, save_game};

#[derive(Parser)]
#[command(name = "delve", about = "A graph dungeon crawler", version)]
struct Cli {
    /// Room count for a new dungeon, or the path of a save to resume
    target: Option<String>,

    /// Where to write the save on exit (defaults to the per-user save dir)
    #[arg(long)]
    save: Option<PathBuf>,

    /// List existing saves and exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list {
        return match print_saves() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("delve: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let Some(target) = cli.target else {
        eprintln!("delve: pass a room count for a new dungeon, or a save file to resume");
        return ExitCode::FAILURE;
    };

    let mut session = match open_session(&target) {
        Ok(session) => session,
        Err(message) => {
            eprintln!("delve: {message}");
            return ExitCode::FAILURE;
        }
    };

    let save_to = cli.save.unwrap_or_else(default_save_path);
    match play(&mut session, &save_to) {
        Ok(TurnResult::PlayerWon) => {
            println!("You win!");
            ExitCode::SUCCESS
        }
        Ok(TurnResult::PlayerDied(reason)) => {
            println!("You are dead: {reason}.");
            ExitCode::SUCCESS
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("delve: {e}");
            ExitCode::FAILURE
        }
    }
}

/// A numeric argument digs a new dungeon; anything else loads a save.
fn open_session(target: &str) -> Result<Session, String> {
    match target.parse::<usize>() {
        Ok(rooms) => {
            let mut session = Session::new(rooms, GameRng::from_entropy())
                .map_err(|e| e.to_string())?;
            session.message(format!(
                "You descend into a dungeon of {rooms} rooms. Somewhere below, treasure waits."
            ));
            Ok(session)
        }
        Err(_) => {
            let mut session =
                load_game(target).map_err(|e| format!("cannot load '{target}': {e}"))?;
            session.message("You pick up where you left off.");
            Ok(session)
        }
    }
}

/// Drive the session until the player wins, dies, or leaves.
fn play(session: &mut Session, save_to: &Path) -> Result<TurnResult, Box<dyn Error>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        let result = session.enter_current_room();
        flush_messages(session);
        match result {
            TurnResult::Continue => {}
            terminal => return Ok(terminal),
        }

        // prompt until the player picks a reachable door or leaves
        loop {
            let view = session.current_room();
            println!();
            println!(
                "Room {} | hp {} | damage {} | here: {}",
                view.id, session.player.hp, session.player.damage, view.content
            );
            println!("Doors lead to: {}", join_ids(&view.neighbors));
            print!("Choose a door, or 's' to save and exit: ");
            io::stdout().flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                // stdin closed: leave the same way 's' would
                println!();
                save_and_report(session, save_to)?;
                return Ok(TurnResult::SaveAndExit);
            }
            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("s") || trimmed.eq_ignore_ascii_case("save") {
                save_and_report(session, save_to)?;
                return Ok(TurnResult::SaveAndExit);
            }
            match trimmed.parse::<u32>() {
                Ok(id) => match session.choose_door(RoomId(id)) {
                    Ok(()) => break,
                    Err(e) => println!("{e}"),
                },
                Err(_) => println!("That is not a door number."),
            }
        }
    }
}

fn save_and_report(session: &Session, path: &Path) -> Result<(), Box<dyn Error>> {
    save_game(session, path)?;
    println!("Game saved to {}.", path.display());
    Ok(())
}

fn flush_messages(session: &mut Session) {
    for line in session.take_messages() {
        println!("{line}");
    }
}

fn join_ids(ids: &[RoomId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print every save in the default directory.
fn print_saves() -> Result<(), Box<dyn Error>> {
    let saves = list_saves()?;
    if saves.is_empty() {
        println!("No saves found.");
        return Ok(());
    }
    for (path, header) in saves {
        println!(
            "{}  ({} rooms, saved at unix {})",
            path.display(),
            header.room_count,
            header.saved_at
        );
    }
    Ok(())
}
