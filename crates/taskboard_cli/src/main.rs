//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskboard_core` linkage.
//! - Optionally print the board stored in a local database file.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;
use taskboard_core::db::open_db;
use taskboard_core::{derive_columns, SqliteKeyValueRepository, TaskStore};

fn main() -> ExitCode {
    println!("taskboard_core ping={}", taskboard_core::ping());
    println!("taskboard_core version={}", taskboard_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match print_board(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskboard_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_board(db_path: &str) -> Result<(), String> {
    let conn = open_db(db_path).map_err(|err| format!("open {db_path} failed: {err}"))?;
    let repo = SqliteKeyValueRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let store = TaskStore::open(repo);

    for column in derive_columns(store.tasks()) {
        println!("[{}] {}", column.droppable_id(), column.title);
        if let Some(placeholder) = column.placeholder() {
            println!("  {placeholder}");
        }
        for card in column.cards() {
            let assignee = card.assignee_name.as_deref().unwrap_or("-");
            println!(
                "  {} {} ({}, {})",
                card.id,
                card.title,
                card.priority.key(),
                assignee
            );
        }
    }
    Ok(())
}
