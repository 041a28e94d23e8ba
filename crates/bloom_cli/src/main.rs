//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `bloom_core` linkage and open the configured snapshot store.
//! - Print a deterministic one-key-per-line summary of the stored state.
//!
//! Usage: `bloom_cli [config.json]`. `BLOOM_*` environment variables override
//! file values.

use bloom_core::db::open_db;
use bloom_core::{
    init_logging_from_config, CoreConfig, Session, SnapshotRepository, SqliteKvRepository,
    SystemClock,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bloom_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => CoreConfig::from_file(path)?,
        None => CoreConfig::default(),
    }
    .with_env_overrides();
    init_logging_from_config(&config)?;

    println!("bloom_core ping={}", bloom_core::ping());
    println!("bloom_core version={}", bloom_core::core_version());

    let conn = open_db(&config.db_path)?;
    let store = SnapshotRepository::with_key(SqliteKvRepository::new(&conn), &config.storage_key);
    let session = Session::open(store, SystemClock);
    if let Some(warning) = session.open_warning() {
        log::warn!("event=cli_open module=cli status=warn error_code={}", warning.code());
        println!("warning={warning}");
    }

    let snapshot = session.snapshot();
    let achievements: Vec<_> = snapshot
        .profile
        .achievements
        .iter()
        .map(|id| id.as_str())
        .collect();
    println!("moods={}", snapshot.moods.len());
    println!("gratitudes={}", snapshot.gratitudes.len());
    println!("exercises={}", snapshot.exercises.len());
    println!("streak={}", snapshot.profile.streak_count);
    println!("checked_in_today={}", session.has_checked_in_today());
    println!("achievements={}", achievements.join(","));
    println!("recommendation={}", session.recommendation());
    Ok(())
}
