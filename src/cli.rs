use clap::{Parser, Subcommand};
use serde::Deserialize;
use sqlx::SqlitePool;
use std::fs;

use crate::models::exercise::DurationInput;
use crate::routes::exercises::insert_exercise;
use crate::routes::users::{find_user, insert_user};

#[derive(Debug, Parser)]
#[command(name = "exercise-tracker")]
#[command(about = "Exercise tracking REST API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Register a user and print its id
    CreateUser {
        /// Username to register
        username: String,
    },

    /// Import exercises for an existing user from a JSON file
    Import {
        /// JSON array of `{ description, duration, date? }` records
        file: String,
        /// Id of the user the exercises belong to
        user_id: String,
    },
}

impl Cli {
    pub fn command(self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

#[derive(Deserialize)]
struct ImportedExercise {
    description: String,
    duration: DurationInput,
    date: Option<String>,
}

/// Import a JSON array of `{ description, duration, date? }` records for an
/// existing user. All records are written in one transaction.
pub async fn import_exercises(
    pool: &SqlitePool,
    file_path: &str,
    user_id: &str,
) -> Result<usize, Box<dyn std::error::Error>> {
    // Verify user exists before importing
    let user = find_user(pool, user_id).await?;

    let content = fs::read_to_string(file_path)?;
    let records: Vec<ImportedExercise> = serde_json::from_str(&content)?;

    let mut tx = pool.begin().await?;
    let mut imported = 0;

    for (index, record) in records.into_iter().enumerate() {
        insert_exercise(
            &mut *tx,
            &user,
            &record.description,
            Some(&record.duration),
            record.date.as_deref(),
        )
        .await
        .map_err(|e| format!("record {index}: {e}"))?;

        imported += 1;
    }

    tx.commit().await?;
    tracing::info!(user_id = %user.id, imported, "imported exercises");
    Ok(imported)
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> Result<(), Box<dyn std::error::Error>> {
    let user = insert_user(pool, username).await?;

    println!("Created user:");
    println!("  ID: {}", user.id);
    println!("  Username: {}", user.username);

    Ok(())
}
