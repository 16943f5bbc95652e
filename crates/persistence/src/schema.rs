// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::Connection;
use tracing::info;

use crate::error::PersistenceError;

/// Initializes the database schema.
///
/// Cards are stored one row per card: a JSON payload carrying the full
/// document (chain included) plus mirrored columns for the fields the
/// server filters on.
///
/// # Arguments
///
/// * `conn` - The database connection to initialize
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), PersistenceError> {
    info!("Initializing database schema");

    // Enable foreign key enforcement
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS units (
            unit_id INTEGER PRIMARY KEY AUTOINCREMENT,
            unit_code TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL,
            secret_hash TEXT NOT NULL,
            is_admin INTEGER NOT NULL DEFAULT 0 CHECK(is_admin IN (0, 1)),
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            last_login_at DATETIME
        );

        CREATE TABLE IF NOT EXISTS sessions (
            session_id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_token TEXT NOT NULL UNIQUE,
            unit_id INTEGER NOT NULL,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            last_activity_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            expires_at DATETIME NOT NULL,
            FOREIGN KEY(unit_id) REFERENCES units(unit_id)
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_token
            ON sessions(session_token);

        CREATE INDEX IF NOT EXISTS idx_sessions_unit
            ON sessions(unit_id);

        CREATE TABLE IF NOT EXISTS cards (
            card_id INTEGER PRIMARY KEY AUTOINCREMENT,
            card_number INTEGER NOT NULL UNIQUE,
            unit_code TEXT,
            status TEXT NOT NULL,
            payload TEXT NOT NULL,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_cards_number
            ON cards(card_number);

        CREATE INDEX IF NOT EXISTS idx_cards_unit
            ON cards(unit_code);
        ",
    )?;

    info!("Database schema initialized");

    Ok(())
}
