// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the fuel card ledger.
//!
//! This crate is the single write path to the card store. Cards are
//! stored as JSON documents with mirrored filter columns; unit
//! credentials and sessions live in their own tables. `SQLite` is the
//! only backend: the ledger is small and the server holds it fully in
//! memory, so the database is a durable document store rather than a
//! query engine.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod cards;
mod data_models;
mod error;
mod schema;
mod units;

#[cfg(test)]
mod tests;

pub use data_models::{SessionData, UnitData};
pub use error::PersistenceError;
pub use units::verify_unit_secret;

use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use fuelcard_domain::Card;

/// Persistence adapter for card documents, unit credentials, and
/// sessions.
pub struct Persistence {
    conn: Connection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives its own private database, so tests are
    /// isolated from each other.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open_in_memory()
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        schema::initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or
    /// initialized.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path)
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

        // WAL mode for better read concurrency
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

        schema::initialize_schema(&conn)?;
        info!("Opened card store");
        Ok(Self { conn })
    }

    // ========================================================================
    // Cards
    // ========================================================================

    /// Inserts a new card document and returns its row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the card number already exists or the
    /// insert fails.
    pub fn add_card(&self, card: &Card) -> Result<i64, PersistenceError> {
        cards::add_card(&self.conn, card)
    }

    /// Updates an existing card document in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the card does not exist or the update
    /// fails.
    pub fn update_card(&self, card: &Card) -> Result<(), PersistenceError> {
        cards::update_card(&self.conn, card)
    }

    /// Retrieves a single card by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if no
    /// card carries this number.
    pub fn query_card_by_number(
        &self,
        card_number: u64,
    ) -> Result<Option<Card>, PersistenceError> {
        cards::query_card_by_number(&self.conn, card_number)
    }

    /// Loads every card document, ordered by row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a payload does not
    /// parse.
    pub fn fetch_all_cards(&self) -> Result<Vec<Card>, PersistenceError> {
        cards::fetch_all_cards(&self.conn)
    }

    /// Deletes a card document by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the card does not exist or the delete
    /// fails.
    pub fn delete_card(&self, card_number: u64) -> Result<(), PersistenceError> {
        cards::delete_card(&self.conn, card_number)
    }

    // ========================================================================
    // Units & Sessions
    // ========================================================================

    /// Creates a new unit credential with a bcrypt-hashed secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit cannot be created.
    pub fn create_unit(
        &self,
        unit_code: &str,
        display_name: &str,
        secret: &str,
        is_admin: bool,
    ) -> Result<i64, PersistenceError> {
        units::create_unit(&self.conn, unit_code, display_name, secret, is_admin)
    }

    /// Retrieves a unit credential by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// unit is not found.
    pub fn get_unit_by_code(&self, unit_code: &str) -> Result<Option<UnitData>, PersistenceError> {
        units::get_unit_by_code(&self.conn, unit_code)
    }

    /// Retrieves a unit credential by row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// unit is not found.
    pub fn get_unit_by_id(&self, unit_id: i64) -> Result<Option<UnitData>, PersistenceError> {
        units::get_unit_by_id(&self.conn, unit_id)
    }

    /// Updates the last login timestamp for a unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(&self, unit_id: i64) -> Result<(), PersistenceError> {
        units::update_last_login(&self.conn, unit_id)
    }

    /// Creates a new session for a unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &self,
        session_token: &str,
        unit_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        units::create_session(&self.conn, session_token, unit_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. Returns `Ok(None)` if the
    /// session is not found.
    pub fn get_session_by_token(
        &self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        units::get_session_by_token(&self.conn, session_token)
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(&self, session_id: i64) -> Result<(), PersistenceError> {
        units::update_session_activity(&self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&self, session_token: &str) -> Result<(), PersistenceError> {
        units::delete_session(&self.conn, session_token)
    }

    /// Deletes all sessions that expired before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&self, now: &str) -> Result<usize, PersistenceError> {
        units::delete_expired_sessions(&self.conn, now)
    }
}
