// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Unit credential and session persistence functions.
//!
//! Shared secrets are hashed with bcrypt on the way in and verified
//! here, so plaintext secrets never leave this module's callers.

use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use crate::data_models::{SessionData, UnitData};
use crate::error::PersistenceError;

/// Creates a new unit credential.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `unit_code` - The unit code (organizational code or the HQ label)
/// * `display_name` - The display name
/// * `secret` - The plaintext shared secret; hashed before storage
/// * `is_admin` - Whether the unit holds the administrator role
///
/// # Errors
///
/// Returns an error if the unit cannot be created or the code already
/// exists.
pub fn create_unit(
    conn: &Connection,
    unit_code: &str,
    display_name: &str,
    secret: &str,
    is_admin: bool,
) -> Result<i64, PersistenceError> {
    info!(unit_code, display_name, is_admin, "Creating unit credential");

    let secret_hash: String = bcrypt::hash(secret, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash secret: {e}")))?;

    conn.execute(
        "INSERT INTO units (unit_code, display_name, secret_hash, is_admin)
         VALUES (?1, ?2, ?3, ?4)",
        params![unit_code, display_name, secret_hash, i32::from(is_admin)],
    )?;

    let unit_id: i64 = conn.last_insert_rowid();
    info!(unit_id, "Created unit credential");

    Ok(unit_id)
}

/// Retrieves a unit credential by code.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the unit is not found.
pub fn get_unit_by_code(
    conn: &Connection,
    unit_code: &str,
) -> Result<Option<UnitData>, PersistenceError> {
    debug!(unit_code, "Looking up unit by code");

    let result: Option<UnitData> = conn
        .query_row(
            "SELECT unit_id, unit_code, display_name, secret_hash, is_admin,
                    created_at, last_login_at
             FROM units
             WHERE unit_code = ?1",
            params![unit_code],
            |row| {
                Ok(UnitData {
                    unit_id: row.get(0)?,
                    unit_code: row.get(1)?,
                    display_name: row.get(2)?,
                    secret_hash: row.get(3)?,
                    is_admin: row.get::<_, i32>(4)? != 0,
                    created_at: row.get(5)?,
                    last_login_at: row.get(6)?,
                })
            },
        )
        .optional()?;

    Ok(result)
}

/// Retrieves a unit credential by row ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the unit is not found.
pub fn get_unit_by_id(
    conn: &Connection,
    unit_id: i64,
) -> Result<Option<UnitData>, PersistenceError> {
    debug!(unit_id, "Looking up unit by ID");

    let result: Option<UnitData> = conn
        .query_row(
            "SELECT unit_id, unit_code, display_name, secret_hash, is_admin,
                    created_at, last_login_at
             FROM units
             WHERE unit_id = ?1",
            params![unit_id],
            |row| {
                Ok(UnitData {
                    unit_id: row.get(0)?,
                    unit_code: row.get(1)?,
                    display_name: row.get(2)?,
                    secret_hash: row.get(3)?,
                    is_admin: row.get::<_, i32>(4)? != 0,
                    created_at: row.get(5)?,
                    last_login_at: row.get(6)?,
                })
            },
        )
        .optional()?;

    Ok(result)
}

/// Verifies a plaintext shared secret against a unit's stored hash.
///
/// # Errors
///
/// Returns an error if the hash is malformed.
pub fn verify_unit_secret(unit: &UnitData, secret: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(secret, &unit.secret_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify secret: {e}")))
}

/// Updates the last login timestamp for a unit.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_login(conn: &Connection, unit_id: i64) -> Result<(), PersistenceError> {
    debug!(unit_id, "Updating last_login_at");

    conn.execute(
        "UPDATE units SET last_login_at = CURRENT_TIMESTAMP WHERE unit_id = ?1",
        params![unit_id],
    )?;

    Ok(())
}

/// Creates a new session for a unit.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `unit_id` - The unit row ID
/// * `expires_at` - The expiration timestamp (ISO 8601 format)
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &Connection,
    session_token: &str,
    unit_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(unit_id, expires_at, "Creating session");

    conn.execute(
        "INSERT INTO sessions (session_token, unit_id, expires_at)
         VALUES (?1, ?2, ?3)",
        params![session_token, unit_id, expires_at],
    )?;

    let session_id: i64 = conn.last_insert_rowid();
    debug!(session_id, "Created session");

    Ok(session_id)
}

/// Retrieves a session by token.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &Connection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    debug!("Looking up session by token");

    let result: Option<SessionData> = conn
        .query_row(
            "SELECT session_id, session_token, unit_id, created_at,
                    last_activity_at, expires_at
             FROM sessions
             WHERE session_token = ?1",
            params![session_token],
            |row| {
                Ok(SessionData {
                    session_id: row.get(0)?,
                    session_token: row.get(1)?,
                    unit_id: row.get(2)?,
                    created_at: row.get(3)?,
                    last_activity_at: row.get(4)?,
                    expires_at: row.get(5)?,
                })
            },
        )
        .optional()?;

    Ok(result)
}

/// Updates the last activity timestamp for a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &Connection,
    session_id: i64,
) -> Result<(), PersistenceError> {
    debug!(session_id, "Updating last_activity_at");

    conn.execute(
        "UPDATE sessions SET last_activity_at = CURRENT_TIMESTAMP WHERE session_id = ?1",
        params![session_id],
    )?;

    Ok(())
}

/// Deletes a session by token.
///
/// Used for logout.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &Connection, session_token: &str) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    conn.execute(
        "DELETE FROM sessions WHERE session_token = ?1",
        params![session_token],
    )?;

    Ok(())
}

/// Deletes all expired sessions.
///
/// Cleanup operation intended to run periodically.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &Connection, now: &str) -> Result<usize, PersistenceError> {
    let deleted: usize = conn.execute(
        "DELETE FROM sessions WHERE expires_at < ?1",
        params![now],
    )?;

    if deleted > 0 {
        info!(deleted, "Deleted expired sessions");
    }

    Ok(deleted)
}
