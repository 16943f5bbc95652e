// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card document persistence functions.
//!
//! Every mutation targets exactly one row; there is no bulk rewrite of
//! the card table.

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::error::PersistenceError;
use fuelcard_domain::Card;

/// Inserts a new card document.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `card` - The card to insert
///
/// # Returns
///
/// The row ID assigned to the inserted card.
///
/// # Errors
///
/// Returns an error if the card number already exists or the insert
/// fails.
pub fn add_card(conn: &Connection, card: &Card) -> Result<i64, PersistenceError> {
    let payload: String = serde_json::to_string(card)?;
    let unit_code: Option<&str> = card.unit_code.as_ref().map(|code| code.as_str());

    let result: Result<usize, rusqlite::Error> = conn.execute(
        "INSERT INTO cards (card_number, unit_code, status, payload)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            i64::try_from(card.card_number)
                .map_err(|e| PersistenceError::Other(format!("Card number overflow: {e}")))?,
            unit_code,
            card.status.as_str(),
            payload
        ],
    );

    match result {
        Ok(_) => {
            let card_id: i64 = conn.last_insert_rowid();
            debug!(card_id, card_number = card.card_number, "Inserted card");
            Ok(card_id)
        }
        Err(rusqlite::Error::SqliteFailure(err, message))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            debug!(
                card_number = card.card_number,
                error = ?message,
                "Card insert hit unique constraint"
            );
            Err(PersistenceError::CardAlreadyExists(card.card_number))
        }
        Err(e) => Err(e.into()),
    }
}

/// Updates an existing card document in place.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `card` - The card to persist; its number selects the row
///
/// # Errors
///
/// Returns an error if the card does not exist or the update fails.
pub fn update_card(conn: &Connection, card: &Card) -> Result<(), PersistenceError> {
    let payload: String = serde_json::to_string(card)?;
    let unit_code: Option<&str> = card.unit_code.as_ref().map(|code| code.as_str());

    let changed: usize = conn.execute(
        "UPDATE cards
         SET unit_code = ?2, status = ?3, payload = ?4, updated_at = CURRENT_TIMESTAMP
         WHERE card_number = ?1",
        params![
            i64::try_from(card.card_number)
                .map_err(|e| PersistenceError::Other(format!("Card number overflow: {e}")))?,
            unit_code,
            card.status.as_str(),
            payload
        ],
    )?;

    if changed == 0 {
        return Err(PersistenceError::CardNotFound(card.card_number));
    }

    debug!(card_number = card.card_number, "Updated card");
    Ok(())
}

/// Retrieves a single card by number.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `card_number` - The card number to look up
///
/// # Errors
///
/// Returns an error if the query fails or the payload does not parse.
/// Returns `Ok(None)` if no card carries this number.
pub fn query_card_by_number(
    conn: &Connection,
    card_number: u64,
) -> Result<Option<Card>, PersistenceError> {
    debug!(card_number, "Looking up card by number");

    let row: Option<(i64, String)> = conn
        .query_row(
            "SELECT card_id, payload FROM cards WHERE card_number = ?1",
            params![i64::try_from(card_number)
                .map_err(|e| PersistenceError::Other(format!("Card number overflow: {e}")))?],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    match row {
        Some((card_id, payload)) => {
            let mut card: Card = serde_json::from_str(&payload)?;
            card.id = Some(card_id);
            Ok(Some(card))
        }
        None => Ok(None),
    }
}

/// Loads every card document, ordered by row ID.
///
/// Used once at startup to seed the in-memory ledger.
///
/// # Errors
///
/// Returns an error if the query fails or any payload does not parse.
pub fn fetch_all_cards(conn: &Connection) -> Result<Vec<Card>, PersistenceError> {
    let mut stmt: rusqlite::Statement<'_> =
        conn.prepare("SELECT card_id, payload FROM cards ORDER BY card_id")?;

    let rows: Vec<(i64, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<(i64, String)>, rusqlite::Error>>()?;

    let mut cards: Vec<Card> = Vec::with_capacity(rows.len());
    for (card_id, payload) in rows {
        let mut card: Card = serde_json::from_str(&payload)?;
        card.id = Some(card_id);
        cards.push(card);
    }

    debug!(count = cards.len(), "Loaded card documents");
    Ok(cards)
}

/// Deletes a card document by number.
///
/// # Errors
///
/// Returns an error if the card does not exist or the delete fails.
pub fn delete_card(conn: &Connection, card_number: u64) -> Result<(), PersistenceError> {
    let changed: usize = conn.execute(
        "DELETE FROM cards WHERE card_number = ?1",
        params![i64::try_from(card_number)
            .map_err(|e| PersistenceError::Other(format!("Card number overflow: {e}")))?],
    )?;

    if changed == 0 {
        return Err(PersistenceError::CardNotFound(card_number));
    }

    debug!(card_number, "Deleted card");
    Ok(())
}
