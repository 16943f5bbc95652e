// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Ledger, TransitionResult};
use fuelcard_chain::{Actor, CardChain, ChainAction, ChainEntry, now_iso8601};
use fuelcard_domain::{Card, CardStatus, SYSTEM_HOLDER, UnitRecord, validate_amount_value};

/// Applies a command to the ledger, producing a new ledger and the
/// affected card.
///
/// Authorization is enforced by the caller before this function is
/// reached; `apply` enforces only the state machine itself. Every
/// accepted command appends exactly one entry to the affected card's
/// chain, so chain length grows by one per mutation.
///
/// # Arguments
///
/// * `ledger` - The current ledger (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new ledger and card
/// * `Err(CoreError)` if the command violates the state machine
///
/// # Errors
///
/// Returns an error if:
/// - The target card does not exist (or already exists, for `NewCard`)
/// - The card is in a terminal status
/// - A unit sub-ledger operation targets a card without one
/// - The amount falls outside the permitted range
#[allow(clippy::too_many_lines)]
pub fn apply(ledger: &Ledger, command: Command, actor: &Actor) -> Result<TransitionResult, CoreError> {
    match command {
        Command::NewCard {
            card_number,
            holder_name,
            holder_phone,
            amount,
            fuel_type,
            unit_code,
            from_voice: _,
        } => {
            // Rule: card numbers are unique across the whole ledger.
            if ledger.has_card(card_number) {
                return Err(CoreError::CardAlreadyExists(card_number));
            }
            validate_amount_value(amount)?;

            let now: String = now_iso8601();

            // The chain starts with a single initial-issuance entry.
            let mut chain: CardChain = CardChain::new();
            chain.push(ChainEntry::new(
                ChainAction::InitialIssue,
                Some(amount),
                CardStatus::New.as_str().to_string(),
                Some(actor.id.clone()),
            ));

            let card: Card = Card {
                id: None,
                card_number,
                holder_name,
                holder_phone,
                amount,
                fuel_type,
                unit_code,
                status: CardStatus::New,
                issue_date: now.clone(),
                credit_date: None,
                touched_at: now,
                current_holder: String::from(SYSTEM_HOLDER),
                chain,
                unit_record: None,
            };

            Ok(TransitionResult {
                new_ledger: ledger.with_added(card.clone()),
                card,
            })
        }
        Command::UpdateCard {
            card_number,
            amount,
        } => {
            let card: &Card = ledger
                .find_card(card_number)
                .ok_or(CoreError::CardNotFound(card_number))?;
            if card.status.is_finalized() {
                return Err(CoreError::CardFinalized(card_number));
            }
            validate_amount_value(amount)?;

            let mut updated: Card = card.clone();
            updated.amount = amount;
            updated.status = CardStatus::Updated;
            updated.touched_at = now_iso8601();
            updated.chain.push(ChainEntry::new(
                ChainAction::QuantityUpdate,
                Some(amount),
                CardStatus::Updated.as_str().to_string(),
                Some(actor.id.clone()),
            ));

            Ok(TransitionResult {
                new_ledger: ledger.with_replaced(updated.clone()),
                card: updated,
            })
        }
        Command::ReturnCard { card_number } => {
            let card: &Card = ledger
                .find_card(card_number)
                .ok_or(CoreError::CardNotFound(card_number))?;
            if card.status.is_finalized() {
                return Err(CoreError::CardFinalized(card_number));
            }

            let now: String = now_iso8601();
            let mut returned: Card = card.clone();
            // The allotment is preserved on return; the chain entry
            // records the amount held at return time.
            returned.status = CardStatus::Returned;
            returned.credit_date = Some(now.clone());
            returned.touched_at = now;
            returned.current_holder = String::from(SYSTEM_HOLDER);
            returned.chain.push(ChainEntry::new(
                ChainAction::CardReturn,
                Some(returned.amount),
                CardStatus::Returned.as_str().to_string(),
                Some(actor.id.clone()),
            ));

            Ok(TransitionResult {
                new_ledger: ledger.with_replaced(returned.clone()),
                card: returned,
            })
        }
        Command::UnitIssue {
            card_number,
            holder_name,
            holder_id,
            fuel_amount,
        } => {
            let card: &Card = find_unit_target(ledger, card_number)?;
            validate_amount_value(fuel_amount)?;

            let now: String = now_iso8601();
            let mut issued: Card = card.clone();
            issued.unit_record = Some(UnitRecord {
                holder_name: Some(holder_name),
                holder_id: Some(holder_id),
                remaining_fuel: fuel_amount,
                issue_date: now.clone(),
                credit_date: None,
            });
            issued.touched_at = now;
            issued.chain.push(ChainEntry::new(
                ChainAction::UnitIssue,
                Some(fuel_amount),
                issued.status.as_str().to_string(),
                Some(actor.id.clone()),
            ));

            Ok(TransitionResult {
                new_ledger: ledger.with_replaced(issued.clone()),
                card: issued,
            })
        }
        Command::UnitUpdate {
            card_number,
            holder_name,
            holder_id,
            fuel_amount,
        } => {
            let card: &Card = find_unit_target(ledger, card_number)?;
            let existing: &UnitRecord = card
                .unit_record
                .as_ref()
                .ok_or(CoreError::UnitDataMissing(card_number))?;
            validate_amount_value(fuel_amount)?;

            let updated_record: UnitRecord = UnitRecord {
                holder_name: Some(holder_name),
                holder_id: Some(holder_id),
                remaining_fuel: fuel_amount,
                issue_date: existing.issue_date.clone(),
                credit_date: existing.credit_date.clone(),
            };

            let mut updated: Card = card.clone();
            updated.unit_record = Some(updated_record);
            updated.touched_at = now_iso8601();
            updated.chain.push(ChainEntry::new(
                ChainAction::UnitUpdate,
                Some(fuel_amount),
                updated.status.as_str().to_string(),
                Some(actor.id.clone()),
            ));

            Ok(TransitionResult {
                new_ledger: ledger.with_replaced(updated.clone()),
                card: updated,
            })
        }
        Command::UnitCredit { card_number } => {
            let card: &Card = find_unit_target(ledger, card_number)?;
            let existing: &UnitRecord = card
                .unit_record
                .as_ref()
                .ok_or(CoreError::UnitDataMissing(card_number))?;

            let now: String = now_iso8601();
            // Rule: crediting clears the holder fields and resets the
            // remaining fuel to exactly zero, whatever it was before.
            let cleared: UnitRecord = UnitRecord {
                holder_name: None,
                holder_id: None,
                remaining_fuel: 0,
                issue_date: existing.issue_date.clone(),
                credit_date: Some(now.clone()),
            };

            let mut credited: Card = card.clone();
            credited.unit_record = Some(cleared);
            credited.touched_at = now;
            credited.chain.push(ChainEntry::new(
                ChainAction::UnitCredit,
                Some(0),
                credited.status.as_str().to_string(),
                Some(actor.id.clone()),
            ));

            Ok(TransitionResult {
                new_ledger: ledger.with_replaced(credited.clone()),
                card: credited,
            })
        }
    }
}

/// Looks up the target card for a unit sub-ledger operation and
/// enforces the terminal-status gate shared by all three.
fn find_unit_target(ledger: &Ledger, card_number: u64) -> Result<&Card, CoreError> {
    let card: &Card = ledger
        .find_card(card_number)
        .ok_or(CoreError::CardNotFound(card_number))?;
    // Rule: no unit-level mutation once the card is returned or
    // finalized.
    if card.status.is_finalized() {
        return Err(CoreError::CardFinalized(card_number));
    }
    Ok(card)
}
