// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::ParseError;
use fuelcard_domain::FuelType;

/// Keyword that marks a card reference in a transcript.
const CARD_KEYWORD: &str = "כרטיס";

/// Keywords that select the quantity-update command.
const UPDATE_KEYWORDS: [&str; 2] = ["עדכון", "עדכן"];

/// Keywords that select the card-return command.
const RETURN_KEYWORDS: [&str; 2] = ["החזרה", "החזר"];

/// Keyword that routes a transcript to the unit sub-ledger commands.
const UNIT_KEYWORD: &str = "גדוד";

/// Keyword that selects the unit credit command.
const CREDIT_KEYWORD: &str = "זיכוי";

/// Liter markers; the plural is listed first so it is matched before
/// its singular prefix.
const LITER_KEYWORDS: [&str; 2] = ["ליטרים", "ליטר"];

/// Parses a free-text transcript into a command.
///
/// Dispatch is keyword-driven: the unit keyword routes to the unit
/// sub-ledger commands, the update and return keywords combined with a
/// card reference select those commands, and a bare card reference
/// selects issuance. Transcripts may be comma-delimited or plain
/// space-separated speech; both forms parse to the same command.
///
/// # Arguments
///
/// * `transcript` - The raw voice or typed transcript
///
/// # Returns
///
/// * `Ok(Command)` if the transcript parses cleanly
/// * `Err(ParseError)` otherwise
///
/// # Errors
///
/// Returns an error if no command keyword is recognized or if a
/// recognized command is missing a required detail.
pub fn parse(transcript: &str) -> Result<Command, ParseError> {
    let text: String = transcript.trim().to_lowercase();
    if text.is_empty() {
        return Err(ParseError::UnrecognizedCommand);
    }

    if text.contains(UNIT_KEYWORD) {
        return parse_unit_command(&text);
    }

    let has_card: bool = text.contains(CARD_KEYWORD);
    let has_update: bool = UPDATE_KEYWORDS.iter().any(|kw: &&str| text.contains(kw));
    let has_return: bool = RETURN_KEYWORDS.iter().any(|kw: &&str| text.contains(kw));

    if has_card && has_update {
        return parse_update(&text);
    }
    if has_card && has_return {
        return parse_return(&text);
    }
    if has_card {
        return parse_new(&text);
    }

    Err(ParseError::UnrecognizedCommand)
}

/// Extracts the first run of ASCII digits from a string.
fn first_integer(text: &str) -> Option<u64> {
    let start: usize = text.find(|c: char| c.is_ascii_digit())?;
    let digits: &str = &text[start..];
    let end: usize = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<u64>().ok()
}

/// Checks whether a token looks like an Israeli phone number: all
/// digits after stripping at most one hyphen, nine or ten digits long,
/// with a leading zero.
fn is_phone_shaped(token: &str) -> bool {
    if token.matches('-').count() > 1 {
        return false;
    }
    let digits: String = token.chars().filter(|c: &char| *c != '-').collect();
    if !digits.chars().all(|c: char| c.is_ascii_digit()) {
        return false;
    }
    (9..=10).contains(&digits.len()) && digits.starts_with('0')
}

/// Finds the card number in a transcript: the first integer token at
/// or after the card keyword, falling back to the first integer
/// anywhere in the text.
fn scan_card_number(text: &str) -> Result<u64, ParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut seen_keyword: bool = false;
    for token in &tokens {
        if seen_keyword {
            if let Some(number) = first_integer(token) {
                return Ok(number);
            }
        } else if token.contains(CARD_KEYWORD) {
            seen_keyword = true;
        }
    }
    first_integer(text).ok_or(ParseError::MissingField("card_number"))
}

/// Splits a transcript on commas into trimmed, non-empty segments.
fn comma_segments(text: &str) -> Vec<&str> {
    text.split(',')
        .map(str::trim)
        .filter(|segment: &&str| !segment.is_empty())
        .collect()
}

/// Finds the amount token: the integer immediately preceding a liter
/// marker, falling back to the last bare integer token that is neither
/// the card number nor phone-shaped.
fn scan_amount(tokens: &[&str], card_number: u64) -> Option<u32> {
    for (index, token) in tokens.iter().enumerate() {
        let is_liter: bool = LITER_KEYWORDS.iter().any(|kw: &&str| token.starts_with(kw));
        if is_liter && index > 0 {
            if let Some(amount) = first_integer(tokens[index - 1]) {
                return u32::try_from(amount).ok();
            }
        }
    }
    let mut found: Option<u32> = None;
    for token in tokens {
        if is_phone_shaped(token) {
            continue;
        }
        if let Ok(value) = token.parse::<u64>() {
            if value == card_number {
                continue;
            }
            found = u32::try_from(value).ok();
        }
    }
    found
}

/// Parses a card-issuance transcript.
///
/// Comma-delimited transcripts carry the details in fixed positions:
/// card reference, holder name, phone, amount, fuel type. Plain speech
/// is scanned token by token instead.
fn parse_new(text: &str) -> Result<Command, ParseError> {
    let segments: Vec<&str> = comma_segments(text);
    if segments.len() >= 5 {
        let card_number: u64 =
            first_integer(segments[0]).ok_or(ParseError::MissingField("card_number"))?;
        let holder_name: String = segments[1].to_string();
        let holder_phone: String = segments[2].to_string();
        if !is_phone_shaped(&holder_phone) {
            return Err(ParseError::MissingField("holder_phone"));
        }
        let amount_raw: u64 =
            first_integer(segments[3]).ok_or(ParseError::MissingField("amount"))?;
        let amount: u32 =
            u32::try_from(amount_raw).map_err(|_| ParseError::MissingField("amount"))?;
        let fuel_type: FuelType = FuelType::parse(strip_liter_words(segments[4]).trim())
            .map_err(|_| ParseError::MissingField("fuel_type"))?;
        return Ok(Command::NewCard {
            card_number,
            holder_name,
            holder_phone,
            amount,
            fuel_type,
            unit_code: None,
            from_voice: true,
        });
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let keyword_index: usize = tokens
        .iter()
        .position(|token: &&str| token.contains(CARD_KEYWORD))
        .ok_or(ParseError::UnrecognizedCommand)?;
    let card_number: u64 = tokens
        .get(keyword_index + 1)
        .and_then(|token: &&str| first_integer(token))
        .ok_or(ParseError::MissingField("card_number"))?;

    // The holder name runs from the card number up to the phone token.
    let mut name_tokens: Vec<&str> = Vec::new();
    let mut phone: Option<String> = None;
    let mut rest_start: usize = tokens.len();
    for (index, token) in tokens.iter().enumerate().skip(keyword_index + 2) {
        if is_phone_shaped(token) {
            phone = Some((*token).to_string());
            rest_start = index + 1;
            break;
        }
        name_tokens.push(token);
    }
    let holder_name: String = name_tokens.join(" ");
    if holder_name.is_empty() {
        return Err(ParseError::MissingField("holder_name"));
    }
    let holder_phone: String = phone.ok_or(ParseError::MissingField("holder_phone"))?;

    let rest: &[&str] = tokens.get(rest_start..).unwrap_or(&[]);
    let amount: u32 =
        scan_amount(rest, card_number).ok_or(ParseError::MissingField("amount"))?;

    // Whatever remains after the liter marker names the fuel type.
    let fuel_label: String = rest
        .iter()
        .filter(|token| {
            !LITER_KEYWORDS.iter().any(|kw: &&str| token.starts_with(kw))
                && first_integer(token).is_none()
        })
        .copied()
        .collect::<Vec<&str>>()
        .join(" ");
    let fuel_type: FuelType = FuelType::parse(fuel_label.trim())
        .map_err(|_| ParseError::MissingField("fuel_type"))?;

    Ok(Command::NewCard {
        card_number,
        holder_name,
        holder_phone,
        amount,
        fuel_type,
        unit_code: None,
        from_voice: true,
    })
}

/// Removes liter markers from a segment so the fuel label parses.
fn strip_liter_words(segment: &str) -> String {
    segment
        .split_whitespace()
        .filter(|token: &&str| !LITER_KEYWORDS.iter().any(|kw: &&str| token.starts_with(kw)))
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Parses a quantity-update transcript.
fn parse_update(text: &str) -> Result<Command, ParseError> {
    let segments: Vec<&str> = comma_segments(text);
    if segments.len() >= 2 {
        let card_number: u64 =
            first_integer(segments[0]).ok_or(ParseError::MissingField("card_number"))?;
        let amount_raw: u64 =
            first_integer(segments[1]).ok_or(ParseError::MissingField("amount"))?;
        let amount: u32 =
            u32::try_from(amount_raw).map_err(|_| ParseError::MissingField("amount"))?;
        return Ok(Command::UpdateCard {
            card_number,
            amount,
        });
    }

    let card_number: u64 = scan_card_number(text)?;
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let amount: u32 =
        scan_amount(&tokens, card_number).ok_or(ParseError::MissingField("amount"))?;
    Ok(Command::UpdateCard {
        card_number,
        amount,
    })
}

/// Parses a card-return transcript.
fn parse_return(text: &str) -> Result<Command, ParseError> {
    let card_number: u64 = scan_card_number(text)?;
    Ok(Command::ReturnCard { card_number })
}

/// Parses a unit sub-ledger transcript: credit, update, or issuance.
fn parse_unit_command(text: &str) -> Result<Command, ParseError> {
    if text.contains(CREDIT_KEYWORD) {
        let card_number: u64 = scan_card_number(text)?;
        return Ok(Command::UnitCredit { card_number });
    }

    let is_update: bool = UPDATE_KEYWORDS.iter().any(|kw: &&str| text.contains(kw));
    let (card_number, holder_name, holder_id, fuel_amount) = parse_unit_details(text)?;
    if is_update {
        Ok(Command::UnitUpdate {
            card_number,
            holder_name,
            holder_id,
            fuel_amount,
        })
    } else {
        Ok(Command::UnitIssue {
            card_number,
            holder_name,
            holder_id,
            fuel_amount,
        })
    }
}

/// Extracts the shared unit issuance/update details.
///
/// Comma-delimited transcripts carry: card reference, holder name,
/// holder id, fuel amount. Plain speech is scanned for a 7-8 digit
/// holder id token and the liter-adjacent amount.
fn parse_unit_details(text: &str) -> Result<(u64, String, String, u32), ParseError> {
    let segments: Vec<&str> = comma_segments(text);
    if segments.len() >= 4 {
        let card_number: u64 =
            first_integer(segments[0]).ok_or(ParseError::MissingField("card_number"))?;
        let holder_name: String = segments[1].to_string();
        let holder_id: String = segments[2].trim().to_string();
        if !is_holder_id_shaped(&holder_id) {
            return Err(ParseError::MissingField("holder_id"));
        }
        let amount_raw: u64 =
            first_integer(segments[3]).ok_or(ParseError::MissingField("fuel_amount"))?;
        let fuel_amount: u32 =
            u32::try_from(amount_raw).map_err(|_| ParseError::MissingField("fuel_amount"))?;
        return Ok((card_number, holder_name, holder_id, fuel_amount));
    }

    let card_number: u64 = scan_card_number(text)?;
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let id_index: usize = tokens
        .iter()
        .position(|token: &&str| is_holder_id_shaped(token))
        .ok_or(ParseError::InsufficientDetails)?;
    let holder_id: String = tokens[id_index].to_string();

    // Name tokens sit between the card number and the holder id.
    let card_token: String = card_number.to_string();
    let card_index: usize = tokens
        .iter()
        .position(|token: &&str| first_integer(token) == Some(card_number) && **token == card_token)
        .or_else(|| {
            tokens
                .iter()
                .position(|token: &&str| first_integer(token) == Some(card_number))
        })
        .ok_or(ParseError::InsufficientDetails)?;
    let holder_name: String = tokens
        .get(card_index + 1..id_index)
        .unwrap_or(&[])
        .iter()
        .filter(|token| !UPDATE_KEYWORDS.contains(*token) && **token != UNIT_KEYWORD)
        .copied()
        .collect::<Vec<&str>>()
        .join(" ");
    if holder_name.is_empty() {
        return Err(ParseError::MissingField("holder_name"));
    }

    let rest: &[&str] = tokens.get(id_index + 1..).unwrap_or(&[]);
    let fuel_amount: u32 =
        scan_amount(rest, card_number).ok_or(ParseError::MissingField("fuel_amount"))?;
    Ok((card_number, holder_name, holder_id, fuel_amount))
}

/// Checks whether a token is shaped like a national holder id: seven
/// or eight bare digits.
fn is_holder_id_shaped(token: &str) -> bool {
    (7..=8).contains(&token.len()) && token.chars().all(|c: char| c.is_ascii_digit())
}
