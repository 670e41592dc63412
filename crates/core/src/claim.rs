//! Meal claim identifiers and meal tokens.
//!
//! A claim is looked up either by email or by the ticket code printed on
//! the attendee's registration. Confirmed claims receive a short meal token
//! that the kitchen reads back when the order is collected.

use rand::Rng;

use crate::email::{is_valid_email, normalize_email};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Token alphabet without look-alike characters (`0/O`, `1/I`).
pub const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Number of characters in a meal token.
pub const TOKEN_LENGTH: usize = 8;

/// How many fresh tokens to try before giving up on a collision streak.
pub const MAX_TOKEN_ATTEMPTS: usize = 5;

/// Upper bound on a ticket code accepted as an identifier.
pub const MAX_TICKET_CODE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Generate a random meal token, e.g. `K7QF3MXA`.
pub fn generate_meal_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LENGTH)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// Canonical form of a token typed or scanned by a person: uppercase with
/// spaces and dashes removed.
pub fn normalize_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Whether a normalized token could have been produced by
/// [`generate_meal_token`].
pub fn is_well_formed_token(token: &str) -> bool {
    token.len() == TOKEN_LENGTH && token.bytes().all(|b| TOKEN_ALPHABET.contains(&b))
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// What an attendee typed into the claim form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimIdentifier {
    /// Normalized email.
    Email(String),
    /// Trimmed registration ticket code.
    TicketCode(String),
}

impl ClaimIdentifier {
    /// Anything containing `@` is treated as an email, everything else as a
    /// ticket code.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation(
                "Enter the email or ticket code you registered with".into(),
            ));
        }

        if trimmed.contains('@') {
            if !is_valid_email(trimmed) {
                return Err(CoreError::Validation(format!(
                    "'{trimmed}' is not a valid email address"
                )));
            }
            return Ok(Self::Email(normalize_email(trimmed)));
        }

        if trimmed.len() > MAX_TICKET_CODE_LENGTH {
            return Err(CoreError::Validation(format!(
                "Ticket code exceeds {MAX_TICKET_CODE_LENGTH} characters"
            )));
        }
        Ok(Self::TicketCode(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Email(s) | Self::TicketCode(s) => s,
        }
    }
}
