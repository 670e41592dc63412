//! Attendee roster records and DTOs.

use cafe_core::roster::{RosterEntry, SkippedRow};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_email_input;

/// A registered attendee. `email` is stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_code: Option<String>,
}

impl From<RosterEntry> for Attendee {
    fn from(entry: RosterEntry) -> Self {
        Self {
            email: entry.email,
            name: entry.name,
            ticket_code: entry.ticket_code,
        }
    }
}

/// Body of `POST /attendees/verify`.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyAttendee {
    #[validate(custom(function = "validate_email_input"))]
    pub email: String,
}

/// How an imported roster combines with the stored one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Imported rows become the whole roster.
    #[default]
    Replace,
    /// Imported rows are added; existing emails are updated in place.
    Merge,
}

/// Query parameters for `POST /admin/attendees/import`.
#[derive(Debug, Default, Deserialize)]
pub struct ImportParams {
    pub mode: Option<ImportMode>,
}

/// Counts from a merge of imported rows into the roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeCounts {
    pub added: usize,
    pub updated: usize,
}

/// Response body for an import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub mode: ImportMode,
    /// Rows accepted from the CSV.
    pub imported: usize,
    pub added: usize,
    pub updated: usize,
    /// Roster size after the import.
    pub total: usize,
    pub skipped: Vec<SkippedRow>,
}
