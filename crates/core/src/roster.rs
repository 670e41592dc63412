//! Attendee roster CSV import.
//!
//! Registration platforms export slightly different CSV shapes, so columns
//! are located by header name (case-insensitive) rather than position:
//!
//! ```text
//! Name,Email,Ticket Code
//! Nimali Perera,nimali@example.com,CCC-0012
//! "Silva, Ruwan",RUWAN@example.com,
//! ```
//!
//! Rows without a usable email are reported in [`RosterImport::skipped`]
//! instead of failing the whole import.

use std::collections::HashSet;

use serde::Serialize;

use crate::email::{is_valid_email, local_part, normalize_email};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Header aliases
// ---------------------------------------------------------------------------

const EMAIL_HEADERS: &[&str] = &["email", "e-mail", "email address", "e-mail address"];
const NAME_HEADERS: &[&str] = &["name", "full name", "attendee name"];
const FIRST_NAME_HEADERS: &[&str] = &["first name", "firstname", "given name"];
const LAST_NAME_HEADERS: &[&str] = &["last name", "lastname", "surname", "family name"];
const TICKET_HEADERS: &[&str] = &["ticket", "ticket code", "ticket id", "code", "token"];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One registered attendee parsed from the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// Normalized (trimmed, lowercased) email.
    pub email: String,
    pub name: String,
    pub ticket_code: Option<String>,
}

/// A data row that was not imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number where the row starts.
    pub line: usize,
    pub reason: String,
}

/// Result of parsing a roster CSV.
#[derive(Debug, Clone, Default)]
pub struct RosterImport {
    pub entries: Vec<RosterEntry>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug)]
struct CsvRecord {
    line: usize,
    fields: Vec<String>,
}

impl CsvRecord {
    fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }

    fn field(&self, idx: Option<usize>) -> Option<&str> {
        idx.and_then(|i| self.fields.get(i))
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
    }
}

#[derive(Debug)]
struct Columns {
    email: usize,
    name: Option<usize>,
    first_name: Option<usize>,
    last_name: Option<usize>,
    ticket: Option<usize>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a roster CSV into attendee entries.
///
/// Fails only when the input has no header row or no email column.
/// Duplicate emails keep the first occurrence.
pub fn parse_roster_csv(text: &str) -> Result<RosterImport, CoreError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = split_records(text).into_iter().filter(|r| !r.is_blank());

    let header = records
        .next()
        .ok_or_else(|| CoreError::Validation("Roster CSV is empty".into()))?;
    let columns = locate_columns(&header.fields)?;

    let mut import = RosterImport::default();
    let mut seen: HashSet<String> = HashSet::new();

    for record in records {
        let Some(raw_email) = record.field(Some(columns.email)) else {
            import.skipped.push(SkippedRow {
                line: record.line,
                reason: "missing email".into(),
            });
            continue;
        };

        if !is_valid_email(raw_email) {
            import.skipped.push(SkippedRow {
                line: record.line,
                reason: format!("invalid email '{raw_email}'"),
            });
            continue;
        }

        let email = normalize_email(raw_email);
        if !seen.insert(email.clone()) {
            import.skipped.push(SkippedRow {
                line: record.line,
                reason: format!("duplicate email '{email}'"),
            });
            continue;
        }

        let name = resolve_name(&record, &columns, &email);
        let ticket_code = record.field(columns.ticket).map(str::to_string);

        import.entries.push(RosterEntry {
            email,
            name,
            ticket_code,
        });
    }

    Ok(import)
}

fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace('_', " ")
}

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|h| aliases.contains(&h.as_str()))
}

fn locate_columns(raw_headers: &[String]) -> Result<Columns, CoreError> {
    let headers: Vec<String> = raw_headers.iter().map(|h| normalize_header(h)).collect();

    let email = find_column(&headers, EMAIL_HEADERS).ok_or_else(|| {
        CoreError::Validation(format!(
            "Roster CSV has no email column. Expected one of: {EMAIL_HEADERS:?}"
        ))
    })?;

    Ok(Columns {
        email,
        name: find_column(&headers, NAME_HEADERS),
        first_name: find_column(&headers, FIRST_NAME_HEADERS),
        last_name: find_column(&headers, LAST_NAME_HEADERS),
        ticket: find_column(&headers, TICKET_HEADERS),
    })
}

/// Full name column, else first + last, else the email local part.
fn resolve_name(record: &CsvRecord, columns: &Columns, email: &str) -> String {
    if let Some(name) = record.field(columns.name) {
        return name.to_string();
    }

    let parts: Vec<&str> = [columns.first_name, columns.last_name]
        .into_iter()
        .filter_map(|idx| record.field(idx))
        .collect();
    if !parts.is_empty() {
        return parts.join(" ");
    }

    local_part(email).to_string()
}

/// Split CSV text into records, honouring double-quoted fields.
///
/// Quoted fields may contain commas, newlines and `""` escapes. Carriage
/// returns outside quotes are dropped so CRLF files parse like LF files.
fn split_records(text: &str) -> Vec<CsvRecord> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                records.push(CsvRecord {
                    line: record_line,
                    fields: std::mem::take(&mut fields),
                });
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(CsvRecord {
            line: record_line,
            fields,
        });
    }

    records
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let csv = "NAME,E-Mail\nNimali Perera,Nimali@Example.com\n";
        let import = parse_roster_csv(csv).unwrap();

        assert_eq!(
            import.entries,
            vec![RosterEntry {
                email: "nimali@example.com".into(),
                name: "Nimali Perera".into(),
                ticket_code: None,
            }]
        );
        assert!(import.skipped.is_empty());
    }

    #[test]
    fn columns_found_in_any_position() {
        let csv = "ticket_code,Registered,Email_Address,Full_Name\nT-1,yes,a@b.lk,Ann\n";
        let import = parse_roster_csv(csv).unwrap();

        assert_eq!(import.entries.len(), 1);
        assert_eq!(import.entries[0].email, "a@b.lk");
        assert_eq!(import.entries[0].name, "Ann");
        assert_eq!(import.entries[0].ticket_code.as_deref(), Some("T-1"));
    }

    #[test]
    fn rows_without_valid_email_are_skipped() {
        let csv = "name,email\nNo Email,\nBad Email,not-an-email\nGood,good@example.com\n";
        let import = parse_roster_csv(csv).unwrap();

        assert_eq!(import.entries.len(), 1);
        assert_eq!(import.entries[0].email, "good@example.com");
        assert_eq!(import.skipped.len(), 2);
        assert_eq!(import.skipped[0].line, 2);
        assert_eq!(import.skipped[0].reason, "missing email");
        assert_eq!(import.skipped[1].line, 3);
        assert!(import.skipped[1].reason.contains("not-an-email"));
    }

    #[test]
    fn duplicate_emails_keep_first_row() {
        let csv = "name,email\nFirst,dup@example.com\nSecond,DUP@example.com\n";
        let import = parse_roster_csv(csv).unwrap();

        assert_eq!(import.entries.len(), 1);
        assert_eq!(import.entries[0].name, "First");
        assert_eq!(import.skipped.len(), 1);
        assert!(import.skipped[0].reason.starts_with("duplicate"));
    }

    #[test]
    fn quoted_fields_with_commas_and_escapes() {
        let csv = "name,email\n\"Silva, Ruwan \"\"RS\"\"\",ruwan@example.com\n";
        let import = parse_roster_csv(csv).unwrap();

        assert_eq!(import.entries[0].name, "Silva, Ruwan \"RS\"");
    }

    #[test]
    fn quoted_newline_keeps_line_numbers_accurate() {
        let csv = "name,email\n\"Multi\nLine\",\nOk,ok@example.com\n";
        let import = parse_roster_csv(csv).unwrap();

        assert_eq!(import.skipped[0].line, 2);
        assert_eq!(import.entries[0].email, "ok@example.com");
    }

    #[test]
    fn crlf_bom_and_blank_lines() {
        let csv = "\u{feff}Email,Name\r\n\r\nx@example.com,X\r\n";
        let import = parse_roster_csv(csv).unwrap();

        assert_eq!(import.entries.len(), 1);
        assert_eq!(import.entries[0].name, "X");
        assert!(import.skipped.is_empty());
    }

    #[test]
    fn name_falls_back_to_first_last_then_local_part() {
        let csv = "first name,last name,email\nKasun,Fernando,k@example.com\n,,anon@example.com\n";
        let import = parse_roster_csv(csv).unwrap();

        assert_eq!(import.entries[0].name, "Kasun Fernando");
        assert_eq!(import.entries[1].name, "anon");
    }

    #[test]
    fn missing_final_newline() {
        let import = parse_roster_csv("email\nlast@example.com").unwrap();
        assert_eq!(import.entries[0].email, "last@example.com");
    }

    #[test]
    fn missing_email_column_is_an_error() {
        assert_matches!(
            parse_roster_csv("name,phone\nA,123\n"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_matches!(parse_roster_csv(""), Err(CoreError::Validation(_)));
        assert_matches!(parse_roster_csv("\n\n"), Err(CoreError::Validation(_)));
    }
}
