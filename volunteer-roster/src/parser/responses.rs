use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::InputError;
use crate::schedule::{EventConfig, EventKind, FieldTripConfig, Volunteer};
use super::source::Grid;

/// Responses shorter than this are treated as incomplete and skipped
const MIN_RESPONSE_CELLS: usize = 6;

/// Marker volunteers use to opt out of an event kind
const NOT_APPLICABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameColumns {
    Full(usize),
    Split { first: usize, last: usize },
}

/// Column positions found in the responses header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseColumns {
    pub teacher: usize,
    pub name: NameColumns,
    pub phone: usize,
    pub email: usize,
    pub parties: Option<usize>,
    pub field_trips: Option<usize>,
}

/// Volunteers plus every teacher named in the responses (first-seen order)
#[derive(Debug, Clone, Default)]
pub struct Responses {
    pub volunteers: Vec<Volunteer>,
    pub teachers: Vec<String>,
}

/// Finds the columns the parser needs by matching header text
///
/// Matching is case-insensitive on substrings; "first and last name" is tested
/// before "first name" so a combined name column is not mistaken for a split one.
pub fn detect_columns(header: &[String]) -> Result<ResponseColumns, InputError> {
    let mut teacher = None;
    let mut full_name = None;
    let mut first_name = None;
    let mut last_name = None;
    let mut phone = None;
    let mut email = None;
    let mut parties = None;
    let mut field_trips = None;

    for (idx, cell) in header.iter().enumerate() {
        let text = cell.to_lowercase();
        if text.contains("teacher") {
            teacher = Some(idx);
        } else if text.contains("first and last name") {
            full_name = Some(idx);
        } else if text.contains("first name") {
            first_name = Some(idx);
        } else if text.contains("last name") {
            last_name = Some(idx);
        } else if text.contains("phone") {
            phone = Some(idx);
        } else if text.contains("email") {
            email = Some(idx);
        } else if text.contains("party or parties") {
            parties = Some(idx);
        } else if text.contains("field trip(s)") {
            field_trips = Some(idx);
        }
    }

    let name = match (full_name, first_name, last_name) {
        (Some(full), _, _) => NameColumns::Full(full),
        (None, Some(first), Some(last)) => NameColumns::Split { first, last },
        _ => return Err(InputError::MissingColumn("name")),
    };

    Ok(ResponseColumns {
        teacher: teacher.ok_or(InputError::MissingColumn("teacher"))?,
        name,
        phone: phone.ok_or(InputError::MissingColumn("phone"))?,
        email: email.ok_or(InputError::MissingColumn("email"))?,
        parties,
        field_trips,
    })
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Event names a signup cell mentions, in declared order
fn signed_up_for<'a>(answer: &str, event_names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    if answer.is_empty() || answer.contains(NOT_APPLICABLE) {
        return Vec::new();
    }
    event_names.filter(|name| answer.contains(name)).collect()
}

/// Turns form responses into one Volunteer per (person, event) signup
///
/// Event names are matched as substrings of the multi-select answer cells, so
/// only events declared in the variables sheet are recognised.
pub fn parse_responses(
    grid: &Grid,
    parties: &[EventConfig],
    field_trips: &[FieldTripConfig],
) -> Result<Responses, InputError> {
    let header = grid.first().ok_or(InputError::EmptyResponses)?;
    let columns = detect_columns(header)?;
    debug!(?columns, "responses header detected");

    let mut volunteers = Vec::new();
    let mut teachers = Vec::new();
    let mut seen_teachers = HashSet::new();
    let mut skipped = 0;

    for row in grid.iter().skip(1) {
        if row.len() < MIN_RESPONSE_CELLS {
            skipped += 1;
            continue;
        }

        let teacher = cell(row, columns.teacher).trim().to_string();
        let name = match columns.name {
            NameColumns::Full(idx) => cell(row, idx).trim().to_string(),
            NameColumns::Split { first, last } => {
                format!("{} {}", cell(row, first).trim(), cell(row, last).trim())
            }
        };
        let phone = cell(row, columns.phone).trim().to_string();
        let email = cell(row, columns.email).trim().to_string();

        // A blank teacher still counts as a teacher so the signup gets allocated
        if teacher.is_empty() {
            warn!(volunteer = %name, "response has no teacher");
        }
        if seen_teachers.insert(teacher.clone()) {
            teachers.push(teacher.clone());
        }

        let party_answer = columns.parties.map(|idx| cell(row, idx)).unwrap_or("");
        let trip_answer = columns.field_trips.map(|idx| cell(row, idx)).unwrap_or("");

        let signups = signed_up_for(party_answer, parties.iter().map(|p| p.name.as_str()))
            .into_iter()
            .map(|event| (EventKind::Party, event))
            .chain(
                signed_up_for(trip_answer, field_trips.iter().map(|t| t.event.name.as_str()))
                    .into_iter()
                    .map(|event| (EventKind::FieldTrip, event)),
            );

        for (kind, event_name) in signups {
            volunteers.push(Volunteer {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                teacher: teacher.clone(),
                kind,
                event_name: event_name.to_string(),
                is_alternate: false,
            });
        }
    }

    if skipped > 0 {
        warn!(skipped, "incomplete response rows skipped");
    }

    Ok(Responses { volunteers, teachers })
}
