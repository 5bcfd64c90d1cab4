use std::collections::HashSet;
use tracing::warn;

use crate::schedule::{EventConfig, FieldTripConfig, TeacherScope};
use super::source::Grid;

// Variables sheet layout: A party name, B count per teacher,
// C trip name, D teachers ("ALL" or pipe-separated), E count per teacher
const PARTY_NAME: usize = 0;
const PARTY_COUNT: usize = 1;
const TRIP_NAME: usize = 2;
const TRIP_TEACHERS: usize = 3;
const TRIP_COUNT: usize = 4;

/// Events declared in the variables sheet, in sheet order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSchedule {
    pub parties: Vec<EventConfig>,
    pub field_trips: Vec<FieldTripConfig>,
}

/// Parses the leading integer of a cell ("3", " 2 per class"), 0 when there is none
pub fn parse_count(value: &str) -> usize {
    let value = value.trim_start();
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if negative {
        return 0;
    }
    digits[..end].parse().unwrap_or(0)
}

/// Parses the teacher column of a field trip row
pub fn parse_teacher_scope(value: &str) -> TeacherScope {
    let value = value.trim();
    if value == TeacherScope::ALL_MARKER {
        return TeacherScope::All;
    }

    let mut seen = HashSet::new();
    let teachers = value
        .split('|')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_string()))
        .map(str::to_string)
        .collect();
    TeacherScope::Only(teachers)
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Reads party and field trip definitions from the variables sheet
///
/// A row may declare a party, a field trip, or both. When a name repeats
/// within the same kind, the first declaration wins.
pub fn parse_variables(grid: &Grid) -> EventSchedule {
    let mut schedule = EventSchedule::default();
    let mut party_names = HashSet::new();
    let mut trip_names = HashSet::new();

    for (row_idx, row) in grid.iter().enumerate().skip(1) {
        if !cell(row, PARTY_NAME).is_empty() && !cell(row, PARTY_COUNT).is_empty() {
            let name = cell(row, PARTY_NAME).trim().to_string();
            if party_names.insert(name.clone()) {
                schedule.parties.push(EventConfig {
                    name,
                    count: parse_count(cell(row, PARTY_COUNT)),
                });
            } else {
                warn!(row = row_idx + 1, party = %name, "duplicate party ignored");
            }
        }

        if !cell(row, TRIP_NAME).is_empty()
            && !cell(row, TRIP_TEACHERS).is_empty()
            && !cell(row, TRIP_COUNT).is_empty()
        {
            let name = cell(row, TRIP_NAME).trim().to_string();
            if trip_names.insert(name.clone()) {
                schedule.field_trips.push(FieldTripConfig {
                    event: EventConfig {
                        name,
                        count: parse_count(cell(row, TRIP_COUNT)),
                    },
                    teachers: parse_teacher_scope(cell(row, TRIP_TEACHERS)),
                });
            } else {
                warn!(row = row_idx + 1, trip = %name, "duplicate field trip ignored");
            }
        }
    }

    schedule
}
