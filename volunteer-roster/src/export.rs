use csv::WriterBuilder;
use rust_xlsxwriter::Workbook;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::display::{declared_events, event_rows, render_roster_text, RosterRow};
use crate::error::OutputError;
use crate::schedule::{AssignmentTable, EventConfig, EventKind, FieldTripConfig, TeacherAssignments};

pub const ROSTER_WORKBOOK_FILE: &str = "roster.xlsx";
pub const ROSTER_TEXT_FILE: &str = "roster.txt";
pub const ROSTER_JSON_FILE: &str = "assignments.json";

/// Excel's sheet name limit
const MAX_NAME_LEN: usize = 31;

/// Used when nothing of the event name survives sanitizing
const FALLBACK_SHEET_NAME: &str = "Event";

/// Column widths for Teacher, Name, Phone, Email
const COLUMN_WIDTHS: [f64; 4] = [28.0, 32.0, 18.0, 35.0];

/// Which files `write_roster` produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSelection {
    pub workbook: bool,
    pub csv: bool,
    pub text: bool,
    pub json: bool,
}

impl OutputSelection {
    pub const ALL: OutputSelection = OutputSelection { workbook: true, csv: true, text: true, json: true };
    pub const NONE: OutputSelection = OutputSelection { workbook: false, csv: false, text: false, json: false };
}

/// Makes an event name valid as a worksheet name
///
/// Slashes become dashes, `? * [ ] :` are dropped, the result is cut to 31
/// characters and may not start or end with an apostrophe.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter_map(|c| match c {
            '/' | '\\' => Some('-'),
            '?' | '*' | '[' | ']' | ':' => None,
            other => Some(other),
        })
        .take(MAX_NAME_LEN)
        .collect();

    let cleaned = cleaned.trim_matches('\'');
    if cleaned.is_empty() {
        FALLBACK_SHEET_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Gives each event a distinct sheet name, suffixing " 2", " 3", ... on clashes
///
/// Names compare case-insensitively, as Excel does. CSV files reuse the same
/// names as their stems.
fn unique_sheet_name(name: &str, used: &mut HashSet<String>) -> String {
    let base = sanitize_sheet_name(name);
    let mut stem = base.clone();
    let mut n = 2;
    while !used.insert(stem.to_lowercase()) {
        let suffix = format!(" {}", n);
        let keep = MAX_NAME_LEN.saturating_sub(suffix.chars().count());
        stem = base.chars().take(keep).collect::<String>() + &suffix;
        n += 1;
    }
    stem
}

fn row_cells(row: &RosterRow) -> [String; 4] {
    let empty = String::new;
    match row {
        RosterRow::Title(name) => [name.clone(), empty(), empty(), empty()],
        RosterRow::Header => ["Teacher".into(), "Name".into(), "Phone".into(), "Email".into()],
        RosterRow::Teacher(teacher) => [teacher.clone(), empty(), empty(), empty()],
        RosterRow::Volunteer(line) => [
            line.teacher.clone(),
            line.name.clone(),
            line.phone.clone(),
            line.email.clone(),
        ],
        RosterRow::AlternatesDivider => ["ALTERNATES".into(), empty(), empty(), empty()],
        RosterRow::OpenSlot | RosterRow::Spacer => [empty(), empty(), empty(), empty()],
    }
}

/// Writes one event's roster rows as CSV
pub fn write_event_csv(path: &Path, rows: &[RosterRow]) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|e| OutputError::io(path, e))?;
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    for row in rows {
        wtr.write_record(row_cells(row))?;
    }

    wtr.flush().map_err(|e| OutputError::io(path, e))?;
    Ok(())
}

/// Writes every declared event as its own worksheet, parties first
pub fn write_workbook(
    path: &Path,
    table: &AssignmentTable,
    parties: &[EventConfig],
    field_trips: &[FieldTripConfig],
) -> Result<(), OutputError> {
    let mut workbook = Workbook::new();
    let mut used = HashSet::new();

    for (kind, event) in declared_events(parties, field_trips) {
        let sheet_name = unique_sheet_name(&event.name, &mut used);
        let rows = event_rows(event, table.event(kind, &event.name));

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet_name)?;
        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        for (row_idx, row) in rows.iter().enumerate() {
            for (col, value) in row_cells(row).iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(row_idx as u32, col as u16, value)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Writes one CSV per declared event into `dir`, parties first
pub fn write_event_csvs(
    dir: &Path,
    table: &AssignmentTable,
    parties: &[EventConfig],
    field_trips: &[FieldTripConfig],
) -> Result<Vec<PathBuf>, OutputError> {
    let mut used = HashSet::new();
    let mut written = Vec::new();

    for (kind, event) in declared_events(parties, field_trips) {
        let path = dir.join(format!("{}.csv", unique_sheet_name(&event.name, &mut used)));
        let rows = event_rows(event, table.event(kind, &event.name));
        write_event_csv(&path, &rows)?;
        written.push(path);
    }

    Ok(written)
}

/// Writes the plain-text roster for every event
pub fn write_roster_text(
    path: &Path,
    table: &AssignmentTable,
    parties: &[EventConfig],
    field_trips: &[FieldTripConfig],
) -> Result<(), OutputError> {
    let text = render_roster_text(table, parties, field_trips);
    fs::write(path, text).map_err(|e| OutputError::io(path, e))
}

#[derive(Serialize)]
struct RosterDocument<'a> {
    seed: u64,
    events: Vec<EventDocument<'a>>,
}

#[derive(Serialize)]
struct EventDocument<'a> {
    kind: EventKind,
    name: &'a str,
    count: usize,
    teachers: TeacherAssignments,
}

/// Writes the assignment table as JSON, events in declared order
pub fn write_json(
    path: &Path,
    table: &AssignmentTable,
    parties: &[EventConfig],
    field_trips: &[FieldTripConfig],
    seed: u64,
) -> Result<(), OutputError> {
    let events = declared_events(parties, field_trips)
        .into_iter()
        .map(|(kind, event)| EventDocument {
            kind,
            name: &event.name,
            count: event.count,
            teachers: table.event(kind, &event.name).cloned().unwrap_or_default(),
        })
        .collect();

    let file = File::create(path).map_err(|e| OutputError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &RosterDocument { seed, events })?;
    writer.flush().map_err(|e| OutputError::io(path, e))?;
    Ok(())
}

/// Writes the selected outputs into `dir`, creating it if needed
pub fn write_roster(
    dir: &Path,
    selection: OutputSelection,
    table: &AssignmentTable,
    parties: &[EventConfig],
    field_trips: &[FieldTripConfig],
    seed: u64,
) -> Result<Vec<PathBuf>, OutputError> {
    fs::create_dir_all(dir).map_err(|e| OutputError::io(dir, e))?;
    let mut written = Vec::new();

    if selection.workbook {
        let path = dir.join(ROSTER_WORKBOOK_FILE);
        write_workbook(&path, table, parties, field_trips)?;
        written.push(path);
    }
    if selection.csv {
        written.extend(write_event_csvs(dir, table, parties, field_trips)?);
    }
    if selection.text {
        let path = dir.join(ROSTER_TEXT_FILE);
        write_roster_text(&path, table, parties, field_trips)?;
        written.push(path);
    }
    if selection.json {
        let path = dir.join(ROSTER_JSON_FILE);
        write_json(&path, table, parties, field_trips, seed)?;
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "roster written");
    Ok(written)
}
