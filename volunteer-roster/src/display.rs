use crate::schedule::{AssignmentTable, EventConfig, EventKind, FieldTripConfig, TeacherAssignments, Volunteer};

/// Formats a phone number as (xxx) xxx-xxxx when it has exactly 10 digits,
/// otherwise returns it unchanged
pub fn format_phone_number(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 10 {
        return input.to_string();
    }
    format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
}

/// Declared events in output order: parties, then field trips
pub fn declared_events<'a>(
    parties: &'a [EventConfig],
    field_trips: &'a [FieldTripConfig],
) -> Vec<(EventKind, &'a EventConfig)> {
    parties
        .iter()
        .map(|p| (EventKind::Party, p))
        .chain(field_trips.iter().map(|t| (EventKind::FieldTrip, &t.event)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolunteerLine {
    pub teacher: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub alternate: bool,
}

impl VolunteerLine {
    fn new(teacher: &str, volunteer: &Volunteer) -> Self {
        VolunteerLine {
            teacher: teacher.to_string(),
            name: volunteer.name.clone(),
            phone: format_phone_number(&volunteer.phone),
            email: volunteer.email.clone(),
            alternate: volunteer.is_alternate,
        }
    }
}

/// One line of an event roster, shared by the workbook, CSV and text writers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterRow {
    Title(String),
    Header,
    Teacher(String),
    Volunteer(VolunteerLine),
    /// Unfilled primary slot
    OpenSlot,
    AlternatesDivider,
    Spacer,
}

/// Lays out one event: teachers in name order, primaries padded to the
/// event count when any were placed, then the alternates under a divider
pub fn event_rows(event: &EventConfig, assignments: Option<&TeacherAssignments>) -> Vec<RosterRow> {
    let mut rows = vec![RosterRow::Title(event.name.clone()), RosterRow::Header];
    let Some(assignments) = assignments else {
        return rows;
    };

    for (teacher, volunteers) in assignments {
        if volunteers.is_empty() {
            continue;
        }
        rows.push(RosterRow::Teacher(teacher.clone()));

        let (alternates, primaries): (Vec<&Volunteer>, Vec<&Volunteer>) =
            volunteers.iter().partition(|v| v.is_alternate);

        for volunteer in &primaries {
            rows.push(RosterRow::Volunteer(VolunteerLine::new(teacher, volunteer)));
        }
        // Open slots only follow a started primary list
        if !primaries.is_empty() {
            for _ in primaries.len()..event.count {
                rows.push(RosterRow::OpenSlot);
            }
        }

        if !alternates.is_empty() {
            rows.push(RosterRow::AlternatesDivider);
            for volunteer in &alternates {
                rows.push(RosterRow::Volunteer(VolunteerLine::new(teacher, volunteer)));
            }
        }

        rows.push(RosterRow::Spacer);
    }

    rows
}

/// Renders a roster row as a line of plain text
pub fn render_row(row: &RosterRow) -> String {
    match row {
        RosterRow::Title(name) => format!("** {} **", name),
        RosterRow::Header => "Teacher | Name | Phone | Email".to_string(),
        RosterRow::Teacher(teacher) => format!("== {} ==", teacher),
        RosterRow::Volunteer(line) => {
            let marker = if line.alternate { "*" } else { "-" };
            format!("  {} {} | {} | {}", marker, line.name, line.phone, line.email)
        }
        RosterRow::OpenSlot => "  - [OPEN]".to_string(),
        RosterRow::AlternatesDivider => "  -- ALTERNATES --".to_string(),
        RosterRow::Spacer => String::new(),
    }
}

/// Renders every declared event as one text document
pub fn render_roster_text(
    table: &AssignmentTable,
    parties: &[EventConfig],
    field_trips: &[FieldTripConfig],
) -> String {
    let mut out = String::new();
    for (kind, event) in declared_events(parties, field_trips) {
        for row in event_rows(event, table.event(kind, &event.name)) {
            out.push_str(&render_row(&row));
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Fill statistics for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub kind: EventKind,
    pub name: String,
    pub required: usize,
    pub primaries: usize,
    pub alternates: usize,
}

pub fn summarize(
    table: &AssignmentTable,
    parties: &[EventConfig],
    field_trips: &[FieldTripConfig],
    all_teachers: &[String],
) -> Vec<EventSummary> {
    let party_summaries = parties
        .iter()
        .map(|p| (EventKind::Party, p, all_teachers.len()));
    let trip_summaries = field_trips
        .iter()
        .map(|t| (EventKind::FieldTrip, &t.event, t.teachers.resolve(all_teachers).len()));

    party_summaries
        .chain(trip_summaries)
        .map(|(kind, event, teacher_count)| {
            let assigned = table.event(kind, &event.name).into_iter().flat_map(|t| t.values().flatten());
            let (alternates, primaries): (Vec<&Volunteer>, Vec<&Volunteer>) = assigned.partition(|v| v.is_alternate);
            EventSummary {
                kind,
                name: event.name.clone(),
                required: event.count * teacher_count,
                primaries: primaries.len(),
                alternates: alternates.len(),
            }
        })
        .collect()
}

/// Prints a short fill report for every event
pub fn print_summary(summaries: &[EventSummary]) {
    println!("\n=== Volunteer Assignments ===");
    for summary in summaries {
        let marker = if summary.primaries < summary.required { "⚠️ " } else { "" };
        println!(
            "  {}{} ({}): {}/{} primary slots filled, {} alternates",
            marker,
            summary.name,
            summary.kind.label(),
            summary.primaries,
            summary.required,
            summary.alternates
        );
    }
}
