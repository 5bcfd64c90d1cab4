pub mod source;
pub mod responses;
pub mod variables;

use std::path::Path;
use tracing::info;

use crate::error::InputError;
use crate::schedule::{EventConfig, FieldTripConfig, Volunteer};

pub use source::{read_sheets, SignupSheets, RESPONSES_SHEET, VARIABLES_SHEET};
pub use responses::{detect_columns, parse_responses};
pub use variables::{parse_variables, EventSchedule};

/// Everything the allocator needs from the signup workbook
#[derive(Debug, Clone, Default)]
pub struct SignupData {
    pub volunteers: Vec<Volunteer>,
    pub parties: Vec<EventConfig>,
    pub field_trips: Vec<FieldTripConfig>,
    pub teachers: Vec<String>,
}

/// Builds signup data from already-loaded sheets
///
/// The variables sheet is read first because response cells are matched
/// against the declared event names.
pub fn parse_sheets(sheets: &SignupSheets) -> Result<SignupData, InputError> {
    let EventSchedule { parties, field_trips } = parse_variables(&sheets.variables);
    let responses = parse_responses(&sheets.responses, &parties, &field_trips)?;

    Ok(SignupData {
        volunteers: responses.volunteers,
        parties,
        field_trips,
        teachers: responses.teachers,
    })
}

/// Loads signups from a workbook, or from a responses CSV plus a variables CSV
pub fn load_signups(input: &Path, variables: Option<&Path>) -> Result<SignupData, InputError> {
    let sheets = read_sheets(input, variables)?;
    let data = parse_sheets(&sheets)?;

    info!(
        input = %input.display(),
        signups = data.volunteers.len(),
        parties = data.parties.len(),
        field_trips = data.field_trips.len(),
        teachers = data.teachers.len(),
        "signups loaded"
    );
    Ok(data)
}
