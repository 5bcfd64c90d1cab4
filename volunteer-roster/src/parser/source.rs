use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

use crate::error::InputError;

pub const RESPONSES_SHEET: &str = "Form Responses 1";
pub const VARIABLES_SHEET: &str = "Variables";

/// Rows of trimmed-at-the-end cell text
pub type Grid = Vec<Vec<String>>;

/// The two raw tables the parsers work from
#[derive(Debug, Clone, Default)]
pub struct SignupSheets {
    pub responses: Grid,
    pub variables: Grid,
}

/// Reads the responses and variables tables
///
/// `.xlsx`/`.xls` inputs hold both sheets; a `.csv` input is the responses
/// table alone and needs `variables` to point at a second CSV.
pub fn read_sheets(input: &Path, variables: Option<&Path>) -> Result<SignupSheets, InputError> {
    if !input.exists() {
        return Err(InputError::FileNotFound(input.display().to_string()));
    }

    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" => read_workbook(input),
        "csv" => {
            let variables = variables.ok_or(InputError::MissingVariables)?;
            if !variables.exists() {
                return Err(InputError::FileNotFound(variables.display().to_string()));
            }
            Ok(SignupSheets {
                responses: read_csv_grid(input)?,
                variables: read_csv_grid(variables)?,
            })
        }
        _ => Err(InputError::UnsupportedFormat(ext)),
    }
}

fn read_workbook(path: &Path) -> Result<SignupSheets, InputError> {
    let mut workbook = open_workbook_auto(path)?;

    let mut sheet = |name: &str| -> Result<Grid, InputError> {
        let range = workbook.worksheet_range(name).map_err(|e| InputError::Sheet {
            sheet: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(range_to_grid(&range))
    };

    Ok(SignupSheets {
        responses: sheet(RESPONSES_SHEET)?,
        variables: sheet(VARIABLES_SHEET)?,
    })
}

/// Converts a sheet range to rows anchored at A1
fn range_to_grid(range: &Range<Data>) -> Grid {
    // calamine starts the range at the first used cell, not at A1
    let (first_row, first_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut grid: Grid = vec![Vec::new(); first_row];
    for row in range.rows() {
        let mut cells = vec![String::new(); first_col];
        cells.extend(row.iter().map(|cell| cell.to_string()));
        grid.push(trim_trailing_empty(cells));
    }
    grid
}

fn read_csv_grid(path: &Path) -> Result<Grid, InputError> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // rows may differ in length
        .from_reader(file);

    let mut grid = Vec::new();
    for result in reader.records() {
        let record = result?;
        grid.push(trim_trailing_empty(record.iter().map(str::to_string).collect()));
    }
    Ok(grid)
}

/// Drops empty cells at the end of a row so its length marks the last filled cell
pub fn trim_trailing_empty(mut cells: Vec<String>) -> Vec<String> {
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}
