use thiserror::Error;

/// Failures while reading the signup workbook
#[derive(Error, Debug)]
pub enum InputError {
    #[error("input file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported input format: {0} (expected .xlsx, .xls or .csv)")]
    UnsupportedFormat(String),

    #[error("CSV responses need a variables file as well (--variables)")]
    MissingVariables,

    #[error("failed to open workbook: {0}")]
    Workbook(String),

    #[error("failed to read sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },

    #[error("failed to parse CSV: {0}")]
    Csv(String),

    #[error("responses sheet is empty")]
    EmptyResponses,

    #[error("responses header has no {0} column")]
    MissingColumn(&'static str),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for InputError {
    fn from(err: csv::Error) -> Self {
        InputError::Csv(err.to_string())
    }
}

impl From<calamine::Error> for InputError {
    fn from(err: calamine::Error) -> Self {
        InputError::Workbook(err.to_string())
    }
}

/// Failures while writing the roster
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to serialize roster: {0}")]
    Json(#[from] serde_json::Error),
}

impl OutputError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        OutputError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
