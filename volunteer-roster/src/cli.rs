use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::export::OutputSelection;

/// Assign party and field trip volunteers to teachers
#[derive(Debug, Parser)]
#[command(name = "volunteer-roster", version, about)]
pub struct Cli {
    /// Signup workbook (.xlsx/.xls) or form responses exported as .csv
    #[arg(long, short = 'i', env = "ROSTER_INPUT", default_value = "input.xlsx")]
    pub input: PathBuf,

    /// Variables sheet as .csv (required when --input is a .csv)
    #[arg(long, env = "ROSTER_VARIABLES")]
    pub variables: Option<PathBuf>,

    /// Directory the roster files are written to
    #[arg(long, short = 'o', env = "ROSTER_OUTPUT", default_value = "roster")]
    pub output: PathBuf,

    /// Seed for the shuffles; the same seed and input give the same roster
    #[arg(long, short = 's', env = "ROSTER_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Which files to write
    #[arg(long, value_enum, default_value_t = OutputFormat::All)]
    pub format: OutputFormat,

    /// Also print the full roster to stdout
    #[arg(long)]
    pub print: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    All,
    Xlsx,
    Csv,
    Text,
    Json,
}

impl OutputFormat {
    pub fn selection(self) -> OutputSelection {
        match self {
            OutputFormat::All => OutputSelection::ALL,
            OutputFormat::Xlsx => OutputSelection { workbook: true, ..OutputSelection::NONE },
            OutputFormat::Csv => OutputSelection { csv: true, ..OutputSelection::NONE },
            OutputFormat::Text => OutputSelection { text: true, ..OutputSelection::NONE },
            OutputFormat::Json => OutputSelection { json: true, ..OutputSelection::NONE },
        }
    }
}
