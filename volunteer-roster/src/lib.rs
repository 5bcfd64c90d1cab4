//! Volunteer roster builder for school parties and field trips.
//!
//! Signups are read from the form-responses workbook, allocated to teachers by
//! [`schedule::allocate`] and written out as per-event rosters.

pub mod cli;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod parser;
pub mod schedule;

pub use schedule::{allocate, AssignmentTable, EventConfig, EventKind, FieldTripConfig, TeacherScope, Volunteer};
