use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

/// Which dedup namespace an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "party")]
    Party,
    #[serde(rename = "fieldtrip")]
    FieldTrip,
}

impl EventKind {
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Party => "party",
            EventKind::FieldTrip => "field trip",
        }
    }
}

/// One signup row for one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub teacher: String,
    pub kind: EventKind,
    pub event_name: String,
    pub is_alternate: bool,
}

/// An event and the number of primary volunteers needed per teacher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    pub name: String,
    pub count: usize,
}

/// Teachers taking part in a field trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeacherScope {
    /// The `ALL` marker: every teacher seen in the responses
    All,
    Only(Vec<String>),
}

impl TeacherScope {
    pub const ALL_MARKER: &'static str = "ALL";

    /// Resolves the scope against the full teacher list
    pub fn resolve<'a>(&'a self, all_teachers: &'a [String]) -> &'a [String] {
        match self {
            TeacherScope::All => all_teachers,
            TeacherScope::Only(teachers) => teachers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTripConfig {
    #[serde(flatten)]
    pub event: EventConfig,
    pub teachers: TeacherScope,
}

/// teacher -> assigned volunteers (primaries first, then alternates)
pub type TeacherAssignments = BTreeMap<String, Vec<Volunteer>>;

/// Result of one allocation run, one namespace per event kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentTable {
    pub parties: BTreeMap<String, TeacherAssignments>, // event name -> teachers
    pub field_trips: BTreeMap<String, TeacherAssignments>,
}

impl AssignmentTable {
    pub fn category(&self, kind: EventKind) -> &BTreeMap<String, TeacherAssignments> {
        match kind {
            EventKind::Party => &self.parties,
            EventKind::FieldTrip => &self.field_trips,
        }
    }

    pub fn category_mut(&mut self, kind: EventKind) -> &mut BTreeMap<String, TeacherAssignments> {
        match kind {
            EventKind::Party => &mut self.parties,
            EventKind::FieldTrip => &mut self.field_trips,
        }
    }

    /// Assignments for one event, if the event was allocated
    pub fn event(&self, kind: EventKind, event_name: &str) -> Option<&TeacherAssignments> {
        self.category(kind).get(event_name)
    }

    /// Primary volunteers for an (event, teacher) pair
    pub fn primaries(&self, kind: EventKind, event_name: &str, teacher: &str) -> Vec<&Volunteer> {
        self.teacher_list(kind, event_name, teacher)
            .iter()
            .filter(|v| !v.is_alternate)
            .collect()
    }

    /// Alternate volunteers for an (event, teacher) pair
    pub fn alternates(&self, kind: EventKind, event_name: &str, teacher: &str) -> Vec<&Volunteer> {
        self.teacher_list(kind, event_name, teacher)
            .iter()
            .filter(|v| v.is_alternate)
            .collect()
    }

    fn teacher_list(&self, kind: EventKind, event_name: &str, teacher: &str) -> &[Volunteer] {
        self.event(kind, event_name)
            .and_then(|teachers| teachers.get(teacher))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
