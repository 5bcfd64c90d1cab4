use super::types::{EventKind, Volunteer};

/// Identity key used for deduplication: the lower-cased name
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Volunteers who signed up for exactly this event, in input order
pub fn by_event<'a>(volunteers: &'a [Volunteer], kind: EventKind, event_name: &str) -> Vec<&'a Volunteer> {
    volunteers
        .iter()
        .filter(|v| v.kind == kind && v.event_name == event_name)
        .collect()
}

/// Candidates listed under this teacher, preserving their order
pub fn by_teacher<'a>(candidates: &[&'a Volunteer], teacher: &str) -> Vec<&'a Volunteer> {
    candidates
        .iter()
        .filter(|v| v.teacher == teacher)
        .copied()
        .collect()
}
