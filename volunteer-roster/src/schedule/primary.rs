use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::filter::{by_event, by_teacher, name_key};
use super::ledger::CategoryLedger;
use super::types::{EventKind, TeacherAssignments, Volunteer};
use super::EventPlan;

/// Fills each teacher's primary slots for one event
///
/// Candidates are shuffled once per event; each teacher then takes the first
/// `count` of their own candidates not yet used as a primary in the category.
/// Returns the number of primaries assigned.
pub fn assign_primaries<R: Rng + ?Sized>(
    volunteers: &[Volunteer],
    kind: EventKind,
    plan: &EventPlan<'_>,
    rng: &mut R,
    ledger: &mut CategoryLedger,
    assignments: &mut TeacherAssignments,
) -> usize {
    let mut candidates = by_event(volunteers, kind, plan.name);
    candidates.shuffle(rng);

    let mut total = 0;
    for teacher in plan.teachers {
        let mut assigned = 0;

        for volunteer in by_teacher(&candidates, teacher) {
            if assigned >= plan.count {
                break;
            }
            let key = name_key(&volunteer.name);
            if ledger.is_primary(&key) {
                continue;
            }

            debug!(event_name = plan.name, teacher = %teacher, volunteer = %volunteer.name, "primary assigned");
            assignments
                .entry(teacher.clone())
                .or_default()
                .push(volunteer.clone());
            ledger.record_primary(plan.name, key);
            assigned += 1;
        }

        total += assigned;
    }

    total
}
