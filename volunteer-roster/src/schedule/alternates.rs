use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::filter::{by_event, by_teacher, name_key};
use super::ledger::{alternate_eligible, AlternateStage, CategoryLedger};
use super::types::{EventKind, TeacherAssignments, Volunteer};
use super::EventPlan;

/// Backups kept per (event, teacher)
pub const MAX_ALTERNATES: usize = 2;

/// Adds up to two alternates per teacher for one event
///
/// Runs after every primary of the category is placed. A strict walk comes
/// first; if it leaves a teacher short, one relaxed walk over the same
/// shuffled candidates may take people who hold a primary elsewhere.
/// Returns the number of alternates assigned.
pub fn assign_alternates<R: Rng + ?Sized>(
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
        let teacher_candidates = by_teacher(&candidates, teacher);
        let mut assigned = 0;

        for stage in [AlternateStage::Strict, AlternateStage::Relaxed] {
            if assigned >= MAX_ALTERNATES {
                break;
            }

            for volunteer in &teacher_candidates {
                if assigned >= MAX_ALTERNATES {
                    break;
                }
                let key = name_key(&volunteer.name);
                if !alternate_eligible(ledger, plan.name, &key, stage) {
                    continue;
                }

                debug!(event_name = plan.name, teacher = %teacher, volunteer = %volunteer.name, ?stage, "alternate assigned");
                let mut alternate = (*volunteer).clone();
                alternate.is_alternate = true;
                assignments.entry(teacher.clone()).or_default().push(alternate);
                ledger.record_alternate(key);
                assigned += 1;
            }
        }

        total += assigned;
    }

    total
}
