pub mod types;
pub mod filter;
pub mod ledger;
pub mod primary;
pub mod alternates;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

pub use types::{AssignmentTable, EventConfig, EventKind, FieldTripConfig, TeacherAssignments, TeacherScope, Volunteer};
pub use filter::{by_event, by_teacher, name_key};
pub use alternates::MAX_ALTERNATES;

use ledger::CategoryLedger;
use primary::assign_primaries;
use alternates::assign_alternates;

/// One event with its teacher set already resolved
#[derive(Debug, Clone, Copy)]
pub struct EventPlan<'a> {
    pub name: &'a str,
    pub count: usize,
    pub teachers: &'a [String],
}

/// Assigns primary and alternate volunteers for every party and field trip
///
/// Primaries and alternates draw from two generators seeded with `seed` and
/// `2 * seed`, so the same seed and input always produce the same table.
/// Parties and field trips are deduplicated independently of each other.
pub fn allocate(
    volunteers: &[Volunteer],
    parties: &[EventConfig],
    field_trips: &[FieldTripConfig],
    all_teachers: &[String],
    seed: u64,
) -> AssignmentTable {
    let mut primary_rng = ChaCha8Rng::seed_from_u64(seed);
    let mut alternate_rng = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(2));
    let mut table = AssignmentTable::default();

    // Parties apply to every teacher
    let party_plans: Vec<EventPlan<'_>> = parties
        .iter()
        .map(|party| EventPlan {
            name: &party.name,
            count: party.count,
            teachers: all_teachers,
        })
        .collect();

    let trip_plans: Vec<EventPlan<'_>> = field_trips
        .iter()
        .map(|trip| EventPlan {
            name: &trip.event.name,
            count: trip.event.count,
            teachers: trip.teachers.resolve(all_teachers),
        })
        .collect();

    for (kind, plans) in [(EventKind::Party, &party_plans), (EventKind::FieldTrip, &trip_plans)] {
        allocate_category(
            volunteers,
            kind,
            plans,
            &mut primary_rng,
            &mut alternate_rng,
            &mut table,
        );
    }

    table
}

/// Runs both passes for one category with its own dedup ledger
fn allocate_category(
    volunteers: &[Volunteer],
    kind: EventKind,
    plans: &[EventPlan<'_>],
    primary_rng: &mut ChaCha8Rng,
    alternate_rng: &mut ChaCha8Rng,
    table: &mut AssignmentTable,
) {
    let mut ledger = CategoryLedger::default();
    let events = table.category_mut(kind);

    // Every declared event gets an entry, even when nobody signed up
    for plan in plans {
        let assignments = events.entry(plan.name.to_string()).or_default();
        let placed = assign_primaries(volunteers, kind, plan, primary_rng, &mut ledger, assignments);
        info!(
            kind = kind.label(),
            event_name = plan.name,
            placed,
            required = plan.count * plan.teachers.len(),
            "primaries assigned"
        );
    }

    // Alternates only once every primary of the category is known
    for plan in plans {
        let assignments = events.entry(plan.name.to_string()).or_default();
        let placed = assign_alternates(volunteers, kind, plan, alternate_rng, &mut ledger, assignments);
        info!(kind = kind.label(), event_name = plan.name, placed, "alternates assigned");
    }
}
