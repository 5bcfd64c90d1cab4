use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use volunteer_roster::schedule::{name_key, MAX_ALTERNATES};
use volunteer_roster::{allocate, AssignmentTable, EventConfig, EventKind, FieldTripConfig, TeacherScope, Volunteer};

fn signup(name: &str, teacher: &str, kind: EventKind, event_name: &str) -> Volunteer {
    Volunteer {
        name: name.to_string(),
        email: format!("{}@school.org", name.to_lowercase().replace(' ', ".")),
        phone: "5550100000".to_string(),
        teacher: teacher.to_string(),
        kind,
        event_name: event_name.to_string(),
        is_alternate: false,
    }
}

fn event(name: &str, count: usize) -> EventConfig {
    EventConfig { name: name.to_string(), count }
}

fn trip(name: &str, count: usize, teachers: TeacherScope) -> FieldTripConfig {
    FieldTripConfig { event: event(name, count), teachers }
}

fn teachers(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn names(list: &[&Volunteer]) -> Vec<String> {
    list.iter().map(|v| v.name.clone()).collect()
}

#[test]
fn test_scenario_a_single_teacher_pool() {
    let volunteers = vec![
        signup("Ann", "Smith", EventKind::Party, "Fall Fest"),
        signup("Bob", "Smith", EventKind::Party, "Fall Fest"),
        signup("Cy", "Smith", EventKind::Party, "Fall Fest"),
    ];
    let all = teachers(&["Smith", "Jones"]);

    let table = allocate(&volunteers, &[event("Fall Fest", 1)], &[], &all, 42);

    let primaries = table.primaries(EventKind::Party, "Fall Fest", "Smith");
    let alternates = table.alternates(EventKind::Party, "Fall Fest", "Smith");
    assert_eq!(primaries.len(), 1);
    assert_eq!(alternates.len(), 2);

    let mut everyone = names(&primaries);
    everyone.extend(names(&alternates));
    everyone.sort();
    assert_eq!(everyone, vec!["Ann", "Bob", "Cy"]);

    assert!(table.primaries(EventKind::Party, "Fall Fest", "Jones").is_empty());
    assert!(table.alternates(EventKind::Party, "Fall Fest", "Jones").is_empty());
}

#[test]
fn test_scenario_b_all_marker_covers_every_teacher() {
    let volunteers = vec![
        signup("Ann", "A", EventKind::FieldTrip, "Zoo"),
        signup("Bob", "B", EventKind::FieldTrip, "Zoo"),
    ];
    let all = teachers(&["A", "B", "C"]);

    let table = allocate(&volunteers, &[], &[trip("Zoo", 1, TeacherScope::All)], &all, 9);

    assert_eq!(names(&table.primaries(EventKind::FieldTrip, "Zoo", "A")), vec!["Ann"]);
    assert_eq!(names(&table.primaries(EventKind::FieldTrip, "Zoo", "B")), vec!["Bob"]);
    assert!(table.event(EventKind::FieldTrip, "Zoo").unwrap().get("C").is_none());
}

#[test]
fn test_explicit_trip_teachers_limit_eligibility() {
    let volunteers = vec![
        signup("Ann", "A", EventKind::FieldTrip, "Zoo"),
        signup("Bob", "B", EventKind::FieldTrip, "Zoo"),
    ];
    let all = teachers(&["A", "B"]);
    let scope = TeacherScope::Only(teachers(&["B"]));

    let table = allocate(&volunteers, &[], &[trip("Zoo", 1, scope)], &all, 9);

    assert!(table.primaries(EventKind::FieldTrip, "Zoo", "A").is_empty());
    assert_eq!(names(&table.primaries(EventKind::FieldTrip, "Zoo", "B")), vec!["Bob"]);
}

#[test]
fn test_scenario_c_one_person_two_parties() {
    let volunteers = vec![
        signup("Mia", "Smith", EventKind::Party, "Fall Fest"),
        signup("Mia", "Smith", EventKind::Party, "Winter Fest"),
    ];
    let all = teachers(&["Smith"]);

    let table = allocate(&volunteers, &[event("Fall Fest", 1), event("Winter Fest", 1)], &[], &all, 5);

    // First declared party wins the primary slot
    assert_eq!(names(&table.primaries(EventKind::Party, "Fall Fest", "Smith")), vec!["Mia"]);
    assert!(table.primaries(EventKind::Party, "Winter Fest", "Smith").is_empty());
    // Never an alternate where she is already a primary
    assert!(table.alternates(EventKind::Party, "Fall Fest", "Smith").is_empty());
}

#[test]
fn test_scenario_d_relaxed_retry_fills_second_alternate() {
    let volunteers = vec![
        signup("Zed", "Smith", EventKind::Party, "Fall Fest"),
        signup("Zed", "Smith", EventKind::Party, "Winter Fest"),
        signup("Xia", "Smith", EventKind::Party, "Winter Fest"),
        signup("Yan", "Smith", EventKind::Party, "Winter Fest"),
    ];
    let all = teachers(&["Smith"]);
    let parties = [event("Fall Fest", 1), event("Winter Fest", 1)];

    for seed in 0..20 {
        let table = allocate(&volunteers, &parties, &[], &all, seed);

        assert_eq!(names(&table.primaries(EventKind::Party, "Fall Fest", "Smith")), vec!["Zed"]);
        let primary = names(&table.primaries(EventKind::Party, "Winter Fest", "Smith"));
        assert_eq!(primary.len(), 1);
        assert!(primary[0] == "Xia" || primary[0] == "Yan");

        // Strict pick first, then Zed through the relaxed retry
        let other = if primary[0] == "Xia" { "Yan" } else { "Xia" };
        assert_eq!(
            names(&table.alternates(EventKind::Party, "Winter Fest", "Smith")),
            vec![other.to_string(), "Zed".to_string()]
        );
    }
}

#[test]
fn test_later_event_primaries_block_earlier_strict_alternates() {
    let volunteers = vec![
        signup("Ann", "Smith", EventKind::Party, "Fall Fest"),
        signup("Bob", "Smith", EventKind::Party, "Fall Fest"),
        signup("Cy", "Smith", EventKind::Party, "Fall Fest"),
        signup("Bob", "Smith", EventKind::Party, "Winter Fest"),
    ];
    let all = teachers(&["Smith"]);
    let parties = [event("Fall Fest", 1), event("Winter Fest", 1)];
    let mut bob_backed_up_fall_fest = false;

    for seed in 0..40 {
        let table = allocate(&volunteers, &parties, &[], &all, seed);
        let fall_primary = names(&table.primaries(EventKind::Party, "Fall Fest", "Smith"));
        let fall_alternates = names(&table.alternates(EventKind::Party, "Fall Fest", "Smith"));

        if fall_primary[0] == "Bob" {
            assert!(table.primaries(EventKind::Party, "Winter Fest", "Smith").is_empty());
            continue;
        }

        // Bob only becomes a Winter Fest primary after Fall Fest ran, yet the
        // strict stage for Fall Fest must already see him as taken
        assert_eq!(names(&table.primaries(EventKind::Party, "Winter Fest", "Smith")), vec!["Bob"]);
        let other = if fall_primary[0] == "Ann" { "Cy" } else { "Ann" };
        assert_eq!(fall_alternates, vec![other.to_string(), "Bob".to_string()]);
        bob_backed_up_fall_fest = true;
    }

    assert!(bob_backed_up_fall_fest);
}

#[test]
fn test_different_seeds_can_change_primary_choice() {
    let volunteers: Vec<Volunteer> = (0..8)
        .map(|i| signup(&format!("Parent {}", i), "Smith", EventKind::Party, "Fall Fest"))
        .collect();
    let all = teachers(&["Smith"]);
    let parties = [event("Fall Fest", 1)];

    let chosen: HashSet<String> = (0..30)
        .map(|seed| allocate(&volunteers, &parties, &[], &all, seed))
        .map(|table| names(&table.primaries(EventKind::Party, "Fall Fest", "Smith"))[0].clone())
        .collect();

    assert!(chosen.len() > 1);
}

/// Random signups across a fixed set of events, teachers and people
fn random_input(rng: &mut StdRng) -> (Vec<Volunteer>, Vec<EventConfig>, Vec<FieldTripConfig>, Vec<String>) {
    let all = teachers(&["Smith", "Jones", "Garcia", "Lee"]);
    let people: Vec<String> = (0..14).map(|i| format!("Parent {}", i)).collect();
    let parties = vec![event("Fall Fest", 2), event("Winter Fest", 1), event("Spring Fling", 3)];
    let trips = vec![
        trip("Zoo", 2, TeacherScope::All),
        trip("Museum", 1, TeacherScope::Only(teachers(&["Smith", "Lee"]))),
    ];

    let mut volunteers = Vec::new();
    for person in &people {
        let teacher = &all[rng.gen_range(0..all.len())];
        // Vary the case so name keys have to do the matching
        let name = if rng.gen_bool(0.3) { person.to_uppercase() } else { person.clone() };
        for party in &parties {
            if rng.gen_bool(0.5) {
                volunteers.push(signup(&name, teacher, EventKind::Party, &party.name));
            }
        }
        for trip in &trips {
            if rng.gen_bool(0.5) {
                volunteers.push(signup(&name, teacher, EventKind::FieldTrip, &trip.event.name));
            }
        }
    }

    (volunteers, parties, trips, all)
}

fn check_invariants(
    table: &AssignmentTable,
    volunteers: &[Volunteer],
    parties: &[EventConfig],
    trips: &[FieldTripConfig],
) {
    let categories = [
        (EventKind::Party, parties.to_vec()),
        (EventKind::FieldTrip, trips.iter().map(|t| t.event.clone()).collect::<Vec<_>>()),
    ];

    for (kind, events) in categories {
        let mut primary_keys = HashSet::new();
        let mut alternate_keys = HashSet::new();

        for config in &events {
            let Some(assignments) = table.event(kind, &config.name) else {
                panic!("{} has no entry", config.name);
            };

            for (teacher, list) in assignments {
                let primaries: Vec<&Volunteer> = list.iter().filter(|v| !v.is_alternate).collect();
                let alternates: Vec<&Volunteer> = list.iter().filter(|v| v.is_alternate).collect();

                // Quota bound, primaries listed before alternates
                assert!(primaries.len() <= config.count);
                assert!(alternates.len() <= MAX_ALTERNATES);
                assert!(list.iter().skip(primaries.len()).all(|v| v.is_alternate));

                // Alternate exclusivity for the pair
                let pair_primaries: HashSet<String> = primaries.iter().map(|v| name_key(&v.name)).collect();
                assert!(alternates.iter().all(|v| !pair_primaries.contains(&name_key(&v.name))));

                for entry in list {
                    // No fabricated volunteers
                    assert_eq!(&entry.teacher, teacher);
                    let mut signed_up = entry.clone();
                    signed_up.is_alternate = false;
                    assert!(volunteers.contains(&signed_up));
                    assert_eq!(entry.kind, kind);
                    assert_eq!(entry.event_name, config.name);

                    // Category-scoped uniqueness
                    let key = name_key(&entry.name);
                    if entry.is_alternate {
                        assert!(alternate_keys.insert(key), "{} is an alternate twice", entry.name);
                    } else {
                        assert!(primary_keys.insert(key), "{} is a primary twice", entry.name);
                    }
                }
            }
        }
    }
}

#[test]
fn test_invariants_hold_for_random_inputs() {
    let mut rng = StdRng::seed_from_u64(20241017);

    for _ in 0..50 {
        let (volunteers, parties, trips, all) = random_input(&mut rng);
        let seed = rng.gen::<u64>();

        let table = allocate(&volunteers, &parties, &trips, &all, seed);

        check_invariants(&table, &volunteers, &parties, &trips);
        assert_eq!(table, allocate(&volunteers, &parties, &trips, &all, seed));
    }
}

#[test]
fn test_zero_count_and_empty_events_degrade_quietly() {
    let volunteers = vec![signup("Ann", "Smith", EventKind::Party, "Fall Fest")];
    let all = teachers(&["Smith"]);

    let table = allocate(
        &volunteers,
        &[event("Fall Fest", 0), event("Nobody Came", 2)],
        &[trip("Zoo", 1, TeacherScope::Only(Vec::new()))],
        &all,
        1,
    );

    assert!(table.primaries(EventKind::Party, "Fall Fest", "Smith").is_empty());
    // With no primary slot taken, Ann can still back up the party
    assert_eq!(names(&table.alternates(EventKind::Party, "Fall Fest", "Smith")), vec!["Ann"]);
    assert!(table.event(EventKind::Party, "Nobody Came").unwrap().is_empty());
    assert!(table.event(EventKind::FieldTrip, "Zoo").unwrap().is_empty());
}
