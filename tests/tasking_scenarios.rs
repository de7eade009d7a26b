use std::collections::HashMap;
use std::num::NonZeroUsize;

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_tasking::config::EngineConfig;
use u_tasking::models::{
    CapabilitySet, Location, ResponderState, ResponderStatus, ScheduleStatus, TaskOrder,
    TaskOutcome,
};
use u_tasking::scoring::{score, ScoringWeights};
use u_tasking::{schedule_tasks_for_field_units, TaskingEngine};

const TAGS: [&str; 5] = ["medical", "hazmat", "transport", "rescue", "comms"];

fn random_tags(rng: &mut StdRng, max: usize) -> CapabilitySet {
    let count = rng.random_range(0..=max);
    (0..count)
        .map(|_| TAGS[rng.random_range(0..TAGS.len())])
        .collect()
}

fn random_snapshot(seed: u64) -> (Vec<TaskOrder>, Vec<ResponderState>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let tasks = (0..rng.random_range(1..25))
        .map(|i| {
            let min = rng.random_range(0..3);
            let max = min + rng.random_range(0..3);
            TaskOrder::new(format!("task-{i:02}"))
                .with_priority(rng.random_range(0..7))
                .with_capabilities(random_tags(&mut rng, 2))
                .with_units(min, max)
                .with_location(Location::point(
                    rng.random_range(0.0..30.0),
                    rng.random_range(0.0..30.0),
                ))
        })
        .collect();

    let responders = (0..rng.random_range(0..40))
        .map(|i| {
            let max = rng.random_range(1..4);
            let held = rng.random_range(0..=max);
            let status = match rng.random_range(0..10) {
                0 => ResponderStatus::Offline,
                1 => ResponderStatus::Busy,
                _ => ResponderStatus::Available,
            };
            let mut r = ResponderState::new(format!("unit-{i:02}"))
                .with_capabilities(random_tags(&mut rng, 4))
                .with_status(status)
                .with_max_concurrent(max)
                .with_fatigue(rng.random_range(0.0..5.0))
                .with_location(Location::point(
                    rng.random_range(0.0..30.0),
                    rng.random_range(0.0..30.0),
                ));
            for h in 0..held {
                r = r.with_current_task(format!("held-{h}"));
            }
            r
        })
        .collect();

    (tasks, responders)
}

#[test]
fn scenario_offline_responder_skipped() {
    let tasks = vec![TaskOrder::new("T1")
        .with_priority(5)
        .with_capability("medical")
        .with_units(1, 2)];
    let responders = vec![
        ResponderState::new("R1")
            .with_capability("medical")
            .with_capability("transport"),
        ResponderState::new("R2")
            .with_capability("medical")
            .with_capability("transport")
            .with_status(ResponderStatus::Offline),
    ];

    let result = schedule_tasks_for_field_units(&tasks, &responders).unwrap();
    assert_eq!(result.units_for("T1"), vec!["R1"]);
    assert!(result.deferred.is_empty());
    assert!(result.escalated.is_empty());
    assert_eq!(result.status, ScheduleStatus::Complete);
}

#[test]
fn scenario_understaffed_low_priority_deferred() {
    let tasks = vec![TaskOrder::new("T2")
        .with_priority(2)
        .with_capability("hazmat")
        .with_units(2, 2)];
    let responders = vec![
        ResponderState::new("HZ").with_capability("hazmat"),
        ResponderState::new("MD").with_capability("medical"),
    ];

    let result = schedule_tasks_for_field_units(&tasks, &responders).unwrap();
    assert_eq!(result.deferred, vec!["T2"]);
    assert!(result.units_for("T2").is_empty());
    assert!(result.assignments.is_empty());
}

#[test]
fn scenario_understaffed_high_priority_escalated() {
    let tasks = vec![TaskOrder::new("T3")
        .with_priority(5)
        .with_capability("hazmat")
        .with_units(2, 2)];
    let responders = vec![ResponderState::new("HZ").with_capability("hazmat")];

    let result = schedule_tasks_for_field_units(&tasks, &responders).unwrap();
    assert_eq!(result.escalated, vec!["T3"]);
    assert_eq!(result.units_for("T3"), vec!["HZ"]);
    assert!(result.deferred.is_empty());
    assert_eq!(result.status, ScheduleStatus::Escalated);
}

#[test]
fn scenario_priority_order_claims_sole_responder() {
    let tasks = vec![
        TaskOrder::new("T5").with_priority(1).with_capability("rescue"),
        TaskOrder::new("T4").with_priority(5).with_capability("rescue"),
    ];
    let responders = vec![ResponderState::new("R").with_capability("rescue")];

    let result = schedule_tasks_for_field_units(&tasks, &responders).unwrap();
    assert_eq!(result.units_for("T4"), vec!["R"]);
    assert_eq!(result.deferred, vec!["T5"]);
}

#[test]
fn scenario_audit_counters() {
    let tasks = vec![
        TaskOrder::new("A").with_priority(3).with_capability("medical"),
        TaskOrder::new("B").with_priority(2).with_capability("transport"),
        TaskOrder::new("C").with_priority(1).with_capability("hazmat"),
    ];
    let responders = vec![
        ResponderState::new("U1").with_capability("medical"),
        ResponderState::new("U2").with_capability("transport"),
        ResponderState::new("U3").with_capability("comms"),
        ResponderState::new("U4").with_capability("comms"),
        ResponderState::new("U5").with_capability("rescue"),
    ];

    let audit = schedule_tasks_for_field_units(&tasks, &responders)
        .unwrap()
        .audit;
    assert_eq!(audit.tasks_processed, 3);
    assert_eq!(audit.units_considered, 5);
    assert_eq!(audit.assignments_made, 2);
    assert_eq!(audit.deferred_tasks, 1);
    assert_eq!(audit.escalated_tasks, 0);
}

#[test]
fn property_staffing_bounds_and_policy() {
    for seed in 0..200 {
        let (tasks, responders) = random_snapshot(seed);
        let result = schedule_tasks_for_field_units(&tasks, &responders).unwrap();

        for task in &tasks {
            let count = result.units_for(&task.task_id).len();
            let outcome = result.outcome_of(&task.task_id).unwrap();
            assert!(count <= task.max_units as usize, "seed {seed}");

            let deferred = result.deferred.contains(&task.task_id);
            let escalated = result.escalated.contains(&task.task_id);
            assert!(!(deferred && escalated), "seed {seed}");

            match outcome {
                TaskOutcome::Assigned => assert!(count >= task.min_units as usize),
                TaskOutcome::Escalated => {
                    assert!(escalated);
                    assert!(task.priority >= 4);
                }
                TaskOutcome::Deferred => {
                    assert!(deferred);
                    assert!(task.priority < 4);
                    assert_eq!(count, 0);
                }
            }
        }
    }
}

#[test]
fn property_capacity_never_exceeded() {
    for seed in 0..200 {
        let (tasks, responders) = random_snapshot(seed);
        let result = schedule_tasks_for_field_units(&tasks, &responders).unwrap();

        let mut used: HashMap<&str, u32> = HashMap::new();
        for a in &result.assignments {
            *used.entry(a.unit_id.as_str()).or_default() += 1;
        }
        for r in &responders {
            let taken = used.get(r.unit_id.as_str()).copied().unwrap_or(0);
            assert!(taken <= r.available_capacity(), "seed {seed}: {}", r.unit_id);
        }
    }
}

#[test]
fn property_missing_capability_never_assigned() {
    for seed in 0..200 {
        let (tasks, responders) = random_snapshot(seed);
        let result = schedule_tasks_for_field_units(&tasks, &responders).unwrap();

        let by_id: HashMap<_, _> = responders.iter().map(|r| (r.unit_id.as_str(), r)).collect();
        let task_by_id: HashMap<_, _> = tasks.iter().map(|t| (t.task_id.as_str(), t)).collect();
        for a in &result.assignments {
            let task = task_by_id[a.task_id.as_str()];
            let unit = by_id[a.unit_id.as_str()];
            assert!(
                task.capabilities_required.is_subset_of(&unit.capabilities),
                "seed {seed}"
            );
            assert!(a.score > 0.0);
        }
    }
}

#[test]
fn property_deterministic() {
    let at = Utc.with_ymd_and_hms(2026, 5, 1, 6, 30, 0).unwrap();
    for seed in 0..50 {
        let (tasks, responders) = random_snapshot(seed);
        let engine = TaskingEngine::new();
        let first = engine.schedule_at(&tasks, &responders, at).unwrap();
        let second = engine.schedule_at(&tasks, &responders, at).unwrap();
        assert_eq!(first, second, "seed {seed}");

        let live = engine.schedule(&tasks, &responders).unwrap();
        assert_eq!(live.assignments, first.assignments);
        assert_eq!(live.deferred, first.deferred);
        assert_eq!(live.escalated, first.escalated);
        assert!(live.audit.same_counters(&first.audit));
    }
}

#[test]
fn property_fatigue_monotonic() {
    let weights = ScoringWeights::default();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let task = TaskOrder::new("T")
            .with_capabilities(random_tags(&mut rng, 2))
            .with_location(Location::point(rng.random_range(0.0..10.0), 0.0));
        let base = ResponderState::new("R")
            .with_capabilities(TAGS.into_iter().collect())
            .with_max_concurrent(2)
            .with_location(Location::point(rng.random_range(0.0..10.0), 0.0));

        let low = rng.random_range(0.0..5.0);
        let high = low + rng.random_range(0.0..5.0);
        let s_low = score(&task, &base.clone().with_fatigue(low), &weights).unwrap();
        let s_high = score(&task, &base.with_fatigue(high), &weights).unwrap();
        assert!(s_high <= s_low);
    }
}

#[test]
fn parallel_scoring_matches_serial_and_is_audited() {
    let tasks: Vec<TaskOrder> = (0..6)
        .map(|i| {
            TaskOrder::new(format!("t{i}"))
                .with_priority(i % 6)
                .with_capability("rescue")
                .with_units(1, 3)
        })
        .collect();
    let responders: Vec<ResponderState> = (0..20)
        .map(|i| {
            ResponderState::new(format!("u{i:02}"))
                .with_capability("rescue")
                .with_fatigue(f64::from(i % 5) * 0.5)
        })
        .collect();
    let at = Utc.with_ymd_and_hms(2026, 5, 1, 6, 30, 0).unwrap();

    let workers = NonZeroUsize::new(4).unwrap();
    let parallel = TaskingEngine::with_config(EngineConfig::default().with_max_workers(workers))
        .schedule_at(&tasks, &responders, at)
        .unwrap();
    let serial = TaskingEngine::with_config(
        EngineConfig::default().with_max_workers(NonZeroUsize::MIN),
    )
    .schedule_at(&tasks, &responders, at)
    .unwrap();

    assert!(parallel.audit.parallel_scoring);
    assert!(!serial.audit.parallel_scoring);
    assert_eq!(parallel.assignments, serial.assignments);
    assert_eq!(parallel.deferred, serial.deferred);
    assert_eq!(parallel.escalated, serial.escalated);
}

#[test]
fn extreme_fatigue_still_schedules() {
    let tasks = vec![TaskOrder::new("T1").with_priority(3).with_capability("medical")];
    let responders = vec![ResponderState::new("R1")
        .with_capability("medical")
        .with_fatigue(f64::MAX)];

    let result = schedule_tasks_for_field_units(&tasks, &responders).unwrap();
    assert_eq!(result.units_for("T1"), vec!["R1"]);
    assert!(result.assignments[0].score > 0.0);
}
