//! End-to-end scenarios driving a school day through the public API.

use instate::builder::{connect, StateMachineBuilder};
use instate::core::{State, StateRef};
use instate::effects::{activity_fn, ActivityArgs, ActivityContext, AppendArgs, Resolution, StateMachine};
use instate::snapshot::MachineSnapshot;
use instate::validation::ConfigViolation;
use instate::{trigger_enum, BuildError, MachineConfig};
use std::sync::Arc;
use stillwater::validation::Validation;

trigger_enum! {
    enum Bell {
        Start,
        Recess,
        Finish,
    }
}

type Log = Option<String>;

fn subject(name: &str) -> Log {
    Some(name.to_string())
}

fn school_day() -> (StateRef<Log, Bell>, StateRef<Log, Bell>) {
    let start = State::with_data(
        "Start",
        vec![subject("math"), subject("geography"), subject("science")],
    );
    let finish = State::new("Finish");
    (start, finish)
}

fn machine_for(start: &StateRef<Log, Bell>, finish: &StateRef<Log, Bell>) -> StateMachine<Log, Bell> {
    let mut machine = StateMachine::new();
    machine.add_state(Arc::clone(start));
    machine.add_state(Arc::clone(finish));
    machine.initial_state(start);
    machine
}

#[test]
fn finishing_carries_the_days_subjects() {
    let (start, finish) = school_day();
    start.when(Bell::Finish).transition_to(&finish);
    let mut machine = machine_for(&start, &finish);

    let current = machine.fire(Bell::Finish).unwrap();

    assert_eq!(current.name(), "Finish");
    assert_eq!(
        finish.data().to_vec(),
        vec![subject("math"), subject("geography"), subject("science")]
    );
}

#[test]
fn finishing_with_one_subject_appends_it() {
    let (start, finish) = school_day();
    start
        .when(Bell::Finish)
        .transition_to(&finish)
        .map(|b| b.then(AppendArgs));
    let mut machine = machine_for(&start, &finish);

    let current = machine.fire_with(Bell::Finish, subject("history")).unwrap();

    assert!(Arc::ptr_eq(&current, &finish));
    assert_eq!(current.data().len(), 4);
    assert_eq!(current.data().last(), Some(subject("history")));
}

#[test]
fn finishing_with_two_subjects_appends_both_in_order() {
    let (start, finish) = school_day();
    start
        .when(Bell::Finish)
        .transition_to(&finish)
        .map(|b| b.then(AppendArgs));
    let mut machine = machine_for(&start, &finish);

    machine.fire_with_pair(Bell::Finish, subject("history"), subject("lunch"));

    let data = finish.data().to_vec();
    assert_eq!(data.len(), 5);
    assert_eq!(&data[3..], &[subject("history"), subject("lunch")]);
}

#[test]
fn unknown_bell_changes_nothing() {
    let (start, finish) = school_day();
    start.when(Bell::Finish).transition_to(&finish);
    let mut machine = machine_for(&start, &finish);

    let first = machine.fire(Bell::Recess).unwrap();
    let second = machine.fire(Bell::Recess).unwrap();

    assert!(Arc::ptr_eq(&first, &start));
    assert!(Arc::ptr_eq(&second, &start));
    assert_eq!(start.data().len(), 3);
    assert!(machine.history().is_empty());
}

#[test]
fn resolve_tells_unwired_from_unknown() {
    let (start, finish) = school_day();
    start.when(Bell::Recess);
    let mut machine = machine_for(&start, &finish);

    assert!(matches!(machine.resolve(&Bell::Recess), Resolution::Dangling(_)));
    assert!(matches!(machine.resolve(&Bell::Finish), Resolution::Unmatched(_)));
}

#[test]
fn unstarted_machine_ignores_first_trigger() {
    let (start, finish) = school_day();
    start.when(Bell::Finish).transition_to(&finish);
    let mut machine = StateMachine::new();
    machine.add_state(Arc::clone(&start));
    machine.add_state(Arc::clone(&finish));

    assert_eq!(machine.fire(Bell::Finish).unwrap().name(), "Start");
    assert_eq!(machine.fire(Bell::Finish).unwrap().name(), "Finish");
}

#[test]
fn round_trip_through_recess_keeps_one_log() {
    let (start, finish) = school_day();
    let recess = State::new("Recess");
    start
        .when(Bell::Recess)
        .transition_to(&recess)
        .map(|b| b.then(AppendArgs))
        .map(|recess| recess.when(Bell::Start).transition_to(&start));
    connect(&start, Bell::Finish, &finish);

    let mut machine = machine_for(&start, &finish);
    machine.add_state(Arc::clone(&recess));

    machine.fire_with(Bell::Recess, subject("snack"));
    machine.fire(Bell::Start);
    machine.fire(Bell::Finish);

    assert_eq!(machine.current_state().unwrap().name(), "Finish");
    assert_eq!(finish.data().len(), 4);
    assert!(finish.data().shares_with(&start.data()));
    assert_eq!(
        machine.history().get_path(),
        vec!["Start", "Recess", "Start", "Finish"]
    );
}

#[test]
fn activity_can_send_the_class_home_early() {
    let (start, finish) = school_day();
    let home = State::new("Home");
    let go_home = Arc::clone(&home);
    start.when(Bell::Finish).transition_to(&finish).map(|b| {
        b.then(activity_fn(
            "early_dismissal",
            move |ctx: &ActivityContext<Log, Bell>, args: ActivityArgs<Log>| {
                go_home.replace_data(ctx.destination().data());
                go_home.data().extend(args.into_vec());
                Arc::clone(&go_home)
            },
        ))
    });
    let mut machine = machine_for(&start, &finish);
    machine.add_state(Arc::clone(&home));

    let current = machine.fire_with(Bell::Finish, subject("snow day")).unwrap();

    assert!(Arc::ptr_eq(&current, &home));
    assert_eq!(home.data().last(), Some(subject("snow day")));
    let last = machine.history().last().unwrap();
    assert!(last.via_activity);
    assert_eq!(last.to, "Home");
}

#[test]
fn builder_accepts_a_wired_day() {
    let (start, finish) = school_day();
    connect(&start, Bell::Finish, &finish);

    let mut machine = StateMachineBuilder::new()
        .state(Arc::clone(&start))
        .state(Arc::clone(&finish))
        .initial(&start)
        .config(MachineConfig::default().with_history_limit(8))
        .build()
        .unwrap();

    assert_eq!(machine.fire(Bell::Finish).unwrap().name(), "Finish");
}

#[test]
fn builder_rejects_a_stray_initial_state() {
    let (start, finish) = school_day();
    let stray: StateRef<Log, Bell> = State::new("Stray");

    let result = StateMachineBuilder::new()
        .states(vec![start, finish])
        .initial(&stray)
        .build();

    match result {
        Err(BuildError::Rejected { violations }) => {
            assert!(violations
                .iter()
                .any(|v| matches!(v, ConfigViolation::InitialStateNotRegistered { .. })));
        }
        other => panic!("Expected rejection, got {:?}", other.err()),
    }
}

#[test]
fn validate_reports_every_problem_at_once() {
    let (start, finish) = school_day();
    let elsewhere: StateRef<Log, Bell> = State::new("Elsewhere");
    start.when(Bell::Recess);
    connect(&start, Bell::Finish, &finish);
    connect(&start, Bell::Finish, &finish);
    connect(&finish, Bell::Start, &elsewhere);
    let machine = machine_for(&start, &finish);

    match machine.validate() {
        Validation::Failure(violations) => {
            let found: Vec<_> = violations.iter().cloned().collect();
            assert_eq!(found.len(), 3);
            assert!(found.iter().all(|v| !v.is_fatal()));
        }
        Validation::Success(_) => panic!("Expected violations"),
    }
}

#[test]
fn snapshot_captures_the_day() {
    let (start, finish) = school_day();
    connect(&start, Bell::Finish, &finish);
    let mut machine = machine_for(&start, &finish);
    machine.fire(Bell::Finish);

    let snapshot: MachineSnapshot<Log> = machine.snapshot();

    assert_eq!(snapshot.current_state.as_deref(), Some("Finish"));
    assert_eq!(snapshot.states.len(), 2);
    assert_eq!(snapshot.history.len(), 1);
    let json = snapshot.to_json().unwrap();
    assert!(json.contains("geography"));
}
