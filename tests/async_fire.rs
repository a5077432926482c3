//! Tests for running activities on Tokio's blocking pool.

use instate::core::{State, StateRef};
use instate::effects::{activity_fn, ActivityArgs, ActivityContext, AppendArgs, FireError, StateMachine};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Debug)]
enum Bell {
    Start,
    Finish,
}

type Log = Option<String>;

fn subject(name: &str) -> Log {
    Some(name.to_string())
}

fn school_day() -> (StateMachine<Log, Bell>, StateRef<Log, Bell>, StateRef<Log, Bell>) {
    let start = State::with_data(
        "Start",
        vec![subject("math"), subject("geography"), subject("science")],
    );
    let finish = State::new("Finish");

    let mut machine = StateMachine::new();
    machine.add_state(Arc::clone(&start));
    machine.add_state(Arc::clone(&finish));
    machine.initial_state(&start);

    (machine, start, finish)
}

fn wire_append(start: &StateRef<Log, Bell>, finish: &StateRef<Log, Bell>) {
    start
        .when(Bell::Finish)
        .transition_to(finish)
        .map(|b| b.then(AppendArgs));
}

#[tokio::test]
async fn fire_async_runs_activity_off_thread() {
    let (mut machine, start, finish) = school_day();
    wire_append(&start, &finish);

    let current = machine
        .fire_async(Bell::Finish, subject("history"))
        .await
        .unwrap()
        .unwrap();

    assert!(Arc::ptr_eq(&current, &finish));
    assert_eq!(finish.data().len(), 4);
    assert_eq!(finish.data().last(), Some(subject("history")));
    assert_eq!(machine.current_state().unwrap().name(), "Finish");
}

#[tokio::test]
async fn fire_async_pair_appends_both() {
    let (mut machine, start, finish) = school_day();
    wire_append(&start, &finish);

    machine
        .fire_async_pair(Bell::Finish, subject("history"), subject("lunch"))
        .await
        .unwrap();

    let data = finish.data().to_vec();
    assert_eq!(data.len(), 5);
    assert_eq!(&data[3..], &[subject("history"), subject("lunch")]);
}

#[tokio::test]
async fn handle_is_ready_without_activity() {
    let (mut machine, start, finish) = school_day();
    start.when(Bell::Finish).transition_to(&finish);

    let handle = machine.fire_async(Bell::Finish, subject("history"));
    assert!(!handle.is_running());
    assert_eq!(handle.resolved_state().unwrap().name(), "Finish");

    let current = handle.await.unwrap().unwrap();
    assert!(Arc::ptr_eq(&current, &finish));
    assert_eq!(finish.data().len(), 3);
}

#[tokio::test]
async fn empty_machine_resolves_to_nothing() {
    let mut machine: StateMachine<Log, Bell> = StateMachine::new();

    let result = machine.fire_async(Bell::Start, None).await.unwrap();

    assert!(result.is_none());
}

#[test]
fn fire_async_outside_runtime_reports_no_runtime() {
    let (mut machine, start, finish) = school_day();
    wire_append(&start, &finish);

    let handle = machine.fire_async(Bell::Finish, subject("history"));
    assert!(!handle.is_running());

    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let result = runtime.block_on(handle);

    assert!(matches!(result, Err(FireError::NoRuntime { ref state }) if state == "Finish"));
    assert_eq!(machine.current_state().unwrap().name(), "Finish");
    assert_eq!(finish.data().len(), 3);
}

#[tokio::test]
async fn panicking_activity_surfaces_join_error() {
    let (mut machine, start, finish) = school_day();
    start.when(Bell::Finish).transition_to(&finish).map(|b| {
        b.then(activity_fn(
            "explode",
            |_: &ActivityContext<Log, Bell>, _: ActivityArgs<Log>| -> StateRef<Log, Bell> {
                panic!("activity failed")
            },
        ))
    });

    let result = machine.fire_async(Bell::Finish, None).await;

    assert!(matches!(result, Err(FireError::ActivityJoin(_))));
    assert_eq!(machine.current_state().unwrap().name(), "Finish");
}

#[tokio::test]
async fn detached_handle_leaves_machine_on_resolved_state() {
    let (mut machine, start, finish) = school_day();
    let back = Arc::clone(&start);
    start.when(Bell::Finish).transition_to(&finish).map(|b| {
        b.then(activity_fn(
            "back_to_start",
            move |_: &ActivityContext<Log, Bell>, _: ActivityArgs<Log>| Arc::clone(&back),
        ))
    });

    let handle = machine.fire_async(Bell::Finish, None);
    assert!(handle.is_running());
    handle.detach();

    assert!(Arc::ptr_eq(machine.current_state().unwrap(), &finish));
}

#[tokio::test]
async fn redirect_from_async_activity_is_recorded() {
    let (mut machine, start, finish) = school_day();
    let back = Arc::clone(&start);
    start.when(Bell::Finish).transition_to(&finish).map(|b| {
        b.then(activity_fn(
            "back_to_start",
            move |_: &ActivityContext<Log, Bell>, _: ActivityArgs<Log>| Arc::clone(&back),
        ))
    });

    machine.fire_async(Bell::Finish, None).await.unwrap();

    assert!(Arc::ptr_eq(machine.current_state().unwrap(), &start));
    assert_eq!(machine.history().get_path(), vec!["Start", "Finish", "Start"]);
    assert!(machine.history().last().unwrap().via_activity);
}

#[tokio::test]
async fn slow_activity_can_be_timed_out() {
    let (mut machine, start, finish) = school_day();
    start.when(Bell::Finish).transition_to(&finish).map(|b| {
        b.then(activity_fn(
            "slow",
            |ctx: &ActivityContext<Log, Bell>, _: ActivityArgs<Log>| {
                std::thread::sleep(Duration::from_millis(200));
                Arc::clone(ctx.destination())
            },
        ))
    });

    let result = tokio::time::timeout(
        Duration::from_millis(10),
        machine.fire_async(Bell::Finish, None),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(machine.current_state().unwrap().name(), "Finish");
}
