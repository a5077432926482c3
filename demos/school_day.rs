//! School Day State Machine
//!
//! This example walks a class through a day of lessons.
//!
//! Key concepts:
//! - Declaring transitions with `when(..).transition_to(..)`
//! - A data log handed on from state to state
//! - Activities that append the values passed to `fire_with`
//! - Telling unknown and unwired triggers apart with `resolve`
//!
//! Run with: cargo run --example school_day

use instate::builder::StateMachineBuilder;
use instate::core::State;
use instate::effects::{AppendArgs, Resolution};
use instate::trigger_enum;

trigger_enum! {
    enum Bell {
        Start,
        Recess,
        Finish,
    }
}

type Subject = Option<String>;

fn subject(name: &str) -> Subject {
    Some(name.to_string())
}

fn main() {
    println!("=== School Day State Machine ===\n");

    let start = State::<Subject, Bell>::with_data(
        "Start",
        vec![subject("math"), subject("geography"), subject("science")],
    );
    let recess = State::new("Recess");
    let finish = State::new("Finish");

    // Recess records what was eaten and returns to class
    start
        .when(Bell::Recess)
        .transition_to(&recess)
        .map(|b| b.then(AppendArgs))
        .map(|recess| recess.when(Bell::Start).transition_to(&start));

    // The final bell records the last lessons of the day
    start
        .when(Bell::Finish)
        .transition_to(&finish)
        .map(|b| b.then(AppendArgs));

    let mut machine = StateMachineBuilder::new()
        .states(vec![start.clone(), recess.clone(), finish.clone()])
        .initial(&start)
        .build()
        .unwrap();

    println!("Initial state: {}", machine.current_state().unwrap().name());
    println!("Subjects so far: {:?}\n", start.data().to_vec());

    machine.fire_with(Bell::Recess, subject("apple"));
    println!("Bell::Recess  -> {}", machine.current_state().unwrap().name());

    match machine.resolve(&Bell::Finish) {
        Resolution::Unmatched(state) => {
            println!("Bell::Finish  -> ignored, no rule on {}", state.name())
        }
        other => println!("Bell::Finish  -> {:?}", other.state().map(|s| s.name())),
    }

    machine.fire(Bell::Start);
    println!("Bell::Start   -> {}", machine.current_state().unwrap().name());

    machine.fire_with_pair(Bell::Finish, subject("history"), subject("lunch"));
    println!("Bell::Finish  -> {}\n", machine.current_state().unwrap().name());

    println!("Final log ({} entries):", finish.data().len());
    for entry in finish.data().to_vec() {
        println!("  - {}", entry.unwrap_or_else(|| "<none>".to_string()));
    }

    println!("\nPath: {}", machine.history().get_path().join(" -> "));

    println!("\n=== Example Complete ===");
}
