//! Drives a select widget through a scripted session from the terminal,
//! printing the render state a host UI would draw after each step.
//!
//! Run with `RUST_LOG=debug cargo run --example basic` to see the widget's
//! internal transitions.

use std::time::Duration;

use serde_json::{json, Value};
use web_time::Instant;

use select_ui::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum Message {
    Selected(Value),
    SearchRequested(String),
}

fn print_state(select: &CustomSelect<Message>) {
    println!("trigger: [{}]  focus: {:?}", select.display_text(), select.focus());
    if !select.is_open() {
        return;
    }
    println!("  search: '{}'", select.search_text());
    let items = select.visible_items();
    if let Some(empty) = select.empty_text() {
        println!("    ({})", empty);
    }
    for (i, item) in items.iter().enumerate() {
        let marker = if select.focus() == FocusTarget::Item(i) {
            ">"
        } else {
            " "
        };
        println!("  {} {}", marker, item.display);
    }
}

fn main() -> Result<(), SelectError> {
    env_logger::init();

    let options = SelectOptions::new()
        .display_text("Pick a fruit...")
        .on_select(Message::Selected)
        .on_search(Message::SearchRequested)
        .search_delay(Duration::from_millis(300));

    let mut select = CustomSelect::new("f.id as f.name for f in fruits", options)?;
    select.set_collection(json!([
        {"id": 1, "name": "Apple"},
        {"id": 2, "name": "Banana"},
        {"id": 3, "name": "Cherry"},
    ]));

    println!("-- initial --");
    print_state(&select);

    println!("-- open --");
    select.activate_trigger(Modifiers::default());
    print_state(&select);

    println!("-- type 'ban' --");
    let t0 = Instant::now();
    select.set_search_text("ban", t0);
    print_state(&select);

    // Pump until the debounced search fires, as a host would each frame.
    let mut now = t0;
    let message = loop {
        now += Duration::from_millis(16);
        if let Some(message) = select.poll(now) {
            break message;
        }
    };
    println!("-- host receives {:?} and narrows the collection --", message);
    select.set_collection(json!([{"id": 2, "name": "Banana"}]));
    print_state(&select);

    println!("-- arrow down, enter --");
    select.on_input_key(Key::Down);
    let outcome = select.on_menu_key(Key::Up);
    assert!(outcome.consumed);
    if let Some(message) = select.on_input_key(Key::Enter).message {
        println!("-- host receives {:?} --", message);
    }
    print_state(&select);

    println!("-- external write of id 3, then settle --");
    select.set_collection(json!([
        {"id": 1, "name": "Apple"},
        {"id": 2, "name": "Banana"},
        {"id": 3, "name": "Cherry"},
    ]));
    select.set_value(json!(3), now);
    select.render_settled();
    print_state(&select);

    Ok(())
}
