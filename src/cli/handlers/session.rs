use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cli::commands::{AdjustArgs, PasteArgs, TypeArgs};
use crate::cli::output::*;
use crate::cli::script::{ScriptKey, parse_script};
use crate::field::{CaretRange, DateField, KeyOutcome, ManualClock, PasteOutcome};
use crate::ops::boundaries::AdjustKey;
use crate::util::unicode::char_len;

use super::{Globals, build_field, focus, print_run, select_section, set_initial_value};

pub fn cmd_type(args: TypeArgs, globals: &Globals) -> Result<(), Box<dyn std::error::Error>> {
    let keys = parse_script(&args.keys)?;
    let (mut field, clock) = build_field(globals)?;
    set_initial_value(&mut field, args.value.as_deref())?;
    focus(&mut field, CaretRange::at(0));
    if let Some(start) = &args.start {
        select_section(&mut field, start)?;
    }

    let mut steps = Vec::with_capacity(keys.len());
    for key in &keys {
        let outcome = play_key(&mut field, &clock, key);
        steps.push(StepJson {
            key: key.label(),
            outcome,
            state: field_state(&field),
        });
    }

    let run = RunJson {
        steps,
        changes: field.take_date_changes(),
    };
    print_run(&run, globals.json)
}

/// Feed one script step to the field, acting as the input would for keys
/// the field passes through.
fn play_key(field: &mut DateField, clock: &ManualClock, key: &ScriptKey) -> String {
    match key {
        ScriptKey::Text(c) => {
            let mut buf = [0u8; 4];
            change_outcome_label(&field.type_text(c.encode_utf8(&mut buf)))
        }
        ScriptKey::Key(event) => {
            let outcome = field.handle_key(*event);
            if outcome == KeyOutcome::PassThrough && event.code == KeyCode::Backspace {
                // The input deletes the highlighted text
                change_outcome_label(&field.type_text(""))
            } else {
                key_outcome_label(outcome)
            }
        }
        ScriptKey::Wait => {
            clock.advance(Duration::from_millis(field.config().query_timeout_ms));
            if field.poll_timers() {
                "query expired".to_string()
            } else {
                "idle".to_string()
            }
        }
    }
}

pub fn cmd_paste(args: PasteArgs, globals: &Globals) -> Result<(), Box<dyn std::error::Error>> {
    let (mut field, _) = build_field(globals)?;
    set_initial_value(&mut field, args.value.as_deref())?;
    let len = char_len(&field.rendered_string());
    focus(&mut field, CaretRange { start: 0, end: len });
    if let Some(section) = &args.section {
        select_section(&mut field, section)?;
    }

    let outcome = field.handle_paste(&args.text);
    let mut steps = vec![StepJson {
        key: format!("paste {:?}", args.text),
        outcome: paste_outcome_label(&outcome),
        state: field_state(&field),
    }];
    if outcome == PasteOutcome::PassThrough {
        // The input inserts the digits itself; paste events carry no
        // insert data, so the change is diffed like a keystroke
        let new_value = field.input_after_insert(&args.text);
        let change = field.handle_change(&new_value, None);
        steps.push(StepJson {
            key: args.text.clone(),
            outcome: change_outcome_label(&change),
            state: field_state(&field),
        });
    }

    let run = RunJson {
        steps,
        changes: field.take_date_changes(),
    };
    print_run(&run, globals.json)
}

pub fn cmd_adjust(args: AdjustArgs, globals: &Globals) -> Result<(), Box<dyn std::error::Error>> {
    let key = AdjustKey::from_name(&args.key).ok_or_else(|| {
        format!(
            "unknown key '{}': expected up, down, pageup, pagedown, home or end",
            args.key
        )
    })?;
    let (mut field, _) = build_field(globals)?;
    set_initial_value(&mut field, args.value.as_deref())?;
    focus(&mut field, CaretRange::at(0));
    select_section(&mut field, &args.section)?;

    let event = KeyEvent::new(key.key_code(), KeyModifiers::NONE);
    let mut steps = Vec::with_capacity(args.repeat);
    for _ in 0..args.repeat {
        let outcome = field.handle_key(event);
        steps.push(StepJson {
            key: format!("<{}>", args.key.to_ascii_lowercase()),
            outcome: key_outcome_label(outcome),
            state: field_state(&field),
        });
    }

    let run = RunJson {
        steps,
        changes: field.take_date_changes(),
    };
    print_run(&run, globals.json)
}
