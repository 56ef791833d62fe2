use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;

use datefield::field::{
    CaretRange, ChangeOutcome, DateChange, DateField, KeyOutcome, ManualClock, PasteOutcome,
};
use datefield::model::config::{FieldConfig, ValidationRules};
use datefield::model::section::{SectionType, SelectedSections};
use datefield::ops::codec::{DateValidationError, ParseError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn field_with(config: FieldConfig) -> (DateField, ManualClock) {
    let clock = ManualClock::new(today());
    let field = DateField::with_clock(config, Box::new(clock.clone()));
    (field, clock)
}

fn en_field() -> (DateField, ManualClock) {
    field_with(FieldConfig {
        locale: Some("en-US".into()),
        ..FieldConfig::default()
    })
}

/// Focus with the caret at the start: the first section gets selected.
fn focus(field: &mut DateField) {
    let token = field.handle_focus();
    assert!(field.complete_focus(token, CaretRange::at(0)));
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl_a() -> KeyEvent {
    KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)
}

/// Type each character and collect what the input shows after it.
fn type_keys(field: &mut DateField, keys: &str) -> Vec<String> {
    keys.chars()
        .map(|c| {
            field.type_text(&c.to_string());
            field.display_value()
        })
        .collect()
}

fn selected_type(field: &DateField) -> Option<SectionType> {
    let indexes = field.selected_indexes()?;
    Some(field.sections()[indexes.start_index].section_type)
}

// ---------------------------------------------------------------------------
// Typing
// ---------------------------------------------------------------------------

#[test]
fn typing_a_leap_day_digit_by_digit() {
    let (mut field, _) = en_field();
    focus(&mut field);

    let shown = type_keys(&mut field, "2291988");
    insta::assert_snapshot!(shown.join("\n"), @r"
    02/DD/YYYY
    02/02/YYYY
    02/29/YYYY
    02/29/0001
    02/29/0019
    02/29/0198
    02/29/1988
    ");
    assert_eq!(field.iso_date().as_deref(), Some("1988-02-29"));
    assert_eq!(
        field.take_date_changes(),
        vec![DateChange {
            previous: None,
            iso_date: Some("1988-02-29".into()),
        }]
    );
    // Year is the last section, so the selection stays there
    assert_eq!(selected_type(&field), Some(SectionType::Year));
}

#[test]
fn keystroke_applied_to_a_given_section() {
    let (mut field, _) = en_field();
    field.set_iso_date(Some("1988-02-29"));
    field.take_date_changes();
    focus(&mut field);

    assert_eq!(
        field.apply_keystroke("7", 0),
        ChangeOutcome::Edited {
            section_index: 0,
            moved_to_next: true,
        }
    );
    assert_eq!(field.iso_date().as_deref(), Some("1988-07-29"));
    assert_eq!(selected_type(&field), Some(SectionType::Day));

    // Targets the day even though the year was selected
    field.set_selected_sections(Some(SelectedSections::Type(SectionType::Year)));
    field.apply_keystroke("5", 1);
    assert_eq!(field.display_value(), "07/05/1988");
    assert_eq!(field.apply_keystroke("1", 3), ChangeOutcome::KeyRejected);
}

#[test]
fn completed_section_moves_selection_right() {
    let (mut field, _) = en_field();
    focus(&mut field);

    assert_eq!(
        field.type_text("4"),
        ChangeOutcome::Edited {
            section_index: 0,
            moved_to_next: true,
        }
    );
    assert_eq!(selected_type(&field), Some(SectionType::Day));

    assert_eq!(
        field.type_text("1"),
        ChangeOutcome::Edited {
            section_index: 1,
            moved_to_next: false,
        }
    );
    assert_eq!(selected_type(&field), Some(SectionType::Day));
}

#[test]
fn rejected_key_leaves_section_alone() {
    let (mut field, _) = en_field();
    focus(&mut field);
    field.set_selected_sections(Some(SelectedSections::Type(SectionType::Day)));

    assert_eq!(field.type_text("x"), ChangeOutcome::KeyRejected);
    assert_eq!(field.display_value(), "MM/DD/YYYY");
    assert_eq!(field.pending_query(), None);
}

#[test]
fn month_typed_by_name() {
    let (mut field, _) = en_field();
    focus(&mut field);

    assert_eq!(
        field.type_text("f"),
        ChangeOutcome::Edited {
            section_index: 0,
            moved_to_next: true,
        }
    );
    assert_eq!(field.display_value(), "02/DD/YYYY");
}

#[test]
fn typing_over_whole_selection_starts_in_first_section() {
    let (mut field, _) = en_field();
    field.set_iso_date(Some("1988-02-29"));
    focus(&mut field);
    assert_eq!(field.handle_key(ctrl_a()), KeyOutcome::Consumed);
    assert_eq!(field.selected_sections(), Some(SelectedSections::All));

    field.type_text("7");
    assert_eq!(field.display_value(), "07/29/1988");
    assert_eq!(selected_type(&field), Some(SectionType::Day));
}

// ---------------------------------------------------------------------------
// Query timeout
// ---------------------------------------------------------------------------

#[test]
fn digits_typed_quickly_combine() {
    let (mut field, _) = en_field();
    focus(&mut field);

    type_keys(&mut field, "1");
    assert_eq!(field.pending_query().map(|q| q.value.as_str()), Some("1"));
    type_keys(&mut field, "2");
    assert_eq!(field.display_value(), "12/DD/YYYY");
}

#[test]
fn idle_query_expires() {
    let (mut field, clock) = en_field();
    focus(&mut field);

    type_keys(&mut field, "1");
    assert_eq!(field.display_value(), "01/DD/YYYY");

    clock.advance(Duration::from_millis(4_999));
    assert!(!field.poll_timers());
    clock.advance(Duration::from_millis(1));
    assert!(field.poll_timers());
    assert_eq!(field.pending_query(), None);
    assert_eq!(field.query_deadline(), None);

    // "2" starts over instead of making 12
    type_keys(&mut field, "2");
    assert_eq!(field.display_value(), "02/DD/YYYY");
    assert_eq!(selected_type(&field), Some(SectionType::Day));
}

#[test]
fn configured_timeout_is_used() {
    let (mut field, clock) = field_with(FieldConfig {
        locale: Some("en-US".into()),
        query_timeout_ms: 1_000,
        ..FieldConfig::default()
    });
    focus(&mut field);
    type_keys(&mut field, "1");
    clock.advance(Duration::from_secs(1));
    assert!(field.poll_timers());
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

#[test]
fn arrow_navigation() {
    let (mut field, _) = en_field();
    field.handle_focus();

    field.handle_key(key(KeyCode::Right));
    assert_eq!(field.selected_sections(), Some(SelectedSections::Index(0)));
    field.handle_key(key(KeyCode::Right));
    field.handle_key(key(KeyCode::Right));
    field.handle_key(key(KeyCode::Right));
    assert_eq!(field.selected_sections(), Some(SelectedSections::Index(2)));
    field.handle_key(key(KeyCode::Left));
    assert_eq!(field.selected_sections(), Some(SelectedSections::Index(1)));

    field.handle_key(ctrl_a());
    field.handle_key(key(KeyCode::Left));
    assert_eq!(field.selected_sections(), Some(SelectedSections::Index(0)));

    field.handle_blur();
    field.handle_key(key(KeyCode::Left));
    assert_eq!(field.selected_sections(), Some(SelectedSections::Index(2)));
}

#[test]
fn delete_clears_one_section_or_everything() {
    let (mut field, _) = en_field();
    field.set_iso_date(Some("1988-02-29"));
    field.take_date_changes();
    focus(&mut field);

    field.set_selected_sections(Some(SelectedSections::Type(SectionType::Day)));
    assert_eq!(field.handle_key(key(KeyCode::Delete)), KeyOutcome::Consumed);
    assert_eq!(field.display_value(), "02/DD/1988");
    assert_eq!(field.iso_date(), None);

    field.handle_key(ctrl_a());
    field.handle_key(key(KeyCode::Delete));
    assert_eq!(field.display_value(), "MM/DD/YYYY");
    assert!(field.sections().iter().all(|s| !s.modified));

    assert_eq!(
        field.take_date_changes(),
        vec![DateChange {
            previous: Some("1988-02-29".into()),
            iso_date: None,
        }]
    );
}

#[test]
fn backspace_on_empty_section_steps_back() {
    let (mut field, _) = en_field();
    focus(&mut field);
    type_keys(&mut field, "4");
    assert_eq!(selected_type(&field), Some(SectionType::Day));

    assert_eq!(field.handle_key(key(KeyCode::Backspace)), KeyOutcome::Consumed);
    assert_eq!(selected_type(&field), Some(SectionType::Month));

    // Month has a value: the input deletes it
    assert_eq!(field.handle_key(key(KeyCode::Backspace)), KeyOutcome::PassThrough);
    assert_eq!(field.type_text(""), ChangeOutcome::SectionCleared);
    assert_eq!(field.display_value(), "MM/DD/YYYY");

    // Nothing before the first section
    assert_eq!(field.handle_key(key(KeyCode::Backspace)), KeyOutcome::PassThrough);
}

#[test]
fn adjust_keys() {
    let (mut field, _) = en_field();
    focus(&mut field);

    field.handle_key(key(KeyCode::Up));
    assert_eq!(field.display_value(), "01/DD/YYYY");
    field.handle_key(key(KeyCode::Down));
    assert_eq!(field.display_value(), "12/DD/YYYY");
    field.handle_key(key(KeyCode::PageUp));
    assert_eq!(field.display_value(), "05/DD/YYYY");
    field.handle_key(key(KeyCode::End));
    assert_eq!(field.display_value(), "12/DD/YYYY");
    // Adjusting never moves the selection
    assert_eq!(selected_type(&field), Some(SectionType::Month));

    field.set_selected_sections(Some(SelectedSections::Type(SectionType::Year)));
    field.handle_key(key(KeyCode::Down));
    assert_eq!(field.display_value(), "12/DD/2026");
}

#[test]
fn day_wraps_within_the_current_month() {
    let (mut field, _) = en_field();
    field.set_iso_date(Some("1988-02-01"));
    focus(&mut field);
    field.set_selected_sections(Some(SelectedSections::Type(SectionType::Day)));

    field.handle_key(key(KeyCode::Down));
    assert_eq!(field.iso_date().as_deref(), Some("1988-02-29"));
}

#[test]
fn unrelated_keys_pass_through() {
    let (mut field, _) = en_field();
    focus(&mut field);
    assert_eq!(field.handle_key(key(KeyCode::Tab)), KeyOutcome::PassThrough);
    assert_eq!(field.handle_key(key(KeyCode::Char('5'))), KeyOutcome::PassThrough);
}

// ---------------------------------------------------------------------------
// Change events
// ---------------------------------------------------------------------------

#[test]
fn emptied_input_clears_everything() {
    let (mut field, _) = en_field();
    field.set_iso_date(Some("1988-02-29"));
    focus(&mut field);
    assert_eq!(field.handle_change("", None), ChangeOutcome::Cleared);
    assert_eq!(field.iso_date(), None);
}

#[test]
fn edit_outside_active_section_is_ignored() {
    let (mut field, _) = en_field();
    focus(&mut field);
    assert_eq!(field.handle_change("MM/DD/5", None), ChangeOutcome::OutsideActive);
    assert_eq!(field.display_value(), "MM/DD/YYYY");
}

#[test]
fn filled_text_is_parsed_as_a_date() {
    let (mut field, _) = en_field();
    focus(&mut field);
    assert_eq!(
        field.handle_change("04/11/2022MM/DD/YYYY", Some("04/11/2022")),
        ChangeOutcome::Reparsed
    );
    assert_eq!(field.iso_date().as_deref(), Some("2022-04-11"));
}

#[test]
fn change_without_selection_reparses_the_value() {
    let (mut field, _) = en_field();
    field.handle_focus();
    assert_eq!(field.handle_change("1988-02-29", None), ChangeOutcome::Reparsed);
    assert_eq!(field.display_value(), "02/29/1988");

    assert_eq!(
        field.handle_change("02/30", None),
        ChangeOutcome::Rejected(ParseError::WrongPartCount {
            expected: 3,
            found: 2,
        })
    );
    assert_eq!(field.display_value(), "02/29/1988");
}

#[test]
fn composing_keyboard_holds_raw_text() {
    let (mut field, _) = field_with(FieldConfig {
        locale: Some("en-US".into()),
        defers_composition: true,
        ..FieldConfig::default()
    });
    field.set_iso_date(Some("1988-02-29"));
    focus(&mut field);

    assert_eq!(field.type_text(""), ChangeOutcome::Composing);
    assert_eq!(field.display_value(), "/29/1988");
    // The section itself is untouched until the keyboard commits
    assert_eq!(field.iso_date().as_deref(), Some("1988-02-29"));

    assert_eq!(
        field.handle_change("5/29/1988", Some("5")),
        ChangeOutcome::Edited {
            section_index: 0,
            moved_to_next: true,
        }
    );
    assert_eq!(field.display_value(), "05/29/1988");
}

// ---------------------------------------------------------------------------
// Paste
// ---------------------------------------------------------------------------

#[test]
fn paste_whole_date() {
    let (mut field, _) = en_field();
    let token = field.handle_focus();
    field.complete_focus(token, CaretRange { start: 0, end: 10 });
    assert_eq!(field.selected_sections(), Some(SelectedSections::All));

    assert_eq!(field.handle_paste("02/29/1988"), PasteOutcome::Applied);
    assert_eq!(field.iso_date().as_deref(), Some("1988-02-29"));
    assert!(field.sections().iter().all(|s| s.modified));
}

#[test]
fn rejected_paste_changes_nothing() {
    let (mut field, _) = en_field();
    field.set_iso_date(Some("1988-02-29"));
    field.handle_focus();
    let before = field.sections().to_vec();

    assert!(matches!(field.handle_paste("garbage"), PasteOutcome::Rejected(_)));
    assert_eq!(field.sections(), before.as_slice());
    assert_eq!(
        field.handle_paste("13/01/2020"),
        PasteOutcome::Rejected(ParseError::OutOfRange {
            section: SectionType::Month,
            value: 13,
        })
    );
}

#[test]
fn paste_over_a_date_queues_a_change() {
    let (mut field, _) = en_field();
    field.set_iso_date(Some("1988-02-29"));
    field.take_date_changes();
    let token = field.handle_focus();
    field.complete_focus(token, CaretRange { start: 0, end: 10 });

    assert_eq!(field.handle_paste("2024-07-04"), PasteOutcome::Applied);
    assert_eq!(
        field.take_date_changes(),
        vec![DateChange {
            previous: Some("1988-02-29".into()),
            iso_date: Some("2024-07-04".into()),
        }]
    );
}

#[test]
fn paste_into_one_section() {
    let (mut field, _) = en_field();
    focus(&mut field);
    assert_eq!(field.handle_paste("12"), PasteOutcome::PassThrough);
    assert_eq!(field.handle_paste("ab"), PasteOutcome::Ignored);
}

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[test]
fn stale_focus_decision_is_ignored() {
    let (mut field, _) = en_field();
    let first = field.handle_focus();
    field.handle_blur();
    assert!(!field.complete_focus(first, CaretRange::at(4)));
    assert_eq!(field.selected_sections(), None);

    let second = field.handle_focus();
    let third = field.handle_focus();
    assert!(!field.complete_focus(second, CaretRange::at(4)));
    assert!(field.complete_focus(third, CaretRange::at(4)));
    assert_eq!(selected_type(&field), Some(SectionType::Day));
}

#[test]
fn focus_keeps_an_existing_selection() {
    let (mut field, _) = en_field();
    field.set_selected_sections(Some(SelectedSections::Type(SectionType::Year)));
    let token = field.handle_focus();
    field.complete_focus(token, CaretRange::at(0));
    assert_eq!(selected_type(&field), Some(SectionType::Year));
}

#[test]
fn click_selects_section_under_caret() {
    let (mut field, _) = en_field();
    focus(&mut field);
    field.handle_click(7);
    assert_eq!(selected_type(&field), Some(SectionType::Year));
    assert_eq!(field.input_selection(), Some(6..10));
    field.handle_click(10);
    assert_eq!(selected_type(&field), Some(SectionType::Month));
}

#[test]
fn display_is_empty_until_focused() {
    let (mut field, _) = en_field();
    assert_eq!(field.display_value(), "");
    field.handle_focus();
    assert_eq!(field.display_value(), "MM/DD/YYYY");
    field.handle_blur();
    field.set_iso_date(Some("2024-01-05"));
    assert_eq!(field.display_value(), "01/05/2024");
}

#[test]
fn partial_entry_stays_visible_after_blur() {
    let (mut field, _) = en_field();
    focus(&mut field);
    type_keys(&mut field, "2");
    field.handle_blur();
    assert_eq!(field.iso_date(), None);
    assert_eq!(field.display_value(), "02/DD/YYYY");

    focus(&mut field);
    field.handle_key(ctrl_a());
    field.handle_key(key(KeyCode::Delete));
    field.handle_blur();
    assert_eq!(field.display_value(), "");
}

// ---------------------------------------------------------------------------
// Read-only
// ---------------------------------------------------------------------------

#[test]
fn read_only_field_ignores_edits() {
    let (mut field, _) = field_with(FieldConfig {
        locale: Some("en-US".into()),
        read_only: true,
        ..FieldConfig::default()
    });
    field.set_iso_date(Some("1988-02-29"));
    let token = field.handle_focus();
    field.complete_focus(token, CaretRange::at(0));
    assert_eq!(field.selected_sections(), None);

    field.handle_click(4);
    assert_eq!(field.selected_sections(), None);

    assert_eq!(field.handle_change("", None), ChangeOutcome::Ignored);
    assert_eq!(field.handle_paste("01/01/2000"), PasteOutcome::Ignored);
    field.set_selected_sections(Some(SelectedSections::Index(0)));
    field.handle_key(key(KeyCode::Up));
    field.handle_key(key(KeyCode::Delete));
    assert_eq!(field.iso_date().as_deref(), Some("1988-02-29"));
}

// ---------------------------------------------------------------------------
// Owner updates
// ---------------------------------------------------------------------------

#[test]
fn external_value_only_hydrates_when_unfocused() {
    let (mut field, _) = en_field();
    field.sync_external_value(Some("2020-05-06"));
    assert_eq!(field.iso_date().as_deref(), Some("2020-05-06"));
    assert!(field.take_date_changes().is_empty());

    field.handle_focus();
    field.sync_external_value(Some("2021-01-01"));
    assert_eq!(field.iso_date().as_deref(), Some("2020-05-06"));
}

#[test]
fn each_programmatic_date_queues_a_change() {
    let (mut field, _) = en_field();
    field.set_iso_date(Some("2019-01-01"));
    field.take_date_changes();

    field.set_iso_date(Some("2020-05-06"));
    assert_eq!(field.iso_date().as_deref(), Some("2020-05-06"));
    assert_eq!(
        field.take_date_changes(),
        vec![DateChange {
            previous: Some("2019-01-01".into()),
            iso_date: Some("2020-05-06".into()),
        }]
    );
}

#[test]
fn invalid_programmatic_value_clears() {
    let (mut field, _) = en_field();
    field.set_iso_date(Some("2020-05-06"));
    field.set_iso_date(Some("2020-02-30"));
    assert_eq!(field.iso_date(), None);
    assert_eq!(field.rendered_string(), "MM/DD/YYYY");
}

#[test]
fn locale_switch_keeps_values() {
    let (mut field, _) = en_field();
    focus(&mut field);
    type_keys(&mut field, "2");
    field.set_selected_sections(Some(SelectedSections::Type(SectionType::Year)));
    type_keys(&mut field, "1");
    assert!(field.pending_query().is_some());

    field.set_locale(Some("de-DE"));
    assert_eq!(field.rendered_string(), "TT/02/0001");
    // Index 2 is still the year, so the query survives
    assert!(field.pending_query().is_some());

    field.set_selected_sections(Some(SelectedSections::Index(0)));
    type_keys(&mut field, "3");
    field.set_locale(Some("en-US"));
    assert_eq!(field.rendered_string(), "02/03/0001");
    // Index 0 became the month
    assert_eq!(field.pending_query(), None);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn validation_rules_apply_to_complete_dates() {
    let (mut field, _) = field_with(FieldConfig {
        locale: Some("en-US".into()),
        validation: ValidationRules {
            min_date: NaiveDate::from_ymd_opt(2000, 1, 1),
            disable_future: true,
            ..ValidationRules::default()
        },
        ..FieldConfig::default()
    });
    assert_eq!(field.validation_error(), None);

    field.set_iso_date(Some("1988-02-29"));
    assert_eq!(
        field.validation_error(),
        Some(DateValidationError::MinDate(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()))
    );
    field.set_iso_date(Some("2030-01-01"));
    assert_eq!(field.validation_error(), Some(DateValidationError::DisableFuture));
    field.set_iso_date(Some("2010-06-15"));
    assert_eq!(field.validation_error(), None);
}

#[test]
fn reference_date_falls_back_to_clamped_today() {
    let (mut field, _) = field_with(FieldConfig {
        locale: Some("en-US".into()),
        validation: ValidationRules {
            min_date: NaiveDate::from_ymd_opt(2030, 3, 4),
            ..ValidationRules::default()
        },
        ..FieldConfig::default()
    });
    assert_eq!(field.reference_date(), NaiveDate::from_ymd_opt(2030, 3, 4).unwrap());

    field.set_iso_date(Some("1988-02-29"));
    assert_eq!(field.reference_date(), NaiveDate::from_ymd_opt(1988, 2, 29).unwrap());
}
