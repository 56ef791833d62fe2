pub mod clock;
mod events;
mod keys;

use std::ops::Range;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::config::FieldConfig;
use crate::model::locale::LocaleInfo;
use crate::model::section::{Section, SelectedSectionIndexes, SelectedSections};
use crate::ops::codec::{self, DateValidationError, ParseError};
use crate::ops::editing::{CharacterEditor, CharacterQuery, EditResult};
use crate::ops::{locale, sections as section_ops, selection};

pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{CaretRange, ChangeOutcome, FocusToken, PasteOutcome};
pub use keys::KeyOutcome;

/// Notification queued whenever the field's ISO date changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateChange {
    pub previous: Option<String>,
    pub iso_date: Option<String>,
}

/// A single date input: the sections, what is selected, and the pending
/// keystroke query. Every event handler runs to completion; the only
/// deferred work is the query deadline (see [`DateField::poll_timers`]) and
/// the focus decision (see [`DateField::complete_focus`]).
pub struct DateField {
    config: FieldConfig,
    locale: LocaleInfo,
    sections: Vec<Section>,
    selected: Option<SelectedSections>,
    editor: CharacterEditor,
    month_names: Vec<String>,
    /// Raw input text held while a virtual keyboard composes
    temp_value_str: Option<String>,
    focused: bool,
    focus_generation: u64,
    changes: Vec<DateChange>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateField")
            .field("locale", &self.locale)
            .field("rendered", &self.rendered_string())
            .field("selected", &self.selected)
            .field("query", &self.editor.query())
            .field("focused", &self.focused)
            .finish()
    }
}

impl DateField {
    pub fn new(config: FieldConfig) -> Self {
        DateField::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: FieldConfig, clock: Box<dyn Clock>) -> Self {
        let locale = locale::resolve_locale(config.locale.as_deref());
        let sections = section_ops::create_sections_for(&locale, config.bidi_isolated);
        let month_names = locale::month_names(locale.text_locale);
        let editor = CharacterEditor::new(Duration::from_millis(config.query_timeout_ms));
        log::debug!(
            "new date field: format locale {}, text locale {}",
            locale.format_locale,
            locale.text_locale.code()
        );
        DateField {
            config,
            locale,
            sections,
            selected: None,
            editor,
            month_names,
            temp_value_str: None,
            focused: false,
            focus_generation: 0,
            changes: Vec::new(),
            clock,
        }
    }

    // -- Accessors --

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn locale(&self) -> &LocaleInfo {
        &self.locale
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// ISO date of the sections, `None` unless they form a real date
    pub fn iso_date(&self) -> Option<String> {
        codec::sections_to_iso(&self.sections)
    }

    pub fn value(&self) -> Option<NaiveDate> {
        codec::sections_to_date(&self.sections)
    }

    /// Section values joined with separators, placeholders for empty ones
    pub fn rendered_string(&self) -> String {
        section_ops::rendered_string(&self.sections)
    }

    /// What the input shows. Empty while unfocused with every section
    /// empty so the owner can show its own placeholder.
    pub fn display_value(&self) -> String {
        if !self.focused && self.sections.iter().all(Section::is_empty) {
            return String::new();
        }
        self.input_text()
    }

    /// Text currently in the input while focused
    fn input_text(&self) -> String {
        self.temp_value_str
            .clone()
            .unwrap_or_else(|| self.rendered_string())
    }

    pub fn selected_sections(&self) -> Option<SelectedSections> {
        self.selected
    }

    pub fn selected_indexes(&self) -> Option<SelectedSectionIndexes> {
        selection::resolve_selected_sections(self.selected.as_ref(), &self.sections)
    }

    /// Raw char range the input should highlight
    pub fn input_selection(&self) -> Option<Range<usize>> {
        self.selected_indexes()
            .map(|indexes| selection::selection_range_in_input(&self.sections, &indexes))
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_read_only(&self) -> bool {
        self.config.read_only
    }

    pub fn pending_query(&self) -> Option<&CharacterQuery> {
        self.editor.query()
    }

    pub fn query_deadline(&self) -> Option<std::time::Instant> {
        self.editor.deadline()
    }

    /// Rule the current date breaks, if any
    pub fn validation_error(&self) -> Option<DateValidationError> {
        let date = self.value()?;
        codec::validate_date(date, &self.config.validation, self.clock.today())
    }

    /// Date used to fill in what the field does not show: the current value,
    /// else today clamped into the configured range.
    pub fn reference_date(&self) -> NaiveDate {
        self.value().unwrap_or_else(|| {
            codec::default_reference_date(
                self.clock.today(),
                codec::granularity(&self.sections),
                &self.config.validation,
            )
        })
    }

    /// Drain queued date-change notifications, oldest first.
    pub fn take_date_changes(&mut self) -> Vec<DateChange> {
        std::mem::take(&mut self.changes)
    }

    // -- Owner-driven updates --

    /// Set the value programmatically. Invalid or missing dates clear it.
    pub fn set_iso_date(&mut self, iso_date: Option<&str>) {
        let next = codec::map_iso_to_sections(iso_date, &self.sections);
        self.publish(next);
    }

    /// Hydrate from the owner's value. Ignored while focused so typing is
    /// never overwritten mid-edit. Does not queue a notification.
    pub fn sync_external_value(&mut self, iso_date: Option<&str>) {
        if self.focused || iso_date.map(str::to_string) == self.iso_date() {
            return;
        }
        log::debug!("hydrating from external value {:?}", iso_date);
        self.sections = codec::map_iso_to_sections(iso_date, &self.sections);
    }

    /// Switch locale, keeping each section's value by type.
    pub fn set_locale(&mut self, tag: Option<&str>) {
        let info = locale::resolve_locale(tag);
        if info == self.locale {
            return;
        }
        let fresh = section_ops::create_sections_for(&info, self.config.bidi_isolated);
        self.sections = section_ops::rebuild_keeping_values(&self.sections, fresh);
        self.month_names = locale::month_names(info.text_locale);
        log::debug!(
            "locale changed to {} ({})",
            info.format_locale,
            info.text_locale.code()
        );
        self.locale = info;
        self.editor.invalidate_if_stale(&self.sections);
    }

    pub fn set_selected_sections(&mut self, selected: Option<SelectedSections>) {
        log::trace!("selected sections: {:?} -> {:?}", self.selected, selected);
        self.selected = selected;
    }

    /// Fire the query-expiry deadline if it is due. Returns true if the
    /// pending query was dropped.
    pub fn poll_timers(&mut self) -> bool {
        self.editor.expire_if_due(self.clock.now())
    }

    // -- Internal updates --

    /// Store new sections and queue a notification if the date changed.
    fn publish(&mut self, sections: Vec<Section>) {
        self.store_and_notify(sections, |_, date| date);
    }

    /// Like [`DateField::publish`] for an edit of single sections: only what
    /// the user touched moves away from the previous value.
    fn publish_section_edit(&mut self, sections: Vec<Section>) {
        let previous_date = self.value();
        self.store_and_notify(sections, |sections, date| {
            let reference = previous_date.unwrap_or(date);
            codec::merge_into_reference(date, sections, reference, true)
        });
    }

    fn store_and_notify(
        &mut self,
        sections: Vec<Section>,
        resolve: impl FnOnce(&[Section], NaiveDate) -> NaiveDate,
    ) {
        let previous = self.iso_date();
        self.temp_value_str = None;
        self.sections = sections;

        let iso_date = codec::sections_to_date(&self.sections)
            .map(|date| codec::format_iso_date(resolve(&self.sections, date)));

        if iso_date != previous {
            log::debug!("date changed: {:?} -> {:?}", previous, iso_date);
            self.changes.push(DateChange { previous, iso_date });
        }
    }

    /// Write an edit into the active section and move the selection.
    fn update_section_value(&mut self, result: EditResult) {
        let Some(indexes) = self.selected_indexes() else {
            return;
        };
        if result.should_go_to_next_section && indexes.start_index + 1 < self.sections.len() {
            self.set_selected_sections(Some(SelectedSections::Index(indexes.start_index + 1)));
        } else if !indexes.is_single() {
            self.set_selected_sections(Some(SelectedSections::Index(indexes.start_index)));
        }

        let next =
            section_ops::set_section_value(&self.sections, indexes.start_index, &result.section_value);
        self.publish_section_edit(next);
    }

    fn clear_value(&mut self) {
        let next = codec::map_iso_to_sections(None, &self.sections);
        self.publish(next);
    }

    fn clear_active_section(&mut self) {
        if let Some(indexes) = self.selected_indexes() {
            let next = section_ops::set_section_value(&self.sections, indexes.start_index, "");
            self.publish_section_edit(next);
        }
    }

    /// Replace every section from a whole-date string. Leaves the field
    /// untouched when the text is not a date.
    fn update_value_from_str(&mut self, text: &str) -> Result<(), ParseError> {
        match codec::parse_value_str(text, &self.sections) {
            Ok(next) => {
                self.publish(next);
                Ok(())
            }
            Err(e) => {
                log::debug!("could not parse {:?}: {}", text, e);
                Err(e)
            }
        }
    }
}
