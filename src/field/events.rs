use crate::model::section::SelectedSections;
use crate::ops::change::{ChangeInterpretation, interpret_change};
use crate::ops::codec::ParseError;
use crate::ops::editing::EditContext;
use crate::ops::selection;
use crate::util::unicode::{char_len, char_slice, is_ascii_digits};

use super::DateField;

/// Identifies one focus event. The focus decision only applies if no newer
/// focus or blur happened since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusToken(u64);

/// Caret or highlighted range reported by the input, in raw chars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaretRange {
    pub start: usize,
    pub end: usize,
}

impl CaretRange {
    pub fn at(position: usize) -> Self {
        CaretRange {
            start: position,
            end: position,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// Read-only field
    Ignored,
    /// The input was emptied and every section cleared
    Cleared,
    /// Whole-date text replaced every section
    Reparsed,
    /// Whole-date text was not a date; nothing changed
    Rejected(ParseError),
    /// A keystroke updated the active section
    Edited {
        section_index: usize,
        moved_to_next: bool,
    },
    /// A keystroke the active section cannot take
    KeyRejected,
    /// The active section's text was deleted
    SectionCleared,
    /// Deletion held as raw text while the keyboard composes
    Composing,
    /// The edit touched another section; nothing changed
    OutsideActive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// Let the input insert the digits; the change event follows
    PassThrough,
    /// Paste suppressed
    Ignored,
    Applied,
    Rejected(ParseError),
}

impl DateField {
    /// Focus gained. The selection decision waits until the input has
    /// settled its own caret; pass the token to [`DateField::complete_focus`].
    pub fn handle_focus(&mut self) -> FocusToken {
        self.focused = true;
        self.focus_generation += 1;
        FocusToken(self.focus_generation)
    }

    /// Deferred half of focus handling. Returns false for a stale token.
    pub fn complete_focus(&mut self, token: FocusToken, caret: CaretRange) -> bool {
        if token.0 != self.focus_generation || !self.focused {
            log::debug!("ignoring stale focus token {:?}", token);
            return false;
        }
        if self.selected.is_some() || self.config.read_only {
            return true;
        }

        let text_len = char_len(&self.display_value());
        if text_len > 0 && caret.len() == text_len {
            self.set_selected_sections(Some(SelectedSections::All));
        } else {
            self.sync_selection_from_caret(caret.start);
        }
        true
    }

    pub fn handle_blur(&mut self) {
        self.focused = false;
        // Invalidates any pending focus decision
        self.focus_generation += 1;
        self.set_selected_sections(None);
    }

    pub fn handle_click(&mut self, caret: usize) {
        self.sync_selection_from_caret(caret);
    }

    fn sync_selection_from_caret(&mut self, caret: usize) {
        if self.config.read_only {
            self.set_selected_sections(None);
            return;
        }
        let index = selection::section_index_at_caret(&self.sections, caret);
        self.set_selected_sections(Some(SelectedSections::Index(index)));
    }

    /// The input's text changed to `new_value`. `insert_data` is the text
    /// the platform says was inserted, when it reports one.
    pub fn handle_change(&mut self, new_value: &str, insert_data: Option<&str>) -> ChangeOutcome {
        if self.config.read_only {
            return ChangeOutcome::Ignored;
        }

        let indexes = self.selected_indexes();
        let interpretation = interpret_change(
            &self.rendered_string(),
            new_value,
            insert_data,
            &self.sections,
            indexes.as_ref(),
        );
        log::debug!("change {:?} -> {:?}", new_value, interpretation);

        match interpretation {
            ChangeInterpretation::Clear => {
                self.editor.reset();
                self.clear_value();
                ChangeOutcome::Cleared
            }
            ChangeInterpretation::Reparse(text) => match self.update_value_from_str(&text) {
                Ok(()) => ChangeOutcome::Reparsed,
                Err(e) => ChangeOutcome::Rejected(e),
            },
            ChangeInterpretation::OutsideActive => ChangeOutcome::OutsideActive,
            ChangeInterpretation::Empty => {
                if self.config.defers_composition {
                    self.temp_value_str = Some(new_value.to_string());
                    ChangeOutcome::Composing
                } else {
                    self.editor.reset();
                    self.clear_active_section();
                    ChangeOutcome::SectionCleared
                }
            }
            ChangeInterpretation::Keystroke(key) => {
                // Interpretation only yields a keystroke with a selection
                let Some(indexes) = indexes else {
                    return ChangeOutcome::KeyRejected;
                };
                self.apply_keystroke(&key, indexes.start_index)
            }
        }
    }

    /// Apply one keystroke straight to the section at `section_index`,
    /// without going through the input's text. The selection moves on
    /// when the section is complete.
    pub fn apply_keystroke(&mut self, key: &str, section_index: usize) -> ChangeOutcome {
        if self.config.read_only {
            return ChangeOutcome::Ignored;
        }
        if section_index >= self.sections.len() {
            return ChangeOutcome::KeyRejected;
        }
        if self.selected_indexes().map(|i| i.start_index) != Some(section_index) {
            self.set_selected_sections(Some(SelectedSections::Index(section_index)));
        }
        let current_date = self.value();
        let now = self.clock.now();
        let ctx = EditContext {
            sections: &self.sections,
            current_date,
            month_names: &self.month_names,
        };
        match self.editor.apply(key, section_index, ctx, now) {
            Some(result) => {
                let moved_to_next = result.should_go_to_next_section
                    && section_index + 1 < self.sections.len();
                self.update_section_value(result);
                ChangeOutcome::Edited {
                    section_index,
                    moved_to_next,
                }
            }
            None => {
                self.temp_value_str = None;
                ChangeOutcome::KeyRejected
            }
        }
    }

    /// Clipboard paste. A digits-only paste into one section is left to the
    /// input; anything else is parsed as a whole date.
    pub fn handle_paste(&mut self, text: &str) -> PasteOutcome {
        if self.config.read_only {
            return PasteOutcome::Ignored;
        }
        if let Some(indexes) = self.selected_indexes()
            && indexes.is_single()
        {
            return if is_ascii_digits(text) {
                PasteOutcome::PassThrough
            } else {
                PasteOutcome::Ignored
            };
        }

        self.editor.reset();
        match self.update_value_from_str(text) {
            Ok(()) => PasteOutcome::Applied,
            Err(e) => PasteOutcome::Rejected(e),
        }
    }

    /// Act as the input would when `text` is typed: replace the highlighted
    /// range (or append at the end) and report the change.
    pub fn type_text(&mut self, text: &str) -> ChangeOutcome {
        let new_value = self.input_after_insert(text);
        self.handle_change(&new_value, Some(text))
    }

    /// Input text after `text` replaces the current highlight
    pub fn input_after_insert(&self, text: &str) -> String {
        let current = self.input_text();
        let total = char_len(&current);
        let range = self.input_selection().unwrap_or(total..total);
        let start = range.start.min(total);
        let end = range.end.min(total);
        format!(
            "{}{}{}",
            char_slice(&current, 0, start),
            text,
            char_slice(&current, end, total)
        )
    }
}
