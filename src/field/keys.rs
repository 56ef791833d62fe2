use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::section::SelectedSections;
use crate::ops::boundaries::{AdjustKey, adjust_section_value};
use crate::ops::editing::EditResult;
use crate::ops::selection::section_order;

use super::DateField;

/// Whether the field took over a key or the input should handle it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    PassThrough,
}

impl DateField {
    /// Handle a key press before the input sees it.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind == KeyEventKind::Release || matches!(key.code, KeyCode::Modifier(_)) {
            return KeyOutcome::PassThrough;
        }

        match (key.modifiers, key.code) {
            (m, KeyCode::Char('a' | 'A'))
                if m.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER) =>
            {
                self.set_selected_sections(Some(SelectedSections::All));
                KeyOutcome::Consumed
            }
            (_, KeyCode::Right) => {
                self.move_selection(true);
                KeyOutcome::Consumed
            }
            (_, KeyCode::Left) => {
                self.move_selection(false);
                KeyOutcome::Consumed
            }
            (_, KeyCode::Delete) => {
                self.delete_selection();
                KeyOutcome::Consumed
            }
            (_, KeyCode::Backspace) => self.backspace(),
            (_, code) => match AdjustKey::try_from(code) {
                Ok(adjust) => {
                    self.adjust_active_section(adjust);
                    KeyOutcome::Consumed
                }
                Err(_) => KeyOutcome::PassThrough,
            },
        }
    }

    fn move_selection(&mut self, forward: bool) {
        let order = section_order(&self.sections);
        let next = match self.selected_indexes() {
            None if forward => Some(order.start_index),
            None => Some(order.end_index),
            // Collapse a range onto its edge
            Some(indexes) if !indexes.is_single() => Some(if forward {
                indexes.end_index
            } else {
                indexes.start_index
            }),
            Some(indexes) => {
                let neighbors = order.neighbors[indexes.start_index];
                if forward {
                    neighbors.right_index
                } else {
                    neighbors.left_index
                }
            }
        };
        if let Some(index) = next {
            self.set_selected_sections(Some(SelectedSections::Index(index)));
        }
    }

    fn delete_selection(&mut self) {
        if self.config.read_only {
            return;
        }
        match self.selected_indexes() {
            Some(indexes) if !indexes.covers_all(self.sections.len()) => {
                self.clear_active_section()
            }
            _ => self.clear_value(),
        }
        self.editor.reset();
    }

    /// On an empty section, step back to the previous one instead of
    /// letting the input delete text.
    fn backspace(&mut self) -> KeyOutcome {
        if self.config.read_only {
            return KeyOutcome::PassThrough;
        }
        let Some(indexes) = self.selected_indexes() else {
            return KeyOutcome::PassThrough;
        };
        if !self.sections[indexes.start_index].is_empty() {
            return KeyOutcome::PassThrough;
        }
        match indexes.start_index.checked_sub(1) {
            Some(previous) => {
                self.set_selected_sections(Some(SelectedSections::Index(previous)));
                KeyOutcome::Consumed
            }
            None => KeyOutcome::PassThrough,
        }
    }

    fn adjust_active_section(&mut self, key: AdjustKey) {
        if self.config.read_only {
            return;
        }
        let Some(indexes) = self.selected_indexes() else {
            return;
        };
        let section_value = adjust_section_value(
            &self.sections[indexes.start_index],
            key,
            self.value(),
            self.clock.today(),
        );
        log::debug!("{:?} on section {} -> {}", key, indexes.start_index, section_value);
        self.update_section_value(EditResult {
            section_value,
            should_go_to_next_section: false,
        });
    }
}
