use crate::model::section::{Section, SelectedSectionIndexes};
use crate::util::unicode::{char_len, char_slice, clean_string};

/// What a change event on the input amounts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeInterpretation {
    /// The input was emptied
    Clear,
    /// Parse the text as a whole date
    Reparse(String),
    /// Text typed into the active section
    Keystroke(String),
    /// The active section's text was removed
    Empty,
    /// The edit touched text outside the active section
    OutsideActive,
}

/// Interpret the input's new value against what was rendered before.
///
/// `insert_data` is the text the platform reports as inserted, if any.
/// Anything longer than one character is treated as a whole-date fill.
pub fn interpret_change(
    prev_rendered: &str,
    new_value: &str,
    insert_data: Option<&str>,
    sections: &[Section],
    selection: Option<&SelectedSectionIndexes>,
) -> ChangeInterpretation {
    if new_value.is_empty() {
        return ChangeInterpretation::Clear;
    }

    if let Some(data) = insert_data
        && char_len(data) > 1
    {
        return ChangeInterpretation::Reparse(data.to_string());
    }

    let clean_value = clean_string(new_value);
    let Some(selection) = selection else {
        return ChangeInterpretation::Reparse(clean_value);
    };

    let whole_field = selection.covers_all(sections.len());
    let key = if whole_field && char_len(&clean_value) == 1 {
        clean_value
    } else {
        let prev: Vec<char> = clean_string(prev_rendered).chars().collect();
        let next: Vec<char> = clean_value.chars().collect();
        let active = &sections[selection.start_index];

        let (start_of_diff, end_of_diff) = diff_bounds(&prev, &next);
        let prev_len = prev.len() as i64;
        let outside = start_of_diff < active.start as i64
            || prev_len - end_of_diff - 1 > active.end as i64;
        if outside {
            log::debug!("change outside {} section ignored", active.section_type);
            return ChangeInterpretation::OutsideActive;
        }

        // The active section's text was replaced by what was typed
        let separator_len = char_len(&clean_string(&active.end_separator)) as i64;
        let end_in_new = next.len() as i64 - prev_len + active.end as i64 - separator_len;
        let end_in_new = end_in_new.max(active.start as i64) as usize;
        char_slice(&clean_value, active.start, end_in_new)
    };

    if key.is_empty() {
        ChangeInterpretation::Empty
    } else {
        ChangeInterpretation::Keystroke(key)
    }
}

/// First differing index from the left, and from the right, over the
/// previous string's length. `-1` when no difference is seen.
fn diff_bounds(prev: &[char], next: &[char]) -> (i64, i64) {
    let mut start = -1;
    let mut end = -1;
    for i in 0..prev.len() {
        if start == -1 && next.get(i) != Some(&prev[i]) {
            start = i as i64;
        }
        let from_end = next
            .len()
            .checked_sub(i + 1)
            .and_then(|j| next.get(j));
        if end == -1 && from_end != Some(&prev[prev.len() - i - 1]) {
            end = i as i64;
        }
    }
    (start, end)
}
