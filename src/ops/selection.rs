use std::ops::Range;

use crate::model::section::{
    Section, SectionNeighbors, SectionOrdering, SelectedSectionIndexes, SelectedSections,
};
use crate::util::unicode::char_len;

/// Resolve a selection descriptor against the current sections.
///
/// `None` means nothing is selected. A type lookup for a type the field
/// does not contain also resolves to `None`.
pub fn resolve_selected_sections(
    selected: Option<&SelectedSections>,
    sections: &[Section],
) -> Option<SelectedSectionIndexes> {
    let last = sections.len().checked_sub(1)?;
    match selected? {
        SelectedSections::All => Some(SelectedSectionIndexes {
            start_index: 0,
            end_index: last,
            should_select_boundary_selectors: true,
        }),
        SelectedSections::Index(index) => {
            (*index <= last).then(|| SelectedSectionIndexes::single(*index))
        }
        SelectedSections::Type(section_type) => {
            let found = sections
                .iter()
                .position(|s| s.section_type == *section_type);
            if found.is_none() {
                log::warn!("no {} section to select", section_type);
            }
            found.map(SelectedSectionIndexes::single)
        }
        SelectedSections::Range {
            start_index,
            end_index,
        } => (*start_index <= *end_index && *end_index <= last).then_some(SelectedSectionIndexes {
            start_index: *start_index,
            end_index: *end_index,
            should_select_boundary_selectors: false,
        }),
    }
}

/// Left/right neighbors of every section, in display order.
pub fn section_order(sections: &[Section]) -> SectionOrdering {
    let last = sections.len().saturating_sub(1);
    let neighbors = (0..sections.len())
        .map(|index| SectionNeighbors {
            left_index: index.checked_sub(1),
            right_index: (index < last).then_some(index + 1),
        })
        .collect();
    SectionOrdering {
        neighbors,
        start_index: 0,
        end_index: last,
    }
}

/// Section to select for a caret reported by the input (raw char offset).
///
/// A caret before the first value or after the last one selects the first
/// section.
pub fn section_index_at_caret(sections: &[Section], caret: usize) -> usize {
    let (Some(first), Some(last)) = (sections.first(), sections.last()) else {
        return 0;
    };
    if caret <= first.start_in_input || caret >= last.end_in_input {
        return 0;
    }
    match sections.iter().position(|s| s.start_in_input > caret) {
        Some(next) => next - 1,
        None => sections.len() - 1,
    }
}

/// Raw char range the input should highlight for a selection.
pub fn selection_range_in_input(
    sections: &[Section],
    selection: &SelectedSectionIndexes,
) -> Range<usize> {
    let first = &sections[selection.start_index];
    let last = &sections[selection.end_index];
    let mut start = first.start_in_input;
    let mut end = last.end_in_input;

    if selection.should_select_boundary_selectors {
        // Take the isolation marks and trailing separator too
        if first.bidi_isolated {
            start = start.saturating_sub(1);
            end += 1;
        }
        end += char_len(&last.end_separator);
    }
    start..end
}
