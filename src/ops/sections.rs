use crate::model::locale::{LocaleInfo, TextLocale};
use crate::model::section::{Section, SectionType};
use crate::ops::locale::section_order;
use crate::util::unicode::{self, char_len};

/// Separator rendered after every section but the last
pub const SEPARATOR: &str = "/";

/// Blank sections for a locale, in its display order, with positions set.
pub fn create_sections(format_locale: &str, text_locale: TextLocale) -> Vec<Section> {
    build_sections(section_order(format_locale), text_locale, false)
}

/// Blank sections for a resolved locale
pub fn create_sections_for(info: &LocaleInfo, bidi_isolated: bool) -> Vec<Section> {
    build_sections(section_order(&info.format_locale), info.text_locale, bidi_isolated)
}

/// Blank sections in an explicit order
pub fn build_sections(
    order: [SectionType; 3],
    text_locale: TextLocale,
    bidi_isolated: bool,
) -> Vec<Section> {
    let letters = text_locale.placeholder_letters();
    let last = order.len() - 1;
    let mut sections: Vec<Section> = order
        .iter()
        .enumerate()
        .map(|(i, &section_type)| {
            let max_length = section_type.max_length();
            Section {
                section_type,
                value: String::new(),
                format: section_type.format().to_string(),
                max_length,
                placeholder: letters
                    .for_type(section_type)
                    .to_string()
                    .repeat(max_length),
                modified: false,
                start: 0,
                end: 0,
                start_in_input: 0,
                end_in_input: 0,
                end_separator: if i < last {
                    SEPARATOR.to_string()
                } else {
                    String::new()
                },
                bidi_isolated,
            }
        })
        .collect();
    add_position_properties(&mut sections);
    sections
}

/// Value if set, placeholder otherwise
pub fn visible_value(section: &Section) -> &str {
    if section.value.is_empty() {
        &section.placeholder
    } else {
        &section.value
    }
}

/// Visible value as it appears in the input, isolation marks included
pub fn input_value(section: &Section) -> String {
    let visible = visible_value(section);
    if section.bidi_isolated {
        unicode::isolate(visible)
    } else {
        visible.to_string()
    }
}

/// Text shown in the input: every section followed by its separator.
pub fn rendered_string(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|section| format!("{}{}", input_value(section), section.end_separator))
        .collect()
}

/// Recompute `start`, `end`, `start_in_input`, `end_in_input` from the
/// visible values, walking left to right.
pub fn add_position_properties(sections: &mut [Section]) {
    let mut position = 0;
    let mut position_in_input = 0;

    for section in sections.iter_mut() {
        let rendered = input_value(section);
        let section_str = format!("{}{}", rendered, section.end_separator);
        let section_length = char_len(&unicode::clean_string(&section_str));
        let section_length_in_input = char_len(&section_str);

        // Leading marks are skipped so the caret lands on the first visible char
        let leading_marks = rendered
            .chars()
            .take_while(|c| unicode::is_bidi_mark(*c))
            .count();
        let cleaned_len = char_len(&unicode::clean_string(&rendered));

        section.start = position;
        section.end = position + section_length;
        section.start_in_input = position_in_input + leading_marks;
        section.end_in_input = section.start_in_input + cleaned_len;

        position += section_length;
        position_in_input += section_length_in_input;
    }
}

/// Set one section's value, mark it modified, and refresh positions.
pub fn set_section_value(sections: &[Section], index: usize, value: &str) -> Vec<Section> {
    let mut next = sections.to_vec();
    next[index].value = value.to_string();
    next[index].modified = true;
    add_position_properties(&mut next);
    next
}

/// Index of the section of a given type
pub fn find_section(sections: &[Section], section_type: SectionType) -> Option<usize> {
    sections.iter().position(|s| s.section_type == section_type)
}

/// Rebuild for a new locale, carrying values over by type.
pub fn rebuild_keeping_values(previous: &[Section], fresh: Vec<Section>) -> Vec<Section> {
    let mut next = fresh;
    for section in next.iter_mut() {
        if let Some(old) = previous
            .iter()
            .find(|s| s.section_type == section.section_type)
        {
            section.value = old.value.clone();
            section.modified = old.modified;
        }
    }
    add_position_properties(&mut next);
    next
}
