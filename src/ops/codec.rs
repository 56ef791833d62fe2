use chrono::{Datelike, NaiveDate};

use crate::model::config::ValidationRules;
use crate::model::section::{Section, SectionType};
use crate::ops::boundaries::{clean_leading_zeros, section_boundaries};
use crate::ops::sections::{SEPARATOR, add_position_properties};
use crate::util::unicode::{self, is_ascii_digits};

pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Error type for pasted or filled date text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no date text to parse")]
    Empty,
    #[error("expected {expected} date parts, found {found}")]
    WrongPartCount { expected: usize, found: usize },
    #[error("{section} part {part:?} is not a number")]
    NotDigits { section: SectionType, part: String },
    #[error("{section} part {part:?} is longer than {max} digits")]
    TooLong {
        section: SectionType,
        part: String,
        max: usize,
    },
    #[error("{section} value {value} is out of range")]
    OutOfRange { section: SectionType, value: i64 },
}

/// Why a complete date is not acceptable
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DateValidationError {
    #[error("date is in the future")]
    DisableFuture,
    #[error("date is in the past")]
    DisablePast,
    #[error("date is before {0}")]
    MinDate(NaiveDate),
    #[error("date is after {0}")]
    MaxDate(NaiveDate),
}

/// True when `s` parses as a calendar date and formats back to itself.
pub fn is_valid_iso_date(s: &str) -> bool {
    parse_iso_date(s).is_some()
}

/// Parse a strict `YYYY-MM-DD` string.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(s, ISO_FORMAT).ok()?;
    (format_iso_date(date) == s).then_some(date)
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

fn value_of(sections: &[Section], section_type: SectionType) -> &str {
    sections
        .iter()
        .find(|s| s.section_type == section_type)
        .map(|s| s.value.as_str())
        .unwrap_or("")
}

/// ISO date built from the section values, `None` unless it is a real date.
pub fn sections_to_iso(sections: &[Section]) -> Option<String> {
    let draft = format!(
        "{}-{}-{}",
        value_of(sections, SectionType::Year),
        value_of(sections, SectionType::Month),
        value_of(sections, SectionType::Day)
    );
    is_valid_iso_date(&draft).then_some(draft)
}

/// Same as [`sections_to_iso`], as a date
pub fn sections_to_date(sections: &[Section]) -> Option<NaiveDate> {
    sections_to_iso(sections).and_then(|iso| parse_iso_date(&iso))
}

/// Hydrate section values from an ISO date, or clear them all when the
/// date is missing or invalid. Every other field is preserved.
pub fn map_iso_to_sections(iso_date: Option<&str>, sections: &[Section]) -> Vec<Section> {
    let date = iso_date.and_then(parse_iso_date);
    let mut next: Vec<Section> = sections
        .iter()
        .map(|section| {
            let value = match date {
                Some(date) => date_component(date, section.section_type, section.max_length),
                None => String::new(),
            };
            Section {
                value,
                modified: false,
                ..section.clone()
            }
        })
        .collect();
    add_position_properties(&mut next);
    next
}

fn date_component(date: NaiveDate, section_type: SectionType, width: usize) -> String {
    let n = match section_type {
        SectionType::Year => i64::from(date.year()),
        SectionType::Month => i64::from(date.month()),
        SectionType::Day => i64::from(date.day()),
    };
    format!("{:0>width$}", n, width = width)
}

/// Parse a complete date typed, pasted, or filled into the field.
///
/// Accepts a valid ISO date, or the rendered layout (`02/29/1988` for a
/// month/day/year field). Parts must be digits within the section bounds;
/// the combination does not need to be a real date.
pub fn parse_value_str(text: &str, sections: &[Section]) -> Result<Vec<Section>, ParseError> {
    let clean = unicode::clean_string(text);
    let clean = clean.trim();
    if clean.is_empty() {
        return Err(ParseError::Empty);
    }
    if is_valid_iso_date(clean) {
        let mut next = map_iso_to_sections(Some(clean), sections);
        for section in next.iter_mut() {
            section.modified = true;
        }
        return Ok(next);
    }

    let parts: Vec<&str> = clean.split(SEPARATOR).map(str::trim).collect();
    if parts.len() != sections.len() {
        return Err(ParseError::WrongPartCount {
            expected: sections.len(),
            found: parts.len(),
        });
    }

    let mut next = sections.to_vec();
    for (section, part) in next.iter_mut().zip(parts) {
        let section_type = section.section_type;
        if !is_ascii_digits(part) {
            return Err(ParseError::NotDigits {
                section: section_type,
                part: part.to_string(),
            });
        }
        if part.len() > section.max_length {
            return Err(ParseError::TooLong {
                section: section_type,
                part: part.to_string(),
                max: section.max_length,
            });
        }
        let value: i64 = part.parse().map_err(|_| ParseError::NotDigits {
            section: section_type,
            part: part.to_string(),
        })?;
        let bounds = section_boundaries(section_type, None);
        if value < bounds.minimum || value > bounds.maximum {
            return Err(ParseError::OutOfRange {
                section: section_type,
                value,
            });
        }
        section.value = clean_leading_zeros(part, section.max_length);
        section.modified = true;
    }
    add_position_properties(&mut next);
    Ok(next)
}

/// Coarsest-to-finest rank of the finest section present
pub fn granularity(sections: &[Section]) -> u8 {
    sections
        .iter()
        .map(|s| s.section_type.granularity())
        .max()
        .unwrap_or(1)
}

/// Start of the year, month, or day containing `date`
pub fn round_to_granularity(date: NaiveDate, granularity: u8) -> NaiveDate {
    let rounded = match granularity {
        1 => date.with_month(1).and_then(|d| d.with_day(1)),
        2 => date.with_day(1),
        _ => Some(date),
    };
    rounded.unwrap_or(date)
}

/// Reference date used to fill components absent from the field: today,
/// rounded to the field's granularity, then clamped into `[min, max]`.
pub fn default_reference_date(
    today: NaiveDate,
    granularity: u8,
    rules: &ValidationRules,
) -> NaiveDate {
    let mut reference = round_to_granularity(today, granularity);
    if let Some(min) = rules.min_date
        && min > reference
    {
        reference = round_to_granularity(min, granularity);
    }
    if let Some(max) = rules.max_date
        && max < reference
    {
        reference = round_to_granularity(max, granularity);
    }
    reference
}

/// Transfer components of `from` into `reference`, year first.
///
/// With `limit_to_modified`, only sections the user changed are transferred.
/// A transfer that would produce an invalid date leaves the component as is.
pub fn merge_into_reference(
    from: NaiveDate,
    sections: &[Section],
    reference: NaiveDate,
    limit_to_modified: bool,
) -> NaiveDate {
    let mut ordered: Vec<&Section> = sections.iter().collect();
    ordered.sort_by_key(|s| s.section_type.modification_order());

    ordered
        .into_iter()
        .filter(|s| !limit_to_modified || s.modified)
        .fold(reference, |merged, section| {
            let transferred = match section.section_type {
                SectionType::Year => merged.with_year(from.year()),
                SectionType::Month => merged.with_month(from.month()),
                SectionType::Day => merged.with_day(from.day()),
            };
            transferred.unwrap_or(merged)
        })
}

/// Check a complete date against the configured rules.
pub fn validate_date(
    date: NaiveDate,
    rules: &ValidationRules,
    today: NaiveDate,
) -> Option<DateValidationError> {
    if rules.disable_future && date > today {
        return Some(DateValidationError::DisableFuture);
    }
    if rules.disable_past && date < today {
        return Some(DateValidationError::DisablePast);
    }
    if let Some(min) = rules.min_date
        && date < min
    {
        return Some(DateValidationError::MinDate(min));
    }
    if let Some(max) = rules.max_date
        && date > max
    {
        return Some(DateValidationError::MaxDate(max));
    }
    None
}
