use chrono::{Datelike, NaiveDate};
use crossterm::event::KeyCode;

use crate::model::section::{Section, SectionType};

/// Inclusive numeric range of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBoundaries {
    pub minimum: i64,
    pub maximum: i64,
}

/// Longest month of any year
pub const MAX_DAYS_IN_MONTH: i64 = 31;

/// Bounds for a section type. The day maximum follows the month of
/// `current_date` when one is known.
pub fn section_boundaries(section_type: SectionType, current_date: Option<NaiveDate>) -> SectionBoundaries {
    match section_type {
        SectionType::Year => SectionBoundaries {
            minimum: 0,
            maximum: 9999,
        },
        SectionType::Month => SectionBoundaries {
            minimum: 1,
            maximum: 12,
        },
        SectionType::Day => SectionBoundaries {
            minimum: 1,
            maximum: current_date
                .map(|d| i64::from(days_in_month(d.year(), d.month())))
                .unwrap_or(MAX_DAYS_IN_MONTH),
        },
    }
}

/// Days in a month, leap years included
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => MAX_DAYS_IN_MONTH as u32,
    }
}

/// Strip leading zeros then pad back to `size` digits (`7` → `07`).
pub fn clean_leading_zeros(value: &str, size: usize) -> String {
    let trimmed = value.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    format!("{:0>width$}", trimmed, width = size)
}

/// Render a number as a section value, zero-padded to `max_length`.
pub fn clean_digit_section_value(value: i64, max_length: usize) -> String {
    clean_leading_zeros(&value.to_string(), max_length)
}

/// Keys that change the numeric value of the active section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustKey {
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
}

impl AdjustKey {
    pub fn delta(self) -> i64 {
        match self {
            AdjustKey::ArrowUp => 1,
            AdjustKey::ArrowDown => -1,
            AdjustKey::PageUp => 5,
            AdjustKey::PageDown => -5,
            AdjustKey::Home | AdjustKey::End => 0,
        }
    }

    pub fn from_name(name: &str) -> Option<AdjustKey> {
        match name.to_ascii_lowercase().as_str() {
            "up" | "arrowup" => Some(AdjustKey::ArrowUp),
            "down" | "arrowdown" => Some(AdjustKey::ArrowDown),
            "pageup" => Some(AdjustKey::PageUp),
            "pagedown" => Some(AdjustKey::PageDown),
            "home" => Some(AdjustKey::Home),
            "end" => Some(AdjustKey::End),
            _ => None,
        }
    }

    pub fn key_code(self) -> KeyCode {
        match self {
            AdjustKey::ArrowUp => KeyCode::Up,
            AdjustKey::ArrowDown => KeyCode::Down,
            AdjustKey::PageUp => KeyCode::PageUp,
            AdjustKey::PageDown => KeyCode::PageDown,
            AdjustKey::Home => KeyCode::Home,
            AdjustKey::End => KeyCode::End,
        }
    }
}

impl TryFrom<KeyCode> for AdjustKey {
    type Error = KeyCode;

    fn try_from(code: KeyCode) -> Result<Self, Self::Error> {
        match code {
            KeyCode::Up => Ok(AdjustKey::ArrowUp),
            KeyCode::Down => Ok(AdjustKey::ArrowDown),
            KeyCode::PageUp => Ok(AdjustKey::PageUp),
            KeyCode::PageDown => Ok(AdjustKey::PageDown),
            KeyCode::Home => Ok(AdjustKey::Home),
            KeyCode::End => Ok(AdjustKey::End),
            other => Err(other),
        }
    }
}

/// New value of `section` after an arrow/page/home/end key.
///
/// Empty sections and Home/End snap to a bound; an empty year jumps to
/// `today`'s year instead. Stepping past a bound wraps around.
pub fn adjust_section_value(
    section: &Section,
    key: AdjustKey,
    context: Option<NaiveDate>,
    today: NaiveDate,
) -> String {
    let delta = key.delta();
    let is_start = key == AdjustKey::Home;
    let is_end = key == AdjustKey::End;
    let bounds = section_boundaries(section.section_type, context);
    let current = section.value.parse::<i64>().ok();

    let new_value = match current {
        Some(current) if !is_start && !is_end => current + delta,
        _ => {
            if section.section_type == SectionType::Year && !is_start && !is_end {
                return clean_digit_section_value(i64::from(today.year()), section.max_length);
            }
            if delta > 0 || is_start {
                bounds.minimum
            } else {
                bounds.maximum
            }
        }
    };

    let span = bounds.maximum - bounds.minimum + 1;
    let wrapped = if new_value > bounds.maximum {
        bounds.minimum + (new_value - bounds.maximum - 1) % span
    } else if new_value < bounds.minimum {
        bounds.maximum - (bounds.minimum - new_value - 1) % span
    } else {
        new_value
    };

    clean_digit_section_value(wrapped, section.max_length)
}
