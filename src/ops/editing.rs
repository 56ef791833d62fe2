use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::model::section::{Section, SectionType};
use crate::ops::boundaries::{clean_digit_section_value, section_boundaries};
use crate::util::unicode::is_ascii_digits;

/// Idle time after which a pending query is dropped
pub const QUERY_LIFE_DURATION: Duration = Duration::from_millis(5_000);

/// Characters typed so far toward the active section's new value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterQuery {
    pub section_index: usize,
    pub value: String,
    pub section_type: SectionType,
}

/// New value for the active section, and whether focus moves on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    pub section_value: String,
    pub should_go_to_next_section: bool,
}

/// What a query value means for the active section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResponse {
    /// Resolved to a section value; the query is kept
    Value(EditResult),
    /// Not a value yet (`0` on a month), keep the query for the next key
    Save,
    /// Cannot lead to a value
    Reject,
}

/// Inputs the editor reads but does not own
#[derive(Debug, Clone, Copy)]
pub struct EditContext<'a> {
    pub sections: &'a [Section],
    /// Complete date currently in the field, bounds the day
    pub current_date: Option<NaiveDate>,
    /// Localized month names, January first
    pub month_names: &'a [String],
}

/// Interprets keystrokes against one section at a time.
///
/// Owns the pending query and its expiry deadline. The deadline is armed on
/// every query write and cleared on reset, so at most one is live.
#[derive(Debug, Clone)]
pub struct CharacterEditor {
    query: Option<CharacterQuery>,
    deadline: Option<Instant>,
    life: Duration,
}

impl Default for CharacterEditor {
    fn default() -> Self {
        CharacterEditor::new(QUERY_LIFE_DURATION)
    }
}

impl CharacterEditor {
    pub fn new(life: Duration) -> Self {
        CharacterEditor {
            query: None,
            deadline: None,
            life,
        }
    }

    pub fn query(&self) -> Option<&CharacterQuery> {
        self.query.as_ref()
    }

    /// When the pending query expires, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn reset(&mut self) {
        self.query = None;
        self.deadline = None;
    }

    /// Drop the query if its deadline has passed. Returns true if it fired.
    pub fn expire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                log::debug!("character query expired: {:?}", self.query);
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Drop the query if the section at its index changed type.
    pub fn invalidate_if_stale(&mut self, sections: &[Section]) {
        if let Some(query) = &self.query {
            let same_type = sections
                .get(query.section_index)
                .is_some_and(|s| s.section_type == query.section_type);
            if !same_type {
                log::debug!("character query no longer matches its section, dropping");
                self.reset();
            }
        }
    }

    fn store(&mut self, section_index: usize, value: String, section_type: SectionType, now: Instant) {
        self.query = Some(CharacterQuery {
            section_index,
            value,
            section_type,
        });
        self.deadline = Some(now + self.life);
    }

    /// Apply one keystroke to the section at `section_index`.
    ///
    /// Returns `None` when the section must not change and focus must not
    /// move; otherwise the new value and whether to advance.
    pub fn apply(
        &mut self,
        key: &str,
        section_index: usize,
        ctx: EditContext<'_>,
        now: Instant,
    ) -> Option<EditResult> {
        self.expire_if_due(now);
        self.invalidate_if_stale(ctx.sections);

        let active = &ctx.sections[section_index];
        let key = key.to_lowercase();
        let numeric = is_ascii_digits(&key);
        let respond = |value: &str| {
            if numeric {
                numeric_query(value, active, ctx.current_date)
            } else {
                letter_query(value, active, ctx.month_names)
            }
        };

        // Extend the pending query when it targets this section
        if let Some(query) = &self.query
            && query.section_index == section_index
            && is_ascii_digits(&query.value) == numeric
        {
            let concatenated = format!("{}{}", query.value, key);
            if let QueryResponse::Value(result) = respond(&concatenated) {
                log::debug!("query {:?} -> {:?}", concatenated, result);
                self.store(section_index, concatenated, active.section_type, now);
                return Some(result);
            }
        }

        match respond(&key) {
            QueryResponse::Reject => {
                log::debug!("rejected key {:?} for {} section", key, active.section_type);
                self.reset();
                None
            }
            QueryResponse::Save => {
                self.store(section_index, key, active.section_type, now);
                None
            }
            QueryResponse::Value(result) => {
                log::debug!("query {:?} -> {:?}", key, result);
                self.store(section_index, key, active.section_type, now);
                Some(result)
            }
        }
    }
}

/// Digit query against the section's numeric bounds.
pub fn numeric_query(value: &str, section: &Section, current_date: Option<NaiveDate>) -> QueryResponse {
    let Ok(number) = value.parse::<i64>() else {
        return QueryResponse::Reject;
    };
    let bounds = section_boundaries(section.section_type, current_date);

    if number > bounds.maximum {
        return QueryResponse::Reject;
    }
    // `0` on a month is below the minimum but `01` is reachable
    if number < bounds.minimum {
        return QueryResponse::Save;
    }

    let should_go_to_next_section = number.saturating_mul(10) > bounds.maximum
        || value.len() == bounds.maximum.to_string().len();

    QueryResponse::Value(EditResult {
        section_value: clean_digit_section_value(number, section.max_length),
        should_go_to_next_section,
    })
}

/// Letter query: month sections match month-name prefixes.
pub fn letter_query(value: &str, section: &Section, month_names: &[String]) -> QueryResponse {
    if section.section_type != SectionType::Month {
        return QueryResponse::Reject;
    }
    let matching: Vec<usize> = month_names
        .iter()
        .enumerate()
        .filter(|(_, name)| name.to_lowercase().starts_with(value))
        .map(|(i, _)| i)
        .collect();

    match matching.first() {
        None => QueryResponse::Reject,
        Some(&first) => QueryResponse::Value(EditResult {
            section_value: clean_digit_section_value(first as i64 + 1, section.max_length),
            should_go_to_next_section: matching.len() == 1,
        }),
    }
}
