use serde::Serialize;

use crate::field::{ChangeOutcome, DateChange, DateField, KeyOutcome, PasteOutcome};
use crate::model::locale::LocaleInfo;
use crate::model::section::{Section, SectionType};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SectionJson {
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub value: String,
    pub placeholder: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Serialize)]
pub struct SectionsJson {
    pub locale: LocaleInfo,
    pub rendered: String,
    pub sections: Vec<SectionJson>,
}

#[derive(Serialize)]
pub struct FieldStateJson {
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<SectionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub iso_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid: Option<String>,
}

#[derive(Serialize)]
pub struct StepJson {
    pub key: String,
    pub outcome: String,
    #[serde(flatten)]
    pub state: FieldStateJson,
}

#[derive(Serialize)]
pub struct RunJson {
    pub steps: Vec<StepJson>,
    pub changes: Vec<DateChange>,
}

#[derive(Serialize)]
pub struct CheckJson {
    pub iso: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn section_to_json(section: &Section) -> SectionJson {
    SectionJson {
        section_type: section.section_type,
        value: section.value.clone(),
        placeholder: section.placeholder.clone(),
        start: section.start,
        end: section.end,
    }
}

pub fn field_state(field: &DateField) -> FieldStateJson {
    FieldStateJson {
        display: field.display_value(),
        selected: selected_type(field),
        query: field.pending_query().map(|q| q.value.clone()),
        iso_date: field.iso_date(),
        invalid: field.validation_error().map(|e| e.to_string()),
    }
}

fn selected_type(field: &DateField) -> Option<SectionType> {
    let indexes = field.selected_indexes()?;
    if !indexes.is_single() {
        return None;
    }
    field
        .sections()
        .get(indexes.start_index)
        .map(|s| s.section_type)
}

pub fn change_outcome_label(outcome: &ChangeOutcome) -> String {
    match outcome {
        ChangeOutcome::Ignored => "ignored".into(),
        ChangeOutcome::Cleared => "cleared".into(),
        ChangeOutcome::Reparsed => "reparsed".into(),
        ChangeOutcome::Rejected(e) => format!("rejected: {}", e),
        ChangeOutcome::Edited {
            moved_to_next: true,
            ..
        } => "edited, next".into(),
        ChangeOutcome::Edited { .. } => "edited".into(),
        ChangeOutcome::KeyRejected => "key rejected".into(),
        ChangeOutcome::SectionCleared => "section cleared".into(),
        ChangeOutcome::Composing => "composing".into(),
        ChangeOutcome::OutsideActive => "outside active section".into(),
    }
}

pub fn key_outcome_label(outcome: KeyOutcome) -> String {
    match outcome {
        KeyOutcome::Consumed => "handled".into(),
        KeyOutcome::PassThrough => "passed through".into(),
    }
}

pub fn paste_outcome_label(outcome: &PasteOutcome) -> String {
    match outcome {
        PasteOutcome::PassThrough => "passed to input".into(),
        PasteOutcome::Ignored => "ignored".into(),
        PasteOutcome::Applied => "applied".into(),
        PasteOutcome::Rejected(e) => format!("rejected: {}", e),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `02/DD/YYYY  [day]  iso -`
pub fn format_state_line(state: &FieldStateJson) -> String {
    let selected = state
        .selected
        .map(|t| format!("[{}]", t))
        .unwrap_or_else(|| "[-]".to_string());
    let mut line = format!(
        "{:<12} {:<8} iso {}",
        state.display,
        selected,
        state.iso_date.as_deref().unwrap_or("-")
    );
    if let Some(query) = &state.query {
        line.push_str(&format!("  query {:?}", query));
    }
    if let Some(invalid) = &state.invalid {
        line.push_str(&format!("  ({})", invalid));
    }
    line
}

pub fn format_step_line(step: &StepJson) -> String {
    format!(
        "{:<12} {:<24} {}",
        step.key,
        step.outcome,
        format_state_line(&step.state)
    )
}

pub fn format_section_line(section: &SectionJson) -> String {
    format!(
        "{:<6} {:<5} {:>2}..{:<2} {}",
        section.section_type.name(),
        section.placeholder,
        section.start,
        section.end,
        if section.value.is_empty() {
            "-"
        } else {
            &section.value
        }
    )
}

pub fn format_change_line(change: &DateChange) -> String {
    format!(
        "change {} -> {}",
        change.previous.as_deref().unwrap_or("-"),
        change.iso_date.as_deref().unwrap_or("-")
    )
}
