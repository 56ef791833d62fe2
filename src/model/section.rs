use serde::{Deserialize, Serialize};

/// Kind of date component a section edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Year,
    Month,
    Day,
}

impl SectionType {
    pub const ALL: [SectionType; 3] = [SectionType::Year, SectionType::Month, SectionType::Day];

    /// Format token used to render and parse this section
    pub fn format(self) -> &'static str {
        match self {
            SectionType::Year => "yyyy",
            SectionType::Month => "MM",
            SectionType::Day => "dd",
        }
    }

    /// Fixed digit width; also the zero-padding width
    pub fn max_length(self) -> usize {
        match self {
            SectionType::Year => 4,
            SectionType::Month => 2,
            SectionType::Day => 2,
        }
    }

    /// Coarsest (1) to finest (3)
    pub fn granularity(self) -> u8 {
        match self {
            SectionType::Year => 1,
            SectionType::Month => 2,
            SectionType::Day => 3,
        }
    }

    /// Order in which components are transferred into a reference date.
    /// Year goes first so that the day bound is known when the day lands.
    pub fn modification_order(self) -> u8 {
        match self {
            SectionType::Year => 1,
            SectionType::Month => 2,
            SectionType::Day => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SectionType::Year => "year",
            SectionType::Month => "month",
            SectionType::Day => "day",
        }
    }

    pub fn from_name(s: &str) -> Option<SectionType> {
        match s.to_ascii_lowercase().as_str() {
            "year" | "y" => Some(SectionType::Year),
            "month" | "m" => Some(SectionType::Month),
            "day" | "d" => Some(SectionType::Day),
            _ => None,
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One editable date component, with its position in the rendered string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "type")]
    pub section_type: SectionType,
    /// Current content, `""` when empty
    pub value: String,
    /// Format token (`yyyy`, `MM`, `dd`)
    pub format: String,
    pub max_length: usize,
    /// Locale glyph repeated to `max_length`, shown while `value` is empty
    pub placeholder: String,
    /// Changed by the user since the last hydration from a valid date
    pub modified: bool,
    /// Logical char offset of the section (isolation marks excluded)
    pub start: usize,
    /// Logical char offset after the section's end separator
    pub end: usize,
    /// Raw char offset of the visible value inside the rendered string
    pub start_in_input: usize,
    /// Raw char offset after the visible value (separator excluded)
    pub end_in_input: usize,
    /// Literal text rendered after the section, `""` for the last one
    pub end_separator: String,
    /// Wrap the visible value in bidi isolation marks when rendering
    #[serde(default)]
    pub bidi_isolated: bool,
}

impl Section {
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// External description of which sections are selected.
/// "Nothing selected" is expressed as `Option::None` by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectedSections {
    Index(usize),
    Type(SectionType),
    All,
    Range { start_index: usize, end_index: usize },
}

/// Selection resolved against a concrete section list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedSectionIndexes {
    pub start_index: usize,
    pub end_index: usize,
    /// Include the separators at the very beginning and end of the input
    #[serde(default)]
    pub should_select_boundary_selectors: bool,
}

impl SelectedSectionIndexes {
    pub fn single(index: usize) -> Self {
        SelectedSectionIndexes {
            start_index: index,
            end_index: index,
            should_select_boundary_selectors: false,
        }
    }

    pub fn is_single(&self) -> bool {
        self.start_index == self.end_index
    }

    /// True when the selection spans every section
    pub fn covers_all(&self, section_count: usize) -> bool {
        self.start_index == 0 && self.end_index + 1 == section_count
    }
}

/// Left/right neighbors of one section, `None` at the edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionNeighbors {
    pub left_index: Option<usize>,
    pub right_index: Option<usize>,
}

/// Neighbor table for arrow-key navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionOrdering {
    pub neighbors: Vec<SectionNeighbors>,
    /// Leftmost section
    pub start_index: usize,
    /// Rightmost section
    pub end_index: usize,
}
