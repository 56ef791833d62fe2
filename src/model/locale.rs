use chrono::Locale;
use serde::{Deserialize, Serialize};

use super::section::SectionType;

/// Languages with a known placeholder glyph table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextLocale {
    #[default]
    En,
    Es,
    De,
    Fi,
    Fr,
    Hu,
    Is,
    It,
    Kk,
    Nb,
    Ro,
    Ru,
    Tr,
}

/// Single-character glyphs shown in place of empty sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderLetters {
    pub year: char,
    pub month: char,
    pub day: char,
}

impl PlaceholderLetters {
    pub fn for_type(&self, section_type: SectionType) -> char {
        match section_type {
            SectionType::Year => self.year,
            SectionType::Month => self.month,
            SectionType::Day => self.day,
        }
    }
}

impl TextLocale {
    pub const ALL: [TextLocale; 13] = [
        TextLocale::En,
        TextLocale::Es,
        TextLocale::De,
        TextLocale::Fi,
        TextLocale::Fr,
        TextLocale::Hu,
        TextLocale::Is,
        TextLocale::It,
        TextLocale::Kk,
        TextLocale::Nb,
        TextLocale::Ro,
        TextLocale::Ru,
        TextLocale::Tr,
    ];

    pub fn code(self) -> &'static str {
        match self {
            TextLocale::En => "en",
            TextLocale::Es => "es",
            TextLocale::De => "de",
            TextLocale::Fi => "fi",
            TextLocale::Fr => "fr",
            TextLocale::Hu => "hu",
            TextLocale::Is => "is",
            TextLocale::It => "it",
            TextLocale::Kk => "kk",
            TextLocale::Nb => "nb",
            TextLocale::Ro => "ro",
            TextLocale::Ru => "ru",
            TextLocale::Tr => "tr",
        }
    }

    /// Look up by language subtag (case-insensitive)
    pub fn from_code(code: &str) -> Option<TextLocale> {
        let code = code.to_ascii_lowercase();
        TextLocale::ALL.into_iter().find(|l| l.code() == code)
    }

    pub fn placeholder_letters(self) -> PlaceholderLetters {
        let (year, month, day) = match self {
            TextLocale::En => ('Y', 'M', 'D'),
            TextLocale::Es => ('A', 'M', 'D'),
            TextLocale::De => ('J', 'M', 'T'),
            TextLocale::Fi => ('V', 'K', 'P'),
            TextLocale::Fr => ('A', 'M', 'J'),
            TextLocale::Hu => ('É', 'H', 'N'),
            TextLocale::Is => ('Á', 'M', 'D'),
            TextLocale::It => ('A', 'M', 'G'),
            TextLocale::Kk => ('Ж', 'A', 'K'),
            TextLocale::Nb => ('Å', 'M', 'D'),
            TextLocale::Ro => ('A', 'L', 'Z'),
            TextLocale::Ru => ('Г', 'M', 'Д'),
            TextLocale::Tr => ('Y', 'A', 'G'),
        };
        PlaceholderLetters { year, month, day }
    }

    /// Locale database entry used for localized month names
    pub fn chrono_locale(self) -> Locale {
        match self {
            TextLocale::En => Locale::en_US,
            TextLocale::Es => Locale::es_ES,
            TextLocale::De => Locale::de_DE,
            TextLocale::Fi => Locale::fi_FI,
            TextLocale::Fr => Locale::fr_FR,
            TextLocale::Hu => Locale::hu_HU,
            TextLocale::Is => Locale::is_IS,
            TextLocale::It => Locale::it_IT,
            TextLocale::Kk => Locale::kk_KZ,
            TextLocale::Nb => Locale::nb_NO,
            TextLocale::Ro => Locale::ro_RO,
            TextLocale::Ru => Locale::ru_RU,
            TextLocale::Tr => Locale::tr_TR,
        }
    }
}

/// Result of locale resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleInfo {
    /// Tag used to derive the year/month/day order
    pub format_locale: String,
    /// Glyph table and month-name language
    pub text_locale: TextLocale,
}

pub const DEFAULT_LOCALE: &str = "en";

impl Default for LocaleInfo {
    fn default() -> Self {
        LocaleInfo {
            format_locale: DEFAULT_LOCALE.to_string(),
            text_locale: TextLocale::En,
        }
    }
}
