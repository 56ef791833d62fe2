use std::sync::LazyLock;

use chrono::{Locale, NaiveDate};
use regex::Regex;

use crate::model::locale::{LocaleInfo, TextLocale};
use crate::model::section::SectionType;

/// `ll`, `lll`, `ll-RR`, `ll_RR`, with optional extra subtags
static LOCALE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,3}(?:[-_][A-Za-z0-9]{2,8})*$").unwrap());

/// Order used when a locale has no usable date representation
pub const FALLBACK_ORDER: [SectionType; 3] = [SectionType::Month, SectionType::Day, SectionType::Year];

const REF_YEAR: i32 = 3333;
const REF_MONTH: u32 = 11;
const REF_DAY: u32 = 22;

/// Languages whose database entry is not `ll_LL`
const DEFAULT_REGIONS: &[(&str, &str)] = &[
    ("en", "en_US"),
    ("nb", "nb_NO"),
    ("kk", "kk_KZ"),
    ("ja", "ja_JP"),
    ("zh", "zh_CN"),
    ("ko", "ko_KR"),
    ("sv", "sv_SE"),
    ("da", "da_DK"),
    ("cs", "cs_CZ"),
    ("el", "el_GR"),
    ("uk", "uk_UA"),
    ("he", "he_IL"),
    ("ar", "ar_SA"),
    ("hi", "hi_IN"),
    ("vi", "vi_VN"),
    ("fa", "fa_IR"),
    ("et", "et_EE"),
    ("sl", "sl_SI"),
    ("ca", "ca_ES"),
];

/// Resolve a locale tag, falling back to the ambient locale and then `en`.
pub fn resolve_locale(locale: Option<&str>) -> LocaleInfo {
    resolve_locale_with(locale, ambient_locale().as_deref())
}

/// Same as [`resolve_locale`] with an explicit ambient locale.
pub fn resolve_locale_with(locale: Option<&str>, ambient: Option<&str>) -> LocaleInfo {
    let valid = locale
        .filter(|l| is_valid_locale_tag(l))
        .or_else(|| {
            if let Some(l) = locale {
                log::warn!("ignoring invalid locale tag {:?}", l);
            }
            ambient.filter(|l| is_valid_locale_tag(l))
        })
        .map(|l| l.replace('_', "-"));

    match valid {
        Some(tag) => {
            let text_locale = language_subtag(&tag)
                .and_then(TextLocale::from_code)
                .unwrap_or_default();
            LocaleInfo {
                format_locale: tag,
                text_locale,
            }
        }
        None => LocaleInfo::default(),
    }
}

pub fn is_valid_locale_tag(tag: &str) -> bool {
    LOCALE_TAG_RE.is_match(tag)
}

/// Ambient locale from `LC_ALL`, `LC_TIME` or `LANG`.
/// `de_DE.UTF-8@euro` becomes `de_DE`; `C` and `POSIX` count as unset.
pub fn ambient_locale() -> Option<String> {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|raw| normalize_posix_locale(&raw))
}

fn normalize_posix_locale(raw: &str) -> Option<String> {
    let base = raw.split(['.', '@']).next().unwrap_or("").trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.to_string())
}

fn language_subtag(tag: &str) -> Option<&str> {
    tag.split(['-', '_']).next().filter(|s| !s.is_empty())
}

/// Map a tag onto the locale database: `ll_RR`, then `ll_LL`, then the
/// default-region table.
pub fn database_locale(tag: &str) -> Option<Locale> {
    let mut parts = tag.split(['-', '_']);
    let lang = parts.next()?.to_ascii_lowercase();
    let region = parts
        .find(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()))
        .map(|r| r.to_ascii_uppercase());

    let mut candidates = Vec::new();
    if let Some(region) = region {
        candidates.push(format!("{}_{}", lang, region));
    }
    candidates.push(format!("{}_{}", lang, lang.to_ascii_uppercase()));
    if let Some((_, name)) = DEFAULT_REGIONS.iter().find(|(l, _)| *l == lang) {
        candidates.push(name.to_string());
    }

    candidates
        .iter()
        .find_map(|name| Locale::try_from(name.as_str()).ok())
}

/// Year/month/day display order for a format locale.
///
/// Formats 3333-11-22 with the locale's date representation and sorts the
/// three components by where their sentinels appear.
pub fn section_order(format_locale: &str) -> [SectionType; 3] {
    let Some(locale) = database_locale(format_locale) else {
        log::warn!("no date format for locale {:?}, using default order", format_locale);
        return FALLBACK_ORDER;
    };
    let Some(reference) = NaiveDate::from_ymd_opt(REF_YEAR, REF_MONTH, REF_DAY) else {
        return FALLBACK_ORDER;
    };
    let formatted = reference
        .and_time(chrono::NaiveTime::MIN)
        .and_utc()
        .format_localized("%x", locale)
        .to_string();

    match order_from_formatted(&formatted) {
        Some(order) => order,
        None => {
            log::warn!(
                "could not locate date parts in {:?} for {:?}, using default order",
                formatted,
                format_locale
            );
            FALLBACK_ORDER
        }
    }
}

/// Order the components by sentinel position inside a formatted reference date.
pub fn order_from_formatted(formatted: &str) -> Option<[SectionType; 3]> {
    let full_year = REF_YEAR.to_string();
    let short_year = &full_year[2..];
    let year_pos = formatted
        .find(&full_year)
        .or_else(|| formatted.find(short_year))?;
    let month_pos = formatted.find(&REF_MONTH.to_string())?;
    let day_pos = formatted.find(&REF_DAY.to_string())?;

    let mut positions = [
        (year_pos, SectionType::Year),
        (month_pos, SectionType::Month),
        (day_pos, SectionType::Day),
    ];
    positions.sort_by_key(|(pos, _)| *pos);
    Some(positions.map(|(_, t)| t))
}

/// The twelve localized month names, January first
pub fn month_names(text_locale: TextLocale) -> Vec<String> {
    let locale = text_locale.chrono_locale();
    (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(2000, month, 1))
        .map(|date| {
            date.and_time(chrono::NaiveTime::MIN)
                .and_utc()
                .format_localized("%B", locale)
                .to_string()
        })
        .collect()
}
