/// First strong isolate, opens an isolated run
pub const FSI: char = '\u{2068}';
/// Pop directional isolate, closes an isolated run
pub const PDI: char = '\u{2069}';

/// True for the invisible isolation marks (U+2066..=U+2069)
pub fn is_bidi_mark(c: char) -> bool {
    matches!(c, '\u{2066}'..='\u{2069}')
}

/// Remove the invisible isolation marks
pub fn clean_string(s: &str) -> String {
    s.chars().filter(|c| !is_bidi_mark(*c)).collect()
}

/// Length in chars. All section offsets count chars, not bytes.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Substring by char range, clamped to the string
pub fn char_slice(s: &str, start: usize, end: usize) -> String {
    if end <= start {
        return String::new();
    }
    s.chars().skip(start).take(end - start).collect()
}

/// Wrap `s` in an isolated run
pub fn isolate(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 6);
    out.push(FSI);
    out.push_str(s);
    out.push(PDI);
    out
}

/// True if `s` is non-empty and made only of ASCII digits
pub fn is_ascii_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_removes_only_isolation_marks() {
        let s = "\u{2068}02\u{2069}/\u{2066}DD\u{2069}";
        assert_eq!(clean_string(s), "02/DD");
    }

    #[test]
    fn char_slice_counts_chars() {
        assert_eq!(char_slice("ÉÉÉÉ/HH", 2, 6), "ÉÉ/H");
        assert_eq!(char_slice("abc", 2, 10), "c");
        assert_eq!(char_slice("abc", 2, 1), "");
    }

    #[test]
    fn isolate_round_trips_through_clean() {
        assert_eq!(clean_string(&isolate("2024")), "2024");
        assert_eq!(char_len(&isolate("ЖЖ")), 4);
    }

    #[test]
    fn ascii_digits() {
        assert!(is_ascii_digits("0123"));
        assert!(!is_ascii_digits(""));
        assert!(!is_ascii_digits("12a"));
        assert!(!is_ascii_digits(" 1"));
    }
}
