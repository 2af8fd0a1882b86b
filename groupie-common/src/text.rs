//! Text cleanup for catalog strings
//!
//! The remote catalog marks some dates with `*` and spells locations with
//! `_` in place of spaces (`"*23-08-2019"`, `"los_angeles-usa"`). Everything
//! shown on a page goes through [`clean`] first.

/// Strip `*` markers and turn `_` into a single space.
///
/// Case and surrounding whitespace are left alone; callers trim first where
/// they need it.
///
/// # Examples
/// ```
/// use groupie_common::text::clean;
///
/// assert_eq!(clean("*Los_Angeles*"), "Los Angeles");
/// assert_eq!(clean("none"), "none");
/// ```
pub fn clean(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' => {}
            '_' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_literal_cases() {
        assert_eq!(clean("*Los_Angeles*"), "Los Angeles");
        assert_eq!(clean("no_special_chars"), "no special chars");
        assert_eq!(clean("none"), "none");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let samples = [
            "",
            "*",
            "__",
            "*12-01-2019",
            "north_carolina-usa",
            "  padded_*value  ",
            "Mötley_Crüe*",
        ];
        for s in samples {
            let once = clean(s);
            assert_eq!(clean(&once), once, "second pass changed {:?}", s);
            assert!(!once.contains('*'));
            assert!(!once.contains('_'));
        }
    }

    #[test]
    fn test_clean_preserves_case_and_whitespace() {
        assert_eq!(clean("  New_YORK "), "  New YORK ");
        assert_eq!(clean("a__b"), "a  b");
    }
}
