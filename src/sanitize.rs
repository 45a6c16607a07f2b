//! Text-to-number conversion rules shared by live typing and blur validation.

/// Replace every comma with a period, the only decimal separator understood downstream.
pub fn normalize_separator(text: &str) -> String {
    text.replace(',', ".")
}

/// Filter `text` down to something a float parser can read.
///
/// Single left-to-right pass over the separator-normalised text: digits are kept, the first `.`
/// and the first `-` are kept wherever they appear, everything else is dropped. The whole string
/// is filtered, so `"1a2.3b4.5c"` becomes `"12.345"`.
///
/// The result may still be unparseable (`""`, `"-"`, `"."`).
pub fn sanitize(text: &str) -> String {
    let mut has_period = false;
    let mut has_negative = false;
    let mut result = String::with_capacity(text.len());

    for ch in normalize_separator(text).chars() {
        match ch {
            '.' if !has_period => {
                has_period = true;
                result.push(ch);
            }
            '-' if !has_negative => {
                has_negative = true;
                result.push(ch);
            }
            '0'..='9' => result.push(ch),
            _ => {}
        }
    }
    result
}

/// Lenient leading-prefix float parse.
///
/// Reads the longest prefix of the form `[+-] digits [. digits] [(e|E) [+-] digits]` (at least
/// one mantissa digit) and ignores whatever follows, so `"12-3"` reads as `12` and `"5."` as `5`.
/// Returns `None` when no numeric prefix exists at all.
pub fn parse_leading(text: &str) -> Option<f64> {
    let bytes = text.trim_start().as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // exponent only counts when it carries digits
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    // the prefix is pure ASCII, so slicing at `end` is on a char boundary
    std::str::from_utf8(&bytes[..end]).ok()?.parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Sanitize then parse, keeping only finite results.
pub fn parse_sanitized(text: &str) -> Option<f64> {
    parse_leading(&sanitize(text)).filter(|v| v.is_finite())
}

/// Canonical display form of a committed value.
pub fn stringify(value: f64) -> String {
    if value == 0.0 {
        // also folds -0
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sanitize_replaces_comma() {
        assert_eq!(sanitize("12,3"), "12.3");
    }

    #[test]
    fn test_sanitize_strips_letters_anywhere() {
        assert_eq!(sanitize("123a"), "123");
        assert_eq!(sanitize("12a3"), "123");
        assert_eq!(sanitize("a123"), "123");
        assert_eq!(sanitize("1a2.3b4.5c"), "12.345");
    }

    #[test]
    fn test_sanitize_keeps_first_period_only() {
        assert_eq!(sanitize("12.4.5"), "12.45");
        assert_eq!(sanitize("1,2,3"), "1.23");
    }

    #[test]
    fn test_sanitize_keeps_sign_where_it_first_appears() {
        assert_eq!(sanitize("12-3-4"), "12-34");
        assert_eq!(sanitize("--5"), "-5");
    }

    #[test]
    fn test_sanitize_may_leave_unparseable_text() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("abc"), "");
        assert_eq!(sanitize("-x"), "-");
        assert_eq!(sanitize("..,"), ".");
    }

    #[test]
    fn test_parse_leading_reads_prefix() {
        assert_eq!(parse_leading("12.45"), Some(12.45));
        assert_eq!(parse_leading("12-34"), Some(12.0));
        assert_eq!(parse_leading("-.5"), Some(-0.5));
        assert_eq!(parse_leading("5."), Some(5.0));
        assert_eq!(parse_leading(".5"), Some(0.5));
        assert_eq!(parse_leading("1e3x"), Some(1000.0));
        assert_eq!(parse_leading("1e"), Some(1.0));
    }

    #[test]
    fn test_parse_leading_rejects_no_digits() {
        assert_eq!(parse_leading(""), None);
        assert_eq!(parse_leading("-"), None);
        assert_eq!(parse_leading("."), None);
        assert_eq!(parse_leading("-."), None);
        assert_eq!(parse_leading("abc"), None);
    }

    #[test]
    fn test_parse_sanitized_drops_infinite() {
        let huge = "9".repeat(400);
        assert_eq!(parse_leading(&huge), Some(f64::INFINITY));
        assert_eq!(parse_sanitized(&huge), None);
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(1.0), "1");
        assert_eq!(stringify(12.3), "12.3");
        assert_eq!(stringify(-0.0), "0");
        assert_eq!(stringify(100.0), "100");
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(s in "\\PC{0,40}") {
            let once = sanitize(&s);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn sanitize_keeps_at_most_one_separator_and_sign(s in "[0-9a-z.,\\- ]{0,40}") {
            let out = sanitize(&s);
            prop_assert!(out.matches('.').count() <= 1);
            prop_assert!(out.matches('-').count() <= 1);
            prop_assert!(out.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-'));
        }

        #[test]
        fn sanitize_keeps_sign_after_same_kept_prefix(s in "[0-9a.,\\-]{0,40}") {
            let out = sanitize(&s);
            if let Some(idx) = s.find('-') {
                // the kept sign sits right after whatever the prefix before it sanitizes to
                let prefix = sanitize(&s[..idx]);
                prop_assert_eq!(out.find('-'), Some(prefix.len()));
            } else {
                prop_assert!(!out.contains('-'));
            }
        }
    }
}
