//! Quality-value parsing per <https://tools.ietf.org/html/rfc7231#section-5.3.1>.
//!
//! The accepted shape is exactly `q=<weight>` where `<weight>` is `1` with up
//! to three fractional zeros, or `0` with up to three fractional digits. The
//! grammar check is the whole validation; the numeric parse afterwards cannot
//! fail on a string the grammar admitted.

/// Parses a `q=...` parameter field into its weight.
///
/// Returns `None` for any deviation from the grammar: missing `q=` prefix,
/// out-of-range value, too many fractional digits, non-numeric input.
pub fn parse_qvalue(field: &str) -> Option<f64> {
    let weight = field.trim().strip_prefix("q=")?;
    if !is_valid_weight(weight) {
        return None;
    }
    // the grammar guarantees this parses
    weight.parse().ok()
}

// qvalue = ( "0" [ "." 0*3DIGIT ] ) / ( "1" [ "." 0*3("0") ] )
fn is_valid_weight(weight: &str) -> bool {
    let Some(first) = weight.as_bytes().first() else {
        return false;
    };
    if *first != b'0' && *first != b'1' {
        return false;
    }
    let rest = &weight[1..];
    if rest.is_empty() {
        return true;
    }
    let Some(frac) = rest.strip_prefix('.') else {
        return false;
    };
    if frac.len() > 3 {
        return false;
    }
    if *first == b'1' {
        frac.bytes().all(|b| b == b'0')
    } else {
        frac.bytes().all(|b| b.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::parse_qvalue;

    #[test]
    fn full_weights() {
        assert_eq!(parse_qvalue("q=1"), Some(1.0));
        assert_eq!(parse_qvalue("q=1."), Some(1.0));
        assert_eq!(parse_qvalue("q=1.0"), Some(1.0));
        assert_eq!(parse_qvalue("q=1.00"), Some(1.0));
        assert_eq!(parse_qvalue("q=1.000"), Some(1.0));
    }

    #[test]
    fn zero_weights() {
        assert_eq!(parse_qvalue("q=0"), Some(0.0));
        assert_eq!(parse_qvalue("q=0."), Some(0.0));
        assert_eq!(parse_qvalue("q=0.0"), Some(0.0));
        assert_eq!(parse_qvalue("q=0.00"), Some(0.0));
        assert_eq!(parse_qvalue("q=0.000"), Some(0.0));
    }

    #[test]
    fn fractional_weights() {
        assert_eq!(parse_qvalue("q=0.5"), Some(0.5));
        assert_eq!(parse_qvalue("q=0.85"), Some(0.85));
        assert_eq!(parse_qvalue("q=0.333"), Some(0.333));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse_qvalue(" q=0.8 "), Some(0.8));
    }

    #[test]
    fn rejects_missing_prefix() {
        assert_eq!(parse_qvalue(""), None);
        assert_eq!(parse_qvalue("0.5"), None);
        assert_eq!(parse_qvalue("Q=0.5"), None);
        assert_eq!(parse_qvalue("a=1"), None);
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(parse_qvalue("q=1.1"), None);
        assert_eq!(parse_qvalue("q=1.001"), None);
        assert_eq!(parse_qvalue("q=2"), None);
        assert_eq!(parse_qvalue("q=1234"), None);
        assert_eq!(parse_qvalue("q=-0.5"), None);
    }

    #[test]
    fn rejects_malformed_fractions() {
        assert_eq!(parse_qvalue("q=0.1234"), None);
        assert_eq!(parse_qvalue("q=0.0000"), None);
        assert_eq!(parse_qvalue("q=0.a"), None);
        assert_eq!(parse_qvalue("q=0,5"), None);
        assert_eq!(parse_qvalue("q=.5"), None);
        assert_eq!(parse_qvalue("q=01"), None);
    }
}
