use super::error::{PredictError, PredictResult};
use super::parser::extract_codes;

/// Feed rate written on `line`. When several F codes are present the last
/// one wins.
pub fn resolve(line_number: usize, line: &str, code: &str) -> PredictResult<f64> {
    let feed = extract_codes(line)
        .filter(|c| c.letter == 'F')
        .last()
        .map(|c| c.value);

    match feed {
        Some(f) if f > 0.0 => Ok(f),
        _ => Err(PredictError::UnresolvedFeed {
            line: line_number,
            code: code.to_string(),
        }),
    }
}

/// Sticky feed if one is set, otherwise look ahead on the current line.
/// A sticky feed that is not positive counts as unset.
/// `code` is the op-code completing the move, used in the error.
pub fn effective_feed(current: f64, line_number: usize, line: &str, code: &str) -> PredictResult<f64> {
    if current > 0.0 {
        return Ok(current);
    }
    resolve(line_number, line, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_feed_on_line_wins() {
        assert_eq!(resolve(1, "G1 F300 X10 F1200 Y10", "Y10"), Ok(1200.0));
        assert_eq!(resolve(1, "G1 X10 Y10 F900", "Y10"), Ok(900.0));
    }

    #[test]
    fn missing_feed_is_an_error() {
        let err = resolve(7, "G1 X10 Y10", "Y10").unwrap_err();
        assert_eq!(err, PredictError::UnresolvedFeed { line: 7, code: "Y10".into() });
        assert!(resolve(7, "G1 X10 Y10 F0", "Y10").is_err());
        assert!(resolve(7, "G1 X10 ; F1000", "X10").is_err());
    }

    #[test]
    fn sticky_feed_skips_look_ahead() {
        assert_eq!(effective_feed(600.0, 1, "G1 X10 Y10 F1200", "Y10"), Ok(600.0));
        assert_eq!(effective_feed(0.0, 1, "G1 X10 Y10 F1200", "Y10"), Ok(1200.0));
    }

    #[test]
    fn negative_sticky_feed_counts_as_unset() {
        assert_eq!(effective_feed(-600.0, 1, "G1 X10 Y10 F1200", "Y10"), Ok(1200.0));
        assert!(effective_feed(-600.0, 4, "G1 X10 Y10", "Y10").is_err());
    }
}
