//! Topic pattern matching.
//!
//! Patterns are dot-delimited token sequences. `*` matches exactly one
//! subject token in its position; a trailing `>` matches one or more
//! remaining tokens. Matching is case-sensitive and anchored at both ends.

/// Matches exactly one token in its position.
pub const SINGLE_WILDCARD: &str = "*";

/// Matches one or more remaining tokens; meaningful only as the last token.
pub const MULTI_WILDCARD: &str = ">";

/// Check whether `subject` matches `pattern`.
///
/// Runs on every inbound message, so it walks both token streams in one
/// pass without allocating. A `>` anywhere other than the final position
/// is treated as a literal token.
pub fn matches(pattern: &str, subject: &str) -> bool {
    let mut subject_tokens = subject.split('.');
    let mut pattern_tokens = pattern.split('.').peekable();

    loop {
        match pattern_tokens.next() {
            // Pattern exhausted: subject must be too (anchored).
            None => return subject_tokens.next().is_none(),

            // Trailing multi-token wildcard needs at least one token left.
            Some(MULTI_WILDCARD) if pattern_tokens.peek().is_none() => {
                return subject_tokens.next().is_some();
            }

            Some(token) => match subject_tokens.next() {
                Some(sub) if token == SINGLE_WILDCARD || token == sub => {}
                _ => return false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(matches("sensors.room1.temperature", "sensors.room1.temperature"));
        assert!(!matches("sensors.room1.temperature", "sensors.room1.humidity"));
    }

    #[test]
    fn test_single_wildcard_one_token() {
        assert!(matches("sensors.*.temperature", "sensors.room1.temperature"));
        assert!(!matches(
            "sensors.*.temperature",
            "sensors.room1.room2.temperature"
        ));
        assert!(!matches("sensors.*.temperature", "sensors.temperature"));
    }

    #[test]
    fn test_trailing_multi_wildcard() {
        assert!(matches("sensors.>", "sensors.room1.temperature"));
        assert!(matches("sensors.>", "sensors.room1"));
        // `>` requires at least one remaining token.
        assert!(!matches("sensors.>", "sensors"));
    }

    #[test]
    fn test_bare_multi_wildcard() {
        assert!(matches(">", "anything"));
        assert!(matches(">", "a.b.c"));
    }

    #[test]
    fn test_anchored_both_ends() {
        assert!(!matches("sensors.room1", "sensors.room1.temperature"));
        assert!(!matches("room1.temperature", "sensors.room1.temperature"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!matches("Sensors.room1", "sensors.room1"));
    }

    #[test]
    fn test_non_trailing_multi_wildcard_is_literal() {
        assert!(matches(">.temperature", ">.temperature"));
        assert!(!matches(">.temperature", "sensors.temperature"));
    }

    #[test]
    fn test_wildcard_in_each_position() {
        assert!(matches("*.room1.temperature", "sensors.room1.temperature"));
        assert!(matches("sensors.room1.*", "sensors.room1.temperature"));
        assert!(matches("*.*.*", "sensors.room1.temperature"));
        assert!(!matches("*.*.*", "sensors.room1"));
    }
}
