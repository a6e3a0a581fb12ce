//! String utilities for the domain layer.

/// Marker appended when a participant's own `max_chars` cap cuts its output.
pub const PARTICIPANT_TRUNCATION_MARKER: &str = "\n[...truncated...]";

/// Marker appended when the engine-level `output_max_chars` cap cuts a turn.
pub const ENGINE_TRUNCATION_MARKER: &str = "\n[...truncated by swarm...]";

/// Clamp `s` to at most `max_chars` characters, appending `marker` when cut.
///
/// Counts Unicode scalar values rather than bytes, so the result never splits
/// a character. The returned string is at most `max_chars` characters plus
/// the marker.
pub fn clamp_chars(s: &str, max_chars: usize, marker: &str) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => {
            let mut clamped = String::with_capacity(end + marker.len());
            clamped.push_str(&s[..end]);
            clamped.push_str(marker);
            clamped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_short_is_untouched() {
        assert_eq!(clamp_chars("hello", 10, "!"), "hello");
        assert_eq!(clamp_chars("hello", 5, "!"), "hello");
    }

    #[test]
    fn test_clamp_ascii() {
        assert_eq!(clamp_chars("hello world", 5, "~"), "hello~");
    }

    #[test]
    fn test_clamp_counts_characters_not_bytes() {
        // 3 characters, 9 bytes
        let s = "あのね";
        assert_eq!(clamp_chars(s, 3, "~"), "あのね");
        assert_eq!(clamp_chars(s, 2, "~"), "あの~");
    }

    #[test]
    fn test_clamp_length_bound() {
        let long = "x".repeat(5000);
        let clamped = clamp_chars(&long, 1600, PARTICIPANT_TRUNCATION_MARKER);
        assert_eq!(
            clamped.chars().count(),
            1600 + PARTICIPANT_TRUNCATION_MARKER.chars().count()
        );
        assert!(clamped.ends_with(PARTICIPANT_TRUNCATION_MARKER));
    }

    #[test]
    fn test_clamp_zero() {
        assert_eq!(clamp_chars("abc", 0, "~"), "~");
        assert_eq!(clamp_chars("", 0, "~"), "");
    }
}
