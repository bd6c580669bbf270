//! Transcript display helpers.

use serde::Serialize;

/// Longest title produced by [`derive_title`] from a non-heading line.
pub const MAX_DERIVED_TITLE_CHARS: usize = 120;

/// Title used when no usable text exists.
pub const UNTITLED: &str = "Untitled article";

/// One transcript line with its display timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampedLine {
    /// `MM:00`, advancing one minute per non-blank line.
    pub timestamp: String,
    pub text: String,
}

/// Assign a one-minute-per-line timestamp to every non-blank line.
///
/// Blank lines are dropped and do not consume a slot. The seconds component
/// is always `00`.
pub fn timestamp_lines(transcript: &str) -> Vec<TimestampedLine> {
    transcript
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(minute, line)| TimestampedLine {
            timestamp: format!("{minute:02}:00"),
            text: line.to_string(),
        })
        .collect()
}

/// A transcript that is missing or contains only whitespace.
pub fn is_blank_transcript(transcript: Option<&str>) -> bool {
    transcript.map_or(true, |t| t.trim().is_empty())
}

/// Pick a title for generated article text.
///
/// Prefers the first level-one markdown heading, then the first non-blank
/// line (truncated), then [`UNTITLED`].
pub fn derive_title(article: &str) -> String {
    let heading = article
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .filter(|h| !h.is_empty());

    if let Some(h) = heading {
        return h.to_string();
    }

    article
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| {
            let stripped = line.trim_start_matches('#').trim();
            stripped.chars().take(MAX_DERIVED_TITLE_CHARS).collect::<String>()
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn assigns_sequential_minutes() {
        let lines = timestamp_lines("first\nsecond\nthird");
        let stamps: Vec<_> = lines.iter().map(|l| l.timestamp.as_str()).collect();
        assert_eq!(stamps, ["00:00", "01:00", "02:00"]);
        assert_eq!(lines[1].text, "second");
    }

    #[test]
    fn blank_lines_do_not_consume_a_slot() {
        let lines = timestamp_lines("intro\n\n   \nbody\r\n\r\noutro\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].timestamp, "01:00");
        assert_eq!(lines[1].text, "body");
        assert_eq!(lines[2].timestamp, "02:00");
    }

    #[test]
    fn empty_transcript_has_no_lines() {
        assert!(timestamp_lines("").is_empty());
        assert!(timestamp_lines("\n\n").is_empty());
    }

    #[test]
    fn minutes_past_ninety_nine_keep_counting() {
        let transcript = vec!["x"; 101].join("\n");
        let lines = timestamp_lines(&transcript);
        assert_eq!(lines[100].timestamp, "100:00");
    }

    #[test]
    fn blank_transcript_detection() {
        assert!(is_blank_transcript(None));
        assert!(is_blank_transcript(Some("")));
        assert!(is_blank_transcript(Some(" \n\t")));
        assert!(!is_blank_transcript(Some("hello")));
    }

    #[test]
    fn title_from_heading() {
        let article = "intro text\n# Growing Online in 2025\n## Sub";
        assert_eq!(derive_title(article), "Growing Online in 2025");
    }

    #[test]
    fn title_from_first_line_when_no_heading() {
        assert_eq!(derive_title("\n\n## Sub heading\nbody"), "Sub heading");
        let long = "a".repeat(300);
        assert_eq!(derive_title(&long).chars().count(), MAX_DERIVED_TITLE_CHARS);
    }

    #[test]
    fn title_fallback() {
        assert_eq!(derive_title(""), UNTITLED);
        assert_eq!(derive_title("  \n ###"), UNTITLED);
    }

    proptest! {
        #[test]
        fn one_stamp_per_non_blank_line(lines in prop::collection::vec("[ a-z]{0,8}", 0..40)) {
            let transcript = lines.join("\n");
            let stamped = timestamp_lines(&transcript);
            let expected = lines.iter().filter(|l| !l.trim().is_empty()).count();
            prop_assert_eq!(stamped.len(), expected);
            for (i, line) in stamped.iter().enumerate() {
                prop_assert_eq!(&line.timestamp, &format!("{i:02}:00"));
            }
        }
    }
}
