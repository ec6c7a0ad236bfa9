//! Sentence segmentation for per-segment synthesis.
//!
//! The pipeline synthesizes one segment at a time, so long input is split
//! at sentence boundaries. Splitting keeps the terminator with its
//! sentence; whitespace between sentences is dropped.

/// Maximum characters per segment. Sentences longer than this are split
/// again at the nearest whitespace so the tokenized form stays well under
/// the model's context limit.
const MAX_SEGMENT_CHARS: usize = 400;

/// Split text into synthesis segments, in input order.
///
/// Empty or whitespace-only input yields no segments.
pub fn split_segments(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            push_segment(&mut segments, &current);
            current.clear();
        }
    }
    push_segment(&mut segments, &current);

    segments
}

/// Trim a candidate segment, splitting oversized ones at whitespace, and
/// append anything non-empty.
fn push_segment(segments: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return;
    }

    if trimmed.chars().count() <= MAX_SEGMENT_CHARS {
        segments.push(trimmed.to_owned());
        return;
    }

    // Oversized sentence: break at whitespace, accumulating words.
    let mut piece = String::new();
    for word in trimmed.split_whitespace() {
        if !piece.is_empty() && piece.chars().count() + word.chars().count() + 1 > MAX_SEGMENT_CHARS
        {
            segments.push(std::mem::take(&mut piece));
        }
        if !piece.is_empty() {
            piece.push(' ');
        }
        piece.push_str(word);
    }
    if !piece.is_empty() {
        segments.push(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sentence() {
        assert_eq!(split_segments("Hello world."), vec!["Hello world."]);
    }

    #[test]
    fn test_multiple_sentences_keep_order() {
        let segments = split_segments("First. Second! Third?");
        assert_eq!(segments, vec!["First.", "Second!", "Third?"]);
    }

    #[test]
    fn test_trailing_text_without_terminator() {
        let segments = split_segments("Done. And then");
        assert_eq!(segments, vec!["Done.", "And then"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_segments("").is_empty());
        assert!(split_segments("   \n\t ").is_empty());
    }

    #[test]
    fn test_oversized_sentence_is_split_at_whitespace() {
        let long = "word ".repeat(200);
        let segments = split_segments(&long);
        assert!(segments.len() > 1);
        assert!(segments.iter().all(|s| s.chars().count() <= 400));
        let rejoined = segments.join(" ");
        assert_eq!(rejoined, long.trim());
    }
}
