//! Word-boundary text wrapping.
//!
//! Wrapping is greedy: words fill a line until the column limit, measured
//! in characters, would be exceeded. Words longer than the limit are split
//! into limit-sized chunks. Input newlines are hard breaks wrapped
//! independently; a blank input line produces no output line.

/// Wrap `text` to at most `columns` characters per line.
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut out = Vec::new();
    for line in text.split('\n') {
        wrap_line(line, columns, &mut out);
    }
    out
}

fn wrap_line(line: &str, columns: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > columns {
            if current_len > 0 {
                out.push(std::mem::take(&mut current));
            }
            // Chunk the oversized word; the remainder starts the next
            // line so following words can still join it.
            let chars: Vec<char> = word.chars().collect();
            let mut i = 0;
            while i + columns < chars.len() {
                out.push(chars[i..i + columns].iter().collect());
                i += columns;
            }
            current = chars[i..].iter().collect();
            current_len = chars.len() - i;
        } else if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= columns {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if current_len > 0 {
        out.push(current);
    }
}

/// Horizontal pixels available for text starting at `x`, keeping
/// `margin_right` clear of the frame's right edge.
pub fn available_width(frame_width: u32, x: i64, margin_right: u32) -> u32 {
    (frame_width as i64 - margin_right as i64 - x).max(0) as u32
}

/// Column limit for a pixel budget given the average character advance.
pub fn columns_for_width(width_px: u32, char_advance: u32) -> usize {
    (width_px / char_advance.max(1)).max(1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_at_word_boundaries() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_exact_fit_stays_on_one_line() {
        assert_eq!(wrap_text("abcde fghij", 11), vec!["abcde fghij"]);
        assert_eq!(wrap_text("abcde fghij", 10), vec!["abcde", "fghij"]);
    }

    #[test]
    fn test_long_word_is_chunked() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        // A short word can still join the chunk remainder.
        assert_eq!(wrap_text("abcdef g", 4), vec!["abcd", "ef g"]);
        assert_eq!(wrap_text("abcdef gh", 4), vec!["abcd", "ef", "gh"]);
    }

    #[test]
    fn test_hard_breaks_wrap_independently() {
        assert_eq!(
            wrap_text("one two\nthree four", 9),
            vec!["one two", "three", "four"]
        );
    }

    #[test]
    fn test_blank_lines_produce_nothing() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "b"]);
        assert!(wrap_text("", 10).is_empty());
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(wrap_text("héllo wörld", 5), vec!["héllo", "wörld"]);
    }

    #[test]
    fn test_zero_columns_clamps_to_one() {
        assert_eq!(wrap_text("ab", 0), vec!["a", "b"]);
    }

    #[test]
    fn test_column_derivation() {
        assert_eq!(available_width(640, 100, 40), 500);
        assert_eq!(available_width(640, 700, 0), 0);
        assert_eq!(available_width(640, -60, 0), 700);
        assert_eq!(columns_for_width(500, 12), 41);
        assert_eq!(columns_for_width(5, 12), 1);
        assert_eq!(columns_for_width(500, 0), 500);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn lines_never_exceed_columns(
                text in "[a-zA-Z0-9 \n]{0,120}",
                columns in 1usize..24,
            ) {
                for line in wrap_text(&text, columns) {
                    prop_assert!(line.chars().count() <= columns);
                    prop_assert!(!line.is_empty());
                }
            }

            #[test]
            fn no_characters_are_lost(
                text in "[a-zA-Z0-9 \n]{0,120}",
                columns in 1usize..24,
            ) {
                let wrapped: String = wrap_text(&text, columns)
                    .concat()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                let original: String =
                    text.chars().filter(|c| !c.is_whitespace()).collect();
                prop_assert_eq!(wrapped, original);
            }
        }
    }
}
