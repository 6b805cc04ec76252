//! Word boundary helpers over a single line.
//!
//! A word is a maximal run of non-whitespace characters. Punctuation is not a
//! boundary of its own. All columns are char indices.

fn chars(line: &str) -> Vec<char> {
    line.chars().collect()
}

/// Column of the first non-whitespace char, or the line length if there is none.
pub fn first_non_blank(line: &str) -> usize {
    line.chars()
        .position(|c| !c.is_whitespace())
        .unwrap_or_else(|| line.chars().count())
}

/// Start of the next word after `col`, or the line length when no word follows.
pub fn next_word_start(line: &str, col: usize) -> usize {
    let chars = chars(line);
    let mut pos = col;
    if pos >= chars.len() {
        return chars.len();
    }
    while pos < chars.len() && !chars[pos].is_whitespace() {
        pos += 1;
    }
    while pos < chars.len() && chars[pos].is_whitespace() {
        pos += 1;
    }
    pos
}

/// Exclusive end of the word under `col`. Equals `col` when `col` is on whitespace.
pub fn word_end(line: &str, col: usize) -> usize {
    let chars = chars(line);
    let mut pos = col.min(chars.len());
    while pos < chars.len() && !chars[pos].is_whitespace() {
        pos += 1;
    }
    pos
}

/// Start of the word before `col`. Returns 0 when there is none.
pub fn prev_word_start(line: &str, col: usize) -> usize {
    let chars = chars(line);
    let mut pos = col.min(chars.len());
    while pos > 0 && chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    while pos > 0 && !chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    pos
}

/// Start of the last word on the line, if the line has any.
pub fn last_word_start(line: &str) -> Option<usize> {
    let len = line.chars().count();
    let start = prev_word_start(line, len);
    if start < len && first_non_blank(line) < len {
        Some(start)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_word_start() {
        assert_eq!(next_word_start("hello world", 0), 6);
        assert_eq!(next_word_start("hello world", 3), 6);
        assert_eq!(next_word_start("hello world", 5), 6);
        assert_eq!(next_word_start("hello world", 6), 11);
        assert_eq!(next_word_start("hello world", 11), 11);
        assert_eq!(next_word_start("hello world", 40), 11);
    }

    #[test]
    fn test_punctuation_is_part_of_word() {
        assert_eq!(next_word_start("foo.bar baz", 0), 8);
        assert_eq!(word_end("foo.bar baz", 0), 7);
    }

    #[test]
    fn test_word_end() {
        assert_eq!(word_end("hello world", 2), 5);
        assert_eq!(word_end("hello world", 5), 5);
        assert_eq!(word_end("hello world", 6), 11);
    }

    #[test]
    fn test_prev_word_start() {
        assert_eq!(prev_word_start("hello world", 11), 6);
        assert_eq!(prev_word_start("hello world", 6), 0);
        assert_eq!(prev_word_start("hello world", 8), 6);
        assert_eq!(prev_word_start("   ", 3), 0);
    }

    #[test]
    fn test_first_non_blank() {
        assert_eq!(first_non_blank("   indented"), 3);
        assert_eq!(first_non_blank("    "), 4);
        assert_eq!(first_non_blank(""), 0);
    }

    #[test]
    fn test_last_word_start() {
        assert_eq!(last_word_start("hello world  "), Some(6));
        assert_eq!(last_word_start("   "), None);
        assert_eq!(last_word_start(""), None);
    }
}
