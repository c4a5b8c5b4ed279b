//! Display-width aware text helpers used for measurement and wrapping.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Break text into lines at most `max_width` columns wide, on word boundaries
/// where possible. Words wider than a line are split by characters.
///
/// Explicit newlines are kept; the result always has at least one line.
pub fn wrap_words(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();

    for paragraph in s.split('\n') {
        let mut line = String::new();
        let mut width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = display_width(word);
            let gap = usize::from(!line.is_empty());

            if width + gap + word_width <= max_width {
                if gap == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                width += gap + word_width;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }

            if word_width <= max_width {
                line.push_str(word);
                width = word_width;
                continue;
            }

            // Too long for any line, the tail stays open for following words
            let mut pieces = wrap_chars(word, max_width);
            let tail = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
            width = display_width(&tail);
            line = tail;
        }

        lines.push(line);
    }

    lines
}

/// Break text into lines at most `max_width` columns wide, anywhere.
pub fn wrap_chars(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();

    for paragraph in s.split('\n') {
        let mut line = String::new();
        let mut width = 0;

        for ch in paragraph.chars() {
            let ch_width = char_width(ch);
            if ch_width > 0 && width + ch_width > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                width = 0;
            }
            line.push(ch);
            width += ch_width;
        }

        lines.push(line);
    }

    lines
}
