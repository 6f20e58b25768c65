// Text Utilities
// Fitting free-form widget text into fixed-width cells

/// Wrap text to fit within `max_width` columns
///
/// Splits on whitespace and keeps explicit line breaks. Words longer than
/// the width are broken across lines.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            // Break words that cannot fit on any line
            while word.len() > max_width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current_line));
                    current_len = 0;
                }
                lines.push(word[..max_width].iter().collect());
                word.drain(..max_width);
            }
            if word.is_empty() {
                continue;
            }

            if current_len == 0 {
                current_line = word.iter().collect();
                current_len = word.len();
            } else if current_len + 1 + word.len() <= max_width {
                current_line.push(' ');
                current_line.extend(word.iter());
                current_len += 1 + word.len();
            } else {
                lines.push(std::mem::replace(&mut current_line, word.iter().collect()));
                current_len = word.len();
            }
        }

        if current_len > 0 || paragraph.trim().is_empty() {
            lines.push(current_line);
        }
    }

    lines
}

/// Shorten `text` to `max_width` columns, ending in "…" when cut
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out: String = text.chars().take(max_width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_on_word_boundaries() {
        assert_eq!(
            wrap_text("Are you sure you want to delete", 12),
            vec!["Are you sure", "you want to", "delete"]
        );
    }

    #[test]
    fn test_wrap_text_breaks_long_words() {
        assert_eq!(wrap_text("abcdefghij xy", 4), vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_wrap_text_keeps_blank_lines() {
        assert_eq!(wrap_text("one\n\ntwo", 10), vec!["one", "", "two"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Clock", 10), "Clock");
        assert_eq!(truncate("Compliance score", 8), "Complia…");
        assert_eq!(truncate("Clock", 0), "");
    }
}
