//! Small text and terminal helpers

use std::io::{BufRead, Write};

/// Split `text` into parts of at most `max_len` characters.
///
/// When a split is required, the cut is placed at the last newline inside the
/// second half of the window so paragraphs stay together where possible.
pub fn split_text(text: &str, max_len: usize) -> Vec<String> {
    assert!(max_len > 0, "max_len must be positive");

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut end = (start + max_len).min(chars.len());

        if end < chars.len() {
            let search_start = start + max_len / 2;
            if let Some(newline_pos) = chars[search_start..end].iter().rposition(|&c| c == '\n') {
                end = search_start + newline_pos + 1;
            }
        }

        parts.push(chars[start..end].iter().collect());
        start = end;
    }

    parts
}

/// Print `message` and read one trimmed line from stdin.
///
/// Used by the interactive Telegram sign-in flow (login code, 2FA password).
pub fn prompt(message: &str) -> std::io::Result<String> {
    print!("{}", message);
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().lock().read_line(&mut input)?;

    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(split_text("hello", 10), vec!["hello".to_string()]);
        assert_eq!(split_text("", 10), vec![String::new()]);
    }

    #[test]
    fn test_exact_limit_is_untouched() {
        let text = "a".repeat(10);
        assert_eq!(split_text(&text, 10), vec![text]);
    }

    #[test]
    fn test_long_text_splits_within_limit() {
        let text = "a".repeat(25);
        let parts = split_text(&text, 10);
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.chars().count() <= 10));
        assert_eq!(parts.concat(), text);
    }

    #[test]
    fn test_split_prefers_newline() {
        // newline sits inside the second half of the first window
        let text = format!("{}\n{}", "a".repeat(8), "b".repeat(8));
        let parts = split_text(&text, 10);
        assert_eq!(parts[0], format!("{}\n", "a".repeat(8)));
        assert_eq!(parts[1], "b".repeat(8));
    }

    #[test]
    fn test_split_reassembles_losslessly() {
        let text = "line one\nline two\nline three\n".repeat(40);
        let parts = split_text(&text, 100);
        assert!(parts.iter().all(|p| p.chars().count() <= 100));
        assert_eq!(parts.concat(), text);
    }

    #[test]
    fn test_multibyte_characters_count_as_one() {
        let text = "é".repeat(12);
        let parts = split_text(&text, 10);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].chars().count(), 10);
        assert_eq!(parts[1].chars().count(), 2);
    }
}
