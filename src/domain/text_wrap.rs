//! Greedy word wrapping for narrow text sources.

/// Wrap `text` into lines of at most `max_width` characters.
///
/// Words are split on whitespace and re-joined with single spaces. A word longer than
/// `max_width` is never broken; it occupies a line of its own.
pub fn wrap(text: &str, max_width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len + 1 + word_len > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
