/// Length of the longest prefix of `s` that fits in `max` bytes without
/// splitting a character.
pub fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Prefix `text` with a single space, as held in a `capacity`-byte buffer
/// whose last byte is reserved for the terminator.
///
/// Returns the bounded string and whether any of `text` had to be dropped.
pub fn prefix_space(text: &str, capacity: usize) -> (String, bool) {
    let limit = capacity.saturating_sub(1);
    if limit == 0 {
        return (String::new(), true);
    }

    let end = floor_char_boundary(text, limit - 1);
    let mut buffer = String::with_capacity(end + 1);
    buffer.push(' ');
    buffer.push_str(&text[..end]);
    (buffer, end < text.len())
}
