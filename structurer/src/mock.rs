/// Trims `input` and keeps at most `max` chars, appending `…` when cut.
///
/// Works on `char` boundaries, so multi-byte input never panics.
pub fn truncate_chars(input: &str, max: usize) -> String {
    let trimmed = input.trim();
    if trimmed.chars().count() <= max {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(max).collect();
    out.push('…');
    out
}
