//! Local-filesystem-safe filename sanitization.

/// Linux NAME_MAX, in bytes.
pub const NAME_MAX: usize = 255;

/// Sanitizes one URL path segment for use as a filename.
///
/// - Replaces NUL, `/`, `\` and control characters with `_`
/// - Trims leading/trailing spaces and dots
/// - Limits length to [`NAME_MAX`] bytes
pub fn sanitize_filename(segment: &str) -> String {
    let replaced: String = segment
        .chars()
        .map(|c| match c {
            '\0' | '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = replaced.trim_matches(|c: char| c == ' ' || c == '.');
    truncate_to_boundary(trimmed, NAME_MAX).to_string()
}

/// Cuts `s` to at most `max` bytes without splitting a UTF-8 character.
pub fn truncate_to_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut take = max;
    while take > 0 && !s.is_char_boundary(take) {
        take -= 1;
    }
    &s[..take]
}
