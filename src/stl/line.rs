//! Line normalization applied before grammar dispatch

/// Comment marker; everything from it to the end of the line is ignored
const COMMENT: char = '#';

/// Whitespace as classified by C `isspace` in the "C" locale
pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Strip leading whitespace, a `#` comment and trailing whitespace.
///
/// Returns `None` for lines that carry no content.
pub(crate) fn normalize(raw: &str) -> Option<&str> {
    let line = raw.trim_start_matches(is_space);
    let end = line.find(['\n', COMMENT]).unwrap_or(line.len());
    let line = line[..end].trim_end_matches(is_space);
    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}
