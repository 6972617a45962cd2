//! Line normalization
//!
//! WhatsApp exports sprinkle invisible Unicode characters through lines:
//! a BOM at file start and left-to-right/right-to-left marks around names
//! and timestamps. They are stripped wherever they appear, along with any
//! trailing line terminator.

/// Characters stripped from every line regardless of position.
const INVISIBLE_MARKS: [char; 3] = ['\u{feff}', '\u{200e}', '\u{200f}'];

/// Strip invisible Unicode marks and the trailing line terminator.
///
/// Pure and idempotent: `clean_line(clean_line(x)) == clean_line(x)`.
pub fn clean_line(line: &str) -> String {
    line.trim_end_matches(|c| c == '\r' || c == '\n')
        .chars()
        .filter(|c| !INVISIBLE_MARKS.contains(c))
        .collect()
}
