//! Core domain types for chatlens
//!
//! These types represent the structured form of a WhatsApp chat export:
//! a sequence of [`MessageRecord`]s plus the [`ParseStats`] counters the
//! parser accumulates while recovering them.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Full-form line** | Timestamp line with explicit two-digit year and seconds |
//! | **Short-form line** | Timestamp line omitting year and seconds; year inherited from context |
//! | **Block** | One header line plus its continuation lines, the unit of extraction |
//! | **Quoted continuation** | Short-form block folded into the preceding record because its timestamp goes backward |
//! | **Date ordering** | Whether the first numeric date field is the day or the month |

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ============================================
// Date ordering
// ============================================

/// Which of the two ambiguous numeric date fields comes first.
///
/// WhatsApp exports follow the device locale; `15/03` is only a valid
/// calendar date day-first, while `03/15` is only valid month-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    DayFirst,
    MonthFirst,
}

impl DateOrder {
    /// Returns the identifier used in config files and CLI flags
    pub fn as_str(&self) -> &'static str {
        match self {
            DateOrder::DayFirst => "day_first",
            DateOrder::MonthFirst => "month_first",
        }
    }

    /// Map the two raw date fields, in written order, to `(day, month)`.
    pub fn to_day_month(&self, first: u32, second: u32) -> (u32, u32) {
        match self {
            DateOrder::DayFirst => (first, second),
            DateOrder::MonthFirst => (second, first),
        }
    }
}

impl std::str::FromStr for DateOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day_first" | "day-first" => Ok(DateOrder::DayFirst),
            "month_first" | "month-first" => Ok(DateOrder::MonthFirst),
            _ => Err(format!("unknown date order: {}", s)),
        }
    }
}

impl std::fmt::Display for DateOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================
// Message records
// ============================================

/// One message recovered from the transcript.
///
/// `body` may contain embedded newlines (multiline messages) and, when a
/// quoted reply was folded in, appended citation lines. Timestamps are
/// naive: exports carry no zone information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Message timestamp, second resolution (short form defaults seconds to 0)
    pub timestamp: NaiveDateTime,
    /// Sender display name as exported
    pub sender: String,
    /// Message text, media represented only as placeholder text
    pub body: String,
    /// True if a quoted reply was folded into this record
    pub is_quoted: bool,
}

impl MessageRecord {
    /// Whether the body carries the export's media placeholder token
    /// (e.g. "image omitted"). Media is never materialized beyond this.
    pub fn is_media(&self, placeholder: &str) -> bool {
        !placeholder.is_empty() && self.body.contains(placeholder)
    }
}

// ============================================
// Parse statistics
// ============================================

/// Diagnostic counters accumulated over one parse.
///
/// Created empty, incremented monotonically, immutable once returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Every input line seen, whatever became of it
    pub total_lines: u64,
    /// Lines that opened a message block (structural, not semantic)
    pub parsed_messages: u64,
    /// Continuation lines absorbed into blocks, plus the first quoted fold
    pub multiline_messages: u64,
    /// Short-form records whose year was inherited from the previous record
    pub inferred_dates: u64,
    /// Blocks matching neither grammar, plus continuations dropped before
    /// any block opened
    pub ignored_lines: u64,
    /// Quoted continuations detected (first fold only, see parser docs)
    pub quoted_messages: u64,
}

// ============================================
// Import options
// ============================================

fn default_detect_quoted() -> bool {
    true
}

/// Options controlling one import.
///
/// All fields can come from the `[import]` table of the config file or be
/// set programmatically. A pinned `date_order` bypasses inference entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Pin the date ordering instead of inferring it from the transcript
    pub date_order: Option<DateOrder>,
    /// Placeholder token the export uses for media (e.g. "image omitted")
    pub media_placeholder: Option<String>,
    /// Fold backward-timestamp short-form blocks into the previous record
    #[serde(default = "default_detect_quoted")]
    pub detect_quoted: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            date_order: None,
            media_placeholder: None,
            detect_quoted: default_detect_quoted(),
        }
    }
}

// ============================================
// Parse result
// ============================================

/// Result of parsing one transcript: the record sequence plus statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseResult {
    /// Messages in transcript order
    pub records: Vec<MessageRecord>,
    /// Diagnostic counters
    pub stats: ParseStats,
}
