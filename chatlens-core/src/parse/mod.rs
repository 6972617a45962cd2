//! Transcript parsing pipeline
//!
//! Recovers structured [`MessageRecord`]s from a raw WhatsApp `.txt` export.
//! Data flows strictly downward:
//!
//! ```text
//! raw lines -> normalize -> segment into blocks -> (infer date order, once)
//!           -> extract per block -> quote folding -> records + stats
//! ```
//!
//! The only sequential dependency is the previous record's timestamp,
//! carried through the block loop for year inheritance and quote detection.
//!
//! ## Error handling
//!
//! - A block matching neither grammar degrades to `ignored_lines`; records,
//!   once extracted, are never dropped.
//! - A grammar match with out-of-range calendar/time fields aborts the whole
//!   parse with [`Error::InvalidTimestamp`](crate::Error::InvalidTimestamp).
//!
//! ## Quoted replies
//!
//! Exports render a quoted reply as its own short-form message carrying the
//! *original* message's time, so its timestamp appears to go backward. Such
//! blocks are folded into the preceding record as a citation line instead of
//! becoming records. Only the first fold in a transcript increments
//! `quoted_messages`/`multiline_messages` and sets `is_quoted` on the anchor
//! record; later folds still append their text. Downstream statistics
//! consumers depend on this exact behavior.

mod extract;
pub mod infer;
pub mod normalize;
pub mod segment;

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::types::{ImportOptions, MessageRecord, ParseResult, ParseStats};
use extract::Extraction;

/// Batch parser for one transcript.
///
/// ## Example
///
/// ```rust
/// use chatlens_core::{ImportOptions, TranscriptParser};
///
/// let parser = TranscriptParser::new(ImportOptions::default());
/// let result = parser
///     .parse_str("[05/11/23, 09:00:00] Ann: Hi\n[05/11 09:01] Ann: are you there?")
///     .expect("parse should succeed");
/// assert_eq!(result.records.len(), 2);
/// assert_eq!(result.stats.inferred_dates, 1);
/// ```
#[derive(Debug, Default)]
pub struct TranscriptParser {
    options: ImportOptions,
}

impl TranscriptParser {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Parse a whole export held in memory.
    pub fn parse_str(&self, text: &str) -> Result<ParseResult> {
        self.parse_lines(text.lines())
    }

    /// Parse an export from a sequence of lines.
    pub fn parse_lines<I, S>(&self, lines: I) -> Result<ParseResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (blocks, seg_stats) = segment::segment_lines(lines);

        // Decided once, from a prefix, before extraction begins. An explicit
        // option takes precedence over inference.
        let order = self
            .options
            .date_order
            .unwrap_or_else(|| infer::infer_date_order(&blocks));

        let mut stats = ParseStats {
            total_lines: seg_stats.total_lines,
            parsed_messages: seg_stats.header_lines,
            multiline_messages: seg_stats.continuation_lines,
            ignored_lines: seg_stats.dropped_leading,
            ..ParseStats::default()
        };

        let mut records: Vec<MessageRecord> = Vec::new();
        let mut last_timestamp: Option<NaiveDateTime> = None;
        let mut first_quote = true;

        for block in &blocks {
            let extraction =
                extract::extract_block(block, last_timestamp, order, self.options.detect_quoted)?;
            match extraction {
                Extraction::Message {
                    record,
                    inferred_date,
                } => {
                    if inferred_date {
                        stats.inferred_dates += 1;
                    }
                    last_timestamp = Some(record.timestamp);
                    records.push(record);
                }
                Extraction::Quoted {
                    anchor,
                    sender,
                    body,
                } => match records.last_mut() {
                    Some(previous) => {
                        previous.body.push_str(&format_citation(anchor, &sender, &body));
                        if first_quote {
                            first_quote = false;
                            previous.is_quoted = true;
                            stats.multiline_messages += 1;
                            stats.quoted_messages += 1;
                        }
                    }
                    // Extraction only reports a quote when an anchor record
                    // exists; degrade instead of panicking.
                    None => stats.ignored_lines += 1,
                },
                Extraction::Unparsable => {
                    tracing::debug!(block = %block.lines().next().unwrap_or(""), "Ignoring unparsable block");
                    stats.ignored_lines += 1;
                }
            }
        }

        tracing::debug!(
            records = records.len(),
            total_lines = stats.total_lines,
            ignored_lines = stats.ignored_lines,
            quoted_messages = stats.quoted_messages,
            "Transcript parsed"
        );

        Ok(ParseResult { records, stats })
    }
}

/// Citation line appended when a quoted reply folds into the previous
/// record. Displays the anchor record's timestamp, matching the export
/// convention for quotes.
fn format_citation(anchor: NaiveDateTime, sender: &str, body: &str) -> String {
    format!("\n[{}] {}: {}", anchor.format("%d/%m %H:%M"), sender, body)
}
