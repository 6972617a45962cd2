//! Message block extraction
//!
//! Two mutually exclusive timestamp grammars are tried in order:
//!
//! - **Full form**: `[D/M/YY, H:MM:SS] sender: body` — explicit two-digit
//!   year and seconds. Authoritative; always yields a new record and never
//!   triggers the quote heuristic.
//! - **Short form**: `[D/M H:MM] sender: body` — no year, no seconds. The
//!   year is inherited from the previous record's timestamp, so a short-form
//!   block with no anchor is unparsable.
//!
//! Both grammars tolerate leading whitespace and left-to-right/right-to-left
//! marks before the opening bracket. The sender is everything up to the
//! first `:`; the body is everything after the following whitespace
//! character to the end of the block, embedded newlines included.
//!
//! Matching is done with explicit tokenizers rather than a regex engine so
//! anchoring and the greedy body capture are spelled out in code.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};
use crate::types::{DateOrder, MessageRecord};

/// Raw fields captured from a full-form header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FullFields {
    /// First numeric date field, as written
    pub first: u32,
    /// Second numeric date field, as written
    pub second: u32,
    /// Two-digit year, as written
    pub year: u32,
    pub hour: u32,
    pub minute: u32,
    pub second_of_minute: u32,
    pub sender: String,
    pub body: String,
}

/// Raw fields captured from a short-form header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShortFields {
    pub first: u32,
    pub second: u32,
    pub hour: u32,
    pub minute: u32,
    pub sender: String,
    pub body: String,
}

/// Outcome of extracting one block.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Extraction {
    /// A new standalone record. `inferred_date` is set when the year was
    /// inherited from the previous record (short form only).
    Message {
        record: MessageRecord,
        inferred_date: bool,
    },
    /// A quoted continuation: the block's timestamp went backward, so its
    /// text belongs to the record most recently appended. `anchor` is that
    /// record's timestamp (what the citation line displays).
    Quoted {
        anchor: NaiveDateTime,
        sender: String,
        body: String,
    },
    /// Matched neither grammar, or short form with no anchor. Counted as
    /// ignored by the orchestrator.
    Unparsable,
}

/// Extract one block against both grammars.
///
/// Grammar mismatch degrades to [`Extraction::Unparsable`]. A grammar match
/// whose numeric fields are not a valid calendar date or time is fatal for
/// the whole parse and returns [`Error::InvalidTimestamp`].
pub(crate) fn extract_block(
    block: &str,
    last_timestamp: Option<NaiveDateTime>,
    order: DateOrder,
    detect_quoted: bool,
) -> Result<Extraction> {
    if let Some(fields) = match_full(block) {
        let (day, month) = order.to_day_month(fields.first, fields.second);
        let timestamp = resolve_timestamp(
            2000 + fields.year as i32,
            month,
            day,
            fields.hour,
            fields.minute,
            fields.second_of_minute,
        )?;
        return Ok(Extraction::Message {
            record: MessageRecord {
                timestamp,
                sender: fields.sender,
                body: fields.body,
                is_quoted: false,
            },
            inferred_date: false,
        });
    }

    if let Some(fields) = match_short(block) {
        // No previous record means no year to inherit
        let last = match last_timestamp {
            Some(last) => last,
            None => return Ok(Extraction::Unparsable),
        };

        let (day, month) = order.to_day_month(fields.first, fields.second);
        let timestamp =
            resolve_timestamp(last.year(), month, day, fields.hour, fields.minute, 0)?;

        // Quoted-reply heuristic: a short-form timestamp strictly before the
        // previous record's is the quote's preserved original time, not a
        // new message. Equal timestamps are normal messages.
        if detect_quoted && timestamp < last {
            return Ok(Extraction::Quoted {
                anchor: last,
                sender: fields.sender,
                body: fields.body,
            });
        }

        return Ok(Extraction::Message {
            record: MessageRecord {
                timestamp,
                sender: fields.sender,
                body: fields.body,
                is_quoted: false,
            },
            inferred_date: true,
        });
    }

    Ok(Extraction::Unparsable)
}

/// Build a timestamp, failing the parse on out-of-range fields.
fn resolve_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(|| {
            Error::InvalidTimestamp(format!(
                "{:02}/{:02}/{} {:02}:{:02}:{:02} is not a valid date/time",
                day, month, year, hour, minute, second
            ))
        })
}

/// Match a block against the full-form grammar.
pub(crate) fn match_full(block: &str) -> Option<FullFields> {
    let mut cursor = Cursor::new(block);
    cursor.skip_leading_noise();
    cursor.eat('[')?;
    let first = cursor.digits(1, 2)?;
    cursor.eat('/')?;
    let second = cursor.digits(1, 2)?;
    cursor.eat('/')?;
    let year = cursor.digits(2, 2)?;
    cursor.eat(',')?;
    cursor.eat_whitespace()?;
    let hour = cursor.digits(1, 2)?;
    cursor.eat(':')?;
    let minute = cursor.digits(2, 2)?;
    cursor.eat(':')?;
    let second_of_minute = cursor.digits(2, 2)?;
    cursor.eat(']')?;
    cursor.eat_whitespace()?;
    let (sender, body) = cursor.sender_and_body()?;
    Some(FullFields {
        first,
        second,
        year,
        hour,
        minute,
        second_of_minute,
        sender,
        body,
    })
}

/// Match a block against the short-form grammar.
pub(crate) fn match_short(block: &str) -> Option<ShortFields> {
    let mut cursor = Cursor::new(block);
    cursor.skip_leading_noise();
    cursor.eat('[')?;
    let first = cursor.digits(1, 2)?;
    cursor.eat('/')?;
    let second = cursor.digits(1, 2)?;
    cursor.eat_whitespace()?;
    let hour = cursor.digits(1, 2)?;
    cursor.eat(':')?;
    let minute = cursor.digits(2, 2)?;
    cursor.eat(']')?;
    cursor.eat_whitespace()?;
    let (sender, body) = cursor.sender_and_body()?;
    Some(ShortFields {
        first,
        second,
        hour,
        minute,
        sender,
        body,
    })
}

/// Minimal forward-only tokenizer over a block.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    /// Skip leading whitespace and invisible direction marks.
    fn skip_leading_noise(&mut self) {
        self.rest = self
            .rest
            .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '\u{200e}' | '\u{200f}'));
    }

    /// Consume exactly `expected`, or fail.
    fn eat(&mut self, expected: char) -> Option<()> {
        self.rest = self.rest.strip_prefix(expected)?;
        Some(())
    }

    /// Consume one whitespace character (newlines included).
    fn eat_whitespace(&mut self) -> Option<()> {
        let mut chars = self.rest.chars();
        if chars.next()?.is_whitespace() {
            self.rest = chars.as_str();
            Some(())
        } else {
            None
        }
    }

    /// Consume between `min` and `max` ASCII digits and parse them.
    fn digits(&mut self, min: usize, max: usize) -> Option<u32> {
        let end = self
            .rest
            .char_indices()
            .take(max)
            .take_while(|(_, c)| c.is_ascii_digit())
            .map(|(i, _)| i + 1)
            .last()?;
        if end < min {
            return None;
        }
        let (digits, rest) = self.rest.split_at(end);
        self.rest = rest;
        digits.parse().ok()
    }

    /// Capture `sender: body`: the sender is everything up to the first `:`
    /// (non-empty), followed by one whitespace character, then the body runs
    /// greedily to the end of the block.
    fn sender_and_body(&mut self) -> Option<(String, String)> {
        let colon = self.rest.find(':')?;
        if colon == 0 {
            return None;
        }
        let sender = &self.rest[..colon];
        self.rest = &self.rest[colon + 1..];
        self.eat_whitespace()?;
        Some((sender.to_string(), self.rest.to_string()))
    }
}
