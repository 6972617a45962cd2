//! Date-ordering inference
//!
//! The numeric date in an export is ambiguous: `05/11` could be the 5th of
//! November or the 11th of May, depending on the device locale. Rather than
//! guessing per block, the ordering is decided once per transcript from a
//! bounded sample of full-form blocks and applied uniformly afterwards.

use chrono::NaiveDate;

use super::extract::match_full;
use crate::types::DateOrder;

/// How many full-form blocks to sample before deciding.
pub const INFERENCE_SAMPLE_SIZE: usize = 50;

/// Infer the date ordering from the first [`INFERENCE_SAMPLE_SIZE`]
/// full-form blocks.
///
/// Each candidate ordering scores one point per sampled block whose fields
/// form a valid calendar date under it (`15/03` is only valid day-first).
/// The higher score wins; ties and empty samples fall back to day-first,
/// the dominant export convention.
pub fn infer_date_order(blocks: &[String]) -> DateOrder {
    let mut sampled = 0usize;
    let mut day_first = 0u32;
    let mut month_first = 0u32;

    for block in blocks {
        if sampled == INFERENCE_SAMPLE_SIZE {
            break;
        }
        let fields = match match_full(block) {
            Some(fields) => fields,
            None => continue,
        };
        sampled += 1;

        let year = 2000 + fields.year as i32;
        if NaiveDate::from_ymd_opt(year, fields.second, fields.first).is_some() {
            day_first += 1;
        }
        if NaiveDate::from_ymd_opt(year, fields.first, fields.second).is_some() {
            month_first += 1;
        }
    }

    let order = if month_first > day_first {
        DateOrder::MonthFirst
    } else {
        DateOrder::DayFirst
    };

    tracing::debug!(
        sampled,
        day_first,
        month_first,
        order = %order,
        "Inferred date ordering"
    );
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_block(date: &str) -> String {
        format!("[{}, 09:00:00] Ann: hello", date)
    }

    #[test]
    fn test_day_values_above_twelve_select_day_first() {
        let blocks: Vec<String> = (13..=28).map(|d| full_block(&format!("{}/03/23", d))).collect();
        assert_eq!(infer_date_order(&blocks), DateOrder::DayFirst);
    }

    #[test]
    fn test_month_first_wins_on_score() {
        let blocks: Vec<String> = (13..=28).map(|d| full_block(&format!("03/{}/23", d))).collect();
        assert_eq!(infer_date_order(&blocks), DateOrder::MonthFirst);
    }

    #[test]
    fn test_ambiguous_dates_tie_break_day_first() {
        // Valid under both readings
        let blocks = vec![full_block("05/11/23"), full_block("01/02/23")];
        assert_eq!(infer_date_order(&blocks), DateOrder::DayFirst);
    }

    #[test]
    fn test_no_full_blocks_defaults_day_first() {
        let blocks = vec!["[05/11 09:01] Ann: short only".to_string()];
        assert_eq!(infer_date_order(&blocks), DateOrder::DayFirst);
        assert_eq!(infer_date_order(&[]), DateOrder::DayFirst);
    }

    #[test]
    fn test_sample_window_is_bounded() {
        // 50 ambiguous blocks fill the window; the unambiguous ones after it
        // must not flip the decision.
        let mut blocks: Vec<String> = (0..INFERENCE_SAMPLE_SIZE)
            .map(|_| full_block("01/02/23"))
            .collect();
        for d in 13..=25 {
            blocks.push(full_block(&format!("03/{}/23", d)));
        }
        assert_eq!(infer_date_order(&blocks), DateOrder::DayFirst);
    }
}
