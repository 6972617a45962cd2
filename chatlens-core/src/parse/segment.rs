//! Message block segmentation
//!
//! Groups normalized lines into message blocks: one header line (a line
//! opening with `[`, the structural token every timestamp grammar starts
//! with) plus any continuation lines that follow it.
//!
//! Segmentation is purely structural. A header-looking line that later
//! fails both timestamp grammars is still segmented as a block; semantic
//! validity is decided downstream by the extractor.

use super::normalize::clean_line;

/// Counters produced while segmenting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentStats {
    /// Lines pushed through the segmenter
    pub total_lines: u64,
    /// Lines that opened a block
    pub header_lines: u64,
    /// Continuation lines absorbed into an open block
    pub continuation_lines: u64,
    /// Continuation lines seen before any block opened. Dropped here;
    /// the orchestrator classifies them as ignored.
    pub dropped_leading: u64,
}

/// Streaming two-state segmenter (`Idle` until the first header, then
/// `InBlock`). Feed lines with [`push_line`](Segmenter::push_line); each
/// call may emit the block the new header just closed. [`finish`]
/// (Segmenter::finish) flushes the block still open at end of input.
#[derive(Debug, Default)]
pub struct Segmenter {
    current: Option<String>,
    stats: SegmentStats,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one raw line. Returns the previous block if this line closed it.
    pub fn push_line(&mut self, raw: &str) -> Option<String> {
        self.stats.total_lines += 1;
        let line = clean_line(raw);

        if is_message_start(&line) {
            self.stats.header_lines += 1;
            let finished = self.current.replace(line);
            return finished;
        }

        match self.current.as_mut() {
            Some(block) => {
                self.stats.continuation_lines += 1;
                block.push('\n');
                block.push_str(&line);
            }
            None => {
                self.stats.dropped_leading += 1;
            }
        }
        None
    }

    /// Flush the open block, if any, and return the final statistics.
    pub fn finish(self) -> (Option<String>, SegmentStats) {
        (self.current, self.stats)
    }

    /// Statistics accumulated so far.
    pub fn stats(&self) -> SegmentStats {
        self.stats
    }
}

/// Segment a whole line sequence at once.
pub fn segment_lines<I, S>(lines: I) -> (Vec<String>, SegmentStats)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segmenter = Segmenter::new();
    let mut blocks = Vec::new();

    for line in lines {
        if let Some(block) = segmenter.push_line(line.as_ref()) {
            blocks.push(block);
        }
    }

    let (last, stats) = segmenter.finish();
    if let Some(block) = last {
        blocks.push(block);
    }
    (blocks, stats)
}

/// A line starts a message if its first character, after leading whitespace
/// and any invisible direction marks, is the opening bracket.
fn is_message_start(line: &str) -> bool {
    line.chars()
        .find(|c| !c.is_whitespace() && !matches!(c, '\u{200e}' | '\u{200f}'))
        == Some('[')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_messages() {
        let (blocks, stats) = segment_lines([
            "[05/11/23, 09:00:00] Ann: Hi\n",
            "[05/11/23, 09:01:00] Bob: Hello\n",
        ]);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], "[05/11/23, 09:00:00] Ann: Hi");
        assert_eq!(stats.total_lines, 2);
        assert_eq!(stats.header_lines, 2);
        assert_eq!(stats.continuation_lines, 0);
    }

    #[test]
    fn test_continuations_joined_with_newline() {
        let (blocks, stats) = segment_lines([
            "[05/11/23, 09:00:00] Ann: first line",
            "second line",
            "third line",
            "[05/11/23, 09:02:00] Bob: ok",
        ]);
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            "[05/11/23, 09:00:00] Ann: first line\nsecond line\nthird line"
        );
        assert_eq!(stats.continuation_lines, 2);
        assert_eq!(stats.header_lines, 2);
    }

    #[test]
    fn test_leading_continuation_dropped() {
        let (blocks, stats) = segment_lines([
            "garbled text with no brackets",
            "[05/11/23, 09:00:00] Ann: Hi",
        ]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(stats.dropped_leading, 1);
        assert_eq!(stats.continuation_lines, 0);
    }

    #[test]
    fn test_header_after_marks_and_whitespace() {
        assert!(is_message_start("[05/11 09:01] Ann: hey"));
        assert!(is_message_start("  \u{200e}[05/11 09:01] Ann: hey"));
        assert!(!is_message_start("no brackets here"));
        assert!(!is_message_start(""));
    }

    #[test]
    fn test_header_looking_garbage_still_segmented() {
        // Structural only: the extractor decides semantic validity
        let (blocks, stats) = segment_lines(["[not a timestamp at all"]);
        assert_eq!(blocks, vec!["[not a timestamp at all".to_string()]);
        assert_eq!(stats.header_lines, 1);
    }

    #[test]
    fn test_streaming_flush_at_end() {
        let mut segmenter = Segmenter::new();
        assert!(segmenter.push_line("[05/11/23, 09:00:00] Ann: Hi").is_none());
        assert!(segmenter.push_line("still Ann").is_none());
        let emitted = segmenter.push_line("[05/11/23, 09:01:00] Bob: yo");
        assert_eq!(emitted.as_deref(), Some("[05/11/23, 09:00:00] Ann: Hi\nstill Ann"));

        let (last, stats) = segmenter.finish();
        assert_eq!(last.as_deref(), Some("[05/11/23, 09:01:00] Bob: yo"));
        assert_eq!(stats.total_lines, 3);
    }

    #[test]
    fn test_conservation() {
        let (_, stats) = segment_lines([
            "stray",
            "[05/11/23, 09:00:00] Ann: Hi",
            "more",
            "and more",
            "[05/11/23, 09:01:00] Bob: yo",
        ]);
        assert_eq!(
            stats.total_lines,
            stats.header_lines + stats.continuation_lines + stats.dropped_leading
        );
    }
}
