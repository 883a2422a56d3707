//! Per-block highlighting.
//!
//! ## Learning: Trait-based Output
//!
//! `highlight_block` does not decide where spans go. It pushes them into any
//! [`FormatSink`]: a `Vec<Span>` in tests, the document's per-block format
//! store in the editor. The highlighter itself stays stateless, so calling it
//! twice on the same block produces the same spans and never accumulates.

use std::ops::Range;

use crate::{RuleTable, TextFormat};

/// A formatted range of one block, in byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
    pub format: TextFormat,
    /// Index of the rule that produced this span
    pub rule: usize,
}

impl Span {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Receives the formats produced for a block.
pub trait FormatSink {
    fn set_format(&mut self, start: usize, len: usize, format: &TextFormat, rule: usize);
}

impl FormatSink for Vec<Span> {
    fn set_format(&mut self, start: usize, len: usize, format: &TextFormat, rule: usize) {
        self.push(Span {
            start,
            len,
            format: *format,
            rule,
        });
    }
}

/// Applies a [`RuleTable`] to blocks of text.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    rules: RuleTable,
}

impl Highlighter {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Annotates `text` into `sink`, one rule at a time in table order.
    ///
    /// Each rule scans left to right and resumes after the end of its
    /// previous match, so spans of one rule never overlap. Spans of different
    /// rules may; the later rule wins when they are drawn. Empty matches
    /// carry nothing to draw and are skipped.
    pub fn highlight_block<S: FormatSink + ?Sized>(&self, text: &str, sink: &mut S) {
        for (index, rule) in self.rules.iter().enumerate() {
            for found in rule.pattern().find_iter(text) {
                if found.is_empty() {
                    continue;
                }
                sink.set_format(found.start(), found.len(), rule.format(), index);
            }
        }
    }

    /// Convenience wrapper collecting the spans of one block.
    pub fn highlight(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        self.highlight_block(text, &mut spans);
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, FontWeight};

    fn go() -> Highlighter {
        Highlighter::new(RuleTable::for_language("go", TextFormat::keyword()).unwrap())
    }

    #[test]
    fn test_word_boundary_excludes_longer_identifiers() {
        let highlighter = Highlighter::new(
            RuleTable::with_patterns([(r"\bfunc\b", TextFormat::keyword())]).unwrap(),
        );
        let spans = highlighter.highlight("func main() { func2() }");
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].len), (0, 4));
    }

    #[test]
    fn test_same_rule_matches_repeatedly() {
        let spans = go().highlight("if x { } else if y { }");
        let ifs: Vec<_> = spans.iter().filter(|s| s.len == 2).map(|s| s.start).collect();
        assert_eq!(ifs, vec![0, 14]);
    }

    #[test]
    fn test_empty_and_plain_text_produce_nothing() {
        assert!(go().highlight("").is_empty());
        assert!(go().highlight("x := y + 1").is_empty());
    }

    #[test]
    fn test_empty_matches_are_skipped() {
        let highlighter =
            Highlighter::new(RuleTable::with_patterns([("a*", TextFormat::keyword())]).unwrap());
        let spans = highlighter.highlight("baab");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].range(), 1..3);
    }

    #[test]
    fn test_spans_follow_table_order() {
        let red = TextFormat::new(Color::DARK_RED, FontWeight::Normal);
        let highlighter = Highlighter::new(
            RuleTable::with_patterns([("var", TextFormat::keyword()), ("v", red)]).unwrap(),
        );
        let spans = highlighter.highlight("var v");
        let rules: Vec<_> = spans.iter().map(|s| s.rule).collect();
        assert_eq!(rules, vec![0, 1, 1]);
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let spans = go().highlight("é := range xs");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, "é := ".len());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn spans_stay_in_bounds_and_same_rule_never_overlaps(text in "[a-z (){}:=\n]{0,80}") {
                let spans = go().highlight(&text);
                for span in &spans {
                    prop_assert!(span.len > 0);
                    prop_assert!(span.end() <= text.len());
                }
                for pair in spans.windows(2) {
                    if pair[0].rule == pair[1].rule {
                        prop_assert!(pair[0].end() <= pair[1].start);
                    }
                }
            }

            #[test]
            fn highlighting_is_idempotent(text in ".{0,60}") {
                let highlighter = go();
                prop_assert_eq!(highlighter.highlight(&text), highlighter.highlight(&text));
            }

            #[test]
            fn keyword_free_text_has_no_spans(text in "[0-9 +*/(){}\\[\\]]{0,60}") {
                prop_assert!(go().highlight(&text).is_empty());
            }
        }
    }
}
