//! Rewrite engine: sequential rule application with caret tracking.
//!
//! Each rule performs a global, non-overlapping, left-to-right literal
//! replacement over the whole buffer, and each rule's output feeds the next
//! rule's input. Replacements shrink or grow the text, so the caret offset
//! from before the rewrite may point into the middle of a glyph or past the
//! end of the buffer if replayed as-is. This module recomputes the offset
//! instead: every replacement at or before the caret shifts it by the length
//! delta, and a caret inside a replaced span lands at the end of the
//! corresponding replacement.
//!
//! All offsets are char offsets (Unicode scalar values), never bytes.

use crate::editing::rules::{Rule, RuleTable};

/// Apply `table` to `text` and return the rewritten buffer with the adjusted
/// caret.
///
/// Pure: identical inputs always produce identical outputs, and no state is
/// retained between calls. The result caret is always within
/// `0..=result.chars().count()`.
pub(crate) fn rewrite(table: &RuleTable, text: &str, cursor: usize) -> (String, usize) {
    let mut buffer = text.to_owned();
    let mut cursor = cursor.min(char_len(&buffer));
    for rule in table.rules() {
        (buffer, cursor) = apply_rule(&buffer, cursor, rule);
    }
    (buffer, cursor)
}

/// One global replace pass for a single rule.
///
/// Walks the non-overlapping matches left to right, copying the untouched
/// gaps and emitting the replacement for each match. The caret is resolved
/// against the first region that contains it:
/// - in a gap (or exactly at a match start): keeps its distance from the
///   text already emitted,
/// - inside a matched span: moves to the end of that span's replacement,
/// - after the last match: shifts by the total length delta.
fn apply_rule(text: &str, cursor: usize, rule: &Rule) -> (String, usize) {
    let pattern = rule.pattern();
    if !text.contains(pattern) {
        return (text.to_owned(), cursor);
    }

    let pattern_chars = char_len(pattern);
    let replacement_chars = char_len(rule.replacement());

    let mut out = String::with_capacity(text.len());
    let mut consumed = 0; // chars of input copied or replaced so far
    let mut emitted = 0; // chars of output written so far
    let mut tail_start = 0; // byte offset of the unprocessed input tail
    let mut new_cursor = None;

    for (match_start, _) in text.match_indices(pattern) {
        let gap = &text[tail_start..match_start];
        let gap_chars = char_len(gap);

        if new_cursor.is_none() && cursor <= consumed + gap_chars {
            new_cursor = Some(emitted + (cursor - consumed));
        }
        out.push_str(gap);
        consumed += gap_chars;
        emitted += gap_chars;

        if new_cursor.is_none() && cursor < consumed + pattern_chars {
            new_cursor = Some(emitted + replacement_chars);
        }
        out.push_str(rule.replacement());
        consumed += pattern_chars;
        emitted += replacement_chars;

        tail_start = match_start + pattern.len();
    }

    let tail = &text[tail_start..];
    let new_cursor = match new_cursor {
        Some(offset) => offset,
        // Caret sits in the tail; every delta is already accounted for.
        None => emitted + (cursor - consumed),
    };
    out.push_str(tail);

    let total = emitted + char_len(tail);
    (out, new_cursor.min(total))
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use crate::editing::rules::RuleTable;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn table(pairs: &[(&str, &str)]) -> RuleTable {
        RuleTable::new(pairs.iter().copied()).unwrap()
    }

    // ============ Replacement semantics ============

    #[test]
    fn test_order_sensitivity_governs_matching() {
        // "H." must win over the bare-H rule purely because it is declared
        // first; length or alphabetical order must play no part.
        let rules = table(&[("H.", "Ḥ"), ("H", "")]);
        let (out, _) = rules.rewrite("H.", 0);
        assert_eq!(out, "Ḥ");

        let reversed = table(&[("H", ""), ("H.", "Ḥ")]);
        let (out, _) = reversed.rewrite("H.", 0);
        assert_eq!(out, ".");
    }

    #[test]
    fn test_strip_rules_delete_occurrences() {
        let rules = table(&[("C", ""), ("c", "")]);
        let (out, _) = rules.rewrite("Cat", 0);
        assert_eq!(out, "at");
    }

    #[test]
    fn test_sequential_composition_feeds_next_rule() {
        // Rule outputs are visible to later rules; this is composition, not
        // simultaneous matching.
        let rules = table(&[("a", "b"), ("b", "c")]);
        let (out, _) = rules.rewrite("ab", 0);
        assert_eq!(out, "cc");
    }

    #[test]
    fn test_replace_is_global_and_non_overlapping() {
        let rules = table(&[("aa", "x")]);
        let (out, _) = rules.rewrite("aaaa aa", 0);
        assert_eq!(out, "xx x");
    }

    #[test]
    fn test_replacement_not_rescanned_by_same_rule() {
        // A replacement containing its own pattern must not loop.
        let rules = table(&[("x", "xx")]);
        let (out, _) = rules.rewrite("axa", 0);
        assert_eq!(out, "axxa");
    }

    #[test]
    fn test_empty_buffer_identity() {
        let rules = RuleTable::egyptological();
        assert_eq!(rules.rewrite("", 0), (String::new(), 0));
    }

    #[test]
    fn test_untriggered_text_unchanged() {
        let rules = RuleTable::egyptological();
        let (out, cursor) = rules.rewrite("nfr pn", 3);
        assert_eq!(out, "nfr pn");
        assert_eq!(cursor, 3);
    }

    // ============ Caret adjustment ============

    #[test]
    fn test_cursor_after_shrinking_replacement_shifts_back() {
        // "Cat" with the strip table: caret at end of "Cat" ends at end of
        // "at".
        let rules = table(&[("C", ""), ("c", "")]);
        let (out, cursor) = rules.rewrite("Cat", 3);
        assert_eq!(out, "at");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_cursor_before_replacement_is_unmoved() {
        let rules = table(&[("q", "ḳ")]);
        let (out, cursor) = rules.rewrite("ab q", 2);
        assert_eq!(out, "ab ḳ");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_cursor_after_growing_replacement_shifts_forward() {
        let rules = table(&[("x", "xyz")]);
        let (out, cursor) = rules.rewrite("axb", 3);
        assert_eq!(out, "axyzb");
        assert_eq!(cursor, 5);
    }

    #[test]
    fn test_cursor_inside_replaced_span_lands_after_replacement() {
        let rules = table(&[("ab", "Z")]);
        let (out, cursor) = rules.rewrite("ab", 1);
        assert_eq!(out, "Z");
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_cursor_at_match_start_stays_before_replacement() {
        let rules = table(&[("ab", "Z")]);
        let (_, cursor) = rules.rewrite("xab", 1);
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_cursor_tracks_through_multiple_matches() {
        // Two matches before the caret, each shrinking by one char.
        let rules = table(&[("aa", "a")]);
        let (out, cursor) = rules.rewrite("aa aa b", 6);
        assert_eq!(out, "a a b");
        assert_eq!(cursor, 4);
    }

    #[test]
    fn test_typing_the_trigger_keeps_caret_after_glyph() {
        // The common interactive case: the caret sits right after the
        // just-typed trigger and must end right after the produced glyph.
        let rules = RuleTable::egyptological();
        let (out, cursor) = rules.rewrite("H.", 2);
        assert_eq!(out, "Ḥ");
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_out_of_range_cursor_is_clamped() {
        let rules = table(&[("C", "")]);
        let (out, cursor) = rules.rewrite("C", 99);
        assert_eq!(out, "");
        assert_eq!(cursor, 0);
    }

    #[rstest]
    #[case("", 0)]
    #[case("h.tp dj nswt", 0)]
    #[case("h.tp dj nswt", 5)]
    #[case("h.tp dj nswt", 12)]
    #[case("CLOUZY", 6)]
    #[case("123", 3)]
    #[case("ḥꜣb", 2)]
    fn test_cursor_always_in_bounds(#[case] text: &str, #[case] cursor: usize) {
        let rules = RuleTable::egyptological();
        let (out, adjusted) = rules.rewrite(text, cursor);
        assert!(adjusted <= out.chars().count());
    }

    // ============ Properties over the built-in table ============

    #[test]
    fn test_egyptological_mnemonics() {
        let rules = RuleTable::egyptological();
        let (out, _) = rules.rewrite("h.q", 0);
        assert_eq!(out, "ḥḳ");

        let (out, _) = rules.rewrite("xprt_", 0);
        assert_eq!(out, "ḫprṯ");

        let (out, _) = rules.rewrite("Cat", 0);
        assert_eq!(out, "Ꜥt");
    }

    #[test]
    fn test_digits_become_superscripts() {
        let rules = RuleTable::egyptological();
        let (out, cursor) = rules.rewrite("nb 19", 5);
        assert_eq!(out, "nb ¹⁹");
        assert_eq!(cursor, 5);
    }

    #[test]
    fn test_idempotent_on_fully_substituted_text() {
        let rules = RuleTable::egyptological();
        let (once, cursor) = rules.rewrite("h.tp dj nswt wsjr 42", 20);
        let (twice, _) = rules.rewrite(&once, cursor);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let rules = RuleTable::egyptological();
        let first = rules.rewrite("prt-xrw t_ h.nk.t", 9);
        let second = rules.rewrite("prt-xrw t_ h.nk.t", 9);
        assert_eq!(first, second);
    }
}
