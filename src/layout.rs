// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Line layout: wrapping and alignment
//!
//! [`TextLayout`] arranges a text within a bounding box: it computes where
//! line breaks fall, how wide each wrapped line is, where each line starts
//! horizontally under the alignment policy, and how tall the above-baseline
//! region of each line is.
//!
//! Wrapping is greedy: as many whole words (space-delimited) as fit are
//! packed onto each line, without redistributing space. `'\n'` always breaks
//! a line; spaces at a wrap point are trimmed. This module *does not* perform
//! shaping, kerning, bidirectional re-ordering or hyphenation.

use crate::conv::{to_u32, to_usize};
use crate::fonts::Font;
use crate::{Align, Vec2};
use std::iter::FusedIterator;
use std::ops::Range;

/// A line ready for drawing
///
/// Descriptors are produced on demand by [`TextLayout::lines`]; they are not
/// cached by the layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// Index of the first displayed character
    pub start: u32,
    /// End of the displayed range
    ///
    /// Trailing spaces and the terminating `'\n'` (if any) are excluded.
    pub end: u32,
    /// Committed width of the line in pixels
    pub width: f32,
    /// Horizontal offset of the line's left edge
    pub left: f32,
    /// Height of the line above its baseline
    pub ascent: f32,
}

impl Line {
    /// Displayed byte range within the source text
    #[inline]
    pub fn range(&self) -> Range<usize> {
        to_usize(self.start)..to_usize(self.end)
    }
}

/// Result of scanning a single line
struct LineSpan {
    /// Index of the first displayed character
    start: usize,
    /// End of the displayed range (trailing spaces excluded)
    end: usize,
    /// Where the next line's scan begins
    next: usize,
}

/// Text arranged within a bounding box
///
/// The layout borrows its text and font; it computes over them but never
/// mutates them. Only the horizontal component of `bounds` affects where
/// lines break.
///
/// All queries take a byte index `first` addressing the first character of a
/// line; in well-formed usage such indices come from [`Self::lines`], which
/// walks the whole text. Queries are pure: nothing is cached, so repeated
/// identical calls yield identical results. An index beyond the text length
/// (or not on a character boundary) is treated as an immediate empty line.
pub struct TextLayout<'a, F: Font> {
    font: &'a F,
    text: &'a str,
    bounds: Vec2,
    align: Align,
}

impl<'a, F: Font> TextLayout<'a, F> {
    /// Construct a layout over `text` within a box of size `bounds`
    pub fn new(font: &'a F, text: &'a str, bounds: Vec2, align: Align) -> Self {
        TextLayout {
            font,
            text,
            bounds,
            align,
        }
    }

    /// The text being arranged
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Size of the bounding box
    #[inline]
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Horizontal alignment policy
    #[inline]
    pub fn align(&self) -> Align {
        self.align
    }

    /// Text from `first`, or an empty tail if `first` is not a valid index
    fn tail(&self, first: usize) -> &'a str {
        self.text.get(first..).unwrap_or("")
    }

    /// Compute the width of the text that can be displayed on a line
    ///
    /// Sums the advance of the characters starting from `first`, excluding
    /// spaces at the beginning and the end of the line. The scan stops at a
    /// `'\n'`, at the end of the text, or once the next character no longer
    /// fits; in the last case the line ends on the last word boundary before
    /// the overflow, unless there is none (a single over-wide word), in which
    /// case whatever prefix fits is committed.
    ///
    /// Postcondition: `0 ≤ result ≤ bounds.0`.
    pub fn line_width(&self, first: usize) -> f32 {
        let mut result = 0.0f32;
        let mut candidate = 0.0f32;
        // Set while scanning a run of spaces; any other character clears it.
        let mut in_spaces = false;
        // Set when the scan stops because the next character does not fit.
        let mut full = false;

        // The line begins on the first non-space character.
        for c in self.tail(first).trim_start_matches(' ').chars() {
            if c == '\n' {
                break;
            }
            if c == ' ' {
                if !in_spaces {
                    in_spaces = true;
                    result = candidate;
                }
            } else {
                in_spaces = false;
            }

            let advance = self.font.metrics(c).advance.0;
            if candidate + advance > self.bounds.0 {
                full = true;
                break;
            }
            candidate += advance;
        }

        // If we stopped in the middle of a word or at the end of the line,
        // the result must be adjusted from the candidate width.
        if !in_spaces {
            if !full {
                // The entire scanned span fits on the line.
                result = candidate;
            } else if result == 0.0 {
                // No space to break at: use whatever fits.
                result = candidate;
            }
        }

        debug_assert!(result >= 0.0);
        debug_assert!(result <= self.bounds.0.max(0.0));
        result
    }

    /// Compute the left origin of a line
    ///
    /// Pure function of [`Self::line_width`] and the alignment policy.
    pub fn line_left(&self, first: usize) -> f32 {
        if self.align == Align::Left {
            return 0.0;
        }

        // The remaining space on the line.
        let mut result = self.bounds.0 - self.line_width(first);

        if self.align == Align::Centre {
            result *= 0.5;
        }
        result
    }

    /// Compute the height of a line above its baseline
    ///
    /// This is the maximum `glyph_height + bearing.1` over the characters
    /// examined from `first`, stopping at a `'\n'`, the end of the text, or
    /// the first character whose advance pushes the running width sum over
    /// the box width.
    ///
    /// Note: this scan stops strictly on the width sum, without the
    /// word-boundary back-off of [`Self::line_width`]. For a line ending in a
    /// wrapped partial word the examined span may include characters the
    /// displayed line does not.
    pub fn ascent_height(&self, first: usize) -> f32 {
        let mut result = 0.0f32;
        let mut line_width = 0.0f32;

        for c in self.tail(first).trim_start_matches(' ').chars() {
            if c == '\n' {
                break;
            }

            let m = self.font.metrics(c);
            line_width += m.advance.0;
            if line_width > self.bounds.0 {
                break;
            }
            result = result.max(self.font.glyph_height(c) + m.bearing.1);
        }
        result
    }

    /// Walk the text as a sequence of [`Line`] descriptors
    ///
    /// The iterator is lazy and finite. Each step computes one line via
    /// [`Self::line_width`], [`Self::line_left`] and [`Self::ascent_height`],
    /// then advances past the consumed span (the word moved to the next line
    /// starts it; one terminating `'\n'` is skipped). This is the
    /// renderer-facing surface; the per-line queries need not be called
    /// directly.
    pub fn lines(&self) -> Lines<'_, F> {
        Lines {
            layout: self,
            pos: 0,
        }
    }

    /// Get the number of wrapped lines
    pub fn num_lines(&self) -> usize {
        self.lines().count()
    }

    /// Find the line containing text index `index`
    ///
    /// Returns the line number and the displayed byte range of the line.
    /// When `index` is a wrap point it equals one line's `end` and the next
    /// line's `start`; the later line is the preferred location. Returns
    /// `None` if `index` lies past the last line.
    pub fn find_line(&self, index: usize) -> Option<(usize, Range<usize>)> {
        let mut first = None;
        for (n, line) in self.lines().enumerate() {
            let range = line.range();
            if range.end == index {
                // When wrapping, this also matches the start of the next
                // line, which is the preferred location.
                first = Some((n, range));
            } else if range.contains(&index) {
                return Some((n, range));
            }
        }
        first
    }

    /// Get the displayed range of a line, by line number
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        self.lines().nth(line).map(|line| line.range())
    }

    /// Measure required width, up to some `max_width`
    ///
    /// This is the width requirement of the text without wrapping: only
    /// explicit `'\n'` characters end a line, and trailing spaces do not
    /// count. Whenever the requirement reaches `max_width` the scan stops
    /// early, returning `max_width`.
    ///
    /// The result is unaffected by alignment and box size.
    pub fn measure_width(&self, max_width: f32) -> f32 {
        let mut max_line_len = 0.0f32;
        let mut caret = 0.0;
        let mut line_len = 0.0;

        for c in self.text.chars() {
            if c == '\n' {
                max_line_len = max_line_len.max(line_len);
                caret = 0.0;
                line_len = 0.0;
                continue;
            }

            caret += self.font.metrics(c).advance.0;
            if c != ' ' {
                line_len = caret;
                if line_len >= max_width {
                    return max_width;
                }
            }
        }

        max_line_len.max(line_len)
    }

    /// Scan one line from `first`: displayed span and next start index
    ///
    /// This re-derives the break of [`Self::line_width`] while tracking
    /// indices. `first` must lie on a character boundary (iteration only
    /// produces such indices).
    fn line_span(&self, first: usize) -> LineSpan {
        let tail = self.tail(first);
        let trimmed = tail.trim_start_matches(' ');
        let start = first + (tail.len() - trimmed.len());

        let mut result = 0.0f32;
        let mut candidate = 0.0f32;
        let mut end = start;
        // First space of the current trailing run, if any.
        let mut space_start = None;
        // Start of the word currently being scanned.
        let mut word_start = start;

        for (rel, c) in trimmed.char_indices() {
            let index = start + rel;
            if c == '\n' {
                let end = if space_start.is_some() { end } else { index };
                return LineSpan {
                    start,
                    end,
                    next: index + 1,
                };
            }
            if c == ' ' {
                if space_start.is_none() {
                    space_start = Some(index);
                    end = index;
                    result = candidate;
                }
            } else if space_start.is_some() {
                word_start = index;
                space_start = None;
            }

            let advance = self.font.metrics(c).advance.0;
            if candidate + advance > self.bounds.0 {
                if space_start.is_some() {
                    // Broke within trailing spaces: the next line begins on
                    // the word after the run.
                    return LineSpan {
                        start,
                        end,
                        next: index,
                    };
                }
                if result != 0.0 {
                    // The word being scanned moves entirely to the next line.
                    return LineSpan {
                        start,
                        end,
                        next: word_start,
                    };
                }
                // Forced mid-word break. When not even one character fits
                // (degenerate box), still consume one to guarantee progress.
                let next = if index == start {
                    index + c.len_utf8()
                } else {
                    index
                };
                return LineSpan {
                    start,
                    end: index,
                    next,
                };
            }
            candidate += advance;
        }

        // End of text: the entire span fits.
        let len = self.text.len();
        let end = if space_start.is_some() { end } else { len };
        LineSpan {
            start,
            end,
            next: len,
        }
    }
}

/// Iterator over the lines of a [`TextLayout`]
///
/// Yields [`Line`] descriptors front to back; see [`TextLayout::lines`].
pub struct Lines<'l, F: Font> {
    layout: &'l TextLayout<'l, F>,
    pos: usize,
}

impl<'l, F: Font> Iterator for Lines<'l, F> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if self.pos >= self.layout.text.len() {
            return None;
        }

        let span = self.layout.line_span(self.pos);
        let width = self.layout.line_width(span.start);
        let left = self.layout.line_left(span.start);
        let ascent = self.layout.ascent_height(span.start);

        debug_assert!(span.next > self.pos);
        self.pos = span.next;

        Some(Line {
            start: to_u32(span.start),
            end: to_u32(span.end),
            width,
            left,
            ascent,
        })
    }
}

impl<'l, F: Font> FusedIterator for Lines<'l, F> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GlyphMetrics;

    // Fixed-advance font: every glyph (spaces included) is 10 wide.
    // Capitals are 14 tall; descenders reach 4 below the baseline.
    struct TestFont;

    impl Font for TestFont {
        fn metrics(&self, c: char) -> GlyphMetrics {
            let bearing = match c {
                'g' | 'p' | 'q' | 'y' => Vec2(0.0, -4.0),
                _ => Vec2::ZERO,
            };
            GlyphMetrics {
                advance: Vec2(10.0, 0.0),
                bearing,
            }
        }

        fn glyph_height(&self, c: char) -> f32 {
            match c {
                ' ' => 0.0,
                'A'..='Z' => 14.0,
                'g' | 'p' | 'q' | 'y' => 12.0,
                _ => 8.0,
            }
        }
    }

    fn wrap(text: &str, width: f32, align: Align) -> TextLayout<'_, TestFont> {
        static FONT: TestFont = TestFont;
        TextLayout::new(&FONT, text, Vec2(width, 100.0), align)
    }

    #[test]
    fn postcondition_bound() {
        for text in ["hello world", "  a  ", "extremelylongword", "ab\ncd", ""] {
            for width in [0.0, 25.0, 50.0, 1000.0] {
                let layout = wrap(text, width, Align::Left);
                for first in 0..=text.len() {
                    let result = layout.line_width(first);
                    assert!(result >= 0.0);
                    assert!(result <= width);
                }
            }
        }
    }

    #[test]
    fn idempotence() {
        let layout = wrap("hello world", 50.0, Align::Centre);
        for first in [0, 6] {
            assert_eq!(layout.line_width(first), layout.line_width(first));
            assert_eq!(layout.line_left(first), layout.line_left(first));
            assert_eq!(layout.ascent_height(first), layout.ascent_height(first));
        }
    }

    #[test]
    fn align_left_identity() {
        let layout = wrap("hello world", 50.0, Align::Left);
        for first in 0..=11 {
            assert_eq!(layout.line_left(first), 0.0);
        }
    }

    #[test]
    fn align_right() {
        let layout = wrap("ab", 100.0, Align::Right);
        assert_eq!(layout.line_left(0), 80.0);
    }

    #[test]
    fn align_centre_symmetry() {
        let centre = wrap("ab", 100.0, Align::Centre);
        let right = wrap("ab", 100.0, Align::Right);
        assert_eq!(centre.line_left(0), 0.5 * right.line_left(0));
    }

    #[test]
    fn trailing_space_trimming() {
        let layout = wrap("ab cd   ", 200.0, Align::Left);
        // Only "ab cd" counts towards the width.
        assert_eq!(layout.line_width(0), 50.0);

        let lines: Vec<_> = layout.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].range(), 0..5);
    }

    #[test]
    fn greedy_word_boundary() {
        // The box is exactly wide enough for "hello".
        let layout = wrap("hello world", 50.0, Align::Left);
        assert_eq!(layout.line_width(0), 50.0);

        let lines: Vec<_> = layout.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].range(), 0..5);
        // The next line starts on the 'w'; the wrap space is consumed.
        assert_eq!(lines[1].range(), 6..11);
        assert_eq!(lines[1].width, 50.0);
    }

    #[test]
    fn mid_word_forced_break() {
        let layout = wrap("extremelylongword", 45.0, Align::Left);
        // No word boundary fits: a 4-character prefix is committed anyway.
        assert_eq!(layout.line_width(0), 40.0);

        let lines: Vec<_> = layout.lines().collect();
        let starts: Vec<_> = lines.iter().map(|line| line.start).collect();
        assert_eq!(starts, [0, 4, 8, 12, 16]);
        assert_eq!(lines[4].width, 10.0);
    }

    #[test]
    fn wrapped_word_moves_entirely() {
        // "wo" fits after "hello ", but the whole word wraps.
        let layout = wrap("hello world", 80.0, Align::Left);
        assert_eq!(layout.line_width(0), 50.0);

        let lines: Vec<_> = layout.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].range(), 6..11);
    }

    #[test]
    fn newline_precedence() {
        let layout = wrap("ab\ncd", 200.0, Align::Left);
        let lines: Vec<_> = layout.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].range(), 0..2);
        assert_eq!(lines[0].width, 20.0);
        assert_eq!(lines[1].range(), 3..5);
        assert_eq!(lines[1].width, 20.0);
    }

    #[test]
    fn empty_line_between_newlines() {
        let layout = wrap("ab\n\ncd", 200.0, Align::Left);
        let lines: Vec<_> = layout.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].range(), 3..3);
        assert_eq!(lines[1].width, 0.0);
    }

    #[test]
    fn empty_tail_termination() {
        let layout = wrap("    ", 200.0, Align::Left);
        assert_eq!(layout.line_width(0), 0.0);

        let lines: Vec<_> = layout.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].width, 0.0);
        assert_eq!(lines[0].range(), 4..4);
    }

    #[test]
    fn ascent_tallest_character() {
        let layout = wrap("Ag", 200.0, Align::Left);
        // 'A' is 14 above the baseline; 'g' only 8 (12 high, bearing -4).
        assert_eq!(layout.ascent_height(0), 14.0);

        let layout = wrap("gy", 200.0, Align::Left);
        assert_eq!(layout.ascent_height(0), 8.0);
    }

    #[test]
    fn ascent_skips_leading_spaces() {
        let layout = wrap("  Ag", 200.0, Align::Left);
        assert_eq!(layout.ascent_height(0), 14.0);
    }

    // Pins the intended divergence between the width and ascent scans: the
    // ascent scan has no word-boundary back-off, so it examines characters
    // of a wrapped partial word which the displayed line does not contain.
    #[test]
    fn ascent_includes_wrapped_partial_word() {
        let layout = wrap("aa AA", 45.0, Align::Left);
        assert_eq!(layout.line_width(0), 20.0);
        let line = layout.lines().next().unwrap();
        assert_eq!(line.range(), 0..2);
        // The first 'A' still fits under the running width sum.
        assert_eq!(layout.ascent_height(0), 14.0);
        assert_eq!(line.ascent, 14.0);
    }

    #[test]
    fn first_out_of_range() {
        let layout = wrap("abc", 200.0, Align::Left);
        assert_eq!(layout.line_width(1000), 0.0);
        assert_eq!(layout.ascent_height(1000), 0.0);

        // Not a character boundary: also an empty line.
        let layout = wrap("é", 200.0, Align::Left);
        assert_eq!(layout.line_width(1), 0.0);
        assert_eq!(layout.ascent_height(1), 0.0);
    }

    #[test]
    fn zero_width_box() {
        let layout = wrap("abc", 0.0, Align::Left);
        assert_eq!(layout.line_width(0), 0.0);
        assert_eq!(layout.ascent_height(0), 0.0);

        // One character is consumed per step so iteration terminates.
        let lines: Vec<_> = layout.lines().collect();
        let starts: Vec<_> = lines.iter().map(|line| line.start).collect();
        assert_eq!(starts, [0, 1, 2]);
        assert!(lines.iter().all(|line| line.width == 0.0));
    }

    #[test]
    fn line_left_per_line() {
        let layout = wrap("hello world", 50.0, Align::Right);
        let lines: Vec<_> = layout.lines().collect();
        assert_eq!(lines[0].left, 0.0);
        assert_eq!(lines[1].left, 0.0);

        let layout = wrap("hello hi", 50.0, Align::Right);
        let lines: Vec<_> = layout.lines().collect();
        assert_eq!(lines[0].left, 0.0);
        assert_eq!(lines[1].left, 30.0);
    }

    #[test]
    fn find_line_prefers_next_start() {
        let layout = wrap("hello world", 50.0, Align::Left);
        assert_eq!(layout.find_line(0), Some((0, 0..5)));
        assert_eq!(layout.find_line(5), Some((0, 0..5)));
        assert_eq!(layout.find_line(6), Some((1, 6..11)));
        assert_eq!(layout.find_line(11), Some((1, 6..11)));
        assert_eq!(layout.find_line(12), None);
    }

    #[test]
    fn line_lookup() {
        let layout = wrap("ab\ncd", 200.0, Align::Left);
        assert_eq!(layout.num_lines(), 2);
        assert_eq!(layout.line_range(0), Some(0..2));
        assert_eq!(layout.line_range(1), Some(3..5));
        assert_eq!(layout.line_range(2), None);
    }

    #[test]
    fn measure_width_hard_breaks_only() {
        let layout = wrap("ab cd\nxyz ", 30.0, Align::Left);
        // Measurement ignores wrapping; trailing spaces do not count.
        assert_eq!(layout.measure_width(1000.0), 50.0);
        assert_eq!(layout.measure_width(20.0), 20.0);
    }
}
