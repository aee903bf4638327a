//! Greedy word wrap.
//!
//! All three functions are pure and operate on plain text (style escapes
//! already stripped). Columns are counted in chars. A line breaks at `\n` or,
//! once it is full, at the most recent space; the space itself is consumed by
//! the break. A word that cannot be broken this way makes the text
//! unwrappable at that width.

use thiserror::Error;

/// A word is wider than the available width.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("word too wide to wrap")]
pub struct WrapImpossible;

/// Number of lines `text` occupies when wrapped to `width` columns.
///
/// Empty text or zero width occupy no lines.
pub fn wrapped_height(text: &str, width: usize) -> Result<usize, WrapImpossible> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() || width == 0 {
        return Ok(0);
    }

    let mut height = 1;
    let mut x = 0;
    let mut space = 0;
    let mut last_space = 0;

    let mut index = 0;
    while index < chars.len() {
        let ch = chars[index];
        if ch == ' ' {
            space = index;
        }

        if ch == '\n' {
            x = 0;
            height += 1;
        } else if x >= width {
            x = 0;
            height += 1;
            if space == last_space {
                return Err(WrapImpossible);
            }
            index = space;
            last_space = space;
        } else {
            x += 1;
        }
        index += 1;
    }

    Ok(height)
}

/// Smallest width at which `text` wraps into at most `max_height` lines.
///
/// Binary search over `1..=len`. If no width satisfies the bound, the full
/// length is returned.
pub fn minimal_width(text: &str, max_height: usize) -> usize {
    let len = text.chars().count();
    let mut left = 1;
    let mut right = len;
    let mut best = len;

    while left <= right {
        let mid = (left + right) / 2;
        match wrapped_height(text, mid) {
            Ok(height) if height <= max_height => {
                best = mid;
                right = mid - 1;
            }
            _ => left = mid + 1,
        }
    }

    best
}

/// Visible column count of each line when `text` is wrapped into `height`
/// lines at its [`minimal_width`].
pub fn line_widths(text: &str, height: usize) -> Vec<usize> {
    let mut widths = vec![0; height];
    if height == 0 {
        return widths;
    }

    let width = minimal_width(text, height);
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let mut y = 0;
    let mut x = 0;
    let mut space = 0;

    let mut index = 0;
    while index < len && y < height {
        let ch = chars[index];
        if ch == ' ' {
            space = index;
        }

        if ch == '\n' {
            widths[y] = x;
            y += 1;
            x = 0;
        } else if x >= width {
            // Full line minus the partial word carried to the next line.
            widths[y] = x.saturating_sub(index - space);
            y += 1;
            x = 0;
            index = space;
        } else {
            x += 1;
        }

        if index + 1 == len && y < height {
            widths[y] = x;
        }
        index += 1;
    }

    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hello_world_wraps_at_five() {
        assert_eq!(wrapped_height("hello world", 5), Ok(2));
        assert_eq!(line_widths("hello world", 2), vec![5, 5]);
    }

    #[test]
    fn long_word_is_impossible() {
        assert_eq!(wrapped_height("hello world", 4), Err(WrapImpossible));
    }

    #[test]
    fn empty_or_zero_width_has_no_lines() {
        assert_eq!(wrapped_height("", 10), Ok(0));
        assert_eq!(wrapped_height("abc", 0), Ok(0));
    }

    #[test]
    fn fits_on_one_line() {
        assert_eq!(wrapped_height("hello world", 11), Ok(1));
        assert_eq!(wrapped_height("hello world", 80), Ok(1));
        assert_eq!(line_widths("hello world", 1), vec![11]);
    }

    #[test]
    fn newlines_force_breaks() {
        assert_eq!(wrapped_height("ab\ncd", 10), Ok(2));
        assert_eq!(line_widths("ab\ncd", 2), vec![2, 2]);
        assert_eq!(wrapped_height("a\n\nb", 10), Ok(3));
        assert_eq!(line_widths("a\n\nb", 3), vec![1, 0, 1]);
    }

    #[test]
    fn three_words_two_lines() {
        // "one two" fits in 7, "three" goes below.
        assert_eq!(wrapped_height("one two three", 7), Ok(2));
        assert_eq!(minimal_width("one two three", 2), 7);
        assert_eq!(line_widths("one two three", 2), vec![7, 5]);
    }

    #[test]
    fn minimal_width_prefers_smallest() {
        assert_eq!(minimal_width("hello world", 1), 11);
        assert_eq!(minimal_width("hello world", 2), 5);
        assert_eq!(minimal_width("hello world", 5), 5);
    }

    #[test]
    fn minimal_width_round_trips() {
        for text in ["a bb ccc dddd", "lorem ipsum dolor sit amet", "x\ny z", "single"] {
            for h in 1..6 {
                let w = minimal_width(text, h);
                if let Ok(height) = wrapped_height(text, w) {
                    assert!(height <= h || w == text.chars().count(), "{text:?} h={h}");
                }
            }
        }
    }

    #[test]
    fn height_is_non_increasing_in_width() {
        let text = "the quick brown fox jumps over the lazy dog";
        let mut previous = usize::MAX;
        for w in 1..=text.len() + 2 {
            match wrapped_height(text, w) {
                Ok(h) => {
                    assert!(h > 0);
                    assert!(h <= previous, "width {w}: {h} > {previous}");
                    previous = h;
                }
                Err(WrapImpossible) => assert_eq!(previous, usize::MAX),
            }
        }
    }

    #[test]
    fn line_widths_never_exceed_height() {
        let widths = line_widths("a b c d e f", 3);
        assert_eq!(widths.len(), 3);
        assert!(widths.iter().all(|&w| w <= minimal_width("a b c d e f", 3)));
    }

    #[test]
    fn zero_height_gives_no_widths() {
        assert!(line_widths("abc", 0).is_empty());
    }
}
