//! Wrapping helpers and dimensions shared by the input box and its cursor.

/// Border (2) + one column of padding on each side
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Distance from the area edge to the first text cell
pub(super) const BORDER_OFFSET: u16 = 1;

/// textwrap options matching how the draft is laid out on screen.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Usable text width inside the bordered box; 0 when the box is too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Line and column counts beyond `u16::MAX` saturate.
pub(super) fn saturating_count(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// Number of screen lines `text` occupies at `width`. Always at least 1 so
/// an empty draft still reserves its line.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }

    let lines = textwrap::wrap(text, wrap_options(width));
    let mut count = saturating_count(lines.len()).max(1);

    // A trailing newline opens a line that textwrap may leave out
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        count = count.saturating_add(1);
    }

    count
}

/// Byte offset of the char boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the char boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_degenerate_widths_take_one_line() {
        assert_eq!(wrap_line_count("", 40), 1);
        assert_eq!(wrap_line_count("anything", 0), 1);
    }

    #[test]
    fn long_words_are_broken() {
        assert_eq!(wrap_line_count("abcdefghijkl", 4), 3);
    }

    #[test]
    fn explicit_and_trailing_newlines_count() {
        assert_eq!(wrap_line_count("one\ntwo", 40), 2);
        assert_eq!(wrap_line_count("one\n", 40), 2);
        assert_eq!(wrap_line_count("abcdefgh\n", 4), 3);
    }

    #[test]
    fn huge_drafts_saturate_instead_of_wrapping() {
        let draft = "x\n".repeat(usize::from(u16::MAX) + 2);
        assert_eq!(wrap_line_count(&draft, 40), u16::MAX);
        assert_eq!(saturating_count(70_000), u16::MAX);
    }

    #[test]
    fn inner_width_saturates() {
        assert_eq!(inner_width(3), 0);
        assert_eq!(inner_width(44), 40);
    }

    #[test]
    fn char_boundaries_respect_multibyte() {
        // "né🙂" = n(1) é(2) 🙂(4)
        let s = "né🙂";
        assert_eq!(next_char_boundary(s, 0), 1);
        assert_eq!(next_char_boundary(s, 1), 3);
        assert_eq!(next_char_boundary(s, 3), 7);
        assert_eq!(next_char_boundary(s, 7), 7);

        assert_eq!(prev_char_boundary(s, 7), 3);
        assert_eq!(prev_char_boundary(s, 3), 1);
        assert_eq!(prev_char_boundary(s, 1), 0);
    }
}
