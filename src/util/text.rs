use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// CJK characters and most emoji occupy two columns, combining marks zero.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncates a string to fit within `max_width` terminal columns, appending
/// "..." when text was cut. Width accounting is Unicode-aware so wide
/// characters never push the result past the limit.
///
/// Returns `Cow::Borrowed` when the string already fits.
///
/// ```
/// use headliner::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("Test", 2), "Te");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    // Too narrow for text plus ellipsis: return the characters that fit
    let budget = if max_width <= ELLIPSIS_WIDTH {
        max_width
    } else {
        max_width - ELLIPSIS_WIDTH
    };

    let mut width = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        end = idx + c.len_utf8();
    }

    if max_width <= ELLIPSIS_WIDTH {
        Cow::Owned(s[..end].to_string())
    } else {
        Cow::Owned(format!("{}{}", &s[..end], ELLIPSIS))
    }
}

/// Flattens feed-sourced text into a single safe terminal line.
///
/// Feed titles and snippets come from remote servers and may carry control
/// characters or escape sequences that would corrupt the terminal. This
/// drops ASCII control characters (including ESC, which kills any ANSI
/// sequence at its root since the terminal never sees the introducer) and
/// folds all whitespace runs into single spaces.
///
/// Returns `Cow::Borrowed` for already-clean single-line input.
pub fn sanitize_line(s: &str) -> Cow<'_, str> {
    let clean = !s
        .chars()
        .any(|c| c.is_control() || (c.is_whitespace() && c != ' '));
    if clean && !s.contains("  ") {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut last_was_space = true; // also trims leading whitespace
    for c in s.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else if !c.is_control() {
            out.push(c);
            last_was_space = false;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    Cow::Owned(out)
}
