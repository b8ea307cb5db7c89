//! Request path normalization and case-insensitive comparison helpers.

use percent_encoding::{percent_decode_str, percent_encode_byte};
use std::borrow::Cow;

/// Percent-decodes a request path so it can be compared with rule paths.
///
/// Falls back to the raw path when the decoded bytes are not valid UTF-8.
pub fn decode_path(path: &str) -> Cow<'_, str> {
    percent_decode_str(path)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(path))
}

/// Percent-encodes non-ASCII bytes and spaces in a redirect target.
///
/// Everything else, including existing `%XX` escapes and control
/// characters, is left as is.
pub fn encode_location(target: &str) -> Cow<'_, str> {
    if target.bytes().all(|b| b.is_ascii() && b != b' ') {
        return Cow::Borrowed(target);
    }

    let mut out = String::with_capacity(target.len() + 16);
    for b in target.bytes() {
        if b.is_ascii() && b != b' ' {
            out.push(char::from(b));
        } else {
            out.push_str(percent_encode_byte(b));
        }
    }

    Cow::Owned(out)
}

/// Collapses every run of consecutive `/` into a single separator.
///
/// Paths that contain no doubled separator are returned borrowed. The
/// operation is idempotent.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(collapse_separators("//a//b"), "/a/b");
/// assert_eq!(collapse_separators("/a/b"), "/a/b");
/// ```
pub fn collapse_separators(path: &str) -> Cow<'_, str> {
    if !path.contains("//") {
        return Cow::Borrowed(path);
    }

    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(c);
    }

    Cow::Owned(out)
}

/// Strips `prefix` from the start of `path`, ignoring case.
///
/// Returns the remainder of `path` (with its original casing) on success.
/// A prefix longer than the path never matches.
pub fn strip_prefix_ignore_case<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.len() > path.len() {
        return None;
    }

    let mut chars = path.char_indices();
    let mut end = 0;
    for expected in prefix.chars() {
        let (idx, actual) = chars.next()?;
        if !chars_eq_ignore_case(actual, expected) {
            return None;
        }
        end = idx + actual.len_utf8();
    }

    Some(&path[end..])
}

/// Full-string comparison ignoring case.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    strip_prefix_ignore_case(a, b).is_some_and(str::is_empty)
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
