use memchr::memmem;

/// Finds `needle` in `haystack` at or after `from`, returning the absolute index.
pub(crate) fn find_bytes_from(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)
        .and_then(|tail| memmem::find(tail, needle))
        .map(|idx| idx + from)
}

/// Finds `needle` in `haystack` at or after `from`, returning the absolute index.
pub(crate) fn find_str_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    find_bytes_from(haystack.as_bytes(), needle.as_bytes(), from)
}

/// Returns the text between `marker` and the next closing quote after it.
///
/// The outer `Option` is `None` when the marker is absent; the inner one is
/// `None` when the quote is never closed.
pub(crate) fn quoted_attribute<'a>(headers: &'a str, marker: &str) -> Option<Option<&'a str>> {
    let start = find_str_from(headers, marker, 0)? + marker.len();

    Some(find_str_from(headers, crate::constants::QUOTE, start).map(|end| &headers[start..end]))
}
