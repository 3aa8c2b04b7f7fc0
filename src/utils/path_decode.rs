use std::borrow::Cow;

/// Percent-decode one path segment. Invalid UTF-8 sequences leave the raw segment untouched.
pub fn decode_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains('%') {
        return Cow::Borrowed(segment);
    }
    match urlencoding::decode(segment) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Borrowed(segment),
    }
}
