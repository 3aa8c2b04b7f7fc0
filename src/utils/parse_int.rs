/// Parse an optional unsigned integer from a string
pub fn parse_optional_u64(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| {
        let t = v.trim();
        if t.is_empty() {
            None
        } else {
            t.parse::<u64>().ok()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_u64() {
        assert_eq!(parse_optional_u64(Some(" 42 ")), Some(42));
        assert_eq!(parse_optional_u64(Some("")), None);
        assert_eq!(parse_optional_u64(Some("-1")), None);
        assert_eq!(parse_optional_u64(None), None);
    }
}
