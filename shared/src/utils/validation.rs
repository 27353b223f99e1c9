//! Common validation utilities

/// Check that a provided code is exactly `length` ASCII digits
pub fn is_valid_code(code: &str, length: usize) -> bool {
    code.len() == length && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("012345", 6));
        assert!(is_valid_code("0000", 4));

        assert!(!is_valid_code("12345", 6));
        assert!(!is_valid_code("1234567", 6));
        assert!(!is_valid_code("12345a", 6));
        assert!(!is_valid_code(" 12345", 6));
        assert!(!is_valid_code("١٢٣٤٥٦", 6));
    }
}
