pub const MIN_USERNAME_LEN: usize = 4;
pub const MAX_USERNAME_LEN: usize = 30;

/// 4-30 characters drawn from ASCII letters, digits, `.`, `_` and `-`.
#[must_use]
pub fn is_valid_username(username: &str) -> bool {
    (MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Lookup key for a username: trimmed and lowercased.
#[must_use]
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_format() {
        assert!(is_valid_username("john_doe"));
        assert!(is_valid_username("user.name"));
        assert!(is_valid_username("user-name123"));
        assert!(is_valid_username(&"a".repeat(30)));

        assert!(!is_valid_username("abc"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username(&"a".repeat(31)));
        assert!(!is_valid_username("user name"));
        assert!(!is_valid_username("user@name"));
        assert!(!is_valid_username("user#name"));
        assert!(!is_valid_username("ผู้ใช้งาน"));
    }

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("  John.Doe "), "john.doe");
        assert_eq!(normalize_username("ALICE"), "alice");
    }
}
