use anyhow::{Context, Result};

const MIN_LEN: usize = 8;
const MAX_LEN: usize = 128;
const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Checks a candidate password against the strength policy.
///
/// Requirements: 8..=128 chars, at least one uppercase letter, one
/// lowercase letter, one digit, and one special character.
/// Returns the first violated requirement as the error message.
pub fn validate_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_LEN {
        return Err(format!(
            "Password must be at least {MIN_LEN} characters long"
        ));
    }
    if password.chars().count() > MAX_LEN {
        return Err(format!(
            "Password must be no more than {MAX_LEN} characters long"
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter (A-Z)".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain at least one lowercase letter (a-z)".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit (0-9)".to_string());
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(
            "Password must contain at least one special character (!@#$%^&*() etc.)".to_string(),
        );
    }
    Ok(())
}

/// Hashes a password with bcrypt (per-record salt baked into the hash).
pub fn hash(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).context("Failed to hash password")
}

/// Verifies a password against a stored bcrypt hash.
pub fn verify(password: &str, hashed: &str) -> Result<bool> {
    bcrypt::verify(password, hashed).context("Failed to verify password")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password_passes() {
        assert!(validate_strength("Str0ng!pass").is_ok());
    }

    #[test]
    fn test_too_short_rejected() {
        let err = validate_strength("A1!a").unwrap_err();
        assert!(err.contains("at least 8"));
    }

    #[test]
    fn test_too_long_rejected() {
        let long = format!("Aa1!{}", "x".repeat(130));
        let err = validate_strength(&long).unwrap_err();
        assert!(err.contains("no more than 128"));
    }

    #[test]
    fn test_missing_uppercase_rejected() {
        let err = validate_strength("weak1pass!").unwrap_err();
        assert!(err.contains("uppercase"));
    }

    #[test]
    fn test_missing_lowercase_rejected() {
        let err = validate_strength("WEAK1PASS!").unwrap_err();
        assert!(err.contains("lowercase"));
    }

    #[test]
    fn test_missing_digit_rejected() {
        let err = validate_strength("Weakpass!").unwrap_err();
        assert!(err.contains("digit"));
    }

    #[test]
    fn test_missing_special_rejected() {
        let err = validate_strength("Weak1pass").unwrap_err();
        assert!(err.contains("special character"));
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hashed = hash("Str0ng!pass").unwrap();
        assert!(verify("Str0ng!pass", &hashed).unwrap());
        assert!(!verify("Wr0ng!pass", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash("Str0ng!pass").unwrap();
        let b = hash("Str0ng!pass").unwrap();
        assert_ne!(a, b);
    }
}
