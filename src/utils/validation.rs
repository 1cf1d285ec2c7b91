use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
    })
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // E.164-ish: optional + followed by 7-15 digits
    RE.get_or_init(|| Regex::new(r"^\+?[0-9]{7,15}$").unwrap())
}

pub fn validate_email(email: &str) -> AppResult<()> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(AppError::ValidationError(
            "Invalid email address".to_string(),
        ))
    }
}

pub fn validate_phone(phone: &str) -> AppResult<()> {
    if phone_regex().is_match(phone) {
        Ok(())
    } else {
        Err(AppError::ValidationError(
            "Invalid phone number".to_string(),
        ))
    }
}

pub fn validate_display_name(name: &str) -> AppResult<()> {
    let len = name.trim().chars().count();
    if !(2..=50).contains(&len) {
        return Err(AppError::ValidationError(
            "Display name must be between 2 and 50 characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("j.doe+spa@mail.co.uk").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+12025550123").is_ok());
        assert!(validate_phone("2025550123").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("abc1234567").is_err());
    }

    #[test]
    fn test_validate_display_name() {
        assert!(validate_display_name("Jane").is_ok());
        assert!(validate_display_name("J").is_err());
        assert!(validate_display_name(&"x".repeat(51)).is_err());
    }
}
