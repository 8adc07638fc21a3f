//! Common validation utilities used by `validator` derives.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::password::password_violations;

/// Maximum number of tags on an event.
pub const MAX_TAGS: usize = 10;

/// Maximum length of a single tag.
pub const MAX_TAG_LENGTH: usize = 30;

lazy_static! {
    // "14:30", "9:05", "10:00 AM", "7:30pm"
    static ref TIME_OF_DAY: Regex =
        Regex::new(r"^(?i)(([01]?\d|2[0-3]):[0-5]\d|(0?[1-9]|1[0-2]):[0-5]\d\s?(am|pm))$").unwrap();
    static ref PHONE: Regex = Regex::new(r"^\+?[0-9()\-\s]{7,20}$").unwrap();
    static ref WEB_URL: Regex = Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap();
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Validates password strength (length and character classes).
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    match password_violations(password).into_iter().next() {
        None => Ok(()),
        Some(message) => Err(error("password_strength", message)),
    }
}

fn trimmed_len_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.trim().chars().count();
    (min..=max).contains(&len)
}

/// Validates a person's display name, ignoring surrounding whitespace.
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    if trimmed_len_between(name, 2, 100) {
        Ok(())
    } else {
        Err(error("name_length", "Name must be 2-100 characters"))
    }
}

/// Validates a feedback comment, ignoring surrounding whitespace.
pub fn validate_feedback_comment(comment: &str) -> Result<(), ValidationError> {
    if trimmed_len_between(comment, 10, 500) {
        Ok(())
    } else {
        Err(error("comment_length", "Comment must be 10-500 characters"))
    }
}

/// Validates a wall-clock time such as `14:30` or `10:00 AM`.
pub fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    if TIME_OF_DAY.is_match(value.trim()) {
        Ok(())
    } else {
        Err(error(
            "time_format",
            "Time must look like 14:30 or 10:00 AM",
        ))
    }
}

/// Validates a contact phone number.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if PHONE.is_match(value) {
        Ok(())
    } else {
        Err(error("phone_format", "Invalid phone number"))
    }
}

/// Validates a website: either empty or an http(s) URL.
pub fn validate_website(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || WEB_URL.is_match(value) {
        Ok(())
    } else {
        Err(error("website_format", "Website must be a valid URL"))
    }
}

/// Validates an event tag list.
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(error("too_many_tags", "At most 10 tags are allowed"));
    }
    if tags
        .iter()
        .any(|t| t.trim().is_empty() || t.chars().count() > MAX_TAG_LENGTH)
    {
        return Err(error("tag_length", "Tags must be 1-30 characters"));
    }
    Ok(())
}

/// Canonical form of an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_strength() {
        assert!(validate_password_strength("Campus#2024").is_ok());

        let err = validate_password_strength("short").unwrap_err();
        assert_eq!(err.code, "password_strength");
        assert_eq!(
            err.message.unwrap().to_string(),
            "Password must be at least 8 characters"
        );
    }

    #[test]
    fn test_display_name_ignores_padding() {
        assert!(validate_display_name("Abebe Kebede").is_ok());
        assert!(validate_display_name("  Al  ").is_ok());
        assert!(validate_display_name("   a").is_err());
        assert!(validate_display_name("     ").is_err());
        assert!(validate_display_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_feedback_comment_ignores_padding() {
        assert!(validate_feedback_comment("Well organized talk").is_ok());
        assert_eq!(
            validate_feedback_comment("           ok").unwrap_err().code,
            "comment_length"
        );
        assert!(validate_feedback_comment(&format!("{}   ", "x".repeat(500))).is_ok());
        assert!(validate_feedback_comment(&"x".repeat(501)).is_err());
    }

    #[test]
    fn test_time_of_day_24h() {
        assert!(validate_time_of_day("14:30").is_ok());
        assert!(validate_time_of_day("9:05").is_ok());
        assert!(validate_time_of_day("00:00").is_ok());
        assert!(validate_time_of_day("24:00").is_err());
        assert!(validate_time_of_day("12:60").is_err());
    }

    #[test]
    fn test_time_of_day_12h() {
        assert!(validate_time_of_day("10:00 AM").is_ok());
        assert!(validate_time_of_day("7:30pm").is_ok());
        assert!(validate_time_of_day("13:00 PM").is_err());
        assert!(validate_time_of_day("noon").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("+251 911 123 456").is_ok());
        assert!(validate_phone("123-456-7890").is_ok());
        assert!(validate_phone("12").is_err());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_website() {
        assert!(validate_website("").is_ok());
        assert!(validate_website("https://example.edu/profile").is_ok());
        assert!(validate_website("ftp://example.edu").is_err());
        assert!(validate_website("example.edu").is_err());
    }

    #[test]
    fn test_tags() {
        assert!(validate_tags(&[]).is_ok());
        assert!(validate_tags(&["tech".to_string(), "ai".to_string()]).is_ok());
        assert!(validate_tags(&["".to_string()]).is_err());
        assert!(validate_tags(&["x".repeat(31)]).is_err());

        let many: Vec<String> = (0..11).map(|i| format!("tag{}", i)).collect();
        assert_eq!(validate_tags(&many).unwrap_err().code, "too_many_tags");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Student@Uni.EDU "), "student@uni.edu");
    }
}
