//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of a template name in characters.
pub const MAX_TEMPLATE_NAME_LENGTH: usize = 100;

/// Maximum length of a single tag in characters.
pub const MAX_TAG_LENGTH: usize = 50;

/// Validates that a template name is non-blank and at most 100 characters.
pub fn validate_template_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("name_blank");
        err.message = Some("Template name cannot be empty".into());
        return Err(err);
    }

    if trimmed.chars().count() > MAX_TEMPLATE_NAME_LENGTH {
        let mut err = ValidationError::new("name_length");
        err.message = Some("Template name must be at most 100 characters".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that every tag is non-blank and at most 50 characters.
///
/// Duplicate tags are allowed; tag order is preserved by callers.
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            let mut err = ValidationError::new("tag_blank");
            err.message = Some("Tags cannot be empty".into());
            return Err(err);
        }
        if trimmed.chars().count() > MAX_TAG_LENGTH {
            let mut err = ValidationError::new("tag_length");
            err.message = Some("Tags must be at most 50 characters".into());
            return Err(err);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Template name tests
    #[test]
    fn test_validate_template_name() {
        assert!(validate_template_name("Spring Sale").is_ok());
        assert!(validate_template_name("a").is_ok());
        assert!(validate_template_name("").is_err());
        assert!(validate_template_name("   ").is_err());
    }

    #[test]
    fn test_validate_template_name_length_boundary() {
        let exact = "n".repeat(MAX_TEMPLATE_NAME_LENGTH);
        assert!(validate_template_name(&exact).is_ok());

        let too_long = "n".repeat(MAX_TEMPLATE_NAME_LENGTH + 1);
        assert!(validate_template_name(&too_long).is_err());
    }

    #[test]
    fn test_validate_template_name_counts_characters_not_bytes() {
        // 100 multi-byte characters are still 100 characters
        let name = "é".repeat(MAX_TEMPLATE_NAME_LENGTH);
        assert!(validate_template_name(&name).is_ok());
    }

    #[test]
    fn test_validate_template_name_error_message() {
        let err = validate_template_name("").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Template name cannot be empty"
        );
    }

    // Tag tests
    #[test]
    fn test_validate_tags() {
        assert!(validate_tags(&[]).is_ok());
        assert!(validate_tags(&["q3".to_string(), "retargeting".to_string()]).is_ok());
        assert!(validate_tags(&["".to_string()]).is_err());
        assert!(validate_tags(&["ok".to_string(), " ".to_string()]).is_err());
    }

    #[test]
    fn test_validate_tags_allows_duplicates() {
        assert!(validate_tags(&["q3".to_string(), "q3".to_string()]).is_ok());
    }

    #[test]
    fn test_validate_tags_length_boundary() {
        assert!(validate_tags(&["t".repeat(MAX_TAG_LENGTH)]).is_ok());
        let err = validate_tags(&["t".repeat(MAX_TAG_LENGTH + 1)]).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Tags must be at most 50 characters"
        );
    }
}
