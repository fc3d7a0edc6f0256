//! Validation utilities for user-submitted input

use validator::Validate;

use crate::models::Volunteer;

// ============================================================================
// Free-text submissions
// ============================================================================

/// Validate a flood report and return it trimmed
pub fn validate_report_text(text: &str) -> Result<&str, &'static str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("Please enter a report.");
    }
    Ok(trimmed)
}

/// Validate app feedback and return it trimmed
pub fn validate_feedback_text(text: &str) -> Result<&str, &'static str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("Write feedback first");
    }
    Ok(trimmed)
}

// ============================================================================
// Contacts
// ============================================================================

/// Validate a volunteer, returning the first failing field and its message
pub fn validate_volunteer(volunteer: &Volunteer) -> Result<(), (String, String)> {
    volunteer.validate().map_err(|errors| {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        fields
            .into_iter()
            .find_map(|(field, errs)| {
                errs.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", field));
                    (field.to_string(), message)
                })
            })
            .unwrap_or_else(|| ("volunteer".to_string(), "Invalid volunteer".to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_text_is_trimmed() {
        assert_eq!(validate_report_text("  Water rising \n"), Ok("Water rising"));
        assert_eq!(validate_report_text("   "), Err("Please enter a report."));
    }

    #[test]
    fn test_feedback_requires_text() {
        assert_eq!(validate_feedback_text(""), Err("Write feedback first"));
        assert_eq!(validate_feedback_text("Great app"), Ok("Great app"));
    }

    #[test]
    fn test_volunteer_requires_every_field() {
        let ok = Volunteer::new("Asha", "Ward 5", "9876543210");
        assert!(validate_volunteer(&ok).is_ok());

        let missing_area = Volunteer::new("Asha", "  ", "9876543210");
        let (field, message) = validate_volunteer(&missing_area).unwrap_err();
        assert_eq!(field, "area");
        assert_eq!(message, "Area is required");
    }

    #[test]
    fn test_volunteer_phone_is_free_form() {
        for phone in ["112", "12345", "ext. 204", "+91 98765 43210"] {
            let volunteer = Volunteer::new("Ravi", "Ward 2", phone);
            assert!(validate_volunteer(&volunteer).is_ok(), "{phone} rejected");
        }

        let (field, message) =
            validate_volunteer(&Volunteer::new("Ravi", "Ward 2", " ")).unwrap_err();
        assert_eq!(field, "phone");
        assert_eq!(message, "Phone is required");
    }

    #[test]
    fn test_long_names_are_accepted() {
        let name = "A".repeat(101);
        assert!(validate_volunteer(&Volunteer::new(&name, "Ward 2", "112")).is_ok());
    }
}
