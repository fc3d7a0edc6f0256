//! Community volunteer models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A community volunteer contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Volunteer {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Area is required"))]
    pub area: String,
    /// Free-form contact; short numbers like `112` are valid
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
}

impl Volunteer {
    /// Build a volunteer with surrounding whitespace trimmed from every field
    pub fn new(name: &str, area: &str, phone: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            area: area.trim().to_string(),
            phone: phone.trim().to_string(),
        }
    }
}
