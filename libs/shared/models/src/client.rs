use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_PHONE_LENGTH: usize = 25;

/// A scheduling client. `external_id` is the stable key correlating this
/// row with its counterpart in the external system of record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub external_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validate client fields, accumulating every violation rather than
/// stopping at the first.
pub fn validate_client_fields(name: &str, email: &str, phone: Option<&str>) -> Vec<String> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push("Name can't be blank".to_string());
    }

    if email.trim().is_empty() {
        errors.push("Email can't be blank".to_string());
    }
    if !is_valid_email(email) {
        errors.push("Email is invalid".to_string());
    }

    if let Some(phone) = phone {
        if phone.len() > MAX_PHONE_LENGTH {
            errors.push(format!(
                "Phone is too long (maximum is {} characters)",
                MAX_PHONE_LENGTH
            ));
        }
    }

    errors
}

fn is_valid_email(email: &str) -> bool {
    let email_regex = Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").unwrap();
    email_regex.is_match(email) && email.len() <= 254
}
