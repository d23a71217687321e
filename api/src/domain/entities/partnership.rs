//! Partnership contact request
//!
//! Submitted from the site's "Partner with us" form.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::DomainError;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern")
});

/// Wire field names match the form on the site
#[derive(Debug, Clone, Deserialize)]
pub struct PartnershipRequest {
    #[serde(rename = "nome", default)]
    pub first_name: String,
    #[serde(rename = "sobrenome", default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "mensagem", default)]
    pub message: String,
}

impl PartnershipRequest {
    /// Trim every field and reject blank fields or a malformed email
    pub fn validated(self) -> Result<Self, DomainError> {
        let request = Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        };

        let missing: Vec<&str> = [
            ("nome", &request.first_name),
            ("sobrenome", &request.last_name),
            ("email", &request.email),
            ("mensagem", &request.message),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| *field)
        .collect();

        if !missing.is_empty() {
            return Err(DomainError::Validation(format!(
                "Missing fields: {}",
                missing.join(", ")
            )));
        }

        if !EMAIL.is_match(&request.email) {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }

        Ok(request)
    }

    /// Plain-text body used when forwarding the message
    pub fn to_text(&self) -> String {
        format!(
            "New partnership request\nFrom: {} {} <{}>\n\n{}",
            self.first_name, self.last_name, self.email, self.message
        )
    }
}
