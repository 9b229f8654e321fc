use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::contact_email::ContactEmail;
use crate::domain::contact_message::ContactMessage;
use crate::domain::contact_name::ContactName;

/// A contact-form payload that has passed every validation rule. It lives for
/// one request and is dropped after the dispatch attempt.
#[derive(Debug)]
pub struct Submission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub message: ContactMessage,
    pub received_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct ContactFormBody {
    pub name: String,
    pub email: String,
    pub message: String,
}

// Missing fields deserialize to empty strings so they surface as
// "required" validation errors instead of a deserializer rejection.
impl Default for ContactFormBody {
    fn default() -> Self {
        ContactFormBody {
            name: String::new(),
            email: String::new(),
            message: String::new(),
        }
    }
}

impl Submission {
    /// Checks the three fields independently and returns every violation
    /// together, in field order, so the client gets full feedback at once.
    pub fn parse(body: ContactFormBody) -> Result<Submission, Vec<String>> {
        let mut errors = Vec::new();

        let name = ContactName::parse(body.name).map_err(|errs| errors.extend(errs));
        let email = ContactEmail::parse(body.email).map_err(|errs| errors.extend(errs));
        let message = ContactMessage::parse(body.message).map_err(|errs| errors.extend(errs));

        match (name, email, message) {
            (Ok(name), Ok(email), Ok(message)) => Ok(Submission {
                name,
                email,
                message,
                received_at: Utc::now(),
            }),
            _ => Err(errors),
        }
    }
}
