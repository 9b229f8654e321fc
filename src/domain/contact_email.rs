use validator::validate_email;

const MAX_CHAR_LENGHT: usize = 254;

#[derive(Debug, Clone, serde::Serialize)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(email: String) -> Result<ContactEmail, Vec<String>> {
        let email = email.trim().to_string();

        if email.is_empty() {
            return Err(vec![String::from("Email is required")]);
        }

        let mut errors = Vec::new();

        if email.chars().count() > MAX_CHAR_LENGHT {
            errors.push(String::from("Email address is too long"));
        }

        if !validate_email(&email) {
            errors.push(String::from("Please provide a valid email address"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
