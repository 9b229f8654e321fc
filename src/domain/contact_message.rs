use unicode_segmentation::UnicodeSegmentation;

const MIN_CHAR_LENGHT: usize = 10;
const MAX_CHAR_LENGHT: usize = 2000;
const ALLOWED_PUNCTUATION: [char; 26] = [
    '.', ',', '!', '?', '-', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '=', '[', ']',
    '{', '}', '|', '\\', ':', '"', ';',
];

#[derive(Debug, Clone, serde::Serialize)]
pub struct ContactMessage(String);

impl ContactMessage {
    pub fn parse(message: String) -> Result<ContactMessage, Vec<String>> {
        let message = message.trim().to_string();

        if message.is_empty() {
            return Err(vec![String::from("Message is required")]);
        }

        let mut errors = Vec::new();
        let char_count = message.graphemes(true).count();

        if char_count < MIN_CHAR_LENGHT || char_count > MAX_CHAR_LENGHT {
            errors.push(String::from(
                "Message must be between 10 and 2000 characters",
            ));
        }

        let contains_forbidden_chars = message.chars().any(|char| {
            !(char.is_ascii_alphanumeric()
                || char.is_whitespace()
                || matches!(char, '\'' | '<' | '>' | '/')
                || ALLOWED_PUNCTUATION.contains(&char))
        });

        if contains_forbidden_chars {
            errors.push(String::from("Message contains invalid characters"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self(message))
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
