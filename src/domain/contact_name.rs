use unicode_segmentation::UnicodeSegmentation;

const MIN_CHAR_LENGHT: usize = 2;
const MAX_CHAR_LENGHT: usize = 100;

#[derive(Debug, Clone, serde::Serialize)]
pub struct ContactName(String);

impl ContactName {
    /// Collects every violated rule so the client can fix them all at once.
    pub fn parse(name: String) -> Result<ContactName, Vec<String>> {
        let name = name.trim().to_string();

        if name.is_empty() {
            return Err(vec![String::from("Name is required")]);
        }

        let mut errors = Vec::new();
        let char_count = name.graphemes(true).count();

        if char_count < MIN_CHAR_LENGHT || char_count > MAX_CHAR_LENGHT {
            errors.push(String::from("Name must be between 2 and 100 characters"));
        }

        let contains_forbidden_chars = name
            .chars()
            .any(|char| !(char.is_ascii_alphabetic() || matches!(char, ' ' | '-' | '\'' | '.')));

        if contains_forbidden_chars {
            errors.push(String::from("Name contains invalid characters"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
