use std::{borrow::Cow, collections::BTreeMap, fmt};

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError, ValidationErrors};

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";
pub const INVALID_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";
pub const INVALID_USERNAME: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
pub const INVALID_SLUG: &str =
    "Enter a valid “slug” consisting of letters, numbers, underscores or hyphens.";
pub const NUMERIC_PASSWORD: &str = "This password is entirely numeric.";
pub const SIMILAR_PASSWORD: &str = "The password is too similar to the username.";

/// Field name to messages, in a stable order for rendering.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    /// Key for errors that belong to the form as a whole.
    pub const NON_FIELD: &'static str = "__all__";

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;
                write!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Struct-level checks land under `__all__`, which is also [`FormErrors::NON_FIELD`].
impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut form_errors = FormErrors::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .clone()
                    .unwrap_or_else(|| Cow::Owned(error.code.to_string()));
                form_errors.add(field, message);
            }
        }
        form_errors
    }
}

/// Runs the derived rules and collects their messages for re-rendering a form.
pub trait FormValidate: Validate {
    fn form_errors(&self) -> FormErrors {
        match self.validate() {
            Ok(()) => FormErrors::default(),
            Err(errors) => errors.into(),
        }
    }
}

impl<T: Validate> FormValidate for T {}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Text inputs are stripped before any rule sees them.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|value| value.trim().to_string())
}

pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", REQUIRED));
    }
    Ok(())
}

pub fn username_rules(username: &str) -> Result<(), ValidationError> {
    required(username)?;
    if username
        .chars()
        .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
    {
        Ok(())
    } else {
        Err(error("invalid_username", INVALID_USERNAME))
    }
}

pub fn slug_rules(slug: &str) -> Result<(), ValidationError> {
    required(slug)?;
    if slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(())
    } else {
        Err(error("invalid_slug", INVALID_SLUG))
    }
}

pub fn not_numeric(password: &str) -> Result<(), ValidationError> {
    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        return Err(error("password_entirely_numeric", NUMERIC_PASSWORD));
    }
    Ok(())
}

pub fn not_like_username(username: &str, password: &str) -> Result<(), ValidationError> {
    if !password.is_empty() && password.trim() == username.trim() {
        return Err(error("password_too_similar", SIMILAR_PASSWORD));
    }
    Ok(())
}

/// Accepts only files that decode as a complete image.
pub fn is_image(content: &[u8]) -> bool {
    image::load_from_memory(content).is_ok()
}
