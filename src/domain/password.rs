use super::ValidationError;
use secrecy::{ExposeSecret, Secret};

const PASSWORD_MIN_CHARS: usize = 8;
const PASSWORD_MAX_CHARS: usize = 128;

/// Plaintext password as submitted by a member. Only ever compared through
/// [`super::verify_password_hash`].
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(s: Secret<String>) -> Result<Password, ValidationError> {
        let char_count = s.expose_secret().chars().count();

        if !(PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&char_count) {
            let qualifier = if char_count < PASSWORD_MIN_CHARS {
                "short"
            } else {
                "long"
            };
            return Err(ValidationError::new(format!(
                "Password too {qualifier}. Should be {PASSWORD_MIN_CHARS} to {PASSWORD_MAX_CHARS} characters."
            )));
        }

        Ok(Self(s))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
