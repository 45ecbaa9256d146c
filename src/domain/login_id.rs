use super::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref LOGIN_ID_PATTERN: Regex =
        Regex::new(r"^[A-Za-z0-9_]{4,20}$").expect("Login ID regex is invalid");
}

/// Name a member signs in with. Unique across all members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoginId(String);

impl LoginId {
    pub fn parse(id: String) -> Result<Self, ValidationError> {
        if LOGIN_ID_PATTERN.is_match(&id) {
            Ok(Self(id))
        } else {
            Err(ValidationError::new(
                "Login ID must be 4 to 20 letters, digits or underscores"
                    .to_string(),
            ))
        }
    }
}

impl AsRef<String> for LoginId {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
