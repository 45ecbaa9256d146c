use super::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nickname(String);

impl Nickname {
    pub fn parse(name: String) -> Result<Self, ValidationError> {
        if name.trim() != name {
            return Err(ValidationError::new(
                "Nickname cannot start or end with whitespace".to_string(),
            ));
        }
        match name.chars().count() {
            x if x < 2 => Err(ValidationError::new(
                "Nickname must be at least 2 characters".to_string(),
            )),
            x if x > 20 => Err(ValidationError::new(
                "Max nickname length is 20 characters".to_string(),
            )),
            _ => Ok(Self(name)),
        }
    }
}

impl AsRef<String> for Nickname {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
