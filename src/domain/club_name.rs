use super::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClubName(String);

impl ClubName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        match name.trim().chars().count() {
            0 => Err(ValidationError::new(
                "Club name cannot be empty".to_string(),
            )),
            x if x > 50 => Err(ValidationError::new(
                "Max club name length is 50 characters".to_string(),
            )),
            _ => Ok(Self(name.trim().to_owned())),
        }
    }
}

impl AsRef<String> for ClubName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_club_names() {
    let parsed = ClubName::parse("Thunder").expect("Failed to parse club name");
    assert_eq!(parsed.as_ref(), "Thunder");

    let parsed = ClubName::parse(&"a".repeat(50)).expect("50 chars is valid");
    assert_eq!(parsed.as_ref().len(), 50);
}

#[test]
fn test_club_names_are_trimmed() {
    let parsed = ClubName::parse("  Thunder FC ").unwrap();
    assert_eq!(parsed.as_ref(), "Thunder FC");
}

#[test]
fn test_empty_club_names() {
    for name in ["", "   "] {
        assert_eq!(
            ClubName::parse(name).unwrap_err().as_ref(),
            "Club name cannot be empty"
        );
    }
}

#[test]
fn test_long_club_names() {
    let result = ClubName::parse(&"a".repeat(51));
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Max club name length is 50 characters"
    );
}
