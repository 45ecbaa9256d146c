use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ClubName, MemberId, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub struct Club {
    pub id: ClubId,
    pub name: ClubName,
    pub leader: MemberId,
    pub address_id: Option<i32>,
    pub point: i32,
    pub monthly_fee: MonthlyFee,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Club {
    pub fn new(new_club: NewClub, leader: MemberId) -> Self {
        let now = Utc::now();
        Self {
            id: ClubId::default(),
            name: new_club.name,
            leader,
            address_id: new_club.address_id,
            point: 0,
            monthly_fee: new_club.monthly_fee,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewClub {
    pub name: ClubName,
    pub address_id: Option<i32>,
    pub monthly_fee: MonthlyFee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClubId(Uuid);

impl ClubId {
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let parsed = uuid::Uuid::try_parse(id).map_err(|e| {
            ValidationError::new(format!("Invalid club ID: {e}"))
        })?;
        Ok(Self(parsed))
    }

    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ClubId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AsRef<Uuid> for ClubId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

/// Fee charged to each member per month, in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyFee(i32);

impl MonthlyFee {
    pub fn parse(amount: i32) -> Result<Self, ValidationError> {
        if amount < 0 {
            return Err(ValidationError::new(String::from(
                "Monthly fee cannot be negative",
            )));
        }
        Ok(Self(amount))
    }

    pub fn value_of(&self) -> i32 {
        self.0
    }
}
