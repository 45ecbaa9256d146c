use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{ClubId, MemberId, ValidationError};

/// One member's relationship to one club.
///
/// Rows are only ever created through [`ClubMember::applicant`] (pending,
/// plain member) or [`ClubMember::leader`] (approved leader), so an
/// unapproved row always carries [`ClubRole::Member`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubMember {
    pub id: ClubMemberId,
    #[serde(rename = "clubId")]
    pub club_id: ClubId,
    #[serde(rename = "memberId")]
    pub member_id: MemberId,
    pub role: ClubRole,
    pub approved: bool,
    #[serde(rename = "paymentStatus")]
    pub payment_status: bool,
}

impl ClubMember {
    pub fn applicant(club_id: ClubId, member_id: MemberId) -> Self {
        Self {
            id: ClubMemberId::default(),
            club_id,
            member_id,
            role: ClubRole::Member,
            approved: false,
            payment_status: false,
        }
    }

    pub fn leader(club_id: ClubId, member_id: MemberId) -> Self {
        Self {
            id: ClubMemberId::default(),
            club_id,
            member_id,
            role: ClubRole::Leader,
            approved: true,
            payment_status: false,
        }
    }

    pub fn is_leader(&self) -> bool {
        self.role == ClubRole::Leader
    }

    pub fn is_leader_or_staff(&self) -> bool {
        matches!(self.role, ClubRole::Leader | ClubRole::Staff)
    }

    pub fn is_pending(&self) -> bool {
        !self.approved
    }

    pub fn matches(&self, filter: ClubMemberFilter) -> bool {
        match filter {
            ClubMemberFilter::Approved => self.approved,
            ClubMemberFilter::Pending => !self.approved,
            ClubMemberFilter::Paid => self.approved && self.payment_status,
            ClubMemberFilter::NotPaid => self.approved && !self.payment_status,
        }
    }
}

/// Row selections used when listing the members of a club.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClubMemberFilter {
    Approved,
    Pending,
    Paid,
    NotPaid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClubMemberId(Uuid);

impl ClubMemberId {
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let parsed = uuid::Uuid::try_parse(id).map_err(|e| {
            ValidationError::new(format!("Invalid club member ID: {e}"))
        })?;
        Ok(Self(parsed))
    }

    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ClubMemberId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AsRef<Uuid> for ClubMemberId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClubRole {
    Leader,
    Staff,
    Member,
}

impl ClubRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClubRole::Leader => "LEADER",
            ClubRole::Staff => "STAFF",
            ClubRole::Member => "MEMBER",
        }
    }
}

impl FromStr for ClubRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEADER" | "leader" => Ok(ClubRole::Leader),
            "STAFF" | "staff" => Ok(ClubRole::Staff),
            "MEMBER" | "member" => Ok(ClubRole::Member),
            _ => Err(ValidationError::new(format!("Invalid club role: {s}"))),
        }
    }
}

impl fmt::Display for ClubRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
