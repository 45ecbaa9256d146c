use color_eyre::eyre::Report;
use thiserror::Error;

use super::{ClubStoreError, MemberStoreError};

#[derive(Debug, Error)]
pub enum MemberAPIError {
    #[error("Login ID already exists")]
    IdDuplicated,
    #[error("Invalid credentials")]
    IncorrectCredentials,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Member not found")]
    MemberNotExist,
    #[error("Missing token")]
    MissingToken,
    #[error("Nickname already exists")]
    NicknameDuplicated,
    #[error("New password must differ from the current password")]
    PasswordSame,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

impl MemberAPIError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::IdDuplicated => "MEMBER_ID_DUPLICATED",
            Self::IncorrectCredentials => "INCORRECT_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::MemberNotExist => "MEMBER_NOT_EXIST",
            Self::MissingToken => "MISSING_TOKEN",
            Self::NicknameDuplicated => "NICKNAME_DUPLICATED",
            Self::PasswordSame => "PASSWORD_SAME",
            Self::UnexpectedError(_) => "UNEXPECTED_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
        }
    }
}

#[derive(Debug, Error)]
pub enum ClubAPIError {
    #[error("Authentication error")]
    AuthenticationError(#[from] MemberAPIError),
    #[error("Club member already exists")]
    ClubMemberDuplicated,
    #[error("Club member is not approved")]
    ClubMemberNotApproved,
    #[error("Club member does not exist")]
    ClubMemberNotExist,
    #[error("Club name already exists")]
    ClubNameDuplicated,
    #[error("Club does not exist")]
    ClubNotExist,
    #[error("Club leader cannot leave the club")]
    LeaderCannotLeave,
    #[error("Member does not exist")]
    MemberNotExist,
    #[error("Not permitted: {0}")]
    NotPermitted(&'static str),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

impl ClubAPIError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationError(e) => e.code(),
            Self::ClubMemberDuplicated => "CLUB_MEMBER_DUPLICATED",
            Self::ClubMemberNotApproved => "CLUB_MEMBER_NOT_APPROVED",
            Self::ClubMemberNotExist => "CLUB_MEMBER_NOT_EXIST",
            Self::ClubNameDuplicated => "CLUB_NAME_DUPLICATED",
            Self::ClubNotExist => "CLUB_NOT_EXIST",
            Self::LeaderCannotLeave => "LEADER_CANNOT_LEAVE",
            Self::MemberNotExist => "MEMBER_NOT_EXIST",
            Self::NotPermitted(_) => "NOT_PERMITTED",
            Self::UnexpectedError(_) => "UNEXPECTED_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<MemberStoreError> for MemberAPIError {
    fn from(e: MemberStoreError) -> Self {
        match e {
            MemberStoreError::LoginIdExists => Self::IdDuplicated,
            MemberStoreError::NicknameExists => Self::NicknameDuplicated,
            MemberStoreError::MemberNotFound => Self::MemberNotExist,
            MemberStoreError::UnexpectedError(report) => {
                Self::UnexpectedError(report)
            }
        }
    }
}

impl From<ClubStoreError> for ClubAPIError {
    fn from(e: ClubStoreError) -> Self {
        match e {
            ClubStoreError::ClubNameExists => Self::ClubNameDuplicated,
            ClubStoreError::ClubNotFound => Self::ClubNotExist,
            ClubStoreError::ClubMemberExists => Self::ClubMemberDuplicated,
            ClubStoreError::ClubMemberNotFound => Self::ClubMemberNotExist,
            ClubStoreError::MemberNotFound => Self::MemberNotExist,
            ClubStoreError::UnexpectedError(report) => {
                Self::UnexpectedError(report)
            }
        }
    }
}

#[derive(Debug, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}
