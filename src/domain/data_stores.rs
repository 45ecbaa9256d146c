use super::{
    Club, ClubId, ClubMember, ClubMemberFilter, ClubMemberId, ClubName,
    ClubRole, LoginId, Member, MemberId, MemberPasswordHash, Nickname,
};
use color_eyre::eyre::{Report, Result};
use secrecy::Secret;
use thiserror::Error;

/// Persistence for member accounts. Implementations must reject a second
/// member with the same login ID or nickname even when callers skipped the
/// existence checks.
#[async_trait::async_trait]
pub trait MemberStore {
    async fn add_member(&mut self, member: Member)
        -> Result<(), MemberStoreError>;
    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError>;
    async fn get_member_by_login_id(
        &self,
        login_id: &LoginId,
    ) -> Result<Member, MemberStoreError>;
    async fn login_id_exists(
        &self,
        login_id: &LoginId,
    ) -> Result<bool, MemberStoreError>;
    async fn nickname_exists(
        &self,
        nickname: &Nickname,
    ) -> Result<bool, MemberStoreError>;
    async fn update_nickname(
        &mut self,
        id: &MemberId,
        nickname: &Nickname,
    ) -> Result<(), MemberStoreError>;
    async fn update_password(
        &mut self,
        id: &MemberId,
        hash: &MemberPasswordHash,
    ) -> Result<(), MemberStoreError>;
    async fn delete_member(
        &mut self,
        id: &MemberId,
    ) -> Result<(), MemberStoreError>;
}

#[derive(Debug, Error)]
pub enum MemberStoreError {
    #[error("Login ID already exists")]
    LoginIdExists,
    #[error("Nickname already exists")]
    NicknameExists,
    #[error("Member not found")]
    MemberNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for MemberStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::LoginIdExists, Self::LoginIdExists)
                | (Self::NicknameExists, Self::NicknameExists)
                | (Self::MemberNotFound, Self::MemberNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistence for clubs and their membership rows. Both live behind one
/// store so a club and its leader row can be written atomically.
#[async_trait::async_trait]
pub trait ClubStore {
    /// Inserts the club together with its leader row, or neither.
    async fn add_club(
        &mut self,
        club: &Club,
        leader: &ClubMember,
    ) -> Result<(), ClubStoreError>;
    async fn get_club(&self, id: &ClubId) -> Result<Club, ClubStoreError>;
    async fn get_club_by_name(
        &self,
        name: &ClubName,
    ) -> Result<Club, ClubStoreError>;
    async fn club_name_exists(
        &self,
        name: &ClubName,
    ) -> Result<bool, ClubStoreError>;
    async fn club_id_exists(&self, id: &ClubId)
        -> Result<bool, ClubStoreError>;

    async fn add_club_member(
        &mut self,
        club_member: &ClubMember,
    ) -> Result<(), ClubStoreError>;
    async fn get_club_member(
        &self,
        id: &ClubMemberId,
    ) -> Result<ClubMember, ClubStoreError>;
    async fn find_club_member(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<Option<ClubMember>, ClubStoreError>;
    async fn get_club_members(
        &self,
        club_id: &ClubId,
        filter: ClubMemberFilter,
    ) -> Result<Vec<ClubMember>, ClubStoreError>;
    async fn get_memberships(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<ClubMember>, ClubStoreError>;
    async fn set_approved(
        &mut self,
        id: &ClubMemberId,
    ) -> Result<(), ClubStoreError>;
    async fn set_payment_status(
        &mut self,
        club_id: &ClubId,
        member_id: &MemberId,
        paid: bool,
    ) -> Result<(), ClubStoreError>;
    async fn set_role(
        &mut self,
        club_id: &ClubId,
        member_id: &MemberId,
        role: ClubRole,
    ) -> Result<(), ClubStoreError>;
    async fn delete_club_member(
        &mut self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<(), ClubStoreError>;
    async fn delete_memberships(
        &mut self,
        member_id: &MemberId,
    ) -> Result<(), ClubStoreError>;
}

#[derive(Debug, Error)]
pub enum ClubStoreError {
    #[error("Club name already exists")]
    ClubNameExists,
    #[error("Club not found")]
    ClubNotFound,
    #[error("Club member already exists")]
    ClubMemberExists,
    #[error("Club member not found")]
    ClubMemberNotFound,
    #[error("Member not found")]
    MemberNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for ClubStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::ClubNameExists, Self::ClubNameExists)
                | (Self::ClubNotFound, Self::ClubNotFound)
                | (Self::ClubMemberExists, Self::ClubMemberExists)
                | (Self::ClubMemberNotFound, Self::ClubMemberNotFound)
                | (Self::MemberNotFound, Self::MemberNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait BannedTokenStore {
    async fn add_token(&mut self, token: &Secret<String>) -> Result<()>;
    async fn check_token(
        &self,
        token: &Secret<String>,
    ) -> Result<(), BannedTokenStoreError>;
}

#[derive(Debug, Error)]
pub enum BannedTokenStoreError {
    #[error("Token is banned")]
    BannedToken,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for BannedTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::BannedToken, Self::BannedToken)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
