use crate::{
    domain::{ClubAPIError, ClubId, MemberAPIError, MemberId},
    services::{ClubMembership, MemberRegistry},
    utils::auth::AuthContext,
};

/// A session can outlive its account when the account was deleted from
/// another session.
#[tracing::instrument(name = "Check session member exists", skip_all)]
pub async fn require_existing_member(
    registry: &MemberRegistry,
    auth: &AuthContext,
) -> Result<(), ClubAPIError> {
    match registry.get_member(&auth.member_id).await {
        Ok(_) => Ok(()),
        Err(MemberAPIError::MemberNotExist) => Err(ClubAPIError::MemberNotExist),
        Err(e) => Err(e.into()),
    }
}

#[tracing::instrument(name = "Check leader permissions for club", skip_all)]
pub async fn require_leader(
    membership: &ClubMembership,
    auth: &AuthContext,
    club_id: &ClubId,
) -> Result<(), ClubAPIError> {
    match membership.is_club_leader(club_id, &auth.member_id).await? {
        true => Ok(()),
        false => Err(ClubAPIError::NotPermitted("club leader only")),
    }
}

#[tracing::instrument(name = "Check staff permissions for club", skip_all)]
pub async fn require_leader_or_staff(
    membership: &ClubMembership,
    auth: &AuthContext,
    club_id: &ClubId,
) -> Result<(), ClubAPIError> {
    match membership
        .is_club_leader_or_staff(club_id, &auth.member_id)
        .await?
    {
        true => Ok(()),
        false => Err(ClubAPIError::NotPermitted("club leader or staff only")),
    }
}

#[tracing::instrument(name = "Check member permissions for club", skip_all)]
pub async fn require_club_member(
    membership: &ClubMembership,
    auth: &AuthContext,
    club_id: &ClubId,
) -> Result<(), ClubAPIError> {
    match membership.is_club_member(club_id, &auth.member_id).await? {
        true => Ok(()),
        false => Err(ClubAPIError::NotPermitted("approved club members only")),
    }
}

/// Members may only act on their own behalf.
pub fn require_self(
    auth: &AuthContext,
    member_id: &MemberId,
) -> Result<(), ClubAPIError> {
    match &auth.member_id == member_id {
        true => Ok(()),
        false => Err(ClubAPIError::NotPermitted(
            "members can only act for themselves",
        )),
    }
}
