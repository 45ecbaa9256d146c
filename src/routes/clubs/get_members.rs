use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{ClubAPIError, ClubId, ClubMember},
    utils::{
        auth::AuthContext,
        club::{require_club_member, require_leader_or_staff},
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ClubMemberListResponse {
    #[serde(rename = "clubId")]
    pub club_id: ClubId,
    pub members: Vec<ClubMember>,
}

fn list_response(
    club_id: ClubId,
    members: Vec<ClubMember>,
) -> (StatusCode, Json<ClubMemberListResponse>) {
    (
        StatusCode::OK,
        Json(ClubMemberListResponse { club_id, members }),
    )
}

/// Approved roster; leader and staff only.
#[tracing::instrument(name = "Get club members route handler", skip_all)]
pub async fn get_club_members(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(club_id): Path<String>,
) -> Result<(StatusCode, Json<ClubMemberListResponse>), ClubAPIError> {
    let club_id = ClubId::parse(&club_id)?;
    require_leader_or_staff(&state.club_membership, &auth, &club_id).await?;

    let members = state.club_membership.get_club_members(&club_id).await?;
    Ok(list_response(club_id, members))
}

#[tracing::instrument(name = "Get pending club members route handler", skip_all)]
pub async fn get_pending_club_members(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(club_id): Path<String>,
) -> Result<(StatusCode, Json<ClubMemberListResponse>), ClubAPIError> {
    let club_id = ClubId::parse(&club_id)?;
    require_leader_or_staff(&state.club_membership, &auth, &club_id).await?;

    let members = state
        .club_membership
        .get_not_accepted_club_members(&club_id)
        .await?;
    Ok(list_response(club_id, members))
}

#[tracing::instrument(name = "Get paid club members route handler", skip_all)]
pub async fn get_paid_club_members(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(club_id): Path<String>,
) -> Result<(StatusCode, Json<ClubMemberListResponse>), ClubAPIError> {
    let club_id = ClubId::parse(&club_id)?;
    require_club_member(&state.club_membership, &auth, &club_id).await?;

    let members = state
        .club_membership
        .get_paid_club_members(&club_id)
        .await?;
    Ok(list_response(club_id, members))
}

#[tracing::instrument(name = "Get unpaid club members route handler", skip_all)]
pub async fn get_not_paid_club_members(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(club_id): Path<String>,
) -> Result<(StatusCode, Json<ClubMemberListResponse>), ClubAPIError> {
    let club_id = ClubId::parse(&club_id)?;
    require_club_member(&state.club_membership, &auth, &club_id).await?;

    let members = state
        .club_membership
        .get_not_paid_club_members(&club_id)
        .await?;
    Ok(list_response(club_id, members))
}
