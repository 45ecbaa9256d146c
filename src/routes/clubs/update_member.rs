use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{ClubAPIError, ClubId, ClubMemberId, ClubRole, MemberId},
    utils::{
        auth::AuthContext,
        club::{require_leader, require_leader_or_staff},
    },
};

/// Approves a join request. The caller must lead or staff the club the
/// request belongs to.
#[tracing::instrument(name = "Approve club member route handler", skip_all)]
pub async fn approve_club_member(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(club_member_id): Path<String>,
) -> Result<StatusCode, ClubAPIError> {
    let club_member_id = ClubMemberId::parse(&club_member_id)?;

    let row = state
        .club_membership
        .get_club_member_by_id(&club_member_id)
        .await?;
    require_leader_or_staff(&state.club_membership, &auth, &row.club_id)
        .await?;

    state
        .club_membership
        .approve_club_member(&club_member_id)
        .await?;

    Ok(StatusCode::OK)
}

#[tracing::instrument(name = "Set payment status route handler", skip_all)]
pub async fn set_payment_status(
    State(state): State<AppState>,
    auth: AuthContext,
    Path((club_id, member_id)): Path<(String, String)>,
    Json(request): Json<PaymentStatusRequest>,
) -> Result<StatusCode, ClubAPIError> {
    let club_id = ClubId::parse(&club_id)?;
    let member_id = MemberId::parse(&member_id)?;
    require_leader_or_staff(&state.club_membership, &auth, &club_id).await?;

    match request.paid {
        true => {
            state
                .club_membership
                .set_payment_status_true(&club_id, &member_id)
                .await?
        }
        false => {
            state
                .club_membership
                .set_payment_status_false(&club_id, &member_id)
                .await?
        }
    }

    Ok(StatusCode::OK)
}

#[derive(Deserialize)]
pub struct PaymentStatusRequest {
    pub paid: bool,
}

#[tracing::instrument(name = "Change club role route handler", skip_all)]
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthContext,
    Path((club_id, member_id)): Path<(String, String)>,
    Json(request): Json<ChangeRoleRequest>,
) -> Result<StatusCode, ClubAPIError> {
    let club_id = ClubId::parse(&club_id)?;
    let member_id = MemberId::parse(&member_id)?;
    let role: ClubRole = request.role.parse()?;
    require_leader(&state.club_membership, &auth, &club_id).await?;

    state
        .club_membership
        .change_role(&club_id, &member_id, role)
        .await?;

    Ok(StatusCode::OK)
}

#[derive(Deserialize)]
pub struct ChangeRoleRequest {
    pub role: String,
}

/// Members may leave on their own; leader and staff may remove others.
#[tracing::instrument(name = "Remove club member route handler", skip_all)]
pub async fn remove_club_member(
    State(state): State<AppState>,
    auth: AuthContext,
    Path((club_id, member_id)): Path<(String, String)>,
) -> Result<StatusCode, ClubAPIError> {
    let club_id = ClubId::parse(&club_id)?;
    let member_id = MemberId::parse(&member_id)?;

    if auth.member_id != member_id {
        require_leader_or_staff(&state.club_membership, &auth, &club_id)
            .await?;
    }

    state
        .club_membership
        .delete_club_member(&club_id, &member_id)
        .await?;

    Ok(StatusCode::OK)
}
