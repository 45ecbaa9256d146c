use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    app_state::AppState,
    domain::{ClubAPIError, ClubId, ClubMember, MemberId},
    utils::{
        auth::AuthContext,
        club::{require_existing_member, require_self},
    },
};

/// Files a join request for the calling member.
#[tracing::instrument(name = "Apply to club route handler", skip_all)]
pub async fn apply(
    State(state): State<AppState>,
    auth: AuthContext,
    Path((club_id, member_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<ClubMember>), ClubAPIError> {
    let club_id = ClubId::parse(&club_id)?;
    let member_id = MemberId::parse(&member_id)?;
    require_self(&auth, &member_id)?;
    require_existing_member(&state.member_registry, &auth).await?;

    if !state.club_registry.is_id_exist(&club_id).await? {
        return Err(ClubAPIError::ClubNotExist);
    }

    let row = state.club_membership.add(&club_id, &member_id).await?;

    Ok((StatusCode::CREATED, Json(row)))
}
