use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::ClubAPIError,
    utils::auth::{remove_auth_cookie, revoke_session, AuthContext},
};

/// Deletes the current account. Members who still lead a club are refused
/// until the club is handed over.
#[tracing::instrument(name = "Delete member route handler", skip_all)]
pub async fn delete_member(
    State(state): State<AppState>,
    auth: AuthContext,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Json<DeleteMemberResponse>), ClubAPIError>
{
    state
        .club_membership
        .release_memberships(&auth.member_id)
        .await?;

    state.member_registry.delete(&auth).await?;

    revoke_session(&auth, &state.banned_token_store).await?;

    let response = Json(DeleteMemberResponse {
        message: format!("Member deleted: {}", auth.login_id.as_ref()),
    });

    Ok((StatusCode::OK, remove_auth_cookie(jar), response))
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct DeleteMemberResponse {
    pub message: String,
}
