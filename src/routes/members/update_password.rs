use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{MemberAPIError, Password},
    utils::auth::{remove_auth_cookie, revoke_session, AuthContext},
};

/// Changing the password ends the current session.
#[tracing::instrument(name = "Update password route handler", skip_all)]
pub async fn update_password(
    State(state): State<AppState>,
    auth: AuthContext,
    jar: CookieJar,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<(StatusCode, CookieJar), MemberAPIError> {
    let before = Password::parse(request.before)?;
    let after = Password::parse(request.after)?;

    state
        .member_registry
        .update_password(&auth, before, after)
        .await?;

    revoke_session(&auth, &state.banned_token_store).await?;

    Ok((StatusCode::OK, remove_auth_cookie(jar)))
}

#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    pub before: Secret<String>,
    pub after: Secret<String>,
}
