use axum::{extract::State, http::StatusCode};
use axum_extra::extract::CookieJar;

use crate::{
    app_state::AppState,
    domain::MemberAPIError,
    utils::auth::{remove_auth_cookie, revoke_session, AuthContext},
};

#[tracing::instrument(name = "Logout route handler", skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthContext,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar), MemberAPIError> {
    revoke_session(&auth, &state.banned_token_store).await?;

    Ok((StatusCode::OK, remove_auth_cookie(jar)))
}
